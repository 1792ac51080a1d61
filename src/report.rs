use crate::client::Reply;
use crate::dns::{DnsResponse, RData, Rcode, ResourceRecord};

/// Prints the receipt line for a reply.
pub fn print_receipt(reply: &Reply) {
    println!(
        "Response received after {} seconds ({} retries)",
        reply.elapsed.as_secs_f64(),
        reply.retries
    );
}

/// Prints a decoded reply.
pub fn print_response(response: &DnsResponse) {
    for line in response_lines(response) {
        println!("{}", line);
    }
}

/// Renders a decoded reply. Anomalies come first, the response code when it
/// carries news, and the record sections last. Section banners show the
/// counts the server claimed; the lines below them show what actually
/// decoded.
fn response_lines(response: &DnsResponse) -> Vec<String> {
    let mut lines = Vec::new();

    for anomaly in &response.anomalies {
        lines.push(format!("ERROR    {}", anomaly));
    }

    match response.header.response_code {
        Rcode::NoError => {}
        Rcode::NameError => lines.push(format!("NOTFOUND     {}", Rcode::NameError)),
        code => lines.push(format!("ERROR    {}", code)),
    }

    let auth = response.header.authoritative_answer;

    if response.header.an_count == 0 {
        if response.header.response_code == Rcode::NoError {
            lines.push(String::from("NOTFOUND - Answer Section"));
        }
        return lines;
    }

    lines.push(format!(
        "*** Answer Section ({} records) ***",
        response.header.an_count
    ));
    for record in &response.answers {
        lines.push(record_line(record, auth));
    }

    // once decoding stopped on an unknown TYPE, nothing past it is known
    if (response.answers.len() as u16) < response.header.an_count {
        return lines;
    }

    if response.header.ar_count == 0 {
        lines.push(String::from("NOTFOUND - Additional Section"));
        return lines;
    }

    lines.push(format!(
        "*** Additional Section ({} records) ***",
        response.header.ar_count
    ));
    for record in &response.additionals {
        lines.push(record_line(record, auth));
    }

    lines
}

fn record_line(record: &ResourceRecord, authoritative: bool) -> String {
    let auth = if authoritative { "auth" } else { "nonauth" };

    match &record.data {
        RData::A(addr) => format!("IP   {}   {}   {}", addr, record.ttl, auth),
        RData::NS(name) => format!("NS   {}   {}   {}", name, record.ttl, auth),
        RData::CNAME(name) => format!("CNAME   {}   {}   {}", name, record.ttl, auth),
        RData::MX {
            preference,
            exchange,
        } => format!(
            "MX   {}     {}   {}   {}",
            exchange, preference, record.ttl, auth
        ),
    }
}
