use anfrage::dns::{response, DomainName, QueryType};
use anfrage::{report, DnsClient, Settings};

use clap::Parser;
use env_logger::Env;

use std::net::{Ipv4Addr, SocketAddr};
use std::process;
use std::time::Duration;

/// Queries a DNS server over UDP and prints the records it returns.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// Address of the DNS server to query, optionally prefixed with `@`
    #[arg(value_parser = parse_server)]
    server: Ipv4Addr,

    /// Domain name to look up
    name: DomainName,

    /// Seconds to wait for a reply before retransmitting
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Retransmissions after the first send
    #[arg(short = 'r', long)]
    max_retries: Option<u32>,

    /// UDP port of the server
    #[arg(short, long)]
    port: Option<u16>,

    /// Query mail exchange records
    #[arg(long, conflicts_with = "ns")]
    mx: bool,

    /// Query name server records
    #[arg(long)]
    ns: bool,
}

impl Cli {
    fn query_type(&self) -> QueryType {
        if self.mx {
            QueryType::MX
        } else if self.ns {
            QueryType::NS
        } else {
            QueryType::A
        }
    }
}

fn parse_server(value: &str) -> Result<Ipv4Addr, String> {
    let value = value.strip_prefix('@').unwrap_or(value);

    value.parse().map_err(|_| {
        String::from("invalid IP, should be in format: xxx.xxx.xxx.xxx with xxx between 0-255")
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let settings = Settings::load().unwrap_or_else(|err| {
        log::warn!("could not load settings, falling back to defaults: {}", err);
        Settings::default()
    });
    log::debug!("Settings loaded:\n{:?}", settings);

    let client = DnsClient {
        server: SocketAddr::from((cli.server, cli.port.unwrap_or(settings.port))),
        timeout: Duration::from_secs(cli.timeout.unwrap_or(settings.timeout)),
        max_retries: cli.max_retries.unwrap_or(settings.max_retries),
    };

    println!("DnsClient sending request for {}", cli.name);
    println!("Server: {}", cli.server);
    println!("Request type: {}", cli.query_type());

    let reply = match client.lookup(&cli.name, cli.query_type()).await {
        Ok(reply) => reply,
        Err(err) => {
            println!("ERROR    {}", err);
            process::exit(1);
        }
    };

    report::print_receipt(&reply);

    match response::decode(&reply.bytes, reply.query_id) {
        Ok(response) => report::print_response(&response),
        Err(err) => {
            println!("ERROR    Unexpected response: {}", err);
            process::exit(1);
        }
    }
}
