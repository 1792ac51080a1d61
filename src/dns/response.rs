use std::fmt;

use super::name;
use super::record::{self, ResourceRecord};
use super::{DecodeError, Header, Question, CLASS_IN, HEADER_LEN};
use crate::parser;

/// A fully decoded reply, together with everything suspicious noticed on
/// the way. Anomalies are reported, never fatal; only a message this client
/// cannot walk at all turns into a [`DecodeError`].
#[derive(Debug)]
pub struct DnsResponse {
    pub header: Header,
    pub question: Question,
    pub answers: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
    pub anomalies: Vec<Anomaly>,
}

/// Something about the reply that does not add up.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Anomaly {
    IdMismatch { expected: u16, found: u16 },
    NotAResponse,
    RecursionUnavailable,
    ClassMismatch { class: u16 },
    UnsupportedRecordType(u16),
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Anomaly::IdMismatch { .. } => {
                "Unexpected response: query id and response id do not match."
            }
            Anomaly::NotAResponse => {
                "Unexpected response: expected response, but got type query."
            }
            Anomaly::RecursionUnavailable => {
                "Unexpected response: server does not support recursive queries."
            }
            Anomaly::ClassMismatch { .. } => {
                "Unexpected response: query class not Internet address."
            }
            Anomaly::UnsupportedRecordType(_) => "Unexpected response: unknown type error.",
        };
        f.write_str(text)
    }
}

/// Decodes a raw reply datagram.
///
/// `expected_id` is the transaction id of the query this datagram is
/// presumed to answer. A mismatch is reported as an anomaly instead of
/// being rejected: the datagram already won the race, and showing what came
/// back beats showing nothing.
pub fn decode(message: &[u8], expected_id: u16) -> Result<DnsResponse, DecodeError> {
    let (_, header) = parser::dns_header(message).map_err(|_| DecodeError::Truncated)?;

    let mut anomalies = Vec::new();
    if header.id != expected_id {
        anomalies.push(Anomaly::IdMismatch {
            expected: expected_id,
            found: header.id,
        });
    }
    if !header.is_response {
        anomalies.push(Anomaly::NotAResponse);
    }
    if !header.recursion_available {
        anomalies.push(Anomaly::RecursionUnavailable);
    }

    let mut offset = HEADER_LEN;

    // question echo; walked mainly for its length
    let mut question = Question {
        name: String::new(),
        query_type: 0,
        query_class: 0,
    };
    for i in 0..header.qd_count {
        let (qname, qname_len) = name::resolve_name(message, offset)?;
        let query_type = super::read_u16(message, offset + qname_len)?;
        let query_class = super::read_u16(message, offset + qname_len + 2)?;
        offset += qname_len + 4;

        if i == 0 {
            question = Question {
                name: qname,
                query_type,
                query_class,
            };
        }
    }

    let mut answers = Vec::new();
    let mut additionals = Vec::new();

    if header.an_count == 0 {
        // nothing answered; the report decides how to phrase the absence
        return Ok(DnsResponse {
            header,
            question,
            answers,
            additionals,
            anomalies,
        });
    }

    let (next, halted) = parse_section(
        message,
        offset,
        header.an_count,
        &mut answers,
        &mut anomalies,
    )?;
    offset = next;

    if !halted && header.ar_count > 0 {
        // authority records are stepped over, never materialized
        for _ in 0..header.ns_count {
            let (_, name_len) = name::classify_name_field(message, offset)?;
            let rdlength = super::read_u16(message, offset + name_len + 8)?;
            offset += name_len + 10 + rdlength as usize;
        }

        parse_section(
            message,
            offset,
            header.ar_count,
            &mut additionals,
            &mut anomalies,
        )?;
    }

    Ok(DnsResponse {
        header,
        question,
        answers,
        additionals,
        anomalies,
    })
}

/// Walks `count` records, collecting them and any class anomalies. Returns
/// the offset past the section and whether an unsupported TYPE cut the walk
/// short.
fn parse_section(
    message: &[u8],
    mut offset: usize,
    count: u16,
    records: &mut Vec<ResourceRecord>,
    anomalies: &mut Vec<Anomaly>,
) -> Result<(usize, bool), DecodeError> {
    for _ in 0..count {
        match record::parse_record(message, offset) {
            Ok((record, next)) => {
                if record.class != CLASS_IN {
                    anomalies.push(Anomaly::ClassMismatch {
                        class: record.class,
                    });
                }
                records.push(record);
                offset = next;
            }
            Err(DecodeError::UnsupportedRecordType(t)) => {
                anomalies.push(Anomaly::UnsupportedRecordType(t));
                return Ok((offset, true));
            }
            Err(e) => return Err(e),
        }
    }

    Ok((offset, false))
}
