use std::net::Ipv4Addr;

use super::name;
use super::{DecodeError, QueryType};

/// A decoded resource record from the answer or additional section.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRecord {
    pub name: String,
    pub class: u16,
    pub ttl: u32,
    pub data: RData,
}

/// Record payload, by TYPE.
#[derive(Debug, Clone, PartialEq)]
pub enum RData {
    A(Ipv4Addr),
    NS(String),
    CNAME(String),
    MX { preference: u16, exchange: String },
}

/// Decodes the resource record at `offset`.
///
/// Returns the record and the offset of the record that follows: NAME
/// octets, the ten fixed octets (TYPE, CLASS, TTL, RDLENGTH), then RDLENGTH
/// octets, regardless of how much of RDATA the TYPE dispatch looked at.
/// CLASS is carried through untouched; judging it is the caller's concern.
pub fn parse_record(
    message: &[u8],
    offset: usize,
) -> Result<(ResourceRecord, usize), DecodeError> {
    let (name, name_len) = name::resolve_name(message, offset)?;

    let fixed = offset + name_len;
    let rtype = super::read_u16(message, fixed)?;
    let class = super::read_u16(message, fixed + 2)?;
    let ttl = super::read_u32(message, fixed + 4)?;
    let rdlength = super::read_u16(message, fixed + 8)?;
    let rdata = fixed + 10;

    let data = match QueryType::try_from(rtype)? {
        QueryType::A => {
            let octets = message
                .get(rdata..rdata + 4)
                .ok_or(DecodeError::Truncated)?;
            RData::A(Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]))
        }
        QueryType::NS => RData::NS(name::resolve_name(message, rdata)?.0),
        QueryType::CNAME => RData::CNAME(name::resolve_name(message, rdata)?.0),
        QueryType::MX => {
            let preference = super::read_u16(message, rdata)?;
            let (exchange, _) = name::resolve_name(message, rdata + 2)?;
            RData::MX {
                preference,
                exchange,
            }
        }
    };

    let record = ResourceRecord {
        name,
        class,
        ttl,
        data,
    };

    Ok((record, rdata + rdlength as usize))
}
