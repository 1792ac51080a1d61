pub mod name;
pub mod query;
pub mod record;
pub mod response;

pub use query::Query;
pub use record::{RData, ResourceRecord};
pub use response::{Anomaly, DnsResponse};

use std::fmt;
use std::str::FromStr;

/// Fixed size of the DNS message header.
pub const HEADER_LEN: usize = 12;

/// The Internet class, the only CLASS this client sends or expects back.
pub const CLASS_IN: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of message")]
    Truncated,
    #[error("malformed compression pointer")]
    MalformedPointer,
    #[error("unsupported record type {0}")]
    UnsupportedRecordType(u16),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub id: u16,
    pub is_response: bool,
    pub opcode: u8,
    pub authoritative_answer: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub response_code: Rcode,
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
}

/// Question section as echoed back by the server.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Question {
    pub name: String,
    pub query_type: u16,
    pub query_class: u16,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum QueryType {
    A,
    NS,
    CNAME,
    MX,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Rcode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Unknown(u8),
}

/// A fully qualified domain name, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DomainName(String);

#[derive(Debug, Clone, thiserror::Error)]
#[error("domain name format: labels of 1 to 63 letters, digits or hyphens, no leading or trailing hyphen, at least two labels, 253 characters at most")]
pub struct InvalidDomainName;

impl DomainName {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl FromStr for DomainName {
    type Err = InvalidDomainName;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if crate::parser::is_valid_domain(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(InvalidDomainName)
        }
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<u16> for QueryType {
    type Error = DecodeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(QueryType::A),
            2 => Ok(QueryType::NS),
            5 => Ok(QueryType::CNAME),
            15 => Ok(QueryType::MX),
            t => Err(DecodeError::UnsupportedRecordType(t)),
        }
    }
}

impl From<QueryType> for u16 {
    fn from(value: QueryType) -> u16 {
        match value {
            QueryType::A => 1,
            QueryType::NS => 2,
            QueryType::CNAME => 5,
            QueryType::MX => 15,
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QueryType::A => "A",
            QueryType::NS => "NS",
            QueryType::CNAME => "CNAME",
            QueryType::MX => "MX",
        };
        f.write_str(name)
    }
}

impl From<u8> for Rcode {
    fn from(code: u8) -> Self {
        match code {
            0 => Rcode::NoError,
            1 => Rcode::FormatError,
            2 => Rcode::ServerFailure,
            3 => Rcode::NameError,
            4 => Rcode::NotImplemented,
            5 => Rcode::Refused,
            c => Rcode::Unknown(c),
        }
    }
}

impl fmt::Display for Rcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rcode::NoError => "No error.",
            Rcode::FormatError => {
                "Format error: the name server was unable to interpret the query."
            }
            Rcode::ServerFailure => {
                "Server failure: the name server was unable to process this query due to a problem with the name server."
            }
            Rcode::NameError => {
                "Name error: the domain name referenced in the query does not exist."
            }
            Rcode::NotImplemented => {
                "Not implemented: the name server does not support the requested kind of query."
            }
            Rcode::Refused => {
                "Refused: the name server refuses to perform the requested operation for policy reasons."
            }
            Rcode::Unknown(_) => "Unexpected response: unknown rcode error.",
        };
        f.write_str(text)
    }
}

fn read_u8(message: &[u8], offset: usize) -> Result<u8, DecodeError> {
    message.get(offset).copied().ok_or(DecodeError::Truncated)
}

fn read_u16(message: &[u8], offset: usize) -> Result<u16, DecodeError> {
    let hi = read_u8(message, offset)?;
    let lo = read_u8(message, offset + 1)?;
    Ok(u16::from(hi) << 8 | u16::from(lo))
}

fn read_u32(message: &[u8], offset: usize) -> Result<u32, DecodeError> {
    let hi = read_u16(message, offset)?;
    let lo = read_u16(message, offset + 2)?;
    Ok(u32::from(hi) << 16 | u32::from(lo))
}
