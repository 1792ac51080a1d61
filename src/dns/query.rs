use bytes::BufMut;

use super::{DomainName, QueryType, CLASS_IN};

/// Header flags for an outbound query: all zero except recursion desired.
const QUERY_FLAGS: u16 = 0x0100;

/// An outbound standard query carrying a single question.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub id: u16,
    pub name: DomainName,
    pub query_type: QueryType,
}

impl Query {
    /// Builds a query with a fresh random transaction id. Retransmissions
    /// construct a new `Query`, so no two attempts on the wire share an id.
    pub fn new(name: DomainName, query_type: QueryType) -> Self {
        Self {
            id: fastrand::u16(..),
            name,
            query_type,
        }
    }
}

impl From<&Query> for Vec<u8> {
    fn from(query: &Query) -> Self {
        let mut raw = vec![];

        raw.put_u16(query.id);
        raw.put_u16(QUERY_FLAGS);
        raw.put_u16(1); // QDCOUNT
        raw.put_u16(0); // ANCOUNT
        raw.put_u16(0); // NSCOUNT
        raw.put_u16(0); // ARCOUNT

        for label in query.name.labels() {
            raw.put_u8(label.len() as u8);
            raw.put(label.as_bytes());
        }
        raw.put_u8(0);

        raw.put_u16(query.query_type.into());
        raw.put_u16(CLASS_IN);

        raw
    }
}
