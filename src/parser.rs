use nom::{
    bits::{bits, complete::take},
    bytes::complete::take_while1,
    combinator::{all_consuming, verify},
    number::complete::be_u16,
    sequence::tuple,
    IResult,
};

use crate::dns::Header;

type BitInput<'a> = (&'a [u8], usize);

fn take_one_bit(input: BitInput) -> IResult<BitInput, u8> {
    take(1usize)(input)
}

fn take_three_bits(input: BitInput) -> IResult<BitInput, u8> {
    take(3usize)(input)
}

fn take_four_bits(input: BitInput) -> IResult<BitInput, u8> {
    take(4usize)(input)
}

/// Parses the fixed 12 octet message header, picking the flag word apart at
/// the bit level as laid out in [RFC 1035](https://tools.ietf.org/html/rfc1035#section-4.1.1).
pub fn dns_header(input: &[u8]) -> IResult<&[u8], Header> {
    let mut parser = tuple((
        be_u16,
        bits(tuple((
            take_one_bit,
            take_four_bits,
            take_one_bit,
            take_one_bit,
            take_one_bit,
            take_one_bit,
            take_three_bits,
            take_four_bits,
        ))),
        be_u16,
        be_u16,
        be_u16,
        be_u16,
    ));

    let (input, (id, flags, qd_count, an_count, ns_count, ar_count)) = parser(input)?;
    let (qr, opcode, aa, tc, rd, ra, _z, rcode) = flags;

    Ok((
        input,
        Header {
            id,
            is_response: qr != 0,
            opcode,
            authoritative_answer: aa != 0,
            truncated: tc != 0,
            recursion_desired: rd != 0,
            recursion_available: ra != 0,
            response_code: rcode.into(),
            qd_count,
            an_count,
            ns_count,
            ar_count,
        },
    ))
}

/// A single hostname label as described in
/// [RFC 1035](https://tools.ietf.org/html/rfc1035#section-2.3.1): letters,
/// digits and interior hyphens, 63 octets at most.
fn host_label(input: &str) -> IResult<&str, &str> {
    verify(
        take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-'),
        |label: &str| label.len() <= 63 && !label.starts_with('-') && !label.ends_with('-'),
    )(input)
}

/// Checks domain syntax as supplied on the command line: dot separated
/// labels, at least two of them, 253 characters at most.
pub fn is_valid_domain(name: &str) -> bool {
    if name.len() > 253 {
        return false;
    }

    let mut labels = 0;
    for label in name.split('.') {
        if all_consuming(host_label)(label).is_err() {
            return false;
        }
        labels += 1;
    }

    labels >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::Rcode;

    #[test]
    fn test_parse_id() {
        let raw_header = b"\x66\xf3\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00";

        let (_, header) = dns_header(raw_header).unwrap();

        assert_eq!(header.id, 26355);
    }

    #[test]
    fn test_parse_query_flags() {
        let raw_header = b"\x66\xf3\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00";

        let (_, header) = dns_header(raw_header).unwrap();

        assert!(!header.is_response);
        assert_eq!(header.opcode, 0);
        assert!(!header.authoritative_answer);
        assert!(!header.truncated);
        assert!(header.recursion_desired);
        assert!(!header.recursion_available);
        assert_eq!(header.response_code, Rcode::NoError);
    }

    #[test]
    fn test_parse_response_flags() {
        let raw_header = b"\x66\xf3\x84\x80\x00\x01\x00\x02\x00\x00\x00\x01";

        let (_, header) = dns_header(raw_header).unwrap();

        assert!(header.is_response);
        assert!(header.authoritative_answer);
        assert!(!header.recursion_desired);
        assert!(header.recursion_available);
    }

    #[test]
    fn test_parse_counts() {
        let raw_header = b"\x66\xf3\x84\x80\x00\x01\x00\x02\x00\x03\x00\x01";

        let (_, header) = dns_header(raw_header).unwrap();

        assert_eq!(header.qd_count, 1);
        assert_eq!(header.an_count, 2);
        assert_eq!(header.ns_count, 3);
        assert_eq!(header.ar_count, 1);
    }

    #[test]
    fn test_parse_rcode_name_error() {
        let raw_header = b"\x66\xf3\x81\x83\x00\x01\x00\x00\x00\x00\x00\x00";

        let (_, header) = dns_header(raw_header).unwrap();

        assert_eq!(header.response_code, Rcode::NameError);
    }

    #[test]
    fn test_parse_rcode_unknown() {
        let raw_header = b"\x66\xf3\x81\x8b\x00\x01\x00\x00\x00\x00\x00\x00";

        let (_, header) = dns_header(raw_header).unwrap();

        assert_eq!(header.response_code, Rcode::Unknown(11));
    }

    #[test]
    fn test_parse_short_header() {
        let raw_header = b"\x66\xf3\x01";

        assert!(dns_header(raw_header).is_err());
    }

    #[test]
    fn test_valid_domains() {
        assert!(is_valid_domain("www.mcgill.ca"));
        assert!(is_valid_domain("mcgill.ca"));
        assert!(is_valid_domain("a1-b2.example.com"));
        assert!(is_valid_domain("0test.com"));
    }

    #[test]
    fn test_single_label_rejected() {
        assert!(!is_valid_domain("localhost"));
    }

    #[test]
    fn test_hyphen_placement_rejected() {
        assert!(!is_valid_domain("-bad.com"));
        assert!(!is_valid_domain("bad-.com"));
    }

    #[test]
    fn test_empty_label_rejected() {
        assert!(!is_valid_domain("a..com"));
        assert!(!is_valid_domain("example.com."));
        assert!(!is_valid_domain(".example.com"));
    }

    #[test]
    fn test_invalid_characters_rejected() {
        assert!(!is_valid_domain("bad_host.com"));
        assert!(!is_valid_domain("spaced out.com"));
    }

    #[test]
    fn test_long_label_rejected() {
        let name = format!("{}.com", "a".repeat(64));

        assert!(!is_valid_domain(&name));
        assert!(is_valid_domain(&format!("{}.com", "a".repeat(63))));
    }

    #[test]
    fn test_long_name_rejected() {
        let name = [
            "a".repeat(63),
            "b".repeat(63),
            "c".repeat(63),
            "d".repeat(63),
        ]
        .join(".");

        assert!(!is_valid_domain(&name));
    }
}
