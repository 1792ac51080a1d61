use super::DecodeError;

/// Upper bound on pointer indirections while resolving a single name.
/// Legitimate messages stay far below this; hitting it means the pointers
/// form a loop.
const MAX_POINTER_HOPS: usize = 16;

const POINTER_MASK: u8 = 0b1100_0000;

/// Storage shape of a NAME field, before any pointer is followed.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NameShape {
    /// A bare two-octet pointer.
    Pointer,
    /// A sequence of labels terminated by a zero octet.
    LabelSequence,
    /// One or more labels terminated by a pointer instead of a zero octet.
    LabelThenPointer,
}

/// Classifies the NAME field at `offset` and reports how many octets it
/// occupies in place, without following any pointer. Used to step over
/// records whose content does not matter.
pub fn classify_name_field(
    message: &[u8],
    offset: usize,
) -> Result<(NameShape, usize), DecodeError> {
    let mut pos = offset;
    let mut seen_label = false;

    loop {
        let len = super::read_u8(message, pos)?;

        if len & POINTER_MASK == POINTER_MASK {
            super::read_u8(message, pos + 1)?;
            let shape = if seen_label {
                NameShape::LabelThenPointer
            } else {
                NameShape::Pointer
            };
            return Ok((shape, pos + 2 - offset));
        }

        if len == 0 {
            return Ok((NameShape::LabelSequence, pos + 1 - offset));
        }

        seen_label = true;
        pos += 1 + len as usize;
    }
}

/// Resolves the possibly-compressed name at `offset` into its dotted form.
///
/// Returns the name together with the number of octets the field occupies
/// at `offset` itself: a pointer occupies two octets no matter how long the
/// name it refers to is, while a plain label sequence runs through its zero
/// terminator.
///
/// Compression works as described in
/// [RFC 1035 4.1.4](https://tools.ietf.org/html/rfc1035#section-4.1.4): a
/// length octet with the top two bits set is a pointer whose lower 14 bits
/// form an absolute offset into the message.
pub fn resolve_name(message: &[u8], offset: usize) -> Result<(String, usize), DecodeError> {
    let mut labels: Vec<String> = Vec::new();
    let mut pos = offset;
    let mut consumed = 0;
    let mut jumped = false;
    let mut hops = 0;

    loop {
        let len = super::read_u8(message, pos)?;

        if len & POINTER_MASK == POINTER_MASK {
            let low = super::read_u8(message, pos + 1)?;
            if !jumped {
                consumed = pos + 2 - offset;
                jumped = true;
            }

            hops += 1;
            if hops > MAX_POINTER_HOPS {
                return Err(DecodeError::MalformedPointer);
            }

            pos = usize::from(len & !POINTER_MASK) << 8 | usize::from(low);
            continue;
        }

        if len == 0 {
            if !jumped {
                consumed = pos + 1 - offset;
            }
            break;
        }

        let end = pos + 1 + len as usize;
        let label = message.get(pos + 1..end).ok_or(DecodeError::Truncated)?;
        labels.push(String::from_utf8_lossy(label).into_owned());
        pos = end;
    }

    Ok((labels.join("."), consumed))
}
