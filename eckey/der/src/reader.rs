/*!
    Recursive-descent DER reader.

    Reads one TLV at a time:
      [0]      tag (single identifier octet, low-tag-number form only)
      [1]      length: short form (0..=127), or 0x80|n followed by n
               big-endian length octets (n in 1..=4)
      [..]     content: exactly `length` octets

    Constructed values (SEQUENCE, `[n]`) are read child by child until the
    declared length is consumed exactly. Every offset reported in an error
    is relative to the start of the buffer passed in.
*/

use crate::error::{DerError, DerResult};
use crate::node::{Asn1Node, length_octets, tag};
use crate::oid::ObjectIdentifier;

/**
    Maximum nesting of constructed values. EC key containers nest three
    levels deep; anything past this is hostile input.
*/
pub const MAX_DEPTH: usize = 32;

/**
    Read one value starting at `offset`.

    Returns the node and the number of bytes it occupies (header included).
*/
pub fn read(buf: &[u8], offset: usize) -> DerResult<(Asn1Node, usize)> {
    read_value(buf, offset, 0)
}

/**
    Read a single top-level value that must span the whole buffer.
*/
pub fn read_all(buf: &[u8]) -> DerResult<Asn1Node> {
    let (node, consumed) = read(buf, 0)?;
    if consumed != buf.len() {
        return Err(DerError::TrailingData {
            offset: consumed,
            trailing: buf.len() - consumed,
        });
    }
    tracing::trace!(len = consumed, kind = node.kind_name(), "read DER value");
    Ok(node)
}

/**
    Parsed identifier + length octets.
*/
struct Header {
    tag: u8,
    /// Offset of the first content octet.
    content_start: usize,
    content_len: usize,
}

impl Header {
    fn content_end(&self) -> usize {
        self.content_start + self.content_len
    }
}

fn read_header(buf: &[u8], offset: usize) -> DerResult<Header> {
    let tag = *buf.get(offset).ok_or(DerError::BufferOverrun {
        offset,
        needed: 1,
        available: 0,
    })?;

    let length_offset = offset + 1;
    let first = *buf.get(length_offset).ok_or(DerError::BufferOverrun {
        offset: length_offset,
        needed: 1,
        available: 0,
    })?;

    let (content_len, length_size) = if first & 0x80 == 0 {
        (usize::from(first), 1)
    } else {
        let count = usize::from(first & 0x7f);
        if count == 0 {
            return Err(DerError::InvalidLength {
                offset: length_offset,
                reason: "indefinite length is not allowed in DER",
            });
        }
        if count > 4 {
            return Err(DerError::InvalidLength {
                offset: length_offset,
                reason: "length does not fit in 32 bits",
            });
        }

        let start = length_offset + 1;
        let available = buf.len().saturating_sub(start);
        if available < count {
            return Err(DerError::TruncatedLength {
                offset: length_offset,
                declared: count,
                available,
            });
        }

        let bytes = &buf[start..start + count];
        if bytes[0] == 0 {
            return Err(DerError::InvalidLength {
                offset: length_offset,
                reason: "length has leading zero octets",
            });
        }
        let len = bytes
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));
        if length_octets(len) != 1 + count {
            return Err(DerError::InvalidLength {
                offset: length_offset,
                reason: "long form used for a short length",
            });
        }
        (len, 1 + count)
    };

    let content_start = length_offset + length_size;
    let available = buf.len() - content_start;
    if content_len > available {
        return Err(DerError::TruncatedLength {
            offset: length_offset,
            declared: content_len,
            available,
        });
    }

    Ok(Header {
        tag,
        content_start,
        content_len,
    })
}

fn read_value(buf: &[u8], offset: usize, depth: usize) -> DerResult<(Asn1Node, usize)> {
    let header = read_header(buf, offset)?;
    let content = &buf[header.content_start..header.content_end()];

    let node = match header.tag {
        tag::SEQUENCE => Asn1Node::Sequence(read_children(buf, &header, depth)?),
        t if t & 0xe0 == tag::CONTEXT_CONSTRUCTED && t & 0x1f <= tag::MAX_CONTEXT_NUMBER => {
            Asn1Node::ContextSpecific {
                number: t & 0x1f,
                children: read_children(buf, &header, depth)?,
            }
        }
        tag::OBJECT_IDENTIFIER => Asn1Node::ObjectIdentifier(ObjectIdentifier::from_der_content(
            content,
            header.content_start,
        )?),
        tag::OCTET_STRING => Asn1Node::OctetString(content.to_vec()),
        tag::BIT_STRING => Asn1Node::BitString(content.to_vec()),
        tag::INTEGER => Asn1Node::Integer(content.to_vec()),
        tag::NULL => {
            if header.content_len != 0 {
                return Err(DerError::InvalidNull {
                    offset,
                    len: header.content_len,
                });
            }
            Asn1Node::Null
        }
        other => {
            return Err(DerError::UnsupportedTag { offset, tag: other });
        }
    };

    Ok((node, header.content_end() - offset))
}

fn read_children(buf: &[u8], header: &Header, depth: usize) -> DerResult<Vec<Asn1Node>> {
    if depth >= MAX_DEPTH {
        return Err(DerError::NestingTooDeep {
            offset: header.content_start,
            max: MAX_DEPTH,
        });
    }

    let parent_end = header.content_end();
    let mut children = Vec::new();
    let mut pos = header.content_start;

    while pos < parent_end {
        let (child, consumed) = read_value(buf, pos, depth + 1)?;
        let child_end = pos + consumed;
        if child_end > parent_end {
            return Err(DerError::MalformedSequence {
                offset: pos,
                child_end,
                parent_end,
            });
        }
        children.push(child);
        pos = child_end;
    }

    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eckey_core::{EC_PUBLIC_KEY_OID, P256_OID};
    use hex_literal::hex;
    use proptest::prelude::*;

    // SubjectPublicKeyInfo for the RFC 6979 A.2.5 P-256 key.
    const P256_SPKI: [u8; 91] = hex!(
        "3059301306072a8648ce3d020106082a8648ce3d030107034200"
        "0460fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6"
        "7903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299"
    );

    #[test]
    fn read_spki_tree() {
        let (node, consumed) = read(&P256_SPKI, 0).unwrap();
        assert_eq!(consumed, P256_SPKI.len());

        let outer = node.as_sequence().unwrap();
        assert_eq!(outer.len(), 2);

        let oids = outer[0].oids();
        assert!(oids[0].is(EC_PUBLIC_KEY_OID));
        assert!(oids[1].is(P256_OID));

        let bits = outer[1].as_bit_string().unwrap();
        assert_eq!(bits.len(), 66);
        assert_eq!(bits[0], 0x00);
        assert_eq!(bits[1], 0x04);
    }

    #[test]
    fn encoded_len_matches_input() {
        let node = read_all(&P256_SPKI).unwrap();
        assert_eq!(node.encoded_len(), P256_SPKI.len());
        assert_eq!(node.to_der(), P256_SPKI);
    }

    #[test]
    fn read_at_offset() {
        // Two INTEGERs back to back; read the second one.
        let buf = hex!("020101020102");
        let (node, consumed) = read(&buf, 3).unwrap();
        assert_eq!(node, Asn1Node::Integer(vec![2]));
        assert_eq!(consumed, 3);
    }

    #[test]
    fn integer_keeps_sign_padding() {
        let node = read_all(&hex!("020300ff01")).unwrap();
        assert_eq!(node.as_integer().unwrap(), &hex!("00ff01"));
    }

    #[test]
    fn context_specific_fields() {
        // ECPrivateKey tail: [0] { OID P-256 } [1] { BIT STRING 00 04 }
        let buf = hex!("300e a00a 06082a8648ce3d030107 a100");
        let node = read_all(&buf).unwrap();
        let params = node.context_field(0).unwrap();
        assert!(params[0].as_oid().unwrap().is(P256_OID));
        assert_eq!(node.context_field(1).unwrap().len(), 0);
    }

    #[test]
    fn null_node() {
        assert_eq!(read_all(&hex!("0500")).unwrap(), Asn1Node::Null);
        let err = read_all(&hex!("050100")).unwrap_err();
        assert!(matches!(err, DerError::InvalidNull { offset: 0, len: 1 }));
    }

    #[test]
    fn long_form_length() {
        let mut buf = vec![0x04, 0x81, 0x80];
        buf.extend_from_slice(&[0x5a; 128]);
        let node = read_all(&buf).unwrap();
        assert_eq!(node.as_octet_string().unwrap().len(), 128);
    }

    #[test]
    fn unsupported_tag() {
        // UTF8String
        let err = read_all(&hex!("0c0161")).unwrap_err();
        assert_eq!(err, DerError::UnsupportedTag { offset: 0, tag: 0x0c });

        // Nested inside a sequence: offset points at the child.
        let err = read_all(&hex!("3003 0c0161")).unwrap_err();
        assert_eq!(err, DerError::UnsupportedTag { offset: 2, tag: 0x0c });
    }

    #[test]
    fn truncated_content() {
        let err = read_all(&hex!("0405aabb")).unwrap_err();
        assert_eq!(
            err,
            DerError::TruncatedLength {
                offset: 1,
                declared: 5,
                available: 2
            }
        );
    }

    #[test]
    fn truncated_long_form_length() {
        let err = read_all(&hex!("0482")).unwrap_err();
        assert!(matches!(err, DerError::TruncatedLength { declared: 2, .. }));
    }

    #[test]
    fn missing_length_octet() {
        let err = read_all(&hex!("30")).unwrap_err();
        assert!(matches!(err, DerError::BufferOverrun { offset: 1, .. }));
    }

    #[test]
    fn empty_buffer() {
        let err = read_all(&[]).unwrap_err();
        assert!(matches!(err, DerError::BufferOverrun { offset: 0, .. }));
    }

    #[test]
    fn indefinite_length_rejected() {
        let err = read_all(&hex!("30800000")).unwrap_err();
        assert!(matches!(err, DerError::InvalidLength { offset: 1, .. }));
    }

    #[test]
    fn non_minimal_length_rejected() {
        let err = read_all(&hex!("04810100")).unwrap_err();
        assert!(matches!(err, DerError::InvalidLength { .. }));
        let err = read_all(&hex!("0482000100")).unwrap_err();
        assert!(matches!(err, DerError::InvalidLength { .. }));
    }

    #[test]
    fn child_overruns_parent() {
        // SEQUENCE claims 3 bytes, child INTEGER needs 4.
        let buf = hex!("3003 020201 02 00");
        let err = read_all(&buf).unwrap_err();
        assert_eq!(
            err,
            DerError::MalformedSequence {
                offset: 2,
                child_end: 6,
                parent_end: 5
            }
        );
    }

    #[test]
    fn trailing_data() {
        let err = read_all(&hex!("05000000")).unwrap_err();
        assert_eq!(
            err,
            DerError::TrailingData {
                offset: 2,
                trailing: 2
            }
        );
    }

    #[test]
    fn nesting_limit() {
        // MAX_DEPTH + 1 empty-terminated nested sequences.
        let levels = MAX_DEPTH + 1;
        let mut buf = Vec::new();
        for i in 0..levels {
            buf.push(0x30);
            buf.push(((levels - i - 1) * 2) as u8);
        }
        let err = read_all(&buf).unwrap_err();
        assert!(matches!(err, DerError::NestingTooDeep { .. }));
    }

    #[test]
    fn nesting_within_limit() {
        let levels = 8;
        let mut buf = Vec::new();
        for i in 0..levels {
            buf.push(0x30);
            buf.push(((levels - i - 1) * 2) as u8);
        }
        let node = read_all(&buf).unwrap();
        assert_eq!(node.encoded_len(), buf.len());
    }

    proptest! {
        #[test]
        fn truncation_never_yields_a_node(cut in 0usize..P256_SPKI.len()) {
            let err = read(&P256_SPKI[..cut], 0).unwrap_err();
            let expected_kind = matches!(
                err,
                DerError::TruncatedLength { .. } | DerError::BufferOverrun { .. }
            );
            prop_assert!(expected_kind);
        }

        #[test]
        fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            if let Ok((node, consumed)) = read(&bytes, 0) {
                prop_assert!(consumed <= bytes.len());
                prop_assert_eq!(node.encoded_len(), consumed);
            }
        }

        #[test]
        fn octet_strings_round_trip(payload in proptest::collection::vec(any::<u8>(), 0..600)) {
            let der = Asn1Node::OctetString(payload.clone()).to_der();
            let node = read_all(&der).unwrap();
            prop_assert_eq!(node.encoded_len(), der.len());
            prop_assert_eq!(node, Asn1Node::OctetString(payload));
        }
    }
}
