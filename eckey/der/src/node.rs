use core::fmt;

use crate::oid::ObjectIdentifier;

/**
    Tag bytes understood by the reader.
*/
pub mod tag {
    pub const INTEGER: u8 = 0x02;
    pub const BIT_STRING: u8 = 0x03;
    pub const OCTET_STRING: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const OBJECT_IDENTIFIER: u8 = 0x06;
    pub const SEQUENCE: u8 = 0x30;
    /// Constructed context-specific class; the low five bits are the tag number.
    pub const CONTEXT_CONSTRUCTED: u8 = 0xa0;
    /// Highest tag number that fits the low-tag-number form.
    pub const MAX_CONTEXT_NUMBER: u8 = 0x1e;
}

/**
    One decoded ASN.1 value.

    Only the handful of kinds found in EC key containers are represented:
    `PrivateKeyInfo`, `SubjectPublicKeyInfo` and `ECPrivateKey`.

    `BitString` payloads keep their leading "unused bits" byte. The reader
    cannot know what the bits mean, so stripping it is up to the caller.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asn1Node {
    Sequence(Vec<Asn1Node>),
    Integer(Vec<u8>),
    BitString(Vec<u8>),
    OctetString(Vec<u8>),
    Null,
    ObjectIdentifier(ObjectIdentifier),
    /// Constructed `[n]` field, e.g. `[0] parameters` / `[1] publicKey`.
    ContextSpecific { number: u8, children: Vec<Asn1Node> },
}

impl Asn1Node {
    /**
        Identifier octet this node encodes with.
    */
    pub fn tag(&self) -> u8 {
        match self {
            Self::Sequence(_) => tag::SEQUENCE,
            Self::Integer(_) => tag::INTEGER,
            Self::BitString(_) => tag::BIT_STRING,
            Self::OctetString(_) => tag::OCTET_STRING,
            Self::Null => tag::NULL,
            Self::ObjectIdentifier(_) => tag::OBJECT_IDENTIFIER,
            Self::ContextSpecific { number, .. } => tag::CONTEXT_CONSTRUCTED | number,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Sequence(_) => "SEQUENCE",
            Self::Integer(_) => "INTEGER",
            Self::BitString(_) => "BIT STRING",
            Self::OctetString(_) => "OCTET STRING",
            Self::Null => "NULL",
            Self::ObjectIdentifier(_) => "OBJECT IDENTIFIER",
            Self::ContextSpecific { .. } => "CONTEXT SPECIFIC",
        }
    }

    /**
        Children of a constructed node (sequence or context-specific field).
    */
    pub fn children(&self) -> Option<&[Asn1Node]> {
        match self {
            Self::Sequence(children) | Self::ContextSpecific { children, .. } => {
                Some(children.as_slice())
            }
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Asn1Node]> {
        match self {
            Self::Sequence(children) => Some(children.as_slice()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<&[u8]> {
        match self {
            Self::Integer(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    pub fn as_octet_string(&self) -> Option<&[u8]> {
        match self {
            Self::OctetString(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    /**
        Raw bit string payload, unused-bits byte included.
    */
    pub fn as_bit_string(&self) -> Option<&[u8]> {
        match self {
            Self::BitString(bytes) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    pub fn as_oid(&self) -> Option<&ObjectIdentifier> {
        match self {
            Self::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    /**
        Children of the `[number]` field among this node's children.

        Context-specific fields are optional and addressed by number, so
        they are looked up by tag instead of by position.
    */
    pub fn context_field(&self, number: u8) -> Option<&[Asn1Node]> {
        self.children()?.iter().find_map(|child| match child {
            Self::ContextSpecific {
                number: n,
                children,
            } if *n == number => Some(children.as_slice()),
            _ => None,
        })
    }

    /**
        Object identifiers among the direct children, in encoding order.
    */
    pub fn oids(&self) -> Vec<&ObjectIdentifier> {
        self.children()
            .map(|children| children.iter().filter_map(Self::as_oid).collect())
            .unwrap_or_default()
    }

    /**
        Number of content octets (excluding tag and length).
    */
    pub fn content_len(&self) -> usize {
        match self {
            Self::Sequence(children) | Self::ContextSpecific { children, .. } => {
                children.iter().map(Self::encoded_len).sum()
            }
            Self::Integer(bytes) | Self::BitString(bytes) | Self::OctetString(bytes) => {
                bytes.len()
            }
            Self::Null => 0,
            Self::ObjectIdentifier(oid) => oid.to_der_content().len(),
        }
    }

    /**
        Full DER length of this node: tag + length octets + content.

        For a tree produced by the reader this equals the bytes consumed.
    */
    pub fn encoded_len(&self) -> usize {
        let content = self.content_len();
        1 + length_octets(content) + content
    }

    /**
        Encode this node as DER.
    */
    pub fn to_der(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.write_der(&mut out);
        out
    }

    fn write_der(&self, out: &mut Vec<u8>) {
        out.push(self.tag());
        push_length(out, self.content_len());
        match self {
            Self::Sequence(children) | Self::ContextSpecific { children, .. } => {
                for child in children {
                    child.write_der(out);
                }
            }
            Self::Integer(bytes) | Self::BitString(bytes) | Self::OctetString(bytes) => {
                out.extend_from_slice(bytes);
            }
            Self::Null => {}
            Self::ObjectIdentifier(oid) => out.extend_from_slice(&oid.to_der_content()),
        }
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = depth * 2;
        match self {
            Self::Sequence(children) => {
                writeln!(f, "{:indent$}SEQUENCE ({} elements)", "", children.len())?;
                for child in children {
                    child.fmt_tree(f, depth + 1)?;
                }
                Ok(())
            }
            Self::ContextSpecific { number, children } => {
                writeln!(f, "{:indent$}[{number}]", "")?;
                for child in children {
                    child.fmt_tree(f, depth + 1)?;
                }
                Ok(())
            }
            Self::ObjectIdentifier(oid) => writeln!(f, "{:indent$}OBJECT IDENTIFIER {oid}", ""),
            Self::Null => writeln!(f, "{:indent$}NULL", ""),
            Self::Integer(bytes) | Self::BitString(bytes) | Self::OctetString(bytes) => {
                writeln!(
                    f,
                    "{:indent$}{} ({} bytes) {}",
                    "",
                    self.kind_name(),
                    bytes.len(),
                    preview_hex(bytes)
                )
            }
        }
    }
}

/**
    Indented tree dump, one node per line.
*/
impl fmt::Display for Asn1Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}

fn preview_hex(bytes: &[u8]) -> String {
    const PREVIEW: usize = 16;
    let mut out: String = bytes
        .iter()
        .take(PREVIEW)
        .map(|b| format!("{b:02x}"))
        .collect();
    if bytes.len() > PREVIEW {
        out.push_str("...");
    }
    out
}

pub(crate) fn length_octets(len: usize) -> usize {
    if len < 0x80 {
        1
    } else {
        1 + (usize::BITS - len.leading_zeros()).div_ceil(8) as usize
    }
}

fn push_length(out: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let count = length_octets(len) - 1;
    out.push(0x80 | count as u8);
    for i in (0..count).rev() {
        out.push((len >> (i * 8)) as u8);
    }
}
