/*!
    OBJECT IDENTIFIER content encoding.

    Each arc is a base-128 integer, most significant group first, with the
    high bit set on every byte except the last of the arc. The first two
    arcs share one subidentifier: `40 * X + Y`.
*/

use core::fmt;

use eckey_core::{arcs_equal, oid_name};

use crate::error::{DerError, DerResult};

/**
    A decoded object identifier plus its friendly name, if the OID is one
    of the few this workspace knows about.
*/
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    arcs: Vec<u64>,
    name: Option<&'static str>,
}

impl ObjectIdentifier {
    /**
        Build an OID from its arcs, resolving the friendly name.
    */
    pub fn new(arcs: impl Into<Vec<u64>>) -> Self {
        let arcs = arcs.into();
        let name = oid_name(&arcs);
        Self { arcs, name }
    }

    /**
        Decode the content octets of an OBJECT IDENTIFIER value.

        `offset` is the position of the content inside the enclosing buffer
        and is only used for error reporting.
    */
    pub fn from_der_content(content: &[u8], offset: usize) -> DerResult<Self> {
        if content.is_empty() {
            return Err(invalid(offset, "empty content"));
        }

        let mut arcs = Vec::with_capacity(content.len() + 1);
        let mut value: u64 = 0;
        let mut in_arc = false;

        for (i, &byte) in content.iter().enumerate() {
            if !in_arc && byte == 0x80 {
                return Err(invalid(offset + i, "non-minimal subidentifier"));
            }
            if value > u64::MAX >> 7 {
                return Err(invalid(offset + i, "subidentifier overflows 64 bits"));
            }
            value = (value << 7) | u64::from(byte & 0x7f);
            in_arc = byte & 0x80 != 0;

            if !in_arc {
                if arcs.is_empty() {
                    let (first, second) = match value {
                        0..40 => (0, value),
                        40..80 => (1, value - 40),
                        _ => (2, value - 80),
                    };
                    arcs.push(first);
                    arcs.push(second);
                } else {
                    arcs.push(value);
                }
                value = 0;
            }
        }

        if in_arc {
            return Err(invalid(offset + content.len() - 1, "unterminated subidentifier"));
        }

        Ok(Self::new(arcs))
    }

    /**
        Encode the content octets (no tag, no length).
    */
    pub fn to_der_content(&self) -> Vec<u8> {
        let first = self.arcs.first().copied().unwrap_or(0);
        let second = self.arcs.get(1).copied().unwrap_or(0);

        let mut out = Vec::with_capacity(self.arcs.len() * 2);
        push_base128(&mut out, first * 40 + second);
        for &arc in self.arcs.iter().skip(2) {
            push_base128(&mut out, arc);
        }
        out
    }

    pub fn arcs(&self) -> &[u64] {
        &self.arcs
    }

    /**
        Friendly name from the static table (`"ECC"`, `"P-256"`, ...).
    */
    pub fn friendly_name(&self) -> Option<&'static str> {
        self.name
    }

    /**
        Whether this OID equals the given arcs.
    */
    pub fn is(&self, arcs: &[u64]) -> bool {
        arcs_equal(&self.arcs, arcs)
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.arcs.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
        }
        if let Some(name) = self.name {
            write!(f, " ({name})")?;
        }
        Ok(())
    }
}

fn push_base128(out: &mut Vec<u8>, value: u64) {
    let groups = ((64 - value.leading_zeros()).max(1)).div_ceil(7);
    for i in (0..groups).rev() {
        let mut byte = ((value >> (i * 7)) & 0x7f) as u8;
        if i > 0 {
            byte |= 0x80;
        }
        out.push(byte);
    }
}

fn invalid(offset: usize, reason: &'static str) -> DerError {
    DerError::InvalidObjectIdentifier { offset, reason }
}
