use core::fmt;
use core::str::FromStr;

use crate::constants::{P256_OID, P384_OID, P521_OID};
use crate::error::ParseError;
use crate::utils::{arcs_equal, eq_ignore_ascii_case, trim_ascii};

/**
    Named elliptic curve of an ECDSA key.

    The coordinate width is derived from the curve, never assumed:
    - **P-256** — 32-byte coordinates
    - **P-384** — 48-byte coordinates
    - **P-521** — 66-byte coordinates (521 bits rounded up)
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Curve {
    P256,
    P384,
    P521,
}

impl Curve {
    pub const ALL: [Curve; 3] = [Self::P256, Self::P384, Self::P521];

    /**
        Byte width of one field element (scalar or coordinate).
    */
    pub const fn width(self) -> usize {
        match self {
            Self::P256 => 32,
            Self::P384 => 48,
            Self::P521 => 66,
        }
    }

    pub const fn bits(self) -> u32 {
        match self {
            Self::P256 => 256,
            Self::P384 => 384,
            Self::P521 => 521,
        }
    }

    /**
        Curve-parameter OID as carried in an AlgorithmIdentifier or in the
        `[0]` field of an `ECPrivateKey`.
    */
    pub const fn oid(self) -> &'static [u64] {
        match self {
            Self::P256 => P256_OID,
            Self::P384 => P384_OID,
            Self::P521 => P521_OID,
        }
    }

    pub const fn from_oid(arcs: &[u64]) -> Option<Self> {
        if arcs_equal(arcs, P256_OID) {
            Some(Self::P256)
        } else if arcs_equal(arcs, P384_OID) {
            Some(Self::P384)
        } else if arcs_equal(arcs, P521_OID) {
            Some(Self::P521)
        } else {
            None
        }
    }

    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            256 => Some(Self::P256),
            384 => Some(Self::P384),
            521 => Some(Self::P521),
            _ => None,
        }
    }

    pub const fn from_name(name: &[u8]) -> Option<Self> {
        let name = trim_ascii(name);
        match name.len() {
            4 if eq_ignore_ascii_case(name, b"p256") => Some(Self::P256),
            4 if eq_ignore_ascii_case(name, b"p384") => Some(Self::P384),
            4 if eq_ignore_ascii_case(name, b"p521") => Some(Self::P521),
            5 if eq_ignore_ascii_case(name, b"p-256") => Some(Self::P256),
            5 if eq_ignore_ascii_case(name, b"p-384") => Some(Self::P384),
            5 if eq_ignore_ascii_case(name, b"p-521") => Some(Self::P521),
            8 if eq_ignore_ascii_case(name, b"nistp256") => Some(Self::P256),
            8 if eq_ignore_ascii_case(name, b"nistp384") => Some(Self::P384),
            8 if eq_ignore_ascii_case(name, b"nistp521") => Some(Self::P521),
            9 if eq_ignore_ascii_case(name, b"secp256r1") => Some(Self::P256),
            9 if eq_ignore_ascii_case(name, b"secp384r1") => Some(Self::P384),
            9 if eq_ignore_ascii_case(name, b"secp521r1") => Some(Self::P521),
            10 if eq_ignore_ascii_case(name, b"prime256v1") => Some(Self::P256),
            _ => None,
        }
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

impl FromStr for Curve {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.as_bytes()).ok_or_else(|| ParseError {
            kind: "curve",
            value: s.to_owned(),
        })
    }
}

/**
    Message digest applied to the data before ECDSA signing.

    MD5 is kept for interoperability with legacy signatures only; it is
    not collision resistant and should not be chosen for new data.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 4] = [Self::Md5, Self::Sha256, Self::Sha384, Self::Sha512];

    /**
        Digest output length in bytes.
    */
    pub const fn output_len(self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    pub const fn from_name(name: &[u8]) -> Option<Self> {
        let name = trim_ascii(name);
        match name.len() {
            3 if eq_ignore_ascii_case(name, b"md5") => Some(Self::Md5),
            6 if eq_ignore_ascii_case(name, b"sha256") => Some(Self::Sha256),
            6 if eq_ignore_ascii_case(name, b"sha384") => Some(Self::Sha384),
            6 if eq_ignore_ascii_case(name, b"sha512") => Some(Self::Sha512),
            7 if eq_ignore_ascii_case(name, b"sha-256") => Some(Self::Sha256),
            7 if eq_ignore_ascii_case(name, b"sha-384") => Some(Self::Sha384),
            7 if eq_ignore_ascii_case(name, b"sha-512") => Some(Self::Sha512),
            _ => None,
        }
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha256 => "SHA-256",
            Self::Sha384 => "SHA-384",
            Self::Sha512 => "SHA-512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.as_bytes()).ok_or_else(|| ParseError {
            kind: "hash algorithm",
            value: s.to_owned(),
        })
    }
}

/**
    Whether key material holds the private scalar or only the public point.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    Private,
    Public,
}

impl KeyKind {
    pub const fn is_private(self) -> bool {
        matches!(self, Self::Private)
    }

    /**
        Number of curve-width fields in the raw layout:
        `D || X || Y` for private keys, `X || Y` for public keys.
    */
    pub const fn field_count(self) -> usize {
        match self {
            Self::Private => 3,
            Self::Public => 2,
        }
    }

    pub const fn to_name(self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_widths() {
        assert_eq!(Curve::P256.width(), 32);
        assert_eq!(Curve::P384.width(), 48);
        assert_eq!(Curve::P521.width(), 66);
        for curve in Curve::ALL {
            assert_eq!(curve.width(), (curve.bits() as usize).div_ceil(8));
        }
    }

    #[test]
    fn curve_oid_round_trip() {
        for curve in Curve::ALL {
            assert_eq!(Curve::from_oid(curve.oid()), Some(curve));
        }
        assert_eq!(Curve::from_oid(&[1, 3, 132, 0, 10]), None);
    }

    #[test]
    fn curve_from_bits() {
        assert_eq!(Curve::from_bits(256), Some(Curve::P256));
        assert_eq!(Curve::from_bits(521), Some(Curve::P521));
        assert_eq!(Curve::from_bits(512), None);
    }

    #[test]
    fn curve_names() {
        assert_eq!(Curve::from_name(b"p256"), Some(Curve::P256));
        assert_eq!(Curve::from_name(b"P-384"), Some(Curve::P384));
        assert_eq!(Curve::from_name(b"secp521r1"), Some(Curve::P521));
        assert_eq!(Curve::from_name(b"prime256v1"), Some(Curve::P256));
        assert_eq!(Curve::from_name(b" NistP384 "), Some(Curve::P384));
        assert_eq!(Curve::from_name(b"secp256k1"), None);
        assert_eq!(Curve::from_name(b""), None);
    }

    #[test]
    fn curve_name_round_trip() {
        for curve in Curve::ALL {
            assert_eq!(curve.to_name().parse::<Curve>().unwrap(), curve);
        }
    }

    #[test]
    fn curve_from_str_error() {
        let err = "p255".parse::<Curve>().unwrap_err();
        assert_eq!(err.kind, "curve");
        assert_eq!(err.to_string(), "unknown curve 'p255'");
    }

    #[test]
    fn hash_names() {
        assert_eq!(HashAlgorithm::from_name(b"MD5"), Some(HashAlgorithm::Md5));
        assert_eq!(
            HashAlgorithm::from_name(b"sha256"),
            Some(HashAlgorithm::Sha256)
        );
        assert_eq!(
            HashAlgorithm::from_name(b"SHA-384"),
            Some(HashAlgorithm::Sha384)
        );
        assert_eq!(
            HashAlgorithm::from_name(b"Sha-512"),
            Some(HashAlgorithm::Sha512)
        );
        assert_eq!(HashAlgorithm::from_name(b"sha1"), None);
    }

    #[test]
    fn hash_name_round_trip() {
        for hash in HashAlgorithm::ALL {
            assert_eq!(hash.to_name().parse::<HashAlgorithm>().unwrap(), hash);
        }
    }

    #[test]
    fn hash_output_lengths() {
        assert_eq!(HashAlgorithm::Md5.output_len(), 16);
        assert_eq!(HashAlgorithm::Sha256.output_len(), 32);
        assert_eq!(HashAlgorithm::Sha384.output_len(), 48);
        assert_eq!(HashAlgorithm::Sha512.output_len(), 64);
    }

    #[test]
    fn key_kind_layout() {
        assert_eq!(KeyKind::Private.field_count(), 3);
        assert_eq!(KeyKind::Public.field_count(), 2);
        assert!(KeyKind::Private.is_private());
        assert_eq!(KeyKind::Public.to_string(), "public");
    }
}
