/*!
    Windows CNG `BCRYPT_ECCKEY_BLOB` key blobs.

    Layout (all integers little-endian):
    - `[0..4)`  magic, see [`BlobMagic`]
    - `[4..8)`  `cbKey`, the coordinate width in bytes
    - `[8..)`   `X ‖ Y`, followed by `D` for private blobs

    This is the format behind bare Base64 key strings, so keys exported
    by CNG (`EccPublicBlob` / `EccPrivateBlob`) load as-is.
*/

use core::fmt;

use data_encoding::BASE64;
use zeroize::Zeroizing;

use eckey_core::{Curve, KeyKind};

use crate::error::{KeyError, KeyResult};
use crate::material::KeyMaterial;

const HEADER_LEN: usize = 8;

/**
    ECDSA blob magic, the ASCII tag `ECSn` read as a little-endian `u32`.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobMagic {
    /// `ECS1`
    P256Public,
    /// `ECS2`
    P256Private,
    /// `ECS3`
    P384Public,
    /// `ECS4`
    P384Private,
    /// `ECS5`
    P521Public,
    /// `ECS6`
    P521Private,
}

impl BlobMagic {
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0x3153_4345 => Some(Self::P256Public),
            0x3253_4345 => Some(Self::P256Private),
            0x3353_4345 => Some(Self::P384Public),
            0x3453_4345 => Some(Self::P384Private),
            0x3553_4345 => Some(Self::P521Public),
            0x3653_4345 => Some(Self::P521Private),
            _ => None,
        }
    }

    pub const fn to_u32(self) -> u32 {
        match self {
            Self::P256Public => 0x3153_4345,
            Self::P256Private => 0x3253_4345,
            Self::P384Public => 0x3353_4345,
            Self::P384Private => 0x3453_4345,
            Self::P521Public => 0x3553_4345,
            Self::P521Private => 0x3653_4345,
        }
    }

    pub const fn new(curve: Curve, kind: KeyKind) -> Self {
        match (curve, kind) {
            (Curve::P256, KeyKind::Public) => Self::P256Public,
            (Curve::P256, KeyKind::Private) => Self::P256Private,
            (Curve::P384, KeyKind::Public) => Self::P384Public,
            (Curve::P384, KeyKind::Private) => Self::P384Private,
            (Curve::P521, KeyKind::Public) => Self::P521Public,
            (Curve::P521, KeyKind::Private) => Self::P521Private,
        }
    }

    pub const fn curve(self) -> Curve {
        match self {
            Self::P256Public | Self::P256Private => Curve::P256,
            Self::P384Public | Self::P384Private => Curve::P384,
            Self::P521Public | Self::P521Private => Curve::P521,
        }
    }

    pub const fn kind(self) -> KeyKind {
        match self {
            Self::P256Private | Self::P384Private | Self::P521Private => KeyKind::Private,
            Self::P256Public | Self::P384Public | Self::P521Public => KeyKind::Public,
        }
    }
}

impl fmt::Display for BlobMagic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = self.to_u32().to_le_bytes();
        f.write_str(&String::from_utf8_lossy(&tag))
    }
}

impl KeyMaterial {
    /**
        Parse a Base64-encoded key blob.
    */
    pub fn from_blob_base64(blob: impl AsRef<[u8]>) -> KeyResult<Self> {
        let bytes = Zeroizing::new(
            BASE64
                .decode(blob.as_ref())
                .map_err(|e| KeyError::InvalidBase64(format!("key blob: {e}")))?,
        );
        Self::from_blob(&bytes)
    }

    /**
        Parse a key blob from raw bytes.
    */
    pub fn from_blob(data: &[u8]) -> KeyResult<Self> {
        let (header, body) = data.split_at_checked(HEADER_LEN).ok_or_else(|| {
            KeyError::InvalidKeyBlob(format!("{} bytes is shorter than the header", data.len()))
        })?;

        let magic = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
        let cb_key = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);

        let magic = BlobMagic::from_u32(magic)
            .ok_or_else(|| KeyError::InvalidKeyBlob(format!("unknown magic 0x{magic:08x}")))?;
        let (curve, kind) = (magic.curve(), magic.kind());
        let width = curve.width();

        if cb_key as usize != width {
            return Err(KeyError::InvalidKeyBlob(format!(
                "{magic} blob declares {cb_key} byte coordinates, {curve} uses {width}"
            )));
        }
        let expected = kind.field_count() * width;
        if body.len() != expected {
            return Err(KeyError::InvalidKeyBlob(format!(
                "{magic} blob body must be {expected} bytes, got {}",
                body.len()
            )));
        }

        // Blob order is X ‖ Y ‖ D, material order is D ‖ X ‖ Y.
        let (point, d) = body.split_at(2 * width);
        let material = match kind {
            KeyKind::Private => KeyMaterial::private(curve, d, point)?,
            KeyKind::Public => KeyMaterial::public(curve, point)?,
        };
        tracing::debug!(%magic, "decoded key blob");
        Ok(material)
    }

    /**
        Serialize into key blob bytes.
    */
    pub fn to_blob(&self) -> Zeroizing<Vec<u8>> {
        let magic = BlobMagic::new(self.curve(), self.kind());
        let width = self.width();
        let mut out = Zeroizing::new(Vec::with_capacity(HEADER_LEN + self.as_bytes().len()));
        out.extend_from_slice(&magic.to_u32().to_le_bytes());
        out.extend_from_slice(&(width as u32).to_le_bytes());
        out.extend_from_slice(self.point());
        if let Some(d) = self.d() {
            out.extend_from_slice(d);
        }
        out
    }

    /**
        Serialize into a Base64-encoded key blob.
    */
    pub fn to_blob_base64(&self) -> Zeroizing<String> {
        Zeroizing::new(BASE64.encode(&self.to_blob()))
    }
}
