use core::fmt;

use zeroize::Zeroizing;

use eckey_core::{Curve, KeyKind};

use crate::error::{KeyError, KeyResult};

/**
    Raw elliptic-curve key material in fixed-width big-endian form.

    Layout, with `n` the curve's coordinate width:
    - private: `D ‖ X ‖ Y` (`3n` bytes)
    - public: `X ‖ Y` (`2n` bytes)

    Coordinates and the scalar are always left-padded to `n`, so the
    length alone determines the kind for a given curve. The buffer is
    wiped on drop.
*/
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    curve: Curve,
    kind: KeyKind,
    bytes: Zeroizing<Vec<u8>>,
}

impl KeyMaterial {
    /**
        Wrap an already laid out buffer, checking its length.
    */
    pub fn new(curve: Curve, kind: KeyKind, bytes: Vec<u8>) -> KeyResult<Self> {
        let bytes = Zeroizing::new(bytes);
        let expected = kind.field_count() * curve.width();
        if bytes.len() != expected {
            return Err(KeyError::MalformedKey(format!(
                "{curve} {kind} key must be {expected} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self { curve, kind, bytes })
    }

    /**
        Build private key material from its scalar and the uncompressed
        point coordinates `X ‖ Y`.
    */
    pub fn private(curve: Curve, d: &[u8], point: &[u8]) -> KeyResult<Self> {
        let n = curve.width();
        if d.len() != n || point.len() != 2 * n {
            return Err(KeyError::MalformedKey(format!(
                "{curve} private key needs a {n} byte scalar and a {} byte point, got {} and {}",
                2 * n,
                d.len(),
                point.len()
            )));
        }
        let mut bytes = Vec::with_capacity(3 * n);
        bytes.extend_from_slice(d);
        bytes.extend_from_slice(point);
        Self::new(curve, KeyKind::Private, bytes)
    }

    /**
        Build public key material from the point coordinates `X ‖ Y`.
    */
    pub fn public(curve: Curve, point: &[u8]) -> KeyResult<Self> {
        Self::new(curve, KeyKind::Public, point.to_vec())
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn is_private(&self) -> bool {
        self.kind.is_private()
    }

    /**
        Coordinate width `n` of the curve, in bytes.
    */
    pub fn width(&self) -> usize {
        self.curve.width()
    }

    /**
        The full buffer in its canonical layout.
    */
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /**
        Private scalar `D`, if this is a private key.
    */
    pub fn d(&self) -> Option<&[u8]> {
        self.is_private().then(|| &self.bytes[..self.width()])
    }

    /**
        Uncompressed point coordinates `X ‖ Y`.
    */
    pub fn point(&self) -> &[u8] {
        let n = self.width();
        match self.kind {
            KeyKind::Private => &self.bytes[n..],
            KeyKind::Public => &self.bytes[..],
        }
    }

    pub fn x(&self) -> &[u8] {
        &self.point()[..self.width()]
    }

    pub fn y(&self) -> &[u8] {
        &self.point()[self.width()..]
    }

    /**
        SEC1 uncompressed point encoding `0x04 ‖ X ‖ Y`.
    */
    pub fn sec1_point(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + 2 * self.width());
        out.push(0x04);
        out.extend_from_slice(self.point());
        out
    }

    /**
        The public half of this key. Public keys are returned as a copy.
    */
    pub fn public_key(&self) -> KeyMaterial {
        Self {
            curve: self.curve,
            kind: KeyKind::Public,
            bytes: Zeroizing::new(self.point().to_vec()),
        }
    }
}

// Never print key bytes.
impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("curve", &self.curve)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
