/*!
    Pure-Rust provider on top of the RustCrypto `p256` / `p384` / `p521`
    crates.

    - Sign: prehash(data) → ECDSA → raw R‖S
    - Verify: prehash(data) → ECDSA verify against R‖S

    P-256 and P-384 signatures are deterministic (RFC 6979, with the
    nonce derived through the curve's own digest). `p521` has no RFC 6979
    support and draws a random nonce from the OS instead.
*/

use core::fmt;

use ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use p256::elliptic_curve::rand_core::OsRng;
use zeroize::Zeroizing;

use eckey_core::{Curve, HashAlgorithm};

use crate::error::{KeyError, KeyResult};
use crate::hash;
use crate::material::KeyMaterial;

use super::KeyProvider;

/**
    Provider backed by the RustCrypto NIST curve implementations.
*/
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftwareProvider;

/**
    Key imported into the [`SoftwareProvider`].
*/
#[derive(Clone)]
pub struct SoftwareKey {
    curve: Curve,
    inner: Inner,
}

#[derive(Clone)]
enum Inner {
    P256Signing(p256::ecdsa::SigningKey),
    P256Verifying(p256::ecdsa::VerifyingKey),
    P384Signing(p384::ecdsa::SigningKey),
    P384Verifying(p384::ecdsa::VerifyingKey),
    P521Signing(p521::ecdsa::SigningKey),
    P521Verifying(p521::ecdsa::VerifyingKey),
}

impl SoftwareKey {
    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn is_private(&self) -> bool {
        matches!(
            self.inner,
            Inner::P256Signing(_) | Inner::P384Signing(_) | Inner::P521Signing(_)
        )
    }
}

impl fmt::Debug for SoftwareKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftwareKey")
            .field("curve", &self.curve)
            .field("private", &self.is_private())
            .finish_non_exhaustive()
    }
}

impl KeyProvider for SoftwareProvider {
    type Handle = SoftwareKey;

    fn generate(&self, curve: Curve) -> KeyResult<KeyMaterial> {
        let material = match curve {
            Curve::P256 => {
                let key = p256::ecdsa::SigningKey::random(&mut OsRng);
                let d = Zeroizing::new(key.to_bytes());
                let point = key.verifying_key().to_encoded_point(false);
                KeyMaterial::private(curve, &d, &point.as_bytes()[1..])?
            }
            Curve::P384 => {
                let key = p384::ecdsa::SigningKey::random(&mut OsRng);
                let d = Zeroizing::new(key.to_bytes());
                let point = key.verifying_key().to_encoded_point(false);
                KeyMaterial::private(curve, &d, &point.as_bytes()[1..])?
            }
            Curve::P521 => {
                let key = p521::ecdsa::SigningKey::random(&mut OsRng);
                let d = Zeroizing::new(key.to_bytes());
                let point = p521::ecdsa::VerifyingKey::from(&key).to_encoded_point(false);
                KeyMaterial::private(curve, &d, &point.as_bytes()[1..])?
            }
        };
        tracing::debug!(%curve, "generated key");
        Ok(material)
    }

    fn import_private_key(&self, material: &KeyMaterial) -> KeyResult<SoftwareKey> {
        let curve = material.curve();
        let d = material.d().ok_or(KeyError::PrivateKeyRequired)?;
        let inner = match curve {
            Curve::P256 => {
                let key = p256::ecdsa::SigningKey::from_slice(d).map_err(bad_scalar(curve))?;
                check_point(material, &key.verifying_key().to_encoded_point(false))?;
                Inner::P256Signing(key)
            }
            Curve::P384 => {
                let key = p384::ecdsa::SigningKey::from_slice(d).map_err(bad_scalar(curve))?;
                check_point(material, &key.verifying_key().to_encoded_point(false))?;
                Inner::P384Signing(key)
            }
            Curve::P521 => {
                let key = p521::ecdsa::SigningKey::from_slice(d).map_err(bad_scalar(curve))?;
                check_point(material, &p521::ecdsa::VerifyingKey::from(&key).to_encoded_point(false))?;
                Inner::P521Signing(key)
            }
        };
        tracing::debug!(%curve, "imported private key");
        Ok(SoftwareKey { curve, inner })
    }

    fn import_public_key(&self, material: &KeyMaterial) -> KeyResult<SoftwareKey> {
        let curve = material.curve();
        let sec1 = material.sec1_point();
        let inner = match curve {
            Curve::P256 => p256::ecdsa::VerifyingKey::from_sec1_bytes(&sec1)
                .map(Inner::P256Verifying)
                .map_err(|e| KeyError::EccKeyParse(format!("{curve} public point: {e}")))?,
            Curve::P384 => p384::ecdsa::VerifyingKey::from_sec1_bytes(&sec1)
                .map(Inner::P384Verifying)
                .map_err(|e| KeyError::EccKeyParse(format!("{curve} public point: {e}")))?,
            Curve::P521 => p521::ecdsa::VerifyingKey::from_sec1_bytes(&sec1)
                .map(Inner::P521Verifying)
                .map_err(|e| KeyError::EccKeyParse(format!("{curve} public point: {e}")))?,
        };
        tracing::debug!(%curve, "imported public key");
        Ok(SoftwareKey { curve, inner })
    }

    fn sign(&self, key: &SoftwareKey, hash: HashAlgorithm, data: &[u8]) -> KeyResult<Vec<u8>> {
        let prehash = hash::prehash(hash, data, key.curve.width());
        let signature = match &key.inner {
            Inner::P256Signing(k) => {
                let signature: p256::ecdsa::Signature =
                    k.sign_prehash(&prehash).map_err(signing_failed)?;
                signature.to_bytes().to_vec()
            }
            Inner::P384Signing(k) => {
                let signature: p384::ecdsa::Signature =
                    k.sign_prehash(&prehash).map_err(signing_failed)?;
                signature.to_bytes().to_vec()
            }
            Inner::P521Signing(k) => {
                let signature: p521::ecdsa::Signature =
                    k.sign_prehash(&prehash).map_err(signing_failed)?;
                signature.to_bytes().to_vec()
            }
            Inner::P256Verifying(_) | Inner::P384Verifying(_) | Inner::P521Verifying(_) => {
                return Err(KeyError::PrivateKeyRequired);
            }
        };
        tracing::debug!(curve = %key.curve, %hash, len = data.len(), "signed");
        Ok(signature)
    }

    fn verify(
        &self,
        key: &SoftwareKey,
        hash: HashAlgorithm,
        data: &[u8],
        signature: &[u8],
    ) -> KeyResult<bool> {
        let prehash = hash::prehash(hash, data, key.curve.width());
        let valid = match &key.inner {
            Inner::P256Signing(k) => verify_p256(k.verifying_key(), &prehash, signature),
            Inner::P256Verifying(k) => verify_p256(k, &prehash, signature),
            Inner::P384Signing(k) => verify_p384(k.verifying_key(), &prehash, signature),
            Inner::P384Verifying(k) => verify_p384(k, &prehash, signature),
            Inner::P521Signing(k) => verify_p521(&p521::ecdsa::VerifyingKey::from(k), &prehash, signature),
            Inner::P521Verifying(k) => verify_p521(k, &prehash, signature),
        };
        tracing::debug!(curve = %key.curve, %hash, valid, "verified");
        Ok(valid)
    }
}

// Signature::from_slice rejects wrong lengths and zero scalars.
fn verify_p256(key: &p256::ecdsa::VerifyingKey, prehash: &[u8], signature: &[u8]) -> bool {
    p256::ecdsa::Signature::from_slice(signature)
        .is_ok_and(|signature| key.verify_prehash(prehash, &signature).is_ok())
}

fn verify_p384(key: &p384::ecdsa::VerifyingKey, prehash: &[u8], signature: &[u8]) -> bool {
    p384::ecdsa::Signature::from_slice(signature)
        .is_ok_and(|signature| key.verify_prehash(prehash, &signature).is_ok())
}

fn verify_p521(key: &p521::ecdsa::VerifyingKey, prehash: &[u8], signature: &[u8]) -> bool {
    p521::ecdsa::Signature::from_slice(signature)
        .is_ok_and(|signature| key.verify_prehash(prehash, &signature).is_ok())
}

// `derived` is the SEC1 uncompressed encoding of D·G.
fn check_point(material: &KeyMaterial, derived: &impl AsRef<[u8]>) -> KeyResult<()> {
    if derived.as_ref().get(1..) != Some(material.point()) {
        return Err(KeyError::KeyMismatch);
    }
    Ok(())
}

fn bad_scalar(curve: Curve) -> impl FnOnce(ecdsa::Error) -> KeyError {
    move |e| KeyError::EccKeyParse(format!("{curve} private scalar: {e}"))
}

fn signing_failed(e: ecdsa::Error) -> KeyError {
    KeyError::EcdsaSigningFailed(e.to_string())
}
