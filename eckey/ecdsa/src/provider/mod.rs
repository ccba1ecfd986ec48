/*!
    Cryptographic provider seam.

    Everything above this trait works on [`KeyMaterial`] only; the
    provider owns key objects, randomness and the actual ECDSA math.
*/

mod software;

use eckey_core::{Curve, HashAlgorithm, KeyKind};

use crate::error::KeyResult;
use crate::material::KeyMaterial;

pub use self::software::{SoftwareKey, SoftwareProvider};

/**
    A backend able to generate, import and use ECDSA keys.

    Signatures are raw fixed-width `R ‖ S`, each half as wide as the
    curve's coordinates.
*/
pub trait KeyProvider {
    /// Imported key object.
    type Handle;

    /**
        Generate a fresh private key on `curve`.
    */
    fn generate(&self, curve: Curve) -> KeyResult<KeyMaterial>;

    /**
        Import private material `D ‖ X ‖ Y`. Implementations must reject
        material whose point does not belong to the scalar.
    */
    fn import_private_key(&self, material: &KeyMaterial) -> KeyResult<Self::Handle>;

    /**
        Import the public half of `material` for verification.
    */
    fn import_public_key(&self, material: &KeyMaterial) -> KeyResult<Self::Handle>;

    fn sign(&self, key: &Self::Handle, hash: HashAlgorithm, data: &[u8]) -> KeyResult<Vec<u8>>;

    /**
        `Ok(false)` for a signature that does not verify, including one of
        the wrong length. `Err` is reserved for unusable keys.
    */
    fn verify(
        &self,
        key: &Self::Handle,
        hash: HashAlgorithm,
        data: &[u8],
        signature: &[u8],
    ) -> KeyResult<bool>;

    /**
        Import by kind: private material as a signing key, public material
        as a verification key.
    */
    fn import_key(&self, material: &KeyMaterial) -> KeyResult<Self::Handle> {
        match material.kind() {
            KeyKind::Private => self.import_private_key(material),
            KeyKind::Public => self.import_public_key(material),
        }
    }
}
