/*!
    ECDSA key loading, signing and verification.

    Keys come in as text:
    - PEM: PKCS#8 `PRIVATE KEY`, SEC1 `EC PRIVATE KEY` or SPKI `PUBLIC KEY`
    - bare Base64: a CNG `BCRYPT_ECCKEY_BLOB` key blob

    Both are reduced to [`KeyMaterial`] (`D ‖ X ‖ Y` or `X ‖ Y`), which a
    [`KeyProvider`] imports. [`SoftwareProvider`] covers P-256, P-384 and
    P-521 with the RustCrypto curve crates. Signatures are raw `R ‖ S`.
*/

mod blob;
mod error;
mod extract;
mod hash;
mod load;
mod material;
mod pem;
mod provider;
mod signer;

pub use eckey_core::{Curve, HashAlgorithm, KeyKind};

pub use self::blob::BlobMagic;
pub use self::error::{KeyError, KeyResult};
pub use self::extract::{extract_der, extract_key, private_key_info_der, public_key_info_der};
pub use self::hash::{digest, prehash};
pub use self::load::load_key;
pub use self::material::KeyMaterial;
pub use self::pem::{
    EC_PRIVATE_KEY_LABEL, PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL, PemBlock, looks_like_pem,
};
pub use self::provider::{KeyProvider, SoftwareKey, SoftwareProvider};
pub use self::signer::{Ecdsa, GeneratedKey};
