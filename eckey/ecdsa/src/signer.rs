use core::fmt;

use zeroize::Zeroizing;

use eckey_core::{Curve, HashAlgorithm};

use crate::error::{KeyError, KeyResult};
use crate::load::load_key;
use crate::provider::{KeyProvider, SoftwareProvider};

/**
    A freshly generated key pair as Base64 key blobs.
*/
#[derive(Clone)]
pub struct GeneratedKey {
    pub private_key: Zeroizing<String>,
    pub public_key: String,
}

impl fmt::Debug for GeneratedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/**
    Text-in, bytes-out ECDSA helpers over a [`KeyProvider`].

    Keys are accepted as PEM or Base64 key blobs (see [`load_key`]).
    Every call loads and imports the key again; hold on to the handle
    from [`Ecdsa::create`] to avoid that.
*/
#[derive(Debug, Clone, Default)]
pub struct Ecdsa<P = SoftwareProvider> {
    provider: P,
}

impl Ecdsa {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: KeyProvider> Ecdsa<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /**
        Generate a key pair on `curve`, returned as Base64 key blobs.
    */
    pub fn generate_key(&self, curve: Curve) -> KeyResult<GeneratedKey> {
        let material = self.provider.generate(curve)?;
        Ok(GeneratedKey {
            private_key: material.to_blob_base64(),
            public_key: material.public_key().to_blob_base64().to_string(),
        })
    }

    /**
        Load `key` and import it, as a signing key if it is private.
    */
    pub fn create(&self, key: &str) -> KeyResult<P::Handle> {
        let material = load_key(key)?;
        self.provider.import_key(&material)
    }

    /**
        Sign `data` with a private key given as text.
    */
    pub fn sign(&self, data: &[u8], private_key: &str, hash: HashAlgorithm) -> KeyResult<Vec<u8>> {
        let material = load_key(private_key)?;
        if !material.is_private() {
            return Err(KeyError::PrivateKeyRequired);
        }
        let handle = self.provider.import_private_key(&material)?;
        self.provider.sign(&handle, hash, data)
    }

    /**
        Verify `signature` over `data`. A private key is accepted and its
        public half used.
    */
    pub fn verify(
        &self,
        data: &[u8],
        public_key: &str,
        signature: &[u8],
        hash: HashAlgorithm,
    ) -> KeyResult<bool> {
        let material = load_key(public_key)?;
        let handle = self.provider.import_public_key(&material)?;
        self.provider.verify(&handle, hash, data, signature)
    }

    pub fn sign_md5(&self, data: &[u8], private_key: &str) -> KeyResult<Vec<u8>> {
        self.sign(data, private_key, HashAlgorithm::Md5)
    }

    pub fn verify_md5(&self, data: &[u8], public_key: &str, signature: &[u8]) -> KeyResult<bool> {
        self.verify(data, public_key, signature, HashAlgorithm::Md5)
    }

    pub fn sign_sha256(&self, data: &[u8], private_key: &str) -> KeyResult<Vec<u8>> {
        self.sign(data, private_key, HashAlgorithm::Sha256)
    }

    pub fn verify_sha256(
        &self,
        data: &[u8],
        public_key: &str,
        signature: &[u8],
    ) -> KeyResult<bool> {
        self.verify(data, public_key, signature, HashAlgorithm::Sha256)
    }

    pub fn sign_sha384(&self, data: &[u8], private_key: &str) -> KeyResult<Vec<u8>> {
        self.sign(data, private_key, HashAlgorithm::Sha384)
    }

    pub fn verify_sha384(
        &self,
        data: &[u8],
        public_key: &str,
        signature: &[u8],
    ) -> KeyResult<bool> {
        self.verify(data, public_key, signature, HashAlgorithm::Sha384)
    }

    pub fn sign_sha512(&self, data: &[u8], private_key: &str) -> KeyResult<Vec<u8>> {
        self.sign(data, private_key, HashAlgorithm::Sha512)
    }

    pub fn verify_sha512(
        &self,
        data: &[u8],
        public_key: &str,
        signature: &[u8],
    ) -> KeyResult<bool> {
        self.verify(data, public_key, signature, HashAlgorithm::Sha512)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::hash;
    use crate::material::KeyMaterial;
    use eckey_core::KeyKind;

    const P256_PKCS8: &str = include_str!("../testfiles/p256_pkcs8.pem");
    const P256_SPKI: &str = include_str!("../testfiles/p256_spki.pem");

    /// Records calls; "signatures" are the digest followed by the point.
    #[derive(Default)]
    struct FakeProvider {
        imports: RefCell<Vec<KeyKind>>,
    }

    impl KeyProvider for FakeProvider {
        type Handle = KeyMaterial;

        fn generate(&self, curve: Curve) -> KeyResult<KeyMaterial> {
            let n = curve.width();
            KeyMaterial::private(curve, &vec![7; n], &vec![9; 2 * n])
        }

        fn import_private_key(&self, material: &KeyMaterial) -> KeyResult<KeyMaterial> {
            self.imports.borrow_mut().push(KeyKind::Private);
            Ok(material.clone())
        }

        fn import_public_key(&self, material: &KeyMaterial) -> KeyResult<KeyMaterial> {
            self.imports.borrow_mut().push(KeyKind::Public);
            Ok(material.public_key())
        }

        fn sign(&self, key: &KeyMaterial, hash: HashAlgorithm, data: &[u8]) -> KeyResult<Vec<u8>> {
            let mut out = hash::digest(hash, data);
            out.extend_from_slice(key.point());
            Ok(out)
        }

        fn verify(
            &self,
            key: &KeyMaterial,
            hash: HashAlgorithm,
            data: &[u8],
            signature: &[u8],
        ) -> KeyResult<bool> {
            Ok(self.sign(key, hash, data)? == signature)
        }
    }

    #[test]
    fn generate_returns_blobs() {
        let ecdsa = Ecdsa::with_provider(FakeProvider::default());
        let generated = ecdsa.generate_key(Curve::P384).unwrap();

        let private = KeyMaterial::from_blob_base64(generated.private_key.as_bytes()).unwrap();
        assert_eq!(private.kind(), KeyKind::Private);
        assert_eq!(private.curve(), Curve::P384);
        assert_eq!(private.d().unwrap(), &[7; 48]);

        let public = KeyMaterial::from_blob_base64(&generated.public_key).unwrap();
        assert_eq!(public, private.public_key());
    }

    #[test]
    fn generated_key_debug_hides_private_half() {
        let ecdsa = Ecdsa::with_provider(FakeProvider::default());
        let generated = ecdsa.generate_key(Curve::P256).unwrap();
        let text = format!("{generated:?}");
        assert!(text.contains(&generated.public_key));
        assert!(!text.contains(generated.private_key.as_str()));
        assert!(!text.contains("private_key"));
    }

    #[test]
    fn create_imports_by_kind() {
        let ecdsa = Ecdsa::with_provider(FakeProvider::default());
        let private = ecdsa.create(P256_PKCS8).unwrap();
        let public = ecdsa.create(P256_SPKI).unwrap();
        assert!(private.is_private());
        assert!(!public.is_private());
        assert_eq!(
            *ecdsa.provider().imports.borrow(),
            [KeyKind::Private, KeyKind::Public]
        );
    }

    #[test]
    fn sign_verify_routing() {
        let ecdsa = Ecdsa::with_provider(FakeProvider::default());
        let signature = ecdsa.sign_sha384(b"data", P256_PKCS8).unwrap();
        assert!(ecdsa.verify_sha384(b"data", P256_SPKI, &signature).unwrap());
        assert!(!ecdsa.verify_sha256(b"data", P256_SPKI, &signature).unwrap());
        // private key text verifies through its public half
        assert!(ecdsa.verify_sha384(b"data", P256_PKCS8, &signature).unwrap());
        assert_eq!(
            *ecdsa.provider().imports.borrow(),
            [KeyKind::Private, KeyKind::Public, KeyKind::Public, KeyKind::Public]
        );
    }

    #[test]
    fn sign_requires_private_key() {
        let ecdsa = Ecdsa::with_provider(FakeProvider::default());
        let err = ecdsa.sign_md5(b"data", P256_SPKI).unwrap_err();
        assert_eq!(err, KeyError::PrivateKeyRequired);
        assert!(ecdsa.provider().imports.borrow().is_empty());
    }

    #[test]
    fn load_errors_propagate() {
        let ecdsa = Ecdsa::with_provider(FakeProvider::default());
        assert!(matches!(
            ecdsa.create("").unwrap_err(),
            KeyError::InvalidKeyFormat(_)
        ));
        assert!(matches!(
            ecdsa.verify_md5(b"data", "!!!", &[]).unwrap_err(),
            KeyError::InvalidBase64(_)
        ));
    }

    #[test]
    fn software_round_trip() {
        let ecdsa = Ecdsa::new();
        for curve in Curve::ALL {
            let key = ecdsa.generate_key(curve).unwrap();
            let signature = ecdsa.sign_md5(b"hello", &key.private_key).unwrap();
            assert_eq!(signature.len(), 2 * curve.width());
            assert!(ecdsa.verify_md5(b"hello", &key.public_key, &signature).unwrap());
            assert!(!ecdsa.verify_md5(b"hellO", &key.public_key, &signature).unwrap());

            let signature = ecdsa.sign_sha512(b"hello", &key.private_key).unwrap();
            assert!(ecdsa.verify_sha512(b"hello", &key.public_key, &signature).unwrap());
        }
    }

    #[test]
    fn software_handle_reuse() {
        let ecdsa = Ecdsa::new();
        let key = ecdsa.create(P256_PKCS8).unwrap();
        let provider = ecdsa.provider();
        let signature = provider.sign(&key, HashAlgorithm::Sha256, b"x").unwrap();
        assert!(ecdsa.verify_sha256(b"x", P256_SPKI, &signature).unwrap());
    }
}
