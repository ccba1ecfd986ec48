use crate::error::{KeyError, KeyResult};
use crate::extract::extract_key;
use crate::material::KeyMaterial;
use crate::pem::looks_like_pem;

/**
    Load key material from text: PEM armor goes through the extractor,
    anything else is read as a Base64 key blob.
*/
pub fn load_key(text: &str) -> KeyResult<KeyMaterial> {
    let text = text.trim();
    if text.is_empty() {
        return Err(KeyError::InvalidKeyFormat("empty key text".into()));
    }
    if looks_like_pem(text) {
        tracing::debug!("loading PEM key");
        extract_key(text)
    } else {
        tracing::debug!(len = text.len(), "loading base64 key blob");
        KeyMaterial::from_blob_base64(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eckey_core::{Curve, KeyKind};

    const P256_PKCS8: &str = include_str!("../testfiles/p256_pkcs8.pem");
    const P384_SPKI: &str = include_str!("../testfiles/p384_spki.pem");

    #[test]
    fn pem_and_blob_agree() {
        let from_pem = load_key(P256_PKCS8).unwrap();
        let blob = from_pem.to_blob_base64();
        let from_blob = load_key(&blob).unwrap();
        assert_eq!(from_blob, from_pem);
        assert_eq!(from_blob.kind(), KeyKind::Private);

        let public = load_key(P384_SPKI).unwrap();
        assert_eq!(public.curve(), Curve::P384);
        assert_eq!(load_key(&public.to_blob_base64()).unwrap(), public);
    }

    #[test]
    fn surrounding_whitespace() {
        let padded = format!("\n\n  {P256_PKCS8}  \n");
        assert_eq!(load_key(&padded).unwrap(), load_key(P256_PKCS8).unwrap());

        let blob = load_key(P256_PKCS8).unwrap().to_blob_base64();
        let padded = format!("  {}\r\n", blob.as_str());
        assert!(load_key(&padded).is_ok());
    }

    #[test]
    fn pem_with_surrounding_text() {
        let annotated = format!("Subject: test key\n{P256_PKCS8}trailing note\n");
        assert_eq!(load_key(&annotated).unwrap(), load_key(P256_PKCS8).unwrap());

        let broken = "comment\n-----BEGIN PUBLIC KEY-----\nAAAA\n";
        assert!(matches!(
            load_key(broken).unwrap_err(),
            KeyError::InvalidKeyFormat(_)
        ));
    }

    #[test]
    fn empty_input() {
        assert!(matches!(
            load_key("").unwrap_err(),
            KeyError::InvalidKeyFormat(_)
        ));
        assert!(matches!(
            load_key(" \r\n ").unwrap_err(),
            KeyError::InvalidKeyFormat(_)
        ));
    }

    #[test]
    fn garbage_is_not_a_blob() {
        assert!(matches!(
            load_key("hello world").unwrap_err(),
            KeyError::InvalidBase64(_)
        ));
        // valid base64, too short for a blob header
        assert!(matches!(
            load_key("AAAA").unwrap_err(),
            KeyError::InvalidKeyBlob(_)
        ));
    }
}
