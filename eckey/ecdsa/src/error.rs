use thiserror::Error;

use eckey_der::DerError;

/**
    Errors from key loading, key import, signing and verification.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    // ── Text framing ──────────────────────────────────────────────────
    #[error("invalid key format: {0}")]
    InvalidKeyFormat(String),
    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    // ── DER (delegated to eckey-der) ──────────────────────────────────
    #[error(transparent)]
    Der(#[from] DerError),

    // ── Key structure ─────────────────────────────────────────────────
    #[error("unsupported key algorithm {0}, expected an elliptic-curve key")]
    UnsupportedAlgorithm(String),
    #[error("unsupported curve {0}")]
    UnsupportedCurve(String),
    #[error("malformed key: {0}")]
    MalformedKey(String),
    #[error("invalid key blob: {0}")]
    InvalidKeyBlob(String),

    // ── ECC ────────────────────────────────────────────────────────────
    #[error("ECC key parse failed: {0}")]
    EccKeyParse(String),
    #[error("public point does not match the private scalar")]
    KeyMismatch,
    #[error("a private key is required for signing")]
    PrivateKeyRequired,

    // ── ECDSA ──────────────────────────────────────────────────────────
    #[error("ECDSA signing failed: {0}")]
    EcdsaSigningFailed(String),
}

/**
    Type alias for results that may return a [`KeyError`].
*/
pub type KeyResult<T> = std::result::Result<T, KeyError>;
