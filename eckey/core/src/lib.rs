#![allow(clippy::doc_overindented_list_items)]

mod constants;
mod error;
mod types;

pub mod utils;

pub use self::constants::{
    EC_PUBLIC_KEY_OID, P256_OID, P384_OID, P521_OID, RSA_ENCRYPTION_OID, oid_name,
};
pub use self::error::ParseError;
pub use self::types::{Curve, HashAlgorithm, KeyKind};
pub use self::utils::{arcs_equal, eq_ignore_ascii_case, trim_ascii};
