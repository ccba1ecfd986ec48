/*!
    Minimal ASN.1 DER support for elliptic-curve key containers.

    Covers exactly the value kinds that appear in `PrivateKeyInfo`,
    `SubjectPublicKeyInfo` and `ECPrivateKey`:
    - SEQUENCE and constructed context-specific `[n]` fields
    - INTEGER, OCTET STRING, BIT STRING, NULL
    - OBJECT IDENTIFIER (with friendly names for the EC OIDs)

    Anything else is rejected with [`DerError::UnsupportedTag`].
*/

mod error;
mod node;
mod oid;
mod reader;

pub use self::error::{DerError, DerResult};
pub use self::node::{Asn1Node, tag};
pub use self::oid::ObjectIdentifier;
pub use self::reader::{MAX_DEPTH, read, read_all};
