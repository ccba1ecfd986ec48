use crate::utils::arcs_equal;

/**
    id-ecPublicKey: `1.2.840.10045.2.1`

    The AlgorithmIdentifier OID shared by every elliptic-curve key,
    regardless of curve. The curve itself travels in the parameters.
*/
pub const EC_PUBLIC_KEY_OID: &[u64] = &[1, 2, 840, 10045, 2, 1];

/**
    NIST P-256 (secp256r1, prime256v1): `1.2.840.10045.3.1.7`
*/
pub const P256_OID: &[u64] = &[1, 2, 840, 10045, 3, 1, 7];

/**
    NIST P-384 (secp384r1): `1.3.132.0.34`
*/
pub const P384_OID: &[u64] = &[1, 3, 132, 0, 34];

/**
    NIST P-521 (secp521r1): `1.3.132.0.35`
*/
pub const P521_OID: &[u64] = &[1, 3, 132, 0, 35];

/**
    rsaEncryption: `1.2.840.113549.1.1.1`

    Only resolved so diagnostics can name the algorithm of a rejected key.
*/
pub const RSA_ENCRYPTION_OID: &[u64] = &[1, 2, 840, 113549, 1, 1, 1];

/**
    Resolve the friendly name of a known OID.

    The table is deliberately small: the EC algorithm, the curves this
    workspace understands, and RSA.
*/
pub const fn oid_name(arcs: &[u64]) -> Option<&'static str> {
    if arcs_equal(arcs, EC_PUBLIC_KEY_OID) {
        Some("ECC")
    } else if arcs_equal(arcs, P256_OID) {
        Some("P-256")
    } else if arcs_equal(arcs, P384_OID) {
        Some("P-384")
    } else if arcs_equal(arcs, P521_OID) {
        Some("P-521")
    } else if arcs_equal(arcs, RSA_ENCRYPTION_OID) {
        Some("RSA")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names() {
        assert_eq!(oid_name(EC_PUBLIC_KEY_OID), Some("ECC"));
        assert_eq!(oid_name(P256_OID), Some("P-256"));
        assert_eq!(oid_name(P384_OID), Some("P-384"));
        assert_eq!(oid_name(P521_OID), Some("P-521"));
        assert_eq!(oid_name(RSA_ENCRYPTION_OID), Some("RSA"));
    }

    #[test]
    fn unknown_oid_has_no_name() {
        // secp256k1
        assert_eq!(oid_name(&[1, 3, 132, 0, 10]), None);
        assert_eq!(oid_name(&[]), None);
    }

    #[test]
    fn prefix_is_not_a_match() {
        assert_eq!(oid_name(&[1, 2, 840, 10045, 2]), None);
        assert_eq!(oid_name(&[1, 2, 840, 10045, 2, 1, 0]), None);
    }
}
