/**
    Const-compatible ASCII whitespace trimming (both ends).
*/
pub const fn trim_ascii(mut s: &[u8]) -> &[u8] {
    while let [first, rest @ ..] = s {
        if !first.is_ascii_whitespace() {
            break;
        }
        s = rest;
    }
    while let [rest @ .., last] = s {
        if !last.is_ascii_whitespace() {
            break;
        }
        s = rest;
    }
    s
}

/**
    Const-compatible case-insensitive ASCII byte comparison.
    Slices of different length never compare equal.
*/
pub const fn eq_ignore_ascii_case(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i].to_ascii_lowercase() != b[i].to_ascii_lowercase() {
            return false;
        }
        i += 1;
    }
    true
}

/**
    Const-compatible equality for OID arc slices.
*/
pub const fn arcs_equal(a: &[u64], b: &[u64]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_both_ends() {
        assert_eq!(trim_ascii(b"  p256\r\n"), b"p256");
        assert_eq!(trim_ascii(b"\tsha-256"), b"sha-256");
        assert_eq!(trim_ascii(b"md5"), b"md5");
    }

    #[test]
    fn trim_all_whitespace() {
        assert_eq!(trim_ascii(b" \n\t "), b"");
        assert_eq!(trim_ascii(b""), b"");
    }

    #[test]
    fn case_insensitive_compare() {
        assert!(eq_ignore_ascii_case(b"P-256", b"p-256"));
        assert!(eq_ignore_ascii_case(b"SHA512", b"sha512"));
        assert!(!eq_ignore_ascii_case(b"p256", b"p384"));
        assert!(!eq_ignore_ascii_case(b"p256", b"p2560"));
    }

    #[test]
    fn arcs_compare() {
        assert!(arcs_equal(&[1, 2, 840], &[1, 2, 840]));
        assert!(!arcs_equal(&[1, 2, 840], &[1, 2, 841]));
        assert!(!arcs_equal(&[1, 2], &[1, 2, 840]));
        assert!(arcs_equal(&[], &[]));
    }
}
