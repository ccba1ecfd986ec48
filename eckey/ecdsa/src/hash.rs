use md5::Md5;
use sha2::{Digest, Sha256, Sha384, Sha512};

use eckey_core::HashAlgorithm;

/**
    Hash `data` with the given algorithm.
*/
pub fn digest(hash: HashAlgorithm, data: &[u8]) -> Vec<u8> {
    match hash {
        HashAlgorithm::Md5 => Md5::digest(data).to_vec(),
        HashAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        HashAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        HashAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/**
    Hash `data` and shape the digest into an ECDSA prehash for a field of
    `width` bytes.

    Digests shorter than the field are left-padded with zeros, which keeps
    the same integer value. Longer digests are passed through; the signer
    keeps their leftmost `width` bytes.
*/
pub fn prehash(hash: HashAlgorithm, data: &[u8], width: usize) -> Vec<u8> {
    let digest = digest(hash, data);
    if digest.len() >= width {
        return digest;
    }
    let mut out = vec![0u8; width];
    out[width - digest.len()..].copy_from_slice(&digest);
    out
}
