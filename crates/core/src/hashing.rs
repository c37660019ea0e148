//! SHA-256 helpers for caller-address fingerprints.

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the caller-address digest.
pub const IP_HASH_LEN: usize = 16;

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Truncated, one-way fingerprint of a caller's network address.
///
/// Returns `None` when the address is unknown so the stored `ip_hash` is null.
pub fn ip_hash(address: Option<&str>) -> Option<String> {
    address.map(|addr| {
        let mut hex = sha256_hex(addr.as_bytes());
        hex.truncate(IP_HASH_LEN);
        hex
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_produces_known_hash() {
        let hash = sha256_hex(b"");
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn ip_hash_is_prefix_of_full_digest() {
        let full = sha256_hex(b"127.0.0.1");
        let short = ip_hash(Some("127.0.0.1")).unwrap();
        assert_eq!(short.len(), IP_HASH_LEN);
        assert!(full.starts_with(&short));
    }

    #[test]
    fn ip_hash_is_deterministic() {
        assert_eq!(ip_hash(Some("10.0.0.1")), ip_hash(Some("10.0.0.1")));
    }

    #[test]
    fn different_addresses_hash_differently() {
        assert_ne!(ip_hash(Some("10.0.0.1")), ip_hash(Some("10.0.0.2")));
    }

    #[test]
    fn ip_hash_is_lowercase_hex() {
        let hash = ip_hash(Some("::1")).unwrap();
        assert!(hash
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn missing_address_yields_none() {
        assert_eq!(ip_hash(None), None);
    }
}
