use anyhow::{anyhow, Result};
use sha2::{Digest, Sha256};

/// Generate a password-reset token: 20 random bytes, hex-encoded. The
/// plaintext goes out by email; only its digest is stored.
pub fn generate_reset_token() -> Result<String> {
    let mut buf = [0u8; 20];
    getrandom::getrandom(&mut buf).map_err(|e| anyhow!("OS RNG unavailable: {}", e))?;
    Ok(hex_encode(&buf))
}

/// SHA-256 hex digest of a plaintext reset token, as stored on the user row
/// and compared on reset.
pub fn hash_reset_token(plaintext: &str) -> String {
    let digest = Sha256::digest(plaintext.as_bytes());
    hex_encode(&digest)
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_token_is_40_hex_chars() {
        let token = generate_reset_token().unwrap();
        assert_eq!(token.len(), 40);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(
            generate_reset_token().unwrap(),
            generate_reset_token().unwrap()
        );
    }

    #[test]
    fn hash_is_deterministic() {
        let token = "abcdef0123456789";
        assert_eq!(hash_reset_token(token), hash_reset_token(token));
    }

    #[test]
    fn hash_differs_from_plaintext() {
        let token = generate_reset_token().unwrap();
        let hash = hash_reset_token(&token);
        assert_ne!(hash, token);
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn known_sha256_digest() {
        // sha256("") is a fixed vector; guards the hex encoding.
        assert_eq!(
            hash_reset_token(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
