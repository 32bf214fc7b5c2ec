//! Random secret generation for single-use tokens.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;

/// Generates a URL-safe random token for links (reset, verification,
/// export download).
pub fn generate_url_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Generates a 6-digit zero-padded numeric verification code.
pub fn generate_numeric_code() -> String {
    let n: u32 = rand::rng().random_range(0..1_000_000);
    format!("{n:06}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_token_shape() {
        let token = generate_url_token();
        // 32 bytes -> 43 base64url chars, no padding.
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_ne!(generate_url_token(), token);
    }

    #[test]
    fn test_numeric_code_shape() {
        for _ in 0..50 {
            let code = generate_numeric_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
