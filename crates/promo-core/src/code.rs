//! Discount code model and generation

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

/// Symbols allowed in generated codes.
///
/// 32 characters: uppercase letters and digits without `0`, `1`, `I` and
/// `O`, which are easily misread when a code is typed back from a receipt.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Shortest code the generator produces
pub const MIN_CODE_LENGTH: u8 = 7;

/// Longest code the generator produces
pub const MAX_CODE_LENGTH: u8 = 8;

/// A discount code and its redemption state.
///
/// Field names serialize in camelCase, so the persisted snapshot reads
/// `{"code": "...", "isUsed": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    pub code: String,
    pub is_used: bool,
}

impl DiscountCode {
    /// Create a fresh, unredeemed code
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            is_used: false,
        }
    }

    /// Case-insensitive comparison against a submitted code string
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.eq_ignore_ascii_case(submitted)
    }
}

/// Generate a random code of `length` characters from [`CODE_ALPHABET`].
pub fn random_code(length: u8) -> String {
    let mut rng = rand::thread_rng();
    let mut bytes = vec![0u8; length as usize];
    rng.fill_bytes(&mut bytes);
    // 32 divides 256, so the byte-to-symbol map is unbiased
    bytes
        .iter()
        .map(|b| CODE_ALPHABET[(*b as usize) % CODE_ALPHABET.len()] as char)
        .collect()
}

/// Pick a code length uniformly from the allowed range
pub fn random_length() -> u8 {
    rand::thread_rng().gen_range(MIN_CODE_LENGTH..=MAX_CODE_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_excludes_ambiguous_symbols() {
        assert_eq!(CODE_ALPHABET.len(), 32);
        for c in [b'0', b'1', b'I', b'O'] {
            assert!(!CODE_ALPHABET.contains(&c));
        }
    }

    #[test]
    fn test_random_code_format() {
        let code = random_code(8);
        assert_eq!(code.len(), 8);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() && !matches!(c, '0' | '1' | 'I' | 'O')));
    }

    #[test]
    fn test_random_length_in_range() {
        for _ in 0..100 {
            let len = random_length();
            assert!(len == 7 || len == 8);
        }
    }

    #[test]
    fn test_matches_ignores_case() {
        let code = DiscountCode::new("ABC23XY");
        assert!(code.matches("abc23xy"));
        assert!(code.matches("ABC23XY"));
        assert!(!code.matches("ABC23XZ"));
    }

    #[test]
    fn test_serde_field_names() {
        let code = DiscountCode::new("ABCDEFG");
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, r#"{"code":"ABCDEFG","isUsed":false}"#);

        let parsed: DiscountCode =
            serde_json::from_str(r#"{"code":"XYZ23456","isUsed":true}"#).unwrap();
        assert_eq!(parsed.code, "XYZ23456");
        assert!(parsed.is_used);
    }
}
