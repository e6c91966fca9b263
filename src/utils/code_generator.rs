//! Short code generation.
//!
//! Codes are deliberately short, so collisions are expected; uniqueness is
//! enforced by [`crate::application::services::LinkService`] probing the store.

use crate::domain::repositories::CodeGenerator;
use base64::Engine as _;

/// Number of characters in a generated code.
pub const CODE_LENGTH: usize = 3;

/// Substitute for any character outside `[A-Za-z0-9_-]`.
const FILLER: char = 'x';

/// Generates random short codes from the URL-safe alphabet `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for RandomCodeGenerator {
    /// Draws [`CODE_LENGTH`] bytes from the OS entropy source, encodes them as
    /// URL-safe base64 and keeps the first [`CODE_LENGTH`] characters.
    ///
    /// # Panics
    ///
    /// Panics if the system random number generator fails (extremely rare).
    fn generate(&self) -> String {
        let mut buffer = [0u8; CODE_LENGTH];

        getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

        let encoded = base64::engine::general_purpose::URL_SAFE.encode(buffer);
        sanitize_code(&encoded[..CODE_LENGTH])
    }
}

/// Replaces every character outside `[A-Za-z0-9_-]` with [`FILLER`].
pub fn sanitize_code(code: &str) -> String {
    code.chars()
        .map(|c| if is_code_char(c) { c } else { FILLER })
        .collect()
}

/// Returns true if `c` belongs to the short code alphabet.
pub fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = RandomCodeGenerator::new().generate();
        assert_eq!(code.chars().count(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_url_safe_characters() {
        let generator = RandomCodeGenerator::new();
        for _ in 0..500 {
            let code = generator.generate();
            assert!(code.chars().all(is_code_char), "unexpected code {code}");
        }
    }

    #[test]
    fn test_generate_code_no_padding() {
        let code = RandomCodeGenerator::new().generate();
        assert!(!code.contains('='));
    }

    #[test]
    fn test_generate_code_varies() {
        let generator = RandomCodeGenerator::new();
        let codes: HashSet<String> = (0..200).map(|_| generator.generate()).collect();

        // 64^3 possible codes; 200 draws collapsing below 100 distinct values
        // would mean the entropy source is broken.
        assert!(codes.len() > 100);
    }

    #[test]
    fn test_sanitize_replaces_foreign_characters() {
        assert_eq!(sanitize_code("a=b"), "axb");
        assert_eq!(sanitize_code("+/="), "xxx");
        assert_eq!(sanitize_code("aZ9"), "aZ9");
    }

    #[test]
    fn test_sanitize_keeps_dash_and_underscore() {
        assert_eq!(sanitize_code("-_-"), "-_-");
    }
}
