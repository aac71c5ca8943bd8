// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Access token format validation.
//!
//! This module rejects malformed company tokens before any state is
//! consulted, so lookups only ever run against plausible credentials.

use fairline_domain::TOKEN_LENGTH;
use thiserror::Error;

/// Access token format errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenFormatError {
    /// Token has the wrong length.
    #[error("Access token must be exactly {expected} characters long (got {found})")]
    WrongLength { expected: usize, found: usize },

    /// Token contains a character outside the URL-safe alphabet.
    #[error("Access token contains characters outside its URL-safe alphabet")]
    ForbiddenCharacter,
}

/// Validates the shape of a presented access token.
///
/// Tokens are fixed-length strings over `[A-Za-z0-9_-]`. Anything else is
/// rejected here without touching persistence.
///
/// # Errors
///
/// Returns a `TokenFormatError` if the token has the wrong length or
/// contains characters outside the URL-safe alphabet.
pub fn validate_token_format(token: &str) -> Result<(), TokenFormatError> {
    if token.len() != TOKEN_LENGTH {
        return Err(TokenFormatError::WrongLength {
            expected: TOKEN_LENGTH,
            found: token.len(),
        });
    }

    if !token.chars().all(is_token_char) {
        return Err(TokenFormatError::ForbiddenCharacter);
    }

    Ok(())
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use fairline_domain::AccessToken;

    #[test]
    fn test_generated_token_passes() {
        let token: AccessToken = AccessToken::generate();

        assert!(validate_token_format(token.value()).is_ok());
    }

    #[test]
    fn test_wrong_length_rejected() {
        let result: Result<(), TokenFormatError> = validate_token_format("too-short");

        assert_eq!(
            result,
            Err(TokenFormatError::WrongLength {
                expected: TOKEN_LENGTH,
                found: 9
            })
        );

        let long: String = "a".repeat(TOKEN_LENGTH + 1);
        let result: Result<(), TokenFormatError> = validate_token_format(&long);

        assert_eq!(
            result,
            Err(TokenFormatError::WrongLength {
                expected: TOKEN_LENGTH,
                found: TOKEN_LENGTH + 1
            })
        );
    }

    #[test]
    fn test_empty_token_rejected() {
        let result: Result<(), TokenFormatError> = validate_token_format("");

        assert_eq!(
            result,
            Err(TokenFormatError::WrongLength {
                expected: TOKEN_LENGTH,
                found: 0
            })
        );
    }

    #[test]
    fn test_forbidden_character_rejected() {
        // Right length, but '!' is not in the URL-safe alphabet.
        let tainted: String = format!("{}!", "a".repeat(TOKEN_LENGTH - 1));

        assert_eq!(
            validate_token_format(&tainted),
            Err(TokenFormatError::ForbiddenCharacter)
        );
    }

    #[test]
    fn test_underscore_and_hyphen_allowed() {
        let token: String = format!("{}_-", "a".repeat(TOKEN_LENGTH - 2));

        assert!(validate_token_format(&token).is_ok());
    }
}
