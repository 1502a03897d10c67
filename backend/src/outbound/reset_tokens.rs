//! Random password-reset token generation.
//!
//! Tokens are opaque URL-safe strings; persistence and expiry are the
//! verifier's concern, not this adapter's.

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::domain::ports::ResetTokenIssuer;

/// Number of characters in a generated token.
const TOKEN_LENGTH: usize = 48;

/// Issues alphanumeric tokens from the thread-local CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomResetTokenIssuer;

impl ResetTokenIssuer for RandomResetTokenIssuer {
    fn issue(&self) -> String {
        let rng = rand::thread_rng();
        rng.sample_iter(Alphanumeric)
            .take(TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn tokens_are_url_safe_and_fixed_length() {
        let token = RandomResetTokenIssuer.issue();
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[rstest]
    fn tokens_are_not_repeated() {
        let issuer = RandomResetTokenIssuer;
        assert_ne!(issuer.issue(), issuer.issue());
    }
}
