//! Secret validation and masking helpers.

/// Development default JWT secret. Intentionally insecure; only acceptable
/// for local dev mode and always rejected by prod-local validation.
pub const DEV_DEFAULT_JWT_SECRET: &str = "devsecretkey123456789012345678901234567890";

/// Minimum acceptable secret length, in characters.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Whether a JWT secret is acceptable for production use.
///
/// Rejects empty secrets, the dev default, and anything shorter than
/// [`MIN_JWT_SECRET_LEN`] characters.
#[must_use]
pub fn is_jwt_secret_valid(secret: &str) -> bool {
    !secret.is_empty()
        && secret != DEV_DEFAULT_JWT_SECRET
        && secret.chars().count() >= MIN_JWT_SECRET_LEN
}

/// Mask a sensitive value for rendering or logging.
///
/// Values of four characters or fewer are fully masked; longer values show
/// the first and last two characters only.
#[must_use]
pub fn mask_sensitive_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}...{tail}")
}
