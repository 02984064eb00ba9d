//! Error types for environment configuration.

use thiserror::Error;

/// Validation failures raised while finalizing a prod-local configuration.
///
/// Every variant is terminal: the caller must fix the ambient environment
/// and retry. No mapping is emitted when validation fails.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// No `JWT_SECRET` was present in the ambient environment.
    #[error(
        "JWT_SECRET environment variable is required for prod-local mode; \
         set it with: export JWT_SECRET=$(openssl rand -base64 32)"
    )]
    MissingSecret,
    /// `JWT_SECRET` matched the well-known development default.
    #[error(
        "JWT_SECRET cannot be the dev default in prod-local mode; \
         generate a secure secret with: openssl rand -base64 32"
    )]
    InsecureDefaultSecret,
    /// `JWT_SECRET` was shorter than the required minimum.
    #[error(
        "JWT_SECRET must be at least 32 characters (got {length}); \
         generate a secure secret with: openssl rand -base64 32"
    )]
    SecretTooShort {
        /// Character count of the rejected secret.
        length: usize,
    },
}

/// Convenience alias for environment configuration results.
pub type EnvResult<T> = Result<T, EnvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_remediation_hints() {
        assert!(EnvError::MissingSecret.to_string().contains("openssl rand"));
        assert!(
            EnvError::InsecureDefaultSecret
                .to_string()
                .contains("dev default")
        );
        let err = EnvError::SecretTooShort { length: 12 };
        assert!(err.to_string().contains("got 12"));
    }
}
