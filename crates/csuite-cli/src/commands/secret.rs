//! Handlers for the `secret` command group.

use std::env;

use csuite_env::{MIN_JWT_SECRET_LEN, is_jwt_secret_valid, mask_sensitive_value, vars};
use rand::Rng;
use rand::distr::Alphanumeric;

use crate::cli::{SecretCheckArgs, SecretGenerateArgs};
use crate::error::{CliError, CliResult};

pub(crate) fn handle_generate(args: &SecretGenerateArgs) -> CliResult<()> {
    if args.length < MIN_JWT_SECRET_LEN {
        return Err(CliError::validation(format!(
            "--length must be at least {MIN_JWT_SECRET_LEN} (got {})",
            args.length
        )));
    }
    println!("{}", random_secret(args.length));
    Ok(())
}

pub(crate) fn handle_check(args: &SecretCheckArgs) -> CliResult<()> {
    let value = match &args.value {
        Some(value) => value.clone(),
        None => env::var(vars::JWT_SECRET).map_err(|_| {
            CliError::validation("no secret provided and JWT_SECRET is not set")
        })?,
    };
    let masked = mask_sensitive_value(&value);
    if is_jwt_secret_valid(&value) {
        println!("{masked}: valid for prod-local use");
        Ok(())
    } else {
        Err(CliError::validation(format!(
            "{masked}: not valid for prod-local use (need {MIN_JWT_SECRET_LEN}+ characters, not the dev default)"
        )))
    }
}

fn random_secret(len: usize) -> String {
    let mut rng = rand::rng();
    std::iter::repeat_with(|| rng.sample(Alphanumeric) as char)
        .take(len)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_secrets_satisfy_the_predicate() {
        let secret = random_secret(48);
        assert_eq!(secret.len(), 48);
        assert!(is_jwt_secret_valid(&secret));
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_secrets_differ() {
        assert_ne!(random_secret(32), random_secret(32));
    }

    #[test]
    fn short_generate_length_rejected() {
        let err = handle_generate(&SecretGenerateArgs { length: 16 })
            .expect_err("short length must fail");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn explicit_secret_checks_without_ambient() {
        let valid = "x".repeat(40);
        handle_check(&SecretCheckArgs { value: Some(valid) }).expect("valid secret");

        let err = handle_check(&SecretCheckArgs {
            value: Some("short".to_string()),
        })
        .expect_err("short secret must fail");
        // Masked rendering must not leak the raw value.
        assert!(!err.display_message().contains("short"));
        assert!(err.display_message().contains("sh...rt"));
    }
}
