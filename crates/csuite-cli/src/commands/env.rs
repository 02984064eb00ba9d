//! Handlers for the `env` command group.

use csuite_env::{DatabaseBackend, EnvironmentBuilder};

use crate::cli::{DatabaseArg, EnvSelectArgs, EnvShowArgs, ModeArg, OutputFormat};
use crate::error::{CliError, CliResult};
use crate::output::{render_env_map, render_export_lines};

pub(crate) fn handle_show(args: &EnvShowArgs, format: OutputFormat) -> CliResult<()> {
    let builder = builder_from_args(&args.select)?;
    let env = builder
        .build()
        .map_err(|err| CliError::validation(err.to_string()))?;
    render_env_map(&env, args.all, format)
}

pub(crate) fn handle_check(args: &EnvSelectArgs) -> CliResult<()> {
    let builder = builder_from_args(args)?;
    builder
        .validate()
        .map_err(|err| CliError::validation(err.to_string()))?;
    println!("configuration valid for mode '{}'", builder.mode().as_str());
    Ok(())
}

pub(crate) fn handle_export(args: &EnvSelectArgs) -> CliResult<()> {
    let builder = builder_from_args(args)?;
    let env = builder
        .build()
        .map_err(|err| CliError::validation(err.to_string()))?;
    render_export_lines(&env);
    Ok(())
}

/// Translate CLI flags into a configured builder, rejecting combinations
/// that do not apply to the selected mode.
pub(crate) fn builder_from_args(args: &EnvSelectArgs) -> CliResult<EnvironmentBuilder> {
    let mut builder = match args.mode {
        ModeArg::Dev => {
            if args.https {
                return Err(CliError::validation(
                    "--https is only valid with --mode prod-local",
                ));
            }
            let database = match args.database {
                Some(DatabaseArg::Postgres) => DatabaseBackend::Postgres,
                Some(DatabaseArg::H2) | None => DatabaseBackend::H2,
            };
            let builder = EnvironmentBuilder::dev(database);
            apply_postgres_overrides(builder, args, database)?
        }
        ModeArg::ProdLocal => {
            reject_dev_only_flags(args, "prod-local")?;
            let builder = EnvironmentBuilder::prod_local();
            if args.https {
                builder.with_https()
            } else {
                builder
            }
        }
        ModeArg::CiLocal => {
            if args.https {
                return Err(CliError::validation(
                    "--https is only valid with --mode prod-local",
                ));
            }
            reject_dev_only_flags(args, "ci-local")?;
            EnvironmentBuilder::ci_local()
        }
    };

    for pair in &args.set {
        builder = builder.with_var(pair.key.as_str(), pair.value.as_str());
    }
    Ok(builder)
}

fn apply_postgres_overrides(
    builder: EnvironmentBuilder,
    args: &EnvSelectArgs,
    database: DatabaseBackend,
) -> CliResult<EnvironmentBuilder> {
    match (
        &args.postgres_url,
        &args.postgres_username,
        &args.postgres_password,
    ) {
        (None, None, None) => Ok(builder),
        (Some(url), Some(username), Some(password)) => {
            if database != DatabaseBackend::Postgres {
                return Err(CliError::validation(
                    "--postgres-* overrides require --database postgres",
                ));
            }
            Ok(builder.with_postgres_credentials(
                url.as_str(),
                username.as_str(),
                password.as_str(),
            ))
        }
        _ => Err(CliError::validation(
            "provide --postgres-url, --postgres-username, and --postgres-password together",
        )),
    }
}

fn reject_dev_only_flags(args: &EnvSelectArgs, mode: &str) -> CliResult<()> {
    if args.database.is_some() {
        return Err(CliError::validation(format!(
            "--database is only valid with --mode dev (mode '{mode}' fixes the backend)"
        )));
    }
    if args.postgres_url.is_some()
        || args.postgres_username.is_some()
        || args.postgres_password.is_some()
    {
        return Err(CliError::validation(format!(
            "--postgres-* overrides are only valid with --mode dev, not '{mode}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use csuite_env::{AmbientEnv, RuntimeMode, vars};

    use crate::cli::KeyValue;

    fn select(mode: ModeArg) -> EnvSelectArgs {
        EnvSelectArgs {
            mode,
            ..EnvSelectArgs::default()
        }
    }

    #[test]
    fn dev_defaults_to_h2() {
        let builder = builder_from_args(&select(ModeArg::Dev)).expect("dev args should resolve");
        assert_eq!(builder.mode(), RuntimeMode::Dev);
        let env = builder
            .build_with(&AmbientEnv::default())
            .expect("dev build must succeed");
        assert!(!env.contains_key(vars::SPRING_DATASOURCE_URL));
    }

    #[test]
    fn dev_postgres_with_overrides() {
        let args = EnvSelectArgs {
            mode: ModeArg::Dev,
            database: Some(DatabaseArg::Postgres),
            postgres_url: Some("jdbc:postgresql://custom:5432/mydb".to_string()),
            postgres_username: Some("myuser".to_string()),
            postgres_password: Some("mypass".to_string()),
            ..EnvSelectArgs::default()
        };
        let env = builder_from_args(&args)
            .expect("dev args should resolve")
            .build_with(&AmbientEnv::default())
            .expect("dev build must succeed");
        assert_eq!(env[vars::SPRING_DATASOURCE_URL], "jdbc:postgresql://custom:5432/mydb");
        assert_eq!(env[vars::SPRING_PROFILES_ACTIVE], "dev");
    }

    #[test]
    fn partial_postgres_overrides_rejected() {
        let args = EnvSelectArgs {
            mode: ModeArg::Dev,
            database: Some(DatabaseArg::Postgres),
            postgres_url: Some("jdbc:postgresql://custom:5432/mydb".to_string()),
            ..EnvSelectArgs::default()
        };
        let err = builder_from_args(&args).expect_err("partial overrides must fail");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn postgres_overrides_require_postgres_backend() {
        let args = EnvSelectArgs {
            mode: ModeArg::Dev,
            postgres_url: Some("jdbc:postgresql://custom:5432/mydb".to_string()),
            postgres_username: Some("u".to_string()),
            postgres_password: Some("p".to_string()),
            ..EnvSelectArgs::default()
        };
        let err = builder_from_args(&args).expect_err("h2 with overrides must fail");
        assert!(err.display_message().contains("--database postgres"));
    }

    #[test]
    fn https_rejected_outside_prod_local() {
        for mode in [ModeArg::Dev, ModeArg::CiLocal] {
            let args = EnvSelectArgs {
                mode,
                https: true,
                ..EnvSelectArgs::default()
            };
            let err = builder_from_args(&args).expect_err("--https must be rejected");
            assert!(err.display_message().contains("prod-local"));
        }
    }

    #[test]
    fn database_flag_rejected_outside_dev() {
        for mode in [ModeArg::ProdLocal, ModeArg::CiLocal] {
            let args = EnvSelectArgs {
                mode,
                database: Some(DatabaseArg::Postgres),
                ..EnvSelectArgs::default()
            };
            let err = builder_from_args(&args).expect_err("--database must be rejected");
            assert!(err.display_message().contains("--mode dev"));
        }
    }

    #[test]
    fn prod_local_accepts_https() {
        let args = EnvSelectArgs {
            mode: ModeArg::ProdLocal,
            https: true,
            ..EnvSelectArgs::default()
        };
        let builder = builder_from_args(&args).expect("prod-local args should resolve");
        assert_eq!(builder.mode(), RuntimeMode::ProdLocal);
    }

    #[test]
    fn set_pairs_apply_in_order() {
        let args = EnvSelectArgs {
            mode: ModeArg::Dev,
            set: vec![
                KeyValue {
                    key: "FEATURE_FLAG".to_string(),
                    value: "off".to_string(),
                },
                KeyValue {
                    key: "FEATURE_FLAG".to_string(),
                    value: "on".to_string(),
                },
            ],
            ..EnvSelectArgs::default()
        };
        let env = builder_from_args(&args)
            .expect("dev args should resolve")
            .build_with(&AmbientEnv::default())
            .expect("dev build must succeed");
        assert_eq!(env["FEATURE_FLAG"], "on");
    }

    #[test]
    fn ci_local_resolves() {
        let builder =
            builder_from_args(&select(ModeArg::CiLocal)).expect("ci args should resolve");
        assert_eq!(builder.mode(), RuntimeMode::CiLocal);
    }
}
