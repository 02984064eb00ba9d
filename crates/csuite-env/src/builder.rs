//! Environment builder: per-mode defaults, validation, and finalization.

use tracing::warn;

use crate::error::{EnvError, EnvResult};
use crate::merge::{EnvLayer, overlay};
use crate::model::{AmbientEnv, ActiveProfile, DatabaseBackend, EnvMap, PostgresCredentials, RuntimeMode};
use crate::secret::{DEV_DEFAULT_JWT_SECRET, MIN_JWT_SECRET_LEN};
use crate::vars;

/// Builds a fully-resolved environment variable mapping for a runtime mode.
///
/// Construct with [`dev`](Self::dev), [`prod_local`](Self::prod_local), or
/// [`ci_local`](Self::ci_local), optionally chain mutators, then finalize
/// with [`build`](Self::build). Finalization validates first and emits
/// nothing on failure; the process environment is never mutated.
#[derive(Debug, Clone)]
pub struct EnvironmentBuilder {
    mode: RuntimeMode,
    cookie_secure: bool,
    profile: ActiveProfile,
    csp_relaxed: bool,
    jwt_secret: Option<String>,
    require_ssl: bool,
    database: DatabaseBackend,
    postgres: PostgresCredentials,
    extra_vars: Vec<(String, String)>,
}

impl EnvironmentBuilder {
    /// Development mode: secure cookies off (HTTP on localhost), CSP
    /// relaxed for hot-reload tooling, no SSL requirement. Postgres selects
    /// the `dev` profile; H2 keeps `default`.
    #[must_use]
    pub fn dev(database: DatabaseBackend) -> Self {
        let profile = match database {
            DatabaseBackend::Postgres => ActiveProfile::Dev,
            DatabaseBackend::H2 => ActiveProfile::Default,
        };
        Self {
            mode: RuntimeMode::Dev,
            cookie_secure: false,
            profile,
            csp_relaxed: true,
            jwt_secret: None,
            require_ssl: false,
            database,
            postgres: PostgresCredentials::default(),
            extra_vars: Vec::new(),
        }
    }

    /// Production simulation: secure cookies on, strict CSP, Postgres
    /// fixed, `prod` profile. Captures `JWT_SECRET` from the live process
    /// environment at construction time.
    #[must_use]
    pub fn prod_local() -> Self {
        Self::prod_local_with(&AmbientEnv::capture())
    }

    /// [`prod_local`](Self::prod_local) with an explicit ambient snapshot.
    #[must_use]
    pub fn prod_local_with(ambient: &AmbientEnv) -> Self {
        Self {
            mode: RuntimeMode::ProdLocal,
            cookie_secure: true,
            profile: ActiveProfile::Prod,
            csp_relaxed: false,
            jwt_secret: ambient.get(vars::JWT_SECRET).map(str::to_string),
            require_ssl: false,
            database: DatabaseBackend::Postgres,
            postgres: PostgresCredentials::default(),
            extra_vars: Vec::new(),
        }
    }

    /// CI reproduction: mirrors the CI pipeline settings (secure cookies,
    /// strict CSP, `default` profile, embedded database).
    #[must_use]
    pub fn ci_local() -> Self {
        Self {
            mode: RuntimeMode::CiLocal,
            cookie_secure: true,
            profile: ActiveProfile::Default,
            csp_relaxed: false,
            jwt_secret: None,
            require_ssl: false,
            database: DatabaseBackend::H2,
            postgres: PostgresCredentials::default(),
            extra_vars: Vec::new(),
        }
    }

    /// Runtime mode selected at construction.
    #[must_use]
    pub const fn mode(&self) -> RuntimeMode {
        self.mode
    }

    /// Override the local Postgres connection parameters. Applies only in
    /// dev mode; other modes ignore the call with a warning.
    #[must_use]
    pub fn with_postgres_credentials(
        mut self,
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        if self.mode == RuntimeMode::Dev {
            self.postgres = PostgresCredentials {
                url: url.into(),
                username: username.into(),
                password: password.into(),
            };
        } else {
            warn!(mode = self.mode.as_str(), "with_postgres_credentials ignored outside dev mode");
        }
        self
    }

    /// Require TLS (for self-signed certificate testing). Applies only in
    /// prod-local mode; other modes ignore the call with a warning.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        if self.mode == RuntimeMode::ProdLocal {
            self.require_ssl = true;
        } else {
            warn!(mode = self.mode.as_str(), "with_https ignored outside prod-local mode");
        }
        self
    }

    /// Add an extra variable applied unconditionally after every computed
    /// layer. Extras win over ambient and computed values alike.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_vars.push((key.into(), value.into()));
        self
    }

    /// Validate the configuration against a live ambient snapshot.
    ///
    /// # Errors
    ///
    /// Returns an [`EnvError`] when prod-local secret requirements are not
    /// met. Dev and ci-local never fail; ci-local may log an advisory.
    pub fn validate(&self) -> EnvResult<()> {
        self.validate_with(&AmbientEnv::capture())
    }

    /// Validate against an explicit ambient snapshot.
    ///
    /// # Errors
    ///
    /// Returns an [`EnvError`] when prod-local secret requirements are not
    /// met.
    pub fn validate_with(&self, ambient: &AmbientEnv) -> EnvResult<()> {
        match self.mode {
            RuntimeMode::Dev => Ok(()),
            RuntimeMode::ProdLocal => self.validate_prod_secret(),
            RuntimeMode::CiLocal => {
                if let Some(advisory) = ci_advisory(ambient) {
                    warn!("{advisory}");
                }
                Ok(())
            }
        }
    }

    fn validate_prod_secret(&self) -> EnvResult<()> {
        let secret = self
            .jwt_secret
            .as_deref()
            .filter(|value| !value.is_empty())
            .ok_or(EnvError::MissingSecret)?;
        if secret == DEV_DEFAULT_JWT_SECRET {
            return Err(EnvError::InsecureDefaultSecret);
        }
        let length = secret.chars().count();
        if length < MIN_JWT_SECRET_LEN {
            return Err(EnvError::SecretTooShort { length });
        }
        Ok(())
    }

    /// Validate and emit the resolved mapping from the live environment.
    ///
    /// # Errors
    ///
    /// Returns an [`EnvError`] when validation fails; no partial mapping is
    /// produced in that case.
    pub fn build(&self) -> EnvResult<EnvMap> {
        self.build_with(&AmbientEnv::capture())
    }

    /// Validate and emit the resolved mapping from an explicit snapshot.
    ///
    /// The result starts from a copy of the snapshot and overlays computed
    /// values in a fixed order: cookie flags, active profile, CSP flag
    /// (only when relaxed), the secret (only when held), the SSL flag,
    /// datasource parameters (only filling keys the snapshot leaves
    /// absent), and finally the caller's extra variables, which win
    /// unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an [`EnvError`] when validation fails; no partial mapping is
    /// produced in that case.
    pub fn build_with(&self, ambient: &AmbientEnv) -> EnvResult<EnvMap> {
        self.validate_with(ambient)?;

        let mut computed: Vec<(String, String)> = vec![
            (
                vars::APP_AUTH_COOKIE_SECURE.to_string(),
                self.cookie_secure.to_string(),
            ),
            (vars::COOKIE_SECURE.to_string(), self.cookie_secure.to_string()),
            (
                vars::SPRING_PROFILES_ACTIVE.to_string(),
                self.profile.as_str().to_string(),
            ),
        ];
        if self.csp_relaxed {
            computed.push((vars::CSP_RELAXED.to_string(), "true".to_string()));
        }
        if let Some(secret) = self.jwt_secret.as_deref().filter(|value| !value.is_empty()) {
            computed.push((vars::JWT_SECRET.to_string(), secret.to_string()));
        }
        computed.push((vars::REQUIRE_SSL.to_string(), self.require_ssl.to_string()));

        let mut layers = vec![EnvLayer::overriding(computed)];
        if self.database == DatabaseBackend::Postgres {
            layers.push(EnvLayer::keep_existing([
                (vars::SPRING_DATASOURCE_URL, self.postgres.url.as_str()),
                (
                    vars::SPRING_DATASOURCE_USERNAME,
                    self.postgres.username.as_str(),
                ),
                (
                    vars::SPRING_DATASOURCE_PASSWORD,
                    self.postgres.password.as_str(),
                ),
                (
                    vars::SPRING_DATASOURCE_DRIVER_CLASS_NAME,
                    vars::POSTGRES_DRIVER_CLASS,
                ),
            ]));
        }
        layers.push(EnvLayer::overriding(self.extra_vars.clone()));

        Ok(overlay(ambient.to_map(), layers))
    }
}

/// Advisory for ci-local mode when the optional scan API key is absent.
///
/// Never a failure: the scan just runs slower without a key.
#[must_use]
pub fn ci_advisory(ambient: &AmbientEnv) -> Option<&'static str> {
    if ambient.contains(vars::NVD_API_KEY) {
        None
    } else {
        Some(
            "NVD_API_KEY not set; dependency vulnerability scans will be slower. \
             Request a free key at https://nvd.nist.gov/developers/request-an-api-key",
        )
    }
}
