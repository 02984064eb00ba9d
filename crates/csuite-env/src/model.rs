//! Typed data carriers for runtime environment configuration.
//!
//! # Design
//! - Pure data types shared by the builder and the CLI.
//! - Every read of "the ambient environment" goes through an [`AmbientEnv`]
//!   snapshot so the builder stays deterministic and testable.

use std::collections::BTreeMap;
use std::env;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::vars;

/// Fully-resolved environment mapping handed to a launched subprocess.
pub type EnvMap = BTreeMap<String, String>;

/// Runtime mode selected at builder construction. Never changes afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RuntimeMode {
    /// Local HTTP development: relaxed security, optional Postgres.
    Dev,
    /// Production simulation on localhost: strict security, Postgres only.
    ProdLocal,
    /// Local reproduction of the CI pipeline settings.
    CiLocal,
}

impl RuntimeMode {
    /// Render the mode as its kebab-case string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::ProdLocal => "prod-local",
            Self::CiLocal => "ci-local",
        }
    }
}

impl FromStr for RuntimeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "prod-local" => Ok(Self::ProdLocal),
            "ci-local" => Ok(Self::CiLocal),
            other => Err(anyhow!("invalid runtime mode '{other}'")),
        }
    }
}

/// Supported database backends.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    /// Embedded H2 database; no network configuration required.
    #[default]
    H2,
    /// PostgreSQL over the network; requires connection credentials.
    Postgres,
}

impl DatabaseBackend {
    /// Render the backend as its lowercase string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::H2 => "h2",
            Self::Postgres => "postgres",
        }
    }
}

impl FromStr for DatabaseBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "h2" => Ok(Self::H2),
            "postgres" => Ok(Self::Postgres),
            other => Err(anyhow!("invalid database backend '{other}'")),
        }
    }
}

/// Application profile activated downstream. Derived from the runtime mode
/// and database backend; never set directly by callers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActiveProfile {
    /// Baseline profile (embedded database, CI defaults).
    #[default]
    Default,
    /// Development profile with a networked Postgres.
    Dev,
    /// Production profile.
    Prod,
}

impl ActiveProfile {
    /// Render the profile as its lowercase string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }
}

/// Postgres connection parameters applied when the backend is networked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostgresCredentials {
    /// JDBC connection URL.
    pub url: String,
    /// Database username.
    pub username: String,
    /// Database password.
    pub password: String,
}

impl Default for PostgresCredentials {
    fn default() -> Self {
        Self {
            url: vars::DEFAULT_POSTGRES_URL.to_string(),
            username: vars::DEFAULT_POSTGRES_USERNAME.to_string(),
            password: vars::DEFAULT_POSTGRES_PASSWORD.to_string(),
        }
    }
}

/// Immutable snapshot of the calling process environment.
///
/// The builder never mutates the process environment; every build starts
/// from a copy of a snapshot like this one.
#[derive(Debug, Clone, Default)]
pub struct AmbientEnv {
    vars: EnvMap,
}

impl AmbientEnv {
    /// Snapshot the live process environment.
    #[must_use]
    pub fn capture() -> Self {
        Self {
            vars: env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit key/value pairs. Intended for tests
    /// and for callers that manage their own environment source.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Look up a variable in the snapshot.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Whether the snapshot contains the given variable.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    /// Copy the snapshot into an owned mapping.
    #[must_use]
    pub fn to_map(&self) -> EnvMap {
        self.vars.clone()
    }
}
