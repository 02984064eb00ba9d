//! Managed environment variable names and connection defaults.
//!
//! # Design
//! - Centralize the variable names the builder may set so the emitted
//!   contract stays consistent between the builder, renderers, and tests.

/// Cookie security flag consumed by the application.
pub const APP_AUTH_COOKIE_SECURE: &str = "APP_AUTH_COOKIE_SECURE";
/// Legacy alias for the cookie security flag.
pub const COOKIE_SECURE: &str = "COOKIE_SECURE";
/// Active application profile selector.
pub const SPRING_PROFILES_ACTIVE: &str = "SPRING_PROFILES_ACTIVE";
/// CSP relaxation flag for local hot-reload tooling. Present with `"true"`
/// when relaxed; absent otherwise.
pub const CSP_RELAXED: &str = "CSP_RELAXED";
/// Token signing secret.
pub const JWT_SECRET: &str = "JWT_SECRET";
/// TLS requirement flag.
pub const REQUIRE_SSL: &str = "REQUIRE_SSL";
/// Datasource connection URL.
pub const SPRING_DATASOURCE_URL: &str = "SPRING_DATASOURCE_URL";
/// Datasource username.
pub const SPRING_DATASOURCE_USERNAME: &str = "SPRING_DATASOURCE_USERNAME";
/// Datasource password.
pub const SPRING_DATASOURCE_PASSWORD: &str = "SPRING_DATASOURCE_PASSWORD";
/// Datasource JDBC driver class name.
pub const SPRING_DATASOURCE_DRIVER_CLASS_NAME: &str = "SPRING_DATASOURCE_DRIVER_CLASS_NAME";
/// Optional API key for dependency vulnerability scans in CI mode.
pub const NVD_API_KEY: &str = "NVD_API_KEY";

/// JDBC driver class applied for the Postgres backend.
pub const POSTGRES_DRIVER_CLASS: &str = "org.postgresql.Driver";
/// Default JDBC URL for the local Postgres instance.
pub const DEFAULT_POSTGRES_URL: &str = "jdbc:postgresql://localhost:5432/contactapp";
/// Default username for the local Postgres instance.
pub const DEFAULT_POSTGRES_USERNAME: &str = "contactapp";
/// Default password for the local Postgres instance.
pub const DEFAULT_POSTGRES_PASSWORD: &str = "contactapp";

/// Every variable the builder may set, in emission order. Renderers use
/// this to show the managed slice of a resolved mapping.
pub const MANAGED_KEYS: &[&str] = &[
    APP_AUTH_COOKIE_SECURE,
    COOKIE_SECURE,
    SPRING_PROFILES_ACTIVE,
    CSP_RELAXED,
    JWT_SECRET,
    REQUIRE_SSL,
    SPRING_DATASOURCE_URL,
    SPRING_DATASOURCE_USERNAME,
    SPRING_DATASOURCE_PASSWORD,
    SPRING_DATASOURCE_DRIVER_CLASS_NAME,
];

/// Variables whose values must be masked before rendering.
pub const SENSITIVE_KEYS: &[&str] = &[JWT_SECRET, SPRING_DATASOURCE_PASSWORD, NVD_API_KEY];
