#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Runtime environment configuration for the Contact Suite tooling.
//!
//! Translates a runtime-mode selection (dev / prod-local / ci-local) plus
//! optional overrides into a complete environment variable mapping for
//! launching the application process, refusing insecure combinations in
//! the production-simulation mode.
//!
//! Layout: `model.rs` (modes, backends, ambient snapshot), `builder.rs`
//! (`EnvironmentBuilder`), `merge.rs` (layered overlay), `secret.rs`
//! (secret validation and masking), `vars.rs` (managed variable names).

pub mod builder;
pub mod error;
pub mod merge;
pub mod model;
pub mod secret;
pub mod vars;

pub use builder::{EnvironmentBuilder, ci_advisory};
pub use error::{EnvError, EnvResult};
pub use merge::{EnvLayer, LayerPolicy, overlay};
pub use model::{AmbientEnv, ActiveProfile, DatabaseBackend, EnvMap, PostgresCredentials, RuntimeMode};
pub use secret::{DEV_DEFAULT_JWT_SECRET, MIN_JWT_SECRET_LEN, is_jwt_secret_valid, mask_sensitive_value};
