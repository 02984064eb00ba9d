//! Command handlers grouped by concern.

pub(crate) mod env;
pub(crate) mod secret;
