//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra` or `crate::output`.

pub mod environment;
pub mod gem_query;
pub mod installer;
pub mod keystore;
pub mod permission;
pub mod ruby_env;
pub mod step;
pub mod test_run;
