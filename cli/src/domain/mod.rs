//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::application`,
//! `crate::output`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod invocation;
pub mod keystore;
pub mod lockfile;
pub mod permission;
pub mod resolution;
pub mod ruby;
pub mod status;

pub use config::StepConfig;
pub use error::{ConfigError, PermissionError, RubyError, ToolError};
pub use invocation::{CALABASH_GEM, CalabashAction, CommandLine};
pub use resolution::{InstallMode, Resolution, decide_mode};
pub use ruby::RubyManager;
pub use status::{RESULT_KEY, TestResult};
