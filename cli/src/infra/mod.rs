//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution,
//! filesystem access and pipeline export.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::output` are forbidden.

pub mod command_runner;
pub mod envman;
pub mod fs;
