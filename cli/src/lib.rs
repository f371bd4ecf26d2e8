//! MacroMate CLI Library
//!
//! This library exposes the CLI modules for use in tests and the binary.

pub mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod report;
