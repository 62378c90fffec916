//! Foundation types for tinysh.
//!
//! This crate contains the types shared by every tinysh crate: the error
//! enum, line-edit events fed in by the presentation layer, and the shell
//! configuration.

pub mod config;
pub mod error;
pub mod input;
