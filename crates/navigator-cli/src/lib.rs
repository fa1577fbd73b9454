//! Indoor navigator CLI library.
//!
//! This crate provides the command handlers and output formatting behind the
//! `navigator-cli` binary, kept in a library so they can be tested directly.

pub mod commands;
pub mod location;
pub mod output;
