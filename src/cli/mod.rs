//! CLI module for planr - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for campaign generation,
//! consistency checking, and creative scoring.

pub mod commands;

pub use commands::Cli;
