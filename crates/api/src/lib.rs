//! # Agenda App
//!
//! Command-line front end for the scheduled-message client.
//!
//! This crate contains:
//! - The clap command surface
//! - Application context (dependency injection)
//! - Subcommand handlers that drive the page controllers
//! - Text rendering, prompts and logging setup
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod adapters;
pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

pub use cli::{Cli, Command};
pub use context::{resolve_time_zone, AppContext};
