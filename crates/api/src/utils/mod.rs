//! Terminal plumbing shared by the commands

pub mod logging;
pub mod prompt;
pub mod render;
