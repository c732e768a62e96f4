//! Subcommand implementations.

pub mod build;
pub mod init;
pub mod list;
pub mod meta;
pub mod render;
pub mod serve;
