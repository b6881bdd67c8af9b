//! CLI commands

pub mod edit;
pub mod list;
pub mod new;
pub mod show;
pub mod tags;
