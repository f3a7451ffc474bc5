//! CLI command dispatch

pub mod commands;
