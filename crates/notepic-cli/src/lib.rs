//! notepic CLI library
//!
//! Argument parsing, configuration loading and logging setup around
//! `notepic-core`.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
