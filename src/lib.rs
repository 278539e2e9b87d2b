//! quotefetch library
//!
//! Exposes the fetch building blocks to the binary and to integration tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod display;
pub mod info;
pub mod logging;
pub mod quote;
pub mod render;
