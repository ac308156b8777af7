// src/lib.rs
pub mod application;
pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod delivery;
pub mod error;
pub mod infrastructure;
pub mod setup;
