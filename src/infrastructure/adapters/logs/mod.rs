/*
Log Adapters Module

Infrastructure adapters that wire the service's tracing output to the console and,
optionally, to rolling log files.
*/

pub mod system_log_adapter;

pub use system_log_adapter::{LogError, SystemLogAdapter};
