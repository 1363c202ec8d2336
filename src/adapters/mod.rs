//! Concrete adapter implementations for the ports.

pub mod csv_adapter;
pub mod file_config_adapter;
pub mod jsonl_sink_adapter;
pub mod synthetic_adapter;
#[cfg(feature = "web")]
pub mod web;
