//! Port traits at the collaborator seams.

pub mod candle_port;
pub mod config_port;
pub mod sink_port;
