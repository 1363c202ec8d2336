//! JSON-lines persistence sink adapter.
//!
//! Appends one JSON document per record to `signals.jsonl` and
//! `executions.jsonl` under the sink directory, creating both lazily.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::domain::error::SigtraderError;
use crate::domain::execution::ExecutionCommand;
use crate::domain::signal::CompositeSignal;
use crate::ports::sink_port::SinkPort;

pub struct JsonlSinkAdapter {
    base_path: PathBuf,
}

impl JsonlSinkAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn append<T: Serialize>(&self, file_name: &str, record: &T) -> Result<(), SigtraderError> {
        fs::create_dir_all(&self.base_path)?;
        let line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.base_path.join(file_name))?;
        writeln!(file, "{line}")?;
        Ok(())
    }
}

impl SinkPort for JsonlSinkAdapter {
    fn record_signal(&self, signal: &CompositeSignal) -> Result<(), SigtraderError> {
        self.append("signals.jsonl", signal)
    }

    fn record_execution(&self, command: &ExecutionCommand) -> Result<(), SigtraderError> {
        self.append("executions.jsonl", command)
    }
}
