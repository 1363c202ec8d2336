//! Persistence sink port trait.

use crate::domain::error::SigtraderError;
use crate::domain::execution::ExecutionCommand;
use crate::domain::signal::CompositeSignal;

/// Sink consuming finished records. Write-only from the core's perspective;
/// nothing in the pipeline ever reads persisted state back.
pub trait SinkPort {
    fn record_signal(&self, signal: &CompositeSignal) -> Result<(), SigtraderError>;
    fn record_execution(&self, command: &ExecutionCommand) -> Result<(), SigtraderError>;
}
