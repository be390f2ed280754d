/// A context's error-accumulation slot.
///
/// Handlers that absorb a failure record it here instead of discarding it, so
/// the caller can read business-level failures back after `execute` returns.
pub trait ErrorSink {
    fn record_error(&mut self, error: anyhow::Error);

    fn recorded_errors(&self) -> &[anyhow::Error];

    fn has_errors(&self) -> bool {
        !self.recorded_errors().is_empty()
    }
}

impl ErrorSink for Vec<anyhow::Error> {
    fn record_error(&mut self, error: anyhow::Error) {
        self.push(error);
    }

    fn recorded_errors(&self) -> &[anyhow::Error] {
        self
    }
}
