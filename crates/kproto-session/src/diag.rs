use std::fmt;
use std::sync::Arc;

/// Caller-facing diagnostic sink.
///
/// Passed to the daemon at construction instead of a process-wide mutable
/// log hook. The default sink discards everything; callers that want the
/// daemon's one-line diagnostics supply a closure once at startup.
#[derive(Clone, Default)]
pub struct Diagnostics {
    sink: Option<Arc<dyn Fn(&str) + Send + Sync>>,
}

impl Diagnostics {
    /// Create a diagnostics handle backed by the given sink.
    pub fn new(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            sink: Some(Arc::new(sink)),
        }
    }

    /// Hand one diagnostic line to the sink, if any.
    pub fn emit(&self, line: &str) {
        if let Some(sink) = &self.sink {
            sink(line);
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("sink", &self.sink.is_some())
            .finish()
    }
}
