//! Cross-module tests for the registry, logger instances, configuration
//! merging and the sink layer.

mod scope_tests;
mod sink_tests;

use crate::options::LoggerOptions;
use crate::scope::Region;
use crate::sink::{MockSink, Sink, SinkFactory};
use std::sync::Arc;

/// Sink factory that hands every logger the same capturing sink.
pub(crate) struct CaptureFactory {
    sink: MockSink,
}

impl CaptureFactory {
    /// Returns the factory plus a handle to the shared sink.
    pub fn new() -> (Arc<Self>, MockSink) {
        let sink = MockSink::new();
        (Arc::new(Self { sink: sink.clone() }), sink)
    }
}

impl SinkFactory for CaptureFactory {
    fn build(&self, _options: &LoggerOptions, _region: &Region) -> Vec<Arc<dyn Sink>> {
        vec![Arc::new(self.sink.clone())]
    }
}
