use std::sync::Arc;

use pathway_common::ServiceMode;

use crate::metrics::Metrics;
use crate::processor::{processor_for, Processor};

pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<dyn Processor>,
    pub metrics: Arc<Metrics>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(mode: ServiceMode, max_body_bytes: usize) -> Self {
        Self::with_processor(processor_for(mode), max_body_bytes)
    }

    pub fn with_processor(processor: Arc<dyn Processor>, max_body_bytes: usize) -> Self {
        Self {
            processor,
            metrics: Arc::new(Metrics::default()),
            max_body_bytes,
        }
    }

    pub fn mode(&self) -> ServiceMode {
        self.processor.mode()
    }
}
