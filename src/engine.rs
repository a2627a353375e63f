// src/engine.rs
// =============================================================================
// The trap decision engine: one verdict per discovered link.
//
// It chains the two stages and owns the run state they share:
//   shape filter -> (whitelisted? accept) -> duplicate classifier
// A URL turned down by the duplicate classifier goes into the rejection cache
// so its content is never fetched and fingerprinted a second time.
// =============================================================================

use crate::config::Config;
use crate::crawl::Corpus;
use crate::dedup::DuplicateClassifier;
use crate::filter::{ShapeFilter, ShapeVerdict};
use crate::page::Verdict;
use crate::state::EngineState;
use tracing::debug;

pub struct TrapEngine {
    shape: ShapeFilter,
    classifier: DuplicateClassifier,
    state: EngineState,
}

impl TrapEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            shape: ShapeFilter::new(&config.filter),
            classifier: DuplicateClassifier::new(config.duplicate.clone()),
            state: EngineState::new(),
        }
    }

    /// Decide whether `url` is worth fetching. Never fails: anything the
    /// engine cannot make sense of is rejected.
    pub fn is_fetchable(&mut self, url: &str, corpus: &dyn Corpus) -> Verdict {
        match self.shape.classify(url, &self.state) {
            ShapeVerdict::Accept => Verdict::Accept,
            ShapeVerdict::Reject(reason) => {
                debug!("Rejected {}: {}", url, reason);
                Verdict::Reject(reason)
            }
            ShapeVerdict::NeedsContentCheck { bucket } => {
                let verdict =
                    self.classifier
                        .evaluate(&bucket, url, corpus, self.state.store_mut());

                if let Verdict::Reject(reason) = &verdict {
                    debug!("Rejected {}: {}", url, reason);
                    self.state.mark_rejected(url);
                }
                verdict
            }
        }
    }

    pub fn shape_filter(&self) -> &ShapeFilter {
        &self.shape
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }
}
