// src/state.rs
// =============================================================================
// The run-scoped classification state.
//
// One value owns everything the engine learns during a crawl: the fingerprint
// store (with each bucket's whitelist/blacklist status) and the cache of URLs
// already rejected by a duplicate check. It is created empty at crawl start
// and only changes through `&mut` access, so there is exactly one writer.
// =============================================================================

use crate::dedup::{BucketStatus, FingerprintStore};
use crate::filter::BucketKey;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct EngineState {
    store: FingerprintStore,
    checked_already: HashSet<String>,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &FingerprintStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FingerprintStore {
        &mut self.store
    }

    pub fn bucket_status(&self, key: &BucketKey) -> Option<BucketStatus> {
        self.store.status(key)
    }

    /// Whether a duplicate check already turned this URL down
    pub fn was_rejected(&self, url: &str) -> bool {
        self.checked_already.contains(url)
    }

    pub fn mark_rejected(&mut self, url: impl Into<String>) {
        self.checked_already.insert(url.into());
    }

    /// Number of URLs in the rejection cache
    pub fn rejected_count(&self) -> usize {
        self.checked_already.len()
    }

    #[cfg(test)]
    pub(crate) fn force_status(&mut self, key: BucketKey, status: BucketStatus) {
        use crate::dedup::{Bucket, PhraseProfile};

        let bucket = self
            .store
            .insert(key, Bucket::new(PhraseProfile::default(), String::new()));
        bucket.status = status;
    }
}
