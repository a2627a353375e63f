// src/dedup/store.rs
// =============================================================================
// The content fingerprint store: one entry per path bucket.
//
// A bucket is created the first time a page in it passes the shape filter and
// is never removed. Its status only ever moves one way:
//   Undetermined -> Whitelisted   (enough distinct pages)
//   Undetermined -> Blacklisted   (enough near-duplicates)
// so at any moment a bucket sits in exactly one of the three states.
// =============================================================================

use super::profile::PhraseProfile;
use crate::filter::BucketKey;
use serde::Serialize;
use std::collections::HashMap;

/// Where a bucket stands in the whitelist/blacklist life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketStatus {
    Undetermined,
    Whitelisted,
    Blacklisted,
}

/// Fingerprint and counters of one path bucket
#[derive(Debug, Clone)]
pub struct Bucket {
    /// Profile new pages are compared against
    pub profile: PhraseProfile,
    /// URL whose content produced `profile`
    pub representative_url: String,
    /// Pages judged near-duplicates of the representative
    pub similar_hits: u32,
    /// Pages judged distinct from the representative
    pub distinct_hits: u32,
    pub status: BucketStatus,
}

impl Bucket {
    pub fn new(profile: PhraseProfile, representative_url: impl Into<String>) -> Self {
        Self {
            profile,
            representative_url: representative_url.into(),
            similar_hits: 0,
            distinct_hits: 0,
            status: BucketStatus::Undetermined,
        }
    }
}

/// All buckets seen during one run
#[derive(Debug, Default)]
pub struct FingerprintStore {
    buckets: HashMap<BucketKey, Bucket>,
}

impl FingerprintStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &BucketKey) -> Option<&Bucket> {
        self.buckets.get(key)
    }

    pub fn get_mut(&mut self, key: &BucketKey) -> Option<&mut Bucket> {
        self.buckets.get_mut(key)
    }

    /// Store a bucket on first sighting. An existing bucket is left alone.
    pub fn insert(&mut self, key: BucketKey, bucket: Bucket) -> &mut Bucket {
        self.buckets.entry(key).or_insert(bucket)
    }

    pub fn status(&self, key: &BucketKey) -> Option<BucketStatus> {
        self.buckets.get(key).map(|bucket| bucket.status)
    }

    /// Bucket keys currently whitelisted, sorted
    pub fn whitelist(&self) -> Vec<&BucketKey> {
        self.keys_with(BucketStatus::Whitelisted)
    }

    /// Bucket keys currently blacklisted, sorted
    pub fn blacklist(&self) -> Vec<&BucketKey> {
        self.keys_with(BucketStatus::Blacklisted)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn keys_with(&self, status: BucketStatus) -> Vec<&BucketKey> {
        let mut keys: Vec<&BucketKey> = self
            .buckets
            .iter()
            .filter(|(_, bucket)| bucket.status == status)
            .map(|(key, _)| key)
            .collect();
        keys.sort();
        keys
    }
}
