// src/dedup/mod.rs
// =============================================================================
// Near-duplicate detection per path bucket.
//
// Submodules:
// - profile: phrase profiles (overlapping n-gram counts) and their comparison
// - store: buckets, their counters and whitelist/blacklist status
// - classifier: the accept/reject policy that drives the store
// =============================================================================

mod classifier;
mod profile;
mod store;

pub use classifier::DuplicateClassifier;
pub use profile::PhraseProfile;
pub use store::{Bucket, BucketStatus, FingerprintStore};
