// src/dedup/classifier.rs
// =============================================================================
// The duplicate classifier: decides whether a page adds anything over the
// page its bucket was first seen with.
//
// How it works:
// 1. Fetch the candidate's content (no content -> reject)
// 2. Tokenize its visible text and build a phrase profile
// 3. Unseen bucket: the profile becomes the bucket's fingerprint, accept
// 4. Otherwise compare against the stored fingerprint:
//    - nothing in common          -> distinct hit, accept
//    - identical and an index page alias -> accept, counters untouched
//    - similarity > threshold     -> similar hit, reject
//    - anything in between        -> distinct hit, accept
// 5. Enough distinct hits (with few similar hits) whitelists the bucket;
//    enough similar hits blacklists it. Both are final.
//
// Under the default first-wins policy the stored fingerprint never changes
// after step 3.
// =============================================================================

use super::profile::PhraseProfile;
use super::store::{Bucket, BucketStatus, FingerprintStore};
use crate::config::{DuplicateConfig, ProfilePolicy};
use crate::crawl::Corpus;
use crate::extract::page_tokens;
use crate::filter::BucketKey;
use crate::page::{RejectReason, Verdict};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct DuplicateClassifier {
    config: DuplicateConfig,
}

impl DuplicateClassifier {
    pub fn new(config: DuplicateConfig) -> Self {
        Self { config }
    }

    /// Fetch `url` through `corpus` and judge it against `bucket`'s
    /// fingerprint, updating the bucket's counters and status
    pub fn evaluate(
        &self,
        bucket: &BucketKey,
        url: &str,
        corpus: &dyn Corpus,
        store: &mut FingerprintStore,
    ) -> Verdict {
        // A resolved bucket needs no further evidence
        match store.status(bucket) {
            Some(BucketStatus::Whitelisted) => return Verdict::Accept,
            Some(BucketStatus::Blacklisted) => {
                return Verdict::Reject(RejectReason::Blacklisted)
            }
            _ => {}
        }

        let Some(tokens) = page_tokens(&corpus.fetch(url)) else {
            debug!("No content for {}, cannot fingerprint", url);
            return Verdict::Reject(RejectReason::NoContent);
        };
        let profile = PhraseProfile::from_tokens(&tokens, self.config.ngram_size);

        let Some(entry) = store.get_mut(bucket) else {
            debug!(
                "New bucket {} fingerprinted from {} ({} phrases)",
                bucket,
                url,
                profile.len()
            );
            store.insert(bucket.clone(), Bucket::new(profile, url));
            return Verdict::Accept;
        };

        let verdict = self.judge(bucket, url, &profile, entry);

        if let ProfilePolicy::Blend(weight) = self.config.profile_policy {
            entry.profile.blend(&profile, weight);
        }

        verdict
    }

    fn judge(
        &self,
        key: &BucketKey,
        url: &str,
        profile: &PhraseProfile,
        bucket: &mut Bucket,
    ) -> Verdict {
        // Nothing shared, or two empty profiles: no evidence is never a reason to reject
        let similarity = match bucket.profile.similarity(profile) {
            Some(similarity) if similarity > 0.0 => similarity,
            _ => {
                self.record_distinct(key, bucket);
                return Verdict::Accept;
            }
        };

        // matches == largest, the only way to reach 1.0
        if similarity >= 1.0 && self.is_index_alias(url, &bucket.representative_url) {
            debug!(
                "{} is an index alias of {}",
                url, bucket.representative_url
            );
            return Verdict::Accept;
        }

        if similarity > self.config.similarity_threshold {
            bucket.similar_hits += 1;
            info!("{} --Duplication score: {:.3}", url, similarity);

            if bucket.similar_hits >= self.config.blacklist_after {
                bucket.status = BucketStatus::Blacklisted;
                info!(
                    "Bucket {} blacklisted after {} near-duplicates",
                    key, bucket.similar_hits
                );
            }
            return Verdict::Reject(RejectReason::NearDuplicate { similarity });
        }

        self.record_distinct(key, bucket);
        Verdict::Accept
    }

    fn record_distinct(&self, key: &BucketKey, bucket: &mut Bucket) {
        bucket.distinct_hits += 1;

        if bucket.status == BucketStatus::Undetermined
            && bucket.distinct_hits >= self.config.promote_after
            && bucket.similar_hits <= self.config.max_similar_for_promotion
        {
            bucket.status = BucketStatus::Whitelisted;
            info!(
                "Bucket {} whitelisted after {} distinct pages",
                key, bucket.distinct_hits
            );
        }
    }

    // Same resource under a different index name, e.g. /docs/ vs /docs/index.php
    fn is_index_alias(&self, url: &str, representative_url: &str) -> bool {
        let last_segment = url.rsplit('/').next().unwrap_or_default();
        self.config.index_markers.iter().any(|marker| {
            last_segment.contains(marker.as_str()) || representative_url.contains(marker.as_str())
        })
    }
}
