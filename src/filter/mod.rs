// src/filter/mod.rs
// =============================================================================
// URL-level trap filtering.
//
// Submodules:
// - bucket: the path bucket a URL belongs to
// - shape: heuristics over scheme, extension, length, query and path
// =============================================================================

mod bucket;
mod shape;

pub use bucket::BucketKey;
pub use shape::{ShapeFilter, ShapeVerdict};
