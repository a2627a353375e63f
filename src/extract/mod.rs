// src/extract/mod.rs
// =============================================================================
// Everything that reads page content.
//
// Submodules:
// - links: anchor targets resolved to absolute URLs
// - text: visible text and the lowercase token stream built from it
// =============================================================================

mod links;
mod text;

pub use links::extract_links;
pub use text::{page_tokens, tokenize, visible_text};
