// src/extract/mod.rs
// =============================================================================
// Everything the crawler pulls out of a fetched page.
//
// Submodules:
// - normalize: canonical form of a URL (query and fragment removed)
// - links: same-host links found in <a href> anchors
// - emails: email-like strings found anywhere in the body
//
// All three are plain synchronous functions with no shared state, so they can
// be called from any worker without locking.
// =============================================================================

mod emails;
mod links;
mod normalize;

pub use emails::extract_emails;
pub use links::extract_links;
pub use normalize::normalize;
