//! Adapters to the outside world.
//!
//! - [`feed`] - HTTP feed fetching and RSS/Atom translation

pub mod feed;
