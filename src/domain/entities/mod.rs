//! Canonical entities every feed is translated into.
//!
//! These are read-only projections of a parsed document: the parser builds
//! them once per request and nothing mutates them afterwards.
//!
//! # Entity Types
//!
//! - [`Feed`], [`Item`] - the feed and its entries
//! - [`Person`], [`Image`], [`Enclosure`] - shared leaf entities
//! - [`ItunesFeedExtension`], [`ItunesItemExtension`], [`ItunesCategory`],
//!   [`ItunesOwner`] - podcast metadata
//! - [`DublinCoreExtension`] - Dublin Core metadata

pub mod extensions;
pub mod feed;

pub use extensions::{
    DublinCoreExtension, ItunesCategory, ItunesFeedExtension, ItunesItemExtension, ItunesOwner,
};
pub use feed::{Enclosure, Feed, Image, Item, Person};
