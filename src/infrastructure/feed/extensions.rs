//! iTunes and Dublin Core extension extraction.
//!
//! Both namespaces can appear in RSS and Atom documents alike, so these
//! helpers work on any channel, feed, item or entry element.

use super::namespaces::{DUBLIN_CORE, ITUNES};
use super::xml::Element;
use crate::domain::entities::{
    DublinCoreExtension, ItunesCategory, ItunesFeedExtension, ItunesItemExtension, ItunesOwner,
};

/// Podcast metadata of a feed, if any iTunes element is present.
pub fn itunes_feed(element: &Element) -> Option<ItunesFeedExtension> {
    if !has_namespace(element, ITUNES) {
        return None;
    }

    let text = |name: &str| element.child_text(Some(ITUNES), name);

    Some(ItunesFeedExtension {
        author: text("author"),
        block: text("block"),
        explicit: text("explicit"),
        keywords: text("keywords"),
        subtitle: text("subtitle"),
        summary: text("summary"),
        image: itunes_image(element),
        complete: text("complete"),
        feed_type: text("type"),
        categories: element
            .children_named(Some(ITUNES), "category")
            .map(itunes_category)
            .collect(),
        owner: element.child(Some(ITUNES), "owner").map(|owner| ItunesOwner {
            name: owner.child_text(Some(ITUNES), "name"),
            email: owner.child_text(Some(ITUNES), "email"),
        }),
    })
}

/// Podcast metadata of an item, if any iTunes element is present.
pub fn itunes_item(element: &Element) -> Option<ItunesItemExtension> {
    if !has_namespace(element, ITUNES) {
        return None;
    }

    let text = |name: &str| element.child_text(Some(ITUNES), name);

    Some(ItunesItemExtension {
        author: text("author"),
        block: text("block"),
        duration: text("duration"),
        explicit: text("explicit"),
        keywords: text("keywords"),
        subtitle: text("subtitle"),
        summary: text("summary"),
        image: itunes_image(element),
        is_closed_captioned: text("isClosedCaptioned"),
        episode: text("episode"),
        season: text("season"),
        order: text("order"),
        episode_type: text("episodeType"),
    })
}

/// `<itunes:image href="..."/>`, falling back to element text.
pub fn itunes_image(element: &Element) -> Option<String> {
    let image = element.child(Some(ITUNES), "image")?;
    image
        .attr("href")
        .map(str::to_string)
        .or_else(|| image.trimmed_text())
}

/// Builds a category and all its nested subcategories.
///
/// Recursion depth is bounded by the document nesting limit enforced while
/// parsing.
fn itunes_category(element: &Element) -> ItunesCategory {
    ItunesCategory {
        text: element.attr("text").map(str::to_string),
        subcategory: element
            .children_named(Some(ITUNES), "category")
            .map(itunes_category)
            .collect(),
    }
}

/// Dublin Core metadata, if any Dublin Core element is present.
///
/// Repeated elements are all kept, in document order.
pub fn dublin_core(element: &Element) -> Option<DublinCoreExtension> {
    if !has_namespace(element, DUBLIN_CORE) {
        return None;
    }

    let mut dc = DublinCoreExtension::default();
    for child in element.children().filter(|c| c.in_namespace(DUBLIN_CORE)) {
        if let (Some(slot), Some(text)) = (dc.field_mut(&child.name), child.trimmed_text()) {
            slot.push(text);
        }
    }

    Some(dc)
}

fn has_namespace(element: &Element, ns: &str) -> bool {
    element.children().any(|c| c.in_namespace(ns))
}
