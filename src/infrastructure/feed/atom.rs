//! Atom 1.0 (and legacy 0.3) translation into the canonical model.

use super::dates::parse_date;
use super::extensions::{dublin_core, itunes_feed, itunes_image, itunes_item};
use super::namespaces::{ATOM, MEDIA};
use super::xml::Element;
use crate::domain::entities::{Enclosure, Feed, Item, Person};

/// Translates a `<feed>` root element.
///
/// The root's own namespace is used for every Atom element, which covers
/// both Atom 1.0 and Atom 0.3 documents.
pub fn translate(root: &Element) -> Feed {
    let base = root.namespace.as_deref();
    let version = if root.namespace.as_deref() == Some(ATOM) {
        "1.0"
    } else {
        root.attr("version").unwrap_or("0.3")
    };
    let text = |name: &str| text_construct(root, base, name);

    let updated = text("updated").or_else(|| text("modified"));
    let published = text("published").or_else(|| text("issued"));

    let itunes = itunes_feed(root);
    let dc = dublin_core(root);

    Feed {
        title: text("title"),
        description: text("subtitle").or_else(|| text("tagline")),
        link: alternate_link(root, base),
        feed_link: link_with_rel(root, base, "self"),
        updated_parsed: updated.as_deref().and_then(parse_date),
        updated,
        published_parsed: published.as_deref().and_then(parse_date),
        published: published.unwrap_or_default(),
        author: first_author(root, base),
        language: root.attr("xml:lang").map(str::to_string),
        image: text("logo").or_else(|| text("icon")),
        copyright: text("rights").or_else(|| text("copyright")),
        generator: text("generator"),
        categories: categories(root, base),
        items: root
            .children_named(base, "entry")
            .map(|entry| translate_entry(entry, base))
            .collect(),
        feed_type: "atom".to_string(),
        feed_version: version.to_string(),
        itunes_ext: itunes,
        dc_ext: dc,
    }
}

fn translate_entry(entry: &Element, base: Option<&str>) -> Item {
    let text = |name: &str| text_construct(entry, base, name);

    let updated = text("updated").or_else(|| text("modified"));
    let published = text("published").or_else(|| text("issued"));

    Item {
        title: text("title"),
        description: text("summary"),
        content: text("content"),
        link: alternate_link(entry, base),
        updated_parsed: updated.as_deref().and_then(parse_date),
        updated,
        published_parsed: published.as_deref().and_then(parse_date),
        published,
        author: first_author(entry, base),
        guid: text("id"),
        image: itunes_image(entry).or_else(|| {
            entry
                .child(Some(MEDIA), "thumbnail")
                .and_then(|thumb| thumb.attr("url"))
                .map(str::to_string)
        }),
        categories: categories(entry, base),
        enclosures: entry
            .children_named(base, "link")
            .filter(|link| link.attr("rel") == Some("enclosure"))
            .map(|link| Enclosure {
                url: link.attr("href").map(str::to_string),
                length: link.attr("length").map(str::to_string),
                media_type: link.attr("type").map(str::to_string),
            })
            .collect(),
        itunes_ext: itunes_item(entry),
        dc_ext: dublin_core(entry),
    }
}

/// Value of an Atom text construct.
///
/// `type="xhtml"` yields the markup inside the wrapping `div`, other types
/// their character data.
fn text_construct(parent: &Element, base: Option<&str>, name: &str) -> Option<String> {
    let element = parent.child(base, name)?;
    if element.attr("type") == Some("xhtml") {
        let mut children = element.children();
        return match (children.next(), children.next()) {
            (Some(div), None) if div.name == "div" => div.inner_xml(),
            _ => element.inner_xml(),
        };
    }

    if element.has_children() {
        element.inner_xml()
    } else {
        element.trimmed_text()
    }
}

/// `rel="alternate"` link, or the first link without a `rel`.
fn alternate_link(parent: &Element, base: Option<&str>) -> Option<String> {
    link_with_rel(parent, base, "alternate").or_else(|| {
        parent
            .children_named(base, "link")
            .find(|link| link.attr("rel").is_none())
            .and_then(|link| link.attr("href"))
            .map(str::to_string)
    })
}

fn link_with_rel(parent: &Element, base: Option<&str>, rel: &str) -> Option<String> {
    parent
        .children_named(base, "link")
        .find(|link| link.attr("rel") == Some(rel))
        .and_then(|link| link.attr("href"))
        .map(str::to_string)
}

fn first_author(parent: &Element, base: Option<&str>) -> Option<Person> {
    let author = parent.child(base, "author")?;
    Some(Person {
        name: author.child_text(base, "name"),
        email: author.child_text(base, "email"),
    })
}

fn categories(parent: &Element, base: Option<&str>) -> Vec<String> {
    parent
        .children_named(base, "category")
        .filter_map(|c| c.attr("term").or_else(|| c.attr("label")))
        .map(str::to_string)
        .collect()
}
