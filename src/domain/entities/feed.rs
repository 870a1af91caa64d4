//! Canonical feed and item entities.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::extensions::{DublinCoreExtension, ItunesFeedExtension, ItunesItemExtension};

/// A parsed web feed, whatever its wire format.
///
/// RSS channels and Atom feeds are both translated into this shape. The
/// serialized (camelCase) attribute names are the field names exposed by the
/// `Feed` GraphQL type, so every field here is addressable by the schema.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Feed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: Option<String>,
    pub feed_link: Option<String>,
    pub updated: Option<String>,
    pub updated_parsed: Option<DateTime<Utc>>,
    /// Raw publication date. Empty when the source carries none.
    pub published: String,
    pub published_parsed: Option<DateTime<Utc>>,
    pub author: Option<Person>,
    pub language: Option<String>,
    /// URL of the feed artwork.
    pub image: Option<String>,
    pub copyright: Option<String>,
    pub generator: Option<String>,
    pub categories: Vec<String>,
    pub items: Vec<Item>,
    pub feed_type: String,
    pub feed_version: String,
    pub itunes_ext: Option<ItunesFeedExtension>,
    pub dc_ext: Option<DublinCoreExtension>,
}

/// One entry of a feed (`rss/channel/item` or `feed/entry`).
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub link: Option<String>,
    pub updated: Option<String>,
    pub updated_parsed: Option<DateTime<Utc>>,
    pub published: Option<String>,
    pub published_parsed: Option<DateTime<Utc>>,
    pub author: Option<Person>,
    pub guid: Option<String>,
    pub image: Option<String>,
    pub categories: Vec<String>,
    pub enclosures: Vec<Enclosure>,
    pub itunes_ext: Option<ItunesItemExtension>,
    pub dc_ext: Option<DublinCoreExtension>,
}

/// An individual named in a feed, e.g. an author.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Person {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Person {
    /// Parses the free-form author notations found in feeds.
    ///
    /// Accepts `email (Name)`, `Name <email>`, a bare email or a bare name.
    /// Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let (Some(open), true) = (raw.find('('), raw.ends_with(')')) {
            let email = non_empty(&raw[..open]);
            let name = non_empty(&raw[open + 1..raw.len() - 1]);
            return Some(Self { name, email });
        }

        if let (Some(open), true) = (raw.find('<'), raw.ends_with('>')) {
            let name = non_empty(&raw[..open]);
            let email = non_empty(&raw[open + 1..raw.len() - 1]);
            return Some(Self { name, email });
        }

        if raw.contains('@') && !raw.contains(char::is_whitespace) {
            return Some(Self {
                name: None,
                email: Some(raw.to_string()),
            });
        }

        Some(Self {
            name: Some(raw.to_string()),
            email: None,
        })
    }

    /// A person known only by name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: None,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Artwork reference for a feed or item.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Image {
    pub url: Option<String>,
    pub title: Option<String>,
}

/// A media file attached to an item.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Enclosure {
    pub url: Option<String>,
    pub length: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_email_then_name() {
        let person = Person::parse("editor@example.com (Jane Doe)").unwrap();
        assert_eq!(person.name.as_deref(), Some("Jane Doe"));
        assert_eq!(person.email.as_deref(), Some("editor@example.com"));
    }

    #[test]
    fn test_person_name_then_email() {
        let person = Person::parse("Jane Doe <jane@example.com>").unwrap();
        assert_eq!(person.name.as_deref(), Some("Jane Doe"));
        assert_eq!(person.email.as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn test_person_bare_values() {
        assert_eq!(
            Person::parse("jane@example.com").unwrap().email.as_deref(),
            Some("jane@example.com")
        );
        assert_eq!(Person::parse("Jane").unwrap(), Person::named("Jane"));
        assert!(Person::parse("   ").is_none());
    }

    #[test]
    fn test_serialized_names_are_camel_case() {
        let json = serde_json::to_value(Feed::default()).unwrap();
        assert!(json.get("feedLink").is_some());
        assert!(json.get("publishedParsed").is_some());
        assert!(json.get("itunesExt").is_some());
        assert_eq!(json["published"], "");

        let json = serde_json::to_value(Enclosure::default()).unwrap();
        assert!(json.get("type").is_some());
    }
}
