//! Podcast (iTunes) and Dublin Core extension entities.

use serde::Serialize;

/// A podcast category. Subcategories nest to arbitrary depth.
///
/// Subcategories are owned by their parent, so a category tree can never
/// contain a cycle.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ItunesCategory {
    pub text: Option<String>,
    pub subcategory: Vec<ItunesCategory>,
}

impl ItunesCategory {
    /// Number of category levels, counting this one.
    pub fn depth(&self) -> usize {
        1 + self
            .subcategory
            .iter()
            .map(ItunesCategory::depth)
            .max()
            .unwrap_or(0)
    }
}

/// Owner of a podcast feed.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ItunesOwner {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Podcast metadata attached to a feed.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ItunesFeedExtension {
    pub author: Option<String>,
    pub block: Option<String>,
    pub explicit: Option<String>,
    pub keywords: Option<String>,
    pub subtitle: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub complete: Option<String>,
    #[serde(rename = "type")]
    pub feed_type: Option<String>,
    pub categories: Vec<ItunesCategory>,
    pub owner: Option<ItunesOwner>,
}

/// Podcast metadata attached to an item.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ItunesItemExtension {
    pub author: Option<String>,
    pub block: Option<String>,
    pub duration: Option<String>,
    pub explicit: Option<String>,
    pub keywords: Option<String>,
    pub subtitle: Option<String>,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub is_closed_captioned: Option<String>,
    pub episode: Option<String>,
    pub season: Option<String>,
    pub order: Option<String>,
    pub episode_type: Option<String>,
}

/// Dublin Core metadata.
///
/// Every element may repeat in a source document, so each field keeps all
/// occurrences in document order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DublinCoreExtension {
    pub title: Vec<String>,
    pub creator: Vec<String>,
    pub author: Vec<String>,
    pub subject: Vec<String>,
    pub description: Vec<String>,
    pub publisher: Vec<String>,
    pub contributor: Vec<String>,
    pub date: Vec<String>,
    #[serde(rename = "type")]
    pub dc_type: Vec<String>,
    pub format: Vec<String>,
    pub identifier: Vec<String>,
    pub source: Vec<String>,
    pub language: Vec<String>,
    pub relation: Vec<String>,
    pub coverage: Vec<String>,
    pub rights: Vec<String>,
}

impl DublinCoreExtension {
    /// Mutable slot for a Dublin Core element by its local name.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut Vec<String>> {
        let slot = match name {
            "title" => &mut self.title,
            "creator" => &mut self.creator,
            "author" => &mut self.author,
            "subject" => &mut self.subject,
            "description" => &mut self.description,
            "publisher" => &mut self.publisher,
            "contributor" => &mut self.contributor,
            "date" => &mut self.date,
            "type" => &mut self.dc_type,
            "format" => &mut self.format,
            "identifier" => &mut self.identifier,
            "source" => &mut self.source,
            "language" => &mut self.language,
            "relation" => &mut self.relation,
            "coverage" => &mut self.coverage,
            "rights" => &mut self.rights,
            _ => return None,
        };
        Some(slot)
    }
}
