//! Namespace URIs recognised by the translators.

pub const ATOM: &str = "http://www.w3.org/2005/Atom";
pub const ATOM_03: &str = "http://purl.org/atom/ns#";
pub const CONTENT: &str = "http://purl.org/rss/1.0/modules/content/";
pub const DUBLIN_CORE: &str = "http://purl.org/dc/elements/1.1/";
pub const ITUNES: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
pub const MEDIA: &str = "http://search.yahoo.com/mrss/";
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RSS_090: &str = "http://my.netscape.com/rdf/simple/0.9/";
