//! RSS 0.9x / 1.0 (RDF) / 2.0 translation into the canonical model.

use super::dates::parse_date;
use super::extensions::{dublin_core, itunes_feed, itunes_image, itunes_item};
use super::namespaces::{ATOM, CONTENT, MEDIA, RSS_090};
use super::xml::Element;
use crate::domain::entities::{
    DublinCoreExtension, Enclosure, Feed, Image, Item, ItunesFeedExtension, Person,
};
use crate::error::FeedError;

/// Translates an `<rss>` or `<rdf:RDF>` root element.
///
/// RSS 1.0 places its elements in the RSS 1.0 namespace and its items next
/// to (not inside) the channel; both layouts are handled.
///
/// # Errors
///
/// Returns [`FeedError::Parse`] when the document has no `channel`.
pub fn translate(root: &Element) -> Result<Feed, FeedError> {
    let channel = root
        .children()
        .find(|c| c.name == "channel")
        .ok_or_else(|| FeedError::Parse("RSS document has no <channel>".to_string()))?;

    // RDF documents put their elements in the RSS 0.90 or 1.0 namespace.
    let base = channel.namespace.as_deref();
    let version = if root.name != "RDF" {
        root.attr("version").unwrap_or("2.0").to_string()
    } else if base.is_some_and(|ns| ns.eq_ignore_ascii_case(RSS_090)) {
        "0.90".to_string()
    } else {
        "1.0".to_string()
    };

    let items = channel
        .children_named(base, "item")
        .chain(root.children_named(base, "item"))
        .map(|item| translate_item(item, base))
        .collect();

    let itunes = itunes_feed(channel);
    let dc = dublin_core(channel);
    let text = |name: &str| channel.child_text(base, name);

    let updated = text("lastBuildDate").or_else(|| first(&dc, |d| &d.date));
    let published = text("pubDate").or_else(|| first(&dc, |d| &d.date));

    Ok(Feed {
        title: text("title").or_else(|| first(&dc, |d| &d.title)),
        description: text("description")
            .or_else(|| itunes.as_ref().and_then(|i| i.summary.clone())),
        link: text("link"),
        feed_link: self_link(channel),
        updated_parsed: updated.as_deref().and_then(parse_date),
        updated,
        published_parsed: published.as_deref().and_then(parse_date),
        published: published.unwrap_or_default(),
        author: feed_author(channel, base, itunes.as_ref(), dc.as_ref()),
        language: text("language").or_else(|| first(&dc, |d| &d.language)),
        image: channel_image(channel, base)
            .and_then(|image| image.url)
            .or_else(|| itunes.as_ref().and_then(|i| i.image.clone())),
        copyright: text("copyright").or_else(|| first(&dc, |d| &d.rights)),
        generator: text("generator"),
        categories: feed_categories(channel, base, itunes.as_ref(), dc.as_ref()),
        items,
        feed_type: "rss".to_string(),
        feed_version: version,
        itunes_ext: itunes,
        dc_ext: dc,
    })
}

fn translate_item(item: &Element, base: Option<&str>) -> Item {
    let itunes = itunes_item(item);
    let dc = dublin_core(item);
    let text = |name: &str| item.child_text(base, name);

    let published = text("pubDate").or_else(|| first(&dc, |d| &d.date));
    let updated = item.child_text(Some(ATOM), "updated");

    let author = text("author")
        .and_then(|raw| Person::parse(&raw))
        .or_else(|| {
            itunes
                .as_ref()
                .and_then(|i| i.author.as_deref())
                .map(Person::named)
        })
        .or_else(|| dc_person(dc.as_ref()));

    let mut categories = item.children_text(base, "category");
    if categories.is_empty()
        && let Some(dc) = &dc
    {
        categories = dc.subject.clone();
    }

    Item {
        title: text("title").or_else(|| first(&dc, |d| &d.title)),
        description: text("description")
            .or_else(|| itunes.as_ref().and_then(|i| i.summary.clone()))
            .or_else(|| first(&dc, |d| &d.description)),
        content: item.child_text(Some(CONTENT), "encoded"),
        link: text("link"),
        updated_parsed: updated.as_deref().and_then(parse_date),
        updated,
        published_parsed: published.as_deref().and_then(parse_date),
        published,
        author,
        guid: text("guid"),
        image: itunes_image(item).or_else(|| media_image(item)),
        categories,
        enclosures: item
            .children_named(base, "enclosure")
            .map(|e| Enclosure {
                url: e.attr("url").map(str::to_string),
                length: e.attr("length").map(str::to_string),
                media_type: e.attr("type").map(str::to_string),
            })
            .collect(),
        itunes_ext: itunes,
        dc_ext: dc,
    }
}

fn first(
    dc: &Option<DublinCoreExtension>,
    field: impl Fn(&DublinCoreExtension) -> &Vec<String>,
) -> Option<String> {
    dc.as_ref().and_then(|d| field(d).first().cloned())
}

fn self_link(channel: &Element) -> Option<String> {
    channel
        .children_named(Some(ATOM), "link")
        .find(|link| link.attr("rel") == Some("self"))
        .and_then(|link| link.attr("href"))
        .map(str::to_string)
}

fn channel_image(channel: &Element, base: Option<&str>) -> Option<Image> {
    let image = channel.child(base, "image")?;
    Some(Image {
        url: image.child_text(base, "url"),
        title: image.child_text(base, "title"),
    })
}

fn media_image(item: &Element) -> Option<String> {
    item.child(Some(MEDIA), "thumbnail")
        .and_then(|thumb| thumb.attr("url"))
        .or_else(|| {
            item.children_named(Some(MEDIA), "content")
                .find(|c| c.attr("medium") == Some("image"))
                .and_then(|c| c.attr("url"))
        })
        .map(str::to_string)
}

fn feed_author(
    channel: &Element,
    base: Option<&str>,
    itunes: Option<&ItunesFeedExtension>,
    dc: Option<&DublinCoreExtension>,
) -> Option<Person> {
    channel
        .child_text(base, "managingEditor")
        .or_else(|| channel.child_text(base, "webMaster"))
        .and_then(|raw| Person::parse(&raw))
        .or_else(|| itunes.and_then(|i| i.author.as_deref()).map(Person::named))
        .or_else(|| dc_person(dc))
}

fn dc_person(dc: Option<&DublinCoreExtension>) -> Option<Person> {
    let dc = dc?;
    dc.author
        .first()
        .or_else(|| dc.creator.first())
        .and_then(|raw| Person::parse(raw))
}

fn feed_categories(
    channel: &Element,
    base: Option<&str>,
    itunes: Option<&ItunesFeedExtension>,
    dc: Option<&DublinCoreExtension>,
) -> Vec<String> {
    let categories = channel.children_text(base, "category");
    if !categories.is_empty() {
        return categories;
    }

    let itunes_categories: Vec<String> = itunes
        .map(|i| i.categories.iter().filter_map(|c| c.text.clone()).collect())
        .unwrap_or_default();
    if !itunes_categories.is_empty() {
        return itunes_categories;
    }

    dc.map(|d| d.subject.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::feed::xml::parse_document;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn translate_str(doc: &str) -> Feed {
        translate(&parse_document(doc.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn test_rss2_channel_fields() {
        let feed = translate_str(
            r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
            <channel>
                <title>Example</title>
                <link>https://example.com/</link>
                <atom:link href="https://example.com/feed.xml" rel="self"/>
                <description>All about examples</description>
                <language>en-us</language>
                <copyright>2024 Example</copyright>
                <generator>hand</generator>
                <managingEditor>editor@example.com (Ed Itor)</managingEditor>
                <lastBuildDate>Tue, 10 Jun 2003 09:41:01 GMT</lastBuildDate>
                <pubDate>Tue, 10 Jun 2003 04:00:00 GMT</pubDate>
                <image><url>https://example.com/logo.png</url><title>Logo</title></image>
                <category>one</category>
                <category>two</category>
            </channel>
            </rss>"#,
        );

        assert_eq!(feed.title.as_deref(), Some("Example"));
        assert_eq!(feed.link.as_deref(), Some("https://example.com/"));
        assert_eq!(
            feed.feed_link.as_deref(),
            Some("https://example.com/feed.xml")
        );
        assert_eq!(feed.description.as_deref(), Some("All about examples"));
        assert_eq!(feed.language.as_deref(), Some("en-us"));
        assert_eq!(feed.copyright.as_deref(), Some("2024 Example"));
        assert_eq!(feed.generator.as_deref(), Some("hand"));
        assert_eq!(feed.image.as_deref(), Some("https://example.com/logo.png"));
        assert_eq!(feed.categories, vec!["one", "two"]);
        assert_eq!(feed.published, "Tue, 10 Jun 2003 04:00:00 GMT");
        assert_eq!(
            feed.published_parsed,
            Some(Utc.with_ymd_and_hms(2003, 6, 10, 4, 0, 0).unwrap())
        );
        assert_eq!(
            feed.updated_parsed,
            Some(Utc.with_ymd_and_hms(2003, 6, 10, 9, 41, 1).unwrap())
        );
        assert_eq!(
            feed.author,
            Some(Person {
                name: Some("Ed Itor".into()),
                email: Some("editor@example.com".into()),
            })
        );
        assert_eq!(feed.feed_type, "rss");
        assert_eq!(feed.feed_version, "2.0");
        assert!(feed.itunes_ext.is_none());
        assert!(feed.dc_ext.is_none());
    }

    #[test]
    fn test_rss2_items_keep_order_and_enclosures() {
        let feed = translate_str(
            r#"<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
            <channel>
                <title>Ordered</title>
                <item>
                    <title>First</title>
                    <guid>1</guid>
                    <content:encoded><![CDATA[<p>Body</p>]]></content:encoded>
                    <enclosure url="https://example.com/1.mp3" length="123" type="audio/mpeg"/>
                    <enclosure url="https://example.com/1.ogg" length="99" type="audio/ogg"/>
                </item>
                <item><title>Second</title><guid>2</guid><category>b</category><category>a</category></item>
                <item><title>Third</title><guid>3</guid></item>
            </channel>
            </rss>"#,
        );

        let titles: Vec<_> = feed.items.iter().map(|i| i.title.as_deref()).collect();
        assert_eq!(titles, vec![Some("First"), Some("Second"), Some("Third")]);

        let first = &feed.items[0];
        assert_eq!(first.content.as_deref(), Some("<p>Body</p>"));
        assert_eq!(first.enclosures.len(), 2);
        assert_eq!(
            first.enclosures[0],
            Enclosure {
                url: Some("https://example.com/1.mp3".into()),
                length: Some("123".into()),
                media_type: Some("audio/mpeg".into()),
            }
        );
        assert_eq!(first.enclosures[1].media_type.as_deref(), Some("audio/ogg"));
        assert_eq!(feed.items[1].categories, vec!["b", "a"]);
        assert_eq!(feed.published, "");
        assert_eq!(feed.published_parsed, None);
    }

    #[test]
    fn test_rss_falls_back_to_extensions() {
        let feed = translate_str(
            r#"<rss version="2.0"
                xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd"
                xmlns:dc="http://purl.org/dc/elements/1.1/">
            <channel>
                <dc:title>DC Title</dc:title>
                <dc:date>2024-01-02T03:04:05Z</dc:date>
                <itunes:summary>Podcast summary</itunes:summary>
                <itunes:author>Host Name</itunes:author>
                <itunes:image href="https://example.com/cover.jpg"/>
                <itunes:category text="Technology"/>
                <item>
                    <dc:creator>Writer</dc:creator>
                    <dc:subject>x</dc:subject>
                    <itunes:image href="https://example.com/ep.jpg"/>
                </item>
            </channel>
            </rss>"#,
        );

        assert_eq!(feed.title.as_deref(), Some("DC Title"));
        assert_eq!(feed.description.as_deref(), Some("Podcast summary"));
        assert_eq!(feed.author, Some(Person::named("Host Name")));
        assert_eq!(feed.image.as_deref(), Some("https://example.com/cover.jpg"));
        assert_eq!(feed.categories, vec!["Technology"]);
        assert_eq!(feed.published, "2024-01-02T03:04:05Z");
        assert!(feed.published_parsed.is_some());

        let item = &feed.items[0];
        assert_eq!(item.author, Some(Person::named("Writer")));
        assert_eq!(item.categories, vec!["x"]);
        assert_eq!(item.image.as_deref(), Some("https://example.com/ep.jpg"));
        assert!(item.itunes_ext.is_some());
    }

    #[test]
    fn test_rss1_rdf_layout() {
        let feed = translate_str(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                    xmlns="http://purl.org/rss/1.0/">
                <channel rdf:about="https://example.com/">
                    <title>RDF Feed</title>
                    <link>https://example.com/</link>
                </channel>
                <item rdf:about="https://example.com/1"><title>One</title></item>
                <item rdf:about="https://example.com/2"><title>Two</title></item>
            </rdf:RDF>"#,
        );

        assert_eq!(feed.title.as_deref(), Some("RDF Feed"));
        assert_eq!(feed.feed_version, "1.0");
        assert_eq!(feed.items.len(), 2);
        assert_eq!(feed.items[1].title.as_deref(), Some("Two"));
    }

    #[test]
    fn test_rss090_rdf_layout() {
        let feed = translate_str(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
                    xmlns="http://my.netscape.com/rdf/simple/0.9/">
                <channel>
                    <title>Netscape Era</title>
                    <link>https://example.com/</link>
                    <description>Old school</description>
                </channel>
                <item><title>Only</title><link>https://example.com/only</link></item>
            </rdf:RDF>"#,
        );

        assert_eq!(feed.title.as_deref(), Some("Netscape Era"));
        assert_eq!(feed.description.as_deref(), Some("Old school"));
        assert_eq!(feed.feed_type, "rss");
        assert_eq!(feed.feed_version, "0.90");
        assert_eq!(feed.items.len(), 1);
        assert_eq!(
            feed.items[0].link.as_deref(),
            Some("https://example.com/only")
        );
    }

    #[test]
    fn test_description_keeps_text_around_cdata() {
        let feed = translate_str(
            "<rss version=\"2.0\"><channel><title>T</title>\
             <item><description>Intro <![CDATA[<b>bold</b>]]> outro</description></item>\
             </channel></rss>",
        );

        assert_eq!(
            feed.items[0].description.as_deref(),
            Some("Intro <b>bold</b> outro")
        );
    }

    #[test]
    fn test_missing_channel_is_parse_error() {
        let root = parse_document(b"<rss version=\"2.0\"></rss>").unwrap();
        assert!(matches!(translate(&root), Err(FeedError::Parse(_))));
    }
}
