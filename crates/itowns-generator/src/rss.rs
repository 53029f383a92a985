//! RSS feed generation.
//!
//! Generates the RSS 2.0 feed of published blog posts.

use std::{collections::BTreeMap, io::Write};

use chrono::{DateTime, Datelike, Utc};
use itowns_core::{BlogPost, Config, Entry, filter_drafts, sort_by_date_desc};
use rss::{
    Category, Channel, ChannelBuilder, GuidBuilder, Item, ItemBuilder,
    extension::{Extension, ExtensionMap},
};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// RSS generation errors.
#[derive(Debug, Error)]
pub enum RssError {
    /// The site origin is not an absolute URL.
    #[error("invalid site URL `{url}`: {source}")]
    InvalidSite {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// An item link could not be resolved against the site origin.
    #[error("cannot build link for `{slug}`: {source}")]
    Link {
        slug: String,
        #[source]
        source: url::ParseError,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for RSS operations.
pub type Result<T> = std::result::Result<T, RssError>;

/// RSS feed generator.
#[derive(Debug)]
pub struct RssGenerator {
    config: Config,
}

impl RssGenerator {
    /// Create a new RSS generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Generate RSS feed XML from blog entries, stamped with the current time.
    ///
    /// `site` is the origin supplied by the build context, if any.
    pub fn generate(&self, posts: &[Entry<BlogPost>], site: Option<&str>) -> Result<String> {
        self.generate_at(posts, site, Utc::now())
    }

    /// Generate RSS feed XML as of `now`.
    pub fn generate_at(
        &self,
        posts: &[Entry<BlogPost>],
        site: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String> {
        Ok(self.channel(posts, site, now)?.to_string())
    }

    /// Build the feed channel: drafts removed, newest first.
    pub fn channel(
        &self,
        posts: &[Entry<BlogPost>],
        site: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Channel> {
        let origin = self.config.site.origin(site);
        let origin_url = Url::parse(origin).map_err(|source| RssError::InvalidSite {
            url: origin.to_string(),
            source,
        })?;

        let published = sort_by_date_desc(filter_drafts(posts.iter().collect()));
        let limit = self.config.rss.limit.unwrap_or(usize::MAX);

        debug!(
            total = posts.len(),
            published = published.len(),
            limit = ?self.config.rss.limit,
            site = origin,
            "generating RSS feed"
        );

        let items = published
            .into_iter()
            .take(limit)
            .map(|entry| self.post_to_item(&origin_url, entry))
            .collect::<Result<Vec<Item>>>()?;

        let site = &self.config.site;
        let contact = site.contact_line();

        let channel = ChannelBuilder::default()
            .title(&site.title)
            .link(origin_url.as_str())
            .description(&site.description)
            .language(Some(site.language.clone()))
            .copyright(Some(format!(
                "© {} {}. {}.",
                now.year(),
                site.author,
                site.license
            )))
            .managing_editor(Some(contact.clone()))
            .webmaster(Some(contact))
            .ttl(Some(self.config.rss.ttl.to_string()))
            .last_build_date(Some(now.to_rfc2822()))
            .items(items)
            .build();

        Ok(channel)
    }

    /// Convert a blog entry to an RSS item.
    fn post_to_item(&self, origin: &Url, entry: &Entry<BlogPost>) -> Result<Item> {
        let post = &entry.data;
        let url = origin
            .join(&entry.url_path())
            .map_err(|source| RssError::Link {
                slug: entry.slug.clone(),
                source,
            })?
            .to_string();

        let guid = GuidBuilder::default().value(&url).permalink(true).build();

        let mut builder = ItemBuilder::default();
        builder.title(Some(post.title.clone()));
        builder.link(Some(url));
        builder.guid(Some(guid));
        builder.pub_date(Some(post.publish_date.to_rfc2822()));
        builder.description(Some(post.summary.clone()));
        builder.author(Some(
            post.author
                .clone()
                .unwrap_or_else(|| self.config.site.author.clone()),
        ));

        let categories: Vec<_> = post
            .tags
            .iter()
            .map(|tag| Category {
                name: tag.clone(),
                domain: None,
            })
            .collect();
        builder.categories(categories);

        builder.extensions(audience_extension(post));

        Ok(builder.build())
    }

    /// Write RSS feed to a writer.
    pub fn write_to<W: Write>(
        &self,
        posts: &[Entry<BlogPost>],
        site: Option<&str>,
        writer: &mut W,
    ) -> Result<()> {
        let xml = self.generate(posts, site)?;
        writer.write_all(xml.as_bytes())?;
        Ok(())
    }
}

/// Un-namespaced `<audience>` element carrying the post's readership.
fn audience_extension(post: &BlogPost) -> ExtensionMap {
    let audience = Extension {
        name: "audience".to_string(),
        value: Some(post.audience.to_string()),
        ..Default::default()
    };

    let mut elements = BTreeMap::new();
    elements.insert("audience".to_string(), vec![audience]);

    let mut map = ExtensionMap::new();
    map.insert(String::new(), elements);
    map
}
