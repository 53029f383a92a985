//! Content files, slugs and validated entries.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::{
    dates::{Dated, Draftable},
    error::{CoreError, Result},
    frontmatter::parse_frontmatter,
    record::CollectionRecord,
    schema::CollectionKind,
};

/// Source format of a content file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    /// Markdown content (.md, .markdown files).
    Markdown,
    /// Markdown with components (.mdx files).
    Mdx,
}

impl ContentFormat {
    /// Determine content format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "mdx" => Some(Self::Mdx),
            _ => None,
        }
    }
}

/// A content file located inside one collection directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPath {
    /// Original file path.
    pub path: PathBuf,

    /// URL-safe identifier, unique within the collection.
    pub slug: String,

    /// Source format based on extension.
    pub format: ContentFormat,
}

impl ContentPath {
    /// Derive the slug of a file from its path relative to the collection directory.
    ///
    /// - `hello-world.md` → `hello-world`
    /// - `2024/Release Notes.mdx` → `2024/release-notes`
    /// - `governance/index.md` → `governance`
    pub fn from_path(relative: &Path) -> Option<Self> {
        let format = ContentFormat::from_extension(relative.extension()?.to_str()?)?;

        let stem = relative.with_extension("");
        let mut segments: Vec<String> = stem
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .map(slugify)
            .filter(|s| !s.is_empty())
            .collect();

        if segments.len() > 1 && segments.last().is_some_and(|s| s == "index") {
            segments.pop();
        }

        if segments.is_empty() {
            return None;
        }

        Some(Self {
            path: relative.to_path_buf(),
            slug: segments.join("/"),
            format,
        })
    }
}

/// Turn one path segment into a URL-safe slug.
///
/// Lower-cases, keeps letters, digits, `-` and `_`, maps spaces to `-` and
/// drops everything else.
pub fn slugify(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// A validated record together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    pub collection: CollectionKind,

    /// URL-safe identifier, unique within the collection.
    pub slug: String,

    /// Source file path.
    pub path: PathBuf,

    /// Validated frontmatter.
    pub data: T,

    /// Content after the frontmatter block.
    pub body: String,
}

impl<T: CollectionRecord> Entry<T> {
    /// Split, parse and validate one content file.
    ///
    /// `relative` is the path inside the collection directory and determines
    /// the slug; `source` is what gets reported in errors.
    pub fn parse(content: &str, relative: &Path, source: &Path) -> Result<Self> {
        let content_path = ContentPath::from_path(relative).ok_or_else(|| {
            CoreError::frontmatter(source, "cannot derive a slug from this file name")
        })?;

        let (raw, body) = parse_frontmatter(content, source)?;
        let data = T::from_raw(&raw).map_err(|e| e.with_path(source))?;

        Ok(Self {
            collection: T::KIND,
            slug: content_path.slug,
            path: source.to_path_buf(),
            data,
            body,
        })
    }

    /// Site path of this entry, e.g. `/blog/hello-world/`.
    pub fn url_path(&self) -> String {
        format!("/{}/{}/", self.collection.name(), self.slug)
    }
}

impl<T: Dated> Dated for Entry<T> {
    fn publish_date(&self) -> DateTime<Utc> {
        self.data.publish_date()
    }
}

impl<T: Draftable> Draftable for Entry<T> {
    fn is_draft(&self) -> bool {
        self.data.is_draft()
    }
}
