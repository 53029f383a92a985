//! Content collection and organization.
//!
//! Walks each collection directory, validates every file and gathers the
//! typed entries. A single invalid file fails the whole collection step, but
//! only after every file has been checked so all problems surface at once.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use itowns_core::{
    BlogPost, CaseStudy, CollectionRecord, ContentFormat, CoreError, Entry, GovernanceEntry,
    filter_drafts, sort_by_date_desc,
};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Directory traversal error.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// One or more content files were rejected.
    #[error("{} content file(s) failed validation:\n{}", .0.len(), render_errors(.0))]
    Invalid(Vec<CoreError>),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

fn render_errors(errors: &[CoreError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every validated entry of the site.
#[derive(Debug, Default)]
pub struct SiteContent {
    /// Blog posts, drafts included, in file name order.
    pub blog: Vec<Entry<BlogPost>>,

    /// Case studies in file name order.
    pub case_studies: Vec<Entry<CaseStudy>>,

    /// Governance pages in file name order.
    pub governance: Vec<Entry<GovernanceEntry>>,
}

impl SiteContent {
    /// Non-draft posts, newest first.
    pub fn published_posts(&self) -> Vec<&Entry<BlogPost>> {
        sort_by_date_desc(filter_drafts(self.blog.iter().collect()))
    }

    /// Published posts flagged as featured, newest first.
    pub fn featured_posts(&self) -> Vec<&Entry<BlogPost>> {
        self.published_posts()
            .into_iter()
            .filter(|entry| entry.data.featured)
            .collect()
    }

    /// Featured case studies, newest first.
    pub fn featured_case_studies(&self) -> Vec<&Entry<CaseStudy>> {
        sort_by_date_desc(self.case_studies.iter().collect())
            .into_iter()
            .filter(|entry| entry.data.featured)
            .collect()
    }

    /// Governance pages by `order`, unordered pages last, ties broken by title.
    pub fn governance_in_order(&self) -> Vec<&Entry<GovernanceEntry>> {
        let mut entries: Vec<_> = self.governance.iter().collect();
        entries.sort_by(|a, b| match (a.data.order, b.data.order) {
            (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.data.title.cmp(&b.data.title)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.data.title.cmp(&b.data.title),
        });
        entries
    }

    /// Number of draft posts.
    pub fn draft_count(&self) -> usize {
        self.blog.iter().filter(|entry| entry.data.draft).count()
    }
}

/// Content collector that walks collection directories and validates files.
#[derive(Debug)]
pub struct ContentCollector {
    content_dir: PathBuf,
}

impl ContentCollector {
    /// Create a new content collector rooted at `content_dir`.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// Collect and validate every collection.
    pub fn collect(&self) -> Result<SiteContent> {
        info!(dir = %self.content_dir.display(), "collecting content");

        if !self.content_dir.exists() {
            warn!(dir = %self.content_dir.display(), "content directory does not exist");
        }

        let mut errors = Vec::new();
        let content = SiteContent {
            blog: self.collect_collection(&mut errors)?,
            case_studies: self.collect_collection(&mut errors)?,
            governance: self.collect_collection(&mut errors)?,
        };

        if !errors.is_empty() {
            warn!(failed = errors.len(), "content validation failed");
            return Err(CollectorError::Invalid(errors));
        }

        info!(
            posts = content.blog.len(),
            drafts = content.draft_count(),
            case_studies = content.case_studies.len(),
            governance = content.governance.len(),
            "content collection complete"
        );

        Ok(content)
    }

    /// Collect one collection, pushing per-file failures onto `errors`.
    pub fn collect_collection<T: CollectionRecord>(
        &self,
        errors: &mut Vec<CoreError>,
    ) -> Result<Vec<Entry<T>>> {
        let dir = self.content_dir.join(T::KIND.name());
        let files = find_content_files(&dir)?;
        debug!(collection = %T::KIND, count = files.len(), "found content files");

        let mut entries: Vec<Entry<T>> = Vec::with_capacity(files.len());
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for path in files {
            let relative = path.strip_prefix(&dir).unwrap_or(&path).to_path_buf();
            let source = match fs::read_to_string(&path) {
                Ok(source) => source,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "unreadable content file");
                    errors.push(CoreError::frontmatter(
                        &path,
                        format!("cannot read file: {e}"),
                    ));
                    continue;
                }
            };

            match Entry::<T>::parse(&source, &relative, &path) {
                Ok(entry) => {
                    if let Some(first) = seen.get(&entry.slug) {
                        errors.push(CoreError::frontmatter(
                            &path,
                            format!(
                                "duplicate slug `{}` (also used by {})",
                                entry.slug,
                                first.display()
                            ),
                        ));
                        continue;
                    }
                    debug!(collection = %T::KIND, slug = %entry.slug, "validated entry");
                    seen.insert(entry.slug.clone(), path);
                    entries.push(entry);
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "rejected content file");
                    errors.push(e);
                }
            }
        }

        Ok(entries)
    }
}

/// Find all content files below `dir`, sorted by path.
fn find_content_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "collection directory missing, treating as empty");
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let is_content = entry
            .path()
            .extension()
            .is_some_and(|ext| ContentFormat::from_extension(&ext.to_string_lossy()).is_some());
        if is_content {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Hidden entries (`.git`, `_drafts.md`, ...) are never content.
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.') || name.starts_with('_'))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use itowns_core::{Audience, Dated, GovernanceCategory};

    use super::*;

    const SUMMARY: &str =
        "Framework news from the iTowns community, covering releases, governance and events.";

    fn post(dir: &Path, name: &str, date: &str, extra: &str) {
        let body = format!(
            "---\ntitle: \"Post published on {date}\"\nsummary: \"{SUMMARY}\"\npublishDate: {date}\naudience: developers\ntags: [news]\n{extra}---\n\nBody of {name}.\n"
        );
        let path = dir.join("blog").join(name);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, body).expect("write");
    }

    fn governance(dir: &Path, name: &str, title: &str, order: Option<i32>) {
        let order = order.map(|o| format!("order: {o}\n")).unwrap_or_default();
        let body = format!(
            "---\ntitle: \"{title}\"\nsummary: \"About {title}\"\ncategory: process\nlastUpdated: 2024-01-01\n{order}---\n"
        );
        let path = dir.join("governance").join(name);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, body).expect("write");
    }

    #[test]
    fn test_collect_valid_site() {
        let dir = tempfile::tempdir().expect("create temp dir");
        post(dir.path(), "first.md", "2024-01-01", "draft: true\n");
        post(dir.path(), "second.md", "2024-03-01", "featured: true\n");
        post(dir.path(), "nested/third.mdx", "2024-02-01", "");
        governance(dir.path(), "voting.md", "Voting", Some(2));

        let content = ContentCollector::new(dir.path()).collect().expect("collect");

        assert_eq!(content.blog.len(), 3);
        assert_eq!(content.draft_count(), 1);
        assert!(content.case_studies.is_empty());
        assert_eq!(content.governance.len(), 1);

        let slugs: Vec<_> = content
            .published_posts()
            .iter()
            .map(|e| e.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["second", "nested/third"]);

        let featured = content.featured_posts();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].data.audience, Audience::Developers);
        assert_eq!(
            featured[0].publish_date(),
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(content.governance[0].data.category, GovernanceCategory::Process);
    }

    #[test]
    fn test_unreadable_file_does_not_hide_other_failures() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(dir.path().join("blog")).expect("mkdir");
        fs::write(dir.path().join("blog/a-binary.md"), b"\xff\xfe---\n").expect("write");
        post(dir.path(), "b-bad-date.md", "not-a-date", "");
        fs::create_dir_all(dir.path().join("governance")).expect("mkdir");
        fs::write(dir.path().join("governance/plain.md"), "no frontmatter").expect("write");

        let err = ContentCollector::new(dir.path()).collect().unwrap_err();
        let CollectorError::Invalid(errors) = &err else {
            panic!("expected validation failure, got {err}");
        };
        assert_eq!(errors.len(), 3);
        let message = err.to_string();
        assert!(message.contains("a-binary.md"));
        assert!(message.contains("cannot read file"));
        assert!(message.contains("b-bad-date.md"));
        assert!(message.contains("plain.md"));
    }

    #[test]
    fn test_collect_reports_every_invalid_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        post(dir.path(), "good.md", "2024-01-01", "");
        post(dir.path(), "bad-date.md", "not-a-date", "");
        post(dir.path(), "bad-author.md", "2024-01-01", "author: 42\n");
        governance(dir.path(), "ok.md", "Process", None);
        fs::write(dir.path().join("governance/broken.md"), "no frontmatter").expect("write");

        let err = ContentCollector::new(dir.path()).collect().unwrap_err();
        let CollectorError::Invalid(errors) = &err else {
            panic!("expected validation failure, got {err}");
        };
        assert_eq!(errors.len(), 3);
        let message = err.to_string();
        assert!(message.contains("3 content file(s) failed validation"));
        assert!(message.contains("bad-date.md"));
        assert!(message.contains("bad-author.md"));
        assert!(message.contains("broken.md"));
    }

    #[test]
    fn test_skips_hidden_and_non_content_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        post(dir.path(), "visible.md", "2024-01-01", "");
        post(dir.path(), "_partial.md", "garbage", "");
        post(dir.path(), ".hidden/secret.md", "garbage", "");
        fs::write(dir.path().join("blog/cover.png"), b"png").expect("write");

        let content = ContentCollector::new(dir.path()).collect().expect("collect");
        assert_eq!(content.blog.len(), 1);
        assert_eq!(content.blog[0].slug, "visible");
    }

    #[test]
    fn test_duplicate_slugs_rejected() {
        let dir = tempfile::tempdir().expect("create temp dir");
        post(dir.path(), "hello-world.md", "2024-01-01", "");
        post(dir.path(), "Hello World.mdx", "2024-01-02", "");

        let err = ContentCollector::new(dir.path()).collect().unwrap_err();
        assert!(err.to_string().contains("duplicate slug `hello-world`"));
    }

    #[test]
    fn test_missing_content_dir_is_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let content = ContentCollector::new(dir.path().join("missing"))
            .collect()
            .expect("collect");
        assert!(content.blog.is_empty());
        assert!(content.published_posts().is_empty());
    }

    #[test]
    fn test_governance_in_order() {
        let dir = tempfile::tempdir().expect("create temp dir");
        governance(dir.path(), "a.md", "Funding", None);
        governance(dir.path(), "b.md", "Membership", Some(2));
        governance(dir.path(), "c.md", "Charter", Some(1));
        governance(dir.path(), "d.md", "Code of conduct", None);

        let content = ContentCollector::new(dir.path()).collect().expect("collect");
        let titles: Vec<_> = content
            .governance_in_order()
            .iter()
            .map(|e| e.data.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Charter", "Membership", "Code of conduct", "Funding"]);
    }
}
