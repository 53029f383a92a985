//! Check command - validate configuration and content

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use itowns_core::{CollectionKind, Config, CoreError, DEFAULT_SITE_URL};
use itowns_generator::{ContentCollector, SiteContent};

use super::{content_dir, load_config};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and all content files without writing anything.
pub fn run(config_path: Option<&Path>, content: Option<&Path>, strict: bool) -> Result<()> {
    tracing::info!(?config_path, ?content, strict, "Checking configuration and content");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match load_config(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e:#}"));
            println!("  ✗ Configuration invalid: {e:#}");
            Config::default()
        }
    };

    let content_dir = content_dir(&config, content);
    if content_dir.exists() {
        println!("\nChecking content files...");
        let content = validate_content(&content_dir, &mut result);
        check_content(&content, &mut result);
    } else {
        result.add_warning(format!(
            "Content directory {} does not exist",
            content_dir.display()
        ));
    }

    println!("\nChecking configuration values...");
    check_config_values(&config, &mut result);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Validate every collection, recording each rejected file.
fn validate_content(content_dir: &Path, result: &mut ValidationResult) -> SiteContent {
    let collector = ContentCollector::new(content_dir);
    let mut errors: Vec<CoreError> = Vec::new();
    let mut content = SiteContent::default();

    for kind in CollectionKind::ALL {
        if !content_dir.join(kind.name()).is_dir() {
            result.add_warning(format!("No `{kind}` collection directory"));
        }
    }

    match collector.collect_collection(&mut errors) {
        Ok(entries) => content.blog = entries,
        Err(e) => result.add_error(format!("blog: {e}")),
    }
    match collector.collect_collection(&mut errors) {
        Ok(entries) => content.case_studies = entries,
        Err(e) => result.add_error(format!("case-studies: {e}")),
    }
    match collector.collect_collection(&mut errors) {
        Ok(entries) => content.governance = entries,
        Err(e) => result.add_error(format!("governance: {e}")),
    }

    let valid = content.blog.len() + content.case_studies.len() + content.governance.len();
    println!("  ✓ {valid} file(s) valid");
    if !errors.is_empty() {
        println!("  ✗ {} file(s) invalid", errors.len());
    }

    for err in errors {
        result.add_error(err.to_string());
    }

    content
}

/// Content-level checks that do not make a file invalid.
fn check_content(content: &SiteContent, result: &mut ValidationResult) {
    if !content.blog.is_empty() && content.published_posts().is_empty() {
        result.add_warning("Every blog post is a draft, the feed will be empty");
    }

    for entry in &content.blog {
        if entry.body.trim().is_empty() {
            result.add_warning(format!("{}: post has no body", entry.path.display()));
        }
    }
}

/// Check for common configuration issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    match config.site.base_url.as_deref() {
        None | Some("") => result.add_warning(format!(
            "site.base_url is not set, feed links fall back to {DEFAULT_SITE_URL}"
        )),
        Some(url) if url.starts_with("http://") => {
            result.add_warning(format!("site.base_url `{url}` does not use HTTPS"));
        }
        Some(_) => {}
    }

    if !config.rss.enabled {
        result.add_warning("RSS feed is disabled");
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const POST: &str = "---\ntitle: \"Terrain rendering update\"\nsummary: \"Elevation layers now stream faster and use less memory on mobile devices.\"\npublishDate: 2024-03-01\naudience: developers\ntags: [terrain]\n---\n\nBody.\n";

    fn site(posts: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        for kind in CollectionKind::ALL {
            fs::create_dir_all(dir.path().join(kind.name())).expect("mkdir");
        }
        for (name, source) in posts {
            fs::write(dir.path().join("blog").join(name), source).expect("write");
        }
        dir
    }

    #[test]
    fn test_validate_content_reports_each_invalid_file() {
        let short = POST.replace("Terrain rendering update", "Too Short");
        let tagless = POST.replace("tags: [terrain]", "tags: []");
        let dir = site(&[
            ("good.md", POST),
            ("short.md", short.as_str()),
            ("tagless.md", tagless.as_str()),
        ]);
        let mut result = ValidationResult::default();

        let content = validate_content(dir.path(), &mut result);

        assert_eq!(content.blog.len(), 1);
        assert_eq!(result.errors.len(), 2);
        assert!(result.errors.iter().any(|e| e.contains("short.md")));
        assert!(result.errors.iter().any(|e| e.contains("tagless.md")));
    }

    #[test]
    fn test_missing_collection_warns() {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(dir.path().join("blog")).expect("mkdir");
        let mut result = ValidationResult::default();

        validate_content(dir.path(), &mut result);

        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_all_drafts_warns() {
        let draft = POST.replace("tags:", "draft: true\ntags:");
        let dir = site(&[("wip.md", draft.as_str())]);
        let mut result = ValidationResult::default();

        let content = validate_content(dir.path(), &mut result);
        check_content(&content, &mut result);

        assert!(!result.has_errors());
        assert!(result.warnings.iter().any(|w| w.contains("draft")));
    }

    #[test]
    fn test_config_without_base_url_warns() {
        let mut result = ValidationResult::default();
        check_config_values(&Config::default(), &mut result);
        assert!(result.warnings.iter().any(|w| w.contains(DEFAULT_SITE_URL)));
    }

    #[test]
    fn test_run_strict_fails_on_warnings() {
        let dir = site(&[("good.md", POST)]);
        let config = dir.path().join("config.toml");
        fs::write(&config, "[site]\ntitle = \"iTowns Blog\"\n").expect("write config");

        assert!(run(Some(config.as_path()), Some(dir.path()), false).is_ok());
        assert!(run(Some(config.as_path()), Some(dir.path()), true).is_err());
    }

    #[test]
    fn test_run_fails_on_invalid_content() {
        let bad = POST.replace("audience: developers", "audience: everyone");
        let dir = site(&[("bad.md", bad.as_str())]);
        let config = dir.path().join("config.toml");
        fs::write(&config, "[site]\nbase_url = \"https://itowns.org\"\n").expect("write config");

        let err = run(Some(config.as_path()), Some(dir.path()), false).unwrap_err();
        assert!(err.to_string().contains("1 error"));
    }
}
