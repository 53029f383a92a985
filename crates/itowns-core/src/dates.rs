//! Date display, newest-first ordering and draft filtering.

use chrono::{DateTime, Utc};

/// Anything carrying a publication date.
pub trait Dated {
    fn publish_date(&self) -> DateTime<Utc>;
}

/// Anything that may be held back from publication.
///
/// Records without a draft flag are never drafts.
pub trait Draftable {
    fn is_draft(&self) -> bool {
        false
    }
}

impl<T: Dated + ?Sized> Dated for &T {
    fn publish_date(&self) -> DateTime<Utc> {
        (**self).publish_date()
    }
}

impl<T: Draftable + ?Sized> Draftable for &T {
    fn is_draft(&self) -> bool {
        (**self).is_draft()
    }
}

/// Display style for [`format_date`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateStyle {
    /// "January 5, 2024"
    #[default]
    Long,
    /// "Jan 5, 2024"
    Short,
}

/// Format a date for display, en-US style, in UTC.
pub fn format_date(date: DateTime<Utc>, style: DateStyle) -> String {
    let pattern = match style {
        DateStyle::Long => "%B %-d, %Y",
        DateStyle::Short => "%b %-d, %Y",
    };
    date.format(pattern).to_string()
}

/// Order items newest first. Items sharing a timestamp keep their input order.
pub fn sort_by_date_desc<T: Dated>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by_key(|item| std::cmp::Reverse(item.publish_date()));
    items
}

/// Drop every draft, preserving the order of the rest.
pub fn filter_drafts<T: Draftable>(items: Vec<T>) -> Vec<T> {
    items.into_iter().filter(|item| !item.is_draft()).collect()
}
