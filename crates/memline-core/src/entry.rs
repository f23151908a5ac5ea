#![forbid(unsafe_code)]

//! Timeline entries and their display helpers.
//!
//! Entries are read-only inputs. Nothing in memline mutates one; layouts
//! borrow them and hand the references back inside placed nodes.

use std::fmt;

use chrono::NaiveDate;
use unicode_segmentation::UnicodeSegmentation;

use crate::date::{format_date_label, parse_date};

/// Maximum subtitle length in grapheme clusters before truncation.
pub const SUBTITLE_MAX_GRAPHEMES: usize = 84;

/// Title shown for entries without one.
pub const UNTITLED: &str = "(Untitled)";

/// Opaque, stable entry identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EntryId(String);

impl EntryId {
    /// Wrap an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for EntryId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Thumbnail size requested from [`Media::thumb_url`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbSize {
    /// Tiny image inside the on-axis dot.
    Dot,
    /// Label and card previews.
    Preview,
}

/// Media attached to an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Media {
    /// An image by URL.
    Image { url: String },
    /// A YouTube video by id.
    Video { id: String },
}

impl Media {
    /// Short badge text (`IMG` / `YT`).
    #[must_use]
    pub fn chip_label(&self) -> &'static str {
        match self {
            Self::Image { .. } => "IMG",
            Self::Video { .. } => "YT",
        }
    }

    /// Accessible description of the badge.
    #[must_use]
    pub fn chip_title(&self) -> &'static str {
        match self {
            Self::Image { .. } => "Has image",
            Self::Video { .. } => "Has YouTube",
        }
    }

    /// URL of a thumbnail suitable for `size`.
    #[must_use]
    pub fn thumb_url(&self, size: ThumbSize) -> String {
        match self {
            Self::Image { url } => url.clone(),
            Self::Video { id } => {
                let file = match size {
                    ThumbSize::Dot => "mqdefault.jpg",
                    ThumbSize::Preview => "hqdefault.jpg",
                };
                format!("https://i.ytimg.com/vi/{}/{file}", urlencoding::encode(id))
            }
        }
    }
}

/// A dated, user-visible item on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    /// Stable identifier.
    pub id: EntryId,
    /// `YYYY-MM-DD` date; `None` or unparseable means "unknown".
    #[cfg_attr(feature = "serde", serde(default))]
    pub date: Option<String>,
    /// Display title (may be empty).
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    /// Optional longer text; truncated for labels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub summary: Option<String>,
    /// Optional image or video.
    #[cfg_attr(feature = "serde", serde(default))]
    pub media: Option<Media>,
    /// Free-form tags, display only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
}

impl Entry {
    /// Create an entry with a date and title.
    #[must_use]
    pub fn new(id: impl Into<EntryId>, date: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            date: Some(date.into()),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Create an entry with no date.
    #[must_use]
    pub fn undated(id: impl Into<EntryId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Attach an image.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.media = Some(Media::Image { url: url.into() });
        self
    }

    /// Attach a video.
    #[must_use]
    pub fn with_video(mut self, id: impl Into<String>) -> Self {
        self.media = Some(Media::Video { id: id.into() });
        self
    }

    /// Set tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// The raw date string, or `""` when absent. Used as sort and group key.
    #[must_use]
    pub fn date_key(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }

    /// Parsed calendar day, `None` when absent or unparseable.
    #[must_use]
    pub fn day(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(|s| parse_date(s).ok())
    }

    /// Title, or [`UNTITLED`] when blank.
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            UNTITLED
        } else {
            &self.title
        }
    }

    /// Trimmed summary, truncated to [`SUBTITLE_MAX_GRAPHEMES`] plus `…`.
    #[must_use]
    pub fn subtitle(&self) -> Option<String> {
        let s = self.summary.as_deref()?.trim();
        if s.is_empty() {
            return None;
        }
        let mut graphemes = s.grapheme_indices(true);
        match graphemes.nth(SUBTITLE_MAX_GRAPHEMES) {
            None => Some(s.to_string()),
            Some((cut, _)) => Some(format!("{}…", s[..cut].trim_end())),
        }
    }

    /// Whether the summary has visible text.
    #[must_use]
    pub fn has_summary(&self) -> bool {
        self.summary.as_deref().is_some_and(|s| !s.trim().is_empty())
    }

    /// Whether an image or video is attached.
    #[must_use]
    pub fn has_media(&self) -> bool {
        self.media.is_some()
    }

    /// Display label for the date (`Feb 02, 1994`).
    #[must_use]
    pub fn date_label(&self) -> String {
        format_date_label(self.date.as_deref())
    }
}

/// Entries ordered by date string, ascending. Stable; undated entries first.
#[must_use]
pub fn sort_by_date(entries: &[Entry]) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| a.date_key().cmp(b.date_key()));
    sorted
}
