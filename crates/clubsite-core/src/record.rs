//! Record models for the two listed collections.
//!
//! The content loader hands these over already schema-validated; this module
//! only defines the shapes and the small capability surface the generic
//! pipeline consumes. Unknown frontmatter keys are kept in `extra` so a
//! collection round-trips without loss.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::lenient_date_serde;

/// Reference to an owning group, e.g. a special interest group of the club.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupRef {
    pub id: String,
}

impl GroupRef {
    /// Display label: the id uppercased, by site convention.
    #[must_use]
    pub fn label(&self) -> String {
        self.id.to_uppercase()
    }

    /// Case-insensitive match against an externally supplied slug.
    ///
    /// Only locked-group scoping uses this; group selections made in the UI
    /// compare ids exactly because both sides come from the same records.
    #[must_use]
    pub fn matches_slug(&self, slug: &str) -> bool {
        self.id.eq_ignore_ascii_case(slug)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub name: String,

    #[serde(default)]
    pub url: Option<String>,
}

/// Kind of attached content on a research record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Video,
    Slideshow,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Article => "Article",
            ContentKind::Video => "Video",
            ContentKind::Slideshow => "Slideshow",
        }
    }
}

/// A meeting or event on the club schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub slug: String,

    pub title: String,

    #[serde(default, with = "lenient_date_serde")]
    pub start: Option<DateTime<Utc>>,

    #[serde(default, with = "lenient_date_serde")]
    pub end: Option<DateTime<Utc>>,

    #[serde(default)]
    pub group: Option<GroupRef>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub hosts: Vec<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A published research post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRecord {
    pub slug: String,

    pub title: String,

    #[serde(default, with = "lenient_date_serde")]
    pub date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub group: Option<GroupRef>,

    #[serde(default)]
    pub authors: Vec<Author>,

    #[serde(default)]
    pub has_content: bool,

    #[serde(default)]
    pub video: Option<String>,

    #[serde(default)]
    pub slideshow: Option<String>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ResearchRecord {
    /// Content kinds derived from which attachments are present.
    #[must_use]
    pub fn kinds(&self) -> Vec<ContentKind> {
        let mut kinds = Vec::new();
        if self.has_content {
            kinds.push(ContentKind::Article);
        }
        if self.video.is_some() {
            kinds.push(ContentKind::Video);
        }
        if self.slideshow.is_some() {
            kinds.push(ContentKind::Slideshow);
        }
        kinds
    }
}

/// Capability surface shared by both collections.
///
/// `order_key` is the one datum sorting depends on; a record whose date
/// failed to parse reports `None` and sorts after every dated record rather
/// than aborting the batch.
pub trait Listable {
    fn order_key(&self) -> Option<DateTime<Utc>>;

    fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.order_key()
    }

    /// End used by the upcoming-only filter; single-instant records end when
    /// they start.
    fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.starts_at()
    }

    fn group_id(&self) -> Option<&str>;

    fn has_kind(&self, _kind: ContentKind) -> bool {
        false
    }
}

impl Listable for ScheduleRecord {
    fn order_key(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.end.or(self.start)
    }

    fn group_id(&self) -> Option<&str> {
        self.group.as_ref().map(|g| g.id.as_str())
    }
}

impl Listable for ResearchRecord {
    fn order_key(&self) -> Option<DateTime<Utc>> {
        self.date
    }

    fn group_id(&self) -> Option<&str> {
        self.group.as_ref().map(|g| g.id.as_str())
    }

    fn has_kind(&self, kind: ContentKind) -> bool {
        match kind {
            ContentKind::Article => self.has_content,
            ContentKind::Video => self.video.is_some(),
            ContentKind::Slideshow => self.slideshow.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{ContentKind, GroupRef, Listable, ResearchRecord, ScheduleRecord};

    #[test]
    fn research_kinds_follow_attachments() {
        let record: ResearchRecord = serde_json::from_value(serde_json::json!({
            "slug": "heap-notes",
            "title": "Heap Notes",
            "date": "2025-03-01",
            "has_content": true,
            "video": "https://youtu.be/abc123"
        }))
        .unwrap();

        assert_eq!(
            record.kinds(),
            vec![ContentKind::Article, ContentKind::Video]
        );
        assert!(record.has_kind(ContentKind::Article));
        assert!(!record.has_kind(ContentKind::Slideshow));
    }

    #[test]
    fn malformed_date_degrades_to_none_and_keeps_the_record() {
        let record: ResearchRecord = serde_json::from_value(serde_json::json!({
            "slug": "odd",
            "title": "Odd Date",
            "date": "sometime in spring"
        }))
        .unwrap();

        assert!(record.date.is_none());
        assert_eq!(record.slug, "odd");
    }

    #[test]
    fn unknown_frontmatter_keys_land_in_extra() {
        let record: ScheduleRecord = serde_json::from_value(serde_json::json!({
            "slug": "ctf-night",
            "title": "CTF Night",
            "start": "2025-03-01T22:00:00Z",
            "end": "2025-03-02T01:00:00Z",
            "featured": true
        }))
        .unwrap();

        assert_eq!(
            record.extra.get("featured"),
            Some(&serde_json::Value::Bool(true))
        );
    }

    #[test]
    fn schedule_end_falls_back_to_start() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 22, 0, 0).unwrap();
        let record = ScheduleRecord {
            slug: "talk".to_string(),
            title: "Talk".to_string(),
            start: Some(start),
            end: None,
            group: None,
            location: None,
            hosts: vec![],
            extra: Default::default(),
        };
        assert_eq!(record.ends_at(), Some(start));
    }

    #[test]
    fn locked_slug_matching_is_case_insensitive() {
        let group = GroupRef {
            id: "redteam".to_string(),
        };
        assert!(group.matches_slug("RedTeam"));
        assert!(!group.matches_slug("blueteam"));
        assert_eq!(group.label(), "REDTEAM");
    }
}
