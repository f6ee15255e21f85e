// ── API-to-domain normalization ──
//
// Turns loosely typed `agency_api::Raw*` records into uniform domain
// items. Conversion never fails: every missing or malformed field gets a
// fallback (placeholder label, derived excerpt, synthetic id) so one bad
// record cannot sink a whole batch.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use agency_api::{
    RawBlogPost, RawContactMessage, RawJobApplication, RawPortfolioItem, RawRecord, RawService,
    RawTimestamp, Relation,
};

use crate::model::{
    ApplicationStatus, BlogPost, CollectionItem, ContactMessage, ItemId, JobApplication,
    PortfolioItem, ReadStatus, Service,
};

pub const UNCATEGORIZED: &str = "Uncategorized";
pub const ANONYMOUS: &str = "Anonymous";
pub const GENERAL: &str = "General";
pub const UNTITLED: &str = "Untitled";

/// Longest derived excerpt, in characters, before the ellipsis.
pub const EXCERPT_LEN: usize = 150;

const WORDS_PER_MINUTE: usize = 200;

// ── Batch entry point ────────────────────────────────────────────────

/// Conversion from a raw record at a known position in its batch.
pub trait FromRaw<R>: Sized {
    fn from_raw(raw: R, index: usize) -> Self;
}

/// Normalize a whole batch, keeping server order.
pub fn normalize<R, T: FromRaw<R>>(raws: Vec<R>) -> Vec<T> {
    raws.into_iter()
        .enumerate()
        .map(|(index, raw)| T::from_raw(raw, index))
        .collect()
}

// ── Helpers ──────────────────────────────────────────────────────────

fn item_id<T: CollectionItem>(raw: &impl RawRecord, index: usize) -> ItemId {
    raw.raw_id()
        .map_or_else(|| ItemId::synthetic(T::COLLECTION, index), ItemId::from)
}

/// Tagged relation to a display name. Records without a name and absent
/// relations fall back to `placeholder`.
fn relation_name(relation: Option<Relation>, placeholder: &str) -> String {
    match relation {
        Some(Relation::Record {
            name: Some(name), ..
        })
        | Some(Relation::Name(name)) => name,
        Some(Relation::Record { name: None, .. }) | None => placeholder.to_owned(),
    }
}

/// RFC 3339, a bare `YYYY-MM-DD` date, or epoch milliseconds.
pub fn parse_timestamp(raw: Option<RawTimestamp>) -> Option<DateTime<Utc>> {
    match raw? {
        RawTimestamp::EpochMillis(ms) => DateTime::from_timestamp_millis(ms),
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(text.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc())
            }),
    }
}

/// Strip markup, collapse whitespace and cut to `max` characters on a
/// char boundary, appending `...` when anything was dropped.
pub fn derive_excerpt(content: &str, max: usize) -> String {
    let text = collapse_whitespace(&strip_markup(content));
    if text.chars().count() <= max {
        return text;
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

fn strip_markup(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut in_tag = false;
    for ch in content.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase, ASCII alphanumerics joined by single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_owned()
}

/// Minutes at a steady reading pace, never less than one.
pub fn estimate_read_time(content: &str) -> u32 {
    let words = strip_markup(content).split_whitespace().count();
    u32::try_from(words.div_ceil(WORDS_PER_MINUTE).max(1)).unwrap_or(u32::MAX)
}

/// Read state from a status string or a `read`/`isRead` flag. `None`
/// when the record carries no recognisable state.
pub fn contact_status(raw: &RawContactMessage) -> Option<ReadStatus> {
    if let Some(status) = raw.status.as_deref() {
        if let Ok(parsed) = status.parse::<ReadStatus>() {
            return Some(parsed);
        }
        debug!(status, "unrecognised contact status");
    }
    raw.read
        .or(raw.is_read)
        .map(|read| if read { ReadStatus::Read } else { ReadStatus::Unread })
}

/// Application stage from the status string, case-insensitive.
pub fn application_status(raw: &RawJobApplication) -> Option<ApplicationStatus> {
    let status = raw.status.as_deref()?;
    let parsed = status.trim().parse::<ApplicationStatus>().ok();
    if parsed.is_none() {
        debug!(status, "unrecognised application status");
    }
    parsed
}

// ━━ Conversions ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

impl FromRaw<RawBlogPost> for BlogPost {
    fn from_raw(raw: RawBlogPost, index: usize) -> Self {
        let id = item_id::<Self>(&raw, index);
        let title = raw.title.unwrap_or_else(|| UNTITLED.to_owned());
        let content = raw.content.unwrap_or_default();
        let excerpt = raw
            .excerpt
            .unwrap_or_else(|| derive_excerpt(&content, EXCERPT_LEN));
        let read_time = raw
            .read_time
            .unwrap_or_else(|| estimate_read_time(&content));

        BlogPost {
            slug: raw.slug.unwrap_or_else(|| slugify(&title)),
            id,
            title,
            excerpt,
            category: relation_name(raw.category, UNCATEGORIZED),
            author: relation_name(raw.author, ANONYMOUS),
            image: raw.image.or(raw.featured_image),
            tags: raw.tags,
            read_time,
            published_at: parse_timestamp(raw.published_at.or(raw.created_at)),
            content,
        }
    }
}

impl FromRaw<RawPortfolioItem> for PortfolioItem {
    fn from_raw(raw: RawPortfolioItem, index: usize) -> Self {
        PortfolioItem {
            id: item_id::<Self>(&raw, index),
            title: raw.title.unwrap_or_else(|| UNTITLED.to_owned()),
            category: relation_name(raw.category, UNCATEGORIZED),
            description: raw.description.unwrap_or_default(),
            client: raw.client,
            image: raw.image.or(raw.image_url),
            technologies: raw.technologies,
            link: raw.link.or(raw.project_url),
            created_at: parse_timestamp(raw.created_at),
        }
    }
}

impl FromRaw<RawService> for Service {
    fn from_raw(raw: RawService, index: usize) -> Self {
        let id = item_id::<Self>(&raw, index);
        let title = raw.title.unwrap_or_else(|| UNTITLED.to_owned());
        Service {
            id,
            slug: raw.slug.unwrap_or_else(|| slugify(&title)),
            title,
            category: relation_name(raw.category, GENERAL),
            description: raw.description.unwrap_or_default(),
            icon: raw.icon,
            image: raw.image,
            features: raw.features,
            created_at: parse_timestamp(raw.created_at),
        }
    }
}

impl FromRaw<RawContactMessage> for ContactMessage {
    fn from_raw(raw: RawContactMessage, index: usize) -> Self {
        let id = item_id::<Self>(&raw, index);
        let status = contact_status(&raw).unwrap_or_default();
        ContactMessage {
            id,
            name: raw.name.unwrap_or_else(|| ANONYMOUS.to_owned()),
            email: raw.email.unwrap_or_default(),
            phone: raw.phone,
            subject: raw.subject.unwrap_or_default(),
            message: raw.message.unwrap_or_default(),
            status,
            created_at: parse_timestamp(raw.created_at),
        }
    }
}

impl FromRaw<RawJobApplication> for JobApplication {
    fn from_raw(raw: RawJobApplication, index: usize) -> Self {
        let id = item_id::<Self>(&raw, index);
        let status = application_status(&raw).unwrap_or_default();
        JobApplication {
            id,
            name: raw
                .full_name
                .or(raw.name)
                .unwrap_or_else(|| ANONYMOUS.to_owned()),
            email: raw.email.unwrap_or_default(),
            phone: raw.phone,
            position: raw.position.unwrap_or_default(),
            cover_letter: raw.cover_letter,
            resume: raw.resume_url.or(raw.resume),
            status,
            created_at: parse_timestamp(raw.created_at),
        }
    }
}
