/// Represents a post (or page, or any other registered post type).
///
/// # Store
/// This struct implements [`StoredResource`](content_store::StoredResource) in
/// [`crate::post_store`]. Creation validates every attached term against the
/// term store, which is injected as the post store's context.
use super::{resource_id, Meta, TermId};
use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

resource_id!(
    /// Type-safe identifier for posts.
    PostId
);

/// Publication status of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Publish,
    Future,
    Draft,
    Pending,
    Private,
    Trash,
    Inherit,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Publish => "publish",
            PostStatus::Future => "future",
            PostStatus::Draft => "draft",
            PostStatus::Pending => "pending",
            PostStatus::Private => "private",
            PostStatus::Trash => "trash",
            PostStatus::Inherit => "inherit",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub status: PostStatus,
    pub post_type: String,
    pub author: u64,
    pub date: NaiveDateTime,
    pub modified: NaiveDateTime,
    pub slug: String,
    pub parent: u64,
    pub password: String,
    pub menu_order: i64,
    pub comment_status: String,
    pub term_ids: Vec<TermId>,
    pub meta: Meta,
}

impl Post {
    /// Builds a post from its ID and creation payload.
    ///
    /// `modified` falls back to `date`, and an empty slug is derived from the title.
    pub fn new(id: PostId, params: PostCreate) -> Self {
        let slug = if params.slug.is_empty() {
            slugify(&params.title)
        } else {
            params.slug
        };
        Self {
            id,
            title: params.title,
            content: params.content,
            excerpt: params.excerpt,
            status: params.status,
            post_type: params.post_type,
            author: params.author,
            date: params.date,
            modified: params.modified.unwrap_or(params.date),
            slug,
            parent: params.parent,
            password: params.password,
            menu_order: params.menu_order,
            comment_status: params.comment_status,
            term_ids: params.term_ids,
            meta: params.meta,
        }
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Publish
    }

    pub fn is_password_protected(&self) -> bool {
        !self.password.is_empty()
    }
}

/// Lower-cases `title` and joins its alphanumeric runs with `-`.
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Payload for creating a new post. Also the shape of posts in seed fixtures.
///
/// Missing fields take the [`Default`] values: a published `post` with open
/// comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PostCreate {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub status: PostStatus,
    pub post_type: String,
    pub author: u64,
    pub date: NaiveDateTime,
    pub modified: Option<NaiveDateTime>,
    pub slug: String,
    pub parent: u64,
    pub password: String,
    pub menu_order: i64,
    pub comment_status: String,
    pub term_ids: Vec<TermId>,
    pub meta: Meta,
}

impl Default for PostCreate {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            excerpt: String::new(),
            status: PostStatus::Publish,
            post_type: "post".to_string(),
            author: 0,
            date: NaiveDateTime::default(),
            modified: None,
            slug: String::new(),
            parent: 0,
            password: String::new(),
            menu_order: 0,
            comment_status: "open".to_string(),
            term_ids: Vec::new(),
            meta: Meta::new(),
        }
    }
}

/// Payload for updating an existing post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<PostStatus>,
    pub password: Option<String>,
    pub slug: Option<String>,
    pub modified: Option<NaiveDateTime>,
}

/// Store-level predicate over posts. Empty lists and `None` place no constraint.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub ids_in: Option<Vec<PostId>>,
    pub ids_not_in: Vec<PostId>,
    pub statuses: Vec<PostStatus>,
    pub post_types: Vec<String>,
    pub authors_in: Vec<u64>,
    pub authors_not_in: Vec<u64>,
    /// Each group needs at least one of its terms attached.
    pub terms_any: Vec<Vec<TermId>>,
    pub terms_all: Vec<TermId>,
    pub terms_none: Vec<TermId>,
    pub parents_in: Option<Vec<u64>>,
    pub parents_not_in: Vec<u64>,
    pub slugs: Vec<String>,
    pub search: Option<String>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
    pub minute: Option<u32>,
    pub second: Option<u32>,
    /// Week of the year, Monday first; days before the year's first week are week 0.
    pub week: Option<u32>,
    pub meta_key: Option<String>,
    pub meta_value: Option<String>,
    /// Compare `meta_value` as a number.
    pub meta_numeric: bool,
    pub meta_compare: MetaCompare,
    pub menu_order: Option<i64>,
}

/// How a metadata value is compared against `meta_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetaCompare {
    #[default]
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    /// Case-insensitive substring match.
    Like,
    NotLike,
    Exists,
    NotExists,
}

impl MetaCompare {
    pub fn parse(value: &str) -> Option<Self> {
        let compare = match value.trim().to_ascii_uppercase().as_str() {
            "=" => MetaCompare::Equal,
            "!=" | "<>" => MetaCompare::NotEqual,
            ">" => MetaCompare::Greater,
            ">=" => MetaCompare::GreaterOrEqual,
            "<" => MetaCompare::Less,
            "<=" => MetaCompare::LessOrEqual,
            "LIKE" => MetaCompare::Like,
            "NOT LIKE" => MetaCompare::NotLike,
            "EXISTS" => MetaCompare::Exists,
            "NOT EXISTS" => MetaCompare::NotExists,
            _ => return None,
        };
        Some(compare)
    }

    /// Whether `actual` satisfies the comparison against `wanted`.
    fn test(&self, actual: &str, wanted: &str, numeric: bool) -> bool {
        let ordering = if numeric {
            match (actual.trim().parse::<f64>(), wanted.trim().parse::<f64>()) {
                (Ok(a), Ok(w)) => a.partial_cmp(&w),
                _ => None,
            }
        } else {
            Some(actual.cmp(wanted))
        };
        let like = || actual.to_lowercase().contains(&wanted.to_lowercase());
        match self {
            MetaCompare::Equal => ordering == Some(std::cmp::Ordering::Equal),
            MetaCompare::NotEqual => ordering.is_some_and(|o| o.is_ne()),
            MetaCompare::Greater => ordering.is_some_and(|o| o.is_gt()),
            MetaCompare::GreaterOrEqual => ordering.is_some_and(|o| o.is_ge()),
            MetaCompare::Less => ordering.is_some_and(|o| o.is_lt()),
            MetaCompare::LessOrEqual => ordering.is_some_and(|o| o.is_le()),
            MetaCompare::Like => like(),
            MetaCompare::NotLike => !like(),
            MetaCompare::Exists | MetaCompare::NotExists => true,
        }
    }
}

/// Week number with weeks starting on Monday, where week 1 is the first week
/// with four or more days in the year. Earlier days are week 0 and late
/// December days belonging to next year's first week stay in week 53.
pub fn week_of_year(date: &NaiveDateTime) -> u32 {
    let iso = date.iso_week();
    match iso.year().cmp(&date.year()) {
        std::cmp::Ordering::Less => 0,
        std::cmp::Ordering::Greater => 53,
        std::cmp::Ordering::Equal => iso.week(),
    }
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        if let Some(ids) = &self.ids_in {
            if !ids.contains(&post.id) {
                return false;
            }
        }
        if self.ids_not_in.contains(&post.id) {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&post.status) {
            return false;
        }
        if !self.post_types.is_empty() && !self.post_types.contains(&post.post_type) {
            return false;
        }
        if !self.authors_in.is_empty() && !self.authors_in.contains(&post.author) {
            return false;
        }
        if self.authors_not_in.contains(&post.author) {
            return false;
        }
        if !self
            .terms_any
            .iter()
            .all(|group| group.iter().any(|t| post.term_ids.contains(t)))
        {
            return false;
        }
        if !self.terms_all.iter().all(|t| post.term_ids.contains(t)) {
            return false;
        }
        if self.terms_none.iter().any(|t| post.term_ids.contains(t)) {
            return false;
        }
        if let Some(parents) = &self.parents_in {
            if !parents.contains(&post.parent) {
                return false;
            }
        }
        if self.parents_not_in.contains(&post.parent) {
            return false;
        }
        if !self.slugs.is_empty() && !self.slugs.contains(&post.slug) {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = post.title.to_lowercase().contains(&needle)
                || post.content.to_lowercase().contains(&needle)
                || post.excerpt.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }
        let date = &post.date;
        let date_parts = [
            (self.year.map(i64::from), i64::from(date.year())),
            (self.month.map(i64::from), i64::from(date.month())),
            (self.day.map(i64::from), i64::from(date.day())),
            (self.hour.map(i64::from), i64::from(date.hour())),
            (self.minute.map(i64::from), i64::from(date.minute())),
            (self.second.map(i64::from), i64::from(date.second())),
        ];
        if date_parts
            .iter()
            .any(|(wanted, actual)| wanted.is_some_and(|w| w != *actual))
        {
            return false;
        }
        if self.week.is_some_and(|week| week != week_of_year(date)) {
            return false;
        }
        if !self.meta_matches(&post.meta) {
            return false;
        }
        if let Some(order) = self.menu_order {
            if post.menu_order != order {
                return false;
            }
        }
        true
    }

    fn meta_matches(&self, meta: &Meta) -> bool {
        let candidates: Vec<&String> = match &self.meta_key {
            Some(key) => meta.get(key).into_iter().collect(),
            None => meta.values().collect(),
        };
        match self.meta_compare {
            MetaCompare::Exists => !candidates.is_empty(),
            MetaCompare::NotExists => candidates.is_empty(),
            compare => match &self.meta_value {
                Some(wanted) => candidates
                    .iter()
                    .any(|actual| compare.test(actual, wanted, self.meta_numeric)),
                None => self.meta_key.is_none() || !candidates.is_empty(),
            },
        }
    }
}
