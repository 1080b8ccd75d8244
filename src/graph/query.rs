//! Post queries behind the `query` keyword of the post ID list.
//!
//! Filter pairs are reduced to the allowed keys, translated into a
//! [`PostFilter`] plus ordering and pagination, and run against the post
//! store. Only posts passing the read-permission check are returned.

use super::error::{ResourceFailure, ResourceKind};
use super::request::split_tokens;
use super::resolver::FieldResolver;
use crate::clients::TermClient;
use crate::model::{MetaCompare, Post, PostFilter, PostId, PostStatus, TermId};
use content_store::TypedClient;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, error, info};

const CATEGORY_TAXONOMY: &str = "category";
const TAG_TAXONOMY: &str = "post_tag";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    #[default]
    Date,
    Modified,
    Id,
    Title,
    Slug,
    Author,
    Parent,
    MenuOrder,
    /// Store order (ascending ID), ignoring `order`.
    None,
}

impl OrderBy {
    fn parse(value: &str) -> Option<Self> {
        let order_by = match value.trim() {
            "date" | "post_date" => OrderBy::Date,
            "modified" | "post_modified" => OrderBy::Modified,
            "ID" | "id" => OrderBy::Id,
            "title" | "post_title" => OrderBy::Title,
            "name" | "post_name" => OrderBy::Slug,
            "author" | "post_author" => OrderBy::Author,
            "parent" | "post_parent" => OrderBy::Parent,
            "menu_order" => OrderBy::MenuOrder,
            "none" => OrderBy::None,
            _ => return None,
        };
        Some(order_by)
    }

    fn compare(&self, a: &Post, b: &Post) -> Ordering {
        match self {
            OrderBy::Date => a.date.cmp(&b.date),
            OrderBy::Modified => a.modified.cmp(&b.modified),
            OrderBy::Id | OrderBy::None => a.id.cmp(&b.id),
            OrderBy::Title => a.title.cmp(&b.title),
            OrderBy::Slug => a.slug.cmp(&b.slug),
            OrderBy::Author => a.author.cmp(&b.author),
            OrderBy::Parent => a.parent.cmp(&b.parent),
            OrderBy::MenuOrder => a.menu_order.cmp(&b.menu_order),
        }
    }
}

/// A post query built from allowed filter pairs.
#[derive(Debug, Clone)]
pub struct PostQuery {
    pub filter: PostFilter,
    pub order_by: OrderBy,
    pub descending: bool,
    /// `None` returns every match.
    pub per_page: Option<usize>,
    pub page: usize,
    pub offset: Option<usize>,
    /// Category slugs, resolved to IDs against the term store when run.
    pub category_slugs: Vec<String>,
    /// Tag slugs, resolved like `category_slugs`.
    pub tag_slugs: Vec<String>,
    /// Tag slugs that must all be attached.
    pub tag_slugs_all: Vec<String>,
}

fn ints<T: std::str::FromStr>(values: &[String]) -> Vec<T> {
    split_tokens(values)
        .iter()
        .filter_map(|v| v.parse().ok())
        .collect()
}

fn first_int<T: std::str::FromStr>(values: &[String]) -> Option<T> {
    ints(values).into_iter().next()
}

fn term_ids(values: &[String]) -> Vec<TermId> {
    ints::<u64>(values).into_iter().map(TermId).collect()
}

fn truthy(values: &[String]) -> bool {
    values
        .last()
        .is_some_and(|v| matches!(v.trim(), "1" | "true" | "yes"))
}

impl PostQuery {
    /// Translates allowed filter pairs. Keys that fail to parse are ignored.
    pub fn from_args(args: &BTreeMap<String, Vec<String>>, default_per_page: usize) -> Self {
        let mut filter = PostFilter {
            statuses: vec![PostStatus::Publish, PostStatus::Inherit],
            post_types: vec!["post".to_string()],
            ..PostFilter::default()
        };
        let mut pagename = false;
        let mut query = Self {
            filter: PostFilter::default(),
            order_by: OrderBy::Date,
            descending: true,
            per_page: Some(default_per_page),
            page: 1,
            offset: None,
            category_slugs: Vec::new(),
            tag_slugs: Vec::new(),
            tag_slugs_all: Vec::new(),
        };

        for (key, values) in args {
            match key.as_str() {
                "author" => {
                    for author in ints::<i64>(values) {
                        if author < 0 {
                            filter.authors_not_in.push(author.unsigned_abs());
                        } else {
                            filter.authors_in.push(author as u64);
                        }
                    }
                }
                "author__in" => filter.authors_in.extend(ints::<u64>(values)),
                "author__not_in" => filter.authors_not_in.extend(ints::<u64>(values)),
                "cat" => {
                    let mut include = Vec::new();
                    for cat in ints::<i64>(values) {
                        if cat < 0 {
                            filter.terms_none.push(TermId(cat.unsigned_abs()));
                        } else if cat > 0 {
                            include.push(TermId(cat as u64));
                        }
                    }
                    if !include.is_empty() {
                        filter.terms_any.push(include);
                    }
                }
                "category__in" | "tag__in" => filter.terms_any.push(term_ids(values)),
                "tag_id" => filter.terms_any.push(term_ids(values)),
                "category__and" | "tag__and" => filter.terms_all.extend(term_ids(values)),
                "category__not_in" | "tag__not_in" => filter.terms_none.extend(term_ids(values)),
                "category_name" => query.category_slugs.extend(split_tokens(values)),
                "tag" | "tag_slug__in" => query.tag_slugs.extend(split_tokens(values)),
                "tag_slug__and" => query.tag_slugs_all.extend(split_tokens(values)),
                "year" => filter.year = first_int(values),
                "monthnum" => filter.month = first_int(values),
                "day" => filter.day = first_int(values),
                "hour" => filter.hour = first_int(values),
                "minute" => filter.minute = first_int(values),
                "second" => filter.second = first_int(values),
                "w" => filter.week = first_int(values),
                "m" => apply_m(&mut filter, values),
                "s" => {
                    filter.search = values
                        .last()
                        .map(|v| v.trim().to_string())
                        .filter(|v| !v.is_empty())
                }
                "p" => {
                    if let Some(id) = first_int::<u64>(values) {
                        filter.ids_in = Some(vec![PostId(id)]);
                    }
                }
                "name" | "post_name__in" => filter.slugs.extend(split_tokens(values)),
                "pagename" => {
                    // A page path; the last segment is the page's own slug.
                    if let Some(slug) = values
                        .last()
                        .and_then(|path| path.trim_matches('/').rsplit('/').next())
                        .filter(|slug| !slug.is_empty())
                    {
                        filter.slugs.push(slug.to_string());
                        pagename = true;
                    }
                }
                "post__in" => {
                    let ids = ints::<u64>(values).into_iter().map(PostId).collect();
                    filter.ids_in = Some(ids);
                }
                "post__not_in" => filter
                    .ids_not_in
                    .extend(ints::<u64>(values).into_iter().map(PostId)),
                "post_parent" => {
                    if let Some(parent) = first_int::<u64>(values) {
                        filter.parents_in = Some(vec![parent]);
                    }
                }
                "post_parent__in" => filter.parents_in = Some(ints(values)),
                "post_parent__not_in" => filter.parents_not_in.extend(ints::<u64>(values)),
                "post_type" => {
                    let types = split_tokens(values);
                    filter.post_types = if types.iter().any(|t| t == "any") {
                        Vec::new()
                    } else {
                        types
                    };
                }
                "meta_key" => filter.meta_key = values.last().cloned(),
                "meta_value" => filter.meta_value = values.last().cloned(),
                "meta_value_num" => {
                    let number = values
                        .last()
                        .map(|v| v.trim())
                        .filter(|v| v.parse::<f64>().is_ok());
                    if let Some(number) = number {
                        filter.meta_value = Some(number.to_string());
                        filter.meta_numeric = true;
                    }
                }
                "meta_compare" => {
                    if let Some(compare) = values.last().and_then(|v| MetaCompare::parse(v)) {
                        filter.meta_compare = compare;
                    }
                }
                "menu_order" => filter.menu_order = first_int(values),
                "offset" => query.offset = first_int(values),
                // `paged` sorts after `page`, so it wins when both are given.
                "page" | "paged" => query.page = first_int::<usize>(values).unwrap_or(1).max(1),
                "ignore_sticky_posts" => {}
                "posts_per_page" => match first_int::<i64>(values) {
                    Some(n) if n < 0 => query.per_page = None,
                    Some(n) if n > 0 => query.per_page = Some(n as usize),
                    _ => {}
                },
                "nopaging" => {
                    if truthy(values) {
                        query.per_page = None;
                    }
                }
                "order" => {
                    if let Some(order) = values.last() {
                        query.descending = !order.trim().eq_ignore_ascii_case("asc");
                    }
                }
                "orderby" => {
                    if let Some(order_by) = values.last().and_then(|v| OrderBy::parse(v)) {
                        query.order_by = order_by;
                    }
                }
                _ => debug!(key, "Ignoring unsupported query key"),
            }
        }

        if pagename && !args.contains_key("post_type") {
            filter.post_types = vec!["page".to_string()];
        }
        query.filter = filter;
        query
    }

    /// Sorts the matches and cuts the requested page out of them.
    pub fn order_and_paginate(&self, mut posts: Vec<Post>) -> Vec<Post> {
        if self.order_by != OrderBy::None {
            posts.sort_by(|a, b| {
                let ordering = self.order_by.compare(a, b).then_with(|| a.id.cmp(&b.id));
                if self.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        let Some(per_page) = self.per_page else {
            return posts;
        };
        let skip = self
            .offset
            .unwrap_or_else(|| (self.page - 1).saturating_mul(per_page));
        posts.into_iter().skip(skip).take(per_page).collect()
    }

    async fn resolve_slugs(&mut self, terms: &TermClient) -> Result<(), ResourceFailure> {
        for (taxonomy, slugs) in [
            (CATEGORY_TAXONOMY, std::mem::take(&mut self.category_slugs)),
            (TAG_TAXONOMY, std::mem::take(&mut self.tag_slugs)),
        ] {
            if slugs.is_empty() {
                continue;
            }
            let ids = terms.ids_by_slug(taxonomy, slugs).await.map_err(|e| {
                error!(taxonomy, error = %e, "Slug lookup failed");
                query_unavailable()
            })?;
            // An empty group matches nothing, as an unknown slug should.
            self.filter.terms_any.push(ids);
        }

        let mut required = std::mem::take(&mut self.tag_slugs_all);
        required.sort();
        required.dedup();
        if !required.is_empty() {
            let wanted = required.len();
            let ids = terms.ids_by_slug(TAG_TAXONOMY, required).await.map_err(|e| {
                error!(taxonomy = TAG_TAXONOMY, error = %e, "Slug lookup failed");
                query_unavailable()
            })?;
            if ids.len() < wanted {
                self.filter.terms_any.push(Vec::new());
            }
            self.filter.terms_all.extend(ids);
        }
        Ok(())
    }
}

/// `m=YYYYMMDDHHMMSS`, any prefix of at least the year.
fn apply_m(filter: &mut PostFilter, values: &[String]) {
    let Some(m) = values.last().map(|v| v.trim()) else {
        return;
    };
    if m.len() < 4 || !m.chars().all(|c| c.is_ascii_digit()) {
        return;
    }
    let part = |from: usize, to: usize| m.get(from..to).and_then(|s| s.parse().ok());
    filter.year = m.get(0..4).and_then(|s| s.parse().ok());
    filter.month = part(4, 6);
    filter.day = part(6, 8);
    filter.hour = part(8, 10);
    filter.minute = part(10, 12);
    filter.second = part(12, 14);
}

fn query_unavailable() -> ResourceFailure {
    ResourceFailure::StoreUnavailable {
        kind: ResourceKind::Post,
        id: "query".to_string(),
    }
}

/// Runs a post query for `filters` and returns the readable matching IDs.
///
/// A custom query hook answering with IDs short-circuits everything else.
/// Filters with no allowed key yield nothing.
pub async fn query_post_ids(
    resolver: &FieldResolver,
    filters: &BTreeMap<String, Vec<String>>,
) -> Result<Vec<u64>, ResourceFailure> {
    if let Some(ids) = resolver.hooks().custom_query(filters) {
        if !ids.is_empty() {
            debug!(count = ids.len(), "Custom query answered");
            return Ok(ids);
        }
    }

    let settings = resolver.settings();
    let args: BTreeMap<String, Vec<String>> = filters
        .iter()
        .filter(|(key, _)| settings.is_query_arg_allowed(key))
        .map(|(key, values)| (key.clone(), values.clone()))
        .collect();
    if args.is_empty() {
        debug!("No allowed query keys");
        return Ok(Vec::new());
    }

    let mut query = PostQuery::from_args(&args, settings.posts_per_page);
    query.resolve_slugs(resolver.terms()).await?;

    let matches = resolver
        .posts()
        .query(query.filter.clone())
        .await
        .map_err(|e| {
            error!(error = %e, "Post query failed");
            query_unavailable()
        })?;

    let mut ids = Vec::new();
    for post in query.order_and_paginate(matches) {
        if resolver.can_read(&post).await? {
            ids.push(post.id.0);
        }
    }
    info!(keys = args.len(), matched = ids.len(), "Post query");
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PostCreate;
    use chrono::NaiveDate;

    fn args(pairs: &[(&str, &str)]) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (k, v) in pairs {
            map.entry(k.to_string()).or_default().push(v.to_string());
        }
        map
    }

    fn post(id: u64, day: u32, title: &str) -> Post {
        Post::new(
            PostId(id),
            PostCreate {
                title: title.to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, day)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap(),
                post_type: "post".to_string(),
                ..Default::default()
            },
        )
    }

    #[test]
    fn defaults_are_latest_ten_posts() {
        let query = PostQuery::from_args(&args(&[("author", "2")]), 10);
        assert_eq!(query.filter.post_types, vec!["post"]);
        assert_eq!(query.filter.authors_in, vec![2]);
        assert_eq!(query.per_page, Some(10));
        assert!(query.descending);
        assert_eq!(query.order_by, OrderBy::Date);
    }

    #[test]
    fn negative_ids_exclude() {
        let query = PostQuery::from_args(&args(&[("author", "3,-4"), ("cat", "-7,5")]), 10);
        assert_eq!(query.filter.authors_in, vec![3]);
        assert_eq!(query.filter.authors_not_in, vec![4]);
        assert_eq!(query.filter.terms_none, vec![TermId(7)]);
        assert_eq!(query.filter.terms_any, vec![vec![TermId(5)]]);
    }

    #[test]
    fn m_sets_date_parts() {
        let query = PostQuery::from_args(&args(&[("m", "20240315")]), 10);
        assert_eq!(query.filter.year, Some(2024));
        assert_eq!(query.filter.month, Some(3));
        assert_eq!(query.filter.day, Some(15));
        assert_eq!(query.filter.hour, None);
    }

    #[test]
    fn order_and_paginate() {
        let posts = vec![post(1, 1, "b"), post(2, 3, "a"), post(3, 2, "c")];

        let latest = PostQuery::from_args(&args(&[("posts_per_page", "2")]), 10);
        let ids: Vec<u64> = latest
            .order_and_paginate(posts.clone())
            .iter()
            .map(|p| p.id.0)
            .collect();
        assert_eq!(ids, vec![2, 3]);

        let by_title = PostQuery::from_args(
            &args(&[
                ("orderby", "title"),
                ("order", "ASC"),
                ("paged", "2"),
                ("posts_per_page", "2"),
            ]),
            10,
        );
        let ids: Vec<u64> = by_title
            .order_and_paginate(posts.clone())
            .iter()
            .map(|p| p.id.0)
            .collect();
        assert_eq!(ids, vec![3]);

        let everything = PostQuery::from_args(&args(&[("nopaging", "true")]), 1);
        assert_eq!(everything.order_and_paginate(posts).len(), 3);
    }

    #[test]
    fn slug_keys_fill_the_slug_filter() {
        let query = PostQuery::from_args(&args(&[("post_name__in", "hello,about")]), 10);
        assert_eq!(query.filter.slugs, vec!["hello", "about"]);
        assert_eq!(query.filter.post_types, vec!["post"]);

        let page = PostQuery::from_args(&args(&[("pagename", "company/about/")]), 10);
        assert_eq!(page.filter.slugs, vec!["about"]);
        assert_eq!(page.filter.post_types, vec!["page"]);

        let explicit = PostQuery::from_args(
            &args(&[("pagename", "about"), ("post_type", "book")]),
            10,
        );
        assert_eq!(explicit.filter.post_types, vec!["book"]);
    }

    #[test]
    fn tag_slug_keys_are_collected_for_resolution() {
        let query = PostQuery::from_args(
            &args(&[("tag_slug__in", "rust,go"), ("tag_slug__and", "news,rust")]),
            10,
        );
        assert_eq!(query.tag_slugs, vec!["rust", "go"]);
        assert_eq!(query.tag_slugs_all, vec!["news", "rust"]);
    }

    #[test]
    fn page_week_and_meta_comparisons() {
        let query = PostQuery::from_args(
            &args(&[
                ("page", "3"),
                ("w", "11"),
                ("meta_key", "rating"),
                ("meta_value_num", " 4 "),
                ("meta_compare", ">="),
                ("ignore_sticky_posts", "1"),
            ]),
            10,
        );
        assert_eq!(query.page, 3);
        assert_eq!(query.filter.week, Some(11));
        assert_eq!(query.filter.meta_value.as_deref(), Some("4"));
        assert!(query.filter.meta_numeric);
        assert_eq!(query.filter.meta_compare, MetaCompare::GreaterOrEqual);

        let paged_wins = PostQuery::from_args(&args(&[("page", "3"), ("paged", "2")]), 10);
        assert_eq!(paged_wins.page, 2);

        let not_a_number = PostQuery::from_args(&args(&[("meta_value_num", "high")]), 10);
        assert_eq!(not_a_number.filter.meta_value, None);
        assert!(!not_a_number.filter.meta_numeric);
    }

    #[test]
    fn numeric_meta_compare_matches_posts() {
        let mut low = post(1, 1, "low");
        low.meta.insert("rating".to_string(), "9".to_string());
        let mut high = post(2, 2, "high");
        high.meta.insert("rating".to_string(), "10".to_string());
        let unrated = post(3, 3, "unrated");

        let query = PostQuery::from_args(
            &args(&[("meta_key", "rating"), ("meta_value_num", "10"), ("meta_compare", "<")]),
            10,
        );
        assert!(query.filter.matches(&low));
        assert!(!query.filter.matches(&high));
        assert!(!query.filter.matches(&unrated));

        // Compared as text, "9" sorts after "10".
        let text = PostQuery::from_args(
            &args(&[("meta_key", "rating"), ("meta_value", "10"), ("meta_compare", "<")]),
            10,
        );
        assert!(!text.filter.matches(&low));

        let missing = PostQuery::from_args(
            &args(&[("meta_key", "rating"), ("meta_compare", "NOT EXISTS")]),
            10,
        );
        assert!(missing.filter.matches(&unrated));
        assert!(!missing.filter.matches(&low));
    }

    #[test]
    fn week_filter_uses_monday_weeks() {
        // 2024-03-11 is the Monday starting week 11.
        let query = PostQuery::from_args(&args(&[("w", "11")]), 10);
        assert!(query.filter.matches(&post(1, 11, "monday")));
        assert!(query.filter.matches(&post(2, 17, "sunday")));
        assert!(!query.filter.matches(&post(3, 10, "previous sunday")));
    }

    #[test]
    fn any_post_type_lifts_the_type_constraint() {
        let query = PostQuery::from_args(&args(&[("post_type", "any")]), 10);
        assert!(query.filter.post_types.is_empty());
    }
}
