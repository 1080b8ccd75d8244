//! Taxonomy terms (categories, tags and custom taxonomies).

use super::{resource_id, Meta};
use serde::{Deserialize, Serialize};

resource_id!(
    /// Type-safe identifier for terms.
    TermId
);

#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub id: TermId,
    pub name: String,
    pub slug: String,
    pub taxonomy: String,
    pub description: String,
    pub parent: u64,
    pub count: u64,
    pub meta: Meta,
}

impl Term {
    pub fn new(id: TermId, params: TermCreate) -> Self {
        let slug = if params.slug.is_empty() {
            super::slugify(&params.name)
        } else {
            params.slug
        };
        Self {
            id,
            name: params.name,
            slug,
            taxonomy: params.taxonomy,
            description: params.description,
            parent: params.parent,
            count: params.count,
            meta: params.meta,
        }
    }
}

/// Payload for creating a new term. Also the shape of terms in seed fixtures.
/// The taxonomy defaults to `category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TermCreate {
    pub name: String,
    pub slug: String,
    pub taxonomy: String,
    pub description: String,
    pub parent: u64,
    /// Number of objects using the term, as reported by the source of the fixture.
    pub count: u64,
    pub meta: Meta,
}

impl Default for TermCreate {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            taxonomy: "category".to_string(),
            description: String::new(),
            parent: 0,
            count: 0,
            meta: Meta::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TermUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent: Option<u64>,
}

/// Store-level predicate over terms.
#[derive(Debug, Clone, Default)]
pub struct TermFilter {
    pub taxonomy: Option<String>,
    pub slugs: Vec<String>,
}

impl TermFilter {
    /// Terms of `taxonomy` whose slug is one of `slugs`.
    pub fn slugs_in(taxonomy: &str, slugs: Vec<String>) -> Self {
        Self {
            taxonomy: Some(taxonomy.to_string()),
            slugs,
        }
    }

    pub fn matches(&self, term: &Term) -> bool {
        if let Some(taxonomy) = &self.taxonomy {
            if &term.taxonomy != taxonomy {
                return false;
            }
        }
        self.slugs.is_empty() || self.slugs.contains(&term.slug)
    }
}
