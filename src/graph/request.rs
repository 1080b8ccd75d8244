//! Request parsing: raw query pairs into ID lists, field specs and filters.
//!
//! A parameter may arrive as a native list (`fields[]=a&fields[]=b`, or the
//! same key repeated) or as one comma-separated string (`fields=a,b`). Both
//! normalize to the same ordered sequence. `filter[key]=value` pairs are kept
//! apart for post queries.

use super::error::{GraphError, ResourceKind};
use std::collections::BTreeMap;

/// The sentinel field name replaced by a kind's default fields.
pub const DEFAULT_FIELD: &str = "default";

/// The ID token that triggers a post query.
pub const QUERY_KEYWORD: &str = "query";

/// Query and path parameters of one request, before interpretation.
#[derive(Debug, Clone, Default)]
pub struct RawParams {
    params: BTreeMap<String, Vec<String>>,
    filters: BTreeMap<String, Vec<String>>,
}

impl RawParams {
    /// Groups decoded query pairs by parameter name, preserving value order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (key, value) in pairs {
            let key: String = key.into();
            let value: String = value.into();
            let key = key.strip_suffix("[]").unwrap_or(&key).to_string();
            match filter_key(&key) {
                Some(filter) => raw.filters.entry(filter).or_default().push(value),
                None => raw.params.entry(key).or_default().push(value),
            }
        }
        raw
    }

    /// Sets a path parameter. Path parameters win over query parameters of the
    /// same name.
    pub fn with_path_param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.insert(name.to_string(), vec![value.into()]);
        self
    }

    /// The tokens of `name`: every value split on `,`, trimmed, empties dropped.
    pub fn list(&self, name: &str) -> Vec<String> {
        self.params
            .get(name)
            .map(|values| split_tokens(values))
            .unwrap_or_default()
    }

    /// Filter pairs, keyed by the name inside `filter[...]`.
    pub fn filters(&self) -> &BTreeMap<String, Vec<String>> {
        &self.filters
    }
}

/// `filter[author]` -> `author`.
fn filter_key(key: &str) -> Option<String> {
    let inner = key.strip_prefix("filter[")?.strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    Some(inner.to_string())
}

pub(crate) fn split_tokens(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// One entry of an ID list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdToken {
    Id(u64),
    /// The `query` keyword of the post ID list.
    Query,
    /// Anything else, kept so the batch can report it.
    Invalid(String),
}

impl IdToken {
    /// `query` is only a keyword where the kind supports queries.
    pub fn parse(token: &str, allow_query: bool) -> Self {
        if allow_query && token == QUERY_KEYWORD {
            return IdToken::Query;
        }
        match token.parse::<u64>() {
            Ok(id) if id > 0 => IdToken::Id(id),
            _ => IdToken::Invalid(token.to_string()),
        }
    }
}

pub fn parse_ids(tokens: &[String], allow_query: bool) -> Vec<IdToken> {
    tokens
        .iter()
        .map(|token| IdToken::parse(token, allow_query))
        .collect()
}

/// Keeps the first occurrence of every token.
pub fn dedup_ids(ids: Vec<IdToken>) -> Vec<IdToken> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// An ordered, duplicate-free list of field names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSpec(Vec<String>);

impl FieldSpec {
    /// Builds a spec from requested names, expanding `default`.
    ///
    /// When `default` is present it is removed and `defaults` go first, followed
    /// by the explicit names. Duplicates keep their first position.
    pub fn expand(requested: Vec<String>, defaults: &[String]) -> Self {
        let has_default = requested.iter().any(|f| f == DEFAULT_FIELD);
        let explicit = requested.into_iter().filter(|f| f != DEFAULT_FIELD);
        let names: Vec<String> = if has_default {
            defaults.iter().cloned().chain(explicit).collect()
        } else {
            explicit.collect()
        };
        let mut spec = Vec::with_capacity(names.len());
        for name in names {
            if !spec.contains(&name) {
                spec.push(name);
            }
        }
        Self(spec)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|f| f == name)
    }
}

/// IDs and fields of one resource kind, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct KindRequest {
    pub ids: Vec<IdToken>,
    pub fields: FieldSpec,
}

impl KindRequest {
    /// Reads `ids_key` and `fields_key` from `params`.
    ///
    /// An empty ID list fails before an empty field list is looked at.
    pub fn parse(
        params: &RawParams,
        kind: ResourceKind,
        ids_key: &str,
        fields_key: &str,
        defaults: &[String],
    ) -> Result<Self, GraphError> {
        let ids = parse_ids(&params.list(ids_key), kind == ResourceKind::Post);
        if ids.is_empty() {
            return Err(GraphError::NoIdsSpecified(kind));
        }
        let fields = FieldSpec::expand(params.list(fields_key), defaults);
        if fields.is_empty() {
            return Err(GraphError::NoFieldsSpecified(kind));
        }
        Ok(Self { ids, fields })
    }

    /// Like [`parse`](Self::parse), but a kind with no IDs at all is simply
    /// absent. Used by the mixed endpoint.
    pub fn parse_optional(
        params: &RawParams,
        kind: ResourceKind,
        ids_key: &str,
        fields_key: &str,
        defaults: &[String],
    ) -> Result<Option<Self>, GraphError> {
        if params.list(ids_key).is_empty() {
            return Ok(None);
        }
        Self::parse(params, kind, ids_key, fields_key, defaults).map(Some)
    }
}
