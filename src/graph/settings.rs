//! Read-only settings shared by every request.

use super::error::ResourceKind;
use crate::config::{GraphConfig, PostTypeConfig};
use std::collections::BTreeMap;
use tracing::info;

/// Placeholder returned for underscore-prefixed fields while safe meta mode is on.
pub const PRIVATE_KEY_PLACEHOLDER: &str =
    "Sorry, this key is marked as private. Please see the readme for more information.";

/// Field selection, privacy and exposure rules, computed once at startup.
#[derive(Debug, Clone)]
pub struct GraphSettings {
    pub safe_meta_mode: bool,
    pub default_post_fields: Vec<String>,
    pub default_term_fields: Vec<String>,
    pub default_comment_fields: Vec<String>,
    pub private_post_fields: Vec<String>,
    pub private_term_fields: Vec<String>,
    pub private_comment_fields: Vec<String>,
    pub private_fields: Vec<String>,
    pub allowed_post_types: Vec<String>,
    pub allowed_comment_types: Vec<String>,
    pub allowed_query_args: Vec<String>,
    pub posts_per_page: usize,
    pub legacy_post_types: Vec<String>,
    /// Taxonomies registered per post type.
    pub taxonomies: BTreeMap<String, Vec<String>>,
}

impl GraphSettings {
    /// Derives the settings from configuration and the post-type registry.
    ///
    /// Allowed post types are the public types shown in REST, unless the
    /// configuration names them explicitly.
    pub fn from_config(graph: &GraphConfig, post_types: &[PostTypeConfig]) -> Self {
        let allowed_post_types = match &graph.allowed_post_types {
            Some(explicit) => explicit.clone(),
            None => post_types
                .iter()
                .filter(|pt| pt.public && pt.show_in_rest)
                .map(|pt| pt.name.clone())
                .collect(),
        };
        info!(?allowed_post_types, "Allowed post types");

        let taxonomies = post_types
            .iter()
            .map(|pt| (pt.name.clone(), pt.taxonomies.clone()))
            .collect();

        Self {
            safe_meta_mode: graph.safe_meta_mode,
            default_post_fields: graph.default_post_fields.clone(),
            default_term_fields: graph.default_term_fields.clone(),
            default_comment_fields: graph.default_comment_fields.clone(),
            private_post_fields: graph.private_post_fields.clone(),
            private_term_fields: graph.private_term_fields.clone(),
            private_comment_fields: graph.private_comment_fields.clone(),
            private_fields: graph.private_fields.clone(),
            allowed_post_types,
            allowed_comment_types: graph.allowed_comment_types.clone(),
            allowed_query_args: graph.allowed_query_args.clone(),
            posts_per_page: graph.posts_per_page,
            legacy_post_types: graph.legacy_post_types.clone(),
            taxonomies,
        }
    }

    pub fn default_fields(&self, kind: ResourceKind) -> &[String] {
        match kind {
            ResourceKind::Post => &self.default_post_fields,
            ResourceKind::Term => &self.default_term_fields,
            ResourceKind::Comment => &self.default_comment_fields,
        }
    }

    /// Fields nulled for `kind`: its own set followed by the shared one.
    pub fn private_fields(&self, kind: ResourceKind) -> impl Iterator<Item = &str> {
        let own = match kind {
            ResourceKind::Post => &self.private_post_fields,
            ResourceKind::Term => &self.private_term_fields,
            ResourceKind::Comment => &self.private_comment_fields,
        };
        own.iter().chain(self.private_fields.iter()).map(String::as_str)
    }

    pub fn is_post_type_allowed(&self, post_type: &str) -> bool {
        self.allowed_post_types.iter().any(|t| t == post_type)
    }

    pub fn is_comment_type_allowed(&self, comment_type: &str) -> bool {
        self.allowed_comment_types.iter().any(|t| t == comment_type)
    }

    pub fn is_query_arg_allowed(&self, key: &str) -> bool {
        self.allowed_query_args.iter().any(|k| k == key)
    }

    /// Taxonomies registered for `post_type`; empty for unknown types.
    pub fn taxonomies_for(&self, post_type: &str) -> &[String] {
        self.taxonomies
            .get(post_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for GraphSettings {
    fn default() -> Self {
        let config = crate::config::AppConfig::default();
        Self::from_config(&config.graph, &config.post_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    #[test]
    fn allowed_types_come_from_public_rest_types() {
        let settings = GraphSettings::default();
        assert_eq!(settings.allowed_post_types, vec!["post", "page", "attachment"]);
        assert!(!settings.is_post_type_allowed("revision"));
        assert_eq!(settings.taxonomies_for("post"), &["category", "post_tag"]);
        assert!(settings.taxonomies_for("unknown").is_empty());
    }

    #[test]
    fn explicit_allow_list_replaces_registry() {
        let mut config = AppConfig::default();
        config.graph.allowed_post_types = Some(vec!["page".to_string()]);
        let settings = GraphSettings::from_config(&config.graph, &config.post_types);
        assert_eq!(settings.allowed_post_types, vec!["page"]);
    }

    #[test]
    fn private_fields_include_shared_list() {
        let mut config = AppConfig::default();
        config.graph.private_term_fields = vec!["secret".to_string()];
        let settings = GraphSettings::from_config(&config.graph, &config.post_types);
        let fields: Vec<&str> = settings.private_fields(ResourceKind::Term).collect();
        assert_eq!(
            fields,
            vec![
                "secret",
                "_edit_last",
                "_edit_lock",
                "author_email",
                "author_ip",
                "agent",
                "user_id"
            ]
        );
    }

    #[test]
    fn default_shared_list_covers_every_kind() {
        let settings = GraphSettings::default();
        for kind in [ResourceKind::Post, ResourceKind::Term, ResourceKind::Comment] {
            let fields: Vec<&str> = settings.private_fields(kind).collect();
            assert!(fields.contains(&"_edit_lock"), "{kind:?}");
            assert!(fields.contains(&"user_id"), "{kind:?}");
        }
        let post: Vec<&str> = settings.private_fields(ResourceKind::Post).collect();
        assert_eq!(post[0], "password");
        assert!(!settings
            .private_fields(ResourceKind::Comment)
            .any(|f| f == "password"));
    }
}
