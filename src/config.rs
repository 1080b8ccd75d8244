//! Service configuration.
//!
//! Read from the TOML file named by `GRAPH_API_CONFIG`; when the variable is
//! unset every section takes its built-in defaults. Verbosity is controlled
//! separately through `RUST_LOG`.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable holding the config file path.
pub const CONFIG_ENV: &str = "GRAPH_API_CONFIG";

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub graph: GraphConfig,
    /// Post-type registry. The allowed post types are derived from it.
    pub post_types: Vec<PostTypeConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            graph: GraphConfig::default(),
            post_types: default_post_types(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Path prefix all routes are mounted under.
    pub base_path: String,
    /// JSON fixture imported into the stores at startup.
    pub seed_path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            base_path: "/graph/v1".to_string(),
            seed_path: None,
        }
    }
}

/// Field selection and privacy knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Redact every underscore-prefixed field with a placeholder.
    pub safe_meta_mode: bool,
    pub default_post_fields: Vec<String>,
    pub default_term_fields: Vec<String>,
    pub default_comment_fields: Vec<String>,
    pub private_post_fields: Vec<String>,
    pub private_term_fields: Vec<String>,
    pub private_comment_fields: Vec<String>,
    /// Fields nulled on every kind.
    pub private_fields: Vec<String>,
    /// Comment types that may be returned. `""` is the regular comment type.
    pub allowed_comment_types: Vec<String>,
    /// Filter keys accepted by post queries.
    pub allowed_query_args: Vec<String>,
    /// Replaces the post types derived from the registry when set.
    pub allowed_post_types: Option<Vec<String>>,
    pub posts_per_page: usize,
    /// Post types served by the single-post endpoint.
    pub legacy_post_types: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            safe_meta_mode: true,
            default_post_fields: strings(&["id", "title"]),
            default_term_fields: strings(&["id", "name"]),
            default_comment_fields: strings(&["id", "author", "content"]),
            private_post_fields: strings(&["password"]),
            private_term_fields: Vec::new(),
            private_comment_fields: Vec::new(),
            private_fields: strings(SHARED_PRIVATE_FIELDS),
            allowed_comment_types: strings(&[""]),
            allowed_query_args: strings(DEFAULT_QUERY_ARGS),
            allowed_post_types: None,
            posts_per_page: 10,
            legacy_post_types: strings(&["post", "page"]),
        }
    }
}

/// Fields nulled on posts, terms and comments alike unless configured otherwise.
pub const SHARED_PRIVATE_FIELDS: &[&str] = &[
    "_edit_last",
    "_edit_lock",
    "author_email",
    "author_ip",
    "agent",
    "user_id",
];

/// Filter keys accepted by post queries unless configured otherwise.
pub const DEFAULT_QUERY_ARGS: &[&str] = &[
    "author",
    "author__in",
    "author__not_in",
    "cat",
    "category__in",
    "category__and",
    "category__not_in",
    "category_name",
    "tag",
    "tag_id",
    "tag__in",
    "tag__and",
    "tag__not_in",
    "tag_slug__in",
    "tag_slug__and",
    "day",
    "monthnum",
    "year",
    "hour",
    "minute",
    "second",
    "w",
    "m",
    "s",
    "p",
    "name",
    "pagename",
    "post_name__in",
    "post__in",
    "post__not_in",
    "post_parent",
    "post_parent__in",
    "post_parent__not_in",
    "post_type",
    "meta_key",
    "meta_value",
    "meta_value_num",
    "meta_compare",
    "offset",
    "page",
    "paged",
    "posts_per_page",
    "nopaging",
    "ignore_sticky_posts",
    "order",
    "orderby",
    "menu_order",
];

/// One entry of the post-type registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostTypeConfig {
    pub name: String,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub show_in_rest: bool,
    /// Taxonomies registered for this post type.
    #[serde(default)]
    pub taxonomies: Vec<String>,
}

impl PostTypeConfig {
    fn new(name: &str, public: bool, show_in_rest: bool, taxonomies: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            public,
            show_in_rest,
            taxonomies: strings(taxonomies),
        }
    }
}

fn default_post_types() -> Vec<PostTypeConfig> {
    vec![
        PostTypeConfig::new("post", true, true, &["category", "post_tag"]),
        PostTypeConfig::new("page", true, true, &[]),
        PostTypeConfig::new("attachment", true, true, &[]),
        PostTypeConfig::new("revision", false, false, &[]),
        PostTypeConfig::new("nav_menu_item", false, false, &["nav_menu"]),
    ]
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str::<AppConfig>(contents)?)
    }

    /// Loads the file named by [`CONFIG_ENV`], or the built-in defaults.
    pub fn load() -> Result<Self> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO failure when reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),
}
