//! Field resolution: one resource and a field spec to a [`FieldMap`].
//!
//! Per field, in order:
//! 1. an underscore-prefixed name resolves to the private-key placeholder while
//!    safe meta mode is on;
//! 2. kind-specific special fields (`title`, `content`, `terms`, `comments`);
//! 3. the native attribute of the same name;
//! 4. the resource's metadata, `""` when missing.
//!
//! Status gates run before any field is resolved and produce a
//! [`ResourceFailure`] carrying the offending ID.

use super::attributes::{comment_attribute, meta_value, post_attribute, term_attribute};
use super::error::{ResourceFailure, ResourceKind};
use super::field::{FieldMap, FieldValue};
use super::hooks::GraphHooks;
use super::request::{FieldSpec, IdToken, QUERY_KEYWORD};
use super::settings::{GraphSettings, PRIVATE_KEY_PLACEHOLDER};
use crate::clients::{CommentClient, PostClient, TermClient};
use crate::model::{Comment, Post, PostId, PostStatus, Term, TermId};
use content_store::TypedClient;
use std::sync::Arc;
use tracing::{debug, error};

/// Parent links followed when checking whether an inheriting post is readable.
const MAX_INHERIT_DEPTH: usize = 16;

/// A resource together with the fields resolved from it.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub fields: FieldMap,
    pub resource: T,
}

#[derive(Clone)]
pub struct FieldResolver {
    posts: PostClient,
    terms: TermClient,
    comments: CommentClient,
    settings: Arc<GraphSettings>,
    hooks: Arc<dyn GraphHooks>,
}

fn store_unavailable(
    kind: ResourceKind,
    id: u64,
    cause: &dyn std::error::Error,
) -> ResourceFailure {
    error!(kind = kind.as_str(), id, error = %cause, "Store lookup failed");
    ResourceFailure::StoreUnavailable {
        kind,
        id: id.to_string(),
    }
}

/// The numeric ID of `token`, or the not-found failure naming it.
fn token_id(token: &IdToken, kind: ResourceKind) -> Result<u64, ResourceFailure> {
    match token {
        IdToken::Id(id) => Ok(*id),
        IdToken::Query => Err(ResourceFailure::not_found(kind, QUERY_KEYWORD)),
        IdToken::Invalid(raw) => Err(ResourceFailure::not_found(kind, raw.as_str())),
    }
}

impl FieldResolver {
    pub fn new(
        posts: PostClient,
        terms: TermClient,
        comments: CommentClient,
        settings: Arc<GraphSettings>,
        hooks: Arc<dyn GraphHooks>,
    ) -> Self {
        Self {
            posts,
            terms,
            comments,
            settings,
            hooks,
        }
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    pub fn hooks(&self) -> &dyn GraphHooks {
        self.hooks.as_ref()
    }

    pub fn posts(&self) -> &PostClient {
        &self.posts
    }

    pub fn terms(&self) -> &TermClient {
        &self.terms
    }

    /// The placeholder for underscore-prefixed names under safe meta mode.
    fn private_placeholder(&self, name: &str) -> Option<FieldValue> {
        (self.settings.safe_meta_mode && name.starts_with('_'))
            .then(|| FieldValue::text(PRIVATE_KEY_PLACEHOLDER))
    }

    // =========================================================================
    // POSTS
    // =========================================================================

    pub async fn resolve_post(
        &self,
        token: &IdToken,
        fields: &FieldSpec,
    ) -> Result<Resolved<Post>, ResourceFailure> {
        let post = self.load_post(token).await?;
        let mut map = FieldMap::new();
        for name in fields.iter() {
            let value = match self.private_placeholder(name) {
                Some(placeholder) => placeholder,
                None => self.post_field(&post, name).await?,
            };
            map.insert(name, value);
        }
        debug!(post_id = %post.id, fields = map.len(), "Resolved post");
        Ok(Resolved {
            fields: map,
            resource: post,
        })
    }

    async fn load_post(&self, token: &IdToken) -> Result<Post, ResourceFailure> {
        let id = token_id(token, ResourceKind::Post)?;
        let post = self
            .posts
            .get(PostId(id))
            .await
            .map_err(|e| store_unavailable(ResourceKind::Post, id, &e))?
            .ok_or_else(|| ResourceFailure::not_found(ResourceKind::Post, id.to_string()))?;
        if !post.is_published() {
            return Err(ResourceFailure::PostNotPublished(id.to_string()));
        }
        if post.is_password_protected() || !self.settings.is_post_type_allowed(&post.post_type) {
            return Err(ResourceFailure::PostPermissionDenied(id.to_string()));
        }
        Ok(post)
    }

    async fn post_field(&self, post: &Post, name: &str) -> Result<FieldValue, ResourceFailure> {
        let value = match name {
            "content" => FieldValue::Rendered {
                raw: post.content.clone(),
                rendered: self.hooks.render_content(post),
            },
            "title" => FieldValue::Rendered {
                raw: post.title.clone(),
                rendered: self.hooks.render_title(post),
            },
            "terms" => self.term_ids_for_post(post).await?,
            "comments" => self.comment_ids_for_post(post).await?,
            _ => post_attribute(post, name).unwrap_or_else(|| meta_value(&post.meta, name)),
        };
        Ok(value)
    }

    /// Attached terms whose taxonomy is registered for the post's type.
    /// Terms that have disappeared from the store are skipped.
    async fn term_ids_for_post(&self, post: &Post) -> Result<FieldValue, ResourceFailure> {
        let taxonomies = self.settings.taxonomies_for(&post.post_type);
        if taxonomies.is_empty() {
            return Ok(FieldValue::text(""));
        }
        let mut ids = Vec::with_capacity(post.term_ids.len());
        for &term_id in &post.term_ids {
            let term = self
                .terms
                .get(term_id)
                .await
                .map_err(|e| store_unavailable(ResourceKind::Term, term_id.0, &e))?;
            if let Some(term) = term {
                if taxonomies.contains(&term.taxonomy) {
                    ids.push(term.id.0);
                }
            }
        }
        Ok(FieldValue::id_list(ids))
    }

    async fn comment_ids_for_post(&self, post: &Post) -> Result<FieldValue, ResourceFailure> {
        let comments = self
            .comments
            .approved_for_post(post.id)
            .await
            .map_err(|e| store_unavailable(ResourceKind::Post, post.id.0, &e))?;
        Ok(FieldValue::id_list(comments.iter().map(|c| c.id.0)))
    }

    /// Whether `post` may be read without authentication: no password, an
    /// allowed type, and published, or inheriting from a readable parent.
    pub async fn can_read(&self, post: &Post) -> Result<bool, ResourceFailure> {
        let mut current = post.clone();
        for _ in 0..MAX_INHERIT_DEPTH {
            if current.is_password_protected()
                || !self.settings.is_post_type_allowed(&current.post_type)
            {
                return Ok(false);
            }
            match current.status {
                PostStatus::Publish => return Ok(true),
                PostStatus::Inherit if current.parent > 0 => {
                    let parent = self
                        .posts
                        .get(PostId(current.parent))
                        .await
                        .map_err(|e| store_unavailable(ResourceKind::Post, current.parent, &e))?;
                    match parent {
                        Some(parent) => current = parent,
                        None => return Ok(false),
                    }
                }
                PostStatus::Inherit => return Ok(true),
                _ => return Ok(false),
            }
        }
        Ok(false)
    }

    // =========================================================================
    // TERMS
    // =========================================================================

    pub async fn resolve_term(
        &self,
        token: &IdToken,
        fields: &FieldSpec,
    ) -> Result<Resolved<Term>, ResourceFailure> {
        let id = token_id(token, ResourceKind::Term)?;
        let term = self
            .terms
            .get(TermId(id))
            .await
            .map_err(|e| store_unavailable(ResourceKind::Term, id, &e))?
            .ok_or_else(|| ResourceFailure::not_found(ResourceKind::Term, id.to_string()))?;

        let mut map = FieldMap::new();
        for name in fields.iter() {
            let value = self
                .private_placeholder(name)
                .or_else(|| term_attribute(&term, name))
                .unwrap_or_else(|| meta_value(&term.meta, name));
            map.insert(name, value);
        }
        Ok(Resolved {
            fields: map,
            resource: term,
        })
    }

    // =========================================================================
    // COMMENTS
    // =========================================================================

    pub async fn resolve_comment(
        &self,
        token: &IdToken,
        fields: &FieldSpec,
    ) -> Result<Resolved<Comment>, ResourceFailure> {
        let id = token_id(token, ResourceKind::Comment)?;
        let comment = self
            .comments
            .get(crate::model::CommentId(id))
            .await
            .map_err(|e| store_unavailable(ResourceKind::Comment, id, &e))?
            .ok_or_else(|| ResourceFailure::not_found(ResourceKind::Comment, id.to_string()))?;
        if !comment.is_approved() {
            return Err(ResourceFailure::CommentNotApproved(id.to_string()));
        }
        if !self.settings.is_comment_type_allowed(&comment.comment_type) {
            return Err(ResourceFailure::CommentTypeDisallowed(id.to_string()));
        }

        let mut map = FieldMap::new();
        for name in fields.iter() {
            let value = match self.private_placeholder(name) {
                Some(placeholder) => placeholder,
                None if name == "content" => FieldValue::Rendered {
                    raw: comment.content.clone(),
                    rendered: self.hooks.render_comment(&comment),
                },
                None => comment_attribute(&comment, name)
                    .unwrap_or_else(|| meta_value(&comment.meta, name)),
            };
            map.insert(name, value);
        }
        Ok(Resolved {
            fields: map,
            resource: comment,
        })
    }
}
