//! Response assembly for every endpoint.
//!
//! Each ID goes through the resolver, then the privacy filter, then the
//! kind's transform hook. Successes land in the kind's sequence and failure
//! messages in the shared `errors` sequence, in iteration order. A failing item
//! never stops the batch.

use super::error::{GraphError, ResourceFailure, ResourceKind};
use super::field::FieldMap;
use super::privacy;
use super::query::query_post_ids;
use super::request::{dedup_ids, FieldSpec, IdToken, KindRequest, RawParams};
use super::resolver::FieldResolver;
use crate::model::PostId;
use content_store::TypedClient;
use serde::Serialize;
use tracing::{debug, error, info, instrument};

/// The body of every batch endpoint. Empty sequences are left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateResponse {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub posts: Vec<FieldMap>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub terms: Vec<FieldMap>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<FieldMap>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Whether failures of a resolution pass are reported or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Failures {
    Report,
    Drop,
}

#[derive(Clone)]
pub struct ResponseAssembler {
    resolver: FieldResolver,
}

impl ResponseAssembler {
    pub fn new(resolver: FieldResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &FieldResolver {
        &self.resolver
    }

    fn defaults(&self, kind: ResourceKind) -> &[String] {
        self.resolver.settings().default_fields(kind)
    }

    fn finish(&self, response: AggregateResponse, params: &RawParams) -> AggregateResponse {
        info!(
            posts = response.posts.len(),
            terms = response.terms.len(),
            comments = response.comments.len(),
            errors = response.errors.len(),
            "Assembled response"
        );
        self.resolver.hooks().transform_response(response, params)
    }

    // =========================================================================
    // ENDPOINTS
    // =========================================================================

    /// `/posts`: deduplicated posts, `query` expansion, attached terms and comments.
    #[instrument(skip_all)]
    pub async fn posts(&self, params: &RawParams) -> Result<AggregateResponse, GraphError> {
        let request = KindRequest::parse(
            params,
            ResourceKind::Post,
            "ids",
            "fields",
            self.defaults(ResourceKind::Post),
        )?;
        let term_fields =
            FieldSpec::expand(params.list("term_fields"), self.defaults(ResourceKind::Term));
        let comment_fields = FieldSpec::expand(
            params.list("comment_fields"),
            self.defaults(ResourceKind::Comment),
        );

        let mut response = AggregateResponse::default();
        let ids = self.expand_query(request.ids, params, &mut response).await;
        let ids = dedup_ids(ids);
        debug!(count = ids.len(), "Resolving posts");

        for token in &ids {
            let post = match self.project_post(token, &request.fields).await {
                Ok(post) => post,
                Err(failure) => {
                    response.errors.push(failure.to_string());
                    continue;
                }
            };

            let term_ids = child_ids(&post, "terms");
            let comment_ids = child_ids(&post, "comments");
            response.posts.push(post);

            if !term_fields.is_empty() {
                self.collect_terms(&term_ids, &term_fields, &mut response, Failures::Drop)
                    .await;
            }
            if !comment_fields.is_empty() {
                self.collect_comments(&comment_ids, &comment_fields, &mut response, Failures::Drop)
                    .await;
            }
        }

        Ok(self.finish(response, params))
    }

    /// `/terms`: deduplicated terms.
    #[instrument(skip_all)]
    pub async fn terms(&self, params: &RawParams) -> Result<AggregateResponse, GraphError> {
        let request = KindRequest::parse(
            params,
            ResourceKind::Term,
            "ids",
            "fields",
            self.defaults(ResourceKind::Term),
        )?;
        let mut response = AggregateResponse::default();
        let ids = dedup_ids(request.ids);
        self.collect_terms(&ids, &request.fields, &mut response, Failures::Report)
            .await;
        Ok(self.finish(response, params))
    }

    /// `/comments`: deduplicated comments.
    #[instrument(skip_all)]
    pub async fn comments(&self, params: &RawParams) -> Result<AggregateResponse, GraphError> {
        let request = KindRequest::parse(
            params,
            ResourceKind::Comment,
            "ids",
            "fields",
            self.defaults(ResourceKind::Comment),
        )?;
        let mut response = AggregateResponse::default();
        let ids = dedup_ids(request.ids);
        self.collect_comments(&ids, &request.fields, &mut response, Failures::Report)
            .await;
        Ok(self.finish(response, params))
    }

    /// `/any`: posts, terms and comments in one batch, in that order, without
    /// deduplication or query expansion.
    #[instrument(skip_all)]
    pub async fn any(&self, params: &RawParams) -> Result<AggregateResponse, GraphError> {
        let posts = KindRequest::parse_optional(
            params,
            ResourceKind::Post,
            "posts",
            "post_fields",
            self.defaults(ResourceKind::Post),
        )?;
        let terms = KindRequest::parse_optional(
            params,
            ResourceKind::Term,
            "terms",
            "term_fields",
            self.defaults(ResourceKind::Term),
        )?;
        let comments = KindRequest::parse_optional(
            params,
            ResourceKind::Comment,
            "comments",
            "comment_fields",
            self.defaults(ResourceKind::Comment),
        )?;
        if posts.is_none() && terms.is_none() && comments.is_none() {
            return Err(GraphError::NoIdsSpecified(ResourceKind::Post));
        }

        let mut response = AggregateResponse::default();
        if let Some(posts) = posts {
            // The keyword only means something on /posts.
            let ids: Vec<IdToken> = posts
                .ids
                .into_iter()
                .map(|id| match id {
                    IdToken::Query => IdToken::Invalid("query".to_string()),
                    other => other,
                })
                .collect();
            self.collect_posts(&ids, &posts.fields, &mut response).await;
        }
        if let Some(terms) = terms {
            self.collect_terms(&terms.ids, &terms.fields, &mut response, Failures::Report)
                .await;
        }
        if let Some(comments) = comments {
            self.collect_comments(&comments.ids, &comments.fields, &mut response, Failures::Report)
                .await;
        }
        Ok(self.finish(response, params))
    }

    /// `/post/{id}`: the bare field object of one published post.
    ///
    /// Fields come from native attributes, then metadata, without the special
    /// fields or placeholder of the batch endpoints. Only `password` is nulled.
    #[instrument(skip(self, params))]
    pub async fn legacy_post(&self, id: &str, params: &RawParams) -> Result<FieldMap, GraphError> {
        let id: u64 = id.trim().parse().map_err(|_| GraphError::PostNotFound)?;
        let post = self
            .resolver
            .posts()
            .get(PostId(id))
            .await
            .map_err(|e| {
                error!(id, error = %e, "Store lookup failed");
                GraphError::StoreUnavailable(id)
            })?
            .ok_or(GraphError::PostNotFound)?;
        let fields = params.list("fields");
        let settings = self.resolver.settings();

        if !post.is_published() {
            return Err(GraphError::AccessNotPermitted(id));
        }
        if fields.is_empty() {
            return Err(GraphError::NoFields);
        }
        if !settings.legacy_post_types.iter().any(|t| *t == post.post_type) {
            return Err(GraphError::PostNotFound);
        }

        let mut map = FieldMap::new();
        for name in &fields {
            let value = super::attributes::post_attribute(&post, name)
                .unwrap_or_else(|| super::attributes::meta_value(&post.meta, name));
            map.insert(name.as_str(), value);
        }
        map.nullify("password");
        Ok(self.resolver.hooks().transform_legacy_post(map, &post))
    }

    // =========================================================================
    // RESOLUTION PASSES
    // =========================================================================

    /// Replaces `query` tokens with the IDs of the post query, appended after
    /// the explicit IDs. The query only runs when at least one filter was given.
    async fn expand_query(
        &self,
        ids: Vec<IdToken>,
        params: &RawParams,
        response: &mut AggregateResponse,
    ) -> Vec<IdToken> {
        if !ids.contains(&IdToken::Query) {
            return ids;
        }
        let mut ids: Vec<IdToken> = ids.into_iter().filter(|id| *id != IdToken::Query).collect();
        if params.filters().is_empty() {
            return ids;
        }
        match query_post_ids(&self.resolver, params.filters()).await {
            Ok(found) => ids.extend(found.into_iter().map(IdToken::Id)),
            Err(failure) => response.errors.push(failure.to_string()),
        }
        ids
    }

    /// Resolver, privacy filter and transform hook for one post.
    async fn project_post(
        &self,
        token: &IdToken,
        fields: &FieldSpec,
    ) -> Result<FieldMap, ResourceFailure> {
        let resolved = self.resolver.resolve_post(token, fields).await?;
        let map = privacy::apply(resolved.fields, ResourceKind::Post, self.resolver.settings());
        Ok(self.resolver.hooks().transform_post(map, &resolved.resource))
    }

    async fn collect_posts(
        &self,
        ids: &[IdToken],
        fields: &FieldSpec,
        response: &mut AggregateResponse,
    ) {
        for token in ids {
            match self.project_post(token, fields).await {
                Ok(post) => response.posts.push(post),
                Err(failure) => response.errors.push(failure.to_string()),
            }
        }
    }

    async fn collect_terms(
        &self,
        ids: &[IdToken],
        fields: &FieldSpec,
        response: &mut AggregateResponse,
        failures: Failures,
    ) {
        for token in ids {
            match self.resolver.resolve_term(token, fields).await {
                Ok(resolved) => {
                    let settings = self.resolver.settings();
                    let map = privacy::apply(resolved.fields, ResourceKind::Term, settings);
                    response
                        .terms
                        .push(self.resolver.hooks().transform_term(map, &resolved.resource));
                }
                Err(failure) => report(failure, failures, response),
            }
        }
    }

    async fn collect_comments(
        &self,
        ids: &[IdToken],
        fields: &FieldSpec,
        response: &mut AggregateResponse,
        failures: Failures,
    ) {
        for token in ids {
            match self.resolver.resolve_comment(token, fields).await {
                Ok(resolved) => {
                    let settings = self.resolver.settings();
                    let map = privacy::apply(resolved.fields, ResourceKind::Comment, settings);
                    response
                        .comments
                        .push(self.resolver.hooks().transform_comment(map, &resolved.resource));
                }
                Err(failure) => report(failure, failures, response),
            }
        }
    }
}

fn report(failure: ResourceFailure, failures: Failures, response: &mut AggregateResponse) {
    match failures {
        Failures::Report => response.errors.push(failure.to_string()),
        Failures::Drop => debug!(%failure, "Dropping sub-resource failure"),
    }
}

/// The IDs listed in a post's `terms` or `comments` field, if it was resolved.
fn child_ids(post: &FieldMap, name: &str) -> Vec<IdToken> {
    post.get(name)
        .and_then(|value| value.as_text())
        .map(|list| {
            list.split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| IdToken::parse(id, false))
                .collect()
        })
        .unwrap_or_default()
}
