//! Endpoint handlers. Each one turns the query string (and path segment, when
//! present) into [`RawParams`] and hands it to the assembler.

use super::error::ApiError;
use crate::graph::{AggregateResponse, FieldMap, RawParams, ResponseAssembler};
use axum::extract::{Path, Query};
use axum::{Extension, Json};

type Pairs = Query<Vec<(String, String)>>;
type Batch = Result<Json<AggregateResponse>, ApiError>;

pub async fn legacy_post(
    Extension(assembler): Extension<ResponseAssembler>,
    Path(id): Path<String>,
    Query(pairs): Pairs,
) -> Result<Json<FieldMap>, ApiError> {
    let params = RawParams::from_pairs(pairs);
    Ok(Json(assembler.legacy_post(&id, &params).await?))
}

pub async fn any(Extension(assembler): Extension<ResponseAssembler>, Query(pairs): Pairs) -> Batch {
    let params = RawParams::from_pairs(pairs);
    Ok(Json(assembler.any(&params).await?))
}

pub async fn posts(
    Extension(assembler): Extension<ResponseAssembler>,
    Query(pairs): Pairs,
) -> Batch {
    let params = RawParams::from_pairs(pairs);
    Ok(Json(assembler.posts(&params).await?))
}

pub async fn posts_by_path(
    Extension(assembler): Extension<ResponseAssembler>,
    Path(ids): Path<String>,
    Query(pairs): Pairs,
) -> Batch {
    let params = RawParams::from_pairs(pairs).with_path_param("ids", ids);
    Ok(Json(assembler.posts(&params).await?))
}

pub async fn terms(
    Extension(assembler): Extension<ResponseAssembler>,
    Query(pairs): Pairs,
) -> Batch {
    let params = RawParams::from_pairs(pairs);
    Ok(Json(assembler.terms(&params).await?))
}

pub async fn terms_by_path(
    Extension(assembler): Extension<ResponseAssembler>,
    Path(ids): Path<String>,
    Query(pairs): Pairs,
) -> Batch {
    let params = RawParams::from_pairs(pairs).with_path_param("ids", ids);
    Ok(Json(assembler.terms(&params).await?))
}

pub async fn comments(
    Extension(assembler): Extension<ResponseAssembler>,
    Query(pairs): Pairs,
) -> Batch {
    let params = RawParams::from_pairs(pairs);
    Ok(Json(assembler.comments(&params).await?))
}

pub async fn comments_by_path(
    Extension(assembler): Extension<ResponseAssembler>,
    Path(ids): Path<String>,
    Query(pairs): Pairs,
) -> Batch {
    let params = RawParams::from_pairs(pairs).with_path_param("ids", ids);
    Ok(Json(assembler.comments(&params).await?))
}
