//! `GET /api/seo`: serves the storefront shell with social-preview tags for
//! one product or collection.
//!
//! Never answers with an error status. A failed lookup degrades to the brand
//! defaults; a missing base document degrades to a redirect to `/`.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use oppozite_core::{MetaDescriptor, MetaRequest};
use oppozite_seo::{render_document, SeoTrace};
use oppozite_storefront::queries::operation_name;

use super::AppState;
use crate::document::DocumentError;
use crate::middleware::RequestId;
use crate::origin::RequestOrigin;

pub(super) const CACHE_CONTROL_VALUE: &str = "s-maxage=60, stale-while-revalidate=300";
pub(super) const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

pub(super) async fn social_preview(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    query: Result<Query<MetaRequest>, QueryRejection>,
) -> Response {
    let request = match query {
        Ok(Query(request)) => request,
        Err(e) => {
            tracing::debug!(request_id = %req_id.0, error = %e, "unparseable query; redirecting");
            return Redirect::temporary("/").into_response();
        }
    };
    let Some(target) = request.target() else {
        return Redirect::temporary("/").into_response();
    };

    let mut trace = SeoTrace::new();
    trace.record("request_id", &req_id.0);
    trace.record("handle", request.handle.as_deref().unwrap_or("(none)"));
    trace.record(
        "collection",
        request.collection_handle.as_deref().unwrap_or("(none)"),
    );
    trace.record("query", operation_name(&target));

    let origin = RequestOrigin::from_headers(&headers);
    let document_url = origin.as_ref().map(RequestOrigin::document_url);

    let fetch_document = async {
        match document_url.as_deref() {
            Some(url) => state.documents.fetch(url).await,
            None => Err(DocumentError::MissingHost),
        }
    };
    let (lookup, document) = tokio::join!(state.storefront.lookup(&target), fetch_document);

    let base_html = match document {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(
                request_id = %req_id.0,
                handle = target.handle(),
                url = document_url.as_deref().unwrap_or("(none)"),
                error = %e,
                "base document unavailable; redirecting to root"
            );
            return Redirect::temporary("/").into_response();
        }
    };

    let entity = match lookup {
        Ok(Some(entity)) => {
            trace.record("found", true);
            Some(entity)
        }
        Ok(None) => {
            trace.record("found", false);
            None
        }
        Err(e) => {
            tracing::warn!(
                request_id = %req_id.0,
                kind = target.kind(),
                handle = target.handle(),
                error = %e,
                "storefront lookup failed; using default metadata"
            );
            trace.record("found", false);
            trace.record("lookup_error", &e);
            None
        }
    };

    let meta = MetaDescriptor::resolve(entity.as_ref(), &state.config.default_image_url());
    trace.record("image", &meta.image_url);
    trace.record("html_source", document_url.as_deref().unwrap_or("(none)"));

    let rendered = render_document(
        &base_html,
        &meta,
        state.config.seo_trace_enabled.then_some(&trace),
    );

    tracing::info!(
        request_id = %req_id.0,
        kind = target.kind(),
        handle = target.handle(),
        found = entity.is_some(),
        image = %meta.image_url,
        head_rewritten = rendered.head_rewritten,
        "served social preview"
    );

    (
        StatusCode::OK,
        [
            (header::CACHE_CONTROL, CACHE_CONTROL_VALUE),
            (header::CONTENT_TYPE, HTML_CONTENT_TYPE),
        ],
        rendered.html,
    )
        .into_response()
}

#[cfg(test)]
#[path = "seo_test.rs"]
mod tests;
