//! Command handlers for `lookup` and `preview`.
//!
//! `preview` follows the same degradation rules as the server route: a failed
//! lookup falls back to the brand defaults and is noted in the trace.

use std::time::Duration;

use anyhow::Context;
use oppozite_core::{AppConfig, EntityMeta, LookupTarget, MetaDescriptor, MetaRequest};
use oppozite_seo::{render_document, SeoTrace};
use oppozite_storefront::{queries::operation_name, StorefrontClient};

fn require_target(request: &MetaRequest) -> anyhow::Result<LookupTarget> {
    request
        .target()
        .ok_or_else(|| anyhow::anyhow!("provide --handle and/or --collection"))
}

/// Print the resolved [`MetaDescriptor`] for a handle as pretty JSON.
///
/// # Errors
///
/// Returns an error if no identifier is given or the lookup fails.
pub(crate) async fn run_lookup(config: &AppConfig, request: &MetaRequest) -> anyhow::Result<()> {
    let target = require_target(request)?;
    let client = StorefrontClient::from_config(config)?;
    let entity = client
        .lookup(&target)
        .await
        .with_context(|| format!("{} lookup failed", operation_name(&target)))?;

    if entity.is_none() {
        tracing::warn!(
            kind = target.kind(),
            handle = target.handle(),
            "no entity found; showing defaults"
        );
    }

    let meta = MetaDescriptor::resolve(entity.as_ref(), &config.default_image_url());
    println!("{}", serde_json::to_string_pretty(&meta)?);
    Ok(())
}

/// Rewrite `base` (file path or URL) for the requested entity and print it.
///
/// # Errors
///
/// Returns an error if no identifier is given or the base document cannot be
/// read. Lookup failures are not errors.
pub(crate) async fn run_preview(
    config: &AppConfig,
    request: &MetaRequest,
    base: &str,
    with_trace: bool,
) -> anyhow::Result<()> {
    let target = require_target(request)?;
    let client = StorefrontClient::from_config(config)?;

    let (lookup, base_html) = tokio::join!(client.lookup(&target), load_base(config, base));
    let base_html = base_html?;

    let mut trace = SeoTrace::new();
    trace.record("handle", request.handle.as_deref().unwrap_or("(none)"));
    trace.record(
        "collection",
        request.collection_handle.as_deref().unwrap_or("(none)"),
    );
    trace.record("query", operation_name(&target));
    let entity = resolve_lookup(&target, lookup, &mut trace);

    let meta = MetaDescriptor::resolve(entity.as_ref(), &config.default_image_url());
    trace.record("image", &meta.image_url);
    trace.record("html_source", base);

    let rendered = render_document(&base_html, &meta, with_trace.then_some(&trace));
    if !rendered.head_rewritten {
        tracing::warn!(base, "base document has no </head>; tags were not rewritten");
    }
    println!("{}", rendered.html);
    Ok(())
}

fn resolve_lookup(
    target: &LookupTarget,
    lookup: Result<Option<EntityMeta>, oppozite_storefront::StorefrontError>,
    trace: &mut SeoTrace,
) -> Option<EntityMeta> {
    match lookup {
        Ok(entity) => {
            trace.record("found", entity.is_some());
            entity
        }
        Err(e) => {
            tracing::warn!(
                kind = target.kind(),
                handle = target.handle(),
                error = %e,
                "lookup failed; using default metadata"
            );
            trace.record("found", false);
            trace.record("lookup_error", &e);
            None
        }
    }
}

async fn load_base(config: &AppConfig, base: &str) -> anyhow::Result<String> {
    if base.starts_with("http://") || base.starts_with("https://") {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        let response = client
            .get(base)
            .send()
            .await
            .with_context(|| format!("fetching base document {base}"))?
            .error_for_status()?;
        return Ok(response.text().await?);
    }

    tokio::fs::read_to_string(base)
        .await
        .with_context(|| format!("reading base document {base}"))
}
