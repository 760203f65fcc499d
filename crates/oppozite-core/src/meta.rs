//! Social-preview domain model: what a request asks for, what the commerce
//! backend returns, and the fully populated metadata that gets written into
//! the page head.

use serde::{Deserialize, Serialize};

/// Brand suffix for entity titles and the bare default title.
pub const BRAND_NAME: &str = "Oppozite Wears";

/// Description used whenever the entity has none (or none was found).
pub const DEFAULT_DESCRIPTION: &str = "Premium streetwear for those who dare to be different";

/// Identifiers taken from the `handle` and `collection` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetaRequest {
    pub handle: Option<String>,
    #[serde(rename = "collection")]
    pub collection_handle: Option<String>,
}

/// Which entity to look up. Built only from a non-empty identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "handle", rename_all = "snake_case")]
pub enum LookupTarget {
    Product(String),
    Collection(String),
}

/// Title, description and primary image as returned by the commerce backend.
///
/// Fields are passed through untouched; empty strings are resolved to
/// defaults by [`MetaDescriptor::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
}

/// Fully populated metadata for one page. Never partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaDescriptor {
    pub title: String,
    pub description: String,
    pub image_url: String,
}

impl MetaRequest {
    /// Returns the entity to look up, or `None` when neither identifier is set.
    ///
    /// A collection handle wins over a product handle when both are present.
    /// Blank values count as absent.
    #[must_use]
    pub fn target(&self) -> Option<LookupTarget> {
        if let Some(collection) = non_blank(self.collection_handle.as_deref()) {
            return Some(LookupTarget::Collection(collection.to_owned()));
        }
        non_blank(self.handle.as_deref()).map(|h| LookupTarget::Product(h.to_owned()))
    }
}

impl LookupTarget {
    #[must_use]
    pub fn handle(&self) -> &str {
        match self {
            LookupTarget::Product(h) | LookupTarget::Collection(h) => h,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            LookupTarget::Product(_) => "product",
            LookupTarget::Collection(_) => "collection",
        }
    }
}

impl MetaDescriptor {
    /// The brand-level fallback triple.
    #[must_use]
    pub fn defaults(default_image_url: &str) -> Self {
        Self::resolve(None, default_image_url)
    }

    /// Resolves each field independently: an entity with a title but no
    /// description still gets the default description, and so on.
    #[must_use]
    pub fn resolve(entity: Option<&EntityMeta>, default_image_url: &str) -> Self {
        let title = entity
            .and_then(|e| non_blank(Some(e.title.as_str())))
            .map_or_else(|| BRAND_NAME.to_owned(), |t| format!("{t} | {BRAND_NAME}"));
        let description = entity
            .and_then(|e| non_blank(Some(e.description.as_str())))
            .unwrap_or(DEFAULT_DESCRIPTION)
            .to_owned();
        let image_url = entity
            .and_then(|e| non_blank(e.image_url.as_deref()))
            .unwrap_or(default_image_url)
            .to_owned();

        Self {
            title,
            description,
            image_url,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
