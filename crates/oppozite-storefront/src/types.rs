//! Storefront API response types for the meta lookups.
//!
//! ## Observed shape
//!
//! Every response is a GraphQL envelope `{ "data": ..., "errors": [...] }`.
//! An unknown handle is not an error: the API answers `200` with
//! `{"data": {"productByHandle": null}}`. Errors such as a bad access token
//! come back as `{"errors": [{"message": "..."}]}`, sometimes with a 200
//! status and no `data` key at all.
//!
//! ### Images
//! Products expose a paginated `images` connection (`edges[].node.url`);
//! collections expose a single nullable `image`. Both are optional here.
//!
//! ### `description`
//! Plain text with HTML stripped by Shopify. Often `""` for products created
//! without copy, which is why it is passed through and defaulted later.

use oppozite_core::EntityMeta;
use serde::Deserialize;

/// Top-level GraphQL envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductByHandleData {
    pub product_by_handle: Option<ProductNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionByHandleData {
    pub collection_by_handle: Option<CollectionNode>,
}

#[derive(Debug, Deserialize)]
pub struct ProductNode {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub images: Option<ImageConnection>,
}

#[derive(Debug, Deserialize)]
pub struct CollectionNode {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<Image>,
}

#[derive(Debug, Deserialize)]
pub struct ImageConnection {
    #[serde(default)]
    pub edges: Vec<ImageEdge>,
}

#[derive(Debug, Deserialize)]
pub struct ImageEdge {
    pub node: Image,
}

#[derive(Debug, Deserialize)]
pub struct Image {
    pub url: String,
}

impl From<ProductNode> for EntityMeta {
    fn from(node: ProductNode) -> Self {
        let image_url = node
            .images
            .and_then(|conn| conn.edges.into_iter().next())
            .map(|edge| edge.node.url);
        Self {
            title: node.title,
            description: node.description,
            image_url,
        }
    }
}

impl From<CollectionNode> for EntityMeta {
    fn from(node: CollectionNode) -> Self {
        Self {
            title: node.title,
            description: node.description,
            image_url: node.image.map(|img| img.url),
        }
    }
}
