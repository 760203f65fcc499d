//! GraphQL documents sent to the Storefront API.
//!
//! Both select only what a social preview needs: title, plain-text
//! description and the first image.

use oppozite_core::LookupTarget;

pub const PRODUCT_META_QUERY: &str = r"
  query getProductMeta($handle: String!) {
    productByHandle(handle: $handle) {
      title
      description
      images(first: 1) {
        edges {
          node {
            url
          }
        }
      }
    }
  }
";

pub const COLLECTION_META_QUERY: &str = r"
  query getCollectionMeta($handle: String!) {
    collectionByHandle(handle: $handle) {
      title
      description
      image {
        url
      }
    }
  }
";

/// Root field queried for `target`, as it appears in the response `data`.
#[must_use]
pub fn operation_name(target: &LookupTarget) -> &'static str {
    match target {
        LookupTarget::Product(_) => "productByHandle",
        LookupTarget::Collection(_) => "collectionByHandle",
    }
}
