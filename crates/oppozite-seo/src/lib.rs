//! Social-preview HTML rewriting.
//!
//! Works on the built storefront shell as a plain string. The head rewrite
//! strips every existing title and social meta tag and appends a fresh set
//! before `</head>`, so applying it to its own output changes nothing.

pub mod document;
pub mod head;
pub mod tags;
pub mod trace;

pub use document::{render_document, RenderedDocument};
pub use head::rewrite_head;
pub use tags::{escape_attr, social_tags, MetaAttr, SocialTag, SOCIAL_META_KEYS};
pub use trace::{append_trace, SeoTrace};
