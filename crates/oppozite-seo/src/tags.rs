use std::borrow::Cow;

use oppozite_core::MetaDescriptor;

/// Which attribute carries the tag key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaAttr {
    Name,
    Property,
}

impl MetaAttr {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MetaAttr::Name => "name",
            MetaAttr::Property => "property",
        }
    }
}

/// Meta tags owned by the rewriter, in the order they are emitted.
pub const SOCIAL_META_KEYS: [(MetaAttr, &str); 7] = [
    (MetaAttr::Property, "og:title"),
    (MetaAttr::Name, "twitter:title"),
    (MetaAttr::Name, "description"),
    (MetaAttr::Property, "og:description"),
    (MetaAttr::Name, "twitter:description"),
    (MetaAttr::Property, "og:image"),
    (MetaAttr::Name, "twitter:image"),
];

/// One `<meta>` record to be written into the head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialTag {
    pub attr: MetaAttr,
    pub key: &'static str,
    pub content: String,
}

impl SocialTag {
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            r#"<meta {}="{}" content="{}" />"#,
            self.attr.as_str(),
            self.key,
            escape_attr(&self.content)
        )
    }
}

/// Builds the full tag set for `meta`, one record per key in [`SOCIAL_META_KEYS`].
#[must_use]
pub fn social_tags(meta: &MetaDescriptor) -> Vec<SocialTag> {
    SOCIAL_META_KEYS
        .iter()
        .map(|&(attr, key)| {
            let content = if key.ends_with("title") {
                &meta.title
            } else if key.ends_with("description") {
                &meta.description
            } else {
                &meta.image_url
            };
            SocialTag {
                attr,
                key,
                content: content.clone(),
            }
        })
        .collect()
}

/// `true` if `key` (a `name`/`property` value) is one the rewriter owns.
#[must_use]
pub fn is_social_key(key: &str) -> bool {
    SOCIAL_META_KEYS
        .iter()
        .any(|(_, owned)| owned.eq_ignore_ascii_case(key.trim()))
}

/// Escapes a value for a double-quoted attribute.
#[must_use]
pub fn escape_attr(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Escapes text placed inside `<title>` so it cannot close the element.
#[must_use]
pub fn escape_text(value: &str) -> Cow<'_, str> {
    if value.contains('<') {
        Cow::Owned(value.replace('<', "&lt;"))
    } else {
        Cow::Borrowed(value)
    }
}
