use std::sync::LazyLock;

use oppozite_core::MetaDescriptor;
use regex::{Captures, Regex};

use crate::tags::{escape_text, is_social_key, social_tags};

static HEAD_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</head\s*>").expect("valid head regex"));
static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title\b[^>]*>.*?</title\s*>(?:\r?\n)?").expect("valid title regex")
});
// Openers left over once every closed title is gone.
static TITLE_OPEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<title\b[^>]*>(?:\r?\n)?").expect("valid title opener regex")
});
// Quoted attribute values may contain `>`.
static META_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\b(?:[^>"']|"[^"]*"|'[^']*')*>(?:\r?\n)?"#).expect("valid meta regex")
});
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("valid attribute regex")
});

/// Replaces the title and social meta tags in `html`.
///
/// Every existing `<title>` and every `<meta>` whose `name` or `property` is
/// one of the owned keys is removed from the head, whatever its attribute
/// order, quoting or trailing slash. One fresh title and one tag per key are
/// then appended right before `</head>`. Markup after `</head>` is untouched.
///
/// Returns `None` when the document has no `</head>`.
#[must_use]
pub fn rewrite_head(html: &str, meta: &MetaDescriptor) -> Option<String> {
    let close = HEAD_CLOSE_RE.find(html)?.start();
    let (head, rest) = html.split_at(close);

    let head = TITLE_RE.replace_all(head, "");
    let head = TITLE_OPEN_RE.replace_all(&head, "");
    let head = META_TAG_RE.replace_all(&head, |caps: &Captures<'_>| {
        let tag = &caps[0];
        if meta_keys(tag).any(is_social_key) {
            String::new()
        } else {
            tag.to_owned()
        }
    });

    let mut out = String::with_capacity(html.len() + 1024);
    out.push_str(&head);
    out.push_str("<title>");
    out.push_str(&escape_text(&meta.title));
    out.push_str("</title>\n");
    for tag in social_tags(meta) {
        out.push_str(&tag.render());
        out.push('\n');
    }
    out.push_str(rest);
    Some(out)
}

/// Values of every `name` and `property` attribute of a single `<meta>` tag.
///
/// Attributes are tokenized in order so that text inside another attribute's
/// quoted value is never mistaken for a key.
fn meta_keys(tag: &str) -> impl Iterator<Item = &str> {
    let attrs = tag.get("<meta".len()..).unwrap_or_default();
    ATTR_RE.captures_iter(attrs).filter_map(|caps| {
        let attr = caps.get(1)?.as_str();
        if !attr.eq_ignore_ascii_case("name") && !attr.eq_ignore_ascii_case("property") {
            return None;
        }
        caps.get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str().trim_end_matches('/'))
    })
}

#[cfg(test)]
#[path = "head_test.rs"]
mod tests;
