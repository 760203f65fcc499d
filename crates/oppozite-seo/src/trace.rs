//! Diagnostic trace embedded in the served page as an HTML comment.

use std::fmt::Display;
use std::sync::LazyLock;

use regex::Regex;

static BODY_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</body\s*>").expect("valid body regex"));

/// Ordered `key: value` notes collected while handling one request.
#[derive(Debug, Clone, Default)]
pub struct SeoTrace {
    entries: Vec<String>,
}

impl SeoTrace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: &str, value: impl Display) {
        self.entries.push(format!("{key}: {value}"));
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Renders the trace as a comment that cannot terminate early.
    #[must_use]
    pub fn to_comment(&self) -> String {
        let mut out = String::from("<!-- SEO Debug:\n");
        for entry in &self.entries {
            out.push_str("  ");
            out.push_str(&comment_safe(entry));
            out.push('\n');
        }
        out.push_str("-->");
        out
    }
}

/// Inserts the trace comment right before the last `</body>`.
///
/// Returns `None` when the document has no `</body>`.
#[must_use]
pub fn append_trace(html: &str, trace: &SeoTrace) -> Option<String> {
    let close = BODY_CLOSE_RE.find_iter(html).last()?.start();
    let comment = trace.to_comment();
    let mut out = String::with_capacity(html.len() + comment.len() + 1);
    out.push_str(&html[..close]);
    out.push_str(&comment);
    out.push('\n');
    out.push_str(&html[close..]);
    Some(out)
}

fn comment_safe(entry: &str) -> String {
    let mut safe = entry.replace('\n', " ");
    while safe.contains("--") {
        safe = safe.replace("--", "- -");
    }
    safe
}
