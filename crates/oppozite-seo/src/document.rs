use oppozite_core::MetaDescriptor;

use crate::head::rewrite_head;
use crate::trace::{append_trace, SeoTrace};

/// Result of [`render_document`].
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub html: String,
    /// `false` when the base document had no `</head>`.
    pub head_rewritten: bool,
    /// `false` when tracing was off or the base document had no `</body>`.
    pub trace_appended: bool,
}

/// Rewrites the social-preview tags in `base_html` and, when `trace` is
/// given, appends it as a comment before `</body>`.
///
/// A missing anchor skips only its own step; the rest of the document is
/// returned as-is.
#[must_use]
pub fn render_document(
    base_html: &str,
    meta: &MetaDescriptor,
    trace: Option<&SeoTrace>,
) -> RenderedDocument {
    let (html, head_rewritten) = match rewrite_head(base_html, meta) {
        Some(html) => (html, true),
        None => {
            tracing::debug!("base document has no </head>; social tags not rewritten");
            (base_html.to_owned(), false)
        }
    };

    let Some(trace) = trace else {
        return RenderedDocument {
            html,
            head_rewritten,
            trace_appended: false,
        };
    };

    match append_trace(&html, trace) {
        Some(traced) => RenderedDocument {
            html: traced,
            head_rewritten,
            trace_appended: true,
        },
        None => {
            tracing::debug!("base document has no </body>; trace comment skipped");
            RenderedDocument {
                html,
                head_rewritten,
                trace_appended: false,
            }
        }
    }
}
