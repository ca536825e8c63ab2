//! Full-page attachment images appended to the end of a proposal.

use std::ops::Range;

use crate::rules::{BODY_CLOSE, DIV_CLOSE, DIV_OPEN, STYLE_CLOSE};
use crate::substitution::Substitution;

const CONTAINER_OPEN: &str = "<div class=\"document-container\"";

pub const ATTACHMENT_CSS: &str = r#"
    /* Attachment pages (full-page images appended at export) */
    .attachment-page { padding: 0 !important; }
    .attachment-page .page-header, .attachment-page .page-footer { display: none !important; }
    .attachment-img { width: 100%; height: 100%; object-fit: contain; display: block; }
    "#;

/// Inject the attachment page styles before the first `</style>`.
///
/// Documents that already mention `.attachment-page`, or have no
/// `</style>` tag, come back unchanged.
pub fn ensure_attachment_css(html: &str) -> Substitution {
    if html.contains(".attachment-page") {
        return Substitution::unchanged(html);
    }
    let Some(close) = STYLE_CLOSE.find(html) else {
        return Substitution::unchanged(html);
    };

    let mut out = String::with_capacity(html.len() + ATTACHMENT_CSS.len() + 1);
    out.push_str(&html[..close.start()]);
    out.push_str(ATTACHMENT_CSS);
    out.push('\n');
    out.push_str(&html[close.start()..]);
    Substitution {
        html: out,
        count: 1,
    }
}

/// One page per embedded image, numbered from 1.
pub fn render_attachment_pages<S: AsRef<str>>(embedded: &[S]) -> String {
    embedded
        .iter()
        .enumerate()
        .map(|(i, src)| {
            format!(
                "<div class=\"page attachment-page\">\n  <img class=\"attachment-img\" src=\"{}\" alt=\"Attachment {}\">\n</div>",
                src.as_ref(),
                i + 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Place `pages_html` just inside the end of the document container.
///
/// Falls back to just before `</body>`, then to the very end of the text.
pub fn append_to_container(html: &str, pages_html: &str) -> String {
    let Some(open) = html.to_ascii_lowercase().find(CONTAINER_OPEN) else {
        return match BODY_CLOSE.find(html) {
            Some(body) => format!(
                "{}{pages_html}\n{}",
                &html[..body.start()],
                &html[body.start()..]
            ),
            None => format!("{html}{pages_html}"),
        };
    };

    match matching_div_close(html, open) {
        Some(close) => format!(
            "{}\n{pages_html}\n{}",
            &html[..close.start],
            &html[close.start..]
        ),
        None => format!("{html}{pages_html}"),
    }
}

/// Byte range of the `</div>` closing the `<div` that starts at `open_start`.
pub fn matching_div_close(html: &str, open_start: usize) -> Option<Range<usize>> {
    let mut depth = 0usize;
    let mut pos = open_start;

    loop {
        let close = DIV_CLOSE.find_at(html, pos)?;
        match DIV_OPEN.find_at(html, pos) {
            Some(open) if open.start() < close.start() => {
                depth += 1;
                pos = open.end();
            }
            _ => {
                if depth <= 1 {
                    return Some(close.range());
                }
                depth -= 1;
                pos = close.end();
            }
        }
    }
}
