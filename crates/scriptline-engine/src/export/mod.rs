//! Standalone HTML rendering of a screenplay, as handed to the PDF
//! export service. Each line becomes a `div` carrying its class name and a
//! labelled separator is emitted before every page break.

use std::borrow::Cow;
use std::fmt::Write;

use crate::editing::{PageBreakSet, Snapshot};

const STYLE: &str = "\
body { font-family: 'Courier Prime', 'Courier New', monospace; font-size: 12pt; width: 794px; margin: 0 auto; }
.scene-heading { text-transform: uppercase; font-weight: bold; margin-top: 1em; }
.action { margin-top: 0.5em; }
.character { text-transform: uppercase; margin: 1em 0 0 37%; }
.dialogue { margin: 0 25%; }
.transition { text-transform: uppercase; text-align: right; margin-top: 1em; }
.shot { text-transform: uppercase; margin-top: 1em; }
.setting { font-style: italic; }
.page-break { page-break-before: always; border-top: 2px dashed #ccc; margin: 1.5em 0; text-align: center; color: #999; font-size: 9pt; }
";

/// Render `snapshot` as a complete HTML document
pub fn render_html(title: &str, snapshot: &Snapshot, breaks: &PageBreakSet) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(
        html,
        "<title>{}</title>",
        html_escape::encode_text(title)
    );
    let _ = writeln!(html, "<style>\n{STYLE}</style>");
    html.push_str("</head>\n<body>\n<div class=\"screenplay\">\n");

    for (index, line) in snapshot.lines().iter().enumerate() {
        if breaks.breaks_before(index) {
            let _ = writeln!(
                html,
                "<div class=\"page-break\">Page {}</div>",
                breaks.page_of(index)
            );
        }
        let content = if line.is_blank() {
            Cow::Borrowed("&nbsp;")
        } else {
            html_escape::encode_text(&line.content)
        };
        let _ = writeln!(
            html,
            "<div class=\"{}\">{}</div>",
            line.classification, content
        );
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}
