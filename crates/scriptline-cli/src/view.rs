//! Terminal layout of screenplay lines: indentation per class, wrapping and
//! the rows that feed both painting and pagination geometry.

use scriptline_engine::editing::{Classification, Geometry, Line, PageBreakSet};

/// Column count used when there is no terminal to measure, e.g. for export
pub const EXPORT_COLUMNS: usize = 60;

fn indent_for(classification: Classification) -> usize {
    match classification {
        Classification::Character => 20,
        Classification::Dialogue => 10,
        Classification::Transition => 40,
        Classification::Setting => 4,
        Classification::SceneHeading | Classification::Action | Classification::Shot => 0,
    }
}

/// Indentation at `width`, never more than half of it
fn effective_indent(classification: Classification, width: usize) -> usize {
    indent_for(classification).min(width / 2)
}

fn text_columns(classification: Classification, width: usize) -> usize {
    width
        .saturating_sub(effective_indent(classification, width))
        .max(1)
}

/// Terminal rows a line occupies at `width`; an empty line still takes one
pub fn row_count(line: &Line, width: usize) -> usize {
    let chars = line.content.chars().count();
    chars
        .div_ceil(text_columns(line.classification, width))
        .max(1)
}

/// Line heights as painted: wrapped rows times the height of one row
pub fn measure(lines: &[Line], width: usize, row_height: f64) -> Geometry {
    lines
        .iter()
        .map(|line| row_count(line, width) as f64 * row_height)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Text {
        line: usize,
        classification: Classification,
        text: String,
    },
    PageBreak {
        page: usize,
    },
}

pub fn layout_rows(lines: &[Line], breaks: &PageBreakSet, width: usize) -> Vec<Row> {
    let mut rows = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        if breaks.breaks_before(index) {
            rows.push(Row::PageBreak {
                page: breaks.page_of(index),
            });
        }

        let indent = " ".repeat(effective_indent(line.classification, width));
        let chars: Vec<char> = line.content.chars().collect();
        if chars.is_empty() {
            rows.push(Row::Text {
                line: index,
                classification: line.classification,
                text: indent,
            });
            continue;
        }
        for chunk in chars.chunks(text_columns(line.classification, width)) {
            rows.push(Row::Text {
                line: index,
                classification: line.classification,
                text: format!("{indent}{}", chunk.iter().collect::<String>()),
            });
        }
    }
    rows
}

/// Row and column of a caret sitting `cursor` chars into line `active`,
/// counted over the rows produced by [`layout_rows`]
pub fn caret_position(
    lines: &[Line],
    breaks: &PageBreakSet,
    width: usize,
    active: usize,
    cursor: usize,
) -> Option<(usize, usize)> {
    let mut row = 0;
    for (index, line) in lines.iter().enumerate() {
        if breaks.breaks_before(index) {
            row += 1;
        }
        let rows = row_count(line, width);
        if index == active {
            let columns = text_columns(line.classification, width);
            let (mut r, mut c) = (cursor / columns, cursor % columns);
            // Caret after the last char of a full row stays on that row
            if r >= rows {
                r = rows - 1;
                c = columns;
            }
            let column = effective_indent(line.classification, width) + c;
            return Some((row + r, column.min(width.saturating_sub(1))));
        }
        row += rows;
    }
    None
}
