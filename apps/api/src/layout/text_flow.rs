//! Text flow — greedy word wrap against the static metric tables.
//!
//! Words are appended to the current line until the next one would overflow
//! `max_width`. A word that is wider than the column on its own gets a line
//! to itself and is never broken mid-word. Explicit newlines start a new
//! line; blank lines are dropped.
//!
//! Nothing here paginates. Callers decide when to start a new page.

use crate::layout::font_metrics::get_metrics;
use crate::render::document::{Canvas, TextStyle};

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_RATIO: f32 = 1.15;

/// Baseline offset from the top of a line box, as a multiple of font size.
const BASELINE_RATIO: f32 = 0.9;

pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_RATIO
}

/// Splits `text` into the lines `draw_text` would emit.
pub fn wrap_lines(text: &str, max_width: f32, style: &TextStyle) -> Vec<String> {
    let metrics = get_metrics(&style.face);
    let space_w = metrics.width_pt(" ", style.size);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_w = metrics.width_pt(word, style.size);

            if current.is_empty() {
                current.push_str(word);
                current_width = word_w;
            } else if current_width + space_w + word_w > max_width {
                // Line is full — flush it and start the next one with this word.
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Height `draw_text` would consume for this text, without drawing.
pub fn measure_height(text: &str, max_width: f32, style: &TextStyle) -> f32 {
    wrap_lines(text, max_width, style).len() as f32 * line_height(style.size)
}

/// Wraps and draws `text` with its first line box starting at `y_top`.
///
/// Returns the y-coordinate directly below the last line. Empty or
/// whitespace-only text draws nothing and returns `y_top`.
pub fn draw_text(
    canvas: &mut Canvas<'_>,
    text: &str,
    x: f32,
    y_top: f32,
    max_width: f32,
    style: TextStyle,
) -> f32 {
    let advance = line_height(style.size);
    let mut y = y_top;
    for line in wrap_lines(text, max_width, &style) {
        canvas.text(x, y + style.size * BASELINE_RATIO, line, style);
        y += advance;
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::cursor::PageGeometry;
    use crate::layout::font_metrics::{FontFace, FontFamily};
    use crate::layout::style::{resolve_style, Rgb};
    use crate::render::document::{Document, SectionKind};

    fn body(size: f32) -> TextStyle {
        TextStyle {
            face: FontFace::regular(FontFamily::Helvetica),
            size,
            color: Rgb::BLACK,
        }
    }

    fn doc() -> Document {
        Document::new(resolve_style("modern"), PageGeometry::a4(), "t")
    }

    #[test]
    fn test_empty_text_is_noop() {
        let mut doc = doc();
        let y = draw_text(&mut doc.canvas(0, SectionKind::Summary), "", 10.0, 42.0, 200.0, body(10.0));
        assert_eq!(y, 42.0);
        let y = draw_text(&mut doc.canvas(0, SectionKind::Summary), "  \n ", 10.0, 42.0, 200.0, body(10.0));
        assert_eq!(y, 42.0);
        assert!(doc.pages()[0].ops.is_empty());
    }

    #[test]
    fn test_short_text_single_line() {
        let lines = wrap_lines("Built things", 400.0, &body(10.0));
        assert_eq!(lines, vec!["Built things"]);
    }

    #[test]
    fn test_every_line_fits_max_width() {
        let style = body(10.0);
        let metrics = get_metrics(&style.face);
        let text = "Architected a distributed caching layer using Redis and consistent hashing, \
                    reducing p99 latency by 40% under 50k RPS peak load while mentoring four engineers";
        let lines = wrap_lines(text, 150.0, &style);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(metrics.width_pt(line, style.size) <= 150.0, "overflow: {line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_long_word_gets_own_line_unbroken() {
        let word = "Supercalifragilisticexpialidocious";
        let lines = wrap_lines(&format!("a {word} b"), 40.0, &body(10.0));
        assert_eq!(lines, vec!["a", word, "b"]);
    }

    #[test]
    fn test_newlines_start_new_lines() {
        let lines = wrap_lines("first\n\n• second", 400.0, &body(10.0));
        assert_eq!(lines, vec!["first", "• second"]);
    }

    #[test]
    fn test_line_count_is_deterministic() {
        let text = "Led migration of billing services to an event-driven architecture ".repeat(5);
        let first = wrap_lines(&text, 200.0, &body(11.0));
        for _ in 0..10 {
            assert_eq!(wrap_lines(&text, 200.0, &body(11.0)), first);
        }
    }

    #[test]
    fn test_draw_text_returns_y_below_last_line() {
        let mut doc = doc();
        let style = body(10.0);
        let text = "one two three four five six seven eight nine ten";
        let expected_lines = wrap_lines(text, 60.0, &style).len();
        let y = draw_text(&mut doc.canvas(0, SectionKind::Summary), text, 0.0, 100.0, 60.0, style);
        assert!((y - (100.0 + expected_lines as f32 * line_height(10.0))).abs() < 1e-3);
        assert_eq!(doc.pages()[0].ops.len(), expected_lines);
        assert!((measure_height(text, 60.0, &style) - (y - 100.0)).abs() < 1e-3);
    }
}
