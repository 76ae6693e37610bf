//! Console formatting module - Pure rendering concerns
//!
//! This module handles all text output formatting including:
//! - Table layout and borders
//! - Color decoration (ANSI escapes, optional)
//! - Text truncation and padding
//!
//! It accepts pre-formatted cell text from the report module and writes it to
//! any `std::io::Write` sink: stdout, a report file, or an in-memory buffer.

use std::io::{self, Write};
use term::color::Color;
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the separator lines between report sections
pub const SEPARATOR_WIDTH: usize = 80;

/// Narrowest a shrinkable column may become
const MIN_FLEX_WIDTH: usize = 10;

/// Writer for report output - configurable for color/plain text
pub struct TableWriter<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> TableWriter<W> {
    /// Create a new table writer
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    /// Give back the underlying sink
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write text as-is
    pub fn write_plain(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())
    }

    /// Write formatted text, optionally with color
    pub fn write_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.use_colors && !text.is_empty() {
            write!(self.writer, "\x1b[{}m{}\x1b[0m", ansi_code(color), text)
        } else {
            self.write_plain(text)
        }
    }

    /// Write a full line with an optional color
    pub fn write_line(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        match color {
            Some(c) => self.write_colored(text, c)?,
            None => self.write_plain(text)?,
        }
        self.writeln()
    }

    /// Write a newline
    pub fn writeln(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    /// Write a separator line made of `sep`
    pub fn write_separator(&mut self, sep: char) -> io::Result<()> {
        writeln!(self.writer, "{}", get_separator(sep, SEPARATOR_WIDTH))
    }

    /// Write a full table: header, rows, optional footer
    pub fn write_table(&mut self, table: &Table) -> io::Result<()> {
        let widths = table.column_widths();

        self.write_border(&widths, '┌', '┬', '┐')?;
        let header: Vec<Cell> = table.headers.iter().map(|h| Cell::plain(h.as_str())).collect();
        self.write_row(&header, &widths, &vec![Align::Center; widths.len()])?;
        self.write_border(&widths, '├', '┼', '┤')?;

        for row in &table.rows {
            self.write_row(row, &widths, &table.alignments)?;
        }

        if let Some(ref footer) = table.footer {
            self.write_border(&widths, '├', '┼', '┤')?;
            self.write_row(footer, &widths, &table.alignments)?;
        }

        self.write_border(&widths, '└', '┴', '┘')
    }

    fn write_border(&mut self, widths: &[usize], left: char, mid: char, right: char) -> io::Result<()> {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        writeln!(self.writer, "{}{}{}", left, segments.join(&mid.to_string()), right)
    }

    fn write_row(&mut self, cells: &[Cell], widths: &[usize], alignments: &[Align]) -> io::Result<()> {
        self.write_plain("│")?;
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i);
            let text = cell.map(|c| c.text.as_str()).unwrap_or("");
            let align = alignments.get(i).copied().unwrap_or(Align::Left);
            let padded = align_with_padding(text, *width, align);

            self.write_plain(" ")?;
            match cell.and_then(|c| c.color) {
                Some(color) => self.write_colored(&padded, color)?,
                None => self.write_plain(&padded)?,
            }
            self.write_plain(" │")?;
        }
        self.writeln()
    }
}

//
// Table model
//

/// Horizontal alignment of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One table cell: text plus optional color
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub color: Option<Color>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Cell { text: text.into(), color: None }
    }

    pub fn colored(text: impl Into<String>, color: Option<Color>) -> Self {
        Cell { text: text.into(), color }
    }
}

/// Table data handed to `TableWriter::write_table`
#[derive(Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub alignments: Vec<Align>,
    pub rows: Vec<Vec<Cell>>,
    pub footer: Option<Vec<Cell>>,
    /// Total width cap including borders; `None` = unlimited
    pub max_width: Option<usize>,
    /// Column that gives up space when the table exceeds `max_width`
    pub flex_column: usize,
}

impl Table {
    pub fn new(headers: &[&str], alignments: &[Align]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            alignments: alignments.to_vec(),
            rows: Vec::new(),
            footer: None,
            max_width: None,
            flex_column: 0,
        }
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn set_footer(&mut self, footer: Vec<Cell>) {
        self.footer = Some(footer);
    }

    /// Content width of every column, shrinking the flex column to fit `max_width`
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| display_width(h)).collect();
        for row in self.rows.iter().chain(self.footer.iter()) {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(display_width(&cell.text));
            }
        }

        if let Some(max) = self.max_width
            && self.flex_column < widths.len()
        {
            // "│ " before each column, " │" after the last one
            let total = widths.iter().sum::<usize>() + widths.len() * 3 + 1;
            if total > max {
                let excess = total - max;
                let flex = &mut widths[self.flex_column];
                *flex = flex.saturating_sub(excess).max(MIN_FLEX_WIDTH.min(*flex));
            }
        }

        widths
    }
}

//
// Terminal
//

/// Width of the attached terminal, if stdout is one
pub fn detect_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Map a term color onto its ANSI SGR code
fn ansi_code(color: Color) -> u32 {
    if color < 8 { 30 + color } else { 90 + (color - 8).min(7) }
}

//
// Text Formatting Utilities
//

/// A line made of `count` copies of `sep`
pub fn get_separator(sep: char, count: usize) -> String {
    std::iter::repeat_n(sep, count).collect()
}

/// Count the display width of a string, accounting for wide Unicode characters
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate and pad string to exact width
pub fn truncate_with_padding(s: &str, width: usize) -> String {
    let display_w = display_width(s);

    if display_w > width {
        let mut result = String::new();
        let mut current_width = 0;

        // Reserve space for "..."
        let target_width = if width >= 3 { width - 3 } else { width };

        for c in s.chars() {
            let c_width = UnicodeWidthChar::width(c).unwrap_or(1);
            if current_width + c_width > target_width {
                break;
            }
            result.push(c);
            current_width += c_width;
        }

        if width >= 3 {
            result.push_str("...");
            current_width += 3;
        }

        if current_width < width {
            result.push_str(&" ".repeat(width - current_width));
        }

        result
    } else {
        format!("{}{}", s, " ".repeat(width - display_w))
    }
}

/// Fit a string into `width`, aligned as requested
pub fn align_with_padding(s: &str, width: usize, align: Align) -> String {
    let display_w = display_width(s);
    if display_w >= width {
        return truncate_with_padding(s, width);
    }

    match align {
        Align::Left => truncate_with_padding(s, width),
        Align::Center => {
            let total = width - display_w;
            let left = total / 2;
            format!("{}{}{}", " ".repeat(left), s, " ".repeat(total - left))
        }
    }
}

#[cfg(test)]
#[path = "console_format_test.rs"]
mod console_format_test;
