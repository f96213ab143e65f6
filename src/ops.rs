//! Draw operations emitted by the layout engine
//!
//! The engine's entire output is an ordered command sequence that the page
//! canvas executes. Keeping the contract as plain data keeps the engine
//! free of canvas state and lets tests assert on section ordering and
//! forced page boundaries directly.

use crate::fonts::FontStyle;
use crate::theme::Color;

/// Horizontal alignment of a single-line cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One page-drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Forced page boundary. Natural overflow breaks are the canvas's own.
    AddPage,
    SetFont { style: FontStyle, size: f64 },
    SetTextColor(Color),
    /// Single text line occupying a fixed height; advances the cursor.
    /// `underline` draws a bottom border across the full content width.
    Cell {
        text: String,
        height: f64,
        align: Align,
        indent: f64,
        underline: bool,
    },
    /// Flowed body text: wrapped to the content width, breaking pages on
    /// overflow. Embedded newlines start new lines.
    Paragraph { text: String, line_height: f64 },
    /// Vertical accent bar at the left margin beside a chapter heading.
    /// Does not advance the cursor.
    AccentBar { height: f64 },
    /// Vertical gap.
    Spacer { height: f64 },
}
