//! Cell styling types
//!
//! A [`Style`] bundles the font, fill, border, alignment and number format of a
//! cell. Worksheets intern styles in a [`StylePool`] and cells keep an index.

mod alignment;
mod border;
mod color;
mod fill;
mod font;
mod number_format;
mod pool;

pub use alignment::{Alignment, HorizontalAlignment, VerticalAlignment};
pub use border::{BorderEdge, BorderLineStyle, BorderStyle};
pub use color::Color;
pub use fill::{FillStyle, PatternType};
pub use font::FontStyle;
pub use number_format::NumberFormat;
pub use pool::StylePool;

/// Complete cell style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub font: FontStyle,
    pub fill: FillStyle,
    pub border: BorderStyle,
    pub alignment: Alignment,
    pub number_format: NumberFormat,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    pub fn font(mut self, font: FontStyle) -> Self {
        self.font = font;
        self
    }

    pub fn font_color(mut self, color: Color) -> Self {
        self.font.color = color;
        self
    }

    /// Solid background
    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = FillStyle::solid(color);
        self
    }

    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.alignment.horizontal = align;
        self
    }

    pub fn vertical_alignment(mut self, align: VerticalAlignment) -> Self {
        self.alignment.vertical = align;
        self
    }

    pub fn number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }
}
