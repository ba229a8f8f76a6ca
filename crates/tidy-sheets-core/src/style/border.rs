//! Cell borders

use super::Color;

/// Border on each side of a cell. `None` means no line on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BorderStyle {
    pub left: Option<BorderEdge>,
    pub right: Option<BorderEdge>,
    pub top: Option<BorderEdge>,
    pub bottom: Option<BorderEdge>,
}

impl BorderStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same line on all four sides
    pub fn all(style: BorderLineStyle, color: Color) -> Self {
        let edge = Some(BorderEdge::new(style, color));
        Self {
            left: edge,
            right: edge,
            top: edge,
            bottom: edge,
        }
    }

    /// Thin black line on all four sides
    pub fn thin() -> Self {
        Self::all(BorderLineStyle::Thin, Color::BLACK)
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.top.is_none() && self.bottom.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderEdge {
    pub style: BorderLineStyle,
    pub color: Color,
}

impl BorderEdge {
    pub fn new(style: BorderLineStyle, color: Color) -> Self {
        Self { style, color }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderLineStyle {
    #[default]
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

impl BorderLineStyle {
    const NAMES: [(BorderLineStyle, &'static str); 13] = [
        (BorderLineStyle::Thin, "thin"),
        (BorderLineStyle::Medium, "medium"),
        (BorderLineStyle::Thick, "thick"),
        (BorderLineStyle::Dashed, "dashed"),
        (BorderLineStyle::Dotted, "dotted"),
        (BorderLineStyle::Double, "double"),
        (BorderLineStyle::Hair, "hair"),
        (BorderLineStyle::MediumDashed, "mediumDashed"),
        (BorderLineStyle::DashDot, "dashDot"),
        (BorderLineStyle::MediumDashDot, "mediumDashDot"),
        (BorderLineStyle::DashDotDot, "dashDotDot"),
        (BorderLineStyle::MediumDashDotDot, "mediumDashDotDot"),
        (BorderLineStyle::SlantDashDot, "slantDashDot"),
    ];

    /// The SpreadsheetML `style` attribute value
    pub fn as_str(&self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(s, _)| s == self)
            .map_or("thin", |(_, name)| name)
    }

    /// `None` for `"none"` and for names this model does not know
    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(s, _)| *s)
    }
}
