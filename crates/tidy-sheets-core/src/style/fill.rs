//! Cell background fills

use super::Color;

/// Background of a cell. Gradient fills are not modelled and load as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillStyle {
    #[default]
    None,

    Solid { color: Color },

    Pattern {
        pattern: PatternType,
        foreground: Color,
        background: Color,
    },
}

impl FillStyle {
    pub fn solid(color: Color) -> Self {
        FillStyle::Solid { color }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, FillStyle::None)
    }
}

/// `patternType` values other than `none` and `solid`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PatternType {
    #[default]
    Gray125,
    Gray0625,
    MediumGray,
    DarkGray,
    LightGray,
    DarkHorizontal,
    DarkVertical,
    DarkDown,
    DarkUp,
    DarkGrid,
    DarkTrellis,
    LightHorizontal,
    LightVertical,
    LightDown,
    LightUp,
    LightGrid,
    LightTrellis,
}

impl PatternType {
    const NAMES: [(PatternType, &'static str); 17] = [
        (PatternType::Gray125, "gray125"),
        (PatternType::Gray0625, "gray0625"),
        (PatternType::MediumGray, "mediumGray"),
        (PatternType::DarkGray, "darkGray"),
        (PatternType::LightGray, "lightGray"),
        (PatternType::DarkHorizontal, "darkHorizontal"),
        (PatternType::DarkVertical, "darkVertical"),
        (PatternType::DarkDown, "darkDown"),
        (PatternType::DarkUp, "darkUp"),
        (PatternType::DarkGrid, "darkGrid"),
        (PatternType::DarkTrellis, "darkTrellis"),
        (PatternType::LightHorizontal, "lightHorizontal"),
        (PatternType::LightVertical, "lightVertical"),
        (PatternType::LightDown, "lightDown"),
        (PatternType::LightUp, "lightUp"),
        (PatternType::LightGrid, "lightGrid"),
        (PatternType::LightTrellis, "lightTrellis"),
    ];

    /// The SpreadsheetML attribute value
    pub fn as_str(&self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(p, _)| p == self)
            .map_or("gray125", |(_, name)| name)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(p, _)| *p)
    }
}
