//! Formatter configuration
//!
//! Every field has a default, so an options file only needs the values it changes:
//!
//! ```json
//! { "header_fill": "2F5597", "max_column_width": 40 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tidy_sheets_core::{Alignment, Color, FillStyle, FontStyle, NumberFormat};

use crate::error::{FormatterError, FormatterResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    /// Header background, hex RGB
    pub header_fill: String,
    /// Header text color, hex RGB
    pub header_font_color: String,
    pub header_font_size: f64,
    pub header_font_name: String,
    /// Format code applied to numeric data cells
    pub number_format: String,
    pub max_column_width: f64,
    /// Characters added to the longest value when fitting a column
    pub column_padding: f64,
    /// Appended to the input stem to name the output file
    pub output_suffix: String,
    /// Appended to the input stem to name the intermediate file of a full format
    pub temp_suffix: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            header_fill: "4472C4".to_string(),
            header_font_color: "FFFFFF".to_string(),
            header_font_size: 12.0,
            header_font_name: "Calibri".to_string(),
            number_format: "#,##0.00".to_string(),
            max_column_width: 50.0,
            column_padding: 2.0,
            output_suffix: "_formatted".to_string(),
            temp_suffix: "_temp".to_string(),
        }
    }
}

impl FormatOptions {
    /// Parse options from JSON and validate them
    pub fn from_json(json: &str) -> FormatterResult<Self> {
        let options: FormatOptions =
            serde_json::from_str(json).map_err(|e| FormatterError::config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Read and validate a JSON options file
    pub fn from_file<P: AsRef<Path>>(path: P) -> FormatterResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| FormatterError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> FormatterResult<()> {
        parse_color("header_fill", &self.header_fill)?;
        parse_color("header_font_color", &self.header_font_color)?;

        if !(self.header_font_size > 0.0) {
            return Err(FormatterError::config(format!(
                "header_font_size must be positive, got {}",
                self.header_font_size
            )));
        }
        if !(self.max_column_width > 0.0) {
            return Err(FormatterError::config(format!(
                "max_column_width must be positive, got {}",
                self.max_column_width
            )));
        }
        if !(self.column_padding >= 0.0) {
            return Err(FormatterError::config(format!(
                "column_padding must not be negative, got {}",
                self.column_padding
            )));
        }
        if self.output_suffix.is_empty() {
            return Err(FormatterError::config("output_suffix must not be empty"));
        }
        if self.output_suffix == self.temp_suffix {
            return Err(FormatterError::config(
                "output_suffix and temp_suffix must differ",
            ));
        }
        Ok(())
    }

    /// Font written over header cells
    pub fn header_font(&self) -> FormatterResult<FontStyle> {
        Ok(FontStyle::default()
            .with_name(self.header_font_name.clone())
            .with_size(self.header_font_size)
            .with_bold(true)
            .with_color(parse_color("header_font_color", &self.header_font_color)?))
    }

    pub fn header_fill(&self) -> FormatterResult<FillStyle> {
        Ok(FillStyle::solid(parse_color("header_fill", &self.header_fill)?))
    }

    pub fn header_alignment(&self) -> Alignment {
        Alignment::centered()
    }

    /// `#,##0.00` resolves to built-in format 4
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::from_code(&self.number_format)
    }
}

fn parse_color(field: &str, value: &str) -> FormatterResult<Color> {
    Color::from_hex(value).ok_or_else(|| {
        FormatterError::config(format!("{} is not a hex color: {:?}", field, value))
    })
}
