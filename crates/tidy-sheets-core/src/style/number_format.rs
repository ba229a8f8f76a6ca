//! Number display formats

/// How a numeric cell is rendered
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    #[default]
    General,

    /// One of Excel's implicit formats, referenced by id without a `<numFmt>` entry
    BuiltIn(u32),

    /// Format code stored in the workbook's `<numFmts>`
    Custom(String),
}

/// Built-in ids that this crate knows the code for
const BUILTINS: &[(u32, &str)] = &[
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "mm-dd-yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "#,##0 ;(#,##0)"),
    (38, "#,##0 ;[Red](#,##0)"),
    (39, "#,##0.00;(#,##0.00)"),
    (40, "#,##0.00;[Red](#,##0.00)"),
    (45, "mm:ss"),
    (46, "[h]:mm:ss"),
    (47, "mmss.0"),
    (48, "##0.0E+0"),
    (49, "@"),
];

impl NumberFormat {
    pub const ID_THOUSANDS_DEC2: u32 = 4;

    /// `#,##0.00`
    pub fn thousands_decimal() -> Self {
        NumberFormat::BuiltIn(Self::ID_THOUSANDS_DEC2)
    }

    /// Map a format code to a built-in id when one matches, else keep it custom
    pub fn from_code(code: &str) -> Self {
        if code.is_empty() || code.eq_ignore_ascii_case("general") {
            return NumberFormat::General;
        }
        match BUILTINS.iter().find(|(_, c)| *c == code) {
            Some((id, _)) => NumberFormat::BuiltIn(*id),
            None => NumberFormat::Custom(code.to_string()),
        }
    }

    /// Numeric id for the `numFmtId` attribute. `None` for custom codes, which the
    /// writer numbers itself.
    pub fn builtin_id(&self) -> Option<u32> {
        match self {
            NumberFormat::General => Some(0),
            NumberFormat::BuiltIn(id) => Some(*id),
            NumberFormat::Custom(_) => None,
        }
    }

    /// The format code. Unknown built-in ids read as "General".
    pub fn format_code(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::BuiltIn(id) => BUILTINS
                .iter()
                .find(|(i, _)| i == id)
                .map_or("General", |(_, c)| c),
            NumberFormat::Custom(s) => s,
        }
    }

    /// Whether numbers under this format are dates or times.
    ///
    /// Built-ins 14-22 and 45-47 are dates. Custom codes count when a date/time
    /// token remains after quoted literals, escapes and `[...]` sections are removed.
    pub fn is_date_format(&self) -> bool {
        match self {
            NumberFormat::General => false,
            NumberFormat::BuiltIn(id) => matches!(id, 14..=22 | 45..=47),
            NumberFormat::Custom(code) => code_has_date_tokens(code),
        }
    }
}

fn code_has_date_tokens(code: &str) -> bool {
    // Only the first section decides; later ones are for negatives/zero/text.
    let section = code.split(';').next().unwrap_or("");
    let mut chars = section.chars();
    let mut in_quotes = false;
    let mut in_brackets = false;

    while let Some(c) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            '\\' | '_' | '*' => {
                chars.next();
            }
            '[' => in_brackets = true,
            ']' => in_brackets = false,
            _ if in_brackets => {}
            'y' | 'Y' | 'd' | 'D' | 'h' | 'H' | 's' | 'S' | 'm' | 'M' => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(NumberFormat::from_code("#,##0.00"), NumberFormat::BuiltIn(4));
        assert_eq!(NumberFormat::from_code("General"), NumberFormat::General);
        assert_eq!(
            NumberFormat::from_code("0.000"),
            NumberFormat::Custom("0.000".into())
        );
        assert_eq!(NumberFormat::thousands_decimal().format_code(), "#,##0.00");
    }

    #[test]
    fn test_date_detection() {
        assert!(NumberFormat::BuiltIn(14).is_date_format());
        assert!(!NumberFormat::BuiltIn(4).is_date_format());
        assert!(NumberFormat::from_code("yyyy-mm-dd hh:mm:ss").is_date_format());
        assert!(NumberFormat::from_code("dd.mm.yyyy").is_date_format());
        assert!(!NumberFormat::from_code("#,##0.00\" шт\"").is_date_format());
        assert!(!NumberFormat::from_code("[Red]0.00").is_date_format());
        assert!(!NumberFormat::from_code("0.00\\m").is_date_format());
    }
}
