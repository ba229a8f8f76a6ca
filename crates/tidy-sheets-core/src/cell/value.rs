//! Cell value types

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// The value stored in a cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No value
    #[default]
    Empty,

    /// TRUE/FALSE
    Boolean(bool),

    /// Plain number
    Number(f64),

    /// Date or time, stored as an Excel serial number (days since 1899-12-30).
    ///
    /// On disk this is an ordinary number; the reader promotes it when the cell's
    /// number format is a date format.
    DateTime(f64),

    /// Text
    String(SharedString),

    /// Error literal such as `#DIV/0!`
    Error(CellError),

    /// Formula with the last value Excel computed for it, if the file carried one
    Formula {
        /// Formula text including the leading `=`
        text: String,
        cached_value: Option<Box<CellValue>>,
    },
}

impl CellValue {
    /// Create a new string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        CellValue::String(SharedString::new(s.into()))
    }

    /// Create a formula value without a cached result
    pub fn formula<S: Into<String>>(text: S) -> Self {
        let text = text.into();
        let text = if text.starts_with('=') {
            text
        } else {
            format!("={}", text)
        };
        CellValue::Formula {
            text,
            cached_value: None,
        }
    }

    /// Create a date-time value from a calendar timestamp
    pub fn date_time(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(datetime_to_excel_serial(dt))
    }

    /// True only for [`CellValue::Empty`]
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// True for cells that carry nothing visible: no value, or an empty string.
    ///
    /// Zero and FALSE are values, not blanks.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, CellValue::Number(_))
    }

    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula { .. })
    }

    /// Numeric view of the value (booleans count as 0/1)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) | CellValue::DateTime(n) => Some(*n),
            CellValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Formula {
                cached_value: Some(v),
                ..
            } => v.as_number(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Calendar view of a date-time value
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            CellValue::DateTime(serial) => excel_serial_to_datetime(*serial),
            _ => None,
        }
    }

    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Formula { text, .. } => Some(text),
            _ => None,
        }
    }

    /// The cached result for formulas, the value itself otherwise
    pub fn effective_value(&self) -> &CellValue {
        match self {
            CellValue::Formula {
                cached_value: Some(v),
                ..
            } => v.effective_value(),
            _ => self,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "empty",
            CellValue::Boolean(_) => "boolean",
            CellValue::Number(_) => "number",
            CellValue::DateTime(_) => "datetime",
            CellValue::String(_) => "string",
            CellValue::Error(_) => "error",
            CellValue::Formula { .. } => "formula",
        }
    }

    /// Text shown for the value when measuring column widths.
    ///
    /// Formulas show their source text since that is what an unevaluated file holds.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Boolean(true) => "TRUE".to_string(),
            CellValue::Boolean(false) => "FALSE".to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::DateTime(serial) => match excel_serial_to_datetime(*serial) {
                Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => format_number(*serial),
            },
            CellValue::String(s) => s.as_str().to_string(),
            CellValue::Error(e) => e.as_str().to_string(),
            CellValue::Formula { text, .. } => text.clone(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n == 0.0 {
        // also folds -0.0
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::string(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::string(s)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::date_time(dt)
    }
}

impl From<CellError> for CellValue {
    fn from(e: CellError) -> Self {
        CellValue::Error(e)
    }
}

/// Largest serial Excel accepts (9999-12-31)
const MAX_SERIAL: f64 = 2_958_466.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Day zero of the serial calendar. Serials below 61 sit before Excel's phantom
/// 1900-02-29 and count from one day later.
fn serial_epoch(serial: f64) -> Option<NaiveDateTime> {
    let (y, m, d) = if serial < 61.0 {
        (1899, 12, 31)
    } else {
        (1899, 12, 30)
    };
    NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)
}

/// Convert an Excel serial number (1900 date system) to a timestamp
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..MAX_SERIAL).contains(&serial) {
        return None;
    }
    let millis = (serial * MILLIS_PER_DAY).round() as i64;
    serial_epoch(serial)?.checked_add_signed(Duration::milliseconds(millis))
}

/// Convert a timestamp to an Excel serial number (1900 date system)
pub fn datetime_to_excel_serial(dt: NaiveDateTime) -> f64 {
    let modern = NaiveDate::from_ymd_opt(1900, 3, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
    let epoch = match modern {
        Some(march) if dt < march => serial_epoch(0.0),
        _ => serial_epoch(61.0),
    };
    match epoch {
        Some(epoch) => (dt - epoch).num_milliseconds() as f64 / MILLIS_PER_DAY,
        None => 0.0,
    }
}

/// Excel error values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellError {
    Null,
    Div0,
    Value,
    Ref,
    Name,
    Num,
    Na,
    GettingData,
    Spill,
    Calc,
}

impl CellError {
    /// The literal Excel shows for this error
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Null => "#NULL!",
            CellError::Div0 => "#DIV/0!",
            CellError::Value => "#VALUE!",
            CellError::Ref => "#REF!",
            CellError::Name => "#NAME?",
            CellError::Num => "#NUM!",
            CellError::Na => "#N/A",
            CellError::GettingData => "#GETTING_DATA",
            CellError::Spill => "#SPILL!",
            CellError::Calc => "#CALC!",
        }
    }
}

impl FromStr for CellError {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let e = match s.trim().to_uppercase().as_str() {
            "#NULL!" => CellError::Null,
            "#DIV/0!" => CellError::Div0,
            "#VALUE!" => CellError::Value,
            "#REF!" => CellError::Ref,
            "#NAME?" => CellError::Name,
            "#NUM!" => CellError::Num,
            "#N/A" => CellError::Na,
            "#GETTING_DATA" => CellError::GettingData,
            "#SPILL!" => CellError::Spill,
            "#CALC!" => CellError::Calc,
            _ => return Err(()),
        };
        Ok(e)
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference-counted string so repeated cell text shares one allocation
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SharedString(Arc<str>);

impl SharedString {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        SharedString(Arc::from(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SharedString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SharedString {
    fn from(s: &str) -> Self {
        SharedString::new(s)
    }
}

impl From<String> for SharedString {
    fn from(s: String) -> Self {
        SharedString::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_blank_vs_empty() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::string("").is_blank());
        assert!(!CellValue::string("").is_empty());
        assert!(!CellValue::Number(0.0).is_blank());
        assert!(!CellValue::Boolean(false).is_blank());
    }

    #[test]
    fn test_display_text_numbers() {
        assert_eq!(CellValue::Number(5.0).display_text(), "5");
        assert_eq!(CellValue::Number(1500.5).display_text(), "1500.5");
        assert_eq!(CellValue::Number(-0.0).display_text(), "0");
        assert_eq!(CellValue::Boolean(true).display_text(), "TRUE");
        assert_eq!(CellValue::Error(CellError::Na).display_text(), "#N/A");
    }

    #[test]
    fn test_display_text_counts_chars_not_bytes() {
        let v = CellValue::string("Товар Д");
        assert_eq!(v.display_text().chars().count(), 7);
    }

    #[test]
    fn test_formula_gets_equals_prefix() {
        let f = CellValue::formula("SUM(A1:A3)");
        assert_eq!(f.formula_text(), Some("=SUM(A1:A3)"));
        assert_eq!(f.display_text(), "=SUM(A1:A3)");
    }

    #[test]
    fn test_serial_conversion() {
        assert_eq!(excel_serial_to_datetime(45306.0), Some(dt(2024, 1, 15, 0, 0, 0)));
        assert_eq!(excel_serial_to_datetime(45306.4375), Some(dt(2024, 1, 15, 10, 30, 0)));
        assert_eq!(excel_serial_to_datetime(1.0), Some(dt(1900, 1, 1, 0, 0, 0)));
        assert_eq!(excel_serial_to_datetime(-1.0), None);
        assert_eq!(excel_serial_to_datetime(f64::NAN), None);

        assert_eq!(datetime_to_excel_serial(dt(2024, 1, 15, 0, 0, 0)), 45306.0);
        assert_eq!(datetime_to_excel_serial(dt(1900, 1, 1, 0, 0, 0)), 1.0);
    }

    #[test]
    fn test_datetime_display() {
        let v = CellValue::date_time(dt(2024, 3, 5, 14, 7, 9));
        assert_eq!(v.display_text(), "2024-03-05 14:07:09");
        assert_eq!(v.as_datetime(), Some(dt(2024, 3, 5, 14, 7, 9)));
    }

    #[test]
    fn test_cell_error_parse() {
        assert_eq!("#DIV/0!".parse::<CellError>(), Ok(CellError::Div0));
        assert_eq!("#n/a".parse::<CellError>(), Ok(CellError::Na));
        assert!("oops".parse::<CellError>().is_err());
        assert_eq!(CellError::Value.to_string(), "#VALUE!");
    }
}
