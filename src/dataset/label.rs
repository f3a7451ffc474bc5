//! Class label domain for the labeled wallet and transaction tables

use std::fmt;

/// Label assigned to an address or transaction in the dataset. The files
/// encode these as the integer codes 1, 2 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassLabel {
    Illicit,
    Licit,
    Unknown,
}

impl ClassLabel {
    /// Map a raw class code to its label. Codes outside {1, 2, 3} are
    /// unmapped.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(ClassLabel::Illicit),
            2 => Some(ClassLabel::Licit),
            3 => Some(ClassLabel::Unknown),
            _ => None,
        }
    }

    /// Parse a raw cell value (e.g. "1", "2.0") to its label
    pub fn from_cell(cell: &str) -> Option<Self> {
        let code = cell.parse::<f64>().ok()?;
        if code.fract() != 0.0 {
            return None;
        }
        Self::from_code(code as i64)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassLabel::Illicit => "Illicit",
            ClassLabel::Licit => "Licit",
            ClassLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
