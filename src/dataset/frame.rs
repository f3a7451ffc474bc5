//! Schema-less table type backing all three analyses
//!
//! Columns are inferred from the file header at load time; no invariant is
//! enforced on feature ranges or presence. Cells are kept as strings with the
//! empty string as the absence marker, since the dataset mixes address
//! strings, integer class codes and float features in files with hundreds of
//! columns.

use crate::error::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// An immutable table snapshot: headers plus string cells.
#[derive(Debug, Clone)]
pub struct Frame {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Frame {
    /// Build a frame directly from headers and rows. Short rows are padded
    /// with the absence marker so every row has one cell per header.
    pub fn new(name: impl Into<String>, headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            row.resize(width, String::new());
        }
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Load a comma-separated file
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_delimited(path, b',')
    }

    /// Load a tab-separated file
    pub fn load_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load_delimited(path, b'\t')
    }

    fn load_delimited<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let csv_err = |e: csv::Error| Error::Csv {
            file: name.clone(),
            message: e.to_string(),
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_path(path)
            .map_err(csv_err)?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
        }

        Ok(Self::new(name, headers, rows))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// (rows, columns), pandas-style
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.width())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Locate a required column, failing eagerly with the file name and the
    /// full list of columns actually present.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| Error::MissingColumn {
            file: self.name.clone(),
            column: name.to_string(),
            present: self.headers.clone(),
        })
    }

    /// Cell value; empty string means missing
    pub fn value(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    /// All cells of one column, top to bottom
    pub fn column_values(&self, col: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row[col].as_str())
    }

    /// Distinct non-missing values of a column, in first-seen order
    pub fn unique(&self, col: usize) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for value in self.column_values(col) {
            if !value.is_empty() && seen.insert(value.to_string()) {
                out.push(value.to_string());
            }
        }
        out
    }

    /// A column is numeric when every non-missing cell parses as a float.
    /// An all-missing column counts as numeric (it carries no evidence
    /// otherwise).
    pub fn is_numeric(&self, col: usize) -> bool {
        self.column_values(col)
            .filter(|v| !v.is_empty())
            .all(|v| v.parse::<f64>().is_ok())
    }

    /// Column cells parsed as floats; missing or unparseable cells are None
    pub fn numeric_column(&self, col: usize) -> Vec<Option<f64>> {
        self.column_values(col)
            .map(|v| {
                if v.is_empty() {
                    None
                } else {
                    v.parse::<f64>().ok()
                }
            })
            .collect()
    }

    /// Indices of all numeric columns, in header order
    pub fn numeric_column_indices(&self) -> Vec<usize> {
        (0..self.width()).filter(|&c| self.is_numeric(c)).collect()
    }

    /// Left-outer join on a shared key column. Every left row is preserved;
    /// unmatched right-side columns are filled with the absence marker.
    /// Duplicate keys on the right fan out the result rows. Right columns
    /// whose names collide with left ones are suffixed `_y`.
    pub fn left_join(&self, right: &Frame, key: &str) -> Result<Frame> {
        let left_key = self.require_column(key)?;
        let right_key = right.require_column(key)?;

        let mut by_key: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, value) in right.column_values(right_key).enumerate() {
            by_key.entry(value).or_default().push(i);
        }

        let carried: Vec<usize> = (0..right.width()).filter(|&c| c != right_key).collect();

        let mut headers = self.headers.clone();
        for &c in &carried {
            let name = &right.headers[c];
            if self.headers.iter().any(|h| h == name) {
                headers.push(format!("{}_y", name));
            } else {
                headers.push(name.clone());
            }
        }

        let mut rows = Vec::with_capacity(self.len());
        for (i, row) in self.rows.iter().enumerate() {
            match by_key.get(self.value(i, left_key)) {
                Some(matches) => {
                    for &j in matches {
                        let mut out = row.clone();
                        out.extend(carried.iter().map(|&c| right.rows[j][c].clone()));
                        rows.push(out);
                    }
                }
                None => {
                    let mut out = row.clone();
                    out.extend(carried.iter().map(|_| String::new()));
                    rows.push(out);
                }
            }
        }

        Ok(Frame::new(
            format!("{}+{}", self.name, right.name),
            headers,
            rows,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn sample() -> Frame {
        Frame::new(
            "sample.csv",
            vec!["address".into(), "class".into(), "f1".into()],
            vec![
                vec!["a1".into(), "1".into(), "0.5".into()],
                vec!["a2".into(), "2".into(), "".into()],
                vec!["a1".into(), "1".into(), "1.5".into()],
            ],
        )
    }

    #[test]
    fn test_load_csv_and_tsv() {
        let dir = tempdir().unwrap();
        let csv = write_file(&dir, "wallets.csv", "address,class\na1,1\na2,2\n");
        let tsv = write_file(&dir, "cb.tsv", "address\tsource\na1\tcb\n");

        let wallets = Frame::load_csv(&csv).unwrap();
        assert_eq!(wallets.name(), "wallets.csv");
        assert_eq!(wallets.shape(), (2, 2));
        assert_eq!(wallets.value(1, 0), "a2");

        let cb = Frame::load_tsv(&tsv).unwrap();
        assert_eq!(cb.headers(), &["address".to_string(), "source".to_string()]);
        assert_eq!(cb.len(), 1);
    }

    #[test]
    fn test_missing_column_names_file_and_columns() {
        let frame = sample();
        let err = frame.require_column("txId").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("txId"));
        assert!(message.contains("sample.csv"));
        assert!(message.contains("address"));
        assert!(message.contains("class"));
    }

    #[test]
    fn test_unique_first_seen_order() {
        let frame = sample();
        assert_eq!(frame.unique(0), vec!["a1".to_string(), "a2".to_string()]);
    }

    #[test]
    fn test_numeric_detection() {
        let frame = sample();
        assert!(!frame.is_numeric(0)); // addresses
        assert!(frame.is_numeric(1)); // class codes
        assert!(frame.is_numeric(2)); // floats with a gap

        let f1 = frame.numeric_column(2);
        assert_eq!(f1, vec![Some(0.5), None, Some(1.5)]);
    }

    #[test]
    fn test_left_join_preserves_left_rows() {
        let left = Frame::new(
            "left.csv",
            vec!["txId".into(), "v".into()],
            vec![
                vec!["t1".into(), "10".into()],
                vec!["t2".into(), "20".into()],
            ],
        );
        let right = Frame::new(
            "right.csv",
            vec!["txId".into(), "class".into()],
            vec![vec!["t1".into(), "2".into()]],
        );

        let joined = left.left_join(&right, "txId").unwrap();
        assert_eq!(joined.shape(), (2, 3));
        assert_eq!(joined.value(0, 2), "2");
        // unmatched right side filled with the absence marker
        assert_eq!(joined.value(1, 2), "");
    }

    #[test]
    fn test_left_join_fans_out_on_duplicate_right_keys() {
        let left = Frame::new(
            "left.csv",
            vec!["txId".into()],
            vec![vec!["t1".into()]],
        );
        let right = Frame::new(
            "right.csv",
            vec!["txId".into(), "class".into()],
            vec![
                vec!["t1".into(), "1".into()],
                vec!["t1".into(), "2".into()],
            ],
        );

        let joined = left.left_join(&right, "txId").unwrap();
        assert_eq!(joined.len(), 2);
    }

    #[test]
    fn test_left_join_suffixes_colliding_columns() {
        let left = Frame::new(
            "left.csv",
            vec!["txId".into(), "class".into()],
            vec![vec!["t1".into(), "1".into()]],
        );
        let right = Frame::new(
            "right.csv",
            vec!["txId".into(), "class".into()],
            vec![vec!["t1".into(), "3".into()]],
        );

        let joined = left.left_join(&right, "txId").unwrap();
        assert_eq!(
            joined.headers(),
            &["txId".to_string(), "class".to_string(), "class_y".to_string()]
        );
    }
}
