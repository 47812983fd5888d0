use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value as JsonValue;

use super::channel::{Channel, Dimension};
use super::column::Column;
use super::set::ChannelSet;
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a delimited text file and turn selected columns into channels.
///
/// `x_cols` name the input dimension column(s); every `y_cols` entry becomes
/// one channel sharing those inputs. Datetime columns are normalized to
/// elapsed offsets along the way (see [`Column::to_numeric`]).
///
/// File-system failures keep their original error (file-not-found,
/// permission-denied) inside the context chain.
pub fn load_csv(
    path: &Path,
    options: &CsvOptions,
    x_cols: &[&str],
    y_cols: &[&str],
) -> Result<ChannelSet> {
    let table = Table::from_csv(path, options)
        .with_context(|| format!("loading '{}'", path.display()))?;
    let set = table.to_channels(x_cols, y_cols)?;
    log::info!(
        "loaded {} channel(s) from '{}'",
        set.output_dims(),
        path.display()
    );
    Ok(set)
}

// ---------------------------------------------------------------------------
// CSV options
// ---------------------------------------------------------------------------

/// Parsing options for delimited text input.
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Column separator byte.
    pub delimiter: u8,
    /// Explicit column names for files without a header row. `None` means
    /// the first row is the header.
    pub column_names: Option<Vec<String>>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            column_names: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – an ordered, typed in-memory table
// ---------------------------------------------------------------------------

/// An in-memory table: ordered `(name, column)` pairs with per-column
/// inferred types. The intermediate between raw tabular input and channels.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<(String, Column)>,
}

impl Table {
    /// Wrap caller-assembled columns. Order is kept as given.
    pub fn from_columns(columns: Vec<(String, Column)>) -> Self {
        Table { columns }
    }

    /// Parse a delimited text file. Cell type inference runs per column
    /// after the whole file is read, so a column's type reflects all rows.
    pub fn from_csv(path: &Path, options: &CsvOptions) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .has_headers(options.column_names.is_none())
            .from_path(path)
            .context("opening CSV")?;

        let names: Vec<String> = match &options.column_names {
            Some(names) => names.clone(),
            None => reader
                .headers()
                .context("reading CSV headers")?
                .iter()
                .map(|h| h.trim().to_string())
                .collect(),
        };

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        for (row_no, result) in reader.records().enumerate() {
            let record = result.with_context(|| format!("CSV row {row_no}"))?;
            if record.len() != names.len() {
                bail!(
                    "CSV row {row_no}: {} fields, expected {}",
                    record.len(),
                    names.len()
                );
            }
            for (col, value) in record.iter().enumerate() {
                cells[col].push(value.to_string());
            }
        }

        Ok(Table::from_cells(names, cells))
    }

    /// Parse a records-oriented JSON file (the default
    /// `df.to_json(orient='records')` layout):
    ///
    /// ```json
    /// [
    ///   { "time": "2024-01-01", "passengers": 112 },
    ///   { "time": "2024-01-02", "passengers": 118 }
    /// ]
    /// ```
    ///
    /// Columns are taken from the first record's key order; every record
    /// must carry the same keys. Cell values go through the same type
    /// inference as CSV cells.
    pub fn from_json(path: &Path) -> Result<Table> {
        let text = std::fs::read_to_string(path).context("reading JSON file")?;
        let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
        let records = root.as_array().context("expected top-level JSON array")?;

        let mut names: Vec<String> = Vec::new();
        if let Some(first) = records.first() {
            let obj = first.as_object().context("row 0 is not a JSON object")?;
            names = obj.keys().cloned().collect();
        }

        let mut cells: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        for (i, rec) in records.iter().enumerate() {
            let obj = rec
                .as_object()
                .with_context(|| format!("row {i} is not a JSON object"))?;
            if obj.len() != names.len() {
                bail!("row {i}: {} fields, expected {}", obj.len(), names.len());
            }
            for (col, name) in names.iter().enumerate() {
                let val = obj
                    .get(name)
                    .with_context(|| format!("row {i}: missing column '{name}'"))?;
                cells[col].push(json_cell_to_string(val));
            }
        }

        Ok(Table::from_cells(names, cells))
    }

    fn from_cells(names: Vec<String>, cells: Vec<Vec<String>>) -> Table {
        let columns: Vec<(String, Column)> = names
            .into_iter()
            .zip(cells)
            .map(|(name, raw)| {
                let column = Column::infer(&raw);
                log::debug!("column '{name}' inferred as {}", column.kind());
                (name, column)
            })
            .collect();
        Table { columns }
    }

    /// Column by name, if present.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Select input and output columns and build a channel set.
    ///
    /// Each `y_cols` entry becomes one channel named after the column; all
    /// channels share the same normalized input axes. Selecting an absent
    /// column fails with [`DataError::UnknownColumn`]; selecting a
    /// categorical column fails with [`DataError::MalformedColumn`];
    /// unequal column lengths fail with [`DataError::DimensionMismatch`].
    pub fn to_channels(&self, x_cols: &[&str], y_cols: &[&str]) -> Result<ChannelSet, DataError> {
        let inputs: Vec<Dimension> = x_cols
            .iter()
            .map(|&name| {
                let column = self.lookup(name)?;
                let mut dim = Dimension::new(name, column.to_numeric(name)?);
                if let Some(unit) = column.unit() {
                    dim = dim.with_unit(unit);
                }
                Ok(dim)
            })
            .collect::<Result<_, DataError>>()?;

        let mut set = ChannelSet::new();
        for &name in y_cols {
            let column = self.lookup(name)?;
            let output = column.to_numeric(name)?;
            set.append(Channel::new(name, inputs.clone(), output)?);
        }
        Ok(set)
    }

    fn lookup(&self, name: &str) -> Result<&Column, DataError> {
        self.column(name).ok_or_else(|| DataError::UnknownColumn {
            name: name.to_string(),
        })
    }
}

/// Render one JSON cell as text for the shared column-inference pass.
fn json_cell_to_string(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("channelset-{}-{name}", std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn airline_scenario_passes_through_unchanged() {
        let table = Table::from_columns(vec![
            ("time".into(), Column::Numeric(vec![0.0, 1.0, 2.0, 3.0, 4.0])),
            (
                "passengers".into(),
                Column::Numeric(vec![112.0, 118.0, 132.0, 129.0, 121.0]),
            ),
        ]);
        let set = table.to_channels(&["time"], &["passengers"]).unwrap();

        assert_eq!(set.output_dims(), 1);
        assert_eq!(set.input_dims(), vec![1]);
        assert_eq!(set.names(), vec!["passengers"]);

        let (inputs, outputs) = set.data();
        assert_eq!(inputs[0], vec![vec![0.0, 1.0, 2.0, 3.0, 4.0]]);
        assert_eq!(outputs[0], vec![112.0, 118.0, 132.0, 129.0, 121.0]);
    }

    #[test]
    fn csv_with_header_and_date_axis() {
        let path = write_temp(
            "dates.csv",
            "date,value\n2024-01-03,3.0\n2024-01-01,1.0\n2024-01-02,2.0\n",
        );
        let set = load_csv(&path, &CsvOptions::default(), &["date"], &["value"]).unwrap();
        std::fs::remove_file(&path).unwrap();

        let (inputs, outputs) = set.data();
        // Elapsed days since the minimum date, row order preserved.
        assert_eq!(inputs[0], vec![vec![2.0, 0.0, 1.0]]);
        assert_eq!(outputs[0], vec![3.0, 1.0, 2.0]);

        let dims = set.channel(0).unwrap().inputs();
        assert_eq!(dims[0].unit.as_deref(), Some("days"));
    }

    #[test]
    fn csv_without_header_uses_explicit_names() {
        let path = write_temp("headerless.csv", "0;10\n1;20\n2;30\n");
        let options = CsvOptions {
            delimiter: b';',
            column_names: Some(vec!["t".into(), "y".into()]),
        };
        let set = load_csv(&path, &options, &["t"], &["y"]).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(set.channel(0).unwrap().len(), 3);
        assert_eq!(set.data().1[0], vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn multiple_y_columns_share_the_input_axis() {
        let table = Table::from_columns(vec![
            ("t".into(), Column::Numeric(vec![0.0, 1.0])),
            ("a".into(), Column::Numeric(vec![1.0, 2.0])),
            ("b".into(), Column::Numeric(vec![3.0, 4.0])),
        ]);
        let set = table.to_channels(&["t"], &["a", "b"]).unwrap();

        assert_eq!(set.output_dims(), 2);
        assert_eq!(set.names(), vec!["a", "b"]);
        let (inputs, _) = set.data();
        assert_eq!(inputs[0], inputs[1]);
    }

    #[test]
    fn selecting_missing_or_text_columns_fails() {
        let table = Table::from_columns(vec![
            ("t".into(), Column::Numeric(vec![0.0])),
            ("label".into(), Column::Categorical(vec!["a".into()])),
        ]);

        let err = table.to_channels(&["t"], &["nope"]).unwrap_err();
        assert!(matches!(err, DataError::UnknownColumn { name } if name == "nope"));

        let err = table.to_channels(&["label"], &["t"]).unwrap_err();
        assert!(matches!(err, DataError::MalformedColumn { column } if column == "label"));
    }

    #[test]
    fn unequal_column_lengths_fail_at_construction() {
        let table = Table::from_columns(vec![
            ("t".into(), Column::Numeric(vec![0.0, 1.0, 2.0])),
            ("y".into(), Column::Numeric(vec![1.0, 2.0])),
        ]);
        let err = table.to_channels(&["t"], &["y"]).unwrap_err();
        assert!(matches!(err, DataError::DimensionMismatch { .. }));
    }

    #[test]
    fn json_records_load_like_csv() {
        let path = write_temp(
            "records.json",
            r#"[{"time": "2024-01-01", "y": 1.5}, {"time": "2024-01-11", "y": 2.5}]"#,
        );
        let table = Table::from_json(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        let set = table.to_channels(&["time"], &["y"]).unwrap();
        let (inputs, outputs) = set.data();
        assert_eq!(inputs[0], vec![vec![0.0, 10.0]]);
        assert_eq!(outputs[0], vec![1.5, 2.5]);
    }

    #[test]
    fn missing_file_propagates_io_error() {
        let err =
            Table::from_csv(Path::new("/nonexistent/data.csv"), &CsvOptions::default())
                .unwrap_err();
        assert!(err.to_string().contains("opening CSV"));
    }
}
