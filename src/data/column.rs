use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::DataError;

// ---------------------------------------------------------------------------
// Column – one typed column of tabular data
// ---------------------------------------------------------------------------

/// A fully-typed column, produced by running the type-detection strategies
/// over the raw cells in order: try-numeric, try-datetime (dates, then
/// date-times, then times of day), fallback-categorical.
///
/// Detection is best-effort and never fails; a column no strategy accepts is
/// kept as [`Column::Categorical`] passthrough. The error surfaces only when
/// such a column is later selected as an input or output axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<f64>),
    /// Pure dates, normalized to whole days since the column minimum.
    Date(Vec<NaiveDate>),
    /// Date-times, normalized to seconds since the column minimum.
    DateTime(Vec<NaiveDateTime>),
    /// Times of day, normalized to seconds since the column minimum.
    Time(Vec<NaiveTime>),
    Categorical(Vec<String>),
}

/// Accepted date formats. ISO first; the slash/dash variants show up in
/// spreadsheet exports often enough to be worth accepting.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
];

const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

impl Column {
    /// Infer a typed column from raw text cells.
    ///
    /// A single format must fit every cell: columns are assumed homogeneous
    /// in granularity (all dates, or all date-times, or all times of day).
    /// Mixed or unparseable columns fall through to `Categorical`.
    pub fn infer<S: AsRef<str>>(cells: &[S]) -> Column {
        if let Some(values) = parse_all(cells, |s| s.parse::<f64>().ok()) {
            return Column::Numeric(values);
        }
        for fmt in DATE_FORMATS {
            if let Some(values) = parse_all(cells, |s| NaiveDate::parse_from_str(s, fmt).ok()) {
                return Column::Date(values);
            }
        }
        for fmt in DATETIME_FORMATS {
            if let Some(values) = parse_all(cells, |s| NaiveDateTime::parse_from_str(s, fmt).ok())
            {
                return Column::DateTime(values);
            }
        }
        for fmt in TIME_FORMATS {
            if let Some(values) = parse_all(cells, |s| NaiveTime::parse_from_str(s, fmt).ok()) {
                return Column::Time(values);
            }
        }
        Column::Categorical(cells.iter().map(|s| s.as_ref().to_string()).collect())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Date(v) => v.len(),
            Column::DateTime(v) => v.len(),
            Column::Time(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    /// Whether the column holds no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short dtype label for log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Column::Numeric(_) => "numeric",
            Column::Date(_) => "date",
            Column::DateTime(_) => "datetime",
            Column::Time(_) => "time",
            Column::Categorical(_) => "categorical",
        }
    }

    /// Base unit of the normalized axis, for temporal columns.
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Column::Date(_) => Some("days"),
            Column::DateTime(_) | Column::Time(_) => Some("seconds"),
            Column::Numeric(_) | Column::Categorical(_) => None,
        }
    }

    /// Collapse the column onto a single real axis.
    ///
    /// Numeric columns pass through unchanged. Temporal columns become
    /// elapsed base units since the *column minimum* (days for dates,
    /// seconds otherwise), so the minimum always maps to `0.0` and the
    /// original ordering is preserved. The reference point is per-column,
    /// never a shared epoch: when a date column and a separate time-of-day
    /// column are both selected, each axis starts at its own minimum.
    ///
    /// Categorical columns fail with [`DataError::MalformedColumn`] — they
    /// have no numeric interpretation. `name` is only used in the error.
    pub fn to_numeric(&self, name: &str) -> Result<Vec<f64>, DataError> {
        match self {
            Column::Numeric(v) => Ok(v.clone()),
            Column::Date(v) => Ok(elapsed(v, |d, min| (*d - min).num_days() as f64)),
            Column::DateTime(v) => Ok(elapsed(v, |t, min| (*t - min).num_seconds() as f64)),
            Column::Time(v) => Ok(elapsed(v, |t, min| (*t - min).num_seconds() as f64)),
            Column::Categorical(_) => Err(DataError::MalformedColumn {
                column: name.to_string(),
            }),
        }
    }
}

/// Apply `parse` to every cell; `Some(column)` only if every cell parses.
fn parse_all<S, T, F>(cells: &[S], parse: F) -> Option<Vec<T>>
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<T>,
{
    cells.iter().map(|s| parse(s.as_ref().trim())).collect()
}

/// Offset every value against the column minimum using `delta`.
fn elapsed<T, F>(values: &[T], delta: F) -> Vec<f64>
where
    T: Copy + Ord,
    F: Fn(&T, T) -> f64,
{
    match values.iter().copied().min() {
        Some(min) => values.iter().map(|v| delta(v, min)).collect(),
        None => Vec::new(),
    }
}
