use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a raw database table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the column types the source
/// tables actually use (text, integers, doubles, NULL).
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl CellValue {
    /// Coerce the value to `f64`. Numeric strings coerce too, matching the
    /// lenient behavior of the source data (values sometimes arrive as text).
    /// Non-finite values ("NaN", "inf", a NaN float cell) count as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v).filter(|v| v.is_finite()),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            CellValue::Null => None,
        }
    }

    /// Coerce the value to an `i32` year. Floats qualify only when integral.
    pub fn as_year(&self) -> Option<i32> {
        match self {
            CellValue::Integer(i) => i32::try_from(*i).ok(),
            CellValue::Float(v) if v.fract() == 0.0 => Some(*v as i32),
            CellValue::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        }
    }

    /// Non-null string content, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – an unprocessed table straight from the database or a file
// ---------------------------------------------------------------------------

/// A table exactly as loaded: localized column names, untyped cells.
/// Produced by the loader, consumed only by `pipeline::normalize`.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

// ---------------------------------------------------------------------------
// Canonical records – the normalized, English-named schema
// ---------------------------------------------------------------------------

/// One GDP observation after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct GdpRecord {
    pub country: String,
    pub year: i32,
    pub unit: String,
    pub gdp_usd: f64,
}

/// One population observation after normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationRecord {
    pub country: String,
    pub year: i32,
    pub unit: String,
    pub population: f64,
}

/// Normalized GDP dataset.
#[derive(Debug, Clone, Default)]
pub struct GdpDataset {
    pub records: Vec<GdpRecord>,
}

/// Normalized population dataset.
#[derive(Debug, Clone, Default)]
pub struct PopulationDataset {
    pub records: Vec<PopulationRecord>,
}

impl GdpDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted unique country names (drives the sidebar country selector).
    pub fn countries(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.country.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Inclusive (min, max) year bounds, `None` when the dataset is empty.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let mut years = self.records.iter().map(|r| r.year);
        let first = years.next()?;
        Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
    }
}

impl PopulationDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Filter parameters
// ---------------------------------------------------------------------------

/// The sidebar selection applied to both datasets. The year range is
/// inclusive on both ends; an empty country set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterParams {
    pub selected_countries: BTreeSet<String>,
    pub year_range: (i32, i32),
}

impl FilterParams {
    pub fn new(selected_countries: BTreeSet<String>, year_range: (i32, i32)) -> Self {
        Self {
            selected_countries,
            year_range,
        }
    }

    /// Whether a record with this country and year passes the filter.
    pub fn matches(&self, country: &str, year: i32) -> bool {
        let (lo, hi) = self.year_range;
        self.selected_countries.contains(country) && year >= lo && year <= hi
    }
}

// ---------------------------------------------------------------------------
// Combined dataset – inner join of the two filtered datasets
// ---------------------------------------------------------------------------

/// One joined (country, year) observation. `gdp_per_capita` is `Some` on
/// every row or `None` on every row, never mixed (see [`CombinedDataset`]).
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedRow {
    pub country: String,
    pub year: i32,
    pub gdp_usd: f64,
    pub population: f64,
    pub gdp_per_capita: Option<f64>,
}

/// Inner join of filtered GDP and population data. The per-capita column is
/// all-or-nothing: it exists only when no population value anywhere in the
/// join is zero. `per_capita_available` makes that explicit instead of
/// leaving callers to probe individual rows.
#[derive(Debug, Clone, Default)]
pub struct CombinedDataset {
    pub rows: Vec<CombinedRow>,
    pub per_capita_available: bool,
}

impl CombinedDataset {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
