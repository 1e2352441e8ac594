use std::collections::BTreeSet;
use std::path::Path;

use crate::color::CountryColors;
use crate::config::{self, DbConfig};
use crate::data::loader;
use crate::data::model::{
    CombinedDataset, CombinedRow, FilterParams, GdpDataset, PopulationDataset, RawTable,
};
use crate::data::pipeline;

/// Year range substituted when the GDP data has no usable years.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (2000, 2023);

/// How the sidebar selects countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryMode {
    /// Every country in the data, regardless of checkbox state.
    All,
    /// Only the checked countries.
    Specific,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The raw tables are loaded and normalized once; every filter change re-runs
/// filter → combine → latest_slice and refreshes the cached outputs below.
pub struct AppState {
    /// Normalized GDP data (canonical schema).
    pub gdp: GdpDataset,
    /// Normalized population data (canonical schema).
    pub population: PopulationDataset,

    /// Sorted unique country list from the GDP data.
    pub all_countries: Vec<String>,
    /// Stable per-country chart colours.
    pub colors: CountryColors,

    /// Min/max years in the GDP data; `DEFAULT_YEAR_RANGE` when unusable.
    pub year_bounds: (i32, i32),
    /// False when the default range had to be substituted.
    pub year_bounds_valid: bool,

    pub country_mode: CountryMode,
    /// Checkbox state for `CountryMode::Specific`.
    pub checked_countries: BTreeSet<String>,
    /// Current inclusive year range selection.
    pub year_range: (i32, i32),

    // -- cached pipeline outputs, refreshed by `refilter` --
    pub gdp_filtered: GdpDataset,
    pub population_filtered: PopulationDataset,
    pub combined: CombinedDataset,
    pub latest: Option<(i32, Vec<CombinedRow>)>,

    /// Load warning shown in the top bar (None when both tables loaded).
    pub status_message: Option<String>,
}

impl AppState {
    /// Build the state from two raw tables, defaulting to everything
    /// selected, and run the pipeline once.
    pub fn from_raw_tables(
        raw_gdp: RawTable,
        raw_population: RawTable,
        status_message: Option<String>,
    ) -> Self {
        let (gdp, population) = pipeline::normalize(&raw_gdp, &raw_population);

        let all_countries = gdp.countries();
        let colors = CountryColors::new(&all_countries);

        let (year_bounds, year_bounds_valid) = match gdp.year_bounds() {
            Some(bounds) => (bounds, true),
            None => (DEFAULT_YEAR_RANGE, false),
        };

        let mut state = Self {
            gdp,
            population,
            checked_countries: all_countries.iter().cloned().collect(),
            all_countries,
            colors,
            year_bounds,
            year_bounds_valid,
            country_mode: CountryMode::All,
            year_range: year_bounds,
            gdp_filtered: GdpDataset::default(),
            population_filtered: PopulationDataset::default(),
            combined: CombinedDataset::default(),
            latest: None,
            status_message,
        };
        state.refilter();
        state
    }

    /// Load both tables and build the state. Load failures are reported as a
    /// status message and degrade to empty tables, never a crash.
    pub fn load() -> Self {
        let mut warnings: Vec<String> = Vec::new();

        let (raw_gdp, raw_population) = if let Ok(dir) = std::env::var(config::DATA_DIR_VAR) {
            let dir = Path::new(&dir);
            (
                load_or_warn(&mut warnings, config::GDP_TABLE, || {
                    loader::load_from_dir(dir, config::GDP_TABLE)
                }),
                load_or_warn(&mut warnings, config::POPULATION_TABLE, || {
                    loader::load_from_dir(dir, config::POPULATION_TABLE)
                }),
            )
        } else {
            match DbConfig::from_env() {
                Ok(cfg) => (
                    load_or_warn(&mut warnings, config::GDP_TABLE, || {
                        loader::load_table(&cfg, config::GDP_TABLE)
                    }),
                    load_or_warn(&mut warnings, config::POPULATION_TABLE, || {
                        loader::load_table(&cfg, config::POPULATION_TABLE)
                    }),
                ),
                Err(e) => {
                    log::error!("database configuration incomplete: {e}");
                    warnings.push(e.to_string());
                    (RawTable::default(), RawTable::default())
                }
            }
        };

        let status = if warnings.is_empty() && !raw_gdp.is_empty() && !raw_population.is_empty() {
            None
        } else if warnings.is_empty() {
            // Connected fine but at least one table came back empty.
            Some("Could not load all data. Check the connection and table names.".to_string())
        } else {
            Some(warnings.join("; "))
        };

        Self::from_raw_tables(raw_gdp, raw_population, status)
    }

    /// Countries the filter actually uses: everything in `All` mode, the
    /// checked subset in `Specific` mode.
    pub fn effective_countries(&self) -> BTreeSet<String> {
        match self.country_mode {
            CountryMode::All => self.all_countries.iter().cloned().collect(),
            CountryMode::Specific => self.checked_countries.clone(),
        }
    }

    /// Current filter parameters.
    pub fn filter_params(&self) -> FilterParams {
        FilterParams::new(self.effective_countries(), self.year_range)
    }

    /// Re-run filter → combine → latest_slice after a parameter change.
    pub fn refilter(&mut self) {
        let params = self.filter_params();
        self.gdp_filtered = pipeline::filter_gdp(&self.gdp, &params);
        self.population_filtered = pipeline::filter_population(&self.population, &params);
        self.combined = pipeline::combine(&self.gdp_filtered, &self.population_filtered);
        self.latest = pipeline::latest_slice(&self.combined);
        log::info!(
            "pipeline: {} GDP rows, {} population rows, {} combined",
            self.gdp_filtered.len(),
            self.population_filtered.len(),
            self.combined.rows.len()
        );
    }

    /// Switch between "all countries" and explicit selection.
    pub fn set_country_mode(&mut self, mode: CountryMode) {
        if self.country_mode != mode {
            self.country_mode = mode;
            self.refilter();
        }
    }

    /// Toggle one country checkbox (Specific mode).
    pub fn toggle_country(&mut self, country: &str) {
        if !self.checked_countries.remove(country) {
            self.checked_countries.insert(country.to_string());
        }
        self.refilter();
    }

    /// Check every country.
    pub fn select_all_countries(&mut self) {
        self.checked_countries = self.all_countries.iter().cloned().collect();
        self.refilter();
    }

    /// Uncheck every country.
    pub fn select_no_countries(&mut self) {
        self.checked_countries.clear();
        self.refilter();
    }

    /// Set the year range, clamped to the data bounds and ordered lo ≤ hi.
    pub fn set_year_range(&mut self, lo: i32, hi: i32) {
        let (min, max) = self.year_bounds;
        let lo = lo.clamp(min, max);
        let hi = hi.clamp(min, max);
        let range = (lo.min(hi), lo.max(hi));
        if self.year_range != range {
            self.year_range = range;
            self.refilter();
        }
    }
}

fn load_or_warn(
    warnings: &mut Vec<String>,
    table: &str,
    load: impl FnOnce() -> anyhow::Result<RawTable>,
) -> RawTable {
    match load() {
        Ok(t) => {
            log::info!("loaded {} rows from {table}", t.rows.len());
            t
        }
        Err(e) => {
            log::warn!("failed to load {table}: {e:#}");
            warnings.push(format!("Error loading {table}: {e:#}"));
            RawTable::default()
        }
    }
}
