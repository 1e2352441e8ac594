use std::collections::HashMap;

use super::model::{
    CombinedDataset, CombinedRow, FilterParams, GdpDataset, GdpRecord, PopulationDataset,
    PopulationRecord, RawTable,
};

// ---------------------------------------------------------------------------
// Column mappings: localized source schema → canonical schema
// ---------------------------------------------------------------------------

/// Source column names of the `brics_pib` table.
pub const GDP_COLUMNS: SourceColumns = SourceColumns {
    country: "pais",
    year: "ano",
    unit: "unidade",
    value: "pib_dolar",
};

/// Source column names of the `brics_populacao` table.
pub const POPULATION_COLUMNS: SourceColumns = SourceColumns {
    country: "pais",
    year: "ano",
    unit: "unidade",
    value: "populacao",
};

/// The fixed rename mapping for one source table. `value` is the metric
/// column (`pib_dolar` or `populacao`); the rest are shared.
pub struct SourceColumns {
    pub country: &'static str,
    pub year: &'static str,
    pub unit: &'static str,
    pub value: &'static str,
}

// ---------------------------------------------------------------------------
// normalize – rename, coerce, drop malformed rows
// ---------------------------------------------------------------------------

/// Normalize both raw tables into canonical datasets.
///
/// Rows missing country, year, or the metric value (including values that
/// fail numeric coercion) are silently dropped. A table lacking a required
/// column yields an empty dataset. Never errors.
pub fn normalize(raw_gdp: &RawTable, raw_population: &RawTable) -> (GdpDataset, PopulationDataset) {
    let gdp = GdpDataset {
        records: canonical_rows(raw_gdp, &GDP_COLUMNS)
            .map(|(country, year, unit, gdp_usd)| GdpRecord {
                country,
                year,
                unit,
                gdp_usd,
            })
            .collect(),
    };

    let population = PopulationDataset {
        records: canonical_rows(raw_population, &POPULATION_COLUMNS)
            .map(|(country, year, unit, population)| PopulationRecord {
                country,
                year,
                unit,
                population,
            })
            .collect(),
    };

    (gdp, population)
}

/// Iterate the rows of `table` that survive cleaning, as
/// (country, year, unit, value) tuples. Unit is optional and defaults to "".
fn canonical_rows<'a>(
    table: &'a RawTable,
    cols: &SourceColumns,
) -> impl Iterator<Item = (String, i32, String, f64)> + 'a {
    let country_idx = table.column_index(cols.country);
    let year_idx = table.column_index(cols.year);
    let unit_idx = table.column_index(cols.unit);
    let value_idx = table.column_index(cols.value);

    table.rows.iter().filter_map(move |row| {
        let country = row.get(country_idx?)?.as_str()?.trim();
        if country.is_empty() {
            return None;
        }
        let year = row.get(year_idx?)?.as_year()?;
        let value = row.get(value_idx?)?.as_f64()?;
        let unit = unit_idx
            .and_then(|i| row.get(i))
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();
        Some((country.to_string(), year, unit, value))
    })
}

// ---------------------------------------------------------------------------
// filter – country selection + inclusive year range
// ---------------------------------------------------------------------------

/// Keep GDP records whose country is selected and whose year lies within the
/// inclusive range. An empty selection matches nothing.
pub fn filter_gdp(dataset: &GdpDataset, params: &FilterParams) -> GdpDataset {
    GdpDataset {
        records: dataset
            .records
            .iter()
            .filter(|r| params.matches(&r.country, r.year))
            .cloned()
            .collect(),
    }
}

/// Same predicate applied to the population dataset.
pub fn filter_population(dataset: &PopulationDataset, params: &FilterParams) -> PopulationDataset {
    PopulationDataset {
        records: dataset
            .records
            .iter()
            .filter(|r| params.matches(&r.country, r.year))
            .cloned()
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// combine – inner join on (country, year) + guarded per-capita column
// ---------------------------------------------------------------------------

/// Inner join on (country, year): one output row per matching pair, in
/// GDP-side order, then population-side order within a key.
///
/// The per-capita column is governed by a global guard: it is added to every
/// row when no population value in the joined result is zero, and omitted
/// from every row otherwise. This mirrors the original dashboard, which
/// dropped the whole column on any zero rather than nulling individual rows.
pub fn combine(gdp: &GdpDataset, population: &PopulationDataset) -> CombinedDataset {
    let mut by_key: HashMap<(&str, i32), Vec<&PopulationRecord>> = HashMap::new();
    for rec in &population.records {
        by_key
            .entry((rec.country.as_str(), rec.year))
            .or_default()
            .push(rec);
    }

    let mut rows: Vec<CombinedRow> = gdp
        .records
        .iter()
        .flat_map(|g| {
            let matches = by_key
                .get(&(g.country.as_str(), g.year))
                .map(Vec::as_slice)
                .unwrap_or_default();
            matches.iter().map(|p| CombinedRow {
                country: g.country.clone(),
                year: g.year,
                gdp_usd: g.gdp_usd,
                population: p.population,
                gdp_per_capita: None,
            })
        })
        .collect();

    if rows.is_empty() {
        return CombinedDataset::default();
    }

    let per_capita_available = rows.iter().all(|r| r.population != 0.0);
    if per_capita_available {
        for row in &mut rows {
            row.gdp_per_capita = Some(row.gdp_usd / row.population);
        }
    }

    CombinedDataset {
        rows,
        per_capita_available,
    }
}

// ---------------------------------------------------------------------------
// latest_slice – rows of the most recent year
// ---------------------------------------------------------------------------

/// The maximum year present in `combined` and all rows at that year, in
/// combined order. `None` when combined is empty.
pub fn latest_slice(combined: &CombinedDataset) -> Option<(i32, Vec<CombinedRow>)> {
    let latest = combined.rows.iter().map(|r| r.year).max()?;
    let rows = combined
        .rows
        .iter()
        .filter(|r| r.year == latest)
        .cloned()
        .collect();
    Some((latest, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn gdp_table(rows: Vec<Vec<CellValue>>) -> RawTable {
        RawTable {
            columns: vec![
                "pais".into(),
                "ano".into(),
                "unidade".into(),
                "pib_dolar".into(),
            ],
            rows,
        }
    }

    fn pop_table(rows: Vec<Vec<CellValue>>) -> RawTable {
        RawTable {
            columns: vec![
                "pais".into(),
                "ano".into(),
                "unidade".into(),
                "populacao".into(),
            ],
            rows,
        }
    }

    fn s(v: &str) -> CellValue {
        CellValue::String(v.into())
    }

    fn gdp_record(country: &str, year: i32, gdp_usd: f64) -> GdpRecord {
        GdpRecord {
            country: country.into(),
            year,
            unit: "US$".into(),
            gdp_usd,
        }
    }

    fn pop_record(country: &str, year: i32, population: f64) -> PopulationRecord {
        PopulationRecord {
            country: country.into(),
            year,
            unit: "pessoas".into(),
            population,
        }
    }

    fn params(countries: &[&str], range: (i32, i32)) -> FilterParams {
        FilterParams::new(
            countries.iter().map(|c| c.to_string()).collect(),
            range,
        )
    }

    #[test]
    fn normalize_renames_and_keeps_valid_rows() {
        let raw = gdp_table(vec![vec![
            s("Brasil"),
            CellValue::Integer(2020),
            s("US$"),
            CellValue::Float(1.44e12),
        ]]);
        let (gdp, _) = normalize(&raw, &RawTable::default());
        assert_eq!(gdp.records, vec![gdp_record("Brasil", 2020, 1.44e12)]);
    }

    #[test]
    fn normalize_drops_non_numeric_values() {
        let raw = gdp_table(vec![
            vec![s("Brasil"), CellValue::Integer(2020), s("US$"), s("n/a")],
            vec![
                s("China"),
                CellValue::Integer(2020),
                s("US$"),
                CellValue::Float(1.47e13),
            ],
            vec![
                CellValue::Null,
                CellValue::Integer(2020),
                s("US$"),
                CellValue::Float(1.0e12),
            ],
        ]);
        let (gdp, _) = normalize(&raw, &RawTable::default());
        assert_eq!(gdp.records, vec![gdp_record("China", 2020, 1.47e13)]);
    }

    #[test]
    fn normalize_drops_non_finite_values() {
        let raw = pop_table(vec![
            vec![s("Brasil"), CellValue::Integer(2020), s("pessoas"), s("NaN")],
            vec![
                s("China"),
                CellValue::Integer(2020),
                s("pessoas"),
                CellValue::Float(f64::NAN),
            ],
            vec![
                s("India"),
                CellValue::Integer(2020),
                s("pessoas"),
                CellValue::Float(1.4e9),
            ],
        ]);
        let (_, pop) = normalize(&RawTable::default(), &raw);
        assert_eq!(pop.records, vec![pop_record("India", 2020, 1.4e9)]);
    }

    #[test]
    fn normalize_coerces_numeric_strings() {
        let raw = pop_table(vec![vec![
            s("Rússia"),
            s("2021"),
            s("pessoas"),
            s("143400000"),
        ]]);
        let (_, pop) = normalize(&RawTable::default(), &raw);
        assert_eq!(pop.records, vec![pop_record("Rússia", 2021, 143_400_000.0)]);
    }

    #[test]
    fn normalize_missing_required_column_yields_empty() {
        let raw = RawTable {
            columns: vec!["pais".into(), "unidade".into(), "pib_dolar".into()],
            rows: vec![vec![s("Brasil"), s("US$"), CellValue::Float(1.0)]],
        };
        let (gdp, _) = normalize(&raw, &RawTable::default());
        assert!(gdp.is_empty());
    }

    #[test]
    fn filter_applies_country_and_inclusive_year_range() {
        let ds = GdpDataset {
            records: vec![
                gdp_record("Brasil", 2018, 1.0),
                gdp_record("Brasil", 2019, 2.0),
                gdp_record("Brasil", 2022, 3.0),
                gdp_record("China", 2019, 4.0),
            ],
        };
        let out = filter_gdp(&ds, &params(&["Brasil"], (2019, 2021)));
        assert_eq!(out.records, vec![gdp_record("Brasil", 2019, 2.0)]);
        for r in &out.records {
            assert!(r.year >= 2019 && r.year <= 2021);
        }
    }

    #[test]
    fn filter_with_empty_selection_is_empty() {
        let ds = GdpDataset {
            records: vec![gdp_record("Brasil", 2020, 1.0)],
        };
        let out = filter_gdp(&ds, &params(&[], (2000, 2030)));
        assert!(out.is_empty());
    }

    #[test]
    fn combine_is_an_inner_join() {
        let gdp = GdpDataset {
            records: vec![
                gdp_record("Brasil", 2020, 100.0),
                gdp_record("Brasil", 2021, 110.0),
                gdp_record("China", 2020, 200.0),
            ],
        };
        let pop = PopulationDataset {
            records: vec![
                pop_record("Brasil", 2020, 50.0),
                pop_record("China", 2020, 80.0),
                pop_record("China", 2019, 79.0),
            ],
        };
        let combined = combine(&gdp, &pop);
        let keys: Vec<(&str, i32)> = combined
            .rows
            .iter()
            .map(|r| (r.country.as_str(), r.year))
            .collect();
        assert_eq!(keys, vec![("Brasil", 2020), ("China", 2020)]);
    }

    #[test]
    fn duplicate_population_rows_multiply_the_join() {
        let gdp = GdpDataset {
            records: vec![gdp_record("Brasil", 2020, 100.0)],
        };
        let pop = PopulationDataset {
            records: vec![
                pop_record("Brasil", 2020, 50.0),
                pop_record("Brasil", 2020, 51.0),
            ],
        };
        let combined = combine(&gdp, &pop);
        let populations: Vec<f64> = combined.rows.iter().map(|r| r.population).collect();
        assert_eq!(populations, vec![50.0, 51.0]);
        assert!(combined.rows.iter().all(|r| r.country == "Brasil" && r.year == 2020));
    }

    #[test]
    fn combine_with_empty_side_is_empty() {
        let pop = PopulationDataset {
            records: vec![pop_record("Brasil", 2020, 50.0)],
        };
        let combined = combine(&GdpDataset::default(), &pop);
        assert!(combined.is_empty());
        assert!(!combined.per_capita_available);
    }

    #[test]
    fn zero_population_anywhere_removes_per_capita_everywhere() {
        let gdp = GdpDataset {
            records: vec![
                gdp_record("Brasil", 2020, 100.0),
                gdp_record("China", 2020, 200.0),
            ],
        };
        let pop = PopulationDataset {
            records: vec![
                pop_record("Brasil", 2020, 0.0),
                pop_record("China", 2020, 80.0),
            ],
        };
        let combined = combine(&gdp, &pop);
        assert_eq!(combined.rows.len(), 2);
        assert!(!combined.per_capita_available);
        assert!(combined.rows.iter().all(|r| r.gdp_per_capita.is_none()));
    }

    #[test]
    fn latest_slice_keeps_only_the_maximum_year() {
        let gdp = GdpDataset {
            records: vec![
                gdp_record("Brasil", 2019, 1.0),
                gdp_record("Brasil", 2020, 2.0),
                gdp_record("Brasil", 2021, 3.0),
                gdp_record("China", 2021, 4.0),
            ],
        };
        let pop = PopulationDataset {
            records: vec![
                pop_record("Brasil", 2019, 10.0),
                pop_record("Brasil", 2020, 11.0),
                pop_record("Brasil", 2021, 12.0),
                pop_record("China", 2021, 90.0),
            ],
        };
        let combined = combine(&gdp, &pop);
        let (year, rows) = latest_slice(&combined).unwrap();
        assert_eq!(year, 2021);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.year == 2021));
        assert!(latest_slice(&CombinedDataset::default()).is_none());
    }

    #[test]
    fn end_to_end_single_row_scenario() {
        let raw_gdp = gdp_table(vec![vec![
            s("Brasil"),
            CellValue::Integer(2020),
            s("US$"),
            CellValue::Float(100.0),
        ]]);
        let raw_pop = pop_table(vec![vec![
            s("Brasil"),
            CellValue::Integer(2020),
            s("pessoas"),
            CellValue::Float(50.0),
        ]]);

        let (gdp, pop) = normalize(&raw_gdp, &raw_pop);
        let p = params(&["Brasil"], (2000, 2030));
        let combined = combine(&filter_gdp(&gdp, &p), &filter_population(&pop, &p));

        assert_eq!(
            combined.rows,
            vec![CombinedRow {
                country: "Brasil".into(),
                year: 2020,
                gdp_usd: 100.0,
                population: 50.0,
                gdp_per_capita: Some(2.0),
            }]
        );

        let (year, rows) = latest_slice(&combined).unwrap();
        assert_eq!(year, 2020);
        assert_eq!(rows, combined.rows);
    }
}
