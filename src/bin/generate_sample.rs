//! Generates sample BRICS data files with the localized source schema, for
//! running the dashboard without a database:
//!
//! ```text
//! cargo run --bin generate_sample -- sample_data
//! BRICS_DATA_DIR=sample_data cargo run
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
struct GdpRow {
    pais: String,
    ano: i32,
    unidade: String,
    pib_dolar: f64,
}

#[derive(Serialize)]
struct PopulationRow {
    pais: String,
    ano: i32,
    unidade: String,
    populacao: f64,
}

/// (country, 2018 GDP in US$, 2018 population, annual GDP growth, annual
/// population growth). Ballpark figures, enough to make the charts look real.
const COUNTRIES: [(&str, f64, f64, f64, f64); 5] = [
    ("Brasil", 1.92e12, 209.5e6, 0.015, 0.007),
    ("Rússia", 1.66e12, 144.5e6, 0.012, -0.002),
    ("Índia", 2.70e12, 1.353e9, 0.055, 0.010),
    ("China", 1.39e13, 1.393e9, 0.050, 0.003),
    ("África do Sul", 4.05e11, 57.8e6, 0.008, 0.012),
];

const FIRST_YEAR: i32 = 2018;
const LAST_YEAR: i32 = 2023;

fn main() -> Result<()> {
    env_logger::init();

    let dir = std::env::args().nth(1).unwrap_or_else(|| "sample_data".to_string());
    let dir = Path::new(&dir);
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    write_gdp(&dir.join("brics_pib.csv"))?;
    write_population(&dir.join("brics_populacao.csv"))?;

    log::info!("sample data written to {}", dir.display());
    println!("Sample data written to {}", dir.display());
    Ok(())
}

fn write_gdp(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for (pais, gdp_2018, _, gdp_growth, _) in COUNTRIES {
        for (i, ano) in (FIRST_YEAR..=LAST_YEAR).enumerate() {
            writer.serialize(GdpRow {
                pais: pais.to_string(),
                ano,
                unidade: "US$".to_string(),
                pib_dolar: (gdp_2018 * (1.0 + gdp_growth).powi(i as i32)).round(),
            })?;
        }
    }

    writer.flush().context("writing GDP CSV")?;
    Ok(())
}

fn write_population(path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for (pais, _, pop_2018, _, pop_growth) in COUNTRIES {
        for (i, ano) in (FIRST_YEAR..=LAST_YEAR).enumerate() {
            writer.serialize(PopulationRow {
                pais: pais.to_string(),
                ano,
                unidade: "pessoas".to_string(),
                populacao: (pop_2018 * (1.0 + pop_growth).powi(i as i32)).round(),
            })?;
        }
    }

    writer.flush().context("writing population CSV")?;
    Ok(())
}
