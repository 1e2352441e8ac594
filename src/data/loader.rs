use std::path::Path;

use anyhow::{Context, Result, bail};
use postgres::types::Type;
use postgres::{Client, NoTls};
use serde_json::Value as JsonValue;

use super::model::{CellValue, RawTable};
use crate::config::DbConfig;

// ---------------------------------------------------------------------------
// Postgres loader
// ---------------------------------------------------------------------------

/// Load a whole table from Postgres as a [`RawTable`].
///
/// Opens a connection, runs an unconditional `SELECT *`, and closes the
/// connection when the client drops. Column names come back in the source
/// (Portuguese) schema; normalization happens downstream.
pub fn load_table(config: &DbConfig, table_name: &str) -> Result<RawTable> {
    let mut client = Client::connect(&config.connection_string(), NoTls)
        .with_context(|| format!("connecting to Postgres at {}", config.host))?;

    let rows = client
        .query(&format!("SELECT * FROM {table_name}"), &[])
        .with_context(|| format!("querying table {table_name}"))?;

    let Some(first) = rows.first() else {
        return Ok(RawTable::default());
    };

    let columns: Vec<String> = first
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let mut table = RawTable {
        columns,
        rows: Vec::with_capacity(rows.len()),
    };

    for row in &rows {
        let cells = row
            .columns()
            .iter()
            .enumerate()
            .map(|(i, col)| extract_cell(row, i, col.type_()))
            .collect();
        table.rows.push(cells);
    }

    Ok(table)
}

/// Convert one Postgres cell to a [`CellValue`] based on its column type.
/// Unrecognized types degrade to Null rather than failing the whole load.
fn extract_cell(row: &postgres::Row, idx: usize, ty: &Type) -> CellValue {
    if *ty == Type::INT2 {
        row.try_get::<_, Option<i16>>(idx)
            .ok()
            .flatten()
            .map_or(CellValue::Null, |v| CellValue::Integer(v as i64))
    } else if *ty == Type::INT4 {
        row.try_get::<_, Option<i32>>(idx)
            .ok()
            .flatten()
            .map_or(CellValue::Null, |v| CellValue::Integer(v as i64))
    } else if *ty == Type::INT8 {
        row.try_get::<_, Option<i64>>(idx)
            .ok()
            .flatten()
            .map_or(CellValue::Null, CellValue::Integer)
    } else if *ty == Type::FLOAT4 {
        row.try_get::<_, Option<f32>>(idx)
            .ok()
            .flatten()
            .map_or(CellValue::Null, |v| CellValue::Float(v as f64))
    } else if *ty == Type::FLOAT8 {
        row.try_get::<_, Option<f64>>(idx)
            .ok()
            .flatten()
            .map_or(CellValue::Null, CellValue::Float)
    } else {
        // TEXT / VARCHAR / BPCHAR and anything else that can read as text.
        row.try_get::<_, Option<String>>(idx)
            .ok()
            .flatten()
            .map_or(CellValue::Null, CellValue::String)
    }
}

// ---------------------------------------------------------------------------
// File loaders (offline data directory + sample generator round trip)
// ---------------------------------------------------------------------------

/// Load a table from the offline data directory: `<dir>/<table>.csv` when it
/// exists, `<dir>/<table>.json` otherwise.
pub fn load_from_dir(dir: &Path, table_name: &str) -> Result<RawTable> {
    let csv_path = dir.join(format!("{table_name}.csv"));
    if csv_path.exists() {
        return load_file(&csv_path);
    }
    let json_path = dir.join(format!("{table_name}.json"));
    if json_path.exists() {
        return load_file(&json_path);
    }
    bail!(
        "no {table_name}.csv or {table_name}.json in {}",
        dir.display()
    )
}

/// Load a raw table from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with source column names, one record per row
/// * `.json` – `[{ "pais": "...", "ano": 2020, ... }, ...]`
pub fn load_file(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;

    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut table = RawTable {
        columns,
        rows: Vec::new(),
    };

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        table
            .rows
            .push(record.iter().map(guess_cell_type).collect());
    }

    Ok(table)
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::String(s.to_string())
}

/// Expected JSON schema (records-oriented, one object per row). The column
/// set is the union of keys across all records, in first-seen order.
fn load_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON {}", path.display()))?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for rec in records {
        if let Some(obj) = rec.as_object() {
            for key in obj.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let mut table = RawTable {
        columns,
        rows: Vec::with_capacity(records.len()),
    };

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let cells = table
            .columns
            .iter()
            .map(|col| obj.get(col).map_or(CellValue::Null, json_to_cell))
            .collect();
        table.rows.push(cells);
    }

    Ok(table)
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_cells_get_typed_by_content() {
        assert_eq!(guess_cell_type("Brasil"), CellValue::String("Brasil".into()));
        assert_eq!(guess_cell_type("2020"), CellValue::Integer(2020));
        assert_eq!(guess_cell_type("1.5"), CellValue::Float(1.5));
        assert_eq!(guess_cell_type(""), CellValue::Null);
    }

    #[test]
    fn json_round_trip_preserves_source_schema() {
        let dir = std::env::temp_dir().join("brics_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("brics_pib.json");
        std::fs::write(
            &path,
            r#"[{"pais": "Brasil", "ano": 2020, "unidade": "US$", "pib_dolar": 1440.0}]"#,
        )
        .unwrap();

        let table = load_file(&path).unwrap();
        assert_eq!(table.rows.len(), 1);
        let row = &table.rows[0];
        assert_eq!(
            row[table.column_index("pais").unwrap()],
            CellValue::String("Brasil".into())
        );
        assert_eq!(
            row[table.column_index("ano").unwrap()],
            CellValue::Integer(2020)
        );
        assert_eq!(
            row[table.column_index("pib_dolar").unwrap()],
            CellValue::Float(1440.0)
        );
    }

    #[test]
    fn data_dir_falls_back_to_json_when_csv_is_absent() {
        let dir = std::env::temp_dir().join("brics_dir_fallback_test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("brics_populacao.json"),
            r#"[{"pais": "China", "ano": 2021, "unidade": "pessoas", "populacao": 1.41e9}]"#,
        )
        .unwrap();

        let table = load_from_dir(&dir, "brics_populacao").unwrap();
        assert_eq!(table.rows.len(), 1);

        assert!(load_from_dir(&dir, "brics_pib").is_err());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(load_file(Path::new("data.parquet")).is_err());
    }
}
