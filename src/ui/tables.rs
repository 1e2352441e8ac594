use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CombinedRow, GdpDataset, PopulationDataset};

// ---------------------------------------------------------------------------
// pt-BR number formatting (display only; the pipeline never formats)
// ---------------------------------------------------------------------------

/// Format a number with Brazilian separators: `.` for thousands, `,` for
/// decimals, two decimal places. 1234567.891 → "1.234.567,89".
pub fn format_pt_br(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    format!(
        "{}{},{}",
        if negative { "-" } else { "" },
        int_grouped,
        frac_part
    )
}

// ---------------------------------------------------------------------------
// Data tables
// ---------------------------------------------------------------------------

const HEADER_HEIGHT: f32 = 20.0;
const ROW_HEIGHT: f32 = 18.0;

/// Overview table of the filtered GDP data.
pub fn gdp_table(ui: &mut Ui, dataset: &GdpDataset) {
    ui.push_id("gdp_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), 4)
            .header(HEADER_HEIGHT, |mut header| {
                for title in ["País", "Ano", "Unidade", "PIB (US$)"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, dataset.len(), |mut row| {
                    let rec = &dataset.records[row.index()];
                    row.col(|ui| {
                        ui.label(&rec.country);
                    });
                    row.col(|ui| {
                        ui.label(rec.year.to_string());
                    });
                    row.col(|ui| {
                        ui.label(&rec.unit);
                    });
                    row.col(|ui| {
                        ui.label(format_pt_br(rec.gdp_usd));
                    });
                });
            });
    });
}

/// Overview table of the filtered population data.
pub fn population_table(ui: &mut Ui, dataset: &PopulationDataset) {
    ui.push_id("population_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), 4)
            .header(HEADER_HEIGHT, |mut header| {
                for title in ["País", "Ano", "Unidade", "População"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, dataset.len(), |mut row| {
                    let rec = &dataset.records[row.index()];
                    row.col(|ui| {
                        ui.label(&rec.country);
                    });
                    row.col(|ui| {
                        ui.label(rec.year.to_string());
                    });
                    row.col(|ui| {
                        ui.label(&rec.unit);
                    });
                    row.col(|ui| {
                        ui.label(format_pt_br(rec.population));
                    });
                });
            });
    });
}

/// Latest-year summary table. The per-capita column only appears when the
/// pipeline computed it (`with_per_capita`).
pub fn latest_year_table(ui: &mut Ui, rows: &[CombinedRow], with_per_capita: bool) {
    let n_cols = if with_per_capita { 5 } else { 4 };
    let mut titles = vec!["País", "Ano", "PIB (US$)", "População"];
    if with_per_capita {
        titles.push("PIB per Capita (US$)");
    }

    ui.push_id("latest_year_table", |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().resizable(true), n_cols)
            .header(HEADER_HEIGHT, |mut header| {
                for title in titles {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let rec = &rows[row.index()];
                    row.col(|ui| {
                        ui.label(&rec.country);
                    });
                    row.col(|ui| {
                        ui.label(rec.year.to_string());
                    });
                    row.col(|ui| {
                        ui.label(format_pt_br(rec.gdp_usd));
                    });
                    row.col(|ui| {
                        ui.label(format_pt_br(rec.population));
                    });
                    if with_per_capita {
                        row.col(|ui| {
                            match rec.gdp_per_capita {
                                Some(v) => ui.label(format_pt_br(v)),
                                None => ui.label("—"),
                            };
                        });
                    }
                });
            });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pt_br_formatting() {
        assert_eq!(format_pt_br(1234567.891), "1.234.567,89");
        assert_eq!(format_pt_br(0.5), "0,50");
        assert_eq!(format_pt_br(1000.0), "1.000,00");
        assert_eq!(format_pt_br(-42.1), "-42,10");
        assert_eq!(format_pt_br(999.999), "1.000,00");
    }
}
