use std::collections::BTreeMap;

use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::color::CountryColors;

// ---------------------------------------------------------------------------
// Time-series line charts, one line per country
// ---------------------------------------------------------------------------

/// Render a (year, value) line chart with one line per country.
///
/// `series` is an iterator of (country, year, value) observations; rows are
/// grouped by country and sorted by year within each line.
pub fn country_lines<'a>(
    ui: &mut Ui,
    plot_id: &str,
    y_label: &str,
    colors: &CountryColors,
    series: impl Iterator<Item = (&'a str, i32, f64)>,
) {
    let mut by_country: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for (country, year, value) in series {
        by_country
            .entry(country)
            .or_default()
            .push([year as f64, value]);
    }
    for points in by_country.values_mut() {
        points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    }

    Plot::new(plot_id.to_string())
        .legend(Legend::default())
        .x_axis_label("Ano")
        .y_axis_label(y_label)
        .height(280.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (country, points) in &by_country {
                let line = Line::new(PlotPoints::from(points.clone()))
                    .name(*country)
                    .color(colors.color_for(country))
                    .width(1.5);
                plot_ui.line(line);
            }
        });
}
