use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, CountryMode};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filtros");
    ui.separator();

    if state.gdp.is_empty() && state.population.is_empty() {
        ui.label("Nenhum dado carregado.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            country_filter(ui, state);
            ui.separator();
            year_filter(ui, state);
        });
}

fn country_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Países");

    let mut mode = state.country_mode;
    ui.radio_value(&mut mode, CountryMode::All, "Todos os Países");
    ui.radio_value(
        &mut mode,
        CountryMode::Specific,
        "Selecionar Países Específicos",
    );
    state.set_country_mode(mode);

    if state.country_mode == CountryMode::Specific {
        if state.all_countries.is_empty() {
            ui.label("Nenhum país disponível para seleção.");
            return;
        }

        ui.horizontal(|ui: &mut Ui| {
            if ui.small_button("Todos").clicked() {
                state.select_all_countries();
            }
            if ui.small_button("Nenhum").clicked() {
                state.select_no_countries();
            }
        });

        // Clone so we can mutate state inside the loop.
        let countries = state.all_countries.clone();
        for country in &countries {
            let mut checked = state.checked_countries.contains(country);
            let text = RichText::new(country).color(state.colors.color_for(country));
            if ui.checkbox(&mut checked, text).changed() {
                state.toggle_country(country);
            }
        }
    }

    if state.effective_countries().is_empty() {
        ui.label(
            RichText::new("Nenhum país selecionado. Os gráficos podem não exibir dados.")
                .color(Color32::YELLOW),
        );
    }
}

fn year_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Intervalo de Anos");

    if !state.year_bounds_valid {
        ui.label(
            RichText::new(
                "Coluna de ano não encontrada ou não numérica nos dados de PIB. \
                 Usando intervalo padrão.",
            )
            .color(Color32::RED),
        );
    }

    let (min, max) = state.year_bounds;
    let (mut lo, mut hi) = state.year_range;

    ui.add(egui::Slider::new(&mut lo, min..=max).text("De"));
    ui.add(egui::Slider::new(&mut hi, min..=max).text("Até"));

    state.set_year_range(lo, hi);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top bar: title, row counts, load warnings.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Dashboard BRICS");

        ui.separator();

        if !state.gdp.is_empty() || !state.population.is_empty() {
            ui.label(format!(
                "{} registros de PIB ({} visíveis), {} de população ({} visíveis)",
                state.gdp.len(),
                state.gdp_filtered.len(),
                state.population.len(),
                state.population_filtered.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
