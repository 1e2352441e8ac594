use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BricsDashboardApp {
    pub state: AppState,
}

impl BricsDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for BricsDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    dashboard_body(ui, &self.state);
                });
        });
    }
}

// ---------------------------------------------------------------------------
// Central panel sections
// ---------------------------------------------------------------------------

fn dashboard_body(ui: &mut Ui, state: &AppState) {
    if state.gdp.is_empty() && state.population.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Não foi possível carregar os dados. Verifique a conexão.");
        });
        return;
    }

    overview_section(ui, state);
    ui.separator();
    gdp_section(ui, state);
    ui.separator();
    population_section(ui, state);
    ui.separator();
    per_capita_section(ui, state);
    ui.separator();
    latest_year_section(ui, state);
}

fn overview_section(ui: &mut Ui, state: &AppState) {
    ui.heading("Visão Geral dos Dados Filtrados");
    ui.columns(2, |cols: &mut [Ui]| {
        cols[0].strong("Dados de PIB");
        tables::gdp_table(&mut cols[0], &state.gdp_filtered);
        cols[1].strong("Dados de População");
        tables::population_table(&mut cols[1], &state.population_filtered);
    });
}

fn gdp_section(ui: &mut Ui, state: &AppState) {
    ui.heading("Evolução do PIB por País");
    if state.gdp_filtered.is_empty() {
        info_label(ui, "Sem dados de PIB para o período ou países selecionados.");
        return;
    }
    plot::country_lines(
        ui,
        "gdp_plot",
        "PIB (US$)",
        &state.colors,
        state
            .gdp_filtered
            .records
            .iter()
            .map(|r| (r.country.as_str(), r.year, r.gdp_usd)),
    );
}

fn population_section(ui: &mut Ui, state: &AppState) {
    ui.heading("Evolução da População por País");
    if state.population_filtered.is_empty() {
        info_label(
            ui,
            "Sem dados de população para o período ou países selecionados.",
        );
        return;
    }
    plot::country_lines(
        ui,
        "population_plot",
        "População",
        &state.colors,
        state
            .population_filtered
            .records
            .iter()
            .map(|r| (r.country.as_str(), r.year, r.population)),
    );
}

fn per_capita_section(ui: &mut Ui, state: &AppState) {
    ui.heading("PIB per Capita por País");
    if state.combined.is_empty() {
        info_label(
            ui,
            "Não há dados combinados para calcular o PIB per capita. Verifique se \
             PIB e População correspondem por país e ano no intervalo selecionado.",
        );
        return;
    }
    if !state.combined.per_capita_available {
        info_label(
            ui,
            "Não foi possível calcular o PIB per capita. Verifique os dados de \
             PIB e População ou se há divisão por zero.",
        );
        return;
    }
    plot::country_lines(
        ui,
        "per_capita_plot",
        "PIB per Capita (US$)",
        &state.colors,
        state
            .combined
            .rows
            .iter()
            .filter_map(|r| Some((r.country.as_str(), r.year, r.gdp_per_capita?))),
    );
}

fn latest_year_section(ui: &mut Ui, state: &AppState) {
    ui.heading("Dados Anuais Mais Recentes");
    match &state.latest {
        Some((year, rows)) => {
            ui.label(format!("Ano mais recente: {year}"));
            tables::latest_year_table(ui, rows, state.combined.per_capita_available);
        }
        None => info_label(
            ui,
            "Sem dados combinados para exibir a tabela sumária do último ano.",
        ),
    }
}

fn info_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).italics().weak());
}
