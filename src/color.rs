use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: country name → Color32
// ---------------------------------------------------------------------------

/// Maps each country to a distinct colour, shared across all three charts so
/// a country keeps its colour everywhere.
#[derive(Debug, Clone, Default)]
pub struct CountryColors {
    mapping: BTreeMap<String, Color32>,
}

impl CountryColors {
    /// Build a colour map from the full (unfiltered) country list so colours
    /// stay stable when the selection changes.
    pub fn new(countries: &[String]) -> Self {
        let palette = generate_palette(countries.len());
        let mapping = countries
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();
        CountryColors { mapping }
    }

    /// Look up the colour for a country.
    pub fn color_for(&self, country: &str) -> Color32 {
        self.mapping
            .get(country)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countries_get_distinct_colors() {
        let countries: Vec<String> = ["Brasil", "China", "India", "Rússia", "África do Sul"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let colors = CountryColors::new(&countries);
        let mut seen = std::collections::BTreeSet::new();
        for c in &countries {
            let color = colors.color_for(c);
            assert!(seen.insert(color.to_array()), "duplicate colour for {c}");
        }
        assert_eq!(colors.color_for("Japão"), Color32::GRAY);
    }
}
