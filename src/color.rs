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
            let hsl = Hsl::new(hue, 0.7, 0.55);
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
// Category → Color32
// ---------------------------------------------------------------------------

/// Maps category labels (sites, booster categories) to distinct colours.
///
/// Built once from the full dataset so a category keeps its colour whatever
/// the current selection shows.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<S: AsRef<str>>(categories: &[S]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping = categories
            .iter()
            .zip(palette)
            .map(|(c, color)| (c.as_ref().to_string(), color))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category. Unknown labels get grey.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}

/// Fixed colours for the single-site pie.
pub fn outcome_color(label: &str) -> Option<Color32> {
    match label {
        "Success" => Some(Color32::from_rgb(46, 160, 67)),
        "Failure" => Some(Color32::from_rgb(207, 34, 46)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn categories_get_distinct_stable_colours() {
        let cats = ["v1.0", "v1.1", "FT", "B4", "B5"];
        let a = ColorMap::new(&cats);
        let b = ColorMap::new(&cats);
        for c in cats {
            assert_eq!(a.color_for(c), b.color_for(c));
        }
        assert_ne!(a.color_for("v1.0"), a.color_for("FT"));
        assert_eq!(a.color_for("Starship"), Color32::GRAY);
    }

    #[test]
    fn outcomes_have_fixed_colours() {
        assert!(outcome_color("Success").is_some());
        assert_ne!(outcome_color("Success"), outcome_color("Failure"));
        assert_eq!(outcome_color("KSC LC-39A"), None);
    }
}
