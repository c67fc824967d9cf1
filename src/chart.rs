use serde::Serialize;

use crate::data::model::PayloadRange;

// ---------------------------------------------------------------------------
// Chart specifications – renderer-independent output of the data layer
// ---------------------------------------------------------------------------

/// One pie slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

/// Pie chart description: slices in draw order plus a title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Sum of all slice values.
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Share of slice `i` in the whole pie. `None` for an empty or all-zero pie.
    pub fn fraction(&self, i: usize) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        self.slices.get(i).map(|s| s.value as f64 / total as f64)
    }
}

/// One scatter point: a single launch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Payload mass in kg.
    pub x: f64,
    /// Outcome class, 0 or 1.
    pub y: f64,
    /// Colour category (booster version category).
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booster_version: Option<String>,
}

/// Scatter chart description.
///
/// `x_range` is the requested axis extent and may be wider than the points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_range: PayloadRange,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Distinct point categories in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for p in &self.points {
            if !out.contains(&p.category.as_str()) {
                out.push(&p.category);
            }
        }
        out
    }

    /// Points belonging to one category.
    pub fn points_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ScatterPoint> {
        self.points.iter().filter(move |p| p.category == category)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
