use anyhow::{Context, Result};

use crate::chart::{PieChart, ScatterChart};
use crate::color::ColorMap;
use crate::data::filter::{matching_records, select_payload_correlation};
use crate::data::model::{LaunchDataset, LaunchRecord, PayloadRange, SiteSelection};
use crate::data::outcomes::aggregate_outcomes;

// ---------------------------------------------------------------------------
// Selection – what the user picked
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

/// Which chart a UI action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Scatter,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Charts are recomputed by the setter that changed their inputs, so the
/// render path only ever reads the cached specs.
pub struct AppState {
    /// Loaded once at startup, never replaced.
    dataset: LaunchDataset,

    /// Payload extent of the dataset; bounds of the range sliders.
    observed_range: PayloadRange,

    selection: Selection,

    pie: PieChart,
    scatter: ScatterChart,

    pub site_colors: ColorMap,
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the record table under the charts is expanded.
    pub show_table: bool,
}

impl AppState {
    pub fn new(dataset: LaunchDataset) -> Self {
        let observed_range = dataset
            .observed_payload_range()
            .unwrap_or(PayloadRange::new(0.0, 0.0));
        let selection = Selection {
            site: SiteSelection::All,
            payload_range: observed_range,
        };

        let pie = aggregate_outcomes(&dataset, &selection.site);
        let scatter = select_payload_correlation(&dataset, &selection.site, selection.payload_range);

        Self {
            site_colors: ColorMap::new(dataset.sites()),
            booster_colors: ColorMap::new(dataset.booster_categories()),
            dataset,
            observed_range,
            selection,
            pie,
            scatter,
            status_message: None,
            show_table: false,
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn observed_range(&self) -> PayloadRange {
        self.observed_range
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn pie(&self) -> &PieChart {
        &self.pie
    }

    pub fn scatter(&self) -> &ScatterChart {
        &self.scatter
    }

    /// Site changed → both charts depend on it.
    pub fn set_site(&mut self, site: SiteSelection) {
        if self.selection.site == site {
            return;
        }
        log::debug!("site selection changed to {site}");
        self.selection.site = site;
        self.pie = aggregate_outcomes(&self.dataset, &self.selection.site);
        self.refresh_scatter();
    }

    /// Payload range changed → only the scatter depends on it.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.selection.payload_range == range {
            return;
        }
        log::debug!("payload range changed to {range}");
        self.selection.payload_range = range;
        self.refresh_scatter();
    }

    /// Restore the payload range to the dataset's observed extent.
    pub fn reset_payload_range(&mut self) {
        self.set_payload_range(self.observed_range);
    }

    /// Records behind the current scatter, for the table view.
    pub fn visible_records(&self) -> Vec<&LaunchRecord> {
        matching_records(&self.dataset, &self.selection.site, self.selection.payload_range)
    }

    /// Pretty-printed JSON of the current chart specification.
    pub fn chart_json(&self, kind: ChartKind) -> Result<String> {
        match kind {
            ChartKind::Pie => serde_json::to_string_pretty(&self.pie),
            ChartKind::Scatter => serde_json::to_string_pretty(&self.scatter),
        }
        .context("serializing chart specification")
    }

    fn refresh_scatter(&mut self) {
        self.scatter = select_payload_correlation(
            &self.dataset,
            &self.selection.site,
            self.selection.payload_range,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;

    fn state() -> AppState {
        AppState::new(LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("KSC LC-39A", 2490.0, Outcome::Success, "FT"),
            LaunchRecord::new("KSC LC-39A", 5300.0, Outcome::Failure, "FT"),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, Outcome::Success, "B4"),
        ]))
    }

    #[test]
    fn starts_with_all_sites_and_observed_range() {
        let st = state();
        assert_eq!(st.selection().site, SiteSelection::All);
        assert_eq!(st.selection().payload_range, PayloadRange::new(0.0, 9600.0));
        assert_eq!(st.pie().slices.len(), 3);
        assert_eq!(st.scatter().points.len(), 4);
    }

    #[test]
    fn site_change_recomputes_both_charts() {
        let mut st = state();
        st.set_site(SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(st.pie().total(), 2);
        assert_eq!(st.scatter().points.len(), 2);
        assert!(st.scatter().title.ends_with("KSC LC-39A"));
    }

    #[test]
    fn range_change_only_touches_scatter() {
        let mut st = state();
        let pie_before = st.pie().clone();
        st.set_payload_range(PayloadRange::new(2000.0, 6000.0));
        assert_eq!(st.pie(), &pie_before);
        assert_eq!(st.scatter().points.len(), 2);
        assert_eq!(st.visible_records().len(), 2);

        st.reset_payload_range();
        assert_eq!(st.scatter().points.len(), 4);
    }

    #[test]
    fn chart_json_contains_title() {
        let st = state();
        let json = st.chart_json(ChartKind::Pie).unwrap();
        assert!(json.contains("Total Successful Launches for All Sites"));
        let json = st.chart_json(ChartKind::Scatter).unwrap();
        assert!(json.contains("\"x_range\""));
    }
}
