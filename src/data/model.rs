use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as encoded by the dataset's `class` column (1 = success).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    /// Decode a raw `class` value. Anything but 0 or 1 is rejected.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            1 => Some(Outcome::Success),
            0 => Some(Outcome::Failure),
            _ => None,
        }
    }

    /// The numeric class, as plotted on the scatter's y axis.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Success => 1,
            Outcome::Failure => 0,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => write!(f, "Success"),
            Outcome::Failure => write!(f, "Failure"),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    /// Always finite and >= 0.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
    pub flight_number: Option<u32>,
    pub booster_version: Option<String>,
}

impl LaunchRecord {
    /// Minimal constructor for the four required columns.
    pub fn new(
        site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_version_category: impl Into<String>,
    ) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            outcome,
            booster_version_category: booster_version_category.into(),
            flight_number: None,
            booster_version: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Selection types
// ---------------------------------------------------------------------------

/// Which launch site(s) a chart covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(s) => s == site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "All Sites"),
            SiteSelection::Site(s) => write!(f, "{s}"),
        }
    }
}

/// Closed payload interval in kg. `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    min: f64,
    max: f64,
}

impl PayloadRange {
    /// Build a range, swapping the bounds if given in the wrong order.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Inclusive at both ends.
    pub fn contains(&self, payload_kg: f64) -> bool {
        self.min <= payload_kg && payload_kg <= self.max
    }
}

impl fmt::Display for PayloadRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} – {:.0} kg", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed category indices.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster categories in order of first appearance.
    booster_categories: Vec<String>,
}

impl LaunchDataset {
    /// Build category indices from already validated records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites = first_appearance(records.iter().map(|r| r.site.as_str()));
        let booster_categories =
            first_appearance(records.iter().map(|r| r.booster_version_category.as_str()));
        LaunchDataset {
            records,
            sites,
            booster_categories,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Smallest and largest payload in the table; `None` when empty.
    pub fn observed_payload_range(&self) -> Option<PayloadRange> {
        let mut payloads = self.records.iter().map(|r| r.payload_mass_kg);
        let first = payloads.next()?;
        let (min, max) = payloads.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(PayloadRange::new(min, max))
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn first_appearance<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Random launch tables for property tests.
#[cfg(test)]
pub(crate) mod strategies {
    use proptest::prelude::*;

    use super::*;

    /// Site names records are drawn from; the last one never occurs in data.
    pub const SITES: [&str; 5] = [
        "CCAFS LC-40",
        "VAFB SLC-4E",
        "KSC LC-39A",
        "CCAFS SLC-40",
        "Boca Chica",
    ];
    const CATEGORIES: [&str; 5] = ["v1.0", "v1.1", "FT", "B4", "B5"];

    pub fn record() -> impl Strategy<Value = LaunchRecord> {
        (
            prop::sample::select(SITES[..4].to_vec()),
            0.0f64..16_000.0,
            any::<bool>(),
            prop::sample::select(CATEGORIES.to_vec()),
        )
            .prop_map(|(site, payload, success, category)| {
                let outcome = if success { Outcome::Success } else { Outcome::Failure };
                LaunchRecord::new(site, payload.round(), outcome, category)
            })
    }

    pub fn dataset() -> impl Strategy<Value = LaunchDataset> {
        prop::collection::vec(record(), 0..80).prop_map(LaunchDataset::from_records)
    }

    pub fn site_selection() -> impl Strategy<Value = SiteSelection> {
        prop_oneof![
            Just(SiteSelection::All),
            prop::sample::select(SITES.to_vec()).prop_map(|s| SiteSelection::Site(s.to_string())),
        ]
    }

    /// Bounds may come in either order and may reach past the data.
    pub fn payload_range() -> impl Strategy<Value = PayloadRange> {
        (-500.0f64..17_000.0, -500.0f64..17_000.0).prop_map(|(a, b)| PayloadRange::new(a, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_decodes_only_zero_and_one() {
        assert_eq!(Outcome::from_class(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(2), None);
        assert_eq!(Outcome::from_class(-1), None);
    }

    #[test]
    fn payload_range_orders_bounds_and_is_inclusive() {
        let r = PayloadRange::new(5000.0, 1000.0);
        assert_eq!(r.min(), 1000.0);
        assert_eq!(r.max(), 5000.0);
        assert!(r.contains(1000.0));
        assert!(r.contains(5000.0));
        assert!(!r.contains(999.9));
        assert!(!r.contains(5000.1));
    }

    #[test]
    fn sites_keep_first_appearance_order() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("VAFB SLC-4E", 500.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Success, "v1.0"),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, Outcome::Success, "FT"),
        ]);
        assert_eq!(ds.sites(), ["VAFB SLC-4E", "CCAFS LC-40"]);
        assert_eq!(ds.booster_categories(), ["v1.1", "v1.0", "FT"]);
    }

    #[test]
    fn observed_range_spans_all_payloads() {
        let ds = LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 2500.0, Outcome::Success, "FT"),
            LaunchRecord::new("A", 0.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("B", 9600.0, Outcome::Success, "B4"),
        ]);
        assert_eq!(ds.observed_payload_range(), Some(PayloadRange::new(0.0, 9600.0)));
        assert_eq!(LaunchDataset::from_records(Vec::new()).observed_payload_range(), None);
    }

    #[test]
    fn site_selection_all_matches_everything() {
        assert!(SiteSelection::All.matches("anything"));
        let ksc = SiteSelection::Site("KSC LC-39A".into());
        assert!(ksc.matches("KSC LC-39A"));
        assert!(!ksc.matches("CCAFS LC-40"));
        assert_eq!(ksc.to_string(), "KSC LC-39A");
        assert_eq!(SiteSelection::All.to_string(), "All Sites");
    }
}
