use std::collections::BTreeMap;

use crate::chart::{PieChart, PieSlice};

use super::model::{LaunchDataset, Outcome, SiteSelection};

// ---------------------------------------------------------------------------
// Outcome aggregation → pie chart
// ---------------------------------------------------------------------------

/// Build the outcome pie for the given site selection.
///
/// * `All` → one slice per site whose value is that site's number of
///   successful launches. Failures are not counted here; sites without a
///   single success still get a zero slice.
/// * `Site(s)` → one slice per outcome observed at `s`, valued by launch count,
///   largest first. An unknown site yields an empty pie.
pub fn aggregate_outcomes(dataset: &LaunchDataset, selected_site: &SiteSelection) -> PieChart {
    match selected_site {
        SiteSelection::All => successes_by_site(dataset),
        SiteSelection::Site(site) => outcomes_for_site(dataset, site),
    }
}

fn successes_by_site(dataset: &LaunchDataset) -> PieChart {
    let mut successes: BTreeMap<&str, u64> = BTreeMap::new();
    for record in dataset.records() {
        *successes.entry(record.site.as_str()).or_default() += u64::from(record.outcome.is_success());
    }

    let slices = dataset
        .sites()
        .iter()
        .map(|site| PieSlice {
            label: site.clone(),
            value: successes.get(site.as_str()).copied().unwrap_or(0),
        })
        .collect();

    PieChart {
        title: "Total Successful Launches for All Sites".to_string(),
        slices,
    }
}

fn outcomes_for_site(dataset: &LaunchDataset, site: &str) -> PieChart {
    let mut counts: BTreeMap<Outcome, u64> = BTreeMap::new();
    for record in dataset.records().iter().filter(|r| r.site == site) {
        *counts.entry(record.outcome).or_default() += 1;
    }

    // Largest bucket first; `Outcome`'s ordering puts Success ahead on ties.
    let mut buckets: Vec<(Outcome, u64)> = counts.into_iter().collect();
    buckets.sort_by(|(oa, ca), (ob, cb)| cb.cmp(ca).then(oa.cmp(ob)));

    PieChart {
        title: format!("Total Launch Outcomes for Site {site}"),
        slices: buckets
            .into_iter()
            .map(|(outcome, value)| PieSlice {
                label: outcome.to_string(),
                value,
            })
            .collect(),
    }
}
