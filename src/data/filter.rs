use crate::chart::{ScatterChart, ScatterPoint};

use super::model::{LaunchDataset, LaunchRecord, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Record predicate: site + payload range
// ---------------------------------------------------------------------------

/// Records at the selected site(s) whose payload lies in `payload_range`,
/// in dataset order.
pub fn matching_records<'a>(
    dataset: &'a LaunchDataset,
    selected_site: &SiteSelection,
    payload_range: PayloadRange,
) -> Vec<&'a LaunchRecord> {
    dataset
        .records()
        .iter()
        .filter(|r| payload_range.contains(r.payload_mass_kg) && selected_site.matches(&r.site))
        .collect()
}

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter
// ---------------------------------------------------------------------------

/// Build the payload/outcome scatter for the given selection.
///
/// The requested `payload_range` doubles as the chart's x extent, whatever
/// the spread of the surviving points.
pub fn select_payload_correlation(
    dataset: &LaunchDataset,
    selected_site: &SiteSelection,
    payload_range: PayloadRange,
) -> ScatterChart {
    let points = matching_records(dataset, selected_site, payload_range)
        .into_iter()
        .map(|r| ScatterPoint {
            x: r.payload_mass_kg,
            y: f64::from(r.outcome.class()),
            category: r.booster_version_category.clone(),
            flight_number: r.flight_number,
            booster_version: r.booster_version.clone(),
        })
        .collect();

    let title = match selected_site {
        SiteSelection::All => "Correlation between Payload and Success for All Sites".to_string(),
        SiteSelection::Site(site) => {
            format!("Correlation between Payload and Success for Site {site}")
        }
    };

    ScatterChart {
        title,
        x_range: payload_range,
        points,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use proptest::test_runner::Config;

    use super::*;
    use crate::data::model::Outcome;
    use crate::data::model::strategies;

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("CCAFS LC-40", 525.0, Outcome::Failure, "v1.0"),
            LaunchRecord::new("VAFB SLC-4E", 500.0, Outcome::Failure, "v1.1"),
            LaunchRecord::new("KSC LC-39A", 2490.0, Outcome::Success, "FT"),
            LaunchRecord::new("KSC LC-39A", 5300.0, Outcome::Success, "FT"),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, Outcome::Success, "FT"),
            LaunchRecord::new("CCAFS SLC-40", 3600.0, Outcome::Success, "B4"),
            LaunchRecord::new("KSC LC-39A", 6000.0, Outcome::Failure, "B5"),
        ])
    }

    #[test]
    fn every_point_satisfies_both_predicates() {
        let ds = dataset();
        let range = PayloadRange::new(500.0, 6000.0);
        for sel in [SiteSelection::All, SiteSelection::Site("KSC LC-39A".into())] {
            let chart = select_payload_correlation(&ds, &sel, range);
            let expected = ds
                .records()
                .iter()
                .filter(|r| range.contains(r.payload_mass_kg) && sel.matches(&r.site))
                .count();
            assert_eq!(chart.points.len(), expected);
            for p in &chart.points {
                assert!(range.contains(p.x));
            }
        }
    }

    #[test]
    fn single_site_keeps_only_that_site() {
        let ds = dataset();
        let sel = SiteSelection::Site("KSC LC-39A".into());
        let records = matching_records(&ds, &sel, PayloadRange::new(0.0, 10_000.0));
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.site == "KSC LC-39A"));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ds = dataset();
        let chart = select_payload_correlation(&ds, &SiteSelection::All, PayloadRange::new(525.0, 2490.0));
        let xs: Vec<f64> = chart.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![525.0, 2490.0]);
    }

    #[test]
    fn observed_range_with_all_sites_returns_every_record_once() {
        let ds = dataset();
        let range = ds.observed_payload_range().unwrap();
        let chart = select_payload_correlation(&ds, &SiteSelection::All, range);
        assert_eq!(chart.points.len(), ds.len());
        let xs: Vec<f64> = chart.points.iter().map(|p| p.x).collect();
        let expected: Vec<f64> = ds.records().iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(xs, expected);
    }

    #[test]
    fn points_carry_class_and_booster_category() {
        let ds = dataset();
        let chart = select_payload_correlation(
            &ds,
            &SiteSelection::Site("CCAFS SLC-40".into()),
            PayloadRange::new(0.0, 10_000.0),
        );
        assert_eq!(chart.points.len(), 1);
        assert_eq!(chart.points[0].y, 1.0);
        assert_eq!(chart.points[0].category, "B4");
        assert_eq!(chart.title, "Correlation between Payload and Success for Site CCAFS SLC-40");
    }

    #[test]
    fn x_range_is_the_requested_range() {
        let ds = dataset();
        let range = PayloadRange::new(-1000.0, 20_000.0);
        let chart = select_payload_correlation(&ds, &SiteSelection::All, range);
        assert_eq!(chart.x_range, range);
        assert_eq!(chart.title, "Correlation between Payload and Success for All Sites");
    }

    #[test]
    fn empty_selection_is_valid() {
        let ds = dataset();
        let chart = select_payload_correlation(
            &ds,
            &SiteSelection::Site("Boca Chica".into()),
            PayloadRange::new(0.0, 10_000.0),
        );
        assert!(chart.is_empty());
        let chart = select_payload_correlation(&ds, &SiteSelection::All, PayloadRange::new(7000.0, 9000.0));
        assert!(chart.is_empty());
    }

    #[test]
    fn selection_is_idempotent() {
        let ds = dataset();
        let sel = SiteSelection::Site("VAFB SLC-4E".into());
        let range = PayloadRange::new(0.0, 9600.0);
        assert_eq!(
            select_payload_correlation(&ds, &sel, range),
            select_payload_correlation(&ds, &sel, range)
        );
    }

    proptest! {
        #![proptest_config(Config::with_cases(256))]

        #[test]
        fn selected_records_are_exactly_the_matching_ones(
            ds in strategies::dataset(),
            sel in strategies::site_selection(),
            range in strategies::payload_range(),
        ) {
            let selected = matching_records(&ds, &sel, range);
            for r in &selected {
                prop_assert!(range.contains(r.payload_mass_kg));
                prop_assert!(sel.matches(&r.site));
            }
            let expected: Vec<&LaunchRecord> = ds
                .records()
                .iter()
                .filter(|r| range.min() <= r.payload_mass_kg && r.payload_mass_kg <= range.max())
                .filter(|r| match &sel {
                    SiteSelection::All => true,
                    SiteSelection::Site(s) => &r.site == s,
                })
                .collect();
            prop_assert_eq!(&selected, &expected);

            let chart = select_payload_correlation(&ds, &sel, range);
            prop_assert_eq!(chart.points.len(), expected.len());
            for (p, r) in chart.points.iter().zip(&expected) {
                prop_assert_eq!(p.x, r.payload_mass_kg);
                prop_assert_eq!(p.y, f64::from(r.outcome.class()));
                prop_assert_eq!(&p.category, &r.booster_version_category);
            }
            prop_assert_eq!(chart.x_range, range);
        }

        #[test]
        fn observed_range_over_all_sites_keeps_every_record(ds in strategies::dataset()) {
            if let Some(range) = ds.observed_payload_range() {
                let selected = matching_records(&ds, &SiteSelection::All, range);
                prop_assert_eq!(selected.len(), ds.len());
                for (got, want) in selected.iter().zip(ds.records()) {
                    prop_assert!(std::ptr::eq(*got, want));
                }
            } else {
                prop_assert!(ds.is_empty());
            }
        }

        #[test]
        fn selection_repeats_exactly(
            ds in strategies::dataset(),
            sel in strategies::site_selection(),
            range in strategies::payload_range(),
        ) {
            prop_assert_eq!(
                select_payload_correlation(&ds, &sel, range),
                select_payload_correlation(&ds, &sel, range)
            );
        }
    }
}
