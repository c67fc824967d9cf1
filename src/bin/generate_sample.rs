//! Writes a synthetic launch table in the published dashboard layout, as
//! both `spacex_launch_dash.csv` and `spacex_launch_dash.parquet`.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// (first flight number, category, base success probability)
const ERAS: [(u32, &str, f64); 5] = [
    (1, "v1.0", 0.0),
    (6, "v1.1", 0.25),
    (21, "FT", 0.75),
    (46, "B4", 0.6),
    (53, "B5", 0.85),
];

const SITES: [(&str, f64); 4] = [
    ("CCAFS LC-40", 0.45),
    ("VAFB SLC-4E", 0.15),
    ("KSC LC-39A", 0.25),
    ("CCAFS SLC-40", 0.15),
];

const FLIGHTS: u32 = 56;

#[derive(Debug, Serialize)]
struct Row {
    #[serde(rename = "Flight Number")]
    flight_number: u32,
    #[serde(rename = "Launch Site")]
    site: &'static str,
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: &'static str,
}

/// Minimal deterministic PRNG (splitmix64)
struct SimpleRng(u64);

impl SimpleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Pick from `(item, weight)` pairs; weights need not sum to one.
    fn weighted<T: Copy>(&mut self, items: &[(T, f64)]) -> T {
        let total: f64 = items.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_f64() * total;
        for &(item, w) in items {
            if roll < w {
                return item;
            }
            roll -= w;
        }
        items[items.len() - 1].0
    }
}

fn era_for(flight: u32) -> (&'static str, f64) {
    ERAS.iter()
        .rev()
        .find(|(first, _, _)| flight >= *first)
        .map(|&(_, cat, p)| (cat, p))
        .unwrap_or(("v1.0", 0.0))
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    (1..=FLIGHTS)
        .map(|flight_number| {
            let (category, base_p) = era_for(flight_number);
            let site = rng.weighted(&SITES);
            // Early flights carried little; heavy payloads fail more often.
            let ceiling = if flight_number < 6 { 700.0 } else { 9600.0 };
            let payload_mass_kg = (rng.next_f64() * ceiling).round();
            let p = if payload_mass_kg > 6000.0 { base_p * 0.6 } else { base_p };
            let class = i64::from(rng.next_f64() < p);
            Row {
                flight_number,
                site,
                class,
                payload_mass_kg,
                booster_version: format!("F9 {category} B{:04}", 1000 + flight_number),
                booster_version_category: category,
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| i64::from(r.flight_number)))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster_version.as_str()))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster_version_category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng(42);
    let rows = generate(&mut rng);

    write_csv(&rows, "spacex_launch_dash.csv")?;
    write_parquet(&rows, "spacex_launch_dash.parquet")?;

    let successes = rows.iter().filter(|r| r.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to spacex_launch_dash.csv and .parquet",
        rows.len()
    );
    Ok(())
}
