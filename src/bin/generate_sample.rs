//! Writes a synthetic launch table (`spacex_launch_dash.csv` and
//! `spacex_launch_dash.parquet`) shaped like the dashboard's input.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster generations in flight order: (category, flights, success rate, max payload).
const ERAS: [(&str, usize, f64, f64); 5] = [
    ("v1.0", 5, 0.2, 700.0),
    ("v1.1", 15, 0.35, 4500.0),
    ("FT", 24, 0.8, 7000.0),
    ("B4", 11, 0.55, 9600.0),
    ("B5", 1, 1.0, 6000.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

#[derive(Serialize)]
struct Row {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    site: String,
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: String,
}

fn generate(rng: &mut SimpleRng) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut flight_number = 1;

    for &(category, flights, success_rate, max_payload) in &ERAS {
        for _ in 0..flights {
            // Early flights launched from the Cape only.
            let site = if category == "v1.0" {
                SITES[0]
            } else {
                *rng.pick(&SITES)
            };
            let payload = (rng.next_f64() * max_payload).round();
            let class = i64::from(rng.next_f64() < success_rate);
            rows.push(Row {
                flight_number,
                site: site.to_string(),
                class,
                payload_mass_kg: payload,
                booster_version: format!("F9 {category} B{:04}", 1000 + flight_number),
                booster_version_category: category.to_string(),
            });
            flight_number += 1;
        }
    }
    rows
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn to_record_batch(rows: &[Row]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site.as_str()))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_mass_kg))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.booster_version.as_str()))),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.booster_version_category.as_str()),
        )),
    ];

    RecordBatch::try_new(schema, columns).context("building record batch")
}

fn write_parquet(batch: &RecordBatch, path: &str) -> Result<()> {
    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng);

    let csv_path = "spacex_launch_dash.csv";
    write_csv(&rows, csv_path)?;

    let batch = to_record_batch(&rows)?;
    let parquet_path = "spacex_launch_dash.parquet";
    write_parquet(&batch, parquet_path)?;

    println!("{}", pretty_format_batches(&[batch.slice(0, batch.num_rows().min(5))])?);
    println!("Wrote {} launches to {csv_path} and {parquet_path}", rows.len());
    Ok(())
}
