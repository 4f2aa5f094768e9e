use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE, COL_PAYLOAD_MASS, LaunchDataset,
    LaunchRecord, RawLaunchRow, REQUIRED_COLUMNS,
};
use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with at least the four launch columns (recommended)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., ... }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => return Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading dataset {}", path.display()))?;

    log::info!(
        "Loaded {} launches from {} ({} sites, payload {}..{} kg)",
        dataset.len(),
        path.display(),
        dataset.sites.len(),
        dataset.min_payload,
        dataset.max_payload
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// CSV layout: header row with column names. Columns other than the four
/// launch columns are ignored.
pub fn read_csv<R: Read>(input: R) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!(DatasetError::MissingColumn {
                format: "CSV",
                column: col.to_string(),
            });
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawLaunchRow>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(LaunchRecord::from_raw(raw, row_no)?);
    }

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "Launch Site": "CCAFS LC-40",
///     "Payload Mass (kg)": 525.0,
///     "Booster Version Category": "v1.0",
///     "class": 0
///   },
///   ...
/// ]
/// ```
pub fn parse_json(text: &str) -> Result<LaunchDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        for col in REQUIRED_COLUMNS {
            if !obj.contains_key(col) {
                bail!(DatasetError::MissingColumn {
                    format: "JSON",
                    column: col.to_string(),
                });
            }
        }

        let raw: RawLaunchRow = serde_json::from_value(row.clone())
            .with_context(|| format!("Row {i}: unexpected value type"))?;
        records.push(LaunchRecord::from_raw(raw, i)?);
    }

    Ok(LaunchDataset::from_records(records)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema (flat, one launch per row):
/// - `Launch Site`, `Booster Version Category`: Utf8 / LargeUtf8
/// - `Payload Mass (kg)`: Float64, Float32, Int64 or Int32
/// - `class`: Int64, Int32 or Float64 holding 0 / 1
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let site_col = column_by_name(&batch, COL_LAUNCH_SITE)?;
        let payload_col = column_by_name(&batch, COL_PAYLOAD_MASS)?;
        let booster_col = column_by_name(&batch, COL_BOOSTER_CATEGORY)?;
        let class_col = column_by_name(&batch, COL_CLASS)?;

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            let raw = RawLaunchRow {
                site: extract_string(site_col, row_no, row, COL_LAUNCH_SITE)?,
                payload_mass_kg: extract_f64(payload_col, row_no, row, COL_PAYLOAD_MASS)?,
                booster_version_category: extract_string(
                    booster_col,
                    row_no,
                    row,
                    COL_BOOSTER_CATEGORY,
                )?,
                class: extract_class(class_col, row_no, row)?,
            };
            records.push(LaunchRecord::from_raw(raw, row_no)?);
        }
    }

    Ok(LaunchDataset::from_records(records)?)
}

// -- Parquet / Arrow helpers --

fn column_by_name<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a Arc<dyn Array>, DatasetError> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|_| DatasetError::MissingColumn {
            format: "Parquet",
            column: name.to_string(),
        })?;
    Ok(batch.column(idx))
}

fn type_error(col: &Arc<dyn Array>, row_no: usize, name: &str, expected: &'static str) -> DatasetError {
    DatasetError::ColumnType {
        row: row_no,
        column: name.to_string(),
        found: format!("{:?}", col.data_type()),
        expected,
    }
}

fn check_null(col: &Arc<dyn Array>, row_no: usize, row: usize, name: &str) -> Result<(), DatasetError> {
    if col.is_null(row) {
        return Err(DatasetError::NullValue {
            row: row_no,
            column: name.to_string(),
        });
    }
    Ok(())
}

/// Extract a string cell. `row_no` counts across batches, `row` is the
/// offset inside the current batch.
fn extract_string(col: &Arc<dyn Array>, row_no: usize, row: usize, name: &str) -> Result<String> {
    check_null(col, row_no, row, name)?;
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => Ok(col.as_string::<i64>().value(row).to_string()),
        _ => Err(type_error(col, row_no, name, "Utf8").into()),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row_no: usize, row: usize, name: &str) -> Result<f64> {
    check_null(col, row_no, row, name)?;
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Float64 => any.downcast_ref::<Float64Array>().map(|a| a.value(row)),
        DataType::Float32 => any.downcast_ref::<Float32Array>().map(|a| a.value(row) as f64),
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row) as f64),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as f64),
        _ => None,
    };
    value.ok_or_else(|| type_error(col, row_no, name, "a numeric type").into())
}

fn extract_class(col: &Arc<dyn Array>, row_no: usize, row: usize) -> Result<i64> {
    check_null(col, row_no, row, COL_CLASS)?;
    let any = col.as_any();
    let value = match col.data_type() {
        DataType::Int64 => any.downcast_ref::<Int64Array>().map(|a| a.value(row)),
        DataType::Int32 => any.downcast_ref::<Int32Array>().map(|a| a.value(row) as i64),
        // Pandas promotes integer columns to float when they ever held NaN.
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| a.value(row))
            .filter(|v| v.fract() == 0.0)
            .map(|v| v as i64),
        _ => None,
    };
    value.ok_or_else(|| type_error(col, row_no, COL_CLASS, "an integer type").into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Outcome;

    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use parquet::arrow::ArrowWriter;

    const CSV: &str = "\
Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category
1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0
2,CCAFS LC-40,0,0.0,F9 v1.0  B0004,v1.0
3,VAFB SLC-4E,0,500.0,F9 v1.1  B1003,v1.1
4,KSC LC-39A,1,2490.0,F9 FT B1031.1,FT
";

    #[test]
    fn csv_loads_and_ignores_extra_columns() {
        let ds = read_csv(CSV.as_bytes()).unwrap();
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]);
        assert_eq!(ds.records[3].outcome, Outcome::Success);
        assert_eq!(ds.records[2].booster_version_category, "v1.1");
        assert_eq!(ds.max_payload, 2490.0);
    }

    #[test]
    fn csv_without_class_column_is_a_schema_error() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category\nKSC LC-39A,100,FT\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        match err.downcast_ref::<DatasetError>() {
            Some(DatasetError::MissingColumn { column, .. }) => assert_eq!(column, "class"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn csv_with_out_of_range_class_fails() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\nKSC LC-39A,100,FT,3\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::InvalidClass { row: 0, value: 3 })
        ));
    }

    #[test]
    fn csv_with_header_only_is_empty() {
        let csv = "Launch Site,Payload Mass (kg),Booster Version Category,class\n";
        let err = read_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err.downcast_ref::<DatasetError>(), Some(DatasetError::Empty)));
    }

    #[test]
    fn json_records_load() {
        let json = r#"[
            {"Launch Site": "KSC LC-39A", "Payload Mass (kg)": 2490, "Booster Version Category": "FT", "class": 1},
            {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 9600.0, "Booster Version Category": "FT", "class": 0}
        ]"#;
        let ds = parse_json(json).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.min_payload, 2490.0);
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
    }

    #[test]
    fn json_missing_column_is_a_schema_error() {
        let json = r#"[{"Launch Site": "KSC LC-39A", "class": 1}]"#;
        let err = parse_json(json).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::MissingColumn { format: "JSON", .. })
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_file(Path::new("launches.xlsx")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::UnsupportedExtension(ext)) if ext == "xlsx"
        ));
    }

    #[test]
    fn missing_file_fails() {
        assert!(load_file(Path::new("/nonexistent/spacex_launch_dash.csv")).is_err());
    }

    #[test]
    fn parquet_with_integer_payload_loads() {
        let schema = Arc::new(Schema::new(vec![
            Field::new(COL_LAUNCH_SITE, DataType::Utf8, false),
            Field::new(COL_PAYLOAD_MASS, DataType::Int64, false),
            Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, false),
            Field::new(COL_CLASS, DataType::Float64, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["KSC LC-39A", "CCAFS LC-40"])),
            Arc::new(Int64Array::from(vec![5300, 525])),
            Arc::new(StringArray::from(vec!["FT", "v1.0"])),
            Arc::new(Float64Array::from(vec![1.0, 0.0])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let tmp = tempfile::Builder::new()
            .prefix("launches")
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let mut writer = ArrowWriter::try_new(tmp.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(tmp.path()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].payload_mass_kg, 5300.0);
        assert_eq!(ds.records[0].outcome, Outcome::Success);
        assert_eq!(ds.records[1].outcome, Outcome::Failure);
        assert_eq!(ds.min_payload, 525.0);
    }
}
