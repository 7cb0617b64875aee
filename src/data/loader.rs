use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

use super::error::DataSourceError;
use super::model::{Column, LaptopRecord, Table, Value};

type Result<T> = std::result::Result<T, DataSourceError>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a laptop table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – comma separated, header row with the source column names
/// * `.json`    – `[{ "Brand": "HP", "Price": 52990, ... }, ...]`
/// * `.parquet` – one column per source column
///
/// Every source column must be present; the derived `Resolution` column
/// is computed here and never read from the file.
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DataSourceError::UnsupportedFormat(other.to_string())),
    };

    log::info!("Loaded {} laptops from {}", table.len(), path.display());
    Ok(table)
}

// ---------------------------------------------------------------------------
// Raw row shared by every format
// ---------------------------------------------------------------------------

/// One source row before validation, keyed by the original header names.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRecord {
    #[serde(rename = "Brand")]
    pub brand: Option<String>,
    #[serde(rename = "Series")]
    pub series: Option<String>,
    #[serde(rename = "Spec_Score")]
    pub spec_score: Option<f64>,
    #[serde(rename = "Price")]
    pub price: Option<f64>,
    #[serde(rename = "Price_Range")]
    pub price_range: Option<String>,
    #[serde(rename = "Utility")]
    pub utility: Option<String>,
    #[serde(rename = "Ram_Capacity(GB)", alias = "Ram_Capacity_GB")]
    pub ram_capacity_gb: Option<f64>,
    #[serde(rename = "Display Size (Inches)", alias = "Display_Size_Inches")]
    pub display_size_inches: Option<f64>,
    #[serde(
        rename = "Resolution Width",
        alias = "Resolution_Width",
        default,
        deserialize_with = "integral_cell"
    )]
    pub resolution_width: Option<u32>,
    #[serde(
        rename = "Resolution Height",
        alias = "Resolution_Height",
        default,
        deserialize_with = "integral_cell"
    )]
    pub resolution_height: Option<u32>,
    #[serde(rename = "PPI")]
    pub ppi: Option<f64>,
    #[serde(rename = "OS Type", alias = "OS_Type")]
    pub os_type: Option<String>,
    #[serde(rename = "Graphics_Brand")]
    pub graphics_brand: Option<String>,
    #[serde(rename = "Weight(kg)", alias = "Weight_Kg")]
    pub weight_kg: Option<f64>,
}

/// Accept a non-negative whole number written as `1920` or `1920.0`.
/// pandas writes integer columns that hold a NaN as floats.
fn integral(v: f64) -> std::result::Result<u32, String> {
    if v.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&v) {
        Ok(v as u32)
    } else {
        Err(format!("'{v}' is not a non-negative integer"))
    }
}

fn integral_cell<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<f64>::deserialize(deserializer)? {
        Some(v) if !v.is_nan() => integral(v).map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl RawRecord {
    /// Validate one row. `row` is 1-based and only used for messages.
    pub fn into_record(self, row: usize) -> Result<LaptopRecord> {
        // NaN is how pandas writes a missing float; treat it as missing.
        let finite = |v: Option<f64>| v.filter(|x| !x.is_nan());

        let price = finite(self.price);
        if let Some(p) = price {
            if p < 0.0 || p.is_infinite() {
                return Err(DataSourceError::row(row, format!("Price {p} is negative or infinite")));
            }
        }
        let spec_score = finite(self.spec_score);
        if let Some(s) = spec_score {
            if !(0.0..=100.0).contains(&s) {
                return Err(DataSourceError::row(row, format!("Spec_Score {s} outside 0..=100")));
            }
        }
        for (name, v) in [
            ("Resolution Width", self.resolution_width),
            ("Resolution Height", self.resolution_height),
        ] {
            if v == Some(0) {
                return Err(DataSourceError::row(row, format!("{name} must be positive")));
            }
        }

        Ok(LaptopRecord {
            brand: self.brand,
            series: self.series,
            spec_score,
            price,
            price_range: self.price_range,
            utility: self.utility,
            ram_capacity_gb: finite(self.ram_capacity_gb),
            display_size_inches: finite(self.display_size_inches),
            resolution_width: self.resolution_width,
            resolution_height: self.resolution_height,
            ppi: finite(self.ppi),
            os_type: self.os_type,
            graphics_brand: self.graphics_brand,
            weight_kg: finite(self.weight_kg),
            resolution: None,
        })
    }
}

impl From<&LaptopRecord> for RawRecord {
    fn from(r: &LaptopRecord) -> Self {
        RawRecord {
            brand: r.brand.clone(),
            series: r.series.clone(),
            spec_score: r.spec_score,
            price: r.price,
            price_range: r.price_range.clone(),
            utility: r.utility.clone(),
            ram_capacity_gb: r.ram_capacity_gb,
            display_size_inches: r.display_size_inches,
            resolution_width: r.resolution_width,
            resolution_height: r.resolution_height,
            ppi: r.ppi,
            os_type: r.os_type.clone(),
            graphics_brand: r.graphics_brand.clone(),
            weight_kg: r.weight_kg,
        }
    }
}

/// Fail with `MissingColumn` for the first source column absent from `headers`.
fn require_columns(headers: &[&str]) -> Result<()> {
    for column in Column::SOURCE {
        if !headers.iter().any(|h| Column::from_name(h) == Some(column)) {
            return Err(DataSourceError::MissingColumn(column.name().to_string()));
        }
    }
    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> DataSourceError {
    DataSourceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with the source column names, one laptop per
/// line. Extra columns are ignored; a row with a different field count
/// than the header is malformed.
fn load_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    read_csv(file)
}

/// Read CSV from any reader. Split out so tests can feed in-memory text.
pub fn read_csv<R: std::io::Read>(input: R) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();
    require_columns(&headers.iter().collect::<Vec<_>>())?;

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result?;
        records.push(raw.into_record(row_no + 1)?);
    }

    Ok(Table::from_records(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Brand": "HP", "Series": "Victus 15", "Price": 52990, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    read_json(&text)
}

pub fn read_json(text: &str) -> Result<Table> {
    let root: JsonValue = serde_json::from_str(text)?;
    let rows = match root {
        JsonValue::Array(rows) => rows,
        _ => return Err(DataSourceError::row(0, "expected a top-level JSON array")),
    };

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let row_no = i + 1;
        let obj = match row {
            JsonValue::Object(obj) => obj,
            _ => return Err(DataSourceError::row(row_no, "not a JSON object")),
        };
        require_columns(&obj.keys().map(String::as_str).collect::<Vec<_>>())?;

        let raw: RawRecord = serde_json::from_value(JsonValue::Object(obj))
            .map_err(|e| DataSourceError::row(row_no, e.to_string()))?;
        records.push(raw.into_record(row_no)?);
    }

    Ok(Table::from_records(records))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one column per source column.
///
/// Works with files written by **Pandas** (`df.to_parquet()`), **Polars**
/// and the bundled `generate_sample` binary.
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();
        require_columns(
            &schema
                .fields()
                .iter()
                .map(|f| f.name().as_str())
                .collect::<Vec<_>>(),
        )?;

        // Locate each source column in this batch.
        let mut columns: Vec<(Column, ArrayRef)> = Vec::with_capacity(Column::SOURCE.len());
        for (idx, field) in schema.fields().iter().enumerate() {
            if let Some(column) = Column::from_name(field.name()) {
                if column != Column::Resolution {
                    columns.push((column, batch.column(idx).clone()));
                }
            }
        }

        for row in 0..batch.num_rows() {
            let row_no = records.len() + 1;
            let mut raw = RawRecord::default();
            for (column, array) in &columns {
                let value = cell_value(array, row)
                    .map_err(|message| DataSourceError::row(row_no, message))?;
                assign(&mut raw, *column, value)
                    .map_err(|message| DataSourceError::row(row_no, message))?;
            }
            records.push(raw.into_record(row_no)?);
        }
    }

    Ok(Table::from_records(records))
}

// -- Parquet / Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn cell_value(col: &ArrayRef, row: usize) -> std::result::Result<Value, String> {
    if col.is_null(row) {
        return Ok(Value::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => Value::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Value::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => Value::Integer(i64::from(col.as_primitive::<Int32Type>().value(row))),
        DataType::Int64 => Value::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => Value::Float(f64::from(col.as_primitive::<Float32Type>().value(row))),
        DataType::Float64 => Value::Float(col.as_primitive::<Float64Type>().value(row)),
        other => return Err(format!("unsupported column type {other:?}")),
    };
    Ok(value)
}

/// Store `value` in the field of `raw` belonging to `column`.
fn assign(raw: &mut RawRecord, column: Column, value: Value) -> std::result::Result<(), String> {
    let text = |v: Value| match v {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        other => Err(format!("{column}: expected text, got {other}")),
    };
    let number = |v: Value| match v {
        Value::Null => Ok(None),
        Value::String(s) => Err(format!("{column}: '{s}' is not a number")),
        other => Ok(other.as_f64()),
    };
    let integer = |v: Value| match v {
        Value::Null => Ok(None),
        Value::Integer(i) => u32::try_from(i)
            .map(Some)
            .map_err(|_| format!("{column}: {i} out of range")),
        Value::Float(f) if f.is_nan() => Ok(None),
        Value::Float(f) => integral(f).map(Some).map_err(|e| format!("{column}: {e}")),
        other => Err(format!("{column}: '{other}' is not an integer")),
    };

    match column {
        Column::Brand => raw.brand = text(value)?,
        Column::Series => raw.series = text(value)?,
        Column::SpecScore => raw.spec_score = number(value)?,
        Column::Price => raw.price = number(value)?,
        Column::PriceRange => raw.price_range = text(value)?,
        Column::Utility => raw.utility = text(value)?,
        Column::RamCapacityGb => raw.ram_capacity_gb = number(value)?,
        Column::DisplaySizeInches => raw.display_size_inches = number(value)?,
        Column::ResolutionWidth => raw.resolution_width = integer(value)?,
        Column::ResolutionHeight => raw.resolution_height = integer(value)?,
        Column::Ppi => raw.ppi = number(value)?,
        Column::OsType => raw.os_type = text(value)?,
        Column::GraphicsBrand => raw.graphics_brand = text(value)?,
        Column::WeightKg => raw.weight_kg = number(value)?,
        Column::Resolution => {}
    }
    Ok(())
}
