//! Writes a synthetic laptop dataset for trying out the dashboard.
//!
//! `generate_sample [OUTPUT]` — `.parquet` output writes Parquet, anything
//! else writes CSV. Defaults to `sample_laptops.csv`.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use laptop_insights::data::Column;
use laptop_insights::data::loader::RawRecord;
use laptop_insights::data::model::derive_ppi;

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
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (brand, series, base price in rupees, graphics vendors, operating system)
const LINEUP: &[(&str, &[&str], f64, &[&str], &str)] = &[
    ("HP", &["Victus 15", "Pavilion 14", "Envy x360", "Omen 16"], 70_000.0, &["Intel", "NVIDIA", "AMD"], "Windows"),
    ("Dell", &["Inspiron 15", "Vostro 14", "XPS 13", "Alienware m16"], 80_000.0, &["Intel", "NVIDIA"], "Windows"),
    ("Lenovo", &["IdeaPad Slim 3", "ThinkPad E14", "Legion 5", "Yoga 7i"], 65_000.0, &["Intel", "AMD", "NVIDIA"], "Windows"),
    ("Asus", &["Vivobook 15", "TUF Gaming F15", "Zenbook 14", "ROG Strix G16"], 68_000.0, &["Intel", "NVIDIA", "AMD"], "Windows"),
    ("Acer", &["Aspire 7", "Nitro V", "Swift Go 14", "Chromebook 314"], 55_000.0, &["Intel", "NVIDIA"], "Windows"),
    ("MSI", &["Modern 14", "Thin GF63", "Katana 15"], 75_000.0, &["NVIDIA", "Intel"], "Windows"),
    ("Apple", &["MacBook Air M2", "MacBook Pro 14"], 140_000.0, &["Apple"], "Mac"),
    ("Samsung", &["Galaxy Book3", "Galaxy Book3 Pro"], 90_000.0, &["Intel"], "Windows"),
    ("Infinix", &["INBook X1", "Zero Book Ultra"], 35_000.0, &["Intel"], "Windows"),
];

const PANELS: &[(u32, u32, f64)] = &[
    (1366, 768, 14.0),
    (1920, 1080, 15.6),
    (1920, 1080, 14.0),
    (1920, 1200, 16.0),
    (2560, 1600, 14.0),
    (2880, 1800, 14.5),
    (2560, 1664, 13.6),
];

const RAM: &[f64] = &[4.0, 8.0, 16.0, 32.0];
const UTILITY: &[&str] = &["Everyday Use", "Business", "Gaming", "Performance"];

fn price_range(price: f64) -> &'static str {
    match price {
        p if p < 40_000.0 => "Budget",
        p if p < 80_000.0 => "Mid-Range",
        p if p < 150_000.0 => "Premium",
        _ => "Flagship",
    }
}

fn generate(n_per_brand: usize, rng: &mut SimpleRng) -> Vec<RawRecord> {
    let mut rows = Vec::new();
    for &(brand, series, base_price, graphics, os) in LINEUP {
        for _ in 0..n_per_brand {
            let ram = *rng.pick(RAM);
            let &(width, height, size) = rng.pick(PANELS);
            let utility = *rng.pick(UTILITY);

            let tier = ram.log2() - 2.0;
            let price = (base_price * (0.7 + 0.25 * tier) + rng.gauss(0.0, 8_000.0)).max(15_000.0);
            let spec_score = (45.0 + 7.0 * tier + rng.gauss(0.0, 5.0)).clamp(20.0, 95.0);
            let model = *rng.pick(series);
            let os = if model.starts_with("Chromebook") { "Chrome" } else { os };

            rows.push(RawRecord {
                brand: Some(brand.to_string()),
                series: Some(model.to_string()),
                spec_score: Some(spec_score.round()),
                price: Some(price.round()),
                price_range: Some(price_range(price).to_string()),
                utility: Some(utility.to_string()),
                ram_capacity_gb: Some(ram),
                display_size_inches: Some(size),
                resolution_width: Some(width),
                resolution_height: Some(height),
                ppi: derive_ppi(width, height, size).map(|p| (p * 100.0).round() / 100.0),
                os_type: Some(os.to_string()),
                graphics_brand: Some(rng.pick(graphics).to_string()),
                weight_kg: Some((1.2 + 0.4 * tier + rng.gauss(0.0, 0.15)).max(0.9)),
            });
        }
    }
    rows
}

fn write_csv(path: &Path, rows: &[RawRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[RawRecord]) -> Result<()> {
    let text = |f: fn(&RawRecord) -> Option<String>| -> ArrayRef {
        Arc::new(rows.iter().map(f).collect::<StringArray>())
    };
    let float = |f: fn(&RawRecord) -> Option<f64>| -> ArrayRef {
        Arc::new(rows.iter().map(f).collect::<Float64Array>())
    };
    let int = |f: fn(&RawRecord) -> Option<u32>| -> ArrayRef {
        Arc::new(rows.iter().map(|r| f(r).map(i64::from)).collect::<Int64Array>())
    };

    let columns: Vec<(Column, ArrayRef)> = vec![
        (Column::Brand, text(|r| r.brand.clone())),
        (Column::Series, text(|r| r.series.clone())),
        (Column::SpecScore, float(|r| r.spec_score)),
        (Column::Price, float(|r| r.price)),
        (Column::PriceRange, text(|r| r.price_range.clone())),
        (Column::Utility, text(|r| r.utility.clone())),
        (Column::RamCapacityGb, float(|r| r.ram_capacity_gb)),
        (Column::DisplaySizeInches, float(|r| r.display_size_inches)),
        (Column::ResolutionWidth, int(|r| r.resolution_width)),
        (Column::ResolutionHeight, int(|r| r.resolution_height)),
        (Column::Ppi, float(|r| r.ppi)),
        (Column::OsType, text(|r| r.os_type.clone())),
        (Column::GraphicsBrand, text(|r| r.graphics_brand.clone())),
        (Column::WeightKg, float(|r| r.weight_kg)),
    ];

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(c, a)| Field::new(c.name(), a.data_type().clone(), true))
            .collect::<Vec<Field>>(),
    ));
    let batch = RecordBatch::try_new(schema.clone(), columns.into_iter().map(|(_, a)| a).collect())
        .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_laptops.csv".to_string());
    let path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let rows = generate(12, &mut rng);

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("parquet") => write_parquet(path, &rows)?,
        _ => write_csv(path, &rows)?,
    }

    println!("Wrote {} laptops to {}", rows.len(), path.display());
    Ok(())
}
