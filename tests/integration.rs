use std::io::Write;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::{Builder, NamedTempFile};

use laptop_insights::data::aggregate::{self, AggregationRequest, AggregationResult, SortOrder};
use laptop_insights::data::loader::load_file;
use laptop_insights::data::{Column, DataSourceError, Predicate, Value};
use laptop_insights::pages::Page;
use laptop_insights::report;
use laptop_insights::state::Session;

const CSV: &str = "\
Brand,Series,Spec_Score,Price,Price_Range,Utility,Ram_Capacity(GB),Display Size (Inches),Resolution Width,Resolution Height,PPI,OS Type,Graphics_Brand,Weight(kg)
HP,Victus 15,68,52990,Mid,Gaming,16,15.6,1920,1080,141.21,Windows,NVIDIA,2.29
Dell,XPS 13,72,129990,High,Business,16,13.4,1920,1200,168.98,Windows,Intel,1.17
HP,Pavilion 14,61,61990,Mid,Everyday Use,8,14,1920,1080,157.35,Windows,Intel,1.41
Apple,MacBook Air M2,74,99900,High,Everyday Use,8,13.6,2560,1664,224.42,Mac,Apple,1.24
Lenovo,IdeaPad Slim 3,55,38990,Low,Everyday Use,8,15.6,1920,1080,141.21,Windows,AMD,1.63
";

fn temp_with(suffix: &str, content: &str) -> NamedTempFile {
    let mut tmp = Builder::new().suffix(suffix).tempfile().unwrap();
    write!(tmp, "{}", content).unwrap();
    tmp
}

#[test]
fn csv_file_loads_with_derived_resolution() {
    let tmp = temp_with(".csv", CSV);
    let table = load_file(tmp.path()).unwrap();
    assert_eq!(table.len(), 5);

    let resolutions = aggregate::frequency_count(&table, "Resolution").unwrap();
    assert_eq!(resolutions[0], (Value::from("1920x1080"), 3));
    assert!(resolutions.iter().all(|(k, _)| !k.to_string().contains(' ')));
}

#[test]
fn frequency_counts_sum_to_row_count() {
    let table = load_file(temp_with(".csv", CSV).path()).unwrap();
    for column in ["Brand", "Price_Range", "Utility", "OS Type", "Graphics_Brand"] {
        let total: usize = aggregate::frequency_count(&table, column)
            .unwrap()
            .iter()
            .map(|(_, n)| n)
            .sum();
        assert_eq!(total, table.len(), "{column}");
    }
}

#[test]
fn blank_brand_is_still_counted() {
    let csv = format!("{CSV},Unbranded,50,25000,Low,Everyday Use,4,14,1366,768,,Windows,Intel,1.6\n");
    let table = load_file(temp_with(".csv", &csv).path()).unwrap();
    assert_eq!(table.len(), 6);

    let brands = aggregate::frequency_count(&table, "Brand").unwrap();
    let total: usize = brands.iter().map(|(_, n)| n).sum();
    assert_eq!(total, table.len());
    assert!(brands.contains(&(Value::Null, 1)));
    assert!(!table.unique_values(Column::Brand).contains(&Value::Null));
}

#[test]
fn pandas_float_resolution_loads_from_csv() {
    let csv = CSV.replace("1920,1080", "1920.0,1080.0");
    let table = load_file(temp_with(".csv", &csv).path()).unwrap();
    let resolutions = aggregate::frequency_count(&table, "Resolution").unwrap();
    assert_eq!(resolutions[0], (Value::from("1920x1080"), 3));
}

#[test]
fn brand_view_is_sorted_and_averaged() {
    let table = load_file(temp_with(".csv", CSV).path()).unwrap();

    let request = AggregationRequest::records()
        .filter(Predicate::equals("Brand", "HP"))
        .sort_by("Price", SortOrder::Descending);
    let AggregationResult::Records(rows) = aggregate::run(&table, &request).unwrap() else {
        panic!("expected records");
    };
    let series: Vec<_> = rows.iter().filter_map(|r| r.series.as_deref()).collect();
    assert_eq!(series, ["Pavilion 14", "Victus 15"]);

    let avg = aggregate::run(&table, &AggregationRequest::mean("Price").filter(Predicate::equals("Brand", "HP")))
        .unwrap();
    assert_eq!(avg, AggregationResult::Scalar(Some(57490.0)));
}

#[test]
fn top_n_beyond_table_size_returns_all_records() {
    let table = load_file(temp_with(".csv", CSV).path()).unwrap();
    let top = aggregate::top_n(&table, "Spec_Score", 100, SortOrder::Descending).unwrap();
    assert_eq!(top.len(), table.len());
    let scores: Vec<f64> = top.iter().filter_map(|r| r.spec_score).collect();
    assert_eq!(scores, vec![74.0, 72.0, 68.0, 61.0, 55.0]);
}

#[test]
fn missing_column_fails_before_any_aggregation() {
    let without_ppi = CSV
        .lines()
        .map(|line| {
            let mut fields: Vec<&str> = line.split(',').collect();
            fields.remove(10);
            fields.join(",")
        })
        .collect::<Vec<_>>()
        .join("\n");
    let err = load_file(temp_with(".csv", &without_ppi).path()).unwrap_err();
    assert!(matches!(err, DataSourceError::MissingColumn(ref c) if c == "PPI"), "{err}");
}

#[test]
fn unreadable_file_is_a_data_source_error() {
    let err = load_file(std::path::Path::new("/nonexistent/laptops.csv")).unwrap_err();
    assert!(matches!(err, DataSourceError::Io { .. }));
}

#[test]
fn json_file_loads() {
    let json = r#"[
        {"Brand": "Asus", "Series": "Zenbook 14", "Spec_Score": 70, "Price": 84990,
         "Price_Range": "High", "Utility": "Business", "Ram_Capacity(GB)": 16,
         "Display Size (Inches)": 14, "Resolution Width": 2880, "Resolution Height": 1800,
         "PPI": 242.59, "OS Type": "Windows", "Graphics_Brand": "Intel", "Weight(kg)": 1.39}
    ]"#;
    let table = load_file(temp_with(".json", json).path()).unwrap();
    assert_eq!(table.records()[0].resolution.as_deref(), Some("2880x1800"));
}

#[test]
fn parquet_file_loads() {
    let text = |v: &[&str]| -> ArrayRef { Arc::new(StringArray::from(v.to_vec())) };
    let float = |v: &[f64]| -> ArrayRef { Arc::new(Float64Array::from(v.to_vec())) };
    let int = |v: &[i64]| -> ArrayRef { Arc::new(Int64Array::from(v.to_vec())) };

    let columns: Vec<(Column, ArrayRef)> = vec![
        (Column::Brand, text(&["MSI", "Acer"])),
        (Column::Series, text(&["Katana 15", "Aspire 7"])),
        (Column::SpecScore, float(&[71.0, 58.0])),
        (Column::Price, float(&[79990.0, 49990.0])),
        (Column::PriceRange, text(&["Mid", "Low"])),
        (Column::Utility, text(&["Gaming", "Everyday Use"])),
        (Column::RamCapacityGb, int(&[16, 8])),
        (Column::DisplaySizeInches, float(&[15.6, 15.6])),
        (Column::ResolutionWidth, int(&[1920, 1920])),
        (Column::ResolutionHeight, int(&[1080, 1080])),
        (Column::Ppi, Arc::new(Float64Array::from(vec![None, Some(141.21)])) as ArrayRef),
        (Column::OsType, text(&["Windows", "Windows"])),
        (Column::GraphicsBrand, text(&["NVIDIA", "Intel"])),
        (Column::WeightKg, float(&[2.25, 2.1])),
    ];
    let fields: Vec<Field> = columns
        .iter()
        .map(|(c, a)| {
            let data_type: DataType = a.data_type().clone();
            Field::new(c.name(), data_type, true)
        })
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns.into_iter().map(|(_, a)| a).collect()).unwrap();

    let tmp = Builder::new().suffix(".parquet").tempfile().unwrap();
    let mut writer = ArrowWriter::try_new(std::fs::File::create(tmp.path()).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = load_file(tmp.path()).unwrap();
    assert_eq!(table.len(), 2);
    let msi = &table.records()[0];
    assert_eq!(msi.ram_capacity_gb, Some(16.0));
    assert_eq!(msi.resolution.as_deref(), Some("1920x1080"));
    // Null PPI is derived from the panel.
    assert!((msi.ppi.unwrap() - 141.21).abs() < 0.01);
}

#[test]
fn every_page_renders_from_one_shared_table() {
    let table = Arc::new(load_file(temp_with(".csv", CSV).path()).unwrap());
    let mut session = Session::new(Arc::clone(&table));
    session.select_brand("HP");

    for page in Page::ALL {
        session.select_page(page);
        let views = session.view().unwrap();
        let text = report::render_page(page.title(), &views, 10).unwrap();
        assert!(text.starts_with(&format!("# {}", page.title())));
    }

    session.select_page(Page::Home);
    let text = report::render_page("Home", &session.view().unwrap(), 10).unwrap();
    assert!(text.contains("Top 5 Laptops by Highest Price"), "{text}");
    assert!(text.contains("XPS 13"), "{text}");
}
