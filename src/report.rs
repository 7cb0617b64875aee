use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::data::aggregate::{AggregationRequest, AggregationResult, COUNT_COLUMN, ColumnSummary};
use crate::data::{Column, ColumnKind, LaptopRecord, Value};
use crate::pages::ChartKind;
use crate::state::SectionView;

// ---------------------------------------------------------------------------
// Text rendering of a page
// ---------------------------------------------------------------------------

/// Presentation rounding; the engine always hands over full precision.
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn chart_label(kind: ChartKind) -> String {
    match kind {
        ChartKind::Table => "table".into(),
        ChartKind::Bar => "bar chart".into(),
        ChartKind::Box => "box plot".into(),
        ChartKind::Scatter => "scatter plot".into(),
        ChartKind::Histogram { bins } => format!("histogram, {bins} bins"),
        ChartKind::Pie => "pie chart".into(),
        ChartKind::Metric => "metric".into(),
    }
}

/// Render one section as a heading plus a pretty-printed table, showing at
/// most `max_rows` rows.
pub fn render_section(view: &SectionView, max_rows: usize) -> Result<String, ArrowError> {
    let section = &view.section;
    let mut out = format!("## {} ({})\n", section.title, chart_label(section.chart));

    let batch = to_batch(&view.result, &section.request, &section.columns)?;
    let total = batch.num_rows();
    let shown = batch.slice(0, total.min(max_rows));
    out.push_str(&format!("{}\n", pretty_format_batches(&[shown])?));
    if total > max_rows {
        out.push_str(&format!("... {} more rows\n", total - max_rows));
    }
    Ok(out)
}

/// Render every section of a page.
pub fn render_page(title: &str, views: &[SectionView], max_rows: usize) -> Result<String, ArrowError> {
    let mut out = format!("# {title}\n\n");
    if views.is_empty() {
        out.push_str("(no computed sections)\n");
    }
    for view in views {
        out.push_str(&render_section(view, max_rows)?);
        out.push('\n');
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// AggregationResult → RecordBatch
// ---------------------------------------------------------------------------

/// Convert a result into an Arrow batch. `columns` selects which record
/// columns to show for record results; empty means all of them.
pub fn to_batch(
    result: &AggregationResult,
    request: &AggregationRequest,
    columns: &[&str],
) -> Result<RecordBatch, ArrowError> {
    let group_name = request.group_by.as_deref().unwrap_or("Group");
    let metric_name = request.metric.as_deref().unwrap_or("Value");

    match result {
        AggregationResult::Means(groups) => batch(vec![
            text_column(group_name, groups.iter().map(|(k, _)| key_text(k))),
            float_column(metric_name, groups.iter().map(|(_, v)| Some(*v))),
        ]),
        AggregationResult::Counts(groups) => batch(vec![
            text_column(group_name, groups.iter().map(|(k, _)| key_text(k))),
            (
                Field::new(COUNT_COLUMN, DataType::Int64, false),
                Arc::new(Int64Array::from_iter_values(groups.iter().map(|(_, n)| *n as i64)))
                    as ArrayRef,
            ),
        ]),
        AggregationResult::Scalar(v) => batch(vec![float_column(metric_name, [*v])]),
        AggregationResult::Summary(summary) => summary_batch(summary),
        AggregationResult::Records(records) => {
            let selected: Vec<Column> = if columns.is_empty() {
                Column::ALL.to_vec()
            } else {
                columns.iter().filter_map(|name| Column::from_name(name)).collect()
            };
            records_batch(records, &selected)
        }
    }
}

fn key_text(v: &Value) -> Option<String> {
    (!v.is_null()).then(|| v.to_string())
}

fn text_column<I>(name: &str, values: I) -> (Field, ArrayRef)
where
    I: IntoIterator<Item = Option<String>>,
{
    let array: StringArray = values.into_iter().collect();
    (Field::new(name, DataType::Utf8, true), Arc::new(array))
}

fn float_column<I>(name: &str, values: I) -> (Field, ArrayRef)
where
    I: IntoIterator<Item = Option<f64>>,
{
    let array: Float64Array = values.into_iter().map(|v| v.map(round2)).collect();
    (Field::new(name, DataType::Float64, true), Arc::new(array))
}

fn batch(columns: Vec<(Field, ArrayRef)>) -> Result<RecordBatch, ArrowError> {
    let (fields, arrays): (Vec<Field>, Vec<ArrayRef>) = columns.into_iter().unzip();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
}

fn records_batch(records: &[LaptopRecord], columns: &[Column]) -> Result<RecordBatch, ArrowError> {
    let cols = columns
        .iter()
        .map(|&column| match (column, column.kind()) {
            (Column::ResolutionWidth | Column::ResolutionHeight, _) => {
                let array: Int64Array = records
                    .iter()
                    .map(|r| match r.value(column) {
                        Value::Integer(i) => Some(i),
                        _ => None,
                    })
                    .collect();
                (
                    Field::new(column.name(), DataType::Int64, true),
                    Arc::new(array) as ArrayRef,
                )
            }
            (_, ColumnKind::Numeric) => {
                float_column(column.name(), records.iter().map(|r| r.number(column)))
            }
            (_, ColumnKind::Categorical) => {
                text_column(column.name(), records.iter().map(|r| key_text(&r.value(column))))
            }
        })
        .collect();
    batch(cols)
}

fn summary_batch(summary: &[ColumnSummary]) -> Result<RecordBatch, ArrowError> {
    let stat = |name: &str, f: fn(&ColumnSummary) -> Option<f64>| {
        float_column(name, summary.iter().map(f))
    };
    batch(vec![
        text_column("column", summary.iter().map(|s| Some(s.column.name().to_string()))),
        (
            Field::new("count", DataType::Int64, false),
            Arc::new(Int64Array::from_iter_values(summary.iter().map(|s| s.count as i64)))
                as ArrayRef,
        ),
        stat("mean", |s| s.mean),
        stat("std", |s| s.std),
        stat("min", |s| s.min),
        stat("25%", |s| s.q25),
        stat("50%", |s| s.median),
        stat("75%", |s| s.q75),
        stat("max", |s| s.max),
    ])
}
