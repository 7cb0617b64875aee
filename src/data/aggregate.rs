use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::error::AggregateError;
use super::filter::{Predicate, filtered_indices};
use super::model::{Column, ColumnKind, LaptopRecord, Table, Value};

type Result<T> = std::result::Result<T, AggregateError>;

/// Name of the value column produced by a frequency count.
pub const COUNT_COLUMN: &str = "Count";

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggFunc {
    /// Arithmetic mean of the metric, per group or over all rows.
    Mean,
    /// Rows per distinct value of the group column.
    Count,
    /// Summary statistics of every numeric column.
    Describe,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub column: String,
    pub order: SortOrder,
}

/// A single view onto the table: what to group, what to measure, which
/// rows to keep, and how to order and cut the result.
///
/// Build one with the constructors below and refine it with the chaining
/// methods:
///
/// ```rust
/// # use laptop_insights::data::aggregate::{AggregationRequest, SortOrder};
/// # use laptop_insights::data::filter::Predicate;
/// let request = AggregationRequest::records()
///     .filter(Predicate::equals("Brand", "Dell"))
///     .sort_by("Price", SortOrder::Descending);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationRequest {
    pub group_by: Option<String>,
    pub metric: Option<String>,
    /// `None` selects records instead of aggregating them.
    pub func: Option<AggFunc>,
    pub filter: Option<Predicate>,
    pub sort: Option<SortKey>,
    pub offset: usize,
    pub limit: Option<usize>,
}

impl AggregationRequest {
    /// All records, in table order.
    pub fn records() -> Self {
        Self::default()
    }

    pub fn group_mean(group_by: &str, metric: &str) -> Self {
        Self {
            group_by: Some(group_by.to_string()),
            metric: Some(metric.to_string()),
            func: Some(AggFunc::Mean),
            ..Self::default()
        }
    }

    pub fn frequency_count(group_by: &str) -> Self {
        Self {
            group_by: Some(group_by.to_string()),
            func: Some(AggFunc::Count),
            ..Self::default()
        }
    }

    /// The `n` records with the largest `metric`.
    pub fn top_n(metric: &str, n: usize) -> Self {
        Self {
            metric: Some(metric.to_string()),
            ..Self::default()
        }
        .sort_by(metric, SortOrder::Descending)
        .limit(n)
    }

    /// Mean of `metric` over all (filtered) rows.
    pub fn mean(metric: &str) -> Self {
        Self {
            metric: Some(metric.to_string()),
            func: Some(AggFunc::Mean),
            ..Self::default()
        }
    }

    pub fn describe() -> Self {
        Self {
            func: Some(AggFunc::Describe),
            ..Self::default()
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(predicate);
        self
    }

    pub fn sort_by(mut self, column: &str, order: SortOrder) -> Self {
        self.sort = Some(SortKey {
            column: column.to_string(),
            order,
        });
        self
    }

    pub fn offset(mut self, n: usize) -> Self {
        self.offset = n;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Summary statistics of one numeric column. Statistics are `None` when
/// the column has too few non-missing values to define them.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: Column,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Outcome of a request. Owns its data; nothing points back into the table.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregationResult {
    Means(Vec<(Value, f64)>),
    Counts(Vec<(Value, usize)>),
    /// Ungrouped mean; `None` when no row had a value.
    Scalar(Option<f64>),
    Summary(Vec<ColumnSummary>),
    Records(Vec<LaptopRecord>),
}

impl AggregationResult {
    pub fn len(&self) -> usize {
        match self {
            AggregationResult::Means(v) => v.len(),
            AggregationResult::Counts(v) => v.len(),
            AggregationResult::Scalar(v) => usize::from(v.is_some()),
            AggregationResult::Summary(v) => v.len(),
            AggregationResult::Records(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Engine entry point
// ---------------------------------------------------------------------------

/// Evaluate `request` against `table`.
///
/// The filter runs first, then the aggregation, then sorting, and finally
/// `offset`/`limit`. Zero matching rows is an empty result, not an error.
pub fn run(table: &Table, request: &AggregationRequest) -> Result<AggregationResult> {
    log::debug!("Evaluating {request:?}");

    if request.limit == Some(0) {
        return Err(AggregateError::InvalidLimit);
    }
    let rows = filtered_indices(table, request.filter.as_ref())?;
    let (offset, limit) = (request.offset, request.limit);

    let result = match request.func {
        Some(AggFunc::Count) => {
            let by = request
                .group_by
                .as_deref()
                .ok_or(AggregateError::InvalidRequest("count needs a group column"))?;
            let by = Column::lookup(by)?;
            let mut counts = count_rows(table, &rows, by);
            if let Some(sort) = &request.sort {
                order_groups(&mut counts, sort, by, COUNT_COLUMN, |a, b| a.cmp(b))?;
            }
            AggregationResult::Counts(window(counts, offset, limit))
        }
        Some(AggFunc::Mean) => {
            let metric = request
                .metric
                .as_deref()
                .ok_or(AggregateError::InvalidRequest("mean needs a metric column"))?;
            let metric_col = Column::lookup_numeric(metric)?;
            match request.group_by.as_deref() {
                Some(by) => {
                    let by = Column::lookup(by)?;
                    let mut means = mean_by_group(table, &rows, by, metric_col);
                    if let Some(sort) = &request.sort {
                        order_groups(&mut means, sort, by, metric, |a, b| a.total_cmp(b))?;
                    }
                    AggregationResult::Means(window(means, offset, limit))
                }
                None => AggregationResult::Scalar(mean_rows(table, &rows, metric_col)),
            }
        }
        Some(AggFunc::Describe) => AggregationResult::Summary(describe_rows(table, &rows)),
        None => {
            if let Some(metric) = request.metric.as_deref() {
                Column::lookup_numeric(metric)?;
            }
            let mut rows = rows;
            if let Some(sort) = &request.sort {
                sort_rows(table, &mut rows, Column::lookup(&sort.column)?, sort.order);
            }
            let records = window(rows, offset, limit)
                .into_iter()
                .map(|i| table.records()[i].clone())
                .collect();
            AggregationResult::Records(records)
        }
    };

    log::debug!("Request produced {} entries", result.len());
    Ok(result)
}

// ---------------------------------------------------------------------------
// The four core operations
// ---------------------------------------------------------------------------

/// Mean of `metric` per distinct value of `by`, in ascending key order.
///
/// Missing metric values are skipped; a group without any value is left
/// out of the result entirely.
pub fn group_mean(table: &Table, by: &str, metric: &str) -> Result<Vec<(Value, f64)>> {
    let by = Column::lookup(by)?;
    let metric = Column::lookup_numeric(metric)?;
    let rows: Vec<usize> = (0..table.len()).collect();
    Ok(mean_by_group(table, &rows, by, metric))
}

/// Rows per distinct value of `by`, most frequent first. Ties keep the
/// order in which the values first appear in the table. Rows missing `by`
/// are counted under `Value::Null`, so the counts sum to the row count.
pub fn frequency_count(table: &Table, by: &str) -> Result<Vec<(Value, usize)>> {
    let by = Column::lookup(by)?;
    let rows: Vec<usize> = (0..table.len()).collect();
    Ok(count_rows(table, &rows, by))
}

/// The `n` records with the largest (or smallest) `metric`. Ties keep
/// table order; records missing the metric sort last. Asking for more
/// records than exist returns all of them.
pub fn top_n(table: &Table, metric: &str, n: usize, order: SortOrder) -> Result<Vec<LaptopRecord>> {
    if n == 0 {
        return Err(AggregateError::InvalidLimit);
    }
    let metric = Column::lookup_numeric(metric)?;
    let mut rows: Vec<usize> = (0..table.len()).collect();
    sort_rows(table, &mut rows, metric, order);
    Ok(rows
        .into_iter()
        .take(n)
        .map(|i| table.records()[i].clone())
        .collect())
}

/// Records matching `predicate`, optionally sorted.
pub fn filtered_view(
    table: &Table,
    predicate: &Predicate,
    sort: Option<&SortKey>,
) -> Result<Vec<LaptopRecord>> {
    let mut rows = filtered_indices(table, Some(predicate))?;
    if let Some(sort) = sort {
        sort_rows(table, &mut rows, Column::lookup(&sort.column)?, sort.order);
    }
    Ok(rows.into_iter().map(|i| table.records()[i].clone()).collect())
}

/// Mean of `metric` over the whole table.
pub fn mean(table: &Table, metric: &str) -> Result<Option<f64>> {
    let metric = Column::lookup_numeric(metric)?;
    let rows: Vec<usize> = (0..table.len()).collect();
    Ok(mean_rows(table, &rows, metric))
}

/// Summary statistics for every numeric column of the table.
pub fn describe(table: &Table) -> Vec<ColumnSummary> {
    let rows: Vec<usize> = (0..table.len()).collect();
    describe_rows(table, &rows)
}

// ---------------------------------------------------------------------------
// Row-subset helpers
// ---------------------------------------------------------------------------

fn mean_by_group(table: &Table, rows: &[usize], by: Column, metric: Column) -> Vec<(Value, f64)> {
    let mut acc: BTreeMap<Value, (f64, usize)> = BTreeMap::new();
    for &i in rows {
        let record = &table.records()[i];
        let key = record.value(by);
        if key.is_null() {
            continue;
        }
        if let Some(v) = record.number(metric) {
            let slot = acc.entry(key).or_insert((0.0, 0));
            slot.0 += v;
            slot.1 += 1;
        }
    }
    acc.into_iter()
        .map(|(key, (sum, n))| (key, sum / n as f64))
        .collect()
}

fn count_rows(table: &Table, rows: &[usize], by: Column) -> Vec<(Value, usize)> {
    let mut slots: HashMap<Value, usize> = HashMap::new();
    let mut counts: Vec<(Value, usize)> = Vec::new();
    for &i in rows {
        // Missing keys form their own bucket so counts add up to the rows.
        let key = table.records()[i].value(by);
        match slots.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }
    // Stable: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn mean_rows(table: &Table, rows: &[usize], metric: Column) -> Option<f64> {
    let (sum, n) = rows
        .iter()
        .filter_map(|&i| table.records()[i].number(metric))
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn describe_rows(table: &Table, rows: &[usize]) -> Vec<ColumnSummary> {
    Column::ALL
        .into_iter()
        .filter(|c| c.kind() == ColumnKind::Numeric)
        .map(|column| {
            let mut values: Vec<f64> = rows
                .iter()
                .filter_map(|&i| table.records()[i].number(column))
                .collect();
            values.sort_by(f64::total_cmp);
            summarize(column, &values)
        })
        .collect()
}

/// Summary of already sorted values. Standard deviation uses the sample
/// (n - 1) denominator; quantiles interpolate linearly between ranks.
fn summarize(column: Column, sorted: &[f64]) -> ColumnSummary {
    let count = sorted.len();
    let mean = (count > 0).then(|| sorted.iter().sum::<f64>() / count as f64);
    let std = match mean {
        Some(m) if count > 1 => {
            let ss: f64 = sorted.iter().map(|v| (v - m).powi(2)).sum();
            Some((ss / (count - 1) as f64).sqrt())
        }
        _ => None,
    };
    ColumnSummary {
        column,
        count,
        mean,
        std,
        min: sorted.first().copied(),
        q25: quantile(sorted, 0.25),
        median: quantile(sorted, 0.5),
        q75: quantile(sorted, 0.75),
        max: sorted.last().copied(),
    }
}

fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Stable sort of row indices by one column. Missing cells go last in
/// either direction.
fn sort_rows(table: &Table, rows: &mut Vec<usize>, column: Column, order: SortOrder) {
    let mut keyed: Vec<(usize, Value)> = rows
        .iter()
        .map(|&i| (i, table.records()[i].value(column)))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => order.apply(a.cmp(b)),
    });
    *rows = keyed.into_iter().map(|(i, _)| i).collect();
}

/// Re-order grouped results by key or by value, depending on which
/// column `sort` names.
fn order_groups<T>(
    groups: &mut [(Value, T)],
    sort: &SortKey,
    group: Column,
    value_name: &str,
    cmp_values: impl Fn(&T, &T) -> Ordering,
) -> Result<()> {
    let by_value = if sort.column == value_name {
        true
    } else {
        let column = Column::lookup(&sort.column)?;
        if column == group {
            false
        } else if Column::from_name(value_name) == Some(column) {
            true
        } else {
            return Err(AggregateError::InvalidRequest(
                "grouped results sort by the group or value column",
            ));
        }
    };

    if by_value {
        groups.sort_by(|a, b| sort.order.apply(cmp_values(&a.1, &b.1)));
    } else {
        groups.sort_by(|a, b| sort.order.apply(a.0.cmp(&b.0)));
    }
    Ok(())
}

fn window<T>(items: Vec<T>, offset: usize, limit: Option<usize>) -> Vec<T> {
    items
        .into_iter()
        .skip(offset)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop(brand: &str, price: Option<f64>) -> LaptopRecord {
        LaptopRecord {
            brand: Some(brand.into()),
            price,
            ..Default::default()
        }
    }

    /// A = 100, A = 300, B = 200
    fn abc() -> Table {
        Table::from_records(vec![
            laptop("A", Some(100.0)),
            laptop("A", Some(300.0)),
            laptop("B", Some(200.0)),
        ])
    }

    fn brands(records: &[LaptopRecord]) -> Vec<&str> {
        records.iter().filter_map(|r| r.brand.as_deref()).collect()
    }

    #[test]
    fn group_mean_per_brand() {
        let means = group_mean(&abc(), "Brand", "Price").unwrap();
        assert_eq!(means, vec![(Value::from("A"), 200.0), (Value::from("B"), 200.0)]);
    }

    #[test]
    fn group_mean_of_constant_key_is_column_mean() {
        let table = Table::from_records(vec![
            laptop("Same", Some(10.0)),
            laptop("Same", Some(20.0)),
            laptop("Same", Some(60.0)),
        ]);
        let means = group_mean(&table, "Brand", "Price").unwrap();
        assert_eq!(means.len(), 1);
        assert_eq!(means[0].1, mean(&table, "Price").unwrap().unwrap());
        assert_eq!(means[0].1, 30.0);
    }

    #[test]
    fn group_without_values_is_omitted() {
        let table = Table::from_records(vec![
            laptop("A", Some(100.0)),
            laptop("Ghost", None),
            laptop("Ghost", None),
        ]);
        let means = group_mean(&table, "Brand", "Price").unwrap();
        assert_eq!(means, vec![(Value::from("A"), 100.0)]);
    }

    #[test]
    fn missing_values_do_not_drag_the_mean() {
        let table = Table::from_records(vec![
            laptop("A", Some(100.0)),
            laptop("A", None),
            laptop("A", Some(300.0)),
        ]);
        assert_eq!(mean(&table, "Price").unwrap(), Some(200.0));
    }

    #[test]
    fn frequency_count_orders_by_count_then_first_seen() {
        let table = Table::from_records(vec![
            laptop("C", None),
            laptop("B", None),
            laptop("A", None),
            laptop("A", None),
            laptop("B", None),
        ]);
        let counts = frequency_count(&table, "Brand").unwrap();
        assert_eq!(
            counts,
            vec![(Value::from("B"), 2), (Value::from("A"), 2), (Value::from("C"), 1)]
        );
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, table.len());
    }

    #[test]
    fn frequency_count_keeps_missing_keys_in_their_own_bucket() {
        let unnamed = LaptopRecord {
            price: Some(50.0),
            ..Default::default()
        };
        let table = Table::from_records(vec![
            laptop("HP", Some(100.0)),
            unnamed.clone(),
            laptop("Dell", Some(300.0)),
            laptop("HP", Some(200.0)),
            unnamed,
        ]);
        let counts = frequency_count(&table, "Brand").unwrap();
        assert_eq!(
            counts,
            vec![(Value::from("HP"), 2), (Value::Null, 2), (Value::from("Dell"), 1)]
        );
        let total: usize = counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, table.len());

        // Group means still leave the missing key out.
        assert_eq!(
            group_mean(&table, "Brand", "Price").unwrap(),
            vec![(Value::from("Dell"), 300.0), (Value::from("HP"), 150.0)]
        );
    }

    #[test]
    fn top_one_by_price() {
        let top = top_n(&abc(), "Price", 1, SortOrder::Descending).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].brand.as_deref(), Some("A"));
        assert_eq!(top[0].price, Some(300.0));
    }

    #[test]
    fn top_n_larger_than_table_returns_everything_sorted() {
        let top = top_n(&abc(), "Price", 10, SortOrder::Descending).unwrap();
        let prices: Vec<f64> = top.iter().filter_map(|r| r.price).collect();
        assert_eq!(prices, vec![300.0, 200.0, 100.0]);
    }

    #[test]
    fn top_n_ties_keep_table_order() {
        let table = Table::from_records(vec![
            laptop("first", Some(5.0)),
            laptop("second", Some(5.0)),
            laptop("third", Some(9.0)),
        ]);
        let top = top_n(&table, "Price", 3, SortOrder::Descending).unwrap();
        assert_eq!(brands(&top), ["third", "first", "second"]);
        let bottom = top_n(&table, "Price", 3, SortOrder::Ascending).unwrap();
        assert_eq!(brands(&bottom), ["first", "second", "third"]);
    }

    #[test]
    fn top_n_puts_missing_metric_last() {
        let table = Table::from_records(vec![laptop("none", None), laptop("some", Some(1.0))]);
        let top = top_n(&table, "Price", 2, SortOrder::Ascending).unwrap();
        assert_eq!(brands(&top), ["some", "none"]);
    }

    #[test]
    fn top_n_rejects_zero() {
        assert_eq!(
            top_n(&abc(), "Price", 0, SortOrder::Descending),
            Err(AggregateError::InvalidLimit)
        );
    }

    #[test]
    fn filtered_view_sorts_matches() {
        let sort = SortKey {
            column: "Price".into(),
            order: SortOrder::Descending,
        };
        let view = filtered_view(&abc(), &Predicate::equals("Brand", "A"), Some(&sort)).unwrap();
        let prices: Vec<f64> = view.iter().filter_map(|r| r.price).collect();
        assert_eq!(prices, vec![300.0, 100.0]);
    }

    #[test]
    fn filtered_view_with_no_match_is_empty() {
        let view = filtered_view(&abc(), &Predicate::equals("Brand", "Z"), None).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn unknown_column_is_reported_by_name() {
        let err = group_mean(&abc(), "Maker", "Price").unwrap_err();
        assert_eq!(err, AggregateError::ColumnNotFound("Maker".into()));
        assert_eq!(err.to_string(), "Column not found: 'Maker'");
    }

    #[test]
    fn mean_of_categorical_column_is_a_type_mismatch() {
        let err = group_mean(&abc(), "Price", "Brand").unwrap_err();
        assert_eq!(
            err,
            AggregateError::TypeMismatch {
                column: "Brand".into(),
                found: ColumnKind::Categorical
            }
        );
    }

    #[test]
    fn run_applies_filter_before_mean() {
        let request = AggregationRequest::mean("Price").filter(Predicate::equals("Brand", "B"));
        assert_eq!(run(&abc(), &request).unwrap(), AggregationResult::Scalar(Some(200.0)));

        let request = AggregationRequest::mean("Price").filter(Predicate::equals("Brand", "Z"));
        assert_eq!(run(&abc(), &request).unwrap(), AggregationResult::Scalar(None));
    }

    #[test]
    fn run_sorts_group_means_by_value() {
        let table = Table::from_records(vec![
            laptop("A", Some(100.0)),
            laptop("B", Some(300.0)),
            laptop("C", Some(200.0)),
        ]);
        let request = AggregationRequest::group_mean("Brand", "Price")
            .sort_by("Price", SortOrder::Descending)
            .limit(2);
        let AggregationResult::Means(means) = run(&table, &request).unwrap() else {
            panic!("expected means");
        };
        assert_eq!(means, vec![(Value::from("B"), 300.0), (Value::from("C"), 200.0)]);
    }

    #[test]
    fn run_slices_counts_with_offset() {
        let table = Table::from_records(
            ["A", "A", "A", "B", "B", "C"]
                .into_iter()
                .map(|b| laptop(b, None))
                .collect(),
        );
        let rest = AggregationRequest::frequency_count("Brand").offset(1);
        assert_eq!(
            run(&table, &rest).unwrap(),
            AggregationResult::Counts(vec![(Value::from("B"), 2), (Value::from("C"), 1)])
        );
        let by_key = AggregationRequest::frequency_count("Brand").sort_by("Brand", SortOrder::Descending);
        let AggregationResult::Counts(counts) = run(&table, &by_key).unwrap() else {
            panic!("expected counts");
        };
        assert_eq!(counts[0].0, Value::from("C"));
    }

    #[test]
    fn run_rejects_shapeless_requests() {
        let mut request = AggregationRequest::frequency_count("Brand");
        request.group_by = None;
        assert!(matches!(
            run(&abc(), &request),
            Err(AggregateError::InvalidRequest(_))
        ));
        assert_eq!(
            run(&abc(), &AggregationRequest::records().limit(0)),
            Err(AggregateError::InvalidLimit)
        );
    }

    #[test]
    fn run_top_n_requires_numeric_metric() {
        assert!(matches!(
            run(&abc(), &AggregationRequest::top_n("Brand", 3)),
            Err(AggregateError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn describe_matches_hand_computed_statistics() {
        let table = Table::from_records(
            [1.0, 2.0, 3.0, 4.0]
                .into_iter()
                .map(|p| laptop("A", Some(p)))
                .collect(),
        );
        let summary = describe(&table);
        let price = summary.iter().find(|s| s.column == Column::Price).unwrap();
        assert_eq!(price.count, 4);
        assert_eq!(price.mean, Some(2.5));
        assert_eq!(price.min, Some(1.0));
        assert_eq!(price.q25, Some(1.75));
        assert_eq!(price.median, Some(2.5));
        assert_eq!(price.q75, Some(3.25));
        assert_eq!(price.max, Some(4.0));
        let std = price.std.unwrap();
        assert!((std - 1.290_994).abs() < 1e-6);

        let weight = summary.iter().find(|s| s.column == Column::WeightKg).unwrap();
        assert_eq!(weight.count, 0);
        assert_eq!(weight.mean, None);
    }
}
