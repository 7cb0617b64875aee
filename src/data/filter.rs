use super::error::AggregateError;
use super::model::{Column, Table, Value};

// ---------------------------------------------------------------------------
// Filter predicate: one column must equal one value
// ---------------------------------------------------------------------------

/// Equality predicate on a single column, e.g. `Brand == "Dell"`.
///
/// The column is kept by name so that a bad name surfaces as
/// `ColumnNotFound` when the predicate is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub value: Value,
}

impl Predicate {
    pub fn equals(column: &str, value: impl Into<Value>) -> Self {
        Predicate {
            column: column.to_string(),
            value: value.into(),
        }
    }
}

/// Return indices of records that satisfy `predicate`, in table order.
///
/// A record passes when its cell equals the predicate value. Numeric
/// cells compare numerically (`8` matches `8.0`); a missing cell never
/// matches. No predicate means every record passes.
pub fn filtered_indices(
    table: &Table,
    predicate: Option<&Predicate>,
) -> Result<Vec<usize>, AggregateError> {
    let Some(predicate) = predicate else {
        return Ok((0..table.len()).collect());
    };
    let column = Column::lookup(&predicate.column)?;

    if predicate.value.is_null() {
        return Ok(Vec::new());
    }

    Ok(table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| record.value(column) == predicate.value)
        .map(|(i, _)| i)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::LaptopRecord;

    fn table() -> Table {
        let rec = |brand: &str, ram: f64| LaptopRecord {
            brand: Some(brand.into()),
            ram_capacity_gb: Some(ram),
            ..Default::default()
        };
        Table::from_records(vec![rec("Dell", 8.0), rec("HP", 16.0), rec("Dell", 16.0)])
    }

    #[test]
    fn matches_by_equality() {
        let t = table();
        let idx = filtered_indices(&t, Some(&Predicate::equals("Brand", "Dell"))).unwrap();
        assert_eq!(idx, vec![0, 2]);
    }

    #[test]
    fn integer_predicate_matches_float_cells() {
        let t = table();
        let idx = filtered_indices(&t, Some(&Predicate::equals("Ram_Capacity(GB)", 16i64))).unwrap();
        assert_eq!(idx, vec![1, 2]);
    }

    #[test]
    fn absent_value_gives_empty_selection() {
        let t = table();
        let idx = filtered_indices(&t, Some(&Predicate::equals("Brand", "Acer"))).unwrap();
        assert!(idx.is_empty());
    }

    #[test]
    fn unknown_column_is_an_error() {
        let t = table();
        let err = filtered_indices(&t, Some(&Predicate::equals("Maker", "Dell"))).unwrap_err();
        assert_eq!(err, AggregateError::ColumnNotFound("Maker".into()));
    }

    #[test]
    fn no_predicate_keeps_everything() {
        assert_eq!(filtered_indices(&table(), None).unwrap(), vec![0, 1, 2]);
    }
}
