use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use super::error::AggregateError;

// ---------------------------------------------------------------------------
// Value – a single cell of the laptop table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
/// Used as a `BTreeMap` key for grouping, so `Value` must be `Ord`.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Null,
}

impl Value {
    /// Interpret the value as an `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// -- Manual Eq/Ord: integers and floats compare numerically --

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        use Value::*;
        fn rank(v: &Value) -> u8 {
            match v {
                Null => 0,
                Integer(_) | Float(_) => 1,
                String(_) => 2,
            }
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Integer(a), Integer(b)) => a.cmp(b),
            (String(a), String(b)) => a.cmp(b),
            (Float(a), Float(b)) => cmp_floats(*a, *b),
            (Integer(a), Float(b)) => cmp_int_float(*a, *b),
            (Float(a), Integer(b)) => cmp_int_float(*b, *a).reverse(),
            _ => rank(self).cmp(&rank(other)),
        }
    }
}

/// 2^63, exactly representable; `i64` covers `[-LIMIT, LIMIT)`.
const LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// `-0.0 == 0.0`; NaNs sort below or above every number by their sign.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Exact comparison of an integer with a float, without rounding the
/// integer through `f64`.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() { Ordering::Greater } else { Ordering::Less };
    }
    if f >= LIMIT {
        return Ordering::Less;
    }
    if f < -LIMIT {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    i.cmp(&(whole as i64)).then_with(|| cmp_floats(whole, f))
}

/// The integer a float equals exactly, if any.
fn exact_integer(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f)).then(|| f as i64)
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Value::String(s) => {
                2u8.hash(state);
                s.hash(state);
            }
            // Integer and Float must hash alike when they compare equal.
            Value::Integer(i) => {
                1u8.hash(state);
                i.hash(state);
            }
            Value::Float(f) => match exact_integer(*f) {
                Some(i) => {
                    1u8.hash(state);
                    i.hash(state);
                }
                None => {
                    3u8.hash(state);
                    f.to_bits().hash(state);
                }
            },
            Value::Null => 0u8.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Null => write!(f, "<null>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – the fixed laptop schema
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Categorical,
    Numeric,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Categorical => write!(f, "categorical"),
            ColumnKind::Numeric => write!(f, "numeric"),
        }
    }
}

/// Columns of the laptop table. All but `Resolution` come from the source
/// file; `Resolution` is derived at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Brand,
    Series,
    SpecScore,
    Price,
    PriceRange,
    Utility,
    RamCapacityGb,
    DisplaySizeInches,
    ResolutionWidth,
    ResolutionHeight,
    Ppi,
    OsType,
    GraphicsBrand,
    WeightKg,
    Resolution,
}

impl Column {
    /// Columns every source file must carry, in canonical order.
    pub const SOURCE: [Column; 14] = [
        Column::Brand,
        Column::Series,
        Column::SpecScore,
        Column::Price,
        Column::PriceRange,
        Column::Utility,
        Column::RamCapacityGb,
        Column::DisplaySizeInches,
        Column::ResolutionWidth,
        Column::ResolutionHeight,
        Column::Ppi,
        Column::OsType,
        Column::GraphicsBrand,
        Column::WeightKg,
    ];

    /// Source columns followed by derived ones.
    pub const ALL: [Column; 15] = [
        Column::Brand,
        Column::Series,
        Column::SpecScore,
        Column::Price,
        Column::PriceRange,
        Column::Utility,
        Column::RamCapacityGb,
        Column::DisplaySizeInches,
        Column::ResolutionWidth,
        Column::ResolutionHeight,
        Column::Ppi,
        Column::OsType,
        Column::GraphicsBrand,
        Column::WeightKg,
        Column::Resolution,
    ];

    /// Header name as it appears in the source file.
    pub fn name(self) -> &'static str {
        match self {
            Column::Brand => "Brand",
            Column::Series => "Series",
            Column::SpecScore => "Spec_Score",
            Column::Price => "Price",
            Column::PriceRange => "Price_Range",
            Column::Utility => "Utility",
            Column::RamCapacityGb => "Ram_Capacity(GB)",
            Column::DisplaySizeInches => "Display Size (Inches)",
            Column::ResolutionWidth => "Resolution Width",
            Column::ResolutionHeight => "Resolution Height",
            Column::Ppi => "PPI",
            Column::OsType => "OS Type",
            Column::GraphicsBrand => "Graphics_Brand",
            Column::WeightKg => "Weight(kg)",
            Column::Resolution => "Resolution",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Column::RamCapacityGb => &["Ram_Capacity_GB"],
            Column::DisplaySizeInches => &["Display_Size_Inches"],
            Column::ResolutionWidth => &["Resolution_Width"],
            Column::ResolutionHeight => &["Resolution_Height"],
            Column::OsType => &["OS_Type"],
            Column::WeightKg => &["Weight_Kg"],
            _ => &[],
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::SpecScore
            | Column::Price
            | Column::RamCapacityGb
            | Column::DisplaySizeInches
            | Column::ResolutionWidth
            | Column::ResolutionHeight
            | Column::Ppi
            | Column::WeightKg => ColumnKind::Numeric,
            _ => ColumnKind::Categorical,
        }
    }

    /// Resolve a header name (or one of its aliases).
    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL
            .into_iter()
            .find(|c| c.name() == name || c.aliases().contains(&name))
    }

    /// Like [`Column::from_name`], failing with `ColumnNotFound`.
    pub fn lookup(name: &str) -> Result<Column, AggregateError> {
        Column::from_name(name).ok_or_else(|| AggregateError::ColumnNotFound(name.to_string()))
    }

    /// Like [`Column::lookup`], additionally requiring a numeric column.
    pub fn lookup_numeric(name: &str) -> Result<Column, AggregateError> {
        let column = Column::lookup(name)?;
        match column.kind() {
            ColumnKind::Numeric => Ok(column),
            found => Err(AggregateError::TypeMismatch {
                column: column.name().to_string(),
                found,
            }),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// LaptopRecord – one row of the source table
// ---------------------------------------------------------------------------

/// Composite resolution label, e.g. `1920x1080`.
pub fn resolution_label(width: u32, height: u32) -> String {
    format!("{width}x{height}")
}

/// Pixels per inch from the panel resolution and its diagonal.
pub fn derive_ppi(width: u32, height: u32, diagonal_inches: f64) -> Option<f64> {
    if diagonal_inches <= 0.0 {
        return None;
    }
    let (w, h) = (f64::from(width), f64::from(height));
    Some((w * w + h * h).sqrt() / diagonal_inches)
}

/// A single laptop (one row of the source file). Missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaptopRecord {
    pub brand: Option<String>,
    pub series: Option<String>,
    pub spec_score: Option<f64>,
    pub price: Option<f64>,
    pub price_range: Option<String>,
    pub utility: Option<String>,
    pub ram_capacity_gb: Option<f64>,
    pub display_size_inches: Option<f64>,
    pub resolution_width: Option<u32>,
    pub resolution_height: Option<u32>,
    pub ppi: Option<f64>,
    pub os_type: Option<String>,
    pub graphics_brand: Option<String>,
    pub weight_kg: Option<f64>,
    /// Derived once from width/height, see [`LaptopRecord::derive_fields`].
    pub resolution: Option<String>,
}

impl LaptopRecord {
    /// Fill in derived fields. Recomputes from the source fields every
    /// time, so calling it again never changes the record.
    pub fn derive_fields(&mut self) {
        self.resolution = match (self.resolution_width, self.resolution_height) {
            (Some(w), Some(h)) => Some(resolution_label(w, h)),
            _ => None,
        };
        if self.ppi.is_none() {
            if let (Some(w), Some(h), Some(size)) = (
                self.resolution_width,
                self.resolution_height,
                self.display_size_inches,
            ) {
                self.ppi = derive_ppi(w, h, size);
            }
        }
    }

    /// The cell for `column`.
    pub fn value(&self, column: Column) -> Value {
        fn text(s: &Option<String>) -> Value {
            s.as_deref().map_or(Value::Null, Value::from)
        }
        fn int(v: Option<u32>) -> Value {
            v.map_or(Value::Null, |v| Value::Integer(i64::from(v)))
        }
        match column {
            Column::Brand => text(&self.brand),
            Column::Series => text(&self.series),
            Column::SpecScore => self.spec_score.into(),
            Column::Price => self.price.into(),
            Column::PriceRange => text(&self.price_range),
            Column::Utility => text(&self.utility),
            Column::RamCapacityGb => self.ram_capacity_gb.into(),
            Column::DisplaySizeInches => self.display_size_inches.into(),
            Column::ResolutionWidth => int(self.resolution_width),
            Column::ResolutionHeight => int(self.resolution_height),
            Column::Ppi => self.ppi.into(),
            Column::OsType => text(&self.os_type),
            Column::GraphicsBrand => text(&self.graphics_brand),
            Column::WeightKg => self.weight_kg.into(),
            Column::Resolution => text(&self.resolution),
        }
    }

    /// Numeric cell for `column`, `None` when missing or categorical.
    pub fn number(&self, column: Column) -> Option<f64> {
        self.value(column).as_f64()
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The immutable in-memory laptop table. Built once, then only read.
#[derive(Debug, Clone, Default)]
pub struct Table {
    records: Vec<LaptopRecord>,
}

impl Table {
    /// Build a table, running the derived-field pass on every record.
    pub fn from_records(mut records: Vec<LaptopRecord>) -> Self {
        for record in &mut records {
            record.derive_fields();
        }
        Table { records }
    }

    pub fn records(&self) -> &[LaptopRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First `n` rows, in file order.
    pub fn head(&self, n: usize) -> &[LaptopRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Distinct non-missing values of a column, in first-seen order.
    pub fn unique_values(&self, column: Column) -> Vec<Value> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .map(|r| r.value(column))
            .filter(|v| !v.is_null() && seen.insert(v.clone()))
            .collect()
    }
}
