use std::fmt;

use crate::data::aggregate::{self, AggregationRequest, AggregationResult, SortOrder};
use crate::data::{AggregateError, Predicate, Table};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// The fixed dashboard pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    DataOverview,
    BrandAnalysis,
    PriceAnalysis,
    PerformanceAnalysis,
    DisplayDesign,
    AdditionalInsights,
    Conclusion,
}

impl Page {
    pub const ALL: [Page; 8] = [
        Page::Home,
        Page::DataOverview,
        Page::BrandAnalysis,
        Page::PriceAnalysis,
        Page::PerformanceAnalysis,
        Page::DisplayDesign,
        Page::AdditionalInsights,
        Page::Conclusion,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::DataOverview => "Data Overview",
            Page::BrandAnalysis => "Brand Analysis",
            Page::PriceAnalysis => "Price Analysis",
            Page::PerformanceAnalysis => "Performance Analysis",
            Page::DisplayDesign => "Display and Design Analysis",
            Page::AdditionalInsights => "Additional Insights",
            Page::Conclusion => "Conclusion and Recommendations",
        }
    }

    /// Short command-line name, e.g. `price`.
    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::DataOverview => "overview",
            Page::BrandAnalysis => "brand",
            Page::PriceAnalysis => "price",
            Page::PerformanceAnalysis => "performance",
            Page::DisplayDesign => "display",
            Page::AdditionalInsights => "insights",
            Page::Conclusion => "conclusion",
        }
    }

    /// Match a slug or a full title, ignoring case.
    pub fn from_name(name: &str) -> Option<Page> {
        Page::ALL
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(name) || p.title().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ---------------------------------------------------------------------------
// Sections: one chart or table each
// ---------------------------------------------------------------------------

/// How the presentation layer should draw a section's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Table,
    Bar,
    Box,
    Scatter,
    Histogram { bins: usize },
    Pie,
    /// A single number, e.g. an average.
    Metric,
}

/// A titled chart and the request whose result it draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    pub chart: ChartKind,
    /// Record columns the chart uses (x, y, colour). Ignored for
    /// aggregated results.
    pub columns: Vec<&'static str>,
    pub request: AggregationRequest,
}

impl Section {
    fn new(title: impl Into<String>, chart: ChartKind, request: AggregationRequest) -> Self {
        Section {
            title: title.into(),
            chart,
            columns: Vec::new(),
            request,
        }
    }

    fn columns(mut self, columns: &[&'static str]) -> Self {
        self.columns = columns.to_vec();
        self
    }

    /// Recompute this section's result from the table.
    pub fn evaluate(&self, table: &Table) -> Result<AggregationResult, AggregateError> {
        aggregate::run(table, &self.request)
    }
}

/// Interactive selections that change what a page shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageParams {
    /// Brand for the brand page; no brand means the page has nothing to show.
    pub brand: Option<String>,
    /// Direction of the brand detail table's price column.
    pub price_order: SortOrder,
}

/// The sections making up `page`, in display order.
pub fn sections(page: Page, params: &PageParams) -> Vec<Section> {
    use AggregationRequest as Req;
    use ChartKind::{Bar, Histogram, Metric, Pie, Scatter};

    match page {
        Page::Home => vec![
            Section::new("Dataset Overview", ChartKind::Table, Req::records().limit(5)),
            Section::new("Price Distribution by Brand", ChartKind::Box, Req::records())
                .columns(&["Brand", "Price"]),
            Section::new("Top 5 Laptops by Highest Price", ChartKind::Table, Req::top_n("Price", 5))
                .columns(&["Brand", "Spec_Score", "Series", "Price"]),
            Section::new("Average Price by Brand", Bar, Req::group_mean("Brand", "Price")),
        ],
        Page::DataOverview => vec![
            Section::new("Dataset Summary", ChartKind::Table, Req::describe()),
            Section::new("Brand Distribution", Bar, Req::frequency_count("Brand")),
            Section::new("Top 5 Brands", Pie, Req::frequency_count("Brand").limit(5)),
            Section::new("Other Brands", Pie, Req::frequency_count("Brand").offset(5)),
        ],
        Page::BrandAnalysis => {
            let Some(brand) = params.brand.as_deref() else {
                return Vec::new();
            };
            let only = || Predicate::equals("Brand", brand);
            vec![
                Section::new(
                    format!("{brand} Laptop Details"),
                    ChartKind::Table,
                    Req::records()
                        .filter(only())
                        .sort_by("Price", params.price_order),
                )
                .columns(&["Spec_Score", "Series", "Price_Range", "Utility", "Price"]),
                Section::new("Average Price", Metric, Req::mean("Price").filter(only())),
                Section::new("Average Spec Score", Metric, Req::mean("Spec_Score").filter(only())),
                Section::new(
                    format!("Spec Score Distribution for {brand}"),
                    ChartKind::Box,
                    Req::records().filter(only()),
                )
                .columns(&["Brand", "Spec_Score"]),
                Section::new(
                    format!("Price vs. Spec Score for {brand}"),
                    Scatter,
                    Req::records().filter(only()),
                )
                .columns(&["Spec_Score", "Price", "Series"]),
            ]
        }
        Page::PriceAnalysis => vec![
            Section::new("Price Distribution", Histogram { bins: 30 }, Req::records())
                .columns(&["Price", "Brand"]),
            Section::new("Price vs. Spec Score", Scatter, Req::records())
                .columns(&["Spec_Score", "Price", "Brand"]),
            Section::new("Price Range Distribution", Bar, Req::frequency_count("Price_Range")),
            Section::new("Top 10 Most Expensive Laptops", Bar, Req::top_n("Price", 10))
                .columns(&["Series", "Price", "Brand"]),
            Section::new("Price Distribution by Utility", ChartKind::Box, Req::records())
                .columns(&["Utility", "Price"]),
            Section::new("Price vs. RAM Capacity", Scatter, Req::records())
                .columns(&["Ram_Capacity(GB)", "Price", "Brand"]),
        ],
        Page::PerformanceAnalysis => vec![
            Section::new("Spec Score Distribution", Histogram { bins: 30 }, Req::records())
                .columns(&["Spec_Score", "Brand"]),
            Section::new("Top 10 Laptops by Spec Score", Bar, Req::top_n("Spec_Score", 10))
                .columns(&["Series", "Spec_Score", "Brand"]),
            Section::new("Spec Score vs. RAM Capacity", Scatter, Req::records())
                .columns(&["Ram_Capacity(GB)", "Spec_Score", "Brand"]),
        ],
        Page::DisplayDesign => vec![
            Section::new("Screen Size Distribution", Histogram { bins: 20 }, Req::records())
                .columns(&["Display Size (Inches)", "Brand"]),
            Section::new("Resolution Distribution", Bar, Req::frequency_count("Resolution")),
            Section::new("PPI vs. Price", Scatter, Req::records())
                .columns(&["PPI", "Price", "Brand"]),
        ],
        Page::AdditionalInsights => vec![
            Section::new("Operating System Distribution", Pie, Req::frequency_count("OS Type")),
            Section::new("Graphics Brand Distribution", Bar, Req::frequency_count("Graphics_Brand")),
            Section::new("Weight vs. Price", Scatter, Req::records())
                .columns(&["Weight(kg)", "Price", "Brand"]),
        ],
        // Narrative only.
        Page::Conclusion => Vec::new(),
    }
}
