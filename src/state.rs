use std::sync::Arc;

use crate::data::aggregate::{AggregationResult, SortOrder};
use crate::data::{AggregateError, Column, Table};
use crate::pages::{self, Page, PageParams, Section};

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// One section together with its freshly computed result.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub section: Section,
    pub result: AggregationResult,
}

/// A dashboard session, independent of rendering.
///
/// The table is shared read-only; several sessions may hold the same
/// `Arc<Table>`. Only the selections below are mutable.
#[derive(Debug, Clone)]
pub struct Session {
    table: Arc<Table>,

    /// Currently selected page.
    pub page: Page,

    /// Brand and sort selections for the pages that take them.
    pub params: PageParams,
}

impl Session {
    /// Start on the home page with the first brand of the table selected.
    pub fn new(table: Arc<Table>) -> Self {
        let brand = table
            .unique_values(Column::Brand)
            .into_iter()
            .next()
            .map(|v| v.to_string());
        Self {
            table,
            page: Page::default(),
            params: PageParams {
                brand,
                price_order: SortOrder::Ascending,
            },
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Brands for the brand selector, in table order.
    pub fn brands(&self) -> Vec<String> {
        self.table
            .unique_values(Column::Brand)
            .iter()
            .map(|v| v.to_string())
            .collect()
    }

    pub fn select_page(&mut self, page: Page) {
        self.page = page;
    }

    pub fn select_brand(&mut self, brand: &str) {
        self.params.brand = Some(brand.to_string());
    }

    pub fn set_price_order(&mut self, order: SortOrder) {
        self.params.price_order = order;
    }

    /// Flip the brand table between ascending and descending price.
    pub fn toggle_price_order(&mut self) {
        self.params.price_order = match self.params.price_order {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        };
    }

    /// Compute every section of the current page. Nothing is cached; each
    /// call re-runs the requests against the table.
    pub fn view(&self) -> Result<Vec<SectionView>, AggregateError> {
        pages::sections(self.page, &self.params)
            .into_iter()
            .map(|section| {
                let result = section.evaluate(&self.table)?;
                Ok(SectionView { section, result })
            })
            .collect()
    }
}
