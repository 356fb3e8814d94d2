use crate::model::Recipe;
use serde::Serialize;

/// What the results view renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<Recipe>,
    pub count: usize,
    pub loading: bool,
    #[serde(skip)]
    page_size: usize,
}

impl SearchOutcome {
    pub(crate) fn loading(page_size: usize) -> Self {
        SearchOutcome {
            results: Vec::new(),
            count: 0,
            loading: true,
            page_size,
        }
    }

    pub(crate) fn ready(results: Vec<Recipe>, page_size: usize) -> Self {
        SearchOutcome {
            count: results.len(),
            results,
            loading: false,
            page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.slug.as_str()).collect()
    }

    /// Returns one page of the results. `page` is 1-based.
    ///
    /// Pages past the end are empty; `page == 0` is treated as the first page
    /// and `per_page == 0` as the configured page size.
    pub fn page(&self, page: usize, per_page: usize) -> ResultPage<'_> {
        let per_page = match per_page {
            0 => self.page_size.max(1),
            n => n,
        };
        let page = page.max(1);
        let total = self.results.len();
        let start = (page - 1).saturating_mul(per_page).min(total);
        let end = start.saturating_add(per_page).min(total);

        ResultPage {
            results: &self.results[start..end],
            pagination: Pagination {
                page,
                per_page,
                total,
                total_pages: total.div_ceil(per_page),
            },
        }
    }
}

/// A slice of a [`SearchOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage<'a> {
    pub results: &'a [Recipe],
    pub pagination: Pagination,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl Pagination {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
