use serde::Serialize;

/// Row ids committed together in one transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    number: usize,
    row_ids: Vec<u64>,
}

impl Page {
    /// Create a page; `number` is 1-based
    pub fn new(number: usize, row_ids: Vec<u64>) -> Self {
        Self { number, row_ids }
    }

    /// 1-based page number
    pub fn number(&self) -> usize {
        self.number
    }

    /// Row ids in file order
    pub fn row_ids(&self) -> &[u64] {
        &self.row_ids
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.row_ids.len()
    }

    /// Whether the page has no rows
    pub fn is_empty(&self) -> bool {
        self.row_ids.is_empty()
    }
}

/// Pages in commit order. Pages are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageIndex {
    pages: Vec<Page>,
}

impl PageIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether nothing was committed
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page by 1-based number
    pub fn get(&self, number: usize) -> Option<&Page> {
        number.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    /// Iterate pages in commit order
    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }

    /// Row count of each page
    pub fn page_sizes(&self) -> Vec<usize> {
        self.pages.iter().map(Page::len).collect()
    }

    /// Total rows over all pages
    pub fn total_rows(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }
}
