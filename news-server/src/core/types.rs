use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_NUMBER: usize = 0;
pub const DEFAULT_PAGE_SIZE: usize = 15;
pub const MAX_PAGE_SIZE: usize = 100;

/// A stored news article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: i64,
    pub time: DateTime<Utc>,
    pub title: String,
    pub text: String,
    pub user_id: i64,
}

/// Payload for creating an article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsCreate {
    pub title: String,
    pub text: String,
    pub user_id: i64,
}

/// Payload for updating an article; `id` selects the record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsUpdate {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub user_id: i64,
}

/// Paging parameters (`offset` is the page number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_offset")]
    pub offset: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_offset() -> usize {
    DEFAULT_PAGE_NUMBER
}

fn default_limit() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            offset: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Page size clamped to `1..=MAX_PAGE_SIZE`
    pub fn page_size(&self) -> usize {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }
}

/// One page of results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page_number: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_elements: usize,
    pub content: Vec<T>,
}

impl<T> Page<T> {
    /// Cut a page out of an already ordered result set
    pub fn paginate(items: Vec<T>, params: PageParams) -> Self {
        let page_size = params.page_size();
        let total_elements = items.len();
        let total_pages = total_elements.div_ceil(page_size);

        let content = items
            .into_iter()
            .skip(params.offset.saturating_mul(page_size))
            .take(page_size)
            .collect();

        Self {
            page_number: params.offset,
            page_size,
            total_pages,
            total_elements,
            content,
        }
    }
}
