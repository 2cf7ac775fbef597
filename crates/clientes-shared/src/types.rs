//! Common types

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Zero-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Build a request, falling back to the default size for `0` and
    /// clamping anything above [`MAX_PAGE_SIZE`].
    pub fn new(page: u32, size: u32) -> Self {
        let size = match size {
            0 => DEFAULT_PAGE_SIZE,
            s if s > MAX_PAGE_SIZE => MAX_PAGE_SIZE,
            s => s,
        };
        Self { page, size }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, size: DEFAULT_PAGE_SIZE }
    }
}

/// One page of results plus the totals needed to navigate the rest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = u64::from(request.size.max(1));
        let total_pages = total_elements.div_ceil(size);
        let number = request.page;
        Self {
            empty: content.is_empty(),
            content,
            number,
            size: request.size,
            total_elements,
            total_pages,
            first: number == 0,
            last: u64::from(number) + 1 >= total_pages,
        }
    }
}
