//! Pagination utilities for service layer
//!
//! Provides a zero-based `PageRequest` with the listing defaults.

use crate::errors::ServiceError;

pub const DEFAULT_PAGE_NUMBER: u64 = 0;
pub const DEFAULT_PAGE_SIZE: u64 = 3;
/// SQL `LIMIT`/`OFFSET` are signed 64-bit.
pub const MAX_ROWS: u64 = i64::MAX as u64;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index
    pub page_number: u64,
    /// items per page, never zero
    pub page_size: u64,
}

impl PageRequest {
    /// Validate raw paging input. A zero page size is rejected, as is any
    /// page whose size or offset does not fit in [`MAX_ROWS`].
    pub fn new(page_number: u64, page_size: u64) -> Result<Self, ServiceError> {
        if page_size == 0 {
            return Err(ServiceError::Validation("pageSize must be at least 1".into()));
        }
        if page_size > MAX_ROWS {
            return Err(ServiceError::Validation(format!("pageSize must be at most {MAX_ROWS}")));
        }
        match page_number.checked_mul(page_size) {
            Some(offset) if offset <= MAX_ROWS => Ok(Self { page_number, page_size }),
            _ => Err(ServiceError::Validation(format!(
                "page {page_number} of size {page_size} is out of range"
            ))),
        }
    }

    /// Build from optional query values, falling back to the defaults.
    pub fn from_optional(page_number: Option<u64>, page_size: Option<u64>) -> Result<Self, ServiceError> {
        Self::new(
            page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }

    /// Number of rows skipped before this page starts.
    pub fn offset(self) -> u64 {
        self.page_number.saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self { Self { page_number: DEFAULT_PAGE_NUMBER, page_size: DEFAULT_PAGE_SIZE } }
}
