use crate::domain::textile::errors::DomainError;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: i64 = 24;

/// Largest page a caller may request unless configured otherwise.
pub const MAX_PAGE_SIZE: i64 = 100;

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaginationParams {
    pub page: i64,
    pub limit: i64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PaginationParams {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Rejects pages below 1 and limits outside `1..=max_limit`.
    pub fn validate(&self, max_limit: i64) -> Result<(), DomainError> {
        if self.page < 1 {
            return Err(DomainError::ValidationError(format!(
                "page must be at least 1, got {}",
                self.page
            )));
        }
        if self.limit < 1 || self.limit > max_limit {
            return Err(DomainError::ValidationError(format!(
                "limit must be between 1 and {}, got {}",
                max_limit, self.limit
            )));
        }
        Ok(())
    }

    /// Number of records to skip. Only meaningful after `validate`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Number of pages needed to show `total` records, `limit` at a time.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}
