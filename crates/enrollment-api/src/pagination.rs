//! Page arithmetic for list endpoints.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaginationError {
  #[error("page limit must be greater than zero")]
  ZeroLimit,
}

/// Paging metadata returned alongside a list, and the source of the
/// `offset`/`limit` window handed to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
  pub total_count: u64,
  /// 1-based page actually served.
  pub page:        u64,
  pub per_page:    u64,
  pub page_count:  u64,
}

impl Meta {
  /// Resolve a requested `page`/`per_page` against `total` matching rows.
  ///
  /// A `per_page` of `0` falls back to `default_per_page`. The page is clamped
  /// to the last page and never goes below `1`.
  pub fn new(
    page: u64,
    per_page: u64,
    total: u64,
    default_per_page: u64,
  ) -> Result<Self, PaginationError> {
    let per_page = if per_page == 0 { default_per_page } else { per_page };
    if per_page == 0 {
      return Err(PaginationError::ZeroLimit);
    }

    let page_count = total.div_ceil(per_page);
    let page = page.min(page_count).max(1);

    Ok(Self { total_count: total, page, per_page, page_count })
  }

  pub fn offset(&self) -> u64 {
    self.page.saturating_sub(1).saturating_mul(self.per_page)
  }

  pub fn limit(&self) -> u64 { self.per_page }
}
