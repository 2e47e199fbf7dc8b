use crate::database::FindOptions;
use crate::utils::AppError;

/// Zero-based page window: `skip = page * size`, `limit = size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub size: u64,
}

impl Pagination {
    /// Builds a window only when both parameters were supplied.
    pub fn from_query(page: Option<u64>, size: Option<u64>) -> Result<Option<Self>, AppError> {
        match (page, size) {
            (Some(_), Some(0)) => Err(AppError::InvalidRequest(
                "size must be greater than zero".to_string(),
            )),
            (Some(page), Some(size)) => Ok(Some(Self { page, size })),
            _ => Ok(None),
        }
    }

    /// Clamped to `i64::MAX`, the largest skip the driver can encode.
    pub fn skip(&self) -> u64 {
        self.page.saturating_mul(self.size).min(i64::MAX as u64)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.size).unwrap_or(i64::MAX)
    }
}

impl From<Option<Pagination>> for FindOptions {
    fn from(pagination: Option<Pagination>) -> Self {
        match pagination {
            Some(p) => FindOptions {
                skip: Some(p.skip()),
                limit: Some(p.limit()),
            },
            None => FindOptions::default(),
        }
    }
}
