//! Query strings shared by list endpoints

use serde::Deserialize;

use core_kernel::{ClaimId, ClientId, Pagination, PolicyId};

use crate::error::ApiError;

/// `?skip=&limit=` plus the optional owner filters
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub client_id: Option<ClientId>,
    pub policy_id: Option<PolicyId>,
    pub claim_id: Option<ClaimId>,
}

impl ListQuery {
    pub fn pagination(&self) -> Result<Pagination, ApiError> {
        Ok(Pagination::new(
            self.skip.unwrap_or(0),
            self.limit.unwrap_or(Pagination::DEFAULT_LIMIT),
        )?)
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: String,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl SearchQuery {
    pub fn pagination(&self) -> Result<Pagination, ApiError> {
        Ok(Pagination::new(
            self.skip.unwrap_or(0),
            self.limit.unwrap_or(Pagination::DEFAULT_LIMIT),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = ListQuery::default().pagination().unwrap();
        assert_eq!(page, Pagination::default());
    }

    #[test]
    fn test_limit_out_of_range() {
        let query = ListQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert!(matches!(query.pagination(), Err(ApiError::Validation(_))));
    }
}
