//! Request and response shapes for the accounts endpoints.
//!
//! Field presence is enforced by deserialization; the `validate` methods
//! additionally reject zero values for the required numeric fields before
//! anything reaches the service.

use crate::application::service::ListRequest;
use crate::domain::account::Account;
use crate::error::{AccountError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AccountCreateRequest {
    pub account_id: i64,
    pub limit: i64,
    pub products: Vec<String>,
}

impl AccountCreateRequest {
    pub fn validate(&self) -> Result<()> {
        if self.account_id == 0 {
            return Err(AccountError::Validation(
                "account_id is required".to_owned(),
            ));
        }
        require_limit(self.limit)
    }

    pub fn into_account(self) -> Account {
        Account {
            account_id: self.account_id,
            limit: self.limit,
            products: self.products,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountUpdateRequest {
    pub limit: i64,
    pub products: Vec<String>,
}

impl AccountUpdateRequest {
    pub fn validate(&self) -> Result<()> {
        require_limit(self.limit)
    }
}

fn require_limit(limit: i64) -> Result<()> {
    if limit == 0 {
        return Err(AccountError::Validation("limit is required".to_owned()));
    }
    Ok(())
}

/// Listing query string; every parameter is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub page: Option<i64>,
}

impl ListParams {
    pub fn into_request(self) -> ListRequest {
        ListRequest {
            product: self.product,
            order_by: self.order_by,
            limit: self.limit.unwrap_or(0),
            page: self.page.unwrap_or(0),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub account_id: i64,
    pub limit: i64,
    pub products: Vec<String>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            account_id: account.account_id,
            limit: account.limit,
            products: account.products,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_requires_non_zero_fields() {
        let request: AccountCreateRequest =
            serde_json::from_str(r#"{"account_id":0,"limit":100,"products":[]}"#).unwrap();
        assert!(matches!(
            request.validate(),
            Err(AccountError::Validation(_))
        ));

        let request: AccountCreateRequest =
            serde_json::from_str(r#"{"account_id":1,"limit":0,"products":[]}"#).unwrap();
        assert!(matches!(
            request.validate(),
            Err(AccountError::Validation(_))
        ));

        let request: AccountCreateRequest =
            serde_json::from_str(r#"{"account_id":1,"limit":100,"products":["a"]}"#).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_missing_products() {
        let result: std::result::Result<AccountCreateRequest, _> =
            serde_json::from_str(r#"{"account_id":1,"limit":100}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_params_default_to_unset() {
        let params = ListParams::default().into_request();
        assert_eq!(params.limit, 0);
        assert_eq!(params.page, 0);
        assert!(params.product.is_none());
        assert!(params.order_by.is_none());
    }
}
