use crate::error::{AccountError, Result};
use serde::{Deserialize, Serialize};

/// The persisted account record.
///
/// `account_id` is the unique key and never changes after creation;
/// updates may only touch `limit` and `products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: i64,
    pub limit: i64,
    pub products: Vec<String>,
}

/// Ordering applied to the listing's data branch, keyed by `account_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Parses the caller-supplied sort token.
    ///
    /// `ASC`/`DESC` in any casing select a direction, the empty token
    /// leaves the ordering unspecified, and anything else is rejected
    /// before a query is dispatched.
    pub fn parse(token: &str) -> Result<Option<Self>> {
        if token.is_empty() {
            return Ok(None);
        }
        if token.eq_ignore_ascii_case("asc") {
            return Ok(Some(Self::Ascending));
        }
        if token.eq_ignore_ascii_case("desc") {
            return Ok(Some(Self::Descending));
        }
        Err(AccountError::InvalidOrderBy)
    }

    /// The store-level ordering value: +1 ascending, -1 descending.
    pub fn order(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

/// A fully resolved listing query as handed to the store port.
///
/// Offset and limit are already computed; `product` of `None` means no
/// filter is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub product: Option<String>,
    pub sort: Option<SortDirection>,
    pub limit: i64,
    pub offset: i64,
}

/// One window of accounts plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListPage {
    pub accounts: Vec<Account>,
    pub total: u64,
}
