//! BSON codec for account records and aggregation results.
//!
//! Decoding is a single fallible boundary: a wrong BSON kind or a missing
//! key anywhere fails the whole operation with `AccountError::Decode`
//! instead of half-populating a record. Integers are widened from the
//! wire's `Int32` without loss and written back at the narrowest width
//! that fits.

use crate::domain::account::{Account, ListPage};
use crate::error::{AccountError, Result};
use mongodb::bson::{doc, Bson, Document};

pub const FIELD_ACCOUNT_ID: &str = "account_id";
pub const FIELD_LIMIT: &str = "limit";
pub const FIELD_PRODUCTS: &str = "products";

/// Facet branch carrying the single count document.
pub const FACET_METADATA: &str = "metadata";
/// Facet branch carrying the page of account documents.
pub const FACET_DATA: &str = "data";
/// Field the `$count` stage writes inside the metadata branch.
pub const FIELD_TOTAL_COUNT: &str = "total_count";

pub fn to_document(account: &Account) -> Document {
    doc! {
        FIELD_ACCOUNT_ID: encode_int(account.account_id),
        FIELD_LIMIT: encode_int(account.limit),
        FIELD_PRODUCTS: account.products.clone(),
    }
}

pub fn from_document(document: &Document) -> Result<Account> {
    Ok(Account {
        account_id: read_int(document, FIELD_ACCOUNT_ID)?,
        limit: read_int(document, FIELD_LIMIT)?,
        products: read_products(document)?,
    })
}

/// Decodes the single document produced by the facet pipeline.
///
/// An empty metadata branch means nothing matched the filter and yields a
/// zero total, not an error.
pub fn decode_list_result(document: &Document) -> Result<ListPage> {
    let metadata = read_array(document, FACET_METADATA)?;
    let total = match metadata.first() {
        Some(Bson::Document(count_doc)) => {
            let count = read_int(count_doc, FIELD_TOTAL_COUNT)?;
            u64::try_from(count).map_err(|_| {
                AccountError::Decode(format!("field {FIELD_TOTAL_COUNT} is negative: {count}"))
            })?
        }
        Some(other) => {
            return Err(unexpected_kind(FACET_METADATA, other));
        }
        None => 0,
    };

    let mut accounts = Vec::new();
    for entry in read_array(document, FACET_DATA)? {
        match entry {
            Bson::Document(account_doc) => accounts.push(from_document(account_doc)?),
            other => return Err(unexpected_kind(FACET_DATA, other)),
        }
    }

    Ok(ListPage { accounts, total })
}

/// `Int32` when the value fits, `Int64` otherwise -- the width the store
/// itself uses for integers.
fn encode_int(value: i64) -> Bson {
    match i32::try_from(value) {
        Ok(narrow) => Bson::Int32(narrow),
        Err(_) => Bson::Int64(value),
    }
}

fn read_int(document: &Document, field: &str) -> Result<i64> {
    match document.get(field) {
        Some(Bson::Int32(value)) => Ok(i64::from(*value)),
        Some(Bson::Int64(value)) => Ok(*value),
        Some(other) => Err(unexpected_kind(field, other)),
        None => Err(missing_field(field)),
    }
}

fn read_array<'a>(document: &'a Document, field: &str) -> Result<&'a Vec<Bson>> {
    match document.get(field) {
        Some(Bson::Array(items)) => Ok(items),
        Some(other) => Err(unexpected_kind(field, other)),
        None => Err(missing_field(field)),
    }
}

fn read_products(document: &Document) -> Result<Vec<String>> {
    read_array(document, FIELD_PRODUCTS)?
        .iter()
        .map(|item| match item {
            Bson::String(product) => Ok(product.clone()),
            other => Err(unexpected_kind(FIELD_PRODUCTS, other)),
        })
        .collect()
}

fn missing_field(field: &str) -> AccountError {
    AccountError::Decode(format!("field {field} is missing"))
}

fn unexpected_kind(field: &str, found: &Bson) -> AccountError {
    AccountError::Decode(format!(
        "field {field}: unexpected {:?} element",
        found.element_type()
    ))
}
