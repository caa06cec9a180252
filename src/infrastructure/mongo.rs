//! MongoDB-backed implementation of the `AccountStore` port.
//!
//! The listing query is one aggregation command: an optional product
//! match followed by a `$facet` whose `metadata` branch counts the whole
//! filtered set while the `data` branch sorts and windows it. Running
//! both branches inside a single command keeps the count and the page
//! consistent with each other under the default read concern.

use crate::config::Settings;
use crate::domain::account::{Account, ListPage, ListQuery};
use crate::domain::ports::AccountStore;
use crate::error::{AccountError, Result};
use crate::infrastructure::document::{
    decode_list_result, from_document, to_document, FACET_DATA, FACET_METADATA,
    FIELD_ACCOUNT_ID, FIELD_PRODUCTS, FIELD_TOTAL_COUNT,
};
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use std::future::Future;
use std::time::Duration;
use tracing::info;

pub const COLLECTION_NAME: &str = "accounts";

/// Server error code for a unique-index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Store adapter bound to the accounts collection.
///
/// Cloning shares the underlying connection pool; the driver handles
/// concurrent use. Every operation runs under the configured per-query
/// deadline; on expiry the in-flight future is dropped, which aborts the
/// driver-side operation.
#[derive(Clone)]
pub struct MongoAccountStore {
    collection: Collection<Document>,
    query_timeout: Duration,
}

impl MongoAccountStore {
    /// Connects, verifies the deployment with a ping, and ensures the
    /// unique index on the account identifier.
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let mut options = ClientOptions::parse(&settings.mongo_uri).await?;
        options.min_pool_size = Some(settings.mongo_pool_min);
        options.max_pool_size = Some(settings.mongo_pool_max);
        options.max_idle_time = Some(settings.mongo_max_idle());
        options.connect_timeout = Some(settings.mongo_connect_timeout());
        options.server_selection_timeout = Some(settings.mongo_connect_timeout());

        let client = Client::with_options(options)?;
        let database = client.database(&settings.mongo_database);
        database.run_command(doc! { "ping": 1 }).await?;

        let collection = database.collection::<Document>(COLLECTION_NAME);
        let index = IndexModel::builder()
            .keys(doc! { FIELD_ACCOUNT_ID: 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection.create_index(index).await?;

        info!(
            database = %settings.mongo_database,
            collection = COLLECTION_NAME,
            "connected to mongodb"
        );

        Ok(Self {
            collection,
            query_timeout: settings.mongo_query_timeout(),
        })
    }

    async fn with_deadline<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = mongodb::error::Result<T>>,
    {
        tokio::time::timeout(self.query_timeout, operation)
            .await
            .map_err(|_| AccountError::Timeout(self.query_timeout))?
            .map_err(AccountError::from)
    }
}

/// Builds the aggregation pipeline for a listing query.
///
/// The match stage is present only when a product filter was given, and
/// the sort stage only when a direction was supplied; skip always
/// precedes limit inside the data branch.
fn list_pipeline(query: &ListQuery) -> Vec<Document> {
    let mut pipeline = Vec::with_capacity(2);

    if let Some(product) = &query.product {
        pipeline.push(doc! { "$match": { FIELD_PRODUCTS: product.as_str() } });
    }

    let mut data_stages = Vec::with_capacity(3);
    if let Some(sort) = query.sort {
        data_stages.push(doc! { "$sort": { FIELD_ACCOUNT_ID: sort.order() } });
    }
    data_stages.push(doc! { "$skip": query.offset });
    data_stages.push(doc! { "$limit": query.limit });

    pipeline.push(doc! {
        "$facet": {
            FACET_METADATA: [ { "$count": FIELD_TOTAL_COUNT } ],
            FACET_DATA: data_stages,
        }
    });

    pipeline
}

fn id_filter(account_id: i64) -> Document {
    doc! { FIELD_ACCOUNT_ID: account_id }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

#[async_trait]
impl AccountStore for MongoAccountStore {
    async fn insert(&self, account: Account) -> Result<()> {
        let document = to_document(&account);
        let inserted = self
            .with_deadline(async { self.collection.insert_one(document).await })
            .await;
        match inserted {
            Err(AccountError::Store(error)) if is_duplicate_key(&error) => {
                Err(AccountError::DuplicateKey(account.account_id))
            }
            other => other.map(|_| ()),
        }
    }

    async fn find(&self, account_id: i64) -> Result<Account> {
        let found = self
            .with_deadline(async { self.collection.find_one(id_filter(account_id)).await })
            .await?;
        match found {
            Some(document) => from_document(&document),
            None => Err(AccountError::NotFound(account_id)),
        }
    }

    async fn list(&self, query: ListQuery) -> Result<ListPage> {
        let pipeline = list_pipeline(&query);
        let results: Vec<Document> = self
            .with_deadline(async {
                let cursor = self.collection.aggregate(pipeline).await?;
                cursor.try_collect().await
            })
            .await?;

        // $facet always emits exactly one document.
        match results.first() {
            Some(facet) => decode_list_result(facet),
            None => Ok(ListPage::default()),
        }
    }

    async fn replace(&self, account: Account) -> Result<()> {
        let account_id = account.account_id;
        let document = to_document(&account);
        let result = self
            .with_deadline(async {
                self.collection
                    .replace_one(id_filter(account_id), document)
                    .await
            })
            .await?;
        if result.matched_count == 0 {
            return Err(AccountError::NotFound(account_id));
        }
        Ok(())
    }

    async fn remove(&self, account_id: i64) -> Result<()> {
        let result = self
            .with_deadline(async { self.collection.delete_one(id_filter(account_id)).await })
            .await?;
        if result.deleted_count == 0 {
            return Err(AccountError::NotFound(account_id));
        }
        Ok(())
    }
}
