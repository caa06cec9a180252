use accountd::application::service::AccountService;
use accountd::domain::account::{Account, ListPage, ListQuery};
use accountd::domain::ports::{AccountStore, SharedAccountStore};
use accountd::error::Result;
use accountd::infrastructure::in_memory::InMemoryAccountStore;
use accountd::interfaces::http;
use accountd::interfaces::http::handlers::AppState;
use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_LIMIT: i64 = 10;

pub async fn init_app(
    store: SharedAccountStore,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    init_app_with_timeout(store, Duration::from_secs(5)).await
}

pub async fn init_app_with_timeout(
    store: SharedAccountStore,
    api_timeout: Duration,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    let service = AccountService::new(store, DEFAULT_LIMIT);
    let state = web::Data::new(AppState::new(service, api_timeout));
    test::init_service(App::new().app_data(state).configure(http::configure)).await
}

pub fn account(id: i64, limit: i64, products: &[&str]) -> Account {
    Account {
        account_id: id,
        limit,
        products: products.iter().map(|p| (*p).to_owned()).collect(),
    }
}

/// Store double that delays every operation, for exercising deadlines.
pub struct SlowStore {
    inner: InMemoryAccountStore,
    delay: Duration,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryAccountStore::new(),
            delay,
        }
    }
}

#[async_trait]
impl AccountStore for SlowStore {
    async fn insert(&self, account: Account) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.insert(account).await
    }

    async fn find(&self, account_id: i64) -> Result<Account> {
        tokio::time::sleep(self.delay).await;
        self.inner.find(account_id).await
    }

    async fn list(&self, query: ListQuery) -> Result<ListPage> {
        tokio::time::sleep(self.delay).await;
        self.inner.list(query).await
    }

    async fn replace(&self, account: Account) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.replace(account).await
    }

    async fn remove(&self, account_id: i64) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.remove(account_id).await
    }
}

pub fn shared(store: InMemoryAccountStore) -> SharedAccountStore {
    Arc::new(store)
}
