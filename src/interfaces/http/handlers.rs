use super::envelope::{respond, respond_page, respond_with, Outcome};
use super::model::{AccountCreateRequest, AccountResponse, AccountUpdateRequest, ListParams};
use crate::application::service::AccountService;
use crate::error::{AccountError, Result};
use actix_web::{delete, get, post, put, web, HttpResponse};
use std::future::Future;
use std::time::Duration;

/// Shared handler state: the service plus the per-request deadline.
#[derive(Clone)]
pub struct AppState {
    service: AccountService,
    api_timeout: Duration,
}

impl AppState {
    pub fn new(service: AccountService, api_timeout: Duration) -> Self {
        Self {
            service,
            api_timeout,
        }
    }

    /// Applies the request deadline; on expiry the in-flight operation is
    /// dropped and the caller sees a timeout failure.
    async fn run<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::time::timeout(self.api_timeout, operation)
            .await
            .map_err(|_| AccountError::Timeout(self.api_timeout))?
    }
}

#[post("")]
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<AccountCreateRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;
    state.run(state.service.create(request.into_account())).await?;
    Ok(respond(Outcome::Created))
}

#[get("")]
pub async fn list(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> Result<HttpResponse> {
    let listing = state
        .run(state.service.list(params.into_inner().into_request()))
        .await?;
    let data: Vec<AccountResponse> = listing.accounts.into_iter().map(Into::into).collect();
    Ok(respond_page(
        Outcome::Success,
        data,
        listing.total,
        listing.total_pages,
    ))
}

#[get("/{id}")]
pub async fn detail(state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse> {
    let account = state.run(state.service.detail(path.into_inner())).await?;
    Ok(respond_with(
        Outcome::Success,
        AccountResponse::from(account),
    ))
}

#[put("/{id}")]
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<AccountUpdateRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();
    request.validate()?;
    state
        .run(
            state
                .service
                .update(path.into_inner(), request.limit, request.products),
        )
        .await?;
    Ok(respond(Outcome::Success))
}

#[delete("/{id}")]
pub async fn delete(state: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse> {
    state.run(state.service.delete(path.into_inner())).await?;
    Ok(respond(Outcome::Success))
}
