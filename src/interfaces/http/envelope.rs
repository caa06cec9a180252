//! Response envelope and the mapping from typed errors onto it.
//!
//! The core returns `AccountError` values only; this module decides the
//! HTTP status and the `{code, message}` display payload. Internal
//! failures all collapse to the generic payload so no store detail leaks
//! to clients.

use crate::error::AccountError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use tracing::{debug, error};

/// Classified result of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Created,
    BadRequest,
    Internal,
    Timeout,
}

impl Outcome {
    pub const fn status(self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Created => StatusCode::CREATED,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Success | Self::Created => "000",
            Self::BadRequest | Self::Internal | Self::Timeout => "001",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::Success | Self::Created => "Successful",
            Self::BadRequest => "Bad Request",
            Self::Internal => "Internal Server Error",
            Self::Timeout => "Gateway Timeout",
        }
    }
}

/// Body shape shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub code: &'static str,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_data: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_page: Option<u64>,
}

impl<T: Serialize> Envelope<T> {
    fn new(outcome: Outcome, data: Option<T>) -> Self {
        Self {
            code: outcome.code(),
            message: outcome.message(),
            data,
            total_data: None,
            total_page: None,
        }
    }
}

pub fn respond(outcome: Outcome) -> HttpResponse {
    HttpResponse::build(outcome.status()).json(Envelope::<()>::new(outcome, None))
}

pub fn respond_with<T: Serialize>(outcome: Outcome, data: T) -> HttpResponse {
    HttpResponse::build(outcome.status()).json(Envelope::new(outcome, Some(data)))
}

pub fn respond_page<T: Serialize>(
    outcome: Outcome,
    data: T,
    total_data: u64,
    total_page: u64,
) -> HttpResponse {
    let mut envelope = Envelope::new(outcome, Some(data));
    envelope.total_data = Some(total_data);
    envelope.total_page = Some(total_page);
    HttpResponse::build(outcome.status()).json(envelope)
}

impl AccountError {
    pub fn outcome(&self) -> Outcome {
        match self {
            Self::Validation(_) | Self::InvalidOrderBy => Outcome::BadRequest,
            Self::Timeout(_) => Outcome::Timeout,
            Self::NotFound(_) | Self::DuplicateKey(_) | Self::Store(_) | Self::Decode(_) => {
                Outcome::Internal
            }
        }
    }
}

impl ResponseError for AccountError {
    fn status_code(&self) -> StatusCode {
        self.outcome().status()
    }

    fn error_response(&self) -> HttpResponse {
        let outcome = self.outcome();
        if outcome == Outcome::BadRequest {
            debug!(error = %self, "request rejected");
        } else {
            error!(error = %self, "request failed");
        }
        respond(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_outcome_payloads() {
        assert_eq!(Outcome::Success.code(), "000");
        assert_eq!(Outcome::Created.status(), StatusCode::CREATED);
        assert_eq!(Outcome::BadRequest.message(), "Bad Request");
        assert_eq!(Outcome::Internal.message(), "Internal Server Error");
        assert_eq!(Outcome::Timeout.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_error_to_outcome_mapping() {
        assert_eq!(
            AccountError::Validation("x".to_owned()).outcome(),
            Outcome::BadRequest
        );
        assert_eq!(AccountError::InvalidOrderBy.outcome(), Outcome::BadRequest);
        assert_eq!(AccountError::NotFound(1).outcome(), Outcome::Internal);
        assert_eq!(AccountError::DuplicateKey(1).outcome(), Outcome::Internal);
        assert_eq!(
            AccountError::Decode("bad".to_owned()).outcome(),
            Outcome::Internal
        );
        assert_eq!(
            AccountError::Timeout(Duration::from_secs(1)).outcome(),
            Outcome::Timeout
        );
    }

    #[test]
    fn test_envelope_omits_empty_fields() {
        let body = serde_json::to_value(Envelope::<()>::new(Outcome::Success, None)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "code": "000", "message": "Successful" })
        );
    }
}
