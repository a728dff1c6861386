use std::error::Error as StdError;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::application::engagement::EngagementError;
use crate::application::feed::FeedError;
use crate::application::quotes::QuoteError;
use crate::infra::error::InfraError;

/// Diagnostic payload attached to error responses for the logging
/// middleware. The public body stays generic; the report carries the
/// source chain.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub status: StatusCode,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, status: StatusCode, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self {
            source,
            status,
            messages,
        }
    }

    pub fn from_message(
        source: &'static str,
        status: StatusCode,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source,
            status,
            messages: vec![message.into()],
        }
    }

    pub fn attach(self, response: &mut Response) {
        response.extensions_mut().insert(self);
    }
}

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    public_message: &'static str,
    report: ErrorReport,
}

impl HttpError {
    pub fn new(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        let report = ErrorReport::from_message(source, status, detail);
        Self {
            status,
            public_message,
            report,
        }
    }

    pub fn from_error(
        source: &'static str,
        status: StatusCode,
        public_message: &'static str,
        error: &dyn StdError,
    ) -> Self {
        let report = ErrorReport::from_error(source, status, error);
        Self {
            status,
            public_message,
            report,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.public_message).into_response();
        self.report.attach(&mut response);
        response
    }
}

impl From<FeedError> for HttpError {
    fn from(error: FeedError) -> Self {
        // Every rebuild failure is a store failure; nothing user-correctable.
        HttpError::from_error(
            "infra::http::feed_error_to_http_error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            &error,
        )
    }
}

impl From<QuoteError> for HttpError {
    fn from(error: QuoteError) -> Self {
        let source = "infra::http::quote_error_to_http_error";
        match &error {
            QuoteError::NotFound => HttpError::new(
                source,
                StatusCode::NOT_FOUND,
                "Quote not found",
                "quote not found",
            ),
            QuoteError::NotOwner => HttpError::new(
                source,
                StatusCode::FORBIDDEN,
                "Not your quote",
                "caller is not the creator of this quote",
            ),
            QuoteError::Validation(message) => HttpError::new(
                source,
                StatusCode::BAD_REQUEST,
                "Invalid quote",
                message.clone(),
            ),
            QuoteError::Repo(_) => HttpError::from_error(
                source,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                &error,
            ),
        }
    }
}

impl From<EngagementError> for HttpError {
    fn from(error: EngagementError) -> Self {
        HttpError::from_error(
            "infra::http::engagement_error_to_http_error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            &error,
        )
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}
