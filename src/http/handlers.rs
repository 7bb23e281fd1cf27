//! Route handlers for the front door.

use axum::{
    extract::{rejection::FormRejection, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Form,
};

use crate::channel::SendError;
use crate::http::assets::Asset;
use crate::http::error::HttpError;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Body of `POST /message`.
///
/// A repeated field keeps its first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SubmitForm {
    pub username: String,
    pub message: String,
}

impl SubmitForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut username = None;
        let mut message = None;
        for (name, value) in pairs {
            match name.as_str() {
                "username" if username.is_none() => username = Some(value),
                "message" if message.is_none() => message = Some(value),
                _ => {}
            }
        }
        Self {
            username: username.unwrap_or_default(),
            message: message.unwrap_or_default(),
        }
    }
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Result<Response, HttpError> {
    state.assets.serve(Asset::Index, StatusCode::OK).await
}

/// GET /message
pub async fn message_form(State(state): State<AppState>) -> Result<Response, HttpError> {
    state.assets.serve(Asset::MessageForm, StatusCode::OK).await
}

/// GET /static/style.css
pub async fn stylesheet(State(state): State<AppState>) -> Result<Response, HttpError> {
    state.assets.serve(Asset::Stylesheet, StatusCode::OK).await
}

/// POST /message
///
/// Forwards the pair to the ingest worker and answers before it is stored.
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<&'static str, HttpError> {
    let Form(pairs) = form.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable submission");
        metrics::record_submission("rejected");
        HttpError::ClientInput
    })?;
    let form = SubmitForm::from_pairs(pairs);

    if form.username.is_empty() || form.message.is_empty() {
        tracing::debug!("Submission with empty field rejected");
        metrics::record_submission("rejected");
        return Err(HttpError::ClientInput);
    }

    match state.sender.send(&form.username, &form.message).await {
        Ok(()) => {}
        Err(e @ SendError::Oversized { .. }) => {
            tracing::debug!(error = %e, "Submission too long for one datagram");
            metrics::record_submission("rejected");
            return Err(HttpError::ClientInput);
        }
        Err(e) => {
            tracing::warn!(target_addr = %state.sender.target(), error = %e, "Failed to send datagram");
        }
    }

    metrics::record_submission("sent");
    Ok("Message sent!")
}

/// Anything unrouted: the error page for GET, plain text otherwise.
pub async fn not_found(State(state): State<AppState>, method: Method) -> Response {
    if method == Method::GET || method == Method::HEAD {
        match state.assets.serve(Asset::ErrorPage, StatusCode::NOT_FOUND).await {
            Ok(page) => page,
            Err(e) => e.into_response(),
        }
    } else {
        HttpError::NotFound.into_response()
    }
}
