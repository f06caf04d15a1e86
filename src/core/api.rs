//! JSON API over a [`Wallet`].
//!
//! | route              | body              |
//! |--------------------|-------------------|
//! | `GET /id`          | `{"id": ...}`     |
//! | `POST /id`         | `{"id": "..."}`   |
//! | `DELETE /id`       | `{"id": null}`    |
//! | `GET /wallet`      | stored id's view  |
//! | `GET /wallet/{id}` | explicit id's view|
//!
//! The `{id}` segment is percent-decoded before filtering.
//!
//! Failures answer `{"message": "..."}` with a status derived from
//! [`WalletError`].

use crate::core::Wallet;
use crate::utils::error::WalletError;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::error;
use warp::http::StatusCode;
use warp::reply::{self, Json, WithStatus};
use warp::{Filter, Rejection};

#[derive(Debug, Serialize, Deserialize)]
pub struct IdentityBody {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
}

pub fn routes(
    wallet: Arc<Wallet>,
) -> impl Filter<Extract = (WithStatus<Json>,), Error = Rejection> + Clone {
    let get_id = warp::path!("id")
        .and(warp::get())
        .and(with_wallet(wallet.clone()))
        .and_then(get_identity);

    let set_id = warp::path!("id")
        .and(warp::post())
        .and(warp::body::content_length_limit(16 * 1024))
        .and(warp::body::json())
        .and(with_wallet(wallet.clone()))
        .and_then(set_identity);

    let clear_id = warp::path!("id")
        .and(warp::delete())
        .and(with_wallet(wallet.clone()))
        .and_then(clear_identity);

    let stored = warp::path!("wallet")
        .and(warp::get())
        .and(with_wallet(wallet.clone()))
        .and_then(stored_view);

    let named = warp::path!("wallet" / String)
        .and(warp::get())
        .and(with_wallet(wallet))
        .and_then(named_view);

    get_id
        .or(set_id)
        .unify()
        .or(clear_id)
        .unify()
        .or(stored)
        .unify()
        .or(named)
        .unify()
}

fn with_wallet(
    wallet: Arc<Wallet>,
) -> impl Filter<Extract = (Arc<Wallet>,), Error = Infallible> + Clone {
    warp::any().map(move || wallet.clone())
}

async fn get_identity(wallet: Arc<Wallet>) -> Result<WithStatus<Json>, Rejection> {
    let body = IdentityBody {
        id: wallet.identity().await,
    };
    Ok(reply::with_status(reply::json(&body), StatusCode::OK))
}

async fn set_identity(
    body: IdentityBody,
    wallet: Arc<Wallet>,
) -> Result<WithStatus<Json>, Rejection> {
    let Some(id) = body.id else {
        return Ok(message(StatusCode::BAD_REQUEST, "Request body must have id"));
    };

    match wallet.set_identity(&id).await {
        Ok(()) => Ok(reply::with_status(
            reply::json(&IdentityBody { id: Some(id) }),
            StatusCode::OK,
        )),
        Err(e) => Ok(failure(e)),
    }
}

async fn clear_identity(wallet: Arc<Wallet>) -> Result<WithStatus<Json>, Rejection> {
    Ok(match wallet.clear_identity().await {
        Ok(()) => reply::with_status(reply::json(&IdentityBody { id: None }), StatusCode::OK),
        Err(e) => failure(e),
    })
}

async fn stored_view(wallet: Arc<Wallet>) -> Result<WithStatus<Json>, Rejection> {
    Ok(match wallet.stored_view().await {
        Ok(view) => reply::with_status(reply::json(&view), StatusCode::OK),
        Err(e) => failure(e),
    })
}

async fn named_view(id: String, wallet: Arc<Wallet>) -> Result<WithStatus<Json>, Rejection> {
    let Ok(id) = urlencoding::decode(&id) else {
        return Ok(message(StatusCode::BAD_REQUEST, "Wallet id is not valid UTF-8"));
    };

    Ok(match wallet.view(&id).await {
        Ok(view) => reply::with_status(reply::json(&view), StatusCode::OK),
        Err(e) => failure(e),
    })
}

fn failure(e: anyhow::Error) -> WithStatus<Json> {
    let status = match e.downcast_ref::<WalletError>() {
        Some(WalletError::MissingIdentity) => StatusCode::NOT_FOUND,
        Some(WalletError::InvalidAmount { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
        Some(WalletError::FetchError(_)) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!(
            event = "api_error",
            message = "Request failed",
            error = %e
        );
    }

    message(status, &e.to_string())
}

fn message(status: StatusCode, message: &str) -> WithStatus<Json> {
    reply::with_status(
        reply::json(&MessageBody {
            message: message.to_string(),
        }),
        status,
    )
}
