//! Request extractors

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;

use crate::response::ApiResponse;

pub const ACTOR_HEADER: &str = "x-actor";

/// The identity stamped into created_by/updated_by. The registry requires
/// it; requests that do not carry one are rejected here, never defaulted.
#[derive(Debug, Clone)]
pub struct Actor(pub String);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiResponse<()>>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match actor {
            Some(actor) => Ok(Actor(actor.to_string())),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error(
                    "MISSING_ACTOR",
                    "Request must identify its actor via the x-actor header",
                )),
            )),
        }
    }
}
