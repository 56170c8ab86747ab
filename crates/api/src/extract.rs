//! Request body extractor.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use mymoney_core::input::from_json;

/// JSON body read into an all-optional payload struct.
///
/// Only a missing content type or malformed JSON is rejected. Fields of the
/// wrong type arrive as absent, and a body that is not an object arrives as
/// an empty payload, so the domain validation reports them in its own terms.
#[derive(Debug, Clone, Default)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = JsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(Self(from_json(value)))
    }
}
