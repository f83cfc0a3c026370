//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::{ItemId, ItemPayload, ValidationError};

/// Extract and validate an item id from path
pub struct ValidItemId(pub ItemId);

impl<S> FromRequestParts<S> for ValidItemId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "id",
                    reason: "missing path parameter",
                })
            })?;

        Ok(Self(ItemId::parse(&raw)?))
    }
}

/// JSON item body with axum's rejections mapped to [`ApiError`].
///
/// Field presence is not checked here; handlers call
/// [`ItemPayload::validate`] with the right [`WriteAction`](crate::models::WriteAction).
pub struct ItemBody(pub ItemPayload);

impl<S> FromRequest<S> for ItemBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<ItemPayload>::from_request(req, state).await?;
        Ok(Self(payload))
    }
}
