use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use tracing::debug;

/// `Json` body extractor that rejects every malformed body with a plain text
/// 400, including a missing or wrong content type
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                let reason = rejection.body_text();
                debug!(status = %rejection.status(), "Rejected request body: {reason}");
                Err((StatusCode::BAD_REQUEST, reason))
            },
        }
    }
}
