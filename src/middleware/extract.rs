use axum::{
    Form, Json,
    extract::{FromRequest, Query, Request},
    http::header,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use crate::types::Validate;

/// JSON body that has passed `Validate`; failures become 400 with a field list.
pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = match Json::<T>::from_request(req, state).await {
            Ok(v) => v,
            Err(rejection) => return Err(rejection.into_response()),
        };
        body.validate().map_err(IntoResponse::into_response)?;
        Ok(ValidJson(body))
    }
}

/// Named parameters taken from a urlencoded form body when one is sent,
/// otherwise from the query string.
pub struct Params<T>(pub T);

impl<S, T> FromRequest<S> for Params<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(params) = match Form::<T>::from_request(req, state).await {
                Ok(v) => v,
                Err(rejection) => return Err(rejection.into_response()),
            };
            return Ok(Params(params));
        }

        match Query::<T>::try_from_uri(req.uri()) {
            Ok(Query(params)) => Ok(Params(params)),
            Err(rejection) => Err(rejection.into_response()),
        }
    }
}
