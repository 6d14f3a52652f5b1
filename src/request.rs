//! Helpers for turning extractor rejections into application errors.
//!
//! Handlers take `Result<Json<T>, JsonRejection>` and friends so that a
//! malformed request gets the same JSON error body as every other failure.

use axum::{
    Json,
    extract::{
        Path, Query,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};

use crate::{Error, database_id::DatabaseId};

/// Unwrap a JSON request body or convert the rejection into [Error::InvalidRequestBody].
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Error> {
    body.map(|Json(value)| value)
        .map_err(|rejection| Error::InvalidRequestBody(rejection.body_text()))
}

/// Unwrap a database ID from the request path or convert the rejection into [Error::InvalidId].
pub(crate) fn path_id(path: Result<Path<DatabaseId>, PathRejection>) -> Result<DatabaseId, Error> {
    path.map(|Path(id)| id)
        .map_err(|rejection| Error::InvalidId(rejection.body_text()))
}

/// Unwrap the query parameters or convert the rejection into [Error::InvalidRequestBody].
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, Error> {
    query
        .map(|Query(value)| value)
        .map_err(|rejection| Error::InvalidRequestBody(rejection.body_text()))
}
