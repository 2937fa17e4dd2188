//! Header/data response envelope shared by every account endpoint.
//!
//! ```text
//! {"header":{"statusCode":200,"messages":["Successfully Login!"],"successful":true},
//!  "data":{"id":1,"jwt":"..."}}
//! ```
//!
//! `statusCode` is an application code, not the HTTP status: 200 on success,
//! 422 for rule violations, 401 for session failures and 500 otherwise.

use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ErrorCode;

/// Application status code for a successful call.
pub const SUCCESS_CODE: u16 = 200;
/// Application status code for validation and conflict failures.
pub const VALIDATION_ERROR_CODE: u16 = 422;
/// Application status code for session failures.
pub const AUTHORIZATION_ERROR_CODE: u16 = 401;
/// Application status code for everything else.
pub const GENERIC_ERROR_CODE: u16 = 500;

/// Outcome summary carried by every response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseHeader {
    #[schema(example = 200)]
    pub status_code: u16,
    #[schema(example = json!(["Successfully Login!"]))]
    pub messages: Vec<String>,
    pub successful: bool,
}

impl ResponseHeader {
    /// Header for a successful call with a single message.
    pub fn success(message: &str) -> Self {
        Self {
            status_code: SUCCESS_CODE,
            messages: vec![message.to_owned()],
            successful: true,
        }
    }

    /// Header for a failed call.
    pub fn failure(code: ErrorCode, messages: Vec<String>) -> Self {
        Self {
            status_code: application_code(code),
            messages,
            successful: false,
        }
    }
}

/// Response body: a header plus payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    pub header: ResponseHeader,
    pub data: T,
}

impl<T: Serialize> Envelope<T> {
    /// 200 response carrying `data`.
    pub fn ok(message: &str, data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            header: ResponseHeader::success(message),
            data,
        })
    }
}

/// Response body that carries no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HeaderOnly {
    pub header: ResponseHeader,
}

impl HeaderOnly {
    /// 200 response with a header only.
    pub fn ok(message: &str) -> HttpResponse {
        HttpResponse::Ok().json(Self {
            header: ResponseHeader::success(message),
        })
    }

    /// Failure body for `code`.
    pub fn failure(code: ErrorCode, messages: Vec<String>) -> Self {
        Self {
            header: ResponseHeader::failure(code, messages),
        }
    }
}

fn application_code(code: ErrorCode) -> u16 {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::Conflict => VALIDATION_ERROR_CODE,
        ErrorCode::Forbidden => AUTHORIZATION_ERROR_CODE,
        ErrorCode::InvalidRequest | ErrorCode::InternalError => GENERIC_ERROR_CODE,
    }
}
