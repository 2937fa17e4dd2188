//! Tests for HTTP error mapping.

use super::*;
use crate::inbound::http::envelope::ResponseHeader;
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("Bad request"), StatusCode::BAD_REQUEST)]
#[case(Error::validation("Wrong password"), StatusCode::BAD_REQUEST)]
#[case(Error::forbidden("Unauthorized"), StatusCode::FORBIDDEN)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn render(error: &Error) -> (StatusCode, Option<String>, HeaderOnly) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("Trace-Id is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("envelope deserialises");
    (status, trace_id, body)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("find_by_phone failed: connection reset")
        .with_trace_id(expected_trace_id.clone());

    let (status, trace_id, body) = render(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(trace_id, Some(expected_trace_id));
    assert_eq!(
        body.header,
        ResponseHeader {
            status_code: 500,
            messages: vec!["Internal Server Error".to_owned()],
            successful: false,
        }
    );
}

#[rstest]
#[actix_web::test]
async fn validation_errors_keep_every_message() {
    let error = Error::validation_messages(vec!["first".to_owned(), "second".to_owned()]);

    let (status, trace_id, body) = render(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(trace_id.is_none());
    assert_eq!(body.header.status_code, 422);
    assert_eq!(body.header.messages, ["first", "second"]);
}

#[rstest]
#[actix_web::test]
async fn session_errors_use_authorization_code() {
    let (status, _, body) = render(&Error::forbidden("Session is expired")).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body.header.status_code, 401);
    assert_eq!(body.header.messages, ["Session is expired"]);
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.messages(), ["Internal Server Error"]);
    assert_eq!(err.trace_id(), None);
}
