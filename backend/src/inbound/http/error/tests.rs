//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use actix_web::http::header::HeaderMap;
use actix_web::App;
use rstest::{fixture, rstest};
use serde::Deserialize;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn payload_of(error: &Error) -> (StatusCode, HeaderMap, Error) {
    let response = error.error_response();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body()).await.expect("read body");
    let payload: Error = serde_json::from_slice(&bytes).expect("error payload");
    (status, headers, payload)
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("manager role required"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("no such advance"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("already decided"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("store offline"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn codes_map_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
    assert_eq!(error.status_code(), expected);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("store mutex poisoned")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "store": "advances" }));

    let (status, head, payload) = payload_of(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload.message(), "Internal server error");
    assert_eq!(payload.trace_id(), Some(expected_trace_id.as_str()));
    assert_eq!(payload.details(), None);
    assert_eq!(
        head.get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );
}

#[rstest]
#[actix_web::test]
async fn conflicts_keep_their_details() {
    let error = Error::conflict("cannot approve a approved advance request")
        .with_details(json!({ "status": "approved", "action": "approve" }));

    let (status, head, payload) = payload_of(&error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(payload.code(), ErrorCode::Conflict);
    assert_eq!(
        payload.details(),
        Some(&json!({ "status": "approved", "action": "approve" }))
    );
    assert!(head.get(TRACE_ID_HEADER).is_none());
}

#[rstest]
#[actix_web::test]
async fn unavailable_stores_ask_clients_to_retry() {
    let (status, head, payload) =
        payload_of(&Error::service_unavailable("advances store is offline")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(payload.message(), "advances store is offline");
    assert_eq!(
        head.get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok()),
        Some("5")
    );
}

#[test]
fn actix_errors_become_redacted_internal_errors() {
    let err: Error = error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[derive(Deserialize)]
struct Amount {
    #[expect(dead_code, reason = "only deserialised")]
    amount: u32,
}

async fn echo_body(_payload: web::Json<Amount>) -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn echo_query(_query: web::Query<Amount>) -> HttpResponse {
    HttpResponse::NoContent().finish()
}

#[rstest]
#[case("/body", true, "malformed_body")]
#[case("/query?amount=lots", false, "malformed_query")]
#[actix_web::test]
async fn malformed_payloads_use_the_error_body(
    #[case] uri: &str,
    #[case] send_body: bool,
    #[case] detail_code: &str,
) {
    let app = actix_web::test::init_service(
        App::new()
            .app_data(json_config())
            .app_data(query_config())
            .route("/body", web::post().to(echo_body))
            .route("/query", web::get().to(echo_query)),
    )
    .await;
    let request = if send_body {
        actix_web::test::TestRequest::post()
            .uri(uri)
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload("{\"amount\":")
    } else {
        actix_web::test::TestRequest::get().uri(uri)
    };

    let response = actix_web::test::call_service(&app, request.to_request()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Error = actix_web::test::read_body_json(response).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.details(), Some(&json!({ "code": detail_code })));
}
