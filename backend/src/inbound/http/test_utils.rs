//! Test helpers for inbound HTTP components.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use chrono::{TimeZone, Utc};
use serde_json::json;

use crate::inbound::http::state::HttpState;
use crate::outbound::memory::ConsoleStores;
use crate::test_support::MutableClock;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Stores, clock and state for one handler test.
pub struct FixtureConsole {
    pub stores: ConsoleStores,
    pub clock: Arc<MutableClock>,
    pub state: HttpState,
}

/// Zero-latency stores holding the login account employees, with the clock
/// pinned to 2026-05-04 09:00 UTC.
pub fn fixture_console() -> FixtureConsole {
    let stores =
        ConsoleStores::with_account_employees(Duration::ZERO).expect("fixture employees");
    let now = Utc
        .with_ymd_and_hms(2026, 5, 4, 9, 0, 0)
        .single()
        .expect("fixture time");
    let clock = Arc::new(MutableClock::new(now));
    let state = HttpState::in_memory(&stores, clock.clone());
    FixtureConsole {
        stores,
        clock,
        state,
    }
}

/// Log in through `POST /api/v1/login` and return the session cookie.
pub async fn login_cookie<S, B>(app: &S, username: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK, "login as {username}");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
