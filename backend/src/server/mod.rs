//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

pub use config::{ServerConfig, ServerSettings};

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

use hr_console::Trace;
#[cfg(debug_assertions)]
use hr_console::doc::ApiDoc;
use hr_console::inbound::http::configure_api;
use hr_console::inbound::http::health::{HealthState, live, ready};
use hr_console::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(8)),
        )
        .build();

    let api = web::scope("/api/v1").wrap(session).configure(configure_api);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket, registering
/// metrics or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        stores,
    } = config;
    let http_state = web::Data::new(HttpState::in_memory(&stores, Arc::new(DefaultClock)));

    #[cfg(feature = "metrics")]
    let prometheus = {
        let (prometheus, gauges) = metrics::build_metrics()?;
        metrics::spawn_store_gauge_refresh(gauges, Arc::new(stores.clone()));
        prometheus
    };

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use hr_console::outbound::memory::ConsoleStores;
    use serde_json::{Value, json};

    use super::*;

    fn dependencies() -> AppDependencies {
        let stores = ConsoleStores::with_account_employees(Duration::ZERO).expect("stores");
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::in_memory(&stores, Arc::new(DefaultClock))),
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }
    }

    #[actix_web::test]
    async fn responses_carry_a_trace_id_header() {
        let app = test::init_service(build_app(dependencies())).await;

        let response = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/me").to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key("trace-id"));
    }

    #[actix_web::test]
    async fn readiness_follows_the_health_state() {
        let deps = dependencies();
        let health = deps.health_state.clone();
        let app = test::init_service(build_app(deps)).await;

        let before = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        health.mark_ready();
        let after = test::call_service(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;

        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(after.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn session_survives_between_requests() {
        let app = test::init_service(build_app(dependencies())).await;
        let login = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/login")
                .set_json(json!({ "username": "employee", "password": "employee" }))
                .to_request(),
        )
        .await;
        let cookie = login
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned();

        let me: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(me["employeeId"], "EMP-0003");
    }
}
