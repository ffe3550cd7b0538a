//! Liveness and readiness probes for orchestrators and load balancers.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};

/// Readiness and liveness flags shared by the probe handlers.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Start live but not ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service ready once the stores are seeded and the listener is bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness so orchestrators stop routing during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn probe_response(probe_ok: bool) -> HttpResponse {
        let mut response = if probe_ok {
            HttpResponse::Ok()
        } else {
            HttpResponse::ServiceUnavailable()
        };

        response
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .finish()
    }
}

/// Readiness probe. 200 once the console can serve traffic, else 503.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic"),
        (status = 503, description = "Server is not ready")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_ready())
}

/// Liveness probe. 200 while alive, 503 once draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    HealthState::probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    #[rstest]
    #[case(false, true, "/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[case(true, true, "/health/ready", StatusCode::OK)]
    #[case(false, true, "/health/live", StatusCode::OK)]
    #[case(true, false, "/health/live", StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn probes_follow_the_flags(
        #[case] ready_flag: bool,
        #[case] live_flag: bool,
        #[case] uri: &str,
        #[case] expected: StatusCode,
    ) {
        let state = web::Data::new(HealthState::new());
        if ready_flag {
            state.mark_ready();
        }
        if !live_flag {
            state.mark_unhealthy();
        }
        let app =
            test::init_service(App::new().app_data(state).service(ready).service(live)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

        assert_eq!(res.status(), expected);
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|value| value.to_str().ok()),
            Some("no-store")
        );
    }
}
