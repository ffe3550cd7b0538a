//! Behaviour tests for the generated OpenAPI document.
//!
//! These scenarios verify that error responses reference the schema wrappers
//! from `inbound::http::schemas` and that every record kind exposes its
//! review and reporting paths.
use std::sync::Mutex;

use hr_console::doc::ApiDoc;
use hr_console::test_support::openapi::{get_property, unwrap_object_schema};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use utoipa::OpenApi;

#[derive(Default)]
struct OpenApiWorld {
    document: Option<utoipa::openapi::OpenApi>,
    json: Option<String>,
}

impl std::fmt::Debug for OpenApiWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenApiWorld")
            .field("document", &self.document.as_ref().map(|_| "<OpenApi>"))
            .field("json", &self.json)
            .finish()
    }
}

#[fixture]
fn world() -> Mutex<OpenApiWorld> {
    Mutex::new(OpenApiWorld::default())
}

// utoipa replaces :: with . in schema names
const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
const ERROR_CODE_SCHEMA_NAME: &str = "crate.domain.ErrorCode";

fn with_document<F>(world: &Mutex<OpenApiWorld>, f: F)
where
    F: FnOnce(&utoipa::openapi::OpenApi),
{
    let world = world.lock().expect("world lock");
    f(world.document.as_ref().expect("document generated"));
}

#[given("the OpenAPI document is generated")]
fn generate_openapi_document(world: &Mutex<OpenApiWorld>) {
    let mut world = world.lock().expect("world lock");
    let doc = ApiDoc::openapi();
    world.json = Some(doc.to_json().expect("valid JSON"));
    world.document = Some(doc);
}

#[when("the document is inspected")]
fn inspect_document(world: &Mutex<OpenApiWorld>) {
    let world = world.lock().expect("world lock");
    assert!(world.document.is_some(), "document should be generated");
}

#[then("the error schema wrappers are registered")]
fn error_schema_wrappers_are_registered(world: &Mutex<OpenApiWorld>) {
    with_document(world, |doc| {
        let components = doc.components.as_ref().expect("components present");
        assert!(components.schemas.contains_key(ERROR_SCHEMA_NAME));
        assert!(components.schemas.contains_key(ERROR_CODE_SCHEMA_NAME));
    });
}

#[then("error responses reference the error schema")]
fn error_responses_reference_the_error_schema(world: &Mutex<OpenApiWorld>) {
    let world = world.lock().expect("world lock");
    let json = world.json.as_ref().expect("JSON generated");
    assert!(json.contains(&format!("#/components/schemas/{ERROR_SCHEMA_NAME}")));
}

#[then("the error schema exposes a {field} field")]
fn the_error_schema_exposes_field(world: &Mutex<OpenApiWorld>, field: String) {
    with_document(world, |doc| {
        let components = doc.components.as_ref().expect("components present");
        let schema = components
            .schemas
            .get(ERROR_SCHEMA_NAME)
            .expect("error schema");
        let object = unwrap_object_schema(schema, ERROR_SCHEMA_NAME);
        get_property(object, &field);
    });
}

#[then("the {kind} endpoints include list, detail and decision paths")]
fn record_endpoints_are_documented(world: &Mutex<OpenApiWorld>, kind: String) {
    with_document(world, |doc| {
        let list = format!("/api/v1/{kind}");
        let detail = format!("/api/v1/{kind}/{{id}}");
        let decision = format!("/api/v1/{kind}/{{id}}/decision");
        for path in [&list, &detail, &decision] {
            assert!(doc.paths.paths.contains_key(path), "missing path {path}");
        }
    });
}

#[then("the path {path} is documented")]
fn the_path_is_documented(world: &Mutex<OpenApiWorld>, path: String) {
    with_document(world, |doc| {
        assert!(doc.paths.paths.contains_key(&path), "missing path {path}");
    });
}

#[then("the session cookie security scheme is declared")]
fn the_session_cookie_scheme_is_declared(world: &Mutex<OpenApiWorld>) {
    with_document(world, |doc| {
        let components = doc.components.as_ref().expect("components present");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    });
}

#[scenario(
    path = "tests/features/openapi_schemas.feature",
    name = "Error responses use the shared schema wrappers"
)]
fn error_responses_use_the_shared_schema_wrappers(world: Mutex<OpenApiWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/openapi_schemas.feature",
    name = "Request records expose their review paths"
)]
fn request_records_expose_their_review_paths(world: Mutex<OpenApiWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/openapi_schemas.feature",
    name = "Reporting endpoints are documented"
)]
fn reporting_endpoints_are_documented(world: Mutex<OpenApiWorld>) {
    drop(world);
}
