#![allow(clippy::unwrap_used)]

use apigen::runtime::{ApiRequest, ApiResponse, HttpService, StatusCode};
use profile_service::{CreateParams, MyApi, OtherApi};

fn body(resp: &ApiResponse) -> &str {
    std::str::from_utf8(resp.body()).unwrap()
}

fn assert_response(resp: &ApiResponse, status: u16, expected: &str) {
    assert_eq!(resp.status().as_u16(), status, "body: {}", body(resp));
    assert_eq!(body(resp), expected);
    assert_eq!(resp.headers()["content-type"], "application/json");
}

fn create(form: &str) -> ApiRequest {
    ApiRequest::post("/user/create")
        .with_header("X-Auth", "100500")
        .with_form_body(form)
}

const RVASILY: &str =
    r#"{"response":{"id":42,"login":"rvasily","full_name":"Vasily Romanov","status":20},"error":""}"#;

#[test]
fn test_profile_get_and_post() {
    let api = MyApi::new();
    assert_response(&api.serve_http(&ApiRequest::get("/user/profile?login=rvasily")), 200, RVASILY);
    let post = ApiRequest::post("/user/profile").with_form_body("login=rvasily");
    assert_response(&api.serve_http(&post), 200, RVASILY);
}

#[test]
fn test_required_field_on_get_and_post() {
    let api = MyApi::new();
    let expected = r#"{"error":"login must not be empty"}"#;
    assert_response(&api.serve_http(&ApiRequest::get("/user/profile")), 400, expected);
    assert_response(&api.serve_http(&ApiRequest::post("/user/profile")), 400, expected);
    assert_response(&api.serve_http(&ApiRequest::get("/user/profile?login=")), 400, expected);
}

#[test]
fn test_business_errors_are_mapped() {
    let api = MyApi::new();
    assert_response(
        &api.serve_http(&ApiRequest::get("/user/profile?login=nobody")),
        404,
        r#"{"error":"user not exist"}"#,
    );
    assert_response(
        &api.serve_http(&ApiRequest::get("/user/profile?login=bad_user")),
        500,
        r#"{"error":"bad user"}"#,
    );
}

#[test]
fn test_unknown_path() {
    let api = MyApi::new();
    let expected = r#"{"error":"unknown method"}"#;
    assert_response(&api.serve_http(&ApiRequest::get("/user/unknown")), 404, expected);
    // Exact match only: no prefixes, no trailing slash
    assert_response(&api.serve_http(&ApiRequest::get("/user/profile/")), 404, expected);
    assert_response(&api.serve_http(&ApiRequest::get("/user")), 404, expected);
}

#[test]
fn test_create_method_and_credential_gates() {
    let api = MyApi::new();
    assert_response(
        &api.serve_http(&ApiRequest::get("/user/create?login=someone")),
        406,
        r#"{"error":"bad method"}"#,
    );
    let unauthorized = r#"{"error":"unauthorized"}"#;
    let no_header = ApiRequest::post("/user/create").with_form_body("login=someone");
    assert_response(&api.serve_http(&no_header), 403, unauthorized);
    let wrong = ApiRequest::post("/user/create")
        .with_header("X-Auth", "123")
        .with_form_body("login=someone");
    assert_response(&api.serve_http(&wrong), 403, unauthorized);
}

#[test]
fn test_method_gate_runs_before_credential_check() {
    let api = MyApi::new();
    let req = ApiRequest::get("/user/create").with_header("X-Auth", "wrong");
    assert_eq!(api.serve_http(&req).status(), StatusCode::NOT_ACCEPTABLE);
}

#[test]
fn test_create_success_then_profile() {
    let api = MyApi::new();
    let resp = api.serve_http(&create(
        "login=mr.moderator&age=32&status=moderator&full_name=Ivan_Ivanov",
    ));
    assert_response(&resp, 200, r#"{"response":{"id":43},"error":""}"#);

    let resp = api.serve_http(&ApiRequest::get("/user/profile?login=mr.moderator"));
    assert_response(
        &resp,
        200,
        r#"{"response":{"id":43,"login":"mr.moderator","full_name":"Ivan_Ivanov","status":10},"error":""}"#,
    );
}

#[test]
fn test_create_existing_user_conflicts() {
    let api = MyApi::new();
    assert_response(
        &api.serve_http(&create("login=rvasily&age=32")),
        409,
        r#"{"error":"user rvasily exist"}"#,
    );
}

#[test]
fn test_create_unmapped_error_is_hidden() {
    let api = MyApi::new();
    assert_response(
        &api.serve_http(&create("login=bad_username")),
        500,
        r#"{"error":"internal server error"}"#,
    );
}

#[test]
fn test_create_string_checks() {
    let api = MyApi::new();
    assert_response(
        &api.serve_http(&create("age=32")),
        400,
        r#"{"error":"login must not be empty"}"#,
    );
    assert_response(
        &api.serve_http(&create("login=ab")),
        400,
        r#"{"error":"login len must be >= 3"}"#,
    );
    assert_eq!(api.serve_http(&create("login=abcd")).status(), StatusCode::OK);
}

#[test]
fn test_create_enum_and_default() {
    let api = MyApi::new();
    assert_response(
        &api.serve_http(&create("login=new_user&status=root")),
        400,
        r#"{"error":"status must be one of [user, moderator, admin]"}"#,
    );

    assert_eq!(api.serve_http(&create("login=plain_user")).status(), StatusCode::OK);
    let profile = api.serve_http(&ApiRequest::get("/user/profile?login=plain_user"));
    let value: serde_json::Value = serde_json::from_str(body(&profile)).unwrap();
    // empty status falls back to "user"
    assert_eq!(value["response"]["status"], 0);
}

#[test]
fn test_create_integer_checks() {
    let api = MyApi::new();
    assert_response(
        &api.serve_http(&create("login=old_user&age=200")),
        400,
        r#"{"error":"age must be <= 128"}"#,
    );
    assert_response(
        &api.serve_http(&create("login=young_user&age=-1")),
        400,
        r#"{"error":"age must be >= 0"}"#,
    );
    assert_response(
        &api.serve_http(&create("login=odd_user&age=abc")),
        400,
        r#"{"error":"age must be int"}"#,
    );
    assert_eq!(
        api.serve_http(&create("login=fine_user&age=50")).status(),
        StatusCode::OK
    );
}

#[test]
fn test_create_reads_query_after_form_body() {
    let api = MyApi::new();
    let req = ApiRequest::post("/user/create?age=200")
        .with_header("X-Auth", "100500")
        .with_form_body("login=query_user");
    assert_response(&api.serve_http(&req), 400, r#"{"error":"age must be <= 128"}"#);
}

#[test]
fn test_alias_fallback_lowercases_primary_value() {
    let api = MyApi::new();
    assert_eq!(
        api.serve_http(&create("login=alias_user&name=Ivan")).status(),
        StatusCode::OK
    );
    let profile = api.serve_http(&ApiRequest::get("/user/profile?login=alias_user"));
    let value: serde_json::Value = serde_json::from_str(body(&profile)).unwrap();
    assert_eq!(value["response"]["full_name"], "ivan");
}

#[test]
fn test_search_query_checks() {
    let api = MyApi::new();
    let cases = [
        ("limit=0", "limit must be >= 1"),
        ("limit=101", "limit must be <= 100"),
        ("limit=ten", "limit must be int"),
        ("role=root", "role must be one of [user, moderator, admin]"),
        ("prefix=rvasily_the_first", "prefix len must be <= 8"),
    ];
    for (query, message) in cases {
        let resp = api.serve_http(&ApiRequest::get(&format!("/user/search?{query}")));
        assert_response(&resp, 400, &format!(r#"{{"error":"{message}"}}"#));
    }
}

#[test]
fn test_search_defaults_and_success() {
    let api = MyApi::new();
    // role falls back to "user", limit to 10
    assert_response(
        &api.serve_http(&ApiRequest::get("/user/search")),
        200,
        r#"{"response":{"users":[]},"error":""}"#,
    );
    assert_response(
        &api.serve_http(&ApiRequest::get("/user/search?role=admin&prefix=rv&limit=1")),
        200,
        r#"{"response":{"users":[{"id":42,"login":"rvasily","full_name":"Vasily Romanov","status":20}]},"error":""}"#,
    );
}

#[test]
fn test_search_reads_form_on_post() {
    let api = MyApi::new();
    let req = ApiRequest::post("/user/search").with_form_body("limit=500");
    assert_response(&api.serve_http(&req), 400, r#"{"error":"limit must be <= 100"}"#);
    let req = ApiRequest::post("/user/search?limit=0").with_form_body("role=admin");
    assert_response(&api.serve_http(&req), 400, r#"{"error":"limit must be >= 1"}"#);
}

#[test]
fn test_other_api_create() {
    let api = OtherApi;
    assert_response(
        &api.serve_http(&create("username=tony&account_name=Tony&class=sorcerer&level=7")),
        200,
        r#"{"response":{"id":12,"login":"tony","full_name":"Tony","level":7},"error":""}"#,
    );
    assert_response(
        &api.serve_http(&create("username=tony&class=knight&level=7")),
        400,
        r#"{"error":"class must be one of [warrior, sorcerer, rouge]"}"#,
    );
    // absent integer binds as zero and still meets the bounds check
    assert_response(
        &api.serve_http(&create("username=tony")),
        400,
        r#"{"error":"level must be >= 1"}"#,
    );
    assert_response(
        &api.serve_http(&ApiRequest::get("/user/profile")),
        404,
        r#"{"error":"unknown method"}"#,
    );
}

#[test]
fn test_services_behind_trait_objects() {
    let services: Vec<Box<dyn HttpService>> = vec![Box::new(MyApi::new()), Box::new(OtherApi)];
    for service in &services {
        let resp = service.serve_http(&ApiRequest::get("/nowhere"));
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

#[test]
fn test_serve_raw_http_request() {
    let api = MyApi::new();
    let req = http::Request::builder()
        .method("POST")
        .uri("/user/create")
        .header("content-type", "application/x-www-form-urlencoded")
        .header("x-auth", "100500")
        .body("login=http_user&age=20")
        .unwrap();
    let resp = api.serve_request(&req);
    assert_response(&resp, 200, r#"{"response":{"id":43},"error":""}"#);
}

#[test]
fn test_generated_params_struct() {
    let params = CreateParams {
        login: "x".to_string(),
        ..Default::default()
    };
    assert_eq!(params.age, 0);
    assert!(params.status.is_empty());
}
