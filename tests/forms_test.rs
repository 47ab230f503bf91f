use std::env;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use jobboard_backend::{
    database::pool::{connect, run_migrations},
    routes,
    utils::time::FixedClock,
    AppState,
};
use tower::ServiceExt;
use uuid::Uuid;

async fn setup() -> Option<Router> {
    dotenvy::dotenv().ok();
    let Ok(url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };
    let pool = connect(&url, 5).await.expect("pool");
    run_migrations(&pool).await.expect("migrations");

    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap(),
    ));
    Some(routes::router(AppState::with_clock(pool, clock), 10_000))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    read(app.clone().oneshot(req).await.unwrap()).await
}

async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, String, Option<String>) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let location = res
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let (status, text) = read(res).await;
    (status, text, location)
}

async fn read(res: axum::response::Response) -> (StatusCode, String) {
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

fn company_form(name: &str, email: &str) -> String {
    format!(
        "name={name}&description=&website=&email={email}&phone=&industry=IT&address=&size="
    )
}

async fn company_id_by_name(app: &Router, name: &str) -> String {
    let (status, body) = get(app, &format!("/api/companies?search={name}")).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    json["items"][0]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn index_links_to_lists() {
    let Some(app) = setup().await else { return };
    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/vacancies\""));
    assert!(body.contains("href=\"/companies\""));
}

#[tokio::test]
async fn company_form_rerenders_errors_and_redirects_on_success() {
    let Some(app) = setup().await else { return };
    let name = format!("Formco{}", Uuid::new_v4().simple());

    let (status, body, _) = post_form(&app, "/companies/add", &company_form(&name, "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Enter a valid email address"));
    assert!(body.contains(&format!("value=\"{name}\"")));

    let (status, _, location) =
        post_form(&app, "/companies/add", &company_form(&name, "hr%40formco.test")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/companies"));

    let id = company_id_by_name(&app, &name).await;
    let (status, body) = get(&app, &format!("/companies/{id}/edit")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("hr@formco.test"));

    let (status, body) = get(&app, &format!("/companies/{id}/delete")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("method=\"post\""));

    let (status, _, location) = post_form(&app, &format!("/companies/{id}/delete"), "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/companies"));
}

#[tokio::test]
async fn vacancy_form_keeps_values_on_rejection() {
    let Some(app) = setup().await else { return };
    let name = format!("Vacco{}", Uuid::new_v4().simple());
    let (status, _, _) =
        post_form(&app, "/companies/add", &company_form(&name, "hr%40vacco.test")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let company = company_id_by_name(&app, &name).await;

    let (status, body) = get(&app, "/vacancies/add").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&company));

    let fields = |salary: &str| {
        format!(
            "company={company}&title=Night+porter&requirements=&description=Keys+and+doors&salary={salary}&employment_type=part_time&schedule=&location=&status=active&published_at=2026-06-01T08%3A00&closed_at="
        )
    };

    let (status, body, _) = post_form(&app, "/vacancies/add", &fields("0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Salary must be a positive number"));
    assert!(body.contains("value=\"Night porter\""));
    assert!(body.contains("<option value=\"part_time\" selected>"));

    let (status, body, _) = post_form(&app, "/vacancies/add", &fields("abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Enter a whole number"));

    let (status, _, location) = post_form(&app, "/vacancies/add", &fields("45000")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/vacancies"));

    let (status, body) = get(&app, &format!("/api/vacancies?company={company}")).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["total"], 1);
    let id = json["items"][0]["id"].as_str().unwrap().to_string();

    let (status, body, _) = post_form(&app, &format!("/vacancies/{id}/edit"), &fields("-5")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Salary must be a positive number"));

    let (status, _, location) =
        post_form(&app, &format!("/vacancies/{id}/edit"), &fields("47000")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/vacancies"));

    let (status, body) = get(&app, "/vacancies?ordering=-salary").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<table>"));
}
