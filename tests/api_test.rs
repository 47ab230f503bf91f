use std::env;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use jobboard_backend::{
    database::pool::{connect, run_migrations},
    routes,
    utils::time::FixedClock,
    AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    clock: Arc<FixedClock>,
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
}

async fn setup() -> Option<TestApp> {
    dotenvy::dotenv().ok();
    let Ok(url) = env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };
    let pool = connect(&url, 5).await.expect("pool");
    run_migrations(&pool).await.expect("migrations");

    let clock = Arc::new(FixedClock::new(fixed_now()));
    let state = AppState::with_clock(pool, clock.clone());
    Some(TestApp {
        router: routes::router(state, 10_000),
        clock,
    })
}

impl TestApp {
    async fn send(&self, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
        };
        (status, json)
    }

    async fn create(&self, uri: &str, body: JsonValue) -> JsonValue {
        let (status, json) = self.send("POST", uri, Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "POST {uri}: {json}");
        json
    }

    async fn company(&self, industry: &str) -> String {
        let json = self
            .create(
                "/api/companies",
                json!({
                    "name": format!("Acme {}", Uuid::new_v4()),
                    "email": "jobs@acme.test",
                    "industry": industry,
                }),
            )
            .await;
        json["id"].as_str().unwrap().to_string()
    }

    async fn vacancy(&self, company: &str, extra: JsonValue) -> JsonValue {
        let mut body = json!({
            "company": company,
            "title": "Junior developer",
            "description": "Build and ship features",
            "salary": 60000,
        });
        if let (Some(target), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                target.insert(k.clone(), v.clone());
            }
        }
        self.create("/api/vacancies", body).await
    }

    async fn student(&self, course: i64) -> String {
        let json = self
            .create(
                "/api/students",
                json!({
                    "first_name": "Ada",
                    "last_name": format!("Lovelace{}", course),
                    "email": format!("{}@uni.test", Uuid::new_v4()),
                    "birth_date": "2004-02-01",
                    "course": course,
                    "specialty": "Computer science",
                }),
            )
            .await;
        json["id"].as_str().unwrap().to_string()
    }

    async fn resume(&self, student: &str, active: bool) -> String {
        let status = if active { "active" } else { "draft" };
        let json = self
            .create(
                "/api/resumes",
                json!({
                    "student": student,
                    "experience": "Two internships",
                    "contacts": "ada@uni.test",
                    "status": status,
                }),
            )
            .await;
        json["id"].as_str().unwrap().to_string()
    }

    async fn apply(&self, student: &str, vacancy: &str, resume: &str) -> (StatusCode, JsonValue) {
        self.send(
            "POST",
            "/api/applications",
            Some(json!({ "student": student, "vacancy": vacancy, "resume": resume })),
        )
        .await
    }
}

fn ids(list: &JsonValue) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn health_reports_ok() {
    let Some(app) = setup().await else { return };
    let (status, json) = app.send("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn vacancy_salary_must_be_positive() {
    let Some(app) = setup().await else { return };
    let company = app.company("Retail").await;

    let (status, json) = app
        .send(
            "POST",
            "/api/vacancies",
            Some(json!({
                "company": company,
                "title": "Cashier",
                "description": "Front desk",
                "salary": 0,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["salary"][0], "Salary must be a positive number");

    let created = app.vacancy(&company, json!({ "salary": 50000 })).await;
    assert_eq!(created["salary"], 50000);
    assert_eq!(created["status"], "draft");
    assert_eq!(created["employment_type"], "full_time");
}

#[tokio::test]
async fn vacancy_dates_are_validated_against_the_clock() {
    let Some(app) = setup().await else { return };
    let company = app.company("Retail").await;
    let future = (fixed_now() + Duration::days(1)).to_rfc3339();

    let (status, json) = app
        .send(
            "POST",
            "/api/vacancies",
            Some(json!({
                "company": company,
                "title": "Cashier",
                "description": "Front desk",
                "salary": 1000,
                "published_at": future,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["published_at"].is_array());

    let vacancy = app.vacancy(&company, json!({})).await;
    let id = vacancy["id"].as_str().unwrap();
    let before = (fixed_now() - Duration::days(3)).to_rfc3339();
    let (status, json) = app
        .send(
            "PATCH",
            &format!("/api/vacancies/{id}"),
            Some(json!({ "closed_at": before })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["closed_at"].is_array());
}

#[tokio::test]
async fn closing_twice_advances_closed_at() {
    let Some(app) = setup().await else { return };
    let company = app.company("Logistics").await;
    let vacancy = app.vacancy(&company, json!({ "status": "active" })).await;
    let id = vacancy["id"].as_str().unwrap();

    let (status, first) = app.send("POST", &format!("/api/vacancies/{id}/close"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "closed");

    app.clock.advance(Duration::hours(2));
    let (status, second) = app.send("POST", &format!("/api/vacancies/{id}/close"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["status"], "closed");

    let t1: DateTime<Utc> = first["closed_at"].as_str().unwrap().parse().unwrap();
    let t2: DateTime<Utc> = second["closed_at"].as_str().unwrap().parse().unwrap();
    assert!(t2 > t1);
}

#[tokio::test]
async fn complex_vacancy_combines_both_branches() {
    let Some(app) = setup().await else { return };
    let retail = app.company("Retail").await;
    let it = app.company("it").await;

    let this_year = app.vacancy(&retail, json!({ "status": "active" })).await;
    let last_year = app
        .vacancy(
            &it,
            json!({
                "salary": 200000,
                "status": "closed",
                "published_at": "2025-03-01T09:00:00Z",
                "closed_at": "2025-04-01T09:00:00Z",
            }),
        )
        .await;
    let excluded = app
        .vacancy(
            &retail,
            json!({ "salary": 200000, "published_at": "2025-03-01T09:00:00Z" }),
        )
        .await;

    let (status, list) = app.send("GET", "/api/vacancies/complex_vacancy", None).await;
    assert_eq!(status, StatusCode::OK);
    let found = ids(&list);
    assert!(found.contains(&this_year["id"].as_str().unwrap().to_string()));
    assert!(found.contains(&last_year["id"].as_str().unwrap().to_string()));
    assert!(!found.contains(&excluded["id"].as_str().unwrap().to_string()));

    let mut sorted = found.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(sorted.len(), found.len());
}

#[tokio::test]
async fn application_requires_an_active_resume_and_no_duplicates() {
    let Some(app) = setup().await else { return };
    let company = app.company("IT").await;
    let vacancy = app.vacancy(&company, json!({ "status": "active" })).await;
    let vacancy = vacancy["id"].as_str().unwrap();
    let student = app.student(3).await;
    let resume = app.resume(&student, false).await;

    let (status, json) = app.apply(&student, vacancy, &resume).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["resume"][0], "An active resume is required to apply");

    let (status, activated) = app
        .send("POST", &format!("/api/resumes/{resume}/resume_activate"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(activated["status"], "active");

    let (status, first) = app.apply(&student, vacancy, &resume).await;
    assert_eq!(status, StatusCode::CREATED, "{first}");
    assert_eq!(first["status"], "sent");

    let (status, json) = app.apply(&student, vacancy, &resume).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["fields"]["vacancy"][0],
        "This student has already applied to this vacancy"
    );

    let first_id = first["id"].as_str().unwrap();
    let (status, withdrawn) = app
        .send("POST", &format!("/api/applications/{first_id}/withdraw"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(withdrawn["status"], "withdrawn");

    let (status, _) = app.apply(&student, vacancy, &resume).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn application_rejects_resume_of_another_student() {
    let Some(app) = setup().await else { return };
    let company = app.company("IT").await;
    let vacancy = app.vacancy(&company, json!({})).await;
    let owner = app.student(2).await;
    let other = app.student(2).await;
    let resume = app.resume(&owner, true).await;

    let (status, json) = app
        .apply(&other, vacancy["id"].as_str().unwrap(), &resume)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["fields"]["resume"][0],
        "The selected resume belongs to another student"
    );

    let (status, json) = app
        .send(
            "POST",
            "/api/applications",
            Some(json!({ "student": other, "vacancy": vacancy["id"] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["resume"][0], "A resume is required to apply");
}

#[tokio::test]
async fn student_statistics_and_my_applications() {
    let Some(app) = setup().await else { return };
    let company = app.company("IT").await;
    let student = app.student(4).await;
    let resume = app.resume(&student, true).await;

    let mut application_ids = Vec::new();
    for _ in 0..3 {
        let vacancy = app.vacancy(&company, json!({})).await;
        let (status, created) = app
            .apply(&student, vacancy["id"].as_str().unwrap(), &resume)
            .await;
        assert_eq!(status, StatusCode::CREATED);
        application_ids.push(created["id"].as_str().unwrap().to_string());
        app.clock.advance(Duration::minutes(1));
    }

    let (status, _) = app
        .send(
            "PATCH",
            &format!("/api/applications/{}", application_ids[0]),
            Some(json!({ "status": "invited" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .send(
            "PUT",
            &format!("/api/applications/{}", application_ids[1]),
            Some(json!({ "status": "rejected", "employer_comment": "Position filled" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, stats) = app
        .send("GET", &format!("/api/students/{student}/applications_statistics"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({ "total_sent": 3, "invited": 1, "rejected": 1, "accepted": 0 })
    );

    let (status, mine) = app
        .send("GET", &format!("/api/applications/my_applications?student={student}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let found = ids(&mine);
    assert_eq!(found.len(), 3);
    assert_eq!(found[0], application_ids[2]);

    let (status, json) = app.send("GET", "/api/applications/my_applications", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["student"].is_array());

    let (status, _) = app
        .send(
            "GET",
            &format!("/api/applications/my_applications?student={}", Uuid::new_v4()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            "GET",
            &format!("/api/students/{}/applications_statistics", Uuid::new_v4()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn complex_student_filter() {
    let Some(app) = setup().await else { return };
    let company = app.company("IT").await;
    let vacancy = app.vacancy(&company, json!({})).await;
    let vacancy = vacancy["id"].as_str().unwrap();

    let senior_with_resume = app.student(3).await;
    app.resume(&senior_with_resume, true).await;

    let senior_draft_only = app.student(4).await;
    app.resume(&senior_draft_only, false).await;

    let second_year_applicant = app.student(2).await;
    let resume = app.resume(&second_year_applicant, true).await;
    let (status, _) = app.apply(&second_year_applicant, vacancy, &resume).await;
    assert_eq!(status, StatusCode::CREATED);

    let first_year_applicant = app.student(1).await;
    let resume = app.resume(&first_year_applicant, true).await;
    let (status, _) = app.apply(&first_year_applicant, vacancy, &resume).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, list) = app.send("GET", "/api/students/complex_filter", None).await;
    assert_eq!(status, StatusCode::OK);
    let found = ids(&list);
    assert!(found.contains(&senior_with_resume));
    assert!(found.contains(&second_year_applicant));
    assert!(!found.contains(&senior_draft_only));
    assert!(!found.contains(&first_year_applicant));
}

#[tokio::test]
async fn student_rules_and_unique_email() {
    let Some(app) = setup().await else { return };
    let email = format!("{}@uni.test", Uuid::new_v4());
    let body = json!({
        "first_name": "Grace",
        "last_name": "Hopper",
        "email": email,
        "birth_date": "2003-12-09",
        "course": 7,
        "specialty": "Mathematics",
    });
    let (status, json) = app.send("POST", "/api/students", Some(body.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["course"].is_array());

    let mut ok = body.clone();
    ok["course"] = json!(2);
    app.create("/api/students", ok.clone()).await;
    let (status, _) = app.send("POST", "/api/students", Some(ok)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let mut unborn = body;
    unborn["course"] = json!(1);
    unborn["email"] = json!(format!("{}@uni.test", Uuid::new_v4()));
    unborn["birth_date"] = json!("2026-06-16");
    let (status, json) = app.send("POST", "/api/students", Some(unborn)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["birth_date"].is_array());
}

#[tokio::test]
async fn lists_filter_order_and_paginate() {
    let Some(app) = setup().await else { return };
    let company = app.company("Energy").await;
    for salary in [30000, 90000, 60000] {
        app.vacancy(&company, json!({ "salary": salary })).await;
    }

    let (status, page) = app
        .send(
            "GET",
            &format!("/api/vacancies?company={company}&ordering=-salary&per_page=2"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 3);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["items"][0]["salary"], 90000);
    assert_eq!(page["items"][1]["salary"], 60000);

    let (status, page) = app
        .send(
            "GET",
            &format!("/api/vacancies?company={company}&ordering=salary&page=2&per_page=2"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["items"][0]["salary"], 90000);

    let (status, json) = app
        .send("GET", "/api/vacancies?ordering=title", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["fields"]["ordering"].is_array());

    let (status, count) = app
        .send(
            "GET",
            &format!("/api/vacancies/{}/applications_count", Uuid::new_v4()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{count}");
}

#[tokio::test]
async fn deleting_a_company_cascades_to_vacancies() {
    let Some(app) = setup().await else { return };
    let company = app.company("Media").await;
    let vacancy = app.vacancy(&company, json!({})).await;
    let vacancy = vacancy["id"].as_str().unwrap();

    let (status, _) = app.send("DELETE", &format!("/api/companies/{company}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send("GET", &format!("/api/vacancies/{vacancy}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn applications_count_includes_every_status() {
    let Some(app) = setup().await else { return };
    let company = app.company("IT").await;
    let vacancy = app.vacancy(&company, json!({ "status": "active" })).await;
    let vacancy = vacancy["id"].as_str().unwrap();

    let uri = format!("/api/vacancies/{vacancy}/applications_count");
    let (status, count) = app.send("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count, json!({ "applications_count": 0 }));

    let mut last = String::new();
    for course in [2, 3, 4] {
        let student = app.student(course).await;
        let resume = app.resume(&student, true).await;
        let (status, created) = app.apply(&student, vacancy, &resume).await;
        assert_eq!(status, StatusCode::CREATED, "{created}");
        last = created["id"].as_str().unwrap().to_string();
    }
    let (status, _) = app
        .send("POST", &format!("/api/applications/{last}/withdraw"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, count) = app.send("GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count, json!({ "applications_count": 3 }));
}

#[tokio::test]
async fn search_matches_requirements_case_insensitively() {
    let Some(app) = setup().await else { return };
    let company = app.company("Energy").await;
    let token = format!("grid{}", &Uuid::new_v4().simple().to_string()[..8]);
    let matching = app
        .vacancy(&company, json!({ "requirements": format!("Experience with {token} tooling") }))
        .await;
    app.vacancy(&company, json!({ "requirements": "Spreadsheets" })).await;

    let (status, page) = app
        .send(
            "GET",
            &format!("/api/vacancies?company={company}&search={}", token.to_uppercase()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["id"], matching["id"]);

    let (status, page) = app
        .send("GET", &format!("/api/vacancies?company={company}&search=%25"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 0);
}

#[tokio::test]
async fn date_filters_match_the_calendar_day() {
    let Some(app) = setup().await else { return };
    let company = app.company("Media").await;
    let morning = app
        .vacancy(&company, json!({ "published_at": "2026-03-10T09:00:00Z" }))
        .await;
    let night = app
        .vacancy(&company, json!({ "published_at": "2026-03-10T23:30:00Z" }))
        .await;
    let next_day = app
        .vacancy(
            &company,
            json!({
                "published_at": "2026-03-11T00:30:00Z",
                "status": "closed",
                "closed_at": "2026-04-02T10:00:00Z",
            }),
        )
        .await;

    let (status, page) = app
        .send(
            "GET",
            &format!("/api/vacancies?company={company}&published_at=2026-03-10&ordering=published_at"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 2);
    assert_eq!(page["items"][0]["id"], morning["id"]);
    assert_eq!(page["items"][1]["id"], night["id"]);

    let (status, page) = app
        .send(
            "GET",
            &format!("/api/vacancies?company={company}&closed_at=2026-04-02"),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"][0]["id"], next_day["id"]);

    let (status, json) = app
        .send("GET", "/api/vacancies?published_at=10.03.2026", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{json}");
}

#[tokio::test]
async fn page_beyond_the_end_is_empty() {
    let Some(app) = setup().await else { return };
    let company = app.company("Energy").await;
    app.vacancy(&company, json!({})).await;

    let (status, page) = app
        .send(
            "GET",
            &format!("/api/vacancies?company={company}&page={}", i64::MAX),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 1);
    assert_eq!(page["items"], json!([]));
}

#[tokio::test]
async fn malformed_bodies_report_field_errors() {
    let Some(app) = setup().await else { return };
    let company = app.company("IT").await;

    let (status, json) = app
        .send(
            "POST",
            "/api/vacancies",
            Some(json!({
                "company": company,
                "title": "Tester",
                "description": "Find bugs",
                "salary": "abc",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation failed");
    assert!(json["fields"]["salary"].is_array(), "{json}");

    let (status, json) = app
        .send(
            "POST",
            "/api/applications",
            Some(json!({ "vacancy": Uuid::new_v4(), "resume": Uuid::new_v4() })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["student"][0], "This field is required.");
}
