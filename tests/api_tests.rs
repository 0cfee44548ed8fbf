use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use chrono::{Days, Local, NaiveDate};
use serde_json::{Value, json};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

/// Spin up the full router over a fresh temp-file SQLite database.
async fn test_app(tag: &str) -> (Router, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "pawtrack-{}-{}-{}.sqlite",
        tag,
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let pool = pawtrack::db::connect(&database_url)
        .await
        .expect("failed to open test database");
    let store = pawtrack::db::PetStore::new(pool);
    store.init_schema().await.expect("failed to init schema");

    let state = pawtrack::router::PawtrackState::new(store);
    (pawtrack::router::pawtrack_router(state), temp_path)
}

async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");

    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not JSON")
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, "GET", uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, "POST", uri, Some(body)).await
}

async fn register_user(app: &Router, email: &str) -> i64 {
    let (status, body) = post(
        app,
        "/users/register",
        json!({"firstName": "A", "lastName": "B", "email": email, "password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("register response missing id")
}

async fn create_pet(app: &Router, user_id: i64, name: &str) -> i64 {
    let (status, body) = post(
        app,
        "/pets",
        json!({"user_id": user_id, "name": name, "species": "Dog"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["pet"]["id"].as_i64().expect("create pet response missing id")
}

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[tokio::test]
async fn register_pet_weight_log_end_to_end() {
    let (app, db_path) = test_app("e2e").await;

    let user_id = register_user(&app, "a@b.com").await;
    let pet_id = create_pet(&app, user_id, "Rex").await;

    let (status, body) = post(
        &app,
        "/weight-logs",
        json!({"pet_id": pet_id, "date": "2024-01-01", "weight_kg": 10}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Weight log created");
    assert_eq!(body["weight_log"]["weight_kg"], json!(10.0));

    let (status, body) = get(&app, &format!("/weight-logs/pet/{pet_id}")).await;
    assert_eq!(status, StatusCode::OK);
    let logs = body["weight_logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["weight_kg"], json!(10.0));
    assert_eq!(logs[0]["date"], "2024-01-01");
    assert_eq!(logs[0]["pet_id"], json!(pet_id));

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn register_requires_every_field() {
    let (app, db_path) = test_app("register-fields").await;

    let (status, body) = post(
        &app,
        "/users/register",
        json!({"firstName": "A", "lastName": "B", "email": "a@b.com"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "You must include a first name, last name, email, and your password"
    );

    // Empty strings count as missing.
    let (status, _) = post(
        &app,
        "/users/register",
        json!({"firstName": "", "lastName": "B", "email": "a@b.com", "password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let (app, db_path) = test_app("dup-email").await;

    register_user(&app, "dup@b.com").await;
    let (status, body) = post(
        &app,
        "/users/register",
        json!({"firstName": "C", "lastName": "D", "email": "dup@b.com", "password": "pw2"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists");

    let (_, body) = get(&app, "/users").await;
    let users = body["users"].as_array().unwrap();
    let matching: Vec<_> = users
        .iter()
        .filter(|u| u["email"] == "dup@b.com")
        .collect();
    assert_eq!(matching.len(), 1);

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn login_paths() {
    let (app, db_path) = test_app("login").await;

    let user_id = register_user(&app, "login@b.com").await;
    create_pet(&app, user_id, "Rex").await;

    let (status, body) = post(
        &app,
        "/users/login",
        json!({"email": "nobody@b.com", "password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not existing with this email");

    let (status, body) = post(
        &app,
        "/users/login",
        json!({"email": "login@b.com", "password": "wrong"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Incorrect password");

    let (status, body) = post(
        &app,
        "/users/login",
        json!({"email": "login@b.com", "password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "login@b.com");
    assert_eq!(body["firstName"], "A");
    assert_eq!(body["pets"].as_array().unwrap().len(), 1);

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn user_update_and_delete() {
    let (app, db_path) = test_app("user-update").await;

    let user_id = register_user(&app, "upd@b.com").await;

    let (status, body) = request(
        &app,
        "PATCH",
        &format!("/users/{user_id}"),
        Some(json!({"firstName": "Zed"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User updated.");

    let (_, body) = get(&app, "/users").await;
    let user = &body["users"].as_array().unwrap()[0];
    assert_eq!(user["firstName"], "Zed");
    assert_eq!(user["lastName"], "B");

    let (status, _) = request(&app, "PATCH", "/users/9999", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = request(&app, "DELETE", &format!("/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted!");

    let (status, _) = request(&app, "DELETE", &format!("/users/{user_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn logs_require_an_existing_pet() {
    let (app, db_path) = test_app("orphan-logs").await;

    let (status, body) = post(
        &app,
        "/weight-logs",
        json!({"pet_id": 42, "date": "2024-01-01", "weight_kg": 5}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Pet not found");

    let (status, _) = post(
        &app,
        "/diet-logs",
        json!({"pet_id": 42, "date": "2024-01-01"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(
        &app,
        "/reminders",
        json!({"pet_id": 42, "reminder_type": "general", "due_date": "2024-01-01", "message": "hi"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Nothing was persisted.
    let (status, _) = get(&app, "/weight-logs/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn weight_must_be_positive() {
    let (app, db_path) = test_app("weight-positive").await;

    let user_id = register_user(&app, "w@b.com").await;
    let pet_id = create_pet(&app, user_id, "Rex").await;

    for bad in [json!(0), json!(-2.5)] {
        let (status, body) = post(
            &app,
            "/weight-logs",
            json!({"pet_id": pet_id, "date": "2024-01-01", "weight_kg": bad}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "weight_kg must be positive");
    }

    let (status, body) = post(
        &app,
        "/weight-logs",
        json!({"pet_id": pet_id, "date": "2024-01-01", "weight_kg": 25.5}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["weight_log"]["weight_kg"], json!(25.5));

    let (_, body) = get(&app, &format!("/weight-logs/pet/{pet_id}")).await;
    assert_eq!(body["weight_logs"].as_array().unwrap().len(), 1);

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn malformed_dates_are_rejected_everywhere() {
    let (app, db_path) = test_app("bad-dates").await;

    let user_id = register_user(&app, "d@b.com").await;
    let pet_id = create_pet(&app, user_id, "Rex").await;

    let (status, body) = post(
        &app,
        "/pets",
        json!({"user_id": user_id, "name": "Milo", "birth_date": "15-01-2024"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "birth_date must be YYYY-MM-DD");

    let (status, body) = post(
        &app,
        "/weight-logs",
        json!({"pet_id": pet_id, "date": "2024/01/01", "weight_kg": 5}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "date must be YYYY-MM-DD");

    let (status, body) = post(
        &app,
        "/diet-logs",
        json!({"pet_id": pet_id, "date": "2024-01-01", "feeding_time": "8am"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "feeding_time must be HH:MM");

    let (status, body) = get(
        &app,
        &format!("/weight-logs/pet/{pet_id}?start_date=bogus"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "start_date must be YYYY-MM-DD");

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn pet_ownership_is_advisory_but_enforced_when_supplied() {
    let (app, db_path) = test_app("pet-owner").await;

    let owner_id = register_user(&app, "owner@b.com").await;
    let other_id = register_user(&app, "other@b.com").await;
    let pet_id = create_pet(&app, owner_id, "Rex").await;

    let (status, body) = request(
        &app,
        "PATCH",
        &format!("/pets/{pet_id}"),
        Some(json!({"user_id": other_id, "name": "Hijacked"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Permission denied");

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/pets/{pet_id}"),
        Some(json!({"user_id": owner_id, "name": "Max"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pet"]["name"], "Max");

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/pets/{pet_id}?user_id={other_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = request(
        &app,
        "DELETE",
        &format!("/pets/{pet_id}?user_id={owner_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Pet deleted");

    let (status, _) = get(&app, &format!("/pets/{pet_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn pets_list_filters_by_owner() {
    let (app, db_path) = test_app("pets-list").await;

    let a = register_user(&app, "pa@b.com").await;
    let b = register_user(&app, "pb@b.com").await;
    create_pet(&app, a, "Rex").await;
    create_pet(&app, a, "Milo").await;
    create_pet(&app, b, "Luna").await;

    let (_, body) = get(&app, "/pets").await;
    assert_eq!(body["pets"].as_array().unwrap().len(), 3);

    let (_, body) = get(&app, &format!("/pets?user_id={a}")).await;
    assert_eq!(body["pets"].as_array().unwrap().len(), 2);

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn diet_log_round_trip_and_filters() {
    let (app, db_path) = test_app("diet").await;

    let user_id = register_user(&app, "diet@b.com").await;
    let pet_id = create_pet(&app, user_id, "Rex").await;

    let (status, created) = post(
        &app,
        "/diet-logs",
        json!({
            "pet_id": pet_id,
            "date": "2024-01-15",
            "description": "kibble",
            "meal_type": "breakfast",
            "food_amount": 100.0,
            "unit": "g",
            "feeding_time": "08:00"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let log_id = created["diet_log"]["id"].as_i64().unwrap();
    assert_eq!(created["diet_log"]["feeding_time"], "08:00");

    // Re-fetching yields the same serialization as the create response.
    let (status, fetched) = get(&app, &format!("/diet-logs/{log_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["diet_log"], created["diet_log"]);

    post(
        &app,
        "/diet-logs",
        json!({"pet_id": pet_id, "date": "2024-01-20", "meal_type": "dinner", "feeding_time": "19:30"}),
    )
    .await;
    post(
        &app,
        "/diet-logs",
        json!({"pet_id": pet_id, "date": "2024-02-01", "meal_type": "breakfast"}),
    )
    .await;

    let (_, body) = get(&app, &format!("/diet-logs/pet/{pet_id}")).await;
    let logs = body["diet_logs"].as_array().unwrap();
    assert_eq!(logs.len(), 3);
    // date desc
    assert_eq!(logs[0]["date"], "2024-02-01");
    assert_eq!(logs[2]["date"], "2024-01-15");

    let (_, body) = get(
        &app,
        &format!("/diet-logs/pet/{pet_id}?meal_type=breakfast"),
    )
    .await;
    assert_eq!(body["diet_logs"].as_array().unwrap().len(), 2);

    let (_, body) = get(
        &app,
        &format!("/diet-logs/pet/{pet_id}?start_date=2024-01-16&end_date=2024-01-31"),
    )
    .await;
    let logs = body["diet_logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["date"], "2024-01-20");

    // Partial update; null clears feeding_time.
    let (status, body) = request(
        &app,
        "PUT",
        &format!("/diet-logs/{log_id}"),
        Some(json!({"description": "wet food", "feeding_time": null})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["diet_log"]["description"], "wet food");
    assert_eq!(body["diet_log"]["feeding_time"], Value::Null);
    assert_eq!(body["diet_log"]["date"], "2024-01-15");

    let (status, _) = request(&app, "DELETE", &format!("/diet-logs/{log_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, &format!("/diet-logs/{log_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn vaccine_upcoming_window_edges() {
    let (app, db_path) = test_app("vaccine-upcoming").await;

    let user_id = register_user(&app, "vax@b.com").await;
    let pet_id = create_pet(&app, user_id, "Rex").await;

    let in_window = iso(today() + Days::new(5));
    let at_edge = iso(today() + Days::new(30));
    let past_edge = iso(today() + Days::new(31));

    for (next_due, enabled) in [
        (in_window.as_str(), true),
        (at_edge.as_str(), true),
        (past_edge.as_str(), true),
        (in_window.as_str(), false),
    ] {
        let (status, _) = post(
            &app,
            "/vaccine-logs",
            json!({
                "pet_id": pet_id,
                "date": "2024-01-15",
                "vaccine_type": "rabies",
                "next_due_date": next_due,
                "reminder_enabled": enabled
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app, &format!("/vaccine-logs/pet/{pet_id}/upcoming")).await;
    assert_eq!(status, StatusCode::OK);
    let upcoming = body["upcoming_vaccines"].as_array().unwrap();
    assert_eq!(upcoming.len(), 2);
    // ascending by next due date
    assert_eq!(upcoming[0]["next_due_date"], in_window);
    assert_eq!(upcoming[1]["next_due_date"], at_edge);
    assert!(upcoming.iter().all(|v| v["reminder_enabled"] == json!(true)));

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn vaccine_log_requires_type() {
    let (app, db_path) = test_app("vaccine-type").await;

    let user_id = register_user(&app, "vt@b.com").await;
    let pet_id = create_pet(&app, user_id, "Rex").await;

    let (status, body) = post(
        &app,
        "/vaccine-logs",
        json!({"pet_id": pet_id, "date": "2024-01-15"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "vaccine_type is required");

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn reminder_windows_and_status_filters() {
    let (app, db_path) = test_app("reminders").await;

    let user_id = register_user(&app, "rem@b.com").await;
    let pet_id = create_pet(&app, user_id, "Rex").await;

    let soon = iso(today() + Days::new(3));
    let beyond = iso(today() + Days::new(8));
    let past = iso(today() - Days::new(2));

    let mut ids = Vec::new();
    for due in [&soon, &beyond, &past, &soon] {
        let (status, body) = post(
            &app,
            "/reminders",
            json!({"pet_id": pet_id, "reminder_type": "general", "due_date": due, "message": "check"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["reminder"]["is_sent"], json!(false));
        ids.push(body["reminder"]["id"].as_i64().unwrap());
    }

    // Send the second reminder that falls inside the due-soon window.
    let (status, body) = request(
        &app,
        "PATCH",
        &format!("/reminders/{}/mark-sent", ids[3]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reminder"]["is_sent"], json!(true));

    let (_, body) = get(&app, "/reminders/due-soon").await;
    let due_soon = body["due_soon_reminders"].as_array().unwrap();
    assert_eq!(due_soon.len(), 1);
    assert_eq!(due_soon[0]["due_date"], soon);
    assert_eq!(due_soon[0]["id"], json!(ids[0]));

    let (_, body) = get(&app, "/reminders/overdue").await;
    let overdue = body["overdue_reminders"].as_array().unwrap();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0]["due_date"], past);

    let (_, body) = get(&app, &format!("/reminders/pet/{pet_id}?status=sent")).await;
    assert_eq!(body["reminders"].as_array().unwrap().len(), 1);

    let (_, body) = get(&app, &format!("/reminders/pet/{pet_id}?status=pending")).await;
    assert_eq!(body["reminders"].as_array().unwrap().len(), 3);

    let (_, body) = get(&app, &format!("/reminders/pet/{pet_id}?status=overdue")).await;
    assert_eq!(body["reminders"].as_array().unwrap().len(), 1);

    // Ascending by due date, capped.
    let (_, body) = get(&app, &format!("/reminders/pet/{pet_id}?limit=2")).await;
    let capped = body["reminders"].as_array().unwrap();
    assert_eq!(capped.len(), 2);
    assert_eq!(capped[0]["due_date"], past);

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn reminder_type_is_validated() {
    let (app, db_path) = test_app("reminder-type").await;

    let user_id = register_user(&app, "rt@b.com").await;
    let pet_id = create_pet(&app, user_id, "Rex").await;

    let (status, body) = post(
        &app,
        "/reminders",
        json!({"pet_id": pet_id, "reminder_type": "grooming", "due_date": "2024-06-01", "message": "trim"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "reminder_type must be one of: vaccine, weight, diet, general"
    );

    let (status, body) = post(
        &app,
        "/reminders",
        json!({"pet_id": pet_id, "reminder_type": "vaccine", "due_date": "2024-06-01", "message": "booster"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["reminder"]["id"].as_i64().unwrap();

    let (status, _) = request(
        &app,
        "PUT",
        &format!("/reminders/{id}"),
        Some(json!({"reminder_type": "someday"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = request(
        &app,
        "PUT",
        &format!("/reminders/{id}"),
        Some(json!({"reminder_type": "weight", "message": "weigh-in"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reminder"]["reminder_type"], "weight");
    assert_eq!(body["reminder"]["message"], "weigh-in");
    assert_eq!(body["reminder"]["due_date"], "2024-06-01");

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn weight_trend_deltas_and_boundary() {
    let (app, db_path) = test_app("trend").await;

    let user_id = register_user(&app, "trend@b.com").await;
    let pet_id = create_pet(&app, user_id, "Rex").await;

    for (date, weight) in [
        ("2024-01-01", 10.0),
        ("2024-01-02", 12.0),
        ("2024-01-03", 11.5),
    ] {
        let (status, _) = post(
            &app,
            "/weight-logs",
            json!({"pet_id": pet_id, "date": date, "weight_kg": weight}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = get(&app, &format!("/weight-logs/pet/{pet_id}/trend")).await;
    assert_eq!(status, StatusCode::OK);
    let trend = body["weight_trend"].as_array().unwrap();
    assert_eq!(trend.len(), 3);

    assert_eq!(trend[0]["date"], "2024-01-03");
    assert_eq!(trend[0]["change"], json!(-0.5));
    assert_eq!(trend[1]["date"], "2024-01-02");
    assert_eq!(trend[1]["change"], json!(2.0));
    // The oldest row of the page has no predecessor in view.
    assert_eq!(trend[2]["date"], "2024-01-01");
    assert_eq!(trend[2]["change"], Value::Null);

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn weight_list_supports_limit() {
    let (app, db_path) = test_app("weight-limit").await;

    let user_id = register_user(&app, "wl@b.com").await;
    let pet_id = create_pet(&app, user_id, "Rex").await;

    for day in 1..=5 {
        post(
            &app,
            "/weight-logs",
            json!({"pet_id": pet_id, "date": format!("2024-01-0{day}"), "weight_kg": 10.0 + day as f64}),
        )
        .await;
    }

    let (_, body) = get(&app, &format!("/weight-logs/pet/{pet_id}?limit=2")).await;
    let logs = body["weight_logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["date"], "2024-01-05");
    assert_eq!(logs[1]["date"], "2024-01-04");

    let _ = fs::remove_file(&db_path);
}

#[tokio::test]
async fn listing_logs_for_unknown_pet_is_not_found() {
    let (app, db_path) = test_app("unknown-pet-lists").await;

    for uri in [
        "/diet-logs/pet/99",
        "/weight-logs/pet/99",
        "/weight-logs/pet/99/trend",
        "/vaccine-logs/pet/99",
        "/vaccine-logs/pet/99/upcoming",
        "/reminders/pet/99",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "uri: {uri}");
        assert_eq!(body["message"], "Pet not found");
    }

    let _ = fs::remove_file(&db_path);
}
