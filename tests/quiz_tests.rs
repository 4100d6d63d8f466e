// tests/quiz_tests.rs

use std::net::SocketAddr;

use coursetrack_backend::{config::Config, grading::PassPolicy, routes, state::AppState};
use sqlx::sqlite::SqlitePoolOptions;

async fn spawn_app_with_policy(pass_policy: PassPolicy) -> String {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "quiz_test_secret".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        pass_policy,
    };

    let state = AppState { pool, config };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    address
}

async fn spawn_app() -> String {
    spawn_app_with_policy(PassPolicy::AtLeastHalf).await
}

async fn register(client: &reqwest::Client, address: &str) -> String {
    let email = format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8]);
    let response = client
        .post(format!("{}/api/auth/register", address))
        .json(&serde_json::json!({
            "name": "Test Learner",
            "email": email,
            "password": "Password123",
            "phoneNumber": "0770090012"
        }))
        .send()
        .await
        .expect("Register failed");
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

/// Correct answers for the lesson-1 quiz fixture.
fn lesson_1_answers() -> serde_json::Value {
    serde_json::json!({
        "q1": "I am fine, thank you",
        "q2": "is",
        "q3": "No",
        "q4": [
            "Good morning",
            "Nice to meet you",
            "How do you do?",
            "Pleased to make your acquaintance"
        ]
    })
}

async fn submit(
    client: &reqwest::Client,
    address: &str,
    token: &str,
    lesson_id: &str,
    answers: serde_json::Value,
) -> reqwest::Response {
    client
        .post(format!("{}/api/lessons/{}/submit", address, lesson_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&serde_json::json!({ "answers": answers }))
        .send()
        .await
        .expect("Submit failed")
}

#[tokio::test]
async fn catalog_lists_all_six_lessons() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/lessons", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let lessons = body["lessons"].as_array().unwrap();
    assert_eq!(lessons.len(), 6);
    assert_eq!(lessons[0]["id"], "lesson-1");
    assert_eq!(lessons[0]["durationMinutes"], 45);
    assert_eq!(lessons[0]["questionCount"], 4);
}

#[tokio::test]
async fn quiz_is_served_without_answer_keys() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register(&client, &address).await;

    let response = client
        .get(format!("{}/api/lessons/lesson-1/quiz", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    let questions = body["quiz"]["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 4);

    for question in questions {
        assert!(question.get("answer").is_none());
        assert!(question.get("answers").is_none());
        assert!(question.get("correctAnswer").is_none());
        assert!(question["type"].is_string());
    }

    // The fill-in-blank question carries no options at all.
    let blank = questions
        .iter()
        .find(|q| q["type"] == "fill-in-blank")
        .expect("lesson-1 has a fill-in-blank question");
    assert!(blank.get("options").is_none());

    // The multi-select question keeps its full option list.
    let multi = questions
        .iter()
        .find(|q| q["type"] == "multi-select")
        .expect("lesson-1 has a multi-select question");
    assert_eq!(multi["options"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn quiz_requires_a_token() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/lessons/lesson-1/quiz", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn perfect_submission_completes_the_lesson() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register(&client, &address).await;

    let response = submit(&client, &address, &token, "lesson-1", lesson_1_answers()).await;
    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["score"], 100);
    assert_eq!(body["correctCount"], 4);
    assert_eq!(body["totalQuestions"], 4);
    assert_eq!(body["passed"], true);
    assert_eq!(body["progress"]["completed"], true);
    assert_eq!(body["progress"]["progress"], 100);
    assert!(!body["progress"]["completedAt"].is_null());

    // The graded attempt landed in the progress store.
    let stored: serde_json::Value = client
        .get(format!("{}/api/progress/lesson-1", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored["progress"]["score"], 100);
    assert_eq!(stored["progress"]["completed"], true);
}

#[tokio::test]
async fn three_of_four_scores_seventy_five() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register(&client, &address).await;

    let mut answers = lesson_1_answers();
    answers["q3"] = serde_json::json!("Yes"); // wrong

    let response = submit(&client, &address, &token, "lesson-1", answers).await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["score"], 75);
    assert_eq!(body["correctCount"], 3);
    // 75 clears the at-least-half threshold.
    assert_eq!(body["passed"], true);
    assert_eq!(body["progress"]["completed"], true);
}

#[tokio::test]
async fn strict_policy_requires_a_perfect_score() {
    let address = spawn_app_with_policy(PassPolicy::AllCorrect).await;
    let client = reqwest::Client::new();
    let token = register(&client, &address).await;

    let mut answers = lesson_1_answers();
    answers["q3"] = serde_json::json!("Yes"); // wrong

    let response = submit(&client, &address, &token, "lesson-1", answers).await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["score"], 75);
    assert_eq!(body["passed"], false);
    assert_eq!(body["progress"]["completed"], false);
    assert_eq!(body["progress"]["progress"], 75);
    assert!(body["progress"]["completedAt"].is_null());
}

#[tokio::test]
async fn text_matching_ignores_case_and_whitespace() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register(&client, &address).await;

    let mut answers = lesson_1_answers();
    answers["q2"] = serde_json::json!("  IS ");
    answers["q3"] = serde_json::json!("no");

    let response = submit(&client, &address, &token, "lesson-1", answers).await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["score"], 100);
}

#[tokio::test]
async fn multi_select_subset_gets_no_credit() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register(&client, &address).await;

    let mut answers = lesson_1_answers();
    answers["q4"] = serde_json::json!(["Good morning", "Nice to meet you"]);

    let response = submit(&client, &address, &token, "lesson-1", answers).await;
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["score"], 75);
    assert_eq!(body["correctCount"], 3);
}

#[tokio::test]
async fn partial_submission_is_rejected() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register(&client, &address).await;

    let mut answers = lesson_1_answers();
    answers.as_object_mut().unwrap().remove("q4");

    let response = submit(&client, &address, &token, "lesson-1", answers).await;
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["details"]["unanswered"][0], "q4");
}

#[tokio::test]
async fn unknown_lesson_submission_fails_validation() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register(&client, &address).await;

    let response = submit(
        &client,
        &address,
        &token,
        "lesson-9",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn retaking_a_quiz_overwrites_the_score_but_not_completed_at() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let token = register(&client, &address).await;

    let first = submit(&client, &address, &token, "lesson-1", lesson_1_answers()).await;
    let first: serde_json::Value = first.json().await.unwrap();
    let stamped = first["progress"]["completedAt"].as_str().unwrap().to_string();

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let mut answers = lesson_1_answers();
    answers["q1"] = serde_json::json!("Yes, please"); // wrong this time

    let second = submit(&client, &address, &token, "lesson-1", answers).await;
    let second: serde_json::Value = second.json().await.unwrap();
    assert_eq!(second["score"], 75);
    assert_eq!(second["progress"]["score"], 75);
    assert_eq!(second["progress"]["completedAt"], stamped.as_str());
}
