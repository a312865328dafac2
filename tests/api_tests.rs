//! API integration tests
//!
//! These run against a live server with the seed data from a development
//! database: users 1-9 are clients, user 10 is linked to provider 1, user
//! 11 is an admin, and at least one service offering exists. Run with:
//! `cargo test -- --ignored`

use reqwest::Client;
use serde_json::{json, Value};

use trimline_server::models::identity::{Role, UserClaims};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "change-this-secret-in-production".to_string())
}

/// Mint a token the way the identity collaborator would
fn token_for(user_id: i32, role: Role) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = UserClaims {
        sub: format!("user{}", user_id),
        user_id,
        role,
        exp: now + 3600,
        iat: now,
    };
    claims.create_token(&secret()).expect("Failed to create token")
}

/// A weekday far enough out that its slots cannot have elapsed
fn future_weekday() -> String {
    let mut date = chrono::Local::now().date_naive() + chrono::Duration::days(30);
    while matches!(
        chrono::Datelike::weekday(&date),
        chrono::Weekday::Sat | chrono::Weekday::Sun
    ) {
        date += chrono::Duration::days(1);
    }
    date.format("%Y-%m-%d").to_string()
}

async fn cancel_booking(client: &Client, token: &str, reservation_id: &str) {
    let _ = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({"reason": "test cleanup"}))
        .send()
        .await;
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/availability?provider_id=1&date=2030-01-07", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_availability_open_day() {
    let client = Client::new();
    let token = token_for(1, Role::Client);
    let date = future_weekday();

    let response = client
        .get(format!("{}/availability?provider_id=1&date={}", BASE_URL, date))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["closed"], false);
    // Weekday default window 12:00-21:00 at 30 min granularity
    assert_eq!(body["slots"].as_array().map(|s| s.len()), Some(18));
}

#[tokio::test]
#[ignore]
async fn test_book_then_slot_reports_taken() {
    let client = Client::new();
    let token = token_for(2, Role::Client);
    let date = future_weekday();

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "provider_id": 1,
            "date": date,
            "start_time": "15:00",
            "service_ids": [1]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "pending");
    let reservation_id = body["reservation_id"].as_str().expect("No reservation id").to_string();

    let response = client
        .get(format!("{}/availability?provider_id=1&date={}", BASE_URL, date))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    let slot = body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["time"].as_str() == Some("15:00:00") || s["time"].as_str() == Some("15:00"))
        .expect("15:00 slot missing");
    assert_eq!(slot["status"], "taken");

    cancel_booking(&client, &token, &reservation_id).await;
}

#[tokio::test]
#[ignore]
async fn test_same_slot_race_one_winner() {
    // N concurrent attempts for the same (provider, date, time): exactly
    // one succeeds, the rest fail with the slot-taken conflict.
    let date = future_weekday();
    let mut handles = Vec::new();

    for user_id in 1..=5 {
        let date = date.clone();
        handles.push(tokio::spawn(async move {
            let client = Client::new();
            let token = token_for(user_id, Role::Client);
            let response = client
                .post(format!("{}/bookings", BASE_URL))
                .header("Authorization", format!("Bearer {}", token))
                .json(&json!({
                    "provider_id": 1,
                    "date": date,
                    "start_time": "18:00",
                    "service_ids": [1]
                }))
                .send()
                .await
                .expect("Failed to send request");
            let status = response.status().as_u16();
            let body: Value = response.json().await.unwrap_or_default();
            (user_id, status, body)
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.expect("task panicked"));
    }

    let winners: Vec<_> = results.iter().filter(|(_, status, _)| *status == 201).collect();
    let conflicts: Vec<_> = results.iter().filter(|(_, status, _)| *status == 409).collect();

    assert_eq!(winners.len(), 1, "exactly one booking must win: {:?}", results);
    assert_eq!(conflicts.len(), results.len() - 1);
    for (_, _, body) in &conflicts {
        assert_eq!(body["error"], "SlotTaken");
    }

    // Cleanup
    let (user_id, _, body) = winners[0];
    let client = Client::new();
    let token = token_for(*user_id, Role::Client);
    cancel_booking(&client, &token, body["reservation_id"].as_str().unwrap()).await;
}

#[tokio::test]
#[ignore]
async fn test_daily_cap_race_one_winner() {
    // Same client, same date, different providers and times: the
    // per-client-per-day cap lets exactly one through.
    let date = future_weekday();
    let times = ["13:00", "13:30", "14:00", "14:30"];
    let mut handles = Vec::new();

    for time in times {
        let date = date.clone();
        handles.push(tokio::spawn(async move {
            let client = Client::new();
            let token = token_for(6, Role::Client);
            let response = client
                .post(format!("{}/bookings", BASE_URL))
                .header("Authorization", format!("Bearer {}", token))
                .json(&json!({
                    "provider_id": 1,
                    "date": date,
                    "start_time": time,
                    "service_ids": [1]
                }))
                .send()
                .await
                .expect("Failed to send request");
            let status = response.status().as_u16();
            let body: Value = response.json().await.unwrap_or_default();
            (status, body)
        }));
    }

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.expect("task panicked"));
    }

    let winners: Vec<_> = results.iter().filter(|(status, _)| *status == 201).collect();
    assert_eq!(winners.len(), 1, "daily cap must allow one: {:?}", results);
    for (status, body) in results.iter().filter(|(status, _)| *status != 201) {
        assert_eq!(*status, 409);
        assert_eq!(body["error"], "DailyLimitReached", "unexpected body: {}", body);
    }

    let client = Client::new();
    let token = token_for(6, Role::Client);
    cancel_booking(&client, &token, winners[0].1["reservation_id"].as_str().unwrap()).await;
}

#[tokio::test]
#[ignore]
async fn test_second_booking_same_day_rejected() {
    let client = Client::new();
    let token = token_for(7, Role::Client);
    let date = future_weekday();

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "provider_id": 1,
            "date": date,
            "start_time": "16:00",
            "service_ids": [1]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    let reservation_id = body["reservation_id"].as_str().unwrap().to_string();

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "provider_id": 1,
            "date": date,
            "start_time": "17:00",
            "service_ids": [1]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "DailyLimitReached");

    cancel_booking(&client, &token, &reservation_id).await;
}

#[tokio::test]
#[ignore]
async fn test_cancel_requires_ownership() {
    let client = Client::new();
    let owner = token_for(8, Role::Client);
    let other = token_for(9, Role::Client);
    let date = future_weekday();

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", owner))
        .json(&json!({
            "provider_id": 1,
            "date": date,
            "start_time": "19:00",
            "service_ids": [1]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    let reservation_id = body["reservation_id"].as_str().unwrap().to_string();

    // A different client may not cancel it
    let response = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", other))
        .json(&json!({"reason": "not mine"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // The owner may, and the reservation ends up cancelled
    let response = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", owner))
        .json(&json!({"reason": "changed my mind"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "cancelled");

    // Exactly one audit record, carrying the actor and reason
    let response = client
        .get(format!("{}/bookings/{}/cancellations", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", owner))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let records: Value = response.json().await.unwrap();
    let records = records.as_array().expect("Expected an array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["reason"], "changed my mind");
    assert_eq!(records[0]["actor"], "client");

    // Cancelling again fails: the reservation is no longer active
    let response = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", owner))
        .json(&json!({"reason": "again"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // The rejected repeat cancel must not add a second record
    let response = client
        .get(format!("{}/bookings/{}/cancellations", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", owner))
        .send()
        .await
        .expect("Failed to send request");
    let records: Value = response.json().await.unwrap();
    assert_eq!(records.as_array().map(|r| r.len()), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_provider_confirm_flow() {
    let client = Client::new();
    let client_token = token_for(3, Role::Client);
    let provider_token = token_for(10, Role::Provider);
    let date = future_weekday();

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", client_token))
        .json(&json!({
            "provider_id": 1,
            "date": date,
            "start_time": "20:00",
            "service_ids": [1]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    let reservation_id = body["reservation_id"].as_str().unwrap().to_string();

    // Provider confirms
    let response = client
        .put(format!("{}/bookings/{}/status", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", provider_token))
        .json(&json!({"status": "confirmed"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "confirmed");

    // Provider cancellation requires a reason
    let response = client
        .put(format!("{}/bookings/{}/status", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", provider_token))
        .json(&json!({"status": "cancelled"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .put(format!("{}/bookings/{}/status", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", provider_token))
        .json(&json!({"status": "cancelled", "reason": "emergency closure"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore]
async fn test_closed_override_blocks_day() {
    let client = Client::new();
    let admin = token_for(11, Role::Admin);
    let user = token_for(4, Role::Client);
    let date = future_weekday();

    // Admin closes the date
    let response = client
        .put(format!("{}/hours/overrides", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({"date": date, "closed": true, "reason": "Maintenance"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    let override_id = body["id"].as_i64().expect("No override id");

    // Availability reports a calendar closure, no slots
    let response = client
        .get(format!("{}/availability?provider_id=1&date={}", BASE_URL, date))
        .header("Authorization", format!("Bearer {}", user))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["closed"], true);
    assert_eq!(body["slots"].as_array().map(|s| s.len()), Some(0));

    // Booking on a closed day is rejected before any write
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", user))
        .json(&json!({
            "provider_id": 1,
            "date": date,
            "start_time": "15:00",
            "service_ids": [1]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Cleanup
    let _ = client
        .delete(format!("{}/hours/overrides/{}", BASE_URL, override_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_override_list_rejects_malformed_date_filter() {
    let client = Client::new();
    let admin = token_for(11, Role::Admin);

    let response = client
        .get(format!("{}/hours/overrides?start_date=not-a-date", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_service_catalog_is_public() {
    let client = Client::new();

    let response = client
        .get(format!("{}/services", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["services"].is_array());
    assert!(body["combos"].is_array());
    assert!(body["extras"].is_array());
}
