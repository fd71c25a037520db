//! Test data helpers for creating test objects
//!
//! This module provides helper functions for building backend JSON records
//! (users, tasks, assignments, submissions, wallets) and bearer tokens.

use chrono::{Duration, Utc};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

/// Helper function to create a test user record
pub fn create_test_user(id: &str, role: &str) -> Value {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    json!({
        "id": id,
        "email": email,
        "name": name,
        "role": role,
        "skills": [],
        "completedTasks": 0,
        "createdAt": Utc::now().to_rfc3339(),
    })
}

/// Helper function to create a user record with a fixed name
pub fn create_named_user(id: &str, name: &str, role: &str) -> Value {
    let mut user = create_test_user(id, role);
    user["name"] = json!(name);
    user
}

/// Helper function to create a test task record
pub fn create_test_task(id: &str, title: &str, reward: f64, quantity: u32) -> Value {
    let description: String = Sentence(8..14).fake();
    let now = Utc::now();
    json!({
        "id": id,
        "title": title,
        "description": description,
        "category": "data-entry",
        "reward": reward,
        "quantity": quantity,
        "completedCount": 0,
        "status": "active",
        "deadline": (now + Duration::days(3)).to_rfc3339(),
        "createdBy": "client-1",
        "tags": [],
        "createdAt": now.to_rfc3339(),
        "updatedAt": now.to_rfc3339(),
    })
}

/// Helper function to wrap records in a server-side page
pub fn create_test_page(items: Vec<Value>, page: u32, limit: u32) -> Value {
    let total = items.len();
    json!({ "items": items, "total": total, "page": page, "limit": limit })
}

/// Helper function to create a test assignment record
pub fn create_test_assignment(id: &str, task_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "taskId": task_id,
        "workerId": "worker-1",
        "status": status,
        "assignedAt": Utc::now().to_rfc3339(),
        "expiresAt": (Utc::now() + Duration::hours(2)).to_rfc3339(),
        "task": { "id": task_id, "title": "Label street signs", "reward": 0.5 },
    })
}

/// Helper function to create a test submission record
pub fn create_test_submission(id: &str, assignment_id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "assignmentId": assignment_id,
        "taskId": "task-1",
        "workerId": "worker-1",
        "content": "Labels attached",
        "attachments": [],
        "status": status,
        "submittedAt": Utc::now().to_rfc3339(),
    })
}

/// Helper function to create a test wallet record
pub fn create_test_wallet(balance: f64, escrow: f64) -> Value {
    json!({
        "id": "wallet-1",
        "userId": "user-1",
        "balance": balance,
        "escrowBalance": escrow,
        "currency": "USD",
        "updatedAt": Utc::now().to_rfc3339(),
    })
}

/// Helper function to create a test transaction record
pub fn create_test_transaction(id: &str, kind: &str, amount: f64, status: &str) -> Value {
    json!({
        "id": id,
        "walletId": "wallet-1",
        "type": kind,
        "amount": amount,
        "status": status,
        "createdAt": Utc::now().to_rfc3339(),
    })
}

/// Signed JWT expiring `hours` from now (negative for an expired token)
pub fn test_jwt(hours: i64) -> String {
    let claims = json!({
        "sub": "user-1",
        "exp": (Utc::now() + Duration::hours(hours)).timestamp(),
    });
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret")).expect("Failed to sign test token")
}

/// Opaque bearer token
pub fn test_token() -> &'static str {
    "test-token-123"
}
