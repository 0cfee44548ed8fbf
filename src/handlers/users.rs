use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use subtle::ConstantTimeEq;
use tracing::info;

use crate::db::models::{User, UserWithPets};
use crate::error::PawtrackError;
use crate::handlers::non_empty;
use crate::router::PawtrackState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// GET /users — every user with their pets nested (pets carry no logs).
pub async fn list_users(
    State(state): State<PawtrackState>,
) -> Result<impl IntoResponse, PawtrackError> {
    let users = state.store.list_users().await?;
    let mut out = Vec::with_capacity(users.len());
    for user in users {
        let pets = state.store.find_pets_by_user(user.id).await?;
        out.push(UserWithPets { user, pets });
    }
    Ok(Json(json!({ "users": out })))
}

/// POST /users/register
pub async fn register_user(
    State(state): State<PawtrackState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let (Some(first_name), Some(last_name), Some(email), Some(password)) = (
        non_empty(body.first_name.as_deref()),
        non_empty(body.last_name.as_deref()),
        non_empty(body.email.as_deref()),
        non_empty(body.password.as_deref()),
    ) else {
        return Err(PawtrackError::validation(
            "You must include a first name, last name, email, and your password",
        ));
    };

    if state.store.find_user_by_email(email).await?.is_some() {
        return Err(PawtrackError::Conflict("Email already exists".to_string()));
    }

    let user = state
        .store
        .insert_user(User {
            id: 0,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .await?;
    info!(user_id = user.id, "registered user");

    let created = UserWithPets {
        user,
        pets: Vec::new(),
    };
    Ok((StatusCode::CREATED, Json(json!(created))))
}

/// POST /users/login
pub async fn login_user(
    State(state): State<PawtrackState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let email = body.email.unwrap_or_default();
    let password = body.password.unwrap_or_default();

    let Some(user) = state.store.find_user_by_email(&email).await? else {
        return Err(PawtrackError::not_found("User not existing with this email"));
    };

    if !verify_password(&password, &user.password) {
        return Err(PawtrackError::IncorrectPassword);
    }

    let pets = state.store.find_pets_by_user(user.id).await?;
    Ok(Json(json!(UserWithPets { user, pets })))
}

/// PATCH /users/{user_id} — partial name/email update.
pub async fn update_user(
    State(state): State<PawtrackState>,
    Path(user_id): Path<i64>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(mut user) = state.store.find_user(user_id).await? else {
        return Err(PawtrackError::not_found("User not found"));
    };

    if let Some(first_name) = body.first_name {
        user.first_name = first_name;
    }
    if let Some(last_name) = body.last_name {
        user.last_name = last_name;
    }
    if let Some(email) = body.email {
        user.email = email;
    }
    state.store.update_user(&user).await?;

    Ok(Json(json!({ "message": "User updated." })))
}

/// DELETE /users/{user_id} — no cascade to owned pets.
pub async fn delete_user(
    State(state): State<PawtrackState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    if state.store.find_user(user_id).await?.is_none() {
        return Err(PawtrackError::not_found("User not found"));
    }
    state.store.delete_user(user_id).await?;
    info!(user_id, "deleted user");

    Ok(Json(json!({ "message": "User deleted!" })))
}

/// Plaintext byte-equality, constant-time. The single seam through which a
/// salted-hash scheme can later be introduced without touching callers.
fn verify_password(candidate: &str, stored: &str) -> bool {
    candidate.as_bytes().ct_eq(stored.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::verify_password;

    #[test]
    fn verify_password_compares_exact_bytes() {
        assert!(verify_password("pw", "pw"));
        assert!(!verify_password("pw", "PW"));
        assert!(!verify_password("pw", "pw "));
        assert!(!verify_password("", "pw"));
    }
}
