use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::db::models::Reminder;
use crate::db::reminders::{REMINDER_TYPES, ReminderFilter, ReminderStatus};
use crate::error::PawtrackError;
use crate::handlers::{deserialize_some, non_empty, parse_date, today};
use crate::router::PawtrackState;

#[derive(Debug, Deserialize)]
pub struct CreateReminderRequest {
    pub pet_id: Option<i64>,
    pub reminder_type: Option<String>,
    pub due_date: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReminderListQuery {
    pub reminder_type: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateReminderRequest {
    pub reminder_type: Option<String>,
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub message: Option<Option<String>>,
    pub is_sent: Option<bool>,
}

fn validate_reminder_type(reminder_type: &str) -> Result<(), PawtrackError> {
    if REMINDER_TYPES.contains(&reminder_type) {
        Ok(())
    } else {
        Err(PawtrackError::validation(format!(
            "reminder_type must be one of: {}",
            REMINDER_TYPES.join(", ")
        )))
    }
}

/// POST /reminders
pub async fn create_reminder(
    State(state): State<PawtrackState>,
    Json(body): Json<CreateReminderRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(pet_id) = body.pet_id else {
        return Err(PawtrackError::validation("pet_id is required"));
    };
    let Some(reminder_type) = non_empty(body.reminder_type.as_deref()) else {
        return Err(PawtrackError::validation("reminder_type is required"));
    };
    let Some(due_date) = non_empty(body.due_date.as_deref()) else {
        return Err(PawtrackError::validation("due_date is required"));
    };
    let Some(message) = non_empty(body.message.as_deref()) else {
        return Err(PawtrackError::validation("message is required"));
    };

    let Some(pet) = state.store.find_pet(pet_id).await? else {
        return Err(PawtrackError::not_found("Pet not found"));
    };

    validate_reminder_type(reminder_type)?;
    let due_date = parse_date("due_date", due_date)?;

    let reminder = state
        .store
        .insert_reminder(Reminder {
            id: 0,
            pet_id: pet.id,
            reminder_type: reminder_type.to_string(),
            due_date,
            message: Some(message.to_string()),
            is_sent: false,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Reminder created", "reminder": reminder })),
    ))
}

/// GET /reminders/pet/{pet_id}?reminder_type=&status=&limit=
pub async fn list_pet_reminders(
    State(state): State<PawtrackState>,
    Path(pet_id): Path<i64>,
    Query(query): Query<ReminderListQuery>,
) -> Result<impl IntoResponse, PawtrackError> {
    if state.store.find_pet(pet_id).await?.is_none() {
        return Err(PawtrackError::not_found("Pet not found"));
    }

    let filter = ReminderFilter {
        reminder_type: query.reminder_type,
        status: query.status.as_deref().and_then(ReminderStatus::parse),
        limit: query.limit,
    };
    let reminders = state
        .store
        .reminders_for_pet(pet_id, &filter, today())
        .await?;

    Ok(Json(json!({ "reminders": reminders })))
}

/// GET /reminders/overdue — every unsent reminder past its due date.
pub async fn list_overdue_reminders(
    State(state): State<PawtrackState>,
) -> Result<impl IntoResponse, PawtrackError> {
    let overdue = state.store.overdue_reminders(today()).await?;
    Ok(Json(json!({ "overdue_reminders": overdue })))
}

/// GET /reminders/due-soon — unsent reminders due within 7 days.
pub async fn list_due_soon_reminders(
    State(state): State<PawtrackState>,
) -> Result<impl IntoResponse, PawtrackError> {
    let due_soon = state.store.due_soon_reminders(today()).await?;
    Ok(Json(json!({ "due_soon_reminders": due_soon })))
}

/// GET /reminders/{reminder_id}
pub async fn get_reminder(
    State(state): State<PawtrackState>,
    Path(reminder_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(reminder) = state.store.find_reminder(reminder_id).await? else {
        return Err(PawtrackError::not_found("Reminder not found"));
    };
    Ok(Json(json!({ "reminder": reminder })))
}

/// PUT /reminders/{reminder_id}
pub async fn update_reminder(
    State(state): State<PawtrackState>,
    Path(reminder_id): Path<i64>,
    Json(body): Json<UpdateReminderRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(mut reminder) = state.store.find_reminder(reminder_id).await? else {
        return Err(PawtrackError::not_found("Reminder not found"));
    };

    if let Some(reminder_type) = body.reminder_type {
        validate_reminder_type(&reminder_type)?;
        reminder.reminder_type = reminder_type;
    }
    if let Some(due_date) = body.due_date.as_deref() {
        reminder.due_date = parse_date("due_date", due_date)?;
    }
    if let Some(message) = body.message {
        reminder.message = message;
    }
    if let Some(is_sent) = body.is_sent {
        reminder.is_sent = is_sent;
    }
    state.store.update_reminder(&reminder).await?;

    Ok(Json(
        json!({ "message": "Reminder updated", "reminder": reminder }),
    ))
}

/// PATCH /reminders/{reminder_id}/mark-sent — flips the sent flag only.
pub async fn mark_reminder_sent(
    State(state): State<PawtrackState>,
    Path(reminder_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(mut reminder) = state.store.find_reminder(reminder_id).await? else {
        return Err(PawtrackError::not_found("Reminder not found"));
    };

    reminder.is_sent = true;
    state.store.update_reminder(&reminder).await?;

    Ok(Json(
        json!({ "message": "Reminder marked as sent", "reminder": reminder }),
    ))
}

/// DELETE /reminders/{reminder_id}
pub async fn delete_reminder(
    State(state): State<PawtrackState>,
    Path(reminder_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    if state.store.find_reminder(reminder_id).await?.is_none() {
        return Err(PawtrackError::not_found("Reminder not found"));
    }
    state.store.delete_reminder(reminder_id).await?;
    Ok(Json(json!({ "message": "Reminder deleted" })))
}

#[cfg(test)]
mod tests {
    use super::validate_reminder_type;

    #[test]
    fn reminder_type_restricted_to_fixed_set() {
        for t in ["vaccine", "weight", "diet", "general"] {
            assert!(validate_reminder_type(t).is_ok());
        }
        let err = validate_reminder_type("grooming").unwrap_err();
        assert_eq!(
            err.to_string(),
            "reminder_type must be one of: vaccine, weight, diet, general"
        );
    }
}
