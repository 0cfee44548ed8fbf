use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::db::logs::VaccineLogFilter;
use crate::db::models::VaccineLog;
use crate::error::PawtrackError;
use crate::handlers::{deserialize_some, non_empty, parse_date, today};
use crate::router::PawtrackState;

#[derive(Debug, Deserialize)]
pub struct CreateVaccineLogRequest {
    pub pet_id: Option<i64>,
    pub date: Option<String>,
    pub vaccine_type: Option<String>,
    pub notes: Option<String>,
    pub next_due_date: Option<String>,
    pub reminder_enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct VaccineLogListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub vaccine_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateVaccineLogRequest {
    pub date: Option<String>,
    pub vaccine_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub next_due_date: Option<Option<String>>,
    pub reminder_enabled: Option<bool>,
}

/// POST /vaccine-logs
pub async fn create_vaccine_log(
    State(state): State<PawtrackState>,
    Json(body): Json<CreateVaccineLogRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(pet_id) = body.pet_id else {
        return Err(PawtrackError::validation("pet_id is required"));
    };
    let Some(date) = non_empty(body.date.as_deref()) else {
        return Err(PawtrackError::validation("date is required"));
    };
    let Some(vaccine_type) = non_empty(body.vaccine_type.as_deref()) else {
        return Err(PawtrackError::validation("vaccine_type is required"));
    };

    let Some(pet) = state.store.find_pet(pet_id).await? else {
        return Err(PawtrackError::not_found("Pet not found"));
    };

    let date = parse_date("date", date)?;
    let next_due_date = non_empty(body.next_due_date.as_deref())
        .map(|s| parse_date("next_due_date", s))
        .transpose()?;

    let log = state
        .store
        .insert_vaccine_log(VaccineLog {
            id: 0,
            pet_id: pet.id,
            date,
            vaccine_type: vaccine_type.to_string(),
            notes: body.notes,
            next_due_date,
            reminder_enabled: body.reminder_enabled.unwrap_or(true),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Vaccine log created", "vaccine_log": log })),
    ))
}

/// GET /vaccine-logs/pet/{pet_id}?start_date=&end_date=&vaccine_type=
pub async fn list_pet_vaccine_logs(
    State(state): State<PawtrackState>,
    Path(pet_id): Path<i64>,
    Query(query): Query<VaccineLogListQuery>,
) -> Result<impl IntoResponse, PawtrackError> {
    if state.store.find_pet(pet_id).await?.is_none() {
        return Err(PawtrackError::not_found("Pet not found"));
    }

    let filter = VaccineLogFilter {
        start_date: query
            .start_date
            .as_deref()
            .map(|s| parse_date("start_date", s))
            .transpose()?,
        end_date: query
            .end_date
            .as_deref()
            .map(|s| parse_date("end_date", s))
            .transpose()?,
        vaccine_type: query.vaccine_type,
    };
    let logs = state.store.vaccine_logs_for_pet(pet_id, &filter).await?;

    Ok(Json(json!({ "vaccine_logs": logs })))
}

/// GET /vaccine-logs/pet/{pet_id}/upcoming — due within 30 days, reminder
/// flag enabled, soonest first.
pub async fn get_upcoming_vaccines(
    State(state): State<PawtrackState>,
    Path(pet_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    if state.store.find_pet(pet_id).await?.is_none() {
        return Err(PawtrackError::not_found("Pet not found"));
    }
    let upcoming = state
        .store
        .upcoming_vaccines_for_pet(pet_id, today())
        .await?;
    Ok(Json(json!({ "upcoming_vaccines": upcoming })))
}

/// GET /vaccine-logs/{log_id}
pub async fn get_vaccine_log(
    State(state): State<PawtrackState>,
    Path(log_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(log) = state.store.find_vaccine_log(log_id).await? else {
        return Err(PawtrackError::not_found("Vaccine log not found"));
    };
    Ok(Json(json!({ "vaccine_log": log })))
}

/// PUT /vaccine-logs/{log_id}
pub async fn update_vaccine_log(
    State(state): State<PawtrackState>,
    Path(log_id): Path<i64>,
    Json(body): Json<UpdateVaccineLogRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(mut log) = state.store.find_vaccine_log(log_id).await? else {
        return Err(PawtrackError::not_found("Vaccine log not found"));
    };

    if let Some(date) = body.date.as_deref() {
        log.date = parse_date("date", date)?;
    }
    if let Some(vaccine_type) = body.vaccine_type {
        log.vaccine_type = vaccine_type;
    }
    if let Some(notes) = body.notes {
        log.notes = notes;
    }
    if let Some(next_due_date) = body.next_due_date {
        log.next_due_date = match non_empty(next_due_date.as_deref()) {
            Some(s) => Some(parse_date("next_due_date", s)?),
            None => None,
        };
    }
    if let Some(reminder_enabled) = body.reminder_enabled {
        log.reminder_enabled = reminder_enabled;
    }
    state.store.update_vaccine_log(&log).await?;

    Ok(Json(
        json!({ "message": "Vaccine log updated", "vaccine_log": log }),
    ))
}

/// DELETE /vaccine-logs/{log_id}
pub async fn delete_vaccine_log(
    State(state): State<PawtrackState>,
    Path(log_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    if state.store.find_vaccine_log(log_id).await?.is_none() {
        return Err(PawtrackError::not_found("Vaccine log not found"));
    }
    state.store.delete_vaccine_log(log_id).await?;
    Ok(Json(json!({ "message": "Vaccine log deleted" })))
}
