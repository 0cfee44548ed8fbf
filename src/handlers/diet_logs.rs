use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::db::logs::DietLogFilter;
use crate::db::models::DietLog;
use crate::error::PawtrackError;
use crate::handlers::{deserialize_some, non_empty, parse_date, parse_time};
use crate::router::PawtrackState;

#[derive(Debug, Deserialize)]
pub struct CreateDietLogRequest {
    pub pet_id: Option<i64>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub meal_type: Option<String>,
    pub food_amount: Option<f64>,
    pub unit: Option<String>,
    pub feeding_time: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DietLogListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub meal_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateDietLogRequest {
    pub date: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub meal_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub food_amount: Option<Option<f64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub unit: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub feeding_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

/// POST /diet-logs
pub async fn create_diet_log(
    State(state): State<PawtrackState>,
    Json(body): Json<CreateDietLogRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(pet_id) = body.pet_id else {
        return Err(PawtrackError::validation("pet_id is required"));
    };
    let Some(date) = non_empty(body.date.as_deref()) else {
        return Err(PawtrackError::validation("date is required"));
    };

    let Some(pet) = state.store.find_pet(pet_id).await? else {
        return Err(PawtrackError::not_found("Pet not found"));
    };

    let date = parse_date("date", date)?;
    let feeding_time = non_empty(body.feeding_time.as_deref())
        .map(|s| parse_time("feeding_time", s))
        .transpose()?;

    let log = state
        .store
        .insert_diet_log(DietLog {
            id: 0,
            pet_id: pet.id,
            date,
            description: body.description,
            meal_type: body.meal_type,
            food_amount: body.food_amount,
            unit: body.unit,
            feeding_time,
            notes: body.notes,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Diet log created", "diet_log": log })),
    ))
}

/// GET /diet-logs/pet/{pet_id}?start_date=&end_date=&meal_type=
pub async fn list_pet_diet_logs(
    State(state): State<PawtrackState>,
    Path(pet_id): Path<i64>,
    Query(query): Query<DietLogListQuery>,
) -> Result<impl IntoResponse, PawtrackError> {
    if state.store.find_pet(pet_id).await?.is_none() {
        return Err(PawtrackError::not_found("Pet not found"));
    }

    let filter = DietLogFilter {
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
        meal_type: query.meal_type,
    };
    let logs = state.store.diet_logs_for_pet(pet_id, &filter).await?;

    Ok(Json(json!({ "diet_logs": logs })))
}

/// GET /diet-logs/{log_id}
pub async fn get_diet_log(
    State(state): State<PawtrackState>,
    Path(log_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(log) = state.store.find_diet_log(log_id).await? else {
        return Err(PawtrackError::not_found("Diet log not found"));
    };
    Ok(Json(json!({ "diet_log": log })))
}

/// PUT /diet-logs/{log_id}
pub async fn update_diet_log(
    State(state): State<PawtrackState>,
    Path(log_id): Path<i64>,
    Json(body): Json<UpdateDietLogRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(mut log) = state.store.find_diet_log(log_id).await? else {
        return Err(PawtrackError::not_found("Diet log not found"));
    };

    if let Some(date) = body.date.as_deref() {
        log.date = parse_date("date", date)?;
    }
    if let Some(description) = body.description {
        log.description = description;
    }
    if let Some(meal_type) = body.meal_type {
        log.meal_type = meal_type;
    }
    if let Some(food_amount) = body.food_amount {
        log.food_amount = food_amount;
    }
    if let Some(unit) = body.unit {
        log.unit = unit;
    }
    if let Some(feeding_time) = body.feeding_time {
        log.feeding_time = match non_empty(feeding_time.as_deref()) {
            Some(s) => Some(parse_time("feeding_time", s)?),
            None => None,
        };
    }
    if let Some(notes) = body.notes {
        log.notes = notes;
    }
    state.store.update_diet_log(&log).await?;

    Ok(Json(json!({ "message": "Diet log updated", "diet_log": log })))
}

/// DELETE /diet-logs/{log_id}
pub async fn delete_diet_log(
    State(state): State<PawtrackState>,
    Path(log_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    if state.store.find_diet_log(log_id).await?.is_none() {
        return Err(PawtrackError::not_found("Diet log not found"));
    }
    state.store.delete_diet_log(log_id).await?;
    Ok(Json(json!({ "message": "Diet log deleted" })))
}
