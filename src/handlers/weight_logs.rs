use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;

use crate::db::logs::WeightLogFilter;
use crate::db::models::WeightLog;
use crate::error::PawtrackError;
use crate::handlers::{deserialize_some, non_empty, parse_date};
use crate::router::PawtrackState;

#[derive(Debug, Deserialize)]
pub struct CreateWeightLogRequest {
    pub pet_id: Option<i64>,
    pub date: Option<String>,
    pub weight_kg: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WeightLogListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateWeightLogRequest {
    pub date: Option<String>,
    pub weight_kg: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

fn validate_weight(weight_kg: f64) -> Result<f64, PawtrackError> {
    if weight_kg > 0.0 {
        Ok(weight_kg)
    } else {
        Err(PawtrackError::validation("weight_kg must be positive"))
    }
}

/// POST /weight-logs
pub async fn create_weight_log(
    State(state): State<PawtrackState>,
    Json(body): Json<CreateWeightLogRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(pet_id) = body.pet_id else {
        return Err(PawtrackError::validation("pet_id is required"));
    };
    let Some(date) = non_empty(body.date.as_deref()) else {
        return Err(PawtrackError::validation("date is required"));
    };
    let Some(weight_kg) = body.weight_kg else {
        return Err(PawtrackError::validation("weight_kg is required"));
    };

    let Some(pet) = state.store.find_pet(pet_id).await? else {
        return Err(PawtrackError::not_found("Pet not found"));
    };

    let weight_kg = validate_weight(weight_kg)?;
    let date = parse_date("date", date)?;

    let log = state
        .store
        .insert_weight_log(WeightLog {
            id: 0,
            pet_id: pet.id,
            date,
            weight_kg,
            notes: body.notes,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Weight log created", "weight_log": log })),
    ))
}

/// GET /weight-logs/pet/{pet_id}?start_date=&end_date=&limit=
pub async fn list_pet_weight_logs(
    State(state): State<PawtrackState>,
    Path(pet_id): Path<i64>,
    Query(query): Query<WeightLogListQuery>,
) -> Result<impl IntoResponse, PawtrackError> {
    if state.store.find_pet(pet_id).await?.is_none() {
        return Err(PawtrackError::not_found("Pet not found"));
    }

    let filter = WeightLogFilter {
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
        limit: query.limit,
    };
    let logs = state.store.weight_logs_for_pet(pet_id, &filter).await?;

    Ok(Json(json!({ "weight_logs": logs })))
}

/// GET /weight-logs/pet/{pet_id}/trend — the last 10 readings, newest
/// first, with the delta from the next-older reading in the same page.
pub async fn get_weight_trend(
    State(state): State<PawtrackState>,
    Path(pet_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    if state.store.find_pet(pet_id).await?.is_none() {
        return Err(PawtrackError::not_found("Pet not found"));
    }
    let trend = state.store.weight_trend_for_pet(pet_id).await?;
    Ok(Json(json!({ "weight_trend": trend })))
}

/// GET /weight-logs/{log_id}
pub async fn get_weight_log(
    State(state): State<PawtrackState>,
    Path(log_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(log) = state.store.find_weight_log(log_id).await? else {
        return Err(PawtrackError::not_found("Weight log not found"));
    };
    Ok(Json(json!({ "weight_log": log })))
}

/// PUT /weight-logs/{log_id}
pub async fn update_weight_log(
    State(state): State<PawtrackState>,
    Path(log_id): Path<i64>,
    Json(body): Json<UpdateWeightLogRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(mut log) = state.store.find_weight_log(log_id).await? else {
        return Err(PawtrackError::not_found("Weight log not found"));
    };

    if let Some(date) = body.date.as_deref() {
        log.date = parse_date("date", date)?;
    }
    if let Some(weight_kg) = body.weight_kg {
        log.weight_kg = validate_weight(weight_kg)?;
    }
    if let Some(notes) = body.notes {
        log.notes = notes;
    }
    state.store.update_weight_log(&log).await?;

    Ok(Json(
        json!({ "message": "Weight log updated", "weight_log": log }),
    ))
}

/// DELETE /weight-logs/{log_id}
pub async fn delete_weight_log(
    State(state): State<PawtrackState>,
    Path(log_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    if state.store.find_weight_log(log_id).await?.is_none() {
        return Err(PawtrackError::not_found("Weight log not found"));
    }
    state.store.delete_weight_log(log_id).await?;
    Ok(Json(json!({ "message": "Weight log deleted" })))
}

#[cfg(test)]
mod tests {
    use super::validate_weight;

    #[test]
    fn weight_must_be_strictly_positive() {
        assert!(validate_weight(25.5).is_ok());
        assert!(validate_weight(0.0).is_err());
        assert!(validate_weight(-3.2).is_err());
    }
}
