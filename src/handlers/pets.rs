use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::db::models::Pet;
use crate::error::PawtrackError;
use crate::handlers::{deserialize_some, non_empty, parse_date};
use crate::router::PawtrackState;

#[derive(Debug, Deserialize)]
pub struct CreatePetRequest {
    pub user_id: Option<i64>,
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub birth_date: Option<String>,
    pub color: Option<String>,
    pub microchip_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListPetsQuery {
    pub user_id: Option<i64>,
}

/// Fields are tri-state: absent leaves the column alone, `null` clears it.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePetRequest {
    // Advisory ownership check only; not an authentication boundary.
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub species: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub breed: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub birth_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub color: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub microchip_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct DeletePetQuery {
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeletePetBody {
    pub user_id: Option<i64>,
}

/// POST /pets
pub async fn create_pet(
    State(state): State<PawtrackState>,
    Json(body): Json<CreatePetRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(user_id) = body.user_id else {
        return Err(PawtrackError::validation("user_id is required"));
    };
    let Some(owner) = state.store.find_user(user_id).await? else {
        return Err(PawtrackError::not_found("User not found"));
    };

    let birth_date = non_empty(body.birth_date.as_deref())
        .map(|s| parse_date("birth_date", s))
        .transpose()?;

    let pet = state
        .store
        .insert_pet(Pet {
            id: 0,
            name: body.name,
            species: body.species,
            breed: body.breed,
            birth_date,
            color: body.color,
            microchip_id: body.microchip_id,
            notes: body.notes,
            user_id: owner.id,
        })
        .await?;
    info!(pet_id = pet.id, user_id = owner.id, "created pet");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Pet created", "pet": pet })),
    ))
}

/// GET /pets?user_id= — without the filter this returns every pet, a
/// development-mode affordance; deployments should restrict it upstream.
pub async fn list_pets(
    State(state): State<PawtrackState>,
    Query(query): Query<ListPetsQuery>,
) -> Result<impl IntoResponse, PawtrackError> {
    let pets = state.store.list_pets(query.user_id).await?;
    Ok(Json(json!({ "pets": pets })))
}

/// GET /pets/{pet_id}
pub async fn get_pet(
    State(state): State<PawtrackState>,
    Path(pet_id): Path<i64>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(pet) = state.store.find_pet(pet_id).await? else {
        return Err(PawtrackError::not_found("Pet not found"));
    };
    Ok(Json(json!({ "pet": pet })))
}

/// PATCH or PUT /pets/{pet_id}
pub async fn update_pet(
    State(state): State<PawtrackState>,
    Path(pet_id): Path<i64>,
    Json(body): Json<UpdatePetRequest>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(mut pet) = state.store.find_pet(pet_id).await? else {
        return Err(PawtrackError::not_found("Pet not found"));
    };

    if let Some(requester_id) = body.user_id
        && requester_id != pet.user_id
    {
        return Err(PawtrackError::PermissionDenied);
    }

    if let Some(name) = body.name {
        pet.name = name;
    }
    if let Some(species) = body.species {
        pet.species = species;
    }
    if let Some(breed) = body.breed {
        pet.breed = breed;
    }
    if let Some(birth_date) = body.birth_date {
        pet.birth_date = match non_empty(birth_date.as_deref()) {
            Some(s) => Some(parse_date("birth_date", s)?),
            None => None,
        };
    }
    if let Some(color) = body.color {
        pet.color = color;
    }
    if let Some(microchip_id) = body.microchip_id {
        pet.microchip_id = microchip_id;
    }
    if let Some(notes) = body.notes {
        pet.notes = notes;
    }
    state.store.update_pet(&pet).await?;

    Ok(Json(json!({ "message": "Pet updated", "pet": pet })))
}

/// DELETE /pets/{pet_id} — the advisory user_id may arrive as a query
/// parameter or in the JSON body. Logs are not cascade-deleted.
pub async fn delete_pet(
    State(state): State<PawtrackState>,
    Path(pet_id): Path<i64>,
    Query(query): Query<DeletePetQuery>,
    body: Option<Json<DeletePetBody>>,
) -> Result<impl IntoResponse, PawtrackError> {
    let Some(pet) = state.store.find_pet(pet_id).await? else {
        return Err(PawtrackError::not_found("Pet not found"));
    };

    let requester_id = query
        .user_id
        .or_else(|| body.and_then(|Json(b)| b.user_id));
    if let Some(requester_id) = requester_id
        && requester_id != pet.user_id
    {
        return Err(PawtrackError::PermissionDenied);
    }

    state.store.delete_pet(pet_id).await?;
    info!(pet_id, "deleted pet");

    Ok(Json(json!({ "message": "Pet deleted" })))
}
