//! Row structs mirroring the database tables, plus their JSON shapes.
//!
//! Dates serialize as `YYYY-MM-DD` (chrono's default for `NaiveDate`);
//! feeding times use a custom `HH:MM` serializer to match the wire contract.

use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    // Echoed in responses for parity with the service this replaces. Known
    // weakness; see DESIGN.md.
    pub password: String,
}

/// User plus their owned pets, as returned by the user listing and login.
/// Pets are serialized without their log collections.
#[derive(Debug, Serialize)]
pub struct UserWithPets {
    #[serde(flatten)]
    pub user: User,
    pub pets: Vec<Pet>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Pet {
    pub id: i64,
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub color: Option<String>,
    pub microchip_id: Option<String>,
    pub notes: Option<String>,
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DietLog {
    pub id: i64,
    pub pet_id: i64,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub meal_type: Option<String>,
    pub food_amount: Option<f64>,
    pub unit: Option<String>,
    #[serde(serialize_with = "serialize_hh_mm")]
    pub feeding_time: Option<NaiveTime>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeightLog {
    pub id: i64,
    pub pet_id: i64,
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct VaccineLog {
    pub id: i64,
    pub pet_id: i64,
    pub date: NaiveDate,
    pub vaccine_type: String,
    pub notes: Option<String>,
    pub next_due_date: Option<NaiveDate>,
    pub reminder_enabled: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Reminder {
    pub id: i64,
    pub pet_id: i64,
    pub reminder_type: String,
    pub due_date: NaiveDate,
    pub message: Option<String>,
    pub is_sent: bool,
}

/// One entry of the weight-trend view: the reading plus the signed delta
/// from the next-older reading in the same page. The oldest entry in the
/// page has no predecessor in view, so its `change` is null.
#[derive(Debug, Serialize)]
pub struct WeightTrendPoint {
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub change: Option<f64>,
}

fn serialize_hh_mm<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match time {
        Some(t) => serializer.serialize_some(&t.format("%H:%M").to_string()),
        None => serializer.serialize_none(),
    }
}
