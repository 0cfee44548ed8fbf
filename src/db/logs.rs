//! Query and mutation methods for the three per-pet log tables, including
//! the filtered listings and the derived views (vaccine "upcoming" window,
//! weight trend page).

use crate::db::models::{DietLog, VaccineLog, WeightLog, WeightTrendPoint};
use crate::db::sqlite::{PetStore, date_to_text, text_to_date};
use crate::error::PawtrackError;
use chrono::{Days, NaiveDate, NaiveTime};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Optional narrowing for `GET /diet-logs/pet/{pet_id}`.
#[derive(Debug, Default)]
pub struct DietLogFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub meal_type: Option<String>,
}

/// Optional narrowing for `GET /weight-logs/pet/{pet_id}`.
#[derive(Debug, Default)]
pub struct WeightLogFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<i64>,
}

/// Optional narrowing for `GET /vaccine-logs/pet/{pet_id}`.
#[derive(Debug, Default)]
pub struct VaccineLogFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub vaccine_type: Option<String>,
}

/// How many days ahead the vaccine "upcoming" view looks.
pub const UPCOMING_VACCINE_WINDOW_DAYS: u64 = 30;

/// Page size of the weight trend view.
pub const WEIGHT_TREND_LIMIT: i64 = 10;

const DIET_SELECT: &str = "SELECT id, pet_id, date, description, meal_type, food_amount, unit, \
                           feeding_time, notes FROM diet_log";
const WEIGHT_SELECT: &str = "SELECT id, pet_id, date, weight_kg, notes FROM weight_log";
const VACCINE_SELECT: &str = "SELECT id, pet_id, date, vaccine_type, notes, next_due_date, \
                              reminder_enabled FROM vaccine_log";

impl PetStore {
    // --- diet logs ---

    pub async fn insert_diet_log(&self, mut log: DietLog) -> Result<DietLog, PawtrackError> {
        let res = sqlx::query(
            r#"INSERT INTO diet_log (pet_id, date, description, meal_type, food_amount, unit, feeding_time, notes)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(log.pet_id)
        .bind(date_to_text(log.date))
        .bind(&log.description)
        .bind(&log.meal_type)
        .bind(log.food_amount)
        .bind(&log.unit)
        .bind(log.feeding_time.map(time_to_text))
        .bind(&log.notes)
        .execute(self.pool())
        .await?;
        log.id = res.last_insert_rowid();
        Ok(log)
    }

    pub async fn find_diet_log(&self, id: i64) -> Result<Option<DietLog>, PawtrackError> {
        let row = sqlx::query(&format!("{DIET_SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.map(row_to_diet_log).transpose()
    }

    pub async fn diet_logs_for_pet(
        &self,
        pet_id: i64,
        filter: &DietLogFilter,
    ) -> Result<Vec<DietLog>, PawtrackError> {
        let mut sql = format!("{DIET_SELECT} WHERE pet_id = ?");
        let mut binds: Vec<String> = Vec::new();
        if let Some(start) = filter.start_date {
            sql.push_str(" AND date >= ?");
            binds.push(date_to_text(start));
        }
        if let Some(end) = filter.end_date {
            sql.push_str(" AND date <= ?");
            binds.push(date_to_text(end));
        }
        if let Some(meal_type) = &filter.meal_type {
            sql.push_str(" AND meal_type = ?");
            binds.push(meal_type.clone());
        }
        sql.push_str(" ORDER BY date DESC, feeding_time DESC");

        let mut query = sqlx::query(&sql).bind(pet_id);
        for bind in binds {
            query = query.bind(bind);
        }
        let rows = query.fetch_all(self.pool()).await?;
        rows.into_iter().map(row_to_diet_log).collect()
    }

    pub async fn update_diet_log(&self, log: &DietLog) -> Result<(), PawtrackError> {
        sqlx::query(
            r#"UPDATE diet_log SET date = ?, description = ?, meal_type = ?, food_amount = ?,
               unit = ?, feeding_time = ?, notes = ? WHERE id = ?"#,
        )
        .bind(date_to_text(log.date))
        .bind(&log.description)
        .bind(&log.meal_type)
        .bind(log.food_amount)
        .bind(&log.unit)
        .bind(log.feeding_time.map(time_to_text))
        .bind(&log.notes)
        .bind(log.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn delete_diet_log(&self, id: i64) -> Result<u64, PawtrackError> {
        let res = sqlx::query("DELETE FROM diet_log WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected())
    }

    // --- weight logs ---

    pub async fn insert_weight_log(&self, mut log: WeightLog) -> Result<WeightLog, PawtrackError> {
        let res = sqlx::query(
            "INSERT INTO weight_log (pet_id, date, weight_kg, notes) VALUES (?, ?, ?, ?)",
        )
        .bind(log.pet_id)
        .bind(date_to_text(log.date))
        .bind(log.weight_kg)
        .bind(&log.notes)
        .execute(self.pool())
        .await?;
        log.id = res.last_insert_rowid();
        Ok(log)
    }

    pub async fn find_weight_log(&self, id: i64) -> Result<Option<WeightLog>, PawtrackError> {
        let row = sqlx::query(&format!("{WEIGHT_SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.map(row_to_weight_log).transpose()
    }

    pub async fn weight_logs_for_pet(
        &self,
        pet_id: i64,
        filter: &WeightLogFilter,
    ) -> Result<Vec<WeightLog>, PawtrackError> {
        let mut sql = format!("{WEIGHT_SELECT} WHERE pet_id = ?");
        let mut binds: Vec<String> = Vec::new();
        if let Some(start) = filter.start_date {
            sql.push_str(" AND date >= ?");
            binds.push(date_to_text(start));
        }
        if let Some(end) = filter.end_date {
            sql.push_str(" AND date <= ?");
            binds.push(date_to_text(end));
        }
        sql.push_str(" ORDER BY date DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut query = sqlx::query(&sql).bind(pet_id);
        for bind in binds {
            query = query.bind(bind);
        }
        let rows = query.fetch_all(self.pool()).await?;
        rows.into_iter().map(row_to_weight_log).collect()
    }

    /// The most recent `WEIGHT_TREND_LIMIT` readings, newest first, each
    /// annotated with the delta from the next-older reading in the page.
    pub async fn weight_trend_for_pet(
        &self,
        pet_id: i64,
    ) -> Result<Vec<WeightTrendPoint>, PawtrackError> {
        let rows = sqlx::query(&format!(
            "{WEIGHT_SELECT} WHERE pet_id = ? ORDER BY date DESC LIMIT {WEIGHT_TREND_LIMIT}"
        ))
        .bind(pet_id)
        .fetch_all(self.pool())
        .await?;
        let logs = rows
            .into_iter()
            .map(row_to_weight_log)
            .collect::<Result<Vec<_>, _>>()?;

        let trend = logs
            .iter()
            .enumerate()
            .map(|(i, log)| WeightTrendPoint {
                date: log.date,
                weight_kg: log.weight_kg,
                // The oldest row of the page has no predecessor in view.
                change: logs.get(i + 1).map(|older| log.weight_kg - older.weight_kg),
            })
            .collect();
        Ok(trend)
    }

    pub async fn update_weight_log(&self, log: &WeightLog) -> Result<(), PawtrackError> {
        sqlx::query("UPDATE weight_log SET date = ?, weight_kg = ?, notes = ? WHERE id = ?")
            .bind(date_to_text(log.date))
            .bind(log.weight_kg)
            .bind(&log.notes)
            .bind(log.id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    pub async fn delete_weight_log(&self, id: i64) -> Result<u64, PawtrackError> {
        let res = sqlx::query("DELETE FROM weight_log WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected())
    }

    // --- vaccine logs ---

    pub async fn insert_vaccine_log(
        &self,
        mut log: VaccineLog,
    ) -> Result<VaccineLog, PawtrackError> {
        let res = sqlx::query(
            r#"INSERT INTO vaccine_log (pet_id, date, vaccine_type, notes, next_due_date, reminder_enabled)
               VALUES (?, ?, ?, ?, ?, ?)"#,
        )
        .bind(log.pet_id)
        .bind(date_to_text(log.date))
        .bind(&log.vaccine_type)
        .bind(&log.notes)
        .bind(log.next_due_date.map(date_to_text))
        .bind(log.reminder_enabled as i64)
        .execute(self.pool())
        .await?;
        log.id = res.last_insert_rowid();
        Ok(log)
    }

    pub async fn find_vaccine_log(&self, id: i64) -> Result<Option<VaccineLog>, PawtrackError> {
        let row = sqlx::query(&format!("{VACCINE_SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.map(row_to_vaccine_log).transpose()
    }

    pub async fn vaccine_logs_for_pet(
        &self,
        pet_id: i64,
        filter: &VaccineLogFilter,
    ) -> Result<Vec<VaccineLog>, PawtrackError> {
        let mut sql = format!("{VACCINE_SELECT} WHERE pet_id = ?");
        let mut binds: Vec<String> = Vec::new();
        if let Some(start) = filter.start_date {
            sql.push_str(" AND date >= ?");
            binds.push(date_to_text(start));
        }
        if let Some(end) = filter.end_date {
            sql.push_str(" AND date <= ?");
            binds.push(date_to_text(end));
        }
        if let Some(vaccine_type) = &filter.vaccine_type {
            sql.push_str(" AND vaccine_type = ?");
            binds.push(vaccine_type.clone());
        }
        sql.push_str(" ORDER BY date DESC");

        let mut query = sqlx::query(&sql).bind(pet_id);
        for bind in binds {
            query = query.bind(bind);
        }
        let rows = query.fetch_all(self.pool()).await?;
        rows.into_iter().map(row_to_vaccine_log).collect()
    }

    /// Vaccines due within the next `UPCOMING_VACCINE_WINDOW_DAYS` days
    /// (inclusive on both ends) whose reminder flag is enabled.
    pub async fn upcoming_vaccines_for_pet(
        &self,
        pet_id: i64,
        today: NaiveDate,
    ) -> Result<Vec<VaccineLog>, PawtrackError> {
        let horizon = today + Days::new(UPCOMING_VACCINE_WINDOW_DAYS);
        let rows = sqlx::query(&format!(
            "{VACCINE_SELECT} WHERE pet_id = ? AND next_due_date >= ? AND next_due_date <= ? \
             AND reminder_enabled = 1 ORDER BY next_due_date"
        ))
        .bind(pet_id)
        .bind(date_to_text(today))
        .bind(date_to_text(horizon))
        .fetch_all(self.pool())
        .await?;
        rows.into_iter().map(row_to_vaccine_log).collect()
    }

    pub async fn update_vaccine_log(&self, log: &VaccineLog) -> Result<(), PawtrackError> {
        sqlx::query(
            r#"UPDATE vaccine_log SET date = ?, vaccine_type = ?, notes = ?, next_due_date = ?,
               reminder_enabled = ? WHERE id = ?"#,
        )
        .bind(date_to_text(log.date))
        .bind(&log.vaccine_type)
        .bind(&log.notes)
        .bind(log.next_due_date.map(date_to_text))
        .bind(log.reminder_enabled as i64)
        .bind(log.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn delete_vaccine_log(&self, id: i64) -> Result<u64, PawtrackError> {
        let res = sqlx::query("DELETE FROM vaccine_log WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected())
    }
}

fn row_to_diet_log(row: SqliteRow) -> Result<DietLog, PawtrackError> {
    let date: String = row.try_get("date")?;
    let feeding_time: Option<String> = row.try_get("feeding_time")?;
    Ok(DietLog {
        id: row.try_get("id")?,
        pet_id: row.try_get("pet_id")?,
        date: text_to_date(&date)?,
        description: row.try_get("description")?,
        meal_type: row.try_get("meal_type")?,
        food_amount: row.try_get("food_amount")?,
        unit: row.try_get("unit")?,
        feeding_time: feeding_time.as_deref().map(text_to_time).transpose()?,
        notes: row.try_get("notes")?,
    })
}

fn row_to_weight_log(row: SqliteRow) -> Result<WeightLog, PawtrackError> {
    let date: String = row.try_get("date")?;
    Ok(WeightLog {
        id: row.try_get("id")?,
        pet_id: row.try_get("pet_id")?,
        date: text_to_date(&date)?,
        weight_kg: row.try_get("weight_kg")?,
        notes: row.try_get("notes")?,
    })
}

fn row_to_vaccine_log(row: SqliteRow) -> Result<VaccineLog, PawtrackError> {
    let date: String = row.try_get("date")?;
    let next_due_date: Option<String> = row.try_get("next_due_date")?;
    let reminder_enabled: i64 = row.try_get("reminder_enabled")?;
    Ok(VaccineLog {
        id: row.try_get("id")?,
        pet_id: row.try_get("pet_id")?,
        date: text_to_date(&date)?,
        vaccine_type: row.try_get("vaccine_type")?,
        notes: row.try_get("notes")?,
        next_due_date: next_due_date.as_deref().map(text_to_date).transpose()?,
        reminder_enabled: reminder_enabled != 0,
    })
}

/// Format a feeding time for storage (`HH:MM`).
fn time_to_text(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parse a stored `HH:MM` column value back into a time.
fn text_to_time(s: &str) -> Result<NaiveTime, PawtrackError> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|e| PawtrackError::Database(sqlx::Error::Decode(Box::new(e))))
}
