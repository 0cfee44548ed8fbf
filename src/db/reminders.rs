//! Reminder queries: per-pet listing with type/status filters, and the two
//! global date-window views (overdue, due soon).

use crate::db::models::Reminder;
use crate::db::sqlite::{PetStore, date_to_text, text_to_date};
use crate::error::PawtrackError;
use chrono::{Days, NaiveDate};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// The fixed set of reminder categories.
pub const REMINDER_TYPES: [&str; 4] = ["vaccine", "weight", "diet", "general"];

/// How many days ahead the "due soon" view looks.
pub const DUE_SOON_WINDOW_DAYS: u64 = 7;

/// Status narrowing for the per-pet reminder listing. Unrecognized values
/// in the query string are ignored rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReminderStatus {
    /// Due today or later.
    Active,
    /// Due before today.
    Overdue,
    Sent,
    Pending,
}

impl ReminderStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "overdue" => Some(Self::Overdue),
            "sent" => Some(Self::Sent),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ReminderFilter {
    pub reminder_type: Option<String>,
    pub status: Option<ReminderStatus>,
    pub limit: Option<i64>,
}

const REMINDER_SELECT: &str =
    "SELECT id, pet_id, reminder_type, due_date, message, is_sent FROM reminder";

impl PetStore {
    pub async fn insert_reminder(&self, mut reminder: Reminder) -> Result<Reminder, PawtrackError> {
        let res = sqlx::query(
            r#"INSERT INTO reminder (pet_id, reminder_type, due_date, message, is_sent)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(reminder.pet_id)
        .bind(&reminder.reminder_type)
        .bind(date_to_text(reminder.due_date))
        .bind(&reminder.message)
        .bind(reminder.is_sent as i64)
        .execute(self.pool())
        .await?;
        reminder.id = res.last_insert_rowid();
        Ok(reminder)
    }

    pub async fn find_reminder(&self, id: i64) -> Result<Option<Reminder>, PawtrackError> {
        let row = sqlx::query(&format!("{REMINDER_SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        row.map(row_to_reminder).transpose()
    }

    pub async fn reminders_for_pet(
        &self,
        pet_id: i64,
        filter: &ReminderFilter,
        today: NaiveDate,
    ) -> Result<Vec<Reminder>, PawtrackError> {
        let mut sql = format!("{REMINDER_SELECT} WHERE pet_id = ?");
        let mut binds: Vec<String> = Vec::new();
        if let Some(reminder_type) = &filter.reminder_type {
            sql.push_str(" AND reminder_type = ?");
            binds.push(reminder_type.clone());
        }
        match filter.status {
            Some(ReminderStatus::Active) => {
                sql.push_str(" AND due_date >= ?");
                binds.push(date_to_text(today));
            }
            Some(ReminderStatus::Overdue) => {
                sql.push_str(" AND due_date < ?");
                binds.push(date_to_text(today));
            }
            Some(ReminderStatus::Sent) => sql.push_str(" AND is_sent = 1"),
            Some(ReminderStatus::Pending) => sql.push_str(" AND is_sent = 0"),
            None => {}
        }
        sql.push_str(" ORDER BY due_date");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        let mut query = sqlx::query(&sql).bind(pet_id);
        for bind in binds {
            query = query.bind(bind);
        }
        let rows = query.fetch_all(self.pool()).await?;
        rows.into_iter().map(row_to_reminder).collect()
    }

    /// All unsent reminders whose due date has passed, oldest first.
    pub async fn overdue_reminders(&self, today: NaiveDate) -> Result<Vec<Reminder>, PawtrackError> {
        let rows = sqlx::query(&format!(
            "{REMINDER_SELECT} WHERE due_date < ? AND is_sent = 0 ORDER BY due_date"
        ))
        .bind(date_to_text(today))
        .fetch_all(self.pool())
        .await?;
        rows.into_iter().map(row_to_reminder).collect()
    }

    /// All unsent reminders due within the next `DUE_SOON_WINDOW_DAYS` days
    /// (inclusive on both ends), soonest first.
    pub async fn due_soon_reminders(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<Reminder>, PawtrackError> {
        let horizon = today + Days::new(DUE_SOON_WINDOW_DAYS);
        let rows = sqlx::query(&format!(
            "{REMINDER_SELECT} WHERE due_date >= ? AND due_date <= ? AND is_sent = 0 ORDER BY due_date"
        ))
        .bind(date_to_text(today))
        .bind(date_to_text(horizon))
        .fetch_all(self.pool())
        .await?;
        rows.into_iter().map(row_to_reminder).collect()
    }

    pub async fn update_reminder(&self, reminder: &Reminder) -> Result<(), PawtrackError> {
        sqlx::query(
            "UPDATE reminder SET reminder_type = ?, due_date = ?, message = ?, is_sent = ? WHERE id = ?",
        )
        .bind(&reminder.reminder_type)
        .bind(date_to_text(reminder.due_date))
        .bind(&reminder.message)
        .bind(reminder.is_sent as i64)
        .bind(reminder.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    pub async fn delete_reminder(&self, id: i64) -> Result<u64, PawtrackError> {
        let res = sqlx::query("DELETE FROM reminder WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(res.rows_affected())
    }
}

fn row_to_reminder(row: SqliteRow) -> Result<Reminder, PawtrackError> {
    let due_date: String = row.try_get("due_date")?;
    let is_sent: i64 = row.try_get("is_sent")?;
    Ok(Reminder {
        id: row.try_get("id")?,
        pet_id: row.try_get("pet_id")?,
        reminder_type: row.try_get("reminder_type")?,
        due_date: text_to_date(&due_date)?,
        message: row.try_get("message")?,
        is_sent: is_sent != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::ReminderStatus;

    #[test]
    fn status_parse_accepts_known_values() {
        assert_eq!(ReminderStatus::parse("active"), Some(ReminderStatus::Active));
        assert_eq!(ReminderStatus::parse("overdue"), Some(ReminderStatus::Overdue));
        assert_eq!(ReminderStatus::parse("sent"), Some(ReminderStatus::Sent));
        assert_eq!(ReminderStatus::parse("pending"), Some(ReminderStatus::Pending));
    }

    #[test]
    fn status_parse_ignores_unknown_values() {
        assert_eq!(ReminderStatus::parse("done"), None);
        assert_eq!(ReminderStatus::parse(""), None);
    }
}
