use crate::db::models::{Pet, User};
use crate::db::schema::SQLITE_INIT;
use crate::error::PawtrackError;
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::str::FromStr;

pub type SqlitePool = Pool<Sqlite>;

/// Connect to the SQLite database, creating the file if it does not exist.
pub async fn connect(database_url: &str) -> Result<SqlitePool, PawtrackError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    Ok(pool)
}

/// Storage context for the whole service. Initialized once at startup and
/// cloned into the router state; handlers never touch SQL directly.
#[derive(Clone)]
pub struct PetStore {
    pool: SqlitePool,
}

impl PetStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), PawtrackError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    // --- users ---

    pub async fn list_users(&self) -> Result<Vec<User>, PawtrackError> {
        let rows = sqlx::query(
            "SELECT id, first_name, last_name, email, password FROM user ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(row_to_user).collect()
    }

    pub async fn find_user(&self, id: i64) -> Result<Option<User>, PawtrackError> {
        let row = sqlx::query("SELECT id, first_name, last_name, email, password FROM user WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_user).transpose()
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, PawtrackError> {
        let row = sqlx::query(
            "SELECT id, first_name, last_name, email, password FROM user WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        row.map(row_to_user).transpose()
    }

    /// Insert a user; the `id` field of the argument is ignored. Returns the
    /// stored row with its assigned id.
    pub async fn insert_user(&self, mut user: User) -> Result<User, PawtrackError> {
        let res = sqlx::query(
            "INSERT INTO user (first_name, last_name, email, password) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password)
        .execute(&self.pool)
        .await?;
        user.id = res.last_insert_rowid();
        Ok(user)
    }

    /// Write all mutable user fields back by id.
    pub async fn update_user(&self, user: &User) -> Result<(), PawtrackError> {
        sqlx::query("UPDATE user SET first_name = ?, last_name = ?, email = ? WHERE id = ?")
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.email)
            .bind(user.id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete a user by id. Owned pets are left in place (no cascade).
    pub async fn delete_user(&self, id: i64) -> Result<u64, PawtrackError> {
        let res = sqlx::query("DELETE FROM user WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    // --- pets ---

    pub async fn find_pets_by_user(&self, user_id: i64) -> Result<Vec<Pet>, PawtrackError> {
        let rows = sqlx::query(&format!("{PET_SELECT} WHERE user_id = ? ORDER BY id"))
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(row_to_pet).collect()
    }

    pub async fn list_pets(&self, user_id: Option<i64>) -> Result<Vec<Pet>, PawtrackError> {
        match user_id {
            Some(user_id) => self.find_pets_by_user(user_id).await,
            None => {
                let rows = sqlx::query(&format!("{PET_SELECT} ORDER BY id"))
                    .fetch_all(&self.pool)
                    .await?;
                rows.into_iter().map(row_to_pet).collect()
            }
        }
    }

    pub async fn find_pet(&self, id: i64) -> Result<Option<Pet>, PawtrackError> {
        let row = sqlx::query(&format!("{PET_SELECT} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(row_to_pet).transpose()
    }

    pub async fn insert_pet(&self, mut pet: Pet) -> Result<Pet, PawtrackError> {
        let res = sqlx::query(
            r#"INSERT INTO pet (name, species, breed, birth_date, color, microchip_id, notes, user_id)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(&pet.breed)
        .bind(pet.birth_date.map(date_to_text))
        .bind(&pet.color)
        .bind(&pet.microchip_id)
        .bind(&pet.notes)
        .bind(pet.user_id)
        .execute(&self.pool)
        .await?;
        pet.id = res.last_insert_rowid();
        Ok(pet)
    }

    pub async fn update_pet(&self, pet: &Pet) -> Result<(), PawtrackError> {
        sqlx::query(
            r#"UPDATE pet SET name = ?, species = ?, breed = ?, birth_date = ?,
               color = ?, microchip_id = ?, notes = ? WHERE id = ?"#,
        )
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(&pet.breed)
        .bind(pet.birth_date.map(date_to_text))
        .bind(&pet.color)
        .bind(&pet.microchip_id)
        .bind(&pet.notes)
        .bind(pet.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Delete a pet by id. Its logs and reminders are left in place (no cascade).
    pub async fn delete_pet(&self, id: i64) -> Result<u64, PawtrackError> {
        let res = sqlx::query("DELETE FROM pet WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

const PET_SELECT: &str =
    "SELECT id, name, species, breed, birth_date, color, microchip_id, notes, user_id FROM pet";

fn row_to_user(row: SqliteRow) -> Result<User, PawtrackError> {
    Ok(User {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        password: row.try_get("password")?,
    })
}

fn row_to_pet(row: SqliteRow) -> Result<Pet, PawtrackError> {
    let birth_date: Option<String> = row.try_get("birth_date")?;
    Ok(Pet {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        species: row.try_get("species")?,
        breed: row.try_get("breed")?,
        birth_date: birth_date.as_deref().map(text_to_date).transpose()?,
        color: row.try_get("color")?,
        microchip_id: row.try_get("microchip_id")?,
        notes: row.try_get("notes")?,
        user_id: row.try_get("user_id")?,
    })
}

/// Format a date for storage (`YYYY-MM-DD`).
pub(crate) fn date_to_text(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a stored `YYYY-MM-DD` column value back into a date.
pub(crate) fn text_to_date(s: &str) -> Result<NaiveDate, PawtrackError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| PawtrackError::Database(sqlx::Error::Decode(Box::new(e))))
}
