//! SQL DDL for initializing the pet-care database.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema. Dates are stored as TEXT `YYYY-MM-DD`, feeding times as
/// TEXT `HH:MM`, timestamps as TEXT `YYYY-MM-DD HH:MM:SS`. Zero-padded ISO
/// strings compare lexicographically, which the date-window queries rely on.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS pet (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NULL,
    species TEXT NULL,
    breed TEXT NULL,
    birth_date TEXT NULL,
    color TEXT NULL,
    microchip_id TEXT NULL,
    notes TEXT NULL,
    user_id INTEGER NOT NULL REFERENCES user(id)
);

CREATE TABLE IF NOT EXISTS diet_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pet(id),
    date TEXT NOT NULL,
    description TEXT NULL,
    meal_type TEXT NULL,
    food_amount REAL NULL,
    unit TEXT NULL,
    feeding_time TEXT NULL,
    notes TEXT NULL
);

CREATE TABLE IF NOT EXISTS weight_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pet(id),
    date TEXT NOT NULL,
    weight_kg REAL NOT NULL,
    notes TEXT NULL
);

CREATE TABLE IF NOT EXISTS vaccine_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pet(id),
    date TEXT NOT NULL,
    vaccine_type TEXT NOT NULL,
    notes TEXT NULL,
    next_due_date TEXT NULL,
    reminder_enabled INTEGER NOT NULL DEFAULT 1
);

-- Present in the schema for external collaborators. No handlers are mounted
-- for it in the current API surface.
CREATE TABLE IF NOT EXISTS pet_growth_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pet(id),
    date TEXT NULL,
    image_url TEXT NULL,
    description TEXT NULL,
    created_at TEXT NULL
);

CREATE TABLE IF NOT EXISTS reminder (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pet_id INTEGER NOT NULL REFERENCES pet(id),
    reminder_type TEXT NOT NULL,
    due_date TEXT NOT NULL,
    message TEXT NULL,
    is_sent INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_pet_user_id ON pet(user_id);
CREATE INDEX IF NOT EXISTS idx_diet_log_pet_id ON diet_log(pet_id);
CREATE INDEX IF NOT EXISTS idx_weight_log_pet_id ON weight_log(pet_id);
CREATE INDEX IF NOT EXISTS idx_vaccine_log_pet_id ON vaccine_log(pet_id);
CREATE INDEX IF NOT EXISTS idx_reminder_pet_id ON reminder(pet_id);
CREATE INDEX IF NOT EXISTS idx_reminder_due_date ON reminder(due_date);
"#;
