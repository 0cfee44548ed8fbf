use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::db::PetStore;
use crate::handlers::{diet_logs, pets, reminders, users, vaccine_logs, weight_logs};

#[derive(Clone)]
pub struct PawtrackState {
    pub store: PetStore,
}

impl PawtrackState {
    pub fn new(store: PetStore) -> Self {
        Self { store }
    }
}

/// Build the full API router. One route group per entity, mounted flat.
pub fn pawtrack_router(state: PawtrackState) -> Router {
    Router::new()
        .route("/users", get(users::list_users))
        .route("/users/register", post(users::register_user))
        .route("/users/login", post(users::login_user))
        .route(
            "/users/{user_id}",
            patch(users::update_user).delete(users::delete_user),
        )
        .route("/pets", post(pets::create_pet).get(pets::list_pets))
        .route(
            "/pets/{pet_id}",
            get(pets::get_pet)
                .patch(pets::update_pet)
                .put(pets::update_pet)
                .delete(pets::delete_pet),
        )
        .route("/diet-logs", post(diet_logs::create_diet_log))
        .route("/diet-logs/pet/{pet_id}", get(diet_logs::list_pet_diet_logs))
        .route(
            "/diet-logs/{log_id}",
            get(diet_logs::get_diet_log)
                .put(diet_logs::update_diet_log)
                .delete(diet_logs::delete_diet_log),
        )
        .route("/weight-logs", post(weight_logs::create_weight_log))
        .route(
            "/weight-logs/pet/{pet_id}",
            get(weight_logs::list_pet_weight_logs),
        )
        .route(
            "/weight-logs/pet/{pet_id}/trend",
            get(weight_logs::get_weight_trend),
        )
        .route(
            "/weight-logs/{log_id}",
            get(weight_logs::get_weight_log)
                .put(weight_logs::update_weight_log)
                .delete(weight_logs::delete_weight_log),
        )
        .route("/vaccine-logs", post(vaccine_logs::create_vaccine_log))
        .route(
            "/vaccine-logs/pet/{pet_id}",
            get(vaccine_logs::list_pet_vaccine_logs),
        )
        .route(
            "/vaccine-logs/pet/{pet_id}/upcoming",
            get(vaccine_logs::get_upcoming_vaccines),
        )
        .route(
            "/vaccine-logs/{log_id}",
            get(vaccine_logs::get_vaccine_log)
                .put(vaccine_logs::update_vaccine_log)
                .delete(vaccine_logs::delete_vaccine_log),
        )
        .route("/reminders", post(reminders::create_reminder))
        .route("/reminders/pet/{pet_id}", get(reminders::list_pet_reminders))
        .route("/reminders/overdue", get(reminders::list_overdue_reminders))
        .route("/reminders/due-soon", get(reminders::list_due_soon_reminders))
        .route(
            "/reminders/{reminder_id}",
            get(reminders::get_reminder)
                .put(reminders::update_reminder)
                .delete(reminders::delete_reminder),
        )
        .route(
            "/reminders/{reminder_id}/mark-sent",
            patch(reminders::mark_reminder_sent),
        )
        .with_state(state)
}
