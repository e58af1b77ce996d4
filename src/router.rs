use axum::routing::{get, post};
use axum::Router;

use crate::auth::Authenticator;
use crate::db::sqlite::EventStore;
use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub auth: Authenticator,
    pub events: EventStore,
}

impl AppState {
    pub fn new(auth: Authenticator, events: EventStore) -> Self {
        Self { auth, events }
    }
}

/// Build the full HTTP surface. Everything under /logeventos requires a
/// bearer token; /token is the only unauthenticated route.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/token", post(handlers::token::login))
        .route(
            "/logeventos/",
            post(handlers::events::create).get(handlers::events::list),
        )
        .route(
            "/logeventos/{id}",
            get(handlers::events::get_one)
                .put(handlers::events::update)
                .patch(handlers::events::patch)
                .delete(handlers::events::delete),
        )
        .with_state(state)
}
