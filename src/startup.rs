use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    routing::{get, patch, post},
};
use chrono::Duration;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower_http::trace::TraceLayer;

use crate::configuration::Settings;
use crate::routes::auth::{login, signup};
use crate::routes::bookmark::{
    create_bookmark, delete_bookmark, edit_bookmark, get_bookmark, list_bookmarks,
};
use crate::routes::health::health_check;
use crate::routes::user::{edit_user, profile};
use crate::services::auth::AuthService;
use crate::services::bookmark::BookmarkService;
use crate::services::token::TokenIssuer;
use crate::services::user::UserService;
use crate::store::{BookmarkRepository, BookmarkStore, UserRepository, UserStore};

#[derive(Clone, Debug, FromRef)]
pub struct AppState {
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub bookmark_service: BookmarkService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        bookmarks: Arc<dyn BookmarkStore>,
        tokens: TokenIssuer,
    ) -> Self {
        Self {
            auth_service: AuthService::new(users.clone(), tokens),
            user_service: UserService::new(users),
            bookmark_service: BookmarkService::new(bookmarks),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/users/profile", get(profile))
        .route("/users", patch(edit_user))
        .route("/bookmarks", get(list_bookmarks).post(create_bookmark))
        .route(
            "/bookmarks/{id}",
            get(get_bookmark)
                .patch(edit_bookmark)
                .delete(delete_bookmark),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let pg_pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(settings.database.with_db());

    sqlx::migrate!("./migrations").run(&pg_pool).await?;

    let tokens = TokenIssuer::new(
        settings.auth.jwt_secret.expose_secret().as_bytes(),
        Duration::minutes(settings.auth.token_ttl_minutes),
    );
    let state = AppState::new(
        Arc::new(UserRepository::new(pg_pool.clone())),
        Arc::new(BookmarkRepository::new(pg_pool)),
        tokens,
    );

    let address = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "Listening");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
