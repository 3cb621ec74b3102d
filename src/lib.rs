// Blog CMS API: user authentication and hierarchical content categories

pub mod auth;
pub mod categories;
pub mod config;
pub mod db;
pub mod error;
pub mod response;
pub mod validation;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthService, UserRepository};
use categories::{CategoryRepository, CategoryStore};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::login_handler,
        auth::handlers::register_handler,
        auth::handlers::userinfo_handler,
        auth::handlers::logout_handler,
        categories::handlers::list_categories,
        categories::handlers::category_tree,
        categories::handlers::get_category,
        categories::handlers::create_category,
        categories::handlers::update_category,
        categories::handlers::delete_category,
    ),
    components(schemas(
        auth::LoginRequest,
        auth::LoginResponse,
        auth::RegisterRequest,
        auth::UserResponse,
        categories::Category,
        categories::CategoryNode,
        categories::CreateCategory,
        categories::UpdateCategory,
        categories::CreatedId,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login, registration and current-user endpoints"),
        (name = "categories", description = "Content category management")
    ),
    info(
        title = "Blog CMS API",
        version = "0.1.0",
        description = "Authentication and category management for the blog CMS"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub categories: Arc<dyn CategoryStore>,
}

impl AppState {
    /// Wire the Postgres-backed stores
    pub fn from_pool(pool: db::DbPool, config: &config::AppConfig) -> Self {
        let users = Arc::new(UserRepository::new(pool.clone()));
        let tokens = auth::TokenService::from_config(config);
        Self {
            auth: Arc::new(AuthService::new(users, tokens)),
            categories: Arc::new(CategoryRepository::new(pool)),
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<AppState> for Arc<dyn CategoryStore> {
    fn from_ref(state: &AppState) -> Self {
        state.categories.clone()
    }
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
pub fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/v1/auth/login", post(auth::login_handler))
        .route("/v1/auth/register", post(auth::register_handler))
        .route("/v1/auth/logout", post(auth::logout_handler))
        .route("/v1/auth/userinfo", get(auth::userinfo_handler))
        .route(
            "/v1/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/v1/categories/tree", get(categories::category_tree))
        .route(
            "/v1/categories/:id",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .layer(cors)
        .with_state(state)
}
