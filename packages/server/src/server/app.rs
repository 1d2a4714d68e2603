//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use mailer::{MailerOptions, MailerService};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::domains::employees::models::Employee;
use crate::domains::pending_review::poller::{spawn_poller, POLL_INTERVAL};
use crate::kernel::{EmailSender, LoggingMailer, MailerAdapter, ServerDeps};
use crate::server::graphql::{create_schema, GraphQLContext};
use crate::server::middleware::{jwt_auth_middleware, AuthUser};
use crate::server::routes::{graphql_batch_handler, graphql_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub db_pool: PgPool,
    pub server_deps: Arc<ServerDeps>,
    pub jwt_service: Arc<JwtService>,
}

/// Middleware to create GraphQLContext per-request
///
/// Also drops authentication for deactivated or unknown employees: a token
/// outlives the directory row that minted it.
async fn create_graphql_context(
    Extension(state): Extension<AxumAppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let mut auth_user = request.extensions().get::<AuthUser>().cloned();

    if let Some(user) = &auth_user {
        match Employee::find_by_id_optional(user.employee_id, &state.db_pool).await {
            Ok(Some(employee)) if employee.is_active => {}
            _ => auth_user = None,
        }
    }

    let context = GraphQLContext::new(state.db_pool.clone(), state.server_deps.clone(), auth_user);
    request.extensions_mut().insert(context);

    next.run(request).await
}

/// Build the Axum application router
///
/// Returns (Router, Arc<ServerDeps>) - deps are also needed by scheduled
/// tasks and the migrate CLI.
pub async fn build_app(
    pool: PgPool,
    jwt_secret: String,
    jwt_issuer: String,
    mailer_endpoint: Option<String>,
    mailer_api_key: Option<String>,
    allowed_origins: Vec<String>,
) -> (Router, Arc<ServerDeps>) {
    // Create GraphQL schema (singleton)
    let schema = Arc::new(create_schema());

    // Email goes through the hosted send-email function when configured,
    // otherwise sends are logged and dropped.
    let email_sender: Arc<dyn EmailSender> = match (mailer_endpoint, mailer_api_key) {
        (Some(endpoint), Some(api_key)) => Arc::new(MailerAdapter::new(Arc::new(
            MailerService::new(MailerOptions { endpoint, api_key }),
        ))),
        _ => {
            tracing::warn!("MAILER_ENDPOINT/MAILER_API_KEY not set - email notifications disabled");
            Arc::new(LoggingMailer)
        }
    };

    // Background refresh loop for the reviewer dashboard worklist.
    let pending_review = spawn_poller(pool.clone(), POLL_INTERVAL);

    let server_deps = Arc::new(ServerDeps::new(pool.clone(), email_sender, pending_review));

    let jwt_service = Arc::new(JwtService::new(&jwt_secret, jwt_issuer));

    let app_state = AxumAppState {
        db_pool: pool,
        server_deps: server_deps.clone(),
        jwt_service: jwt_service.clone(),
    };

    // CORS: explicit origin list in production, any origin in development.
    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
    };

    let jwt_service_for_middleware = jwt_service.clone();

    // Rate limiting: 10 requests per second per IP with bursts of 20.
    let rate_limit_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    let mut router = Router::new()
        .route("/graphql", post(graphql_handler))
        .route("/graphql/batch", post(graphql_batch_handler));

    // GraphiQL only in debug builds (development)
    #[cfg(debug_assertions)]
    {
        router = router.route(
            "/graphql",
            get(juniper_axum::graphiql("/graphql", None::<&str>)),
        );
    }

    let app = router
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(create_graphql_context))
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(rate_limit_layer)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(schema);

    (app, server_deps)
}
