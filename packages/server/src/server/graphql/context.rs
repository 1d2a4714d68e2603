use sqlx::PgPool;
use std::sync::Arc;

use crate::common::AppState;
use crate::kernel::ServerDeps;
use crate::server::middleware::AuthUser;

/// GraphQL request context
///
/// Shared resources plus the per-request authenticated caller.
#[derive(Clone)]
pub struct GraphQLContext {
    pub db_pool: PgPool,
    deps: Arc<ServerDeps>,
    pub auth_user: Option<AuthUser>,
}

impl juniper::Context for GraphQLContext {}

impl GraphQLContext {
    pub fn new(db_pool: PgPool, deps: Arc<ServerDeps>, auth_user: Option<AuthUser>) -> Self {
        Self {
            db_pool,
            deps,
            auth_user,
        }
    }

    pub fn deps(&self) -> &ServerDeps {
        &self.deps
    }

    /// The caller's role state for this request.
    pub fn state(&self) -> AppState {
        match &self.auth_user {
            Some(user) => AppState::authenticated(user.employee_id, user.is_admin, user.is_manager),
            None => AppState::anonymous(),
        }
    }
}
