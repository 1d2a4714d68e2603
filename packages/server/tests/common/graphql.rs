//! GraphQL client for integration testing.
//!
//! Executes queries directly against the schema without HTTP overhead.

use juniper::Variables;
use serde_json::Value;
use server_core::common::EmployeeId;
use server_core::domains::pending_review::PendingReviewHandle;
use server_core::kernel::{LoggingMailer, ServerDeps};
use server_core::server::graphql::{create_schema, GraphQLContext, Schema};
use server_core::server::middleware::AuthUser;
use sqlx::PgPool;
use std::sync::Arc;

/// GraphQL client for executing queries and mutations in tests.
pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

/// Result of a GraphQL execution.
#[derive(Debug)]
pub struct GraphQLResult {
    pub data: Option<Value>,
    pub errors: Vec<String>,
}

impl GraphQLResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Unwraps the data, panicking if there were errors.
    pub fn unwrap(self) -> Value {
        if !self.errors.is_empty() {
            panic!("GraphQL errors: {:?}", self.errors);
        }
        self.data.expect("No data returned")
    }

    /// Gets a value at the given dotted JSON path.
    pub fn get(&self, path: &str) -> Value {
        let data = self.data.as_ref().expect("No data returned");
        let mut current = data;
        for key in path.split('.') {
            current = &current[key];
        }
        current.clone()
    }
}

impl GraphQLClient {
    /// An unauthenticated client.
    pub fn new(db_pool: PgPool) -> Self {
        Self::build(db_pool, None)
    }

    /// A client authenticated as the given employee.
    pub fn as_employee(
        db_pool: PgPool,
        employee_id: EmployeeId,
        is_admin: bool,
        is_manager: bool,
    ) -> Self {
        Self::build(
            db_pool,
            Some(AuthUser {
                employee_id,
                email: format!("{}@test.example", employee_id),
                is_admin,
                is_manager,
            }),
        )
    }

    fn build(db_pool: PgPool, auth_user: Option<AuthUser>) -> Self {
        let deps = Arc::new(ServerDeps::new(
            db_pool.clone(),
            Arc::new(LoggingMailer),
            PendingReviewHandle::detached(),
        ));
        let context = GraphQLContext::new(db_pool, deps, auth_user);

        Self {
            schema: create_schema(),
            context,
        }
    }

    /// Execute a query or mutation.
    pub async fn execute(&self, query: &str, variables: Variables) -> GraphQLResult {
        match juniper::execute(query, None, &self.schema, &variables, &self.context).await {
            Ok((data, errors)) => GraphQLResult {
                data: Some(serde_json::to_value(&data).expect("GraphQL value serializes")),
                errors: errors.into_iter().map(|e| format!("{:?}", e)).collect(),
            },
            Err(e) => GraphQLResult {
                data: None,
                errors: vec![format!("{}", e)],
            },
        }
    }
}
