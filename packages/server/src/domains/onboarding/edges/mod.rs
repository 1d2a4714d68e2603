// GraphQL resolvers for onboarding checklists
pub mod mutation;
pub mod query;

pub use mutation::*;
pub use query::*;
