// GraphQL resolvers for the employee directory
pub mod mutation;
pub mod query;

pub use mutation::*;
pub use query::*;
