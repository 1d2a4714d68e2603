// GraphQL resolvers for employee requests
pub mod mutation;
pub mod query;

pub use mutation::*;
pub use query::*;
