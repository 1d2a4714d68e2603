// GraphQL resolvers for the feed
pub mod mutation;
pub mod query;

pub use mutation::*;
pub use query::*;
