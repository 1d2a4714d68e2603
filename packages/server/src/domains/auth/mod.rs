// JWT verification for tokens minted by the identity provider

pub mod jwt;

pub use jwt::{Claims, JwtService};
