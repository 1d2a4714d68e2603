// Common types and utilities shared across the application

pub mod app_state;
pub mod entity_ids;
pub mod id;
pub mod pagination;

pub use app_state::AppState;
pub use entity_ids::*;
pub use id::{Id, V4, V7};
pub use pagination::{
    build_page_info, trim_results, Cursor, PageInfo, PaginationArgs, PaginationDirection,
    ValidatedPaginationArgs,
};
