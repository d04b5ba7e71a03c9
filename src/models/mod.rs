pub mod auth;
pub mod classes;
pub mod common;
pub mod students;
pub mod teachers;

pub use common::{ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery};
