pub mod pagination;
pub mod parameter_error_handler;
pub mod password;
pub mod phone;
pub mod session;
pub mod sql;
pub mod validate;

pub use pagination::paginate;
pub use parameter_error_handler::{form_error_handler, json_error_handler, query_error_handler};
pub use phone::validate_phone_number;
pub use session::SessionUtils;
pub use sql::escape_like_pattern;
