pub mod rate_limit;
pub mod require_session;

pub use rate_limit::RateLimit;
pub use require_session::RequireSession;
