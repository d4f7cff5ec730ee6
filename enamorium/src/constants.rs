pub const MIN_NAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Prepared statements kept by the scylla caching session.
pub const PREPARED_STATEMENTS_CACHE_SIZE: usize = 1000;

pub const CURRENT_USER_SESSION_KEY: &str = "current_user";
