pub mod like;
pub mod user;
pub mod user_email;
