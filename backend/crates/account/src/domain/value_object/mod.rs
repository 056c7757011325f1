pub mod email;
pub mod profile;
pub mod user_role;
