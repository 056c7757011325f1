//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod bootstrap_admin;
pub mod check_email;
pub mod config;
pub mod login;
pub mod manage_users;
pub mod register;
pub mod save_avatar;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use bootstrap_admin::BootstrapAdminUseCase;
pub use check_email::CheckEmailUseCase;
pub use config::AccountConfig;
pub use login::{LoginInput, LoginUseCase};
pub use manage_users::{CreateUserInput, ManageUsersUseCase, UpdateUserInput};
pub use register::{AuthOutput, RegisterInput, RegisterUseCase};
pub use save_avatar::SaveAvatarUseCase;
