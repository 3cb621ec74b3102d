// Authentication module
// Password verification, JWT issuance/validation and the request auth gate

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

pub use error::AuthError;
pub use handlers::{login_handler, logout_handler, register_handler, userinfo_handler};
pub use middleware::AuthenticatedUser;
pub use models::{LoginRequest, LoginResponse, NewUser, RegisterRequest, User, UserResponse};
pub use repository::{UserRepository, UserStore};
pub use service::AuthService;
pub use token::{Claims, TokenError, TokenService};
