//! User Accounts
//!
//! API users, their Argon2id password hashes and role names. Users are
//! separate from clients: a user operates the system, a client holds
//! policies.

pub mod password;
pub mod ports;
pub mod service;
pub mod user;

pub use password::{PasswordError, PasswordHasher};
pub use ports::{UserRepository, UserRepositoryExt};
pub use service::UserService;
pub use user::{NewUser, User, UserPatch, ADMIN_ROLE, DEFAULT_ROLE};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockUserRepository;
