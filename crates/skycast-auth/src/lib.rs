pub mod hasher;
pub mod service;
pub mod session;

pub use hasher::{PasswordHasher, Sha256Hasher};
pub use service::AuthService;
pub use session::SessionContext;
