//! Authentication: password hashing and per-domain session tokens.

pub mod claims;
pub mod password;
pub mod token;

pub use claims::{AdminDomain, AdminPrincipal, ClientDomain, ClientPrincipal, TokenDomain};
pub use password::PasswordHasher;
pub use token::TokenService;
