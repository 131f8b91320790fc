pub mod jwt;
pub mod password;
pub mod reset_token;

pub use jwt::encode_token;
pub use password::{hash_password, verify_password};
pub use reset_token::{generate_reset_token, hash_reset_token};
