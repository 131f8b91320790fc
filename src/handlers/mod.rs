pub mod auth;
pub mod contact;
pub mod feedback;
pub mod gym_class;
pub mod membership;
pub mod payment;
pub mod trainer;
pub mod user;

pub use auth::*;
