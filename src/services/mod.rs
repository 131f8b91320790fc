pub mod auth;
pub mod bootstrap_admin;
pub mod contact;
pub mod email;
pub mod gym_class;
pub mod membership;
pub mod trainer;
pub mod user;
