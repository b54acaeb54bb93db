pub mod health;
pub mod login;
pub mod no_auth;
pub mod page;
