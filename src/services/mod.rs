pub mod cache;
pub mod route_table;
pub mod session;
