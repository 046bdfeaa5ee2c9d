pub mod crud;
pub mod users;
