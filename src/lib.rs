pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod router;
pub mod service;
pub mod types;

pub use error::CadastroError;
pub use router::{CadastroState, cadastro_router};
