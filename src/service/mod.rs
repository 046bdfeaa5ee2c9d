pub mod crud;
pub mod users;

pub use crud::CrudService;
pub use users::UserService;
