pub mod extract;
pub mod links;

pub use extract::{Params, ValidJson};
pub use links::LinkContext;
