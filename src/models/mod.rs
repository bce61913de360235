pub mod comment;
pub mod ingredient;
pub mod recipe;
pub mod user;

pub use comment::*;
pub use ingredient::*;
pub use recipe::*;
pub use user::*;
