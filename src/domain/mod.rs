pub mod rating;
pub mod slug;

pub use self::rating::*;
pub use self::slug::*;
