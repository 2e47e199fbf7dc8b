pub mod blog;
pub mod donation;
pub mod funding;
pub mod pagination;
pub mod responses;
pub mod user;

pub use blog::*;
pub use donation::*;
pub use funding::*;
pub use pagination::*;
pub use responses::*;
pub use user::*;
