pub mod entities;
pub mod requests;
pub mod responses;

pub use entities::{User, UserRole, UserStatus};
pub use requests::*;
pub use responses::*;
