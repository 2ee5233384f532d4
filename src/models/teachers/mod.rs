pub mod entities;
pub mod portal;
pub mod requests;
pub mod responses;

pub use entities::*;
pub use requests::*;
pub use responses::*;
