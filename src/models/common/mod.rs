pub mod batch;
pub mod pagination;
pub mod response;

pub use batch::{BatchError, BatchResult, OneOrMany};
pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;
