pub mod error_response;
pub mod user;

pub use error_response::*;
pub use user::*;
