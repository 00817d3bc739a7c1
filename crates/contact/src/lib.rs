mod error;
mod response;
mod submission;

pub use error::*;
pub use response::*;
pub use submission::*;
