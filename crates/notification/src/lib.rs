pub mod contact;
mod mailer;
mod service;

pub use mailer::*;
pub use service::*;
