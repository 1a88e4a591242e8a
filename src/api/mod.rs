pub mod brief;
pub mod error;
pub mod health;
pub mod openapi;

pub use brief::cors_headers;
