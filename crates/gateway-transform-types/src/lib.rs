// gateway-transform-types: shared types, traits, and errors
#![allow(clippy::result_large_err)]

pub mod adapter;
pub mod config;
pub mod content;
pub mod error;
pub mod message;
pub mod request;
pub mod response;
pub mod stream;
pub mod tool;

pub use adapter::*;
pub use config::*;
pub use content::*;
pub use error::*;
pub use message::*;
pub use request::*;
pub use response::*;
pub use stream::*;
pub use tool::*;
