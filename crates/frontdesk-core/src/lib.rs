pub mod chat;
pub mod config;
pub mod search;
pub mod session;
pub mod validate;

pub use chat::*;
pub use config::*;
pub use search::*;
pub use session::*;
pub use validate::*;
