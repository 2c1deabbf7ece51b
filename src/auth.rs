//! Auth-domain scope lists, anti-forgery state, and token/profile models.

pub mod scope;
pub mod state;
pub mod token;
pub mod user;

pub use scope::*;
pub use state::*;
pub use token::*;
pub use user::*;
