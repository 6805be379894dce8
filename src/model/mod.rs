//! Plain data types shared by the actors, the clients and the display.

pub mod catalog;
pub mod draft;
pub mod intent;
pub mod order;
pub mod user;

pub use catalog::*;
pub use draft::*;
pub use intent::*;
pub use order::*;
pub use user::*;
