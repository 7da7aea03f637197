pub mod errors;
pub mod messages;
pub mod player;
pub mod session;
pub mod view;

// Re-export all types
pub use errors::*;
pub use messages::*;
pub use player::*;
pub use session::*;
pub use view::*;
