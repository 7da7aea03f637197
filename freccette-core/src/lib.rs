pub mod confirmation;
pub mod game_events;
pub mod registry;
pub mod score_entry;
pub mod scoring;
pub mod session;
pub mod turn_engine;

// Re-export main components
pub use confirmation::*;
pub use game_events::*;
pub use registry::*;
pub use score_entry::*;
pub use scoring::*;
pub use session::*;
pub use turn_engine::*;
