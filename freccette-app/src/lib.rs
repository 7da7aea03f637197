pub mod config;
pub mod render;
pub mod scorekeeper;
pub mod telemetry;

pub use config::Config;
pub use render::{escape_html, session_view};
pub use scorekeeper::Scorekeeper;
pub use telemetry::{TracingEventHandler, init_tracing};
