//! Terminal display system
//!
//! Provides semantic APIs for user-facing communication. Separates concerns
//! between logging (tracing) and user interaction (status output).

pub mod live;
pub mod mock;
pub mod providers;
pub mod status;

pub use live::LiveDisplayProvider;
pub use mock::{DisplayCall, MockDisplayProvider};
pub use providers::{DisplayProvider, StatusProvider};
pub use status::StatusDisplay;
