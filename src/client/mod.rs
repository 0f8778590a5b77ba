//! Widget-side chat session: state machine, relay transport and the
//! controller tying them together.
pub mod relay;
pub mod session;
pub mod widget;

pub use relay::{HttpRelay, Relay, RelayOutcome};
pub use session::{ChatMessage, ChatSession, ClickTarget, Effect, Sender};
pub use widget::ChatWidget;
