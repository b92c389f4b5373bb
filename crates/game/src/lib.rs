//! Neon Dodge game core.
//!
//! Everything the browser runs that does not touch the DOM lives here:
//! the per-frame simulation, the pure scene painter and the score
//! submission state machine that consumes a finished session.

pub mod collision;
pub mod config;
pub mod effects;
pub mod entity;
pub mod identity;
pub mod input;
pub mod physics;
pub mod scene;
pub mod session;
pub mod spawner;
pub mod submit;
pub mod world;

// Re-export commonly used types
pub use config::GameConfig;
pub use identity::{IdentityGate, IdentityStatus};
pub use input::{Controls, KeyState};
pub use session::{GameOver, Phase, Session, TickReport};
pub use scene::Painter;
pub use submit::{
    Dashboard, LocalSkip, RetryPolicy, Sleeper, SubmitOutcome, SubmitPipeline, Transport, TransportError,
};
