//! Command resolution for Awab.
//!
//! Turns one command string into a device action and a tagged recognition
//! outcome. Ships a regex pattern set and a registry of simulated handlers
//! that stand in for the platform's real side effects.

pub mod error;
pub mod handler;
pub mod patterns;
pub mod resolver;
pub mod types;

pub use error::CommandError;
pub use handler::{CommandHandler, HandlerRegistry};
pub use patterns::CommandPatternSet;
pub use resolver::{CommandResolver, PatternResolver};
pub use types::{CommandKind, ParsedCommand, ResolverOutcome};
