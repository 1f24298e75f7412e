//! Non-interactive prompters.

mod scripted;

pub use scripted::ScriptedPrompter;
