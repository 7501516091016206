//! praise-box generates short acrostic praise poems for a name.
//!
//! # Overview
//! The user types a name of 2 to 5 characters. A praise phrase is picked at
//! random from a fixed catalog, and a remote text-generation service (Google
//! Gemini) is asked for a poem with one line per character of the name, each
//! line starting with that character, themed on the phrase.
//!
//! # Architecture
//! - [`adapter`] builds the prompt, makes the single remote call and reads the
//!   poem back out of the JSON reply
//! - [`controller`] is the idle / loading / success / error state machine
//! - [`generation`] is the seam to the remote service; [`backends`] holds the
//!   Gemini implementation
//! - [`praise`] is the phrase catalog, [`clipboard`] the copy indicator

// Re-export for convenience
pub use async_trait::async_trait;

/// Poem generation adapter: validation, prompt, reply parsing
pub mod adapter;

/// Backend implementations of the text generator
pub mod backends;

/// Builder pattern for configuring a poem adapter
pub mod builder;

/// Clipboard access and the "copied" indicator
pub mod clipboard;

/// Environment configuration
pub mod config;

/// Input/result state machine
pub mod controller;

/// Error types and handling
pub mod error;

/// Text generation requests and the generator trait
pub mod generation;

/// Names, requests and poems
pub mod poem;

/// The praise phrase catalog
pub mod praise;

pub use adapter::PoemAdapter;
pub use controller::{Controller, Phase};
pub use error::{ErrorKind, PraiseError};
pub use poem::{Name, PoemRequest, PoemResult};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
/// This is a no-op if the feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
