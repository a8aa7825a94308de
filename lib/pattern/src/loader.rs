//! The pattern-file loading collaborator.

use crate::error::LoadError;
use engine::Pattern;

/// Produces a [`Pattern`] from an external location (a file path, a bundle
/// entry, ...). Loading is synchronous from this trait's point of view;
/// keeping it off the core thread during playback is the host's job.
pub trait PatternLoader {
    fn load(&self, path: &str) -> Result<Pattern, LoadError>;
}
