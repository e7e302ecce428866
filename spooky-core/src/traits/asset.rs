//! Asset source trait

use crate::canvas::PixelFormat;

/// Trait for bundled asset providers
///
/// An asset source owns the decoded pixel data of its assets and lends
/// out read-only views of it. Views are flat RGB triples in row-major
/// order, in the format reported by [`AssetSource::format`].
pub trait AssetSource {
    /// Decode the bundled assets
    ///
    /// Must be called before any asset is requested. Calling it again
    /// decodes everything from scratch.
    fn load(&mut self);

    /// Get the raw RGB triples of a named asset
    ///
    /// Returns `None` if the name is unknown, the source has not been
    /// loaded, or the asset failed to decode.
    fn raw(&self, name: &str) -> Option<&[u8]>;

    /// Channel layout of the exported triples
    fn format(&self) -> PixelFormat;

    /// Check whether a named asset is available
    fn contains(&self, name: &str) -> bool {
        self.raw(name).is_some()
    }
}
