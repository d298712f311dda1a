pub(crate) mod image;
pub(crate) mod normalize;
/// Solid-color sprite construction.
pub mod sprite;
