pub(crate) mod params;
/// Sprite placement checks and toroidal addressing.
pub mod placement;
/// Per-pixel blend priority rules.
pub mod rules;
