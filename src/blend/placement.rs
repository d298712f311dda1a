use crate::{
    blend::params::BlendParameters,
    foundation::{
        core::Extent,
        error::{BlendError, BlendResult},
    },
};

/// Check that a sprite of `sprite` size can be placed on `background` with `params`.
///
/// The sprite must fit the background on both axes, wrapped or not, so no two sprite pixels
/// land on the same background pixel. On an axis without wrap, the sprite must also start at a
/// non-negative offset and end inside the background.
pub fn validate(background: Extent, sprite: Extent, params: &BlendParameters) -> BlendResult<()> {
    if !background.contains(sprite) {
        return Err(BlendError::bounds(format!(
            "sprite {sprite} is larger than background {background}"
        )));
    }
    check_axis(
        "horizontal",
        params.x_offset,
        sprite.width,
        background.width,
        params.wrap_horizontal,
    )?;
    check_axis(
        "vertical",
        params.y_offset,
        sprite.height,
        background.height,
        params.wrap_vertical,
    )
}

fn check_axis(axis: &str, offset: i32, len: u32, extent: u32, wrap: bool) -> BlendResult<()> {
    if wrap {
        return Ok(());
    }
    let end = i64::from(offset) + i64::from(len);
    if offset < 0 || end > i64::from(extent) {
        return Err(BlendError::bounds(format!(
            "sprite spans {offset}..{end} on the {axis} axis, outside 0..{extent} with wrap disabled"
        )));
    }
    Ok(())
}

/// Map a sprite-space coordinate to a background coordinate on one axis.
///
/// With `wrap`, the result is reduced modulo `extent` (toroidal addressing). Without it,
/// coordinates outside `0..extent` map to `None` and are not written.
pub fn map_axis(sprite_coord: u32, offset: i32, extent: u32, wrap: bool) -> Option<u32> {
    if extent == 0 {
        return None;
    }
    let c = i64::from(sprite_coord) + i64::from(offset);
    if wrap {
        return Some(c.rem_euclid(i64::from(extent)) as u32);
    }
    (0..i64::from(extent)).contains(&c).then_some(c as u32)
}

#[cfg(test)]
#[path = "../../tests/unit/blend/placement.rs"]
mod tests;
