use crate::foundation::core::Extent;

/// Placement and blending options for one composite.
///
/// Every field is required; there is no `Default`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BlendParameters {
    /// Column of the sprite's left edge in the background. Negative only with horizontal wrap.
    pub x_offset: i32,
    /// Row of the sprite's top edge in the background. Negative only with vertical wrap.
    pub y_offset: i32,
    /// Reduce columns modulo the background width.
    pub wrap_horizontal: bool,
    /// Reduce rows modulo the background height.
    pub wrap_vertical: bool,
    /// Write alpha 255 for every pixel the sprite touches.
    pub force_opaque_result: bool,
}

impl BlendParameters {
    /// Offset only; no wrapping.
    pub fn at(x_offset: i32, y_offset: i32, force_opaque_result: bool) -> Self {
        Self {
            x_offset,
            y_offset,
            wrap_horizontal: false,
            wrap_vertical: false,
            force_opaque_result,
        }
    }

    /// Same parameters with the given wrap flags.
    pub fn wrapped(self, horizontal: bool, vertical: bool) -> Self {
        Self {
            wrap_horizontal: horizontal,
            wrap_vertical: vertical,
            ..self
        }
    }
}

/// GPU-side image of [`BlendParameters`], copied verbatim into a uniform buffer.
///
/// Layout is mirrored field-for-field by `Params` in the kernel source: five 4-byte scalars
/// padded to 32 bytes for uniform alignment. Booleans travel as `0`/`1` words.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "gpu", derive(bytemuck::Pod, bytemuck::Zeroable))]
pub struct BlendParameterBlock {
    /// Sprite column 0 in background texture space.
    pub x_offset: i32,
    /// Sprite texture row 0 in background texture space.
    pub y_offset: i32,
    /// `1` when columns wrap.
    pub wrap_horizontal: u32,
    /// `1` when rows wrap.
    pub wrap_vertical: u32,
    /// `1` when written pixels get alpha 255.
    pub force_opaque_result: u32,
    /// Always zero.
    pub _pad: [u32; 3],
}

impl BlendParameterBlock {
    /// Byte size of the block as bound on the GPU.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;

    /// Build the block for textures stored bottom row first.
    ///
    /// The sprite's top edge at image row `y` becomes texture row `bg_h - sprite_h - y` for the
    /// sprite's bottom row, so the Y offset is rewritten. A wrapped axis has its offset reduced
    /// into `0..extent`, so the kernel only ever adds non-negative coordinates.
    pub fn texture_space(params: &BlendParameters, background: Extent, sprite: Extent) -> Self {
        let x_offset = if params.wrap_horizontal {
            i64::from(params.x_offset).rem_euclid(i64::from(background.width.max(1))) as i32
        } else {
            params.x_offset
        };
        let y =
            i64::from(background.height) - i64::from(sprite.height) - i64::from(params.y_offset);
        let y_offset = if params.wrap_vertical {
            y.rem_euclid(i64::from(background.height.max(1))) as i32
        } else {
            y.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
        };
        Self {
            x_offset,
            y_offset,
            wrap_horizontal: u32::from(params.wrap_horizontal),
            wrap_vertical: u32::from(params.wrap_vertical),
            force_opaque_result: u32::from(params.force_opaque_result),
            _pad: [0; 3],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/params.rs"]
mod tests;
