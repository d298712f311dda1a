/// Which priority rule decides a pixel, first match wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendRule {
    /// Background alpha is 0: the sprite pixel is written as-is.
    BackgroundTransparent,
    /// Sprite alpha is 1: the sprite pixel replaces the background.
    SpriteOpaque,
    /// Sprite alpha is 0: the background is kept.
    SpriteTransparent,
    /// Anything else: straight-alpha source-over.
    SourceOver,
}

/// Pick the rule for a background/sprite alpha pair.
pub fn classify(background_alpha: u8, sprite_alpha: u8) -> BlendRule {
    if background_alpha == 0 {
        BlendRule::BackgroundTransparent
    } else if sprite_alpha == 255 {
        BlendRule::SpriteOpaque
    } else if sprite_alpha == 0 {
        BlendRule::SpriteTransparent
    } else {
        BlendRule::SourceOver
    }
}

/// Blend one straight-alpha RGBA8 sprite pixel onto a background pixel.
///
/// Mirrors the compute kernel: channels are taken to `f32` in `0..=1`, blended, and stored back
/// with round-to-nearest. `force_opaque` writes alpha 255 whenever the sprite is applied; a
/// kept background pixel is never modified.
pub fn blend_pixel(background: [u8; 4], sprite: [u8; 4], force_opaque: bool) -> [u8; 4] {
    match classify(background[3], sprite[3]) {
        BlendRule::BackgroundTransparent | BlendRule::SpriteOpaque => {
            let mut out = sprite;
            if force_opaque {
                out[3] = 255;
            }
            out
        }
        BlendRule::SpriteTransparent => background,
        BlendRule::SourceOver => {
            let sa = unit(sprite[3]);
            let inv = 1.0 - sa;
            let mut out = [0u8; 4];
            for i in 0..3 {
                out[i] = to_unorm8(unit(sprite[i]) * sa + unit(background[i]) * inv);
            }
            out[3] = if force_opaque {
                255
            } else {
                to_unorm8(sa + unit(background[3]) * inv)
            };
            out
        }
    }
}

fn unit(v: u8) -> f32 {
    f32::from(v) / 255.0
}

fn to_unorm8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
#[path = "../../tests/unit/blend/rules.rs"]
mod tests;
