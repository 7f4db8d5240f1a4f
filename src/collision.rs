//! Pixel-mask collision between anything drawn with a sprite.

use crate::sprite::Sprite;

/// Anything with a position on the logical display surface and a sprite.
pub trait Visual {
    /// Top-left corner in logical pixels.
    fn position(&self) -> (f32, f32);
    fn sprite(&self) -> &Sprite;
}

/// Offset of `b`'s top-left relative to `a`'s, rounded to whole pixels.
///
/// Rounding is half-away-from-zero, so `offset(a, b) == -offset(b, a)`.
pub fn offset<A, B>(a: &A, b: &B) -> (i32, i32)
where
    A: Visual + ?Sized,
    B: Visual + ?Sized,
{
    let (ax, ay) = a.position();
    let (bx, by) = b.position();
    ((bx - ax).round() as i32, (by - ay).round() as i32)
}

/// True if the opaque pixels of `a` and `b` overlap at their current positions.
pub fn collide<A, B>(a: &A, b: &B) -> bool
where
    A: Visual + ?Sized,
    B: Visual + ?Sized,
{
    a.sprite()
        .mask()
        .overlap(b.sprite().mask(), offset(a, b))
        .is_some()
}
