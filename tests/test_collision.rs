use std::rc::Rc;

use proptest::prelude::*;

use space_invaders::collision::{collide, offset, Visual};
use space_invaders::entities::Projectile;
use space_invaders::sprite::Sprite;

struct Thing {
    x: f32,
    y: f32,
    sprite: Sprite,
}

impl Visual for Thing {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

fn thing(text: &str, scale: usize, x: f32, y: f32) -> Thing {
    Thing {
        x,
        y,
        sprite: Sprite::from_text(text, scale).unwrap(),
    }
}

#[test]
fn a_sprite_overlaps_itself() {
    let a = thing("#", 10, 37.0, 12.0);
    assert!(collide(&a, &a));
}

#[test]
fn touching_edges_do_not_collide() {
    let a = thing("#", 10, 0.0, 0.0);
    let right = thing("#", 10, 10.0, 0.0);
    let below = thing("#", 10, 0.0, 10.0);
    assert!(!collide(&a, &right));
    assert!(!collide(&a, &below));
}

#[test]
fn transparent_pixels_never_collide() {
    // Diagonal: opaque at (0,0) and (1,1) only
    let diag = thing("#.\n.#", 1, 0.0, 0.0);
    assert!(!collide(&diag, &thing("#", 1, 1.0, 0.0)));
    assert!(!collide(&diag, &thing("#", 1, 0.0, 1.0)));
    assert!(collide(&diag, &thing("#", 1, 1.0, 1.0)));
}

#[test]
fn overlap_reports_first_shared_pixel_row_major() {
    let square = Sprite::from_text("##\n##", 1).unwrap();
    let dot = Sprite::from_text("#", 1).unwrap();
    assert_eq!(square.mask().overlap(dot.mask(), (1, 1)), Some((1, 1)));
    assert_eq!(dot.mask().overlap(square.mask(), (-1, 0)), Some((0, 0)));
    assert_eq!(square.mask().overlap(dot.mask(), (2, 0)), None);
}

#[test]
fn fractional_offsets_round_to_nearest_pixel() {
    let a = thing("#", 10, 0.0, 0.0);
    assert!(collide(&a, &thing("#", 10, 9.4, 0.0)));
    assert!(!collide(&a, &thing("#", 10, 9.6, 0.0)));
    assert!(collide(&a, &thing("#", 10, -9.4, 0.0)));
    assert!(!collide(&a, &thing("#", 10, -9.6, 0.0)));
}

#[test]
fn offset_is_antisymmetric_at_half_pixels() {
    let a = thing("#", 1, 0.0, 0.0);
    let b = thing("#", 1, 2.5, -3.5);
    assert_eq!(offset(&a, &b), (3, -4));
    assert_eq!(offset(&b, &a), (-3, 4));
}

#[test]
fn projectile_hits_only_through_opaque_bolt() {
    // The shipped enemy laser is a 1-pixel-wide bolt in the middle column
    let laser = Rc::new(Sprite::from_text("..|..\n..|..\n..v..", 10).unwrap());
    let target = thing("#", 10, 0.0, 0.0);

    // Bolt spans x 20..30 of the laser; only the transparent right part covers the target
    assert!(!Projectile::new(-35.0, 0.0, Rc::clone(&laser)).collides_with(&target));
    assert!(Projectile::new(-25.0, 0.0, laser).collides_with(&target));
}

proptest! {
    #[test]
    fn collision_is_symmetric(
        ax in -40.0f32..40.0,
        ay in -40.0f32..40.0,
        bx in -40.0f32..40.0,
        by in -40.0f32..40.0,
    ) {
        let a = thing("#.#\n.#.\n#.#", 5, ax, ay);
        let b = Projectile::new(
            bx,
            by,
            Rc::new(Sprite::from_text("..|..\n..|..\n..v..", 4).unwrap()),
        );
        prop_assert_eq!(collide(&a, &b), collide(&b, &a));
        prop_assert_eq!(b.collides_with(&a), collide(&a, &b));
    }
}
