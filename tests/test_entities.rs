use std::rc::Rc;

use space_invaders::entities::*;
use space_invaders::sprite::Sprite;
use space_invaders::Assets;

fn block(size: usize) -> Rc<Sprite> {
    Rc::new(Sprite::from_text("#", size).unwrap())
}

fn test_assets() -> Assets {
    Assets {
        player_ship: block(100),
        player_laser: block(10),
        enemy_ships: [block(50), block(50), block(50)],
        enemy_lasers: [block(10), block(10), block(10)],
        background: block(1),
    }
}

fn player_at(x: f32, y: f32) -> Player {
    let assets = test_assets();
    Player::new(x, y, 100, assets.player_ship, assets.player_laser)
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy::new(x, y, EnemyColor::Green, &test_assets())
}

const HEIGHT: f32 = 750.0;

// ── Projectile ────────────────────────────────────────────────────────────────

#[test]
fn projectile_moves_vertically_only() {
    let mut p = Projectile::new(10.0, 20.0, block(10));
    p.advance(-4.0);
    assert_eq!((p.x, p.y), (10.0, 16.0));
}

#[test]
fn off_screen_boundaries_are_inclusive() {
    let at = |y| Projectile::new(0.0, y, block(10)).off_screen(HEIGHT);
    assert!(!at(0.0));
    assert!(!at(HEIGHT));
    assert!(!at(375.0));
    assert!(at(-0.5));
    assert!(at(HEIGHT + 0.5));
}

// ── Craft cooldown ────────────────────────────────────────────────────────────

#[test]
fn second_shot_blocked_during_cooldown() {
    let mut p = player_at(0.0, 0.0);
    assert!(p.fire());
    for _ in 0..Craft::COOLDOWN - 1 {
        p.craft.tick_cooldown();
        assert!(!p.fire());
    }
    assert_eq!(p.craft.lasers.len(), 1);
}

#[test]
fn cooldown_resets_after_exactly_thirty_ticks() {
    let mut p = player_at(0.0, 0.0);
    p.fire();
    for _ in 0..30 {
        p.craft.tick_cooldown();
    }
    assert_eq!(p.craft.cooldown(), 0);
    assert!(p.fire());
    assert_eq!(p.craft.lasers.len(), 2);
}

#[test]
fn idle_cooldown_stays_ready() {
    let mut p = player_at(0.0, 0.0);
    p.craft.tick_cooldown();
    assert_eq!(p.craft.cooldown(), 0);
}

#[test]
fn shot_spawns_at_craft_position() {
    let mut e = enemy_at(120.0, 40.0);
    e.fire();
    let laser = &e.craft.lasers[0];
    assert_eq!((laser.x, laser.y), (120.0, 40.0));
}

#[test]
fn damage_saturates_at_zero() {
    let mut p = player_at(0.0, 0.0);
    p.craft.health = 5;
    p.craft.take_damage(Craft::LASER_DAMAGE);
    assert_eq!(p.craft.health, 0);
    assert_eq!(p.health_ratio(), 0.0);
}

// ── Enemy shots ───────────────────────────────────────────────────────────────

#[test]
fn enemy_hit_damages_player_by_ten() {
    let mut player = player_at(500.0, 600.0);
    let mut e = enemy_at(500.0, 590.0);
    e.fire(); // laser at y=590, moves to 594 → inside the player

    let hits = e.advance_projectiles(4.0, HEIGHT, &mut player);

    assert_eq!(hits, 1);
    assert_eq!(player.craft.health, 90);
    assert!(e.craft.lasers.is_empty());
    assert_eq!(player.health_ratio(), 0.9);
}

#[test]
fn enemy_miss_keeps_projectile() {
    let mut player = player_at(0.0, 600.0);
    let mut e = enemy_at(500.0, 100.0);
    e.fire();

    let hits = e.advance_projectiles(4.0, HEIGHT, &mut player);

    assert_eq!(hits, 0);
    assert_eq!(player.craft.health, 100);
    assert_eq!(e.craft.lasers[0].y, 104.0);
}

// ── Player shots ──────────────────────────────────────────────────────────────

#[test]
fn player_hit_destroys_enemy_outright() {
    let mut p = player_at(500.0, 320.0);
    let mut wave = vec![enemy_at(480.0, 300.0)];
    p.fire();

    let kills = p.advance_projectiles(-4.0, HEIGHT, &mut wave);

    assert_eq!(kills, 1);
    assert!(wave.is_empty());
    assert!(p.craft.lasers.is_empty());
}

#[test]
fn one_projectile_destroys_only_the_first_overlapping_enemy() {
    let mut p = player_at(500.0, 320.0);
    let mut wave = vec![enemy_at(480.0, 300.0), enemy_at(490.0, 300.0)];
    p.fire();

    p.advance_projectiles(-4.0, HEIGHT, &mut wave);

    assert_eq!(wave.len(), 1);
    assert_eq!(wave[0].craft.x, 490.0);
}

#[test]
fn off_screen_projectile_is_removed_once_and_hits_nothing() {
    let mut p = player_at(500.0, 2.0);
    // Overlaps the laser's post-move position, but the laser is off-screen
    let mut wave = vec![enemy_at(480.0, -30.0)];
    p.fire();

    let kills = p.advance_projectiles(-4.0, HEIGHT, &mut wave);

    assert_eq!(kills, 0);
    assert_eq!(wave.len(), 1);
    assert!(p.craft.lasers.is_empty());
}

#[test]
fn hits_in_the_middle_keep_the_other_projectiles_in_order() {
    let mut p = player_at(0.0, 0.0);
    for y in [100.0, 300.0, 500.0] {
        p.craft.lasers.push(Projectile::new(500.0, y, block(10)));
    }
    let mut wave = vec![enemy_at(480.0, 280.0)];

    let kills = p.advance_projectiles(-4.0, HEIGHT, &mut wave);

    assert_eq!(kills, 1);
    let ys: Vec<f32> = p.craft.lasers.iter().map(|l| l.y).collect();
    assert_eq!(ys, vec![96.0, 496.0]);
}
