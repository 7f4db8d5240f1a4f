//! Game entities: projectiles, the shared craft capability, and the two
//! craft variants.

use std::rc::Rc;

use crate::assets::Assets;
use crate::collision::{collide, Visual};
use crate::config::Settings;
use crate::sprite::Sprite;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyColor {
    Red,
    Green,
    Blue,
}

impl EnemyColor {
    pub const ALL: [EnemyColor; 3] = [EnemyColor::Red, EnemyColor::Green, EnemyColor::Blue];

    /// Position in `ALL`, used to index per-color asset tables.
    pub fn index(self) -> usize {
        match self {
            EnemyColor::Red => 0,
            EnemyColor::Green => 1,
            EnemyColor::Blue => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Loss latched; the final frame is held for a while before exit.
    Lost { held_frames: u32 },
    Terminated,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    sprite: Rc<Sprite>,
}

impl Projectile {
    pub fn new(x: f32, y: f32, sprite: Rc<Sprite>) -> Self {
        Self { x, y, sprite }
    }

    /// Vertical-only movement.
    pub fn advance(&mut self, velocity: f32) {
        self.y += velocity;
    }

    /// True once the projectile has left `[0, height]`.
    pub fn off_screen(&self, height: f32) -> bool {
        !(0.0..=height).contains(&self.y)
    }

    pub fn collides_with<T: Visual + ?Sized>(&self, other: &T) -> bool {
        collide(self, other)
    }
}

impl Visual for Projectile {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

// ── Craft ─────────────────────────────────────────────────────────────────────

/// State shared by every ship: position, health, fire control and the
/// projectiles it has fired.
#[derive(Clone, Debug)]
pub struct Craft {
    pub x: f32,
    pub y: f32,
    pub health: u32,
    /// 0 = ready to fire; otherwise frames since the last shot.
    cooldown: u32,
    ship: Rc<Sprite>,
    laser: Rc<Sprite>,
    pub lasers: Vec<Projectile>,
}

impl Craft {
    /// Frames between successive shots.
    pub const COOLDOWN: u32 = 30;
    /// Health removed by one projectile hit.
    pub const LASER_DAMAGE: u32 = 10;

    pub fn new(x: f32, y: f32, health: u32, ship: Rc<Sprite>, laser: Rc<Sprite>) -> Self {
        Self {
            x,
            y,
            health,
            cooldown: 0,
            ship,
            laser,
            lasers: Vec::new(),
        }
    }

    /// Spawn a projectile at the craft's position if the cooldown allows.
    /// Returns whether a projectile was created.
    pub fn fire(&mut self) -> bool {
        if self.cooldown != 0 {
            return false;
        }
        self.lasers
            .push(Projectile::new(self.x, self.y, Rc::clone(&self.laser)));
        self.cooldown = 1;
        true
    }

    pub fn tick_cooldown(&mut self) {
        if self.cooldown >= Self::COOLDOWN {
            self.cooldown = 0;
        } else if self.cooldown > 0 {
            self.cooldown += 1;
        }
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn width(&self) -> f32 {
        self.ship.width() as f32
    }

    pub fn height(&self) -> f32 {
        self.ship.height() as f32
    }
}

impl Visual for Craft {
    fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn sprite(&self) -> &Sprite {
        &self.ship
    }
}

/// Firing and projectile resolution, shared by player and enemies.
///
/// The two variants differ in what their projectiles can hit: enemies shoot
/// at the single player, the player shoots at the whole wave.
pub trait Shooter {
    type Target: ?Sized;

    fn craft(&self) -> &Craft;
    fn craft_mut(&mut self) -> &mut Craft;

    fn fire(&mut self) -> bool {
        self.craft_mut().fire()
    }

    /// Tick the cooldown, move every owned projectile by `velocity`, drop the
    /// ones that left `[0, height]`, and resolve hits against `target`.
    /// Returns the number of hits.
    fn advance_projectiles(
        &mut self,
        velocity: f32,
        height: f32,
        target: &mut Self::Target,
    ) -> u32;
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub craft: Craft,
    pub max_health: u32,
}

impl Player {
    pub fn new(x: f32, y: f32, health: u32, ship: Rc<Sprite>, laser: Rc<Sprite>) -> Self {
        Self {
            craft: Craft::new(x, y, health, ship, laser),
            max_health: health,
        }
    }

    /// Remaining health as a fraction of `max_health`.
    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        (self.craft.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }
}

impl Shooter for Player {
    type Target = Vec<Enemy>;

    fn craft(&self) -> &Craft {
        &self.craft
    }

    fn craft_mut(&mut self) -> &mut Craft {
        &mut self.craft
    }

    /// A hit destroys the enemy outright.  One projectile takes out at most
    /// one enemy, the first in wave order.
    fn advance_projectiles(
        &mut self,
        velocity: f32,
        height: f32,
        enemies: &mut Vec<Enemy>,
    ) -> u32 {
        self.craft.tick_cooldown();
        let mut kills = 0;
        self.craft.lasers.retain_mut(|laser| {
            laser.advance(velocity);
            if laser.off_screen(height) {
                return false;
            }
            match enemies.iter().position(|enemy| laser.collides_with(enemy)) {
                Some(hit) => {
                    enemies.remove(hit);
                    kills += 1;
                    false
                }
                None => true,
            }
        });
        kills
    }
}

impl Visual for Player {
    fn position(&self) -> (f32, f32) {
        self.craft.position()
    }

    fn sprite(&self) -> &Sprite {
        self.craft.sprite()
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub craft: Craft,
    pub color: EnemyColor,
}

impl Enemy {
    pub const HEALTH: u32 = 100;

    pub fn new(x: f32, y: f32, color: EnemyColor, assets: &Assets) -> Self {
        let (ship, laser) = assets.enemy(color);
        Self {
            craft: Craft::new(x, y, Self::HEALTH, Rc::clone(ship), Rc::clone(laser)),
            color,
        }
    }

    /// Constant downward drift.
    pub fn advance(&mut self, velocity: f32) {
        self.craft.y += velocity;
    }
}

impl Shooter for Enemy {
    type Target = Player;

    fn craft(&self) -> &Craft {
        &self.craft
    }

    fn craft_mut(&mut self) -> &mut Craft {
        &mut self.craft
    }

    fn advance_projectiles(&mut self, velocity: f32, height: f32, player: &mut Player) -> u32 {
        self.craft.tick_cooldown();
        let mut hits = 0;
        self.craft.lasers.retain_mut(|laser| {
            laser.advance(velocity);
            if laser.off_screen(height) {
                false
            } else if laser.collides_with(&*player) {
                player.craft.take_damage(Craft::LASER_DAMAGE);
                hits += 1;
                false
            } else {
                true
            }
        });
        hits
    }
}

impl Visual for Enemy {
    fn position(&self) -> (f32, f32) {
        self.craft.position()
    }

    fn sprite(&self) -> &Sprite {
        self.craft.sprite()
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the loop owns.  The player and the wave are owned exclusively
/// here; every craft owns its own projectiles.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub lives: u32,
    pub level: u32,
    /// Enemies destroyed by the player.
    pub score: u32,
    /// Size of the most recently spawned wave.
    pub wave_length: u32,
    pub phase: Phase,
    /// Ticks run so far; also the clock for held-key tracking.
    pub frame: u64,
    pub settings: Settings,
    pub assets: Assets,
}

impl GameState {
    pub fn width(&self) -> f32 {
        self.settings.width as f32
    }

    pub fn height(&self) -> f32 {
        self.settings.height as f32
    }
}
