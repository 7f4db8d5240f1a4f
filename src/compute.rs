//! Game-loop logic.
//!
//! `tick` advances the state by one frame in a fixed order.  The only side
//! effect besides mutating the state is drawing from the injected RNG, so a
//! seeded generator makes a whole game reproducible.

use log::{debug, info};
use rand::Rng;

use crate::assets::Assets;
use crate::config::Settings;
use crate::entities::{Enemy, EnemyColor, GameState, Phase, Player, Shooter};
use crate::input::InputSnapshot;

// ── Spawn ranges ─────────────────────────────────────────────────────────────

/// Enemies spawn this far from the left edge at least...
const SPAWN_MARGIN_LEFT: i32 = 50;
/// ...and at least this far from the right edge.
const SPAWN_MARGIN_RIGHT: i32 = 100;
/// Vertical spawn band, above the top of the screen.
const SPAWN_Y_MIN: i32 = -1500;
const SPAWN_Y_MAX: i32 = -100;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state: player bottom-centre, no wave yet.
pub fn init_state(settings: Settings, assets: Assets) -> GameState {
    let size = settings.player_size as f32;
    let player = Player::new(
        settings.width as f32 / 2.0,
        settings.height as f32 - size,
        settings.player_health,
        assets.player_ship.clone(),
        assets.player_laser.clone(),
    );

    GameState {
        player,
        enemies: Vec::new(),
        lives: settings.lives,
        level: 0,
        score: 0,
        wave_length: settings.initial_wave_length,
        phase: Phase::Playing,
        frame: 0,
        settings,
        assets,
    }
}

// ── Input-driven movement ───────────────────────────────────────────────────

pub fn move_player_left(state: &mut GameState) {
    let craft = &mut state.player.craft;
    craft.x = (craft.x - state.settings.player_velocity).max(0.0);
}

pub fn move_player_right(state: &mut GameState) {
    let max_x = state.width() - state.player.craft.width();
    let craft = &mut state.player.craft;
    craft.x = (craft.x + state.settings.player_velocity).min(max_x);
}

pub fn move_player_up(state: &mut GameState) {
    let craft = &mut state.player.craft;
    craft.y = (craft.y - state.settings.player_velocity).max(0.0);
}

pub fn move_player_down(state: &mut GameState) {
    let max_y = state.height() - state.player.craft.height();
    let craft = &mut state.player.craft;
    craft.y = (craft.y + state.settings.player_velocity).min(max_y);
}

/// Fire from the player if the cooldown allows.
pub fn player_shoot(state: &mut GameState) -> bool {
    state.player.fire()
}

/// Apply one frame of held keys.  Opposite directions cancel out naturally.
pub fn apply_input(state: &mut GameState, input: &InputSnapshot) {
    if input.left {
        move_player_left(state);
    }
    if input.right {
        move_player_right(state);
    }
    if input.up {
        move_player_up(state);
    }
    if input.down {
        move_player_down(state);
    }
    if input.fire {
        player_shoot(state);
    }
}

// ── Waves ────────────────────────────────────────────────────────────────────

/// Start the next level: grow the wave and fill it with enemies entering
/// from above at staggered heights.
pub fn spawn_wave(state: &mut GameState, rng: &mut impl Rng) {
    state.level += 1;
    state.wave_length += state.settings.wave_increment;

    let x_max = (state.settings.width as i32 - SPAWN_MARGIN_RIGHT).max(SPAWN_MARGIN_LEFT + 1);
    for _ in 0..state.wave_length {
        let x = rng.gen_range(SPAWN_MARGIN_LEFT..x_max) as f32;
        let y = rng.gen_range(SPAWN_Y_MIN..SPAWN_Y_MAX) as f32;
        let color = EnemyColor::ALL[rng.gen_range(0..EnemyColor::ALL.len())];
        state.enemies.push(Enemy::new(x, y, color, &state.assets));
    }

    info!(
        "level {}: spawned wave of {} enemies",
        state.level, state.wave_length
    );
}

// ── Per-frame update ─────────────────────────────────────────────────────────

pub fn is_lost(state: &GameState) -> bool {
    state.lives == 0 || state.player.craft.health == 0
}

/// Move every enemy, let it fire, resolve its projectiles against the player,
/// and drop the ones that slipped past the bottom edge (costing a life).
fn update_enemies(state: &mut GameState, rng: &mut impl Rng) {
    let height = state.height();
    let GameState {
        enemies,
        player,
        lives,
        settings,
        ..
    } = state;

    enemies.retain_mut(|enemy| {
        enemy.advance(settings.enemy_velocity);

        let on_screen = enemy.craft.y >= 0.0;
        if on_screen
            && settings.enemy_fire_chance > 0
            && rng.gen_range(0..settings.enemy_fire_chance) == 0
        {
            enemy.fire();
        }

        enemy.advance_projectiles(settings.laser_velocity, height, player);

        if enemy.craft.y + enemy.craft.height() > height {
            *lives = lives.saturating_sub(1);
            debug!("enemy escaped at x={:.0}, lives now {}", enemy.craft.x, lives);
            return false;
        }
        true
    });
}

/// Advance the game by one frame.
///
/// Rendering happens before this call.  Order within the frame:
/// 1. latch the loss condition; while Lost, only count down the hold
/// 2. spawn a wave if the last one was cleared
/// 3. honour the quit signal
/// 4. apply held keys
/// 5. enemies: move, fire, resolve shots at the player, escape check
/// 6. player shots against the wave
pub fn tick(state: &mut GameState, input: &InputSnapshot, rng: &mut impl Rng) {
    if state.phase == Phase::Terminated {
        return;
    }
    state.frame += 1;

    if state.phase == Phase::Playing && is_lost(state) {
        info!(
            "game lost at level {} (lives {}, health {}, score {})",
            state.level, state.lives, state.player.craft.health, state.score
        );
        state.phase = Phase::Lost { held_frames: 0 };
    }

    // The hold is counted in ticks; a slow frame lengthens it in wall time.
    let hold = state.settings.lost_hold_frames();
    if let Phase::Lost { held_frames } = &mut state.phase {
        *held_frames += 1;
        if input.quit || *held_frames > hold {
            state.phase = Phase::Terminated;
        }
        return;
    }

    if state.enemies.is_empty() {
        spawn_wave(state, rng);
    }

    if input.quit {
        info!("quit requested at level {}", state.level);
        state.phase = Phase::Terminated;
        return;
    }

    apply_input(state, input);
    update_enemies(state, rng);

    let velocity = -state.settings.laser_velocity;
    let height = state.height();
    state.score += state
        .player
        .advance_projectiles(velocity, height, &mut state.enemies);
}
