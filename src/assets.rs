//! Startup asset loading.
//!
//! Every sprite is read once from the asset directory.  Any missing or empty
//! file is fatal; there is no fallback art.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::info;
use thiserror::Error;

use crate::config::Settings;
use crate::entities::EnemyColor;
use crate::sprite::Sprite;

pub const PLAYER_SHIP: &str = "pixel_ship_main.txt";
pub const PLAYER_LASER: &str = "pixel_laser_yellow.txt";
pub const BACKGROUND: &str = "background-cyber.txt";

/// Ship and laser files per enemy color, indexed by `EnemyColor::index`.
pub const ENEMY_FILES: [(&str, &str); 3] = [
    ("pixel_ship_red_small.txt", "pixel_laser_red.txt"),
    ("pixel_ship_green_small.txt", "pixel_laser_green.txt"),
    ("pixel_ship_blue_small.txt", "pixel_laser_blue.txt"),
];

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("asset {path} contains no pixels")]
    Empty { path: PathBuf },
}

/// Every sprite the game draws.  Cheap to clone: sprites are shared.
#[derive(Clone, Debug)]
pub struct Assets {
    pub player_ship: Rc<Sprite>,
    pub player_laser: Rc<Sprite>,
    pub enemy_ships: [Rc<Sprite>; 3],
    pub enemy_lasers: [Rc<Sprite>; 3],
    pub background: Rc<Sprite>,
}

impl Assets {
    /// Load every asset from `dir`.
    ///
    /// The player ship is scaled to `player_size` square and the background
    /// to exactly the display surface.
    pub fn load(dir: &Path, settings: &Settings) -> Result<Self, AssetError> {
        let scale = settings.pixel_scale as usize;
        let load = |name: &str| load_sprite(&dir.join(name), scale).map(Rc::new);

        let size = settings.player_size as usize;
        let player_ship = load_sprite(&dir.join(PLAYER_SHIP), scale)?.scaled(size, size);
        let background = load_sprite(&dir.join(BACKGROUND), scale)?
            .scaled(settings.width as usize, settings.height as usize);

        let [(red_ship, red_laser), (green_ship, green_laser), (blue_ship, blue_laser)] =
            ENEMY_FILES;

        let assets = Self {
            player_ship: Rc::new(player_ship),
            player_laser: load(PLAYER_LASER)?,
            enemy_ships: [load(red_ship)?, load(green_ship)?, load(blue_ship)?],
            enemy_lasers: [load(red_laser)?, load(green_laser)?, load(blue_laser)?],
            background: Rc::new(background),
        };

        info!(
            "loaded assets from {} (player {}x{}, background {}x{})",
            dir.display(),
            assets.player_ship.width(),
            assets.player_ship.height(),
            assets.background.width(),
            assets.background.height(),
        );
        Ok(assets)
    }

    /// Ship and laser sprites for an enemy color.
    pub fn enemy(&self, color: EnemyColor) -> (&Rc<Sprite>, &Rc<Sprite>) {
        let i = color.index();
        (&self.enemy_ships[i], &self.enemy_lasers[i])
    }
}

pub fn load_sprite(path: &Path, scale: usize) -> Result<Sprite, AssetError> {
    let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Sprite::from_text(&text, scale).ok_or_else(|| AssetError::Empty {
        path: path.to_path_buf(),
    })
}
