use std::fs;
use std::path::{Path, PathBuf};

use space_invaders::assets::{load_sprite, BACKGROUND, ENEMY_FILES, PLAYER_LASER, PLAYER_SHIP};
use space_invaders::entities::EnemyColor;
use space_invaders::{AssetError, Assets, Settings};

fn shipped_assets() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

fn all_names() -> Vec<&'static str> {
    let mut names = vec![PLAYER_SHIP, PLAYER_LASER, BACKGROUND];
    for (ship, laser) in ENEMY_FILES {
        names.push(ship);
        names.push(laser);
    }
    names
}

/// A scratch copy of the shipped asset directory.
fn copy_assets() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for name in all_names() {
        fs::copy(shipped_assets().join(name), dir.path().join(name)).unwrap();
    }
    dir
}

#[test]
fn shipped_assets_load_at_expected_sizes() {
    let assets = Assets::load(&shipped_assets(), &Settings::default()).unwrap();

    assert_eq!(assets.player_ship.width(), 100);
    assert_eq!(assets.player_ship.height(), 100);
    assert_eq!(assets.background.width(), 1000);
    assert_eq!(assets.background.height(), 750);

    for color in EnemyColor::ALL {
        let (ship, laser) = assets.enemy(color);
        assert_eq!((ship.width(), ship.height()), (50, 40));
        assert_eq!((laser.width(), laser.height()), (50, 30));
    }
    assert_eq!(assets.player_laser.width(), 100);
}

#[test]
fn player_ship_and_background_follow_settings() {
    let settings = Settings {
        width: 400,
        height: 300,
        player_size: 60,
        ..Settings::default()
    };
    let assets = Assets::load(&shipped_assets(), &settings).unwrap();

    assert_eq!((assets.player_ship.width(), assets.player_ship.height()), (60, 60));
    assert_eq!((assets.background.width(), assets.background.height()), (400, 300));
}

#[test]
fn every_shipped_sprite_has_opaque_pixels() {
    for name in all_names() {
        let sprite = load_sprite(&shipped_assets().join(name), 1).unwrap();
        assert!(sprite.mask().count() > 0, "{name} is fully transparent");
    }
}

#[test]
fn missing_file_names_the_path() {
    let dir = copy_assets();
    let missing = dir.path().join(ENEMY_FILES[1].1);
    fs::remove_file(&missing).unwrap();

    match Assets::load(dir.path(), &Settings::default()) {
        Err(AssetError::Io { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn comment_only_file_is_rejected_as_empty() {
    let dir = copy_assets();
    let blank = dir.path().join(PLAYER_LASER);
    fs::write(&blank, "; nothing here\n\n").unwrap();

    match Assets::load(dir.path(), &Settings::default()) {
        Err(AssetError::Empty { path }) => assert_eq!(path, blank),
        other => panic!("expected an empty-asset error, got {other:?}"),
    }
}

#[test]
fn error_messages_mention_the_file() {
    let path = Path::new("/definitely/not/here.txt");
    let err = load_sprite(path, 10).unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.txt"));
}
