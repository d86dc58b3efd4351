//! Integration test: the bundled player sprite
//!
//! Copy `assets/runner.txt` to `<data dir>/assets/runner.txt`, or pass it with
//! `--sprite`, to use it in the game.

use dino_sura::assets::{Sprite, SpriteSlot, SpriteSource};
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn bundled_sprite_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/runner.txt")
}

#[test]
fn test_bundled_sprite_parses() {
    let text = std::fs::read_to_string(bundled_sprite_path()).unwrap();
    let sprite = Sprite::parse(&text).expect("bundled sprite is not blank");
    assert_eq!(sprite.height(), 8);
    assert_eq!(sprite.width(), 9);
}

#[test]
fn test_bundled_sprite_loads_in_background() {
    let slot = SpriteSlot::load(bundled_sprite_path());
    let deadline = Instant::now() + Duration::from_secs(5);
    while slot.ready_sprite().is_none() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(slot.ready_sprite().is_some());
}
