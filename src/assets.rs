//! Player sprite loading.
//!
//! A sprite is a small text file, one row per line, where spaces are
//! transparent. It is read on a background thread; until that finishes (or
//! if it fails) the renderer draws a plain rectangle instead.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::thread;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
    width: usize,
}

impl Sprite {
    /// Parse sprite text. Returns `None` if it has no visible characters.
    pub fn parse(text: &str) -> Option<Self> {
        let mut rows: Vec<Vec<char>> = text
            .lines()
            .map(|line| line.trim_end().chars().collect())
            .collect();

        // Trim blank rows at both ends.
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        let leading = rows.iter().take_while(|row| row.is_empty()).count();
        rows.drain(..leading);

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return None;
        }
        Some(Self { rows, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Character at (col, row), `None` where transparent or out of range.
    pub fn at(&self, col: usize, row: usize) -> Option<char> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .filter(|ch| *ch != ' ')
    }

    /// Nearest-neighbour sample for a target box of `cols` x `rows` cells.
    pub fn sample(&self, col: usize, row: usize, cols: usize, rows: usize) -> Option<char> {
        if cols == 0 || rows == 0 {
            return None;
        }
        let src_col = col * self.width / cols;
        let src_row = row * self.height() / rows;
        self.at(src_col, src_row)
    }
}

/// Anything that can hand the renderer a sprite once it is ready.
pub trait SpriteSource {
    fn ready_sprite(&self) -> Option<&Sprite>;
}

/// A sprite that may still be loading.
#[derive(Debug, Clone, Default)]
pub struct SpriteSlot {
    cell: Arc<OnceLock<Sprite>>,
}

impl SpriteSlot {
    /// A slot that never becomes ready.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A slot that is ready immediately.
    pub fn ready(sprite: Sprite) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(sprite);
        Self {
            cell: Arc::new(cell),
        }
    }

    /// Start loading `path` on a background thread.
    pub fn load(path: PathBuf) -> Self {
        let slot = Self::empty();
        let cell = Arc::clone(&slot.cell);
        thread::spawn(move || {
            if let Some(sprite) = read_sprite(&path) {
                log::info!(
                    "sprite ready: {} ({}x{})",
                    path.display(),
                    sprite.width(),
                    sprite.height()
                );
                let _ = cell.set(sprite);
            }
        });
        slot
    }
}

impl SpriteSource for SpriteSlot {
    fn ready_sprite(&self) -> Option<&Sprite> {
        self.cell.get()
    }
}

fn read_sprite(path: &Path) -> Option<Sprite> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let sprite = Sprite::parse(&text);
            if sprite.is_none() {
                log::warn!("sprite {} is blank, using fallback", path.display());
            }
            sprite
        }
        Err(e) => {
            log::info!("no sprite at {} ({}), using fallback", path.display(), e);
            None
        }
    }
}
