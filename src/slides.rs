//! Image discovery and slide cursor state.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

/// Step direction for slide advances, stored on disk as `1` / `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i8", into = "i8")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Signed step applied to the slide index.
    pub fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Forward => "Forward",
            Direction::Backward => "Backward",
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Forward
    }
}

impl From<i8> for Direction {
    fn from(value: i8) -> Self {
        if value < 0 {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }
}

impl From<Direction> for i8 {
    fn from(value: Direction) -> Self {
        value.step() as i8
    }
}

/// Collect supported images directly inside `folder`, sorted by path.
///
/// Non-matching files are skipped silently; subfolders are not entered.
pub fn collect_slides(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut slides = Vec::new();
    for entry in WalkDir::new(folder).max_depth(1).follow_links(true) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_supported_image(entry.path()) {
            slides.push(entry.path().to_path_buf());
        }
    }
    slides.sort();
    Ok(slides)
}

/// Return true when the file extension is a supported image type.
pub fn is_supported_image(path: &Path) -> bool {
    match path.extension().and_then(OsStr::to_str) {
        Some(ext) => matches!(
            ext.to_ascii_lowercase().as_str(),
            "jpg" | "jpeg" | "png" | "webp"
        ),
        None => false,
    }
}

/// Cursor over the loaded image list with wrap-around in both directions.
#[derive(Debug, Clone, Default)]
pub struct Slideshow {
    slides: Vec<PathBuf>,
    current: usize,
    direction: Direction,
}

impl Slideshow {
    pub fn new(current: usize, direction: Direction) -> Self {
        Self {
            slides: Vec::new(),
            current,
            direction,
        }
    }

    /// Replace the image list, clamping the cursor into the new range.
    pub fn set_slides(&mut self, slides: Vec<PathBuf>) {
        self.slides = slides;
        if self.slides.is_empty() {
            self.current = 0;
        } else {
            self.current = self.current.min(self.slides.len() - 1);
        }
    }

    pub fn slides(&self) -> &[PathBuf] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.slides.get(self.current).map(PathBuf::as_path)
    }

    /// Step the cursor by the current direction, wrapping at both ends.
    ///
    /// A no-op when no images are loaded.
    pub fn advance(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        let len = self.slides.len() as isize;
        let next = (self.current as isize + self.direction.step()).rem_euclid(len);
        self.current = next as usize;
    }

    /// Switch to forward stepping and advance once.
    pub fn next(&mut self) {
        self.direction = Direction::Forward;
        self.advance();
    }

    /// Switch to backward stepping and advance once.
    pub fn previous(&mut self) {
        self.direction = Direction::Backward;
        self.advance();
    }

    /// Move the cursor to an absolute index, clamped into range.
    pub fn jump(&mut self, index: usize) {
        if self.slides.is_empty() {
            return;
        }
        self.current = index.min(self.slides.len() - 1);
    }
}
