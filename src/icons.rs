//! Character icon asset lookup.
//!
//! Icons are resolved by a deterministic filename derived from the
//! character's display name. A missing or unreadable asset is never an
//! error; the renderer falls back to a synthetic badge for that row.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::graphic::RenderEntry;

/// Suffix appended to the cleaned character name.
const ICON_SUFFIX: &str = "_icon.png";

/// Derives the icon filename for a character display name.
///
/// Punctuation is stripped and whitespace removed, so `"Mr. Game & Watch"`
/// resolves to `MrGameWatch_icon.png`. Returns `None` when nothing remains
/// after cleaning (including the empty "no character assigned" case).
pub fn icon_file_name(character: &str) -> Option<String> {
    let cleaned: String = character.chars().filter(|c| c.is_alphanumeric()).collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(format!("{cleaned}{ICON_SUFFIX}"))
    }
}

// ============================================================================
// IconLibrary
// ============================================================================

/// A directory of character icon images.
pub struct IconLibrary {
    root: PathBuf,
}

impl IconLibrary {
    /// Creates a library rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the path an icon for `character` would live at, if the name
    /// yields a valid filename.
    pub fn icon_path(&self, character: &str) -> Option<PathBuf> {
        icon_file_name(character).map(|name| self.root.join(name))
    }

    /// Attempts to load the icon for one character.
    ///
    /// Load failures are logged at debug level and reported as absence.
    pub fn load(&self, character: &str) -> Option<RgbaImage> {
        let path = self.icon_path(character)?;
        match image::open(&path) {
            Ok(img) => Some(img.to_rgba8()),
            Err(err) => {
                log::debug!("no icon at {}: {err}", path.display());
                None
            }
        }
    }

    /// Populates the `icon` field of every entry before layout begins.
    ///
    /// All loads complete before this returns; per-icon failures leave that
    /// entry's icon absent and never affect the other rows.
    pub fn preload(&self, entries: &mut [RenderEntry]) {
        for entry in entries {
            entry.icon = self.load(&entry.character);
        }
    }

    /// The library's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn filename_strips_punctuation_and_whitespace() {
        assert_eq!(icon_file_name("Fox"), Some("Fox_icon.png".into()));
        assert_eq!(icon_file_name("R.O.B."), Some("ROB_icon.png".into()));
        assert_eq!(
            icon_file_name("Mr. Game & Watch"),
            Some("MrGameWatch_icon.png".into())
        );
    }

    #[test]
    fn empty_or_punctuation_only_names_have_no_file() {
        assert_eq!(icon_file_name(""), None);
        assert_eq!(icon_file_name("???"), None);
    }

    #[test]
    fn one_missing_icon_does_not_affect_the_others() {
        let dir = std::env::temp_dir().join(format!(
            "top8-icons-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();

        let icon = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 255]));
        icon.save(dir.join("Fox_icon.png")).unwrap();

        let library = IconLibrary::new(&dir);
        let mut entries = vec![
            RenderEntry::new("1", "alpha", "Fox"),
            RenderEntry::new("2", "beta", "Marth"),
        ];
        library.preload(&mut entries);

        assert!(entries[0].icon.is_some());
        assert!(entries[1].icon.is_none());

        std::fs::remove_dir_all(&dir).ok();
    }
}
