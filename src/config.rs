use std::path::{Path, PathBuf};

/// Environment variable overriding [`AssetPaths::template`].
pub const TEMPLATE_ENV: &str = "VINYL_TEMPLATE";
/// Environment variable overriding [`AssetPaths::font`].
pub const FONT_ENV: &str = "VINYL_FONT";

pub const DEFAULT_TEMPLATE_PATH: &str = "assets/vinyl_template.png";
pub const DEFAULT_FONT_PATH: &str = "assets/fonts/DejaVuSans.ttf";

/// Locations of the startup assets a [`crate::Compositor`] is built from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub template: PathBuf,
    pub font: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            template: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            font: PathBuf::from(DEFAULT_FONT_PATH),
        }
    }
}

impl AssetPaths {
    /// Resolve both paths against `root` unless they are already absolute.
    pub fn under(root: &Path) -> Self {
        Self::default().rooted_at(root)
    }

    pub fn rooted_at(self, root: &Path) -> Self {
        let join = |p: PathBuf| if p.is_absolute() { p } else { root.join(p) };
        Self {
            template: join(self.template),
            font: join(self.font),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
