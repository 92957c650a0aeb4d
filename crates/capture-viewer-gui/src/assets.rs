//! Icon lookup and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub const WINDOW_ICON: &str = "icon.png";
pub const SETTINGS_ICON: &str = "assets/settings.png";
pub const SCREENSHOT_ICON: &str = "assets/screenshot.png";

/// Resolves `relative` against, in order: the explicit resource directory,
/// the executable's directory (when the file exists there), the working
/// directory.
pub fn resource_path(relative: &str, resource_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = resource_dir {
        return dir.join(relative);
    }
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(relative)));
    match beside_exe {
        Some(path) if path.exists() => path,
        _ => std::env::current_dir()
            .map(|cwd| cwd.join(relative))
            .unwrap_or_else(|_| PathBuf::from(relative)),
    }
}

fn load_rgba(path: &Path) -> Result<image::RgbaImage> {
    let img = image::open(path).with_context(|| format!("loading {}", path.display()))?;
    Ok(img.to_rgba8())
}

pub fn load_icon(path: &Path) -> Result<egui::IconData> {
    let rgba = load_rgba(path)?;
    let (width, height) = rgba.dimensions();
    Ok(egui::IconData {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

pub fn load_texture(ctx: &egui::Context, name: &str, path: &Path) -> Result<egui::TextureHandle> {
    let rgba = load_rgba(path)?;
    let size = [rgba.width() as usize, rgba.height() as usize];
    let image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Ok(ctx.load_texture(name, image, egui::TextureOptions::LINEAR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            resource_path(SETTINGS_ICON, Some(dir.path())),
            dir.path().join("assets/settings.png")
        );
    }

    #[test]
    fn missing_file_falls_back_to_working_directory() {
        let path = resource_path("definitely/not/here.png", None);
        assert_eq!(path, std::env::current_dir().unwrap().join("definitely/not/here.png"));
    }

    #[test]
    fn icon_loads_from_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        image::RgbaImage::from_pixel(2, 3, image::Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();

        let icon = load_icon(&path).unwrap();
        assert_eq!((icon.width, icon.height), (2, 3));
        assert_eq!(&icon.rgba[..4], &[1, 2, 3, 255]);
        assert!(load_icon(&dir.path().join("missing.png")).is_err());
    }
}
