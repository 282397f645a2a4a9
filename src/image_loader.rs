use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use log::{debug, warn};

use crate::catalog::Category;
use crate::constants::IMAGE_EXTENSIONS;
use crate::coordinator::CategoryLoader;
use crate::error::ImageError;

/// A decoded slide: the full-resolution image plus a copy already scaled to
/// the content area, which is what gets uploaded and drawn.
pub struct ImageResource {
    pub filename: String,
    pub image: RgbaImage,
    pub display: RgbaImage,
}

impl std::fmt::Debug for ImageResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageResource")
            .field("filename", &self.filename)
            .field("image", &self.image.dimensions())
            .field("display", &self.display.dimensions())
            .finish()
    }
}

// --- Helper: List and Sort JPEG Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir_path) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot list image directory {}: {}", dir_path.display(), e);
            return Vec::new();
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_image_extension(path))
        .collect();
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    paths
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

// --- Load JPEG, Apply EXIF Rotation ---
pub fn load_image_with_exif_rotation(image_path: &Path) -> Result<RgbaImage, ImageError> {
    let file_bytes = fs::read(image_path).map_err(|source| ImageError::Read {
        path: image_path.to_path_buf(),
        source,
    })?;

    let image = image::load_from_memory_with_format(&file_bytes, ImageFormat::Jpeg)
        .map_err(|source| ImageError::Decode {
            path: image_path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    // 1 = Top-left (Normal), 3 = 180 deg, 6 = 90 deg CW, 8 = 90 deg CCW.
    // Mirrored orientations are left as they are.
    let rotated = match read_orientation(image_path, &file_bytes) {
        3 => imageops::rotate180(&image),
        6 => imageops::rotate90(&image),
        8 => imageops::rotate270(&image),
        _ => image,
    };
    Ok(rotated)
}

fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            debug!("No EXIF data for {}: {}", image_path.display(), e);
            1
        }
    }
}

/// Scales `image` down to fit inside `width` x `height`, keeping its aspect
/// ratio. Images that already fit are copied unchanged.
pub fn fit_to_area(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 || (w <= width && h <= height) {
        return image.clone();
    }
    let scale = (width as f32 / w as f32).min(height as f32 / h as f32);
    let new_w = ((w as f32 * scale).round() as u32).max(1);
    let new_h = ((h as f32 * scale).round() as u32).max(1);
    imageops::resize(image, new_w, new_h, FilterType::Triangle)
}

/// Decodes every JPEG in a category directory, in filename order. Files that
/// fail to load are skipped; a missing directory yields an empty set.
#[derive(Debug, Clone, Copy)]
pub struct JpegSetLoader {
    pub area_width: u32,
    pub area_height: u32,
}

impl JpegSetLoader {
    pub fn new(area_width: u32, area_height: u32) -> Self {
        Self {
            area_width,
            area_height,
        }
    }

    pub fn load_dir(&self, dir: &Path) -> Vec<ImageResource> {
        if !dir.is_dir() {
            warn!("Image directory not found: {}", dir.display());
            return Vec::new();
        }

        let mut resources = Vec::new();
        for path in load_sorted_image_paths(dir) {
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            match load_image_with_exif_rotation(&path) {
                Ok(image) => {
                    let display = fit_to_area(&image, self.area_width, self.area_height);
                    resources.push(ImageResource {
                        filename,
                        image,
                        display,
                    });
                }
                Err(e) => warn!("Skipping image {}: {}", filename, e),
            }
        }
        resources
    }
}

impl CategoryLoader for JpegSetLoader {
    type Item = ImageResource;

    fn load(&self, category: &Category) -> Vec<ImageResource> {
        self.load_dir(&category.directory)
    }
}
