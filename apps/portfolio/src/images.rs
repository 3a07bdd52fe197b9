//! Image encoding for locally stored pictures.
//!
//! Local tables reference images by bare file name under the images directory.
//! Those files are inlined into the page as `data:` URIs so the site needs no
//! static file route. Remote attachments are already URLs and pass through.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::warn;

use crate::records::ImageSource;

/// Media type from the file extension, case-insensitive. Unknown extensions
/// are treated as JPEG.
pub fn media_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Reads `path` and returns an inline `data:` reference, or `None` (with a
/// warning logged) when the file is missing or unreadable.
pub async fn encode(path: &Path) -> Option<String> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Some(format!(
            "data:{};base64,{}",
            media_type(path),
            BASE64.encode(bytes)
        )),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("Image not found: {}", path.display());
            None
        }
        Err(e) => {
            warn!("Error reading image {}: {e}", path.display());
            None
        }
    }
}

/// Turns a normalized `ImageSource` into something an `<img src>` can use.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    images_dir: PathBuf,
}

impl ImageResolver {
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    pub async fn resolve(&self, source: &ImageSource) -> Option<String> {
        match source {
            ImageSource::Url(url) => Some(url.clone()),
            ImageSource::File(name) => {
                if !is_plain_file_name(name) {
                    warn!("Refusing image path outside the images directory: {name}");
                    return None;
                }
                encode(&self.images_dir.join(name)).await
            }
            ImageSource::Missing => None,
        }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !Path::new(name).is_absolute()
}
