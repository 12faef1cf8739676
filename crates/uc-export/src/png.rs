use std::io::BufWriter;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use tempfile::NamedTempFile;
use uc_core::frame::FrameBuffer;

use crate::error::ExportError;

/// Écrit `fb` en PNG à `path`.
///
/// L'image est d'abord encodée dans un fichier temporaire du même
/// répertoire, puis renommée sur la destination : un échec laisse la
/// destination intacte et aucun fichier partiel.
///
/// # Errors
/// - `ExportError::Io` si le répertoire est absent ou non inscriptible.
/// - `ExportError::Encode` si l'encodeur PNG échoue.
pub fn export_png(fb: &FrameBuffer, path: &Path) -> Result<(), ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let image = RgbaImage::from_raw(fb.width, fb.height, fb.data.clone()).ok_or_else(|| {
        ExportError::Encode(format!(
            "buffer de {} octets pour {}×{}",
            fb.data.len(),
            fb.width,
            fb.height
        ))
    })?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image
            .write_to(&mut writer, ImageFormat::Png)
            .map_err(|e| ExportError::Encode(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| io_err(e.into_error()))?
            .sync_all()
            .map_err(io_err)?;
    }
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    log::info!("PNG écrit : {} ({}×{})", path.display(), fb.width, fb.height);
    Ok(())
}
