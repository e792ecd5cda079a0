use fs2::FileExt;
use std::path::{Path, PathBuf};

/// The hosting page the bridge drives. Loads Monaco, exposes the
/// `window.editor` surface, and posts on the two bridge channels.
pub const EDITOR_HTML: &str = include_str!("../web/editor.html");

pub const EDITOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ensure the editor page is extracted to the local data directory.
///
/// Returns the path to the extraction directory
/// (e.g. `~/.local/share/vellum/editor/0.4.0/` on Linux). Frontends point
/// their WebView at `editor.html` inside it.
pub fn ensure_editor_extracted() -> Result<PathBuf, String> {
    let data_dir =
        dirs::data_dir().ok_or_else(|| "Cannot determine data home directory".to_string())?;
    extract_into(&data_dir.join("vellum").join("editor"))
}

fn extract_into(base: &Path) -> Result<PathBuf, String> {
    let editor_dir = base.join(EDITOR_VERSION);

    // Exclusive lock makes check-and-extract atomic across processes
    let lock_path = base.join(".extract.lock");
    if let Some(parent) = lock_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create lock directory: {}", e))?;
    }
    let lock_file = std::fs::File::create(&lock_path)
        .map_err(|e| format!("Failed to create lock file: {}", e))?;
    lock_file
        .lock_exclusive()
        .map_err(|e| format!("Failed to acquire extraction lock: {}", e))?;

    let marker = editor_dir.join(".complete");

    if marker.is_file() {
        if let Ok(version) = std::fs::read_to_string(&marker) {
            if version.trim() == EDITOR_VERSION {
                // Always rewrite editor.html (may change between builds)
                std::fs::write(editor_dir.join("editor.html"), EDITOR_HTML)
                    .map_err(|e| format!("Failed to write editor.html: {}", e))?;
                return Ok(editor_dir);
            }
        }
        // Version mismatch, remove and re-extract
        log::info!("Editor page version mismatch, re-extracting...");
        let _ = std::fs::remove_dir_all(&editor_dir);
    }

    log::info!("Extracting editor page v{} to {:?}", EDITOR_VERSION, editor_dir);

    std::fs::create_dir_all(&editor_dir)
        .map_err(|e| format!("Failed to create editor directory: {}", e))?;

    std::fs::write(editor_dir.join("editor.html"), EDITOR_HTML)
        .map_err(|e| format!("Failed to write editor.html: {}", e))?;

    // Marker last: an incomplete extraction is retried next time
    std::fs::write(&marker, EDITOR_VERSION)
        .map_err(|e| format!("Failed to write completion marker: {}", e))?;

    Ok(editor_dir)
}
