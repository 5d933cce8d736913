use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::provider::embedded::file_name;
use crate::provider::ProviderError;

#[derive(Debug)]
pub struct RenderedPage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Rasterizes single pages to PNG via pdftoppm. Images land in a scratch
/// directory that is dropped together with the renderer, so nothing is held
/// across documents.
#[derive(Debug)]
pub struct PageRenderer {
    work_dir: TempDir,
    dpi: u32,
}

impl PageRenderer {
    pub fn new(dpi: u32) -> std::io::Result<Self> {
        let work_dir = tempfile::tempdir()?;
        Ok(Self { work_dir, dpi })
    }

    pub fn render_page(&self, pdf_path: &Path, page_idx: usize) -> Result<RenderedPage, ProviderError> {
        let file = file_name(pdf_path);
        let render_err = |reason: String| ProviderError::Render {
            file: file.clone(),
            page: page_idx,
            reason,
        };

        // pdftoppm uses 1-based page indices
        let page_number = page_idx + 1;
        let page_dir = self.work_dir.path().join(format!("page_{:03}", page_number));
        fs::create_dir_all(&page_dir).map_err(|e| render_err(e.to_string()))?;
        let prefix = page_dir.join("page");

        let status = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg("-f")
            .arg(page_number.to_string())
            .arg("-l")
            .arg(page_number.to_string())
            .arg(pdf_path)
            .arg(&prefix)
            .status()
            .map_err(|e| {
                render_err(format!("failed to invoke pdftoppm ({e}); is poppler-utils installed?"))
            })?;

        if !status.success() {
            return Err(render_err(format!("pdftoppm exited with status {status}")));
        }

        // pdftoppm pads the page suffix by the document's digit count, so the
        // exact output name varies; scan the per-page dir instead.
        let mut images: Vec<PathBuf> = fs::read_dir(&page_dir)
            .map_err(|e| render_err(e.to_string()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().map(|ext| ext == "png").unwrap_or(false))
            .collect();
        images.sort();

        let path = images
            .into_iter()
            .next()
            .ok_or_else(|| render_err("pdftoppm produced no image".to_string()))?;

        let (width, height) =
            image::image_dimensions(&path).map_err(|e| render_err(e.to_string()))?;
        log::debug!(
            "rendered {} page {} at {} dpi ({}x{})",
            file,
            page_number,
            self.dpi,
            width,
            height
        );

        Ok(RenderedPage { path, width, height })
    }
}
