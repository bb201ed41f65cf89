use crate::config::{Backend, Config};
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::ensure_writable;
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    /// Copy the database (plus the spreadsheet when the CSV backend is
    /// active) next to `dest_file`, or pack both into one zip archive.
    /// Returns the path of what was written.
    pub fn backup(cfg: &Config, dest_file: &str, compress: bool, force: bool) -> AppResult<PathBuf> {
        let src = expand_tilde(&cfg.database);
        let dest = expand_tilde(dest_file);

        // 1️⃣ Check DB exists
        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        let mut sources = vec![src];
        if cfg.backend == Backend::Csv {
            let csv = expand_tilde(&cfg.csv_file);
            if csv.exists() {
                sources.push(csv);
            } else {
                warning(format!("Spreadsheet {} not found, skipped", csv.display()));
            }
        }

        // 2️⃣ Ensure destination folder exists
        if let Some(parent) = dest.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // 3️⃣ Copy or compress
        if compress {
            let zip_path = dest.with_extension("zip");
            ensure_writable(&zip_path, force)?;
            compress_backup(&sources, &zip_path)?;
            success(format!("Backup created: {}", zip_path.display()));
            return Ok(zip_path);
        }

        ensure_writable(&dest, force)?;
        fs::copy(&sources[0], &dest)?;

        for extra in &sources[1..] {
            let side = sidecar_path(&dest, extra);
            fs::copy(extra, &side)?;
            info(format!("Spreadsheet copied to {}", side.display()));
        }

        success(format!("Backup created: {}", dest.display()));
        Ok(dest)
    }
}

/// `backup.sqlite` + `stock.csv` → `backup.stock.csv`
fn sidecar_path(dest: &Path, extra: &Path) -> PathBuf {
    let name = extra
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "records.csv".into());
    dest.with_extension(name)
}

/// Compress the backup into a single .zip
fn compress_backup(files: &[PathBuf], zip_path: &Path) -> AppResult<()> {
    let file = fs::File::create(zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for path in files {
        let name = path
            .file_name()
            .ok_or_else(|| AppError::Other(format!("invalid file name: {}", path.display())))?
            .to_string_lossy()
            .to_string();

        zip.start_file(name, options)
            .map_err(std::io::Error::other)?;

        let mut f = fs::File::open(path)?;
        std::io::copy(&mut f, &mut zip)?;
    }

    zip.finish().map_err(std::io::Error::other)?;

    info(format!("📦 Compressed: {}", zip_path.display()));
    Ok(())
}
