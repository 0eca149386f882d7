#![forbid(unsafe_code)]

//! Photo evidence on disk.
//!
//! Layout: `<root>/<YYYY-MM-DD>/<employee id>-<employee>-<role>/image_<item>_<employee>.<ext>`.
//! The path is a pure function of (day, employee, item, extension), so a
//! re-upload lands on the same file and replaces it. The employee id keeps
//! names that sanitize to the same segment apart.

use crate::store::{StoreError, StoreEvidenceRequest};
use ck_core::{Day, Employee, ItemId};
use std::path::{Path, PathBuf};

pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Filesystem operations the evidence store needs.
pub trait EvidenceFs {
    /// Creates missing parent directories and replaces an existing file.
    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalFs;

impl EvidenceFs for LocalFs {
    fn write(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, bytes)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[derive(Clone, Debug)]
pub struct EvidenceStore<F = LocalFs> {
    root: PathBuf,
    fs: F,
}

impl EvidenceStore<LocalFs> {
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::new(root, LocalFs)
    }
}

impl<F: EvidenceFs> EvidenceStore<F> {
    pub fn new(root: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn path_for(
        &self,
        employee: &Employee,
        day: Day,
        item_id: ItemId,
        extension: &str,
    ) -> Result<PathBuf, StoreError> {
        let extension = normalize_extension(extension)?;
        let employee_segment = path_segment(employee.name.as_str());
        let folder = format!(
            "{}-{employee_segment}-{}",
            employee.id,
            path_segment(employee.role.as_str())
        );
        let file_name = format!("image_{item_id}_{employee_segment}.{extension}");
        Ok(self.root.join(day.as_key()).join(folder).join(file_name))
    }

    /// Writes the upload and returns the path to persist with the response.
    pub fn store(&self, request: StoreEvidenceRequest<'_>) -> Result<PathBuf, StoreError> {
        if request.bytes.is_empty() {
            return Err(StoreError::InvalidInput("evidence upload is empty"));
        }
        let path = self.path_for(
            request.employee,
            request.day,
            request.item_id,
            request.extension,
        )?;
        self.fs.write(&path, request.bytes)?;
        tracing::info!(
            path = %path.display(),
            item_id = %request.item_id,
            bytes = request.bytes.len(),
            "evidence stored"
        );
        Ok(path)
    }

    pub fn exists(&self, path: &str) -> bool {
        let path = path.trim();
        !path.is_empty() && self.fs.exists(Path::new(path))
    }
}

fn normalize_extension(raw: &str) -> Result<String, StoreError> {
    let ext = raw.trim().trim_start_matches('.').to_ascii_lowercase();
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(StoreError::InvalidInput(
            "evidence must be a jpg, jpeg or png image",
        ))
    }
}

/// Keeps letters, digits, `-` and `_`; everything else (separators, dots, spaces) becomes `_`.
fn path_segment(value: &str) -> String {
    let out: String = value
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if out.is_empty() { "_".to_string() } else { out }
}
