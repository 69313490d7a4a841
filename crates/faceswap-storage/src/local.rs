use crate::keys::validate_filename;
use crate::traits::{ByteStream, Storage, StorageError, StorageResult, StoredObject};
use crate::StorageArea;
use async_trait::async_trait;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `root` - Static root holding the area directories (e.g., "static")
    ///
    /// All area directories are created if missing.
    pub async fn new(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();

        for area in StorageArea::ALL {
            let dir = root.join(area.dir_name());
            fs::create_dir_all(&dir).await.map_err(|e| {
                StorageError::ConfigError(format!(
                    "Failed to create storage directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        Ok(LocalStorage { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory backing an area
    pub fn area_dir(&self, area: StorageArea) -> PathBuf {
        self.root.join(area.dir_name())
    }

    /// Resolve a file name inside an area, rejecting anything that could escape it.
    fn file_path(&self, area: StorageArea, filename: &str) -> StorageResult<PathBuf> {
        validate_filename(filename)?;

        let dir = self.area_dir(area);
        let path = dir.join(filename);

        // Symlinked entries must still resolve inside the area.
        if let (Ok(canonical), Ok(dir_canonical)) = (path.canonicalize(), dir.canonicalize()) {
            if canonical.strip_prefix(&dir_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "File name resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }

    fn partial_path(path: &Path, filename: &str) -> PathBuf {
        path.with_file_name(format!(".{}.partial", filename))
    }

    async fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
        let mut file = fs::File::create(path).await?;
        file.write_all(data).await?;
        file.sync_all().await
    }

    async fn is_file(path: &Path) -> bool {
        match fs::metadata(path).await {
            Ok(meta) => meta.is_file(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(
        &self,
        area: StorageArea,
        filename: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredObject> {
        let path = self.file_path(area, filename)?;
        let size = data.len();
        let start = std::time::Instant::now();

        // Written under a hidden name first so readers never see a partial file.
        let partial = Self::partial_path(&path, filename);
        let written = match Self::write_synced(&partial, &data).await {
            Ok(()) => fs::rename(&partial, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = fs::remove_file(&partial).await;
            return Err(StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            path = %path.display(),
            area = %area,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage write successful"
        );

        Ok(StoredObject {
            area,
            filename: filename.to_string(),
        })
    }

    async fn get(&self, area: StorageArea, filename: &str) -> StorageResult<Vec<u8>> {
        let path = self.file_path(area, filename)?;
        let start = std::time::Instant::now();

        if !Self::is_file(&path).await {
            return Err(StorageError::NotFound(filename.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            area = %area,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage read successful"
        );

        Ok(data)
    }

    async fn delete(&self, area: StorageArea, filename: &str) -> StorageResult<()> {
        let path = self.file_path(area, filename)?;

        if !Self::is_file(&path).await {
            return Err(StorageError::NotFound(filename.to_string()));
        }

        fs::remove_file(&path).await.map_err(|e| {
            StorageError::DeleteFailed(format!("Failed to delete file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            area = %area,
            "Local storage delete successful"
        );

        Ok(())
    }

    async fn exists(&self, area: StorageArea, filename: &str) -> StorageResult<bool> {
        let path = self.file_path(area, filename)?;
        Ok(Self::is_file(&path).await)
    }

    async fn list(&self, area: StorageArea) -> StorageResult<Vec<String>> {
        let dir = self.area_dir(area);
        let mut entries = fs::read_dir(&dir).await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to list directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) if !name.starts_with('.') => names.push(name.to_string()),
                _ => {}
            }
        }
        names.sort();

        Ok(names)
    }

    async fn download_stream(
        &self,
        area: StorageArea,
        filename: &str,
    ) -> StorageResult<ByteStream> {
        let path = self.file_path(area, filename)?;

        if !Self::is_file(&path).await {
            return Err(StorageError::NotFound(filename.to_string()));
        }

        let file = fs::File::open(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to open file {}: {}", path.display(), e))
        })?;

        let path_display = path.display().to_string();
        let stream = tokio_util::io::ReaderStream::new(file).map(move |result| {
            result.map_err(|e| {
                tracing::error!(path = %path_display, error = %e, "Local storage stream error");
                StorageError::DownloadFailed(format!("Failed to read chunk: {}", e))
            })
        });

        Ok(Box::pin(stream))
    }
}
