// FIFO-locked access to a single text file
//
// `tokio::sync::Mutex` hands the lock out in the order `lock()` was called,
// so queued actions run strictly first-come, first-served.

use std::ffi::OsString;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, trace};

use crate::store::{StoreError, TextEncoding};

/// A text file whose mutating accesses are serialized by a FIFO lock.
#[derive(Debug)]
pub struct SyncedFile {
    path: PathBuf,
    encoding: TextEncoding,
    lock: Mutex<()>,
}

/// Proof that the holder owns the file lock. Dropping it releases the lock.
#[derive(Debug)]
pub struct FileLockGuard<'a> {
    _guard: MutexGuard<'a, ()>,
    path: &'a Path,
}

impl Drop for FileLockGuard<'_> {
    fn drop(&mut self) {
        trace!(path = %self.path.display(), "released file lock");
    }
}

impl SyncedFile {
    /// Create a handle using the platform encoding.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_encoding(path, TextEncoding::for_platform())
    }

    /// Create a handle with an explicit encoding.
    pub fn with_encoding(path: impl Into<PathBuf>, encoding: TextEncoding) -> Self {
        Self {
            path: path.into(),
            encoding,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Wait for every earlier lock request to finish, then take the lock.
    pub async fn lock(&self) -> FileLockGuard<'_> {
        let guard = self.lock.lock().await;
        trace!(path = %self.path.display(), "acquired file lock");
        FileLockGuard {
            _guard: guard,
            path: &self.path,
        }
    }

    /// Run `action` while holding the lock.
    ///
    /// Futures do nothing until polled, so `action` starts only once every
    /// previously queued action has completed. Its output, including an
    /// error, is returned unchanged; the lock is released whether it
    /// succeeds, fails or panics.
    pub async fn with_lock<F>(&self, action: F) -> F::Output
    where
        F: Future,
    {
        let _guard = self.lock().await;
        action.await
    }

    /// Read and decode the whole file.
    pub async fn read(&self) -> Result<String, StoreError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| StoreError::from_io(&self.path, e))?;
        self.encoding
            .decode(&bytes)
            .ok_or_else(|| StoreError::Encoding {
                path: self.path.clone(),
                encoding: self.encoding,
            })
    }

    /// Encode `content` and replace the file with it.
    ///
    /// The bytes go to a temporary file next to the resolved target, which
    /// is synced and then renamed over it, so the file never holds a partial
    /// write. A symlinked path keeps its link and the target keeps its
    /// permissions.
    pub async fn write(&self, content: &str) -> Result<(), StoreError> {
        let bytes = self.encoding.encode(content);
        let target = self.resolve_target().await?;
        let temp_path = temp_path_for(&target);

        if let Err(e) = write_synced(&temp_path, &bytes).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::from_io(&self.path, e));
        }

        if let Err(e) = copy_permissions(&target, &temp_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::from_io(&self.path, e));
        }

        if let Err(e) = fs::rename(&temp_path, &target).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StoreError::from_io(&self.path, e));
        }

        debug!(
            path = %self.path.display(),
            target = %target.display(),
            bytes = bytes.len(),
            "wrote dictionary file"
        );
        Ok(())
    }

    /// The file the path finally points at, following symlinks. A file that
    /// does not exist yet is created at the path as given.
    async fn resolve_target(&self) -> Result<PathBuf, StoreError> {
        match fs::canonicalize(&self.path).await {
            Ok(target) => Ok(target),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.path.clone()),
            Err(e) => Err(StoreError::from_io(&self.path, e)),
        }
    }

    /// [`read`](Self::read) under the lock.
    pub async fn read_with_lock(&self) -> Result<String, StoreError> {
        self.with_lock(self.read()).await
    }

    /// [`write`](Self::write) under the lock.
    pub async fn write_with_lock(&self, content: &str) -> Result<(), StoreError> {
        self.with_lock(self.write(content)).await
    }
}

/// `dir/name.ext` -> `dir/name.ext.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("dictionary"));
    name.push(".tmp");
    path.with_file_name(name)
}

async fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

/// Give `temp` the permissions of `target`, if `target` exists.
async fn copy_permissions(target: &Path, temp: &Path) -> io::Result<()> {
    match fs::metadata(target).await {
        Ok(meta) => fs::set_permissions(temp, meta.permissions()).await,
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn temp_file(contents: &[u8]) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn temp_path_keeps_the_extension() {
        assert_eq!(
            temp_path_for(Path::new("/x/Custom Dictionary.txt")),
            PathBuf::from("/x/Custom Dictionary.txt.tmp")
        );
    }

    #[tokio::test]
    async fn read_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let file = SyncedFile::with_encoding(dir.path().join("none.txt"), TextEncoding::Utf8);
        assert!(matches!(file.read().await, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn read_malformed_content_is_an_encoding_error() {
        let (_dir, path) = temp_file(&[0x61, 0x00, 0x62]);
        let file = SyncedFile::with_encoding(&path, TextEncoding::Utf16Le);
        assert!(matches!(
            file.read().await,
            Err(StoreError::Encoding { encoding: TextEncoding::Utf16Le, .. })
        ));
    }

    #[tokio::test]
    async fn write_then_read_utf16() {
        let (_dir, path) = temp_file(b"");
        let file = SyncedFile::with_encoding(&path, TextEncoding::Utf16Le);
        file.write_with_lock("\u{0441}\u{043B}\u{043E}\u{0432}\u{043E}\nword").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap()[..2], [0x41, 0x04]);
        assert_eq!(
            file.read_with_lock().await.unwrap(),
            "\u{0441}\u{043B}\u{043E}\u{0432}\u{043E}\nword"
        );
        assert!(!temp_path_for(&path).exists());
    }

    #[tokio::test]
    async fn write_of_read_is_byte_identical() {
        let original: Vec<u8> = [0xFF, 0xFE]
            .into_iter()
            .chain("alpha\r\nbeta\r\n".encode_utf16().flat_map(u16::to_le_bytes))
            .collect();
        let (_dir, path) = temp_file(&original);
        let file = SyncedFile::with_encoding(&path, TextEncoding::Utf16Le);

        let content = file.read().await.unwrap();
        file.write(&content).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), original);

        let utf8 = "\u{FEFF}caf\u{00E9}\nna\u{00EF}ve";
        std::fs::write(&path, utf8).unwrap();
        let file = SyncedFile::with_encoding(&path, TextEncoding::Utf8);
        let content = file.read().await.unwrap();
        file.write(&content).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), utf8.as_bytes());
    }

    #[tokio::test]
    async fn write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let file = SyncedFile::with_encoding(dir.path().join("no/such/words.txt"), TextEncoding::Utf8);
        assert!(matches!(file.write("x").await, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn write_creates_a_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("new.txt");
        let file = SyncedFile::with_encoding(&path, TextEncoding::Utf8);
        file.write("alpha\n").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "alpha\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn write_goes_through_a_symlink() {
        let (dir, real) = temp_file(b"alpha\n");
        let link = dir.path().join("Custom Dictionary.txt");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let file = SyncedFile::with_encoding(&link, TextEncoding::Utf8);
        file.write("alpha\nbeta\n").await.unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(std::fs::read_to_string(&real).unwrap(), "alpha\nbeta\n");
        assert!(!temp_path_for(&link).exists());
        assert!(!temp_path_for(&real).exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn write_keeps_the_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, path) = temp_file(b"alpha\n");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();

        let file = SyncedFile::with_encoding(&path, TextEncoding::Utf8);
        file.write("alpha\nbeta\n").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "alpha\nbeta\n");
    }

    #[tokio::test]
    async fn failed_action_releases_the_lock() {
        let (_dir, path) = temp_file(b"");
        let file = SyncedFile::with_encoding(&path, TextEncoding::Utf8);

        let failed: Result<(), StoreError> = file
            .with_lock(async { Err(StoreError::InvalidWord(String::new())) })
            .await;
        assert!(failed.is_err());

        let value = tokio::time::timeout(Duration::from_secs(5), file.with_lock(async { 7 }))
            .await
            .expect("lock was not released");
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn actions_run_in_arrival_order() {
        let (_dir, path) = temp_file(b"");
        let file = Arc::new(SyncedFile::with_encoding(&path, TextEncoding::Utf8));
        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));

        // Hold the lock while the contenders queue up behind it.
        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let holder = {
            let file = Arc::clone(&file);
            tokio::spawn(async move {
                file.with_lock(async {
                    let _ = release_rx.await;
                })
                .await
            })
        };
        tokio::task::yield_now().await;

        let mut contenders = Vec::new();
        for i in 0..5 {
            let file = Arc::clone(&file);
            let order = Arc::clone(&order);
            contenders.push(tokio::spawn(async move {
                file.with_lock(async {
                    tokio::task::yield_now().await;
                    order.lock().push(i);
                })
                .await
            }));
            // Let the task reach the lock queue before spawning the next one.
            tokio::task::yield_now().await;
        }

        release_tx.send(()).unwrap();
        holder.await.unwrap();
        for contender in contenders {
            contender.await.unwrap();
        }
        assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn critical_sections_never_overlap() {
        let (_dir, path) = temp_file(b"");
        let file = Arc::new(SyncedFile::with_encoding(&path, TextEncoding::Utf8));
        let inside = Arc::new(std::sync::atomic::AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let file = Arc::clone(&file);
                let inside = Arc::clone(&inside);
                tokio::spawn(async move {
                    file.with_lock(async {
                        let now = inside.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                        assert_eq!(now, 0);
                        tokio::time::sleep(Duration::from_millis(2)).await;
                        inside.fetch_sub(1, std::sync::atomic::Ordering::SeqCst);
                    })
                    .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }
    }
}
