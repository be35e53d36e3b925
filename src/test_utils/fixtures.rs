use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Isolated directory tree for filesystem tests, removed on drop.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {root:?}");

        Self { temp_dir, root }
    }

    #[must_use]
    pub fn path(&self, relative_path: &str) -> PathBuf {
        self.root.join(relative_path)
    }

    /// Create a file with text content, making parent directories as needed.
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        self.create_bytes(relative_path, content.as_bytes())
    }

    pub fn create_bytes(&self, relative_path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    /// Create a file of `size` zero bytes.
    pub fn create_sized(&self, relative_path: &str, size: usize) -> PathBuf {
        self.create_bytes(relative_path, &vec![0_u8; size])
    }

    pub fn create_dir(&self, relative_path: &str) -> PathBuf {
        let full_path = self.path(relative_path);
        std::fs::create_dir_all(&full_path).expect("Failed to create dir");
        println!("[FIXTURE] Created directory: {full_path:?}");
        full_path
    }

    /// Sorted names of the entries directly in `relative_path` ("" for the root).
    #[must_use]
    pub fn list(&self, relative_path: &str) -> Vec<String> {
        list_names(&self.path(relative_path))
    }
}

fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|entry| {
            entry
                .expect("Failed to read entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

impl Drop for UnitTestFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.root);
    }
}
