#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tagserve::http::producer::Site;
use tagserve::http::tags::Tags;

/// 784111777 is the RFC 7231 example date.
pub const FIXED_DATE: &str = "Sun, 06 Nov 1994 08:49:37 GMT";

pub fn fixed_time() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(784_111_777)
}

/// Scratch directory removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "tagserve-{}-{}",
            std::process::id(),
            name
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> PathBuf {
        let file = self.path.join(relative);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&file, contents).unwrap();
        file
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

pub fn site(root: &Path, server_name: &str) -> Site {
    Site::with_tags(root, Tags::with_clock(server_name, fixed_time))
}
