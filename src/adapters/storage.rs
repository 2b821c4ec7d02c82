use crate::domain::ports::RootResolver;

/// Application root on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalRoot {
    base_path: String,
}

impl LocalRoot {
    pub fn new(base_path: impl Into<String>) -> Self {
        let base_path: String = base_path.into();
        // "/" 需保留，其餘去掉結尾斜線
        let trimmed = base_path.trim_end_matches('/');
        Self {
            base_path: if trimmed.is_empty() && base_path.starts_with('/') {
                "/".to_string()
            } else {
                trimmed.to_string()
            },
        }
    }

    /// The process working directory.
    pub fn current_dir() -> std::io::Result<Self> {
        let dir = std::env::current_dir()?;
        Ok(Self::new(dir.to_string_lossy()))
    }
}

impl RootResolver for LocalRoot {
    fn root_dir(&self) -> &str {
        &self.base_path
    }
}
