//! Remembers the last connected account between runs

use std::path::PathBuf;

use tracing::warn;

/// File-backed slot holding one account address. Write failures are logged
/// and otherwise ignored; losing the remembered account only costs a manual
/// `/switch` on the next run.
#[derive(Debug, Clone, Default)]
pub struct AccountMemory {
    path: Option<PathBuf>,
}

impl AccountMemory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Memory that never stores anything
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn load(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        let content = std::fs::read_to_string(path).ok()?;
        let address = content.trim();
        (!address.is_empty()).then(|| address.to_string())
    }

    pub fn save(&self, address: &str) {
        let Some(path) = &self.path else {
            return;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(path, address) {
            warn!("Failed to remember account in {}: {}", path.display(), e);
        }
    }

    pub fn forget(&self) {
        if let Some(path) = &self.path {
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!("Failed to forget account {}: {}", path.display(), e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_and_forget() {
        let dir = tempfile::tempdir().unwrap();
        let memory = AccountMemory::new(dir.path().join("nested").join("account"));

        assert_eq!(memory.load(), None);
        memory.save("5Alice");
        assert_eq!(memory.load().as_deref(), Some("5Alice"));
        memory.forget();
        assert_eq!(memory.load(), None);
    }

    #[test]
    fn test_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("account");
        std::fs::write(&path, "  \n").unwrap();
        assert_eq!(AccountMemory::new(path).load(), None);
    }

    #[test]
    fn test_disabled_memory_is_inert() {
        let memory = AccountMemory::disabled();
        memory.save("5Alice");
        assert_eq!(memory.load(), None);
        memory.forget();
    }
}
