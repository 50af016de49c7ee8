use crate::model::{CacheError, ClassifiedRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Last-seen snapshot of currently-free games, stored as a JSON array.
pub struct JsonCache {
    path: PathBuf,
}

impl JsonCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the snapshot. Missing or broken files count as an empty cache.
    pub fn load(&self) -> Vec<ClassifiedRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(CacheError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                info!("No cache at {}, starting empty", self.path.display());
                Vec::new()
            }
            Err(e) => {
                warn!("Ignoring unreadable cache {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<Vec<ClassifiedRecord>, CacheError> {
        let content = fs::read_to_string(&self.path)?;
        let records = serde_json::from_str(&content)?;
        Ok(records)
    }

    /// Replaces the whole snapshot: writes a sibling temp file, then renames it over the cache.
    pub fn save(&self, records: &[ClassifiedRecord]) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, serde_json::to_string_pretty(records)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Vec<ClassifiedRecord> {
        vec![
            ClassifiedRecord {
                title: "Celeste".into(),
                url: "https://store.epicgames.com/p/celeste".into(),
                date: "2024-01-08".into(),
            },
            ClassifiedRecord {
                title: "Unknown Game".into(),
                url: "https://store.epicgames.com/p/".into(),
                date: "2024-01-11".into(),
            },
        ]
    }

    #[test]
    fn saved_snapshot_reads_back_equal() {
        let dir = TempDir::new().unwrap();
        let cache = JsonCache::new(dir.path().join("games_cache.json"));

        cache.save(&sample()).unwrap();
        assert_eq!(cache.load(), sample());
    }

    #[test]
    fn save_overwrites_the_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let cache = JsonCache::new(dir.path().join("games_cache.json"));

        cache.save(&sample()).unwrap();
        cache.save(&sample()[..1]).unwrap();
        assert_eq!(cache.load(), sample()[..1].to_vec());
        assert!(!dir.path().join("games_cache.json.tmp").exists());
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let cache = JsonCache::new(dir.path().join("state/nested/cache.json"));

        cache.save(&sample()).unwrap();
        assert_eq!(cache.try_load().unwrap(), sample());
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let cache = JsonCache::new(dir.path().join("absent.json"));

        assert!(cache.load().is_empty());
        assert!(matches!(cache.try_load(), Err(CacheError::Io(_))));
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games_cache.json");
        fs::write(&path, "{ not json").unwrap();
        let cache = JsonCache::new(&path);

        assert!(cache.load().is_empty());
        assert!(matches!(cache.try_load(), Err(CacheError::Json(_))));
    }

    #[test]
    fn wrong_shape_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games_cache.json");
        fs::write(&path, r#"[{"name": "legacy title-only entry"}]"#).unwrap();

        assert!(JsonCache::new(&path).load().is_empty());
    }
}
