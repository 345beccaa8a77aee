use crate::options::OptionList;
use directories::ProjectDirs;
use parking_lot::Mutex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed key the option list is stored under.
pub const STORAGE_KEY: &str = "spinTheWheelMenuItems";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to determine data directory")]
    DataDirNotFound,
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed option data: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait OptionStore {
    fn load(&self) -> Result<OptionList, StoreError>;
    fn save(&self, items: &OptionList) -> Result<(), StoreError>;
}

/// Loads the saved list, falling back to an empty one.
pub fn load_or_default(store: &dyn OptionStore) -> OptionList {
    store.load().unwrap_or_else(|e| {
        log::error!("Could not load options: {}", e);
        OptionList::default()
    })
}

/// Saves `items`, logging instead of failing.
pub fn persist(store: &dyn OptionStore, items: &OptionList) {
    if let Err(e) = store.save(items) {
        log::error!("Could not save options: {}", e);
    }
}

pub fn default_store_path() -> Result<PathBuf, StoreError> {
    let proj_dirs =
        ProjectDirs::from("org", "dudu", "spinwheel").ok_or(StoreError::DataDirNotFound)?;
    Ok(proj_dirs.data_dir().join(format!("{STORAGE_KEY}.json")))
}

/// The option list as a JSON array of strings in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Result<Self, StoreError> {
        default_store_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OptionStore for JsonFileStore {
    fn load(&self) -> Result<OptionList, StoreError> {
        match fs_err::read_to_string(&self.path) {
            Ok(s) if s.trim().is_empty() => Ok(OptionList::default()),
            Ok(s) => Ok(serde_json::from_str(&s)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(OptionList::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, items: &OptionList) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs_err::create_dir_all(parent)?;
        }
        fs_err::write(&self.path, serde_json::to_string(items)?)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<Option<OptionList>>,
}

impl MemoryStore {
    pub fn with_items(items: OptionList) -> Self {
        Self {
            items: Mutex::new(Some(items)),
        }
    }

    pub fn snapshot(&self) -> Option<OptionList> {
        self.items.lock().clone()
    }
}

impl OptionStore for MemoryStore {
    fn load(&self) -> Result<OptionList, StoreError> {
        Ok(self.items.lock().clone().unwrap_or_default())
    }

    fn save(&self, items: &OptionList) -> Result<(), StoreError> {
        *self.items.lock() = Some(items.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    fn scratch_path(name: &str) -> PathBuf {
        let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir()
            .join(format!("wheelkit_{}_{}", std::process::id(), unique))
            .join(name)
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = JsonFileStore::new(scratch_path("absent.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("options.json");
        let store = JsonFileStore::new(&path);
        let items: OptionList = ["Tacos", "Sushi", "Tacos"].into_iter().collect();

        store.save(&items).unwrap();
        assert_eq!(
            fs_err::read_to_string(&path).unwrap(),
            r#"["Tacos","Sushi","Tacos"]"#
        );
        assert_eq!(store.load().unwrap(), items);
    }

    #[test]
    fn test_malformed_data_degrades_to_empty() {
        let path = scratch_path("broken.json");
        fs_err::create_dir_all(path.parent().unwrap()).unwrap();
        fs_err::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
        assert!(load_or_default(&store).is_empty());
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let path = scratch_path("numbers.json");
        fs_err::create_dir_all(path.parent().unwrap()).unwrap();
        fs_err::write(&path, "[1, 2, 3]").unwrap();
        assert!(load_or_default(&JsonFileStore::new(&path)).is_empty());
    }

    #[test]
    fn test_unwritable_path_is_not_fatal() {
        let dir = scratch_path("as_dir");
        fs_err::create_dir_all(&dir).unwrap();
        // the target is a directory, so the write fails
        let store = JsonFileStore::new(&dir);
        assert!(store.save(&OptionList::default()).is_err());
        persist(&store, &OptionList::default());
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::default();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.snapshot(), None);

        let items: OptionList = ["Pho"].into_iter().collect();
        persist(&store, &items);
        assert_eq!(store.snapshot(), Some(items.clone()));
        assert_eq!(load_or_default(&store), items);
    }

    #[test]
    fn test_default_path_uses_storage_key() {
        if let Ok(path) = default_store_path() {
            assert_eq!(
                path.file_name().and_then(|n| n.to_str()),
                Some("spinTheWheelMenuItems.json")
            );
        }
    }
}
