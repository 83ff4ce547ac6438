use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::ledger::Shop;
use crate::utils::{ensure_dir, resolve_data_root};

use super::{Result, StorageBackend};

const STORE_FILE: &str = "shop.json";
const TMP_SUFFIX: &str = "tmp";

/// File-backed snapshot store. Writes go to a temporary sibling first and
/// are renamed into place so a crash never leaves a half-written store.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
    store_file: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = resolve_data_root(root);
        ensure_dir(&root)?;
        let store_file = root.join(STORE_FILE);
        Ok(Self { root, store_file })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn store_path(&self) -> &Path {
        &self.store_file
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Option<Shop>> {
        if !self.store_file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.store_file)?;
        let shop: Shop = serde_json::from_str(&data)?;
        Ok(Some(shop))
    }

    fn save(&self, shop: &Shop) -> Result<()> {
        let json = serde_json::to_string_pretty(shop)?;
        let tmp = tmp_path(&self.store_file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.store_file)?;
        tracing::debug!(path = %self.store_file.display(), "snapshot saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
