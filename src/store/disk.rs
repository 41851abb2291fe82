//! Backend en disco: un archivo JSON por artifact bajo `{root}/{namespace}`.
//!
//! El índice nombre -> path vive en memoria; un miss del índice cae al path
//! calculado, así un store recién construido puede leer artifacts escritos
//! por un proceso anterior. El directorio se crea recién en el primer save.
//! Sin locking: el directorio tiene un único escritor (el pipeline dueño).
//! TODO: barrer en clear los archivos no indexados (restos de procesos previos).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use super::ArtifactStore;
use crate::errors::PipelineError;
use crate::fsutil::write_atomic;

#[derive(Debug)]
pub struct DiskArtifactStore {
    directory: PathBuf,
    index: HashMap<String, PathBuf>,
}

impl DiskArtifactStore {
    /// Store bajo `{root}/{namespace}`. El namespace es el nombre del
    /// pipeline dueño, lo que aísla sus archivos de otros pipelines que
    /// compartan raíz.
    pub fn new(root: impl AsRef<Path>, namespace: &str) -> Self {
        Self { directory: root.as_ref().join(namespace),
               index: HashMap::new() }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn artifact_path(&self, name: &str) -> Result<PathBuf, PipelineError> {
        validate_name(name)?;
        Ok(self.index
               .get(name)
               .cloned()
               .unwrap_or_else(|| self.directory.join(name)))
    }
}

/// El nombre del artifact se usa verbatim como nombre de archivo: se
/// rechazan separadores y componentes relativos antes de tocar el
/// filesystem.
fn validate_name(name: &str) -> Result<(), PipelineError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\');
    if invalid {
        return Err(PipelineError::InvalidArtifactName(name.to_string()));
    }
    Ok(())
}

impl ArtifactStore for DiskArtifactStore {
    fn save(&mut self, name: &str, value: Value) -> Result<(), PipelineError> {
        validate_name(name)?;
        let path = self.directory.join(name);
        let bytes = serde_json::to_vec(&value)?;
        write_atomic(&path, &bytes)?;
        self.index.insert(name.to_string(), path);
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<Value>, PipelineError> {
        let path = self.artifact_path(name)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn delete(&mut self, name: &str) -> Result<(), PipelineError> {
        let path = self.artifact_path(name)?;
        self.index.remove(name);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    /// Borra los archivos conocidos por el índice. Archivos escritos por un
    /// proceso anterior (nunca indexados acá) quedan en el directorio.
    fn clear(&mut self) -> Result<(), PipelineError> {
        let names: Vec<String> = self.index.keys().cloned().collect();
        for name in names {
            self.delete(&name)?;
        }
        self.index.clear();
        // si el directorio quedó vacío se borra también; si no, queda
        let _ = fs::remove_dir(&self.directory);
        Ok(())
    }

    fn shrink(&mut self) {
        self.index.shrink_to_fit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DiskArtifactStore::new(dir.path(), "p1");
        store.save("dataset", json!({ "rows": 3 })).unwrap();
        assert_eq!(store.load("dataset").unwrap(), Some(json!({ "rows": 3 })));
    }

    #[test]
    fn fresh_store_reads_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut writer = DiskArtifactStore::new(dir.path(), "p1");
            writer.save("x", json!(42)).unwrap();
        }
        let reader = DiskArtifactStore::new(dir.path(), "p1");
        assert_eq!(reader.load("x").unwrap(), Some(json!(42)));
    }

    #[test]
    fn rejects_path_like_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DiskArtifactStore::new(dir.path(), "p1");
        for bad in ["", ".", "..", "../fuera", "a/b", "a\\b"] {
            let err = store.save(bad, json!(0)).unwrap_err();
            assert_eq!(err, PipelineError::InvalidArtifactName(bad.to_string()));
        }
    }

    #[test]
    fn namespaces_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = DiskArtifactStore::new(dir.path(), "a");
        let mut b = DiskArtifactStore::new(dir.path(), "b");
        a.save("shared", json!("de a")).unwrap();
        b.save("shared", json!("de b")).unwrap();
        assert_eq!(a.load("shared").unwrap(), Some(json!("de a")));
        assert_eq!(b.load("shared").unwrap(), Some(json!("de b")));
    }

    #[test]
    fn clear_deletes_backing_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DiskArtifactStore::new(dir.path(), "p1");
        store.save("a", json!(1)).unwrap();
        store.save("b", json!(2)).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load("a").unwrap(), None);
        assert_eq!(store.load("b").unwrap(), None);
        assert!(!store.directory().exists());
    }

    #[test]
    fn delete_missing_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DiskArtifactStore::new(dir.path(), "p1");
        store.delete("fantasma").unwrap();
    }
}
