//! Backend en memoria: un `HashMap` nombre -> valor.

use std::collections::HashMap;

use serde_json::Value;

use super::ArtifactStore;
use crate::errors::PipelineError;

#[derive(Debug, Default)]
pub struct InMemoryArtifactStore {
    artifacts: HashMap<String, Value>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self { artifacts: HashMap::new() }
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.artifacts.contains_key(name)
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn save(&mut self, name: &str, value: Value) -> Result<(), PipelineError> {
        self.artifacts.insert(name.to_string(), value);
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<Value>, PipelineError> {
        Ok(self.artifacts.get(name).cloned())
    }

    fn delete(&mut self, name: &str) -> Result<(), PipelineError> {
        self.artifacts.remove(name);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), PipelineError> {
        self.artifacts.clear();
        Ok(())
    }

    fn shrink(&mut self) {
        self.artifacts.shrink_to_fit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn save_overwrites_silently() {
        let mut store = InMemoryArtifactStore::new();
        store.save("a", json!(1)).unwrap();
        store.save("a", json!(2)).unwrap();
        assert_eq!(store.load("a").unwrap(), Some(json!(2)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn load_missing_is_none() {
        let store = InMemoryArtifactStore::new();
        assert_eq!(store.load("nada").unwrap(), None);
    }

    #[test]
    fn delete_missing_is_noop() {
        let mut store = InMemoryArtifactStore::new();
        store.delete("nada").unwrap();
        store.save("a", json!(true)).unwrap();
        store.delete("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let mut store = InMemoryArtifactStore::new();
        store.save("a", json!(1)).unwrap();
        store.save("b", json!(2)).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
    }
}
