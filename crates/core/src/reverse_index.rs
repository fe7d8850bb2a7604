//! The reverse index (§3, C4): the lookup tables the resolver and walker
//! query. Built once, read-only afterward. The resolver never touches the
//! filesystem — every lookup in §4.5/§4.6 goes through this structure.

use crate::entities::FileRecord;
use std::collections::HashMap;

/// `byPath` / `byStem` / `javaFqnMap` / `javaPackageDirMap` from §3.
#[derive(Debug, Clone, Default)]
pub struct ReverseIndex {
    by_path: HashMap<String, FileRecord>,
    by_stem: HashMap<String, Vec<String>>,
    java_fqn_map: HashMap<String, String>,
    java_package_dir_map: HashMap<String, Vec<String>>,
}

impl ReverseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file record. Invariant 1 (§3): every candidate file appears
    /// in `byPath` exactly once — a second insert for the same path replaces
    /// the first rather than creating a duplicate stem entry.
    pub fn insert(&mut self, record: FileRecord) {
        let path = record.relative_path.clone();
        let stem = record.stem().to_string();
        if self.by_path.contains_key(&path) {
            // Re-insertion: drop the stale stem entry before re-adding below.
            if let Some(paths) = self.by_stem.get_mut(&stem) {
                paths.retain(|p| p != &path);
            }
        }
        self.by_stem.entry(stem).or_default().push(path.clone());
        self.by_path.insert(path, record);
    }

    pub fn get(&self, path: &str) -> Option<&FileRecord> {
        self.by_path.get(path)
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn by_stem(&self, stem: &str) -> &[String] {
        self.by_stem.get(stem).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRecord> {
        self.by_path.values()
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.by_path.keys()
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    pub fn insert_java_fqn(&mut self, fqn: String, path: String) {
        self.java_fqn_map.entry(fqn).or_insert(path);
    }

    pub fn java_fqn(&self, fqn: &str) -> Option<&str> {
        self.java_fqn_map.get(fqn).map(|s| s.as_str())
    }

    pub fn insert_java_package_member(&mut self, package_dir: String, path: String) {
        self.java_package_dir_map
            .entry(package_dir)
            .or_default()
            .push(path);
    }

    pub fn java_package_members(&self, package_dir: &str) -> &[String] {
        self.java_package_dir_map
            .get(package_dir)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}
