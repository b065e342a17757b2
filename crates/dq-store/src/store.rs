//! CRUD over rule-set documents.
//!
//! Every operation reads the current on-disk state, mutates it and writes it
//! back; there is no in-memory cache and no locking. A document is assumed
//! to be owned by a single logical session at a time, and concurrent writers
//! race with last-writer-wins semantics.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::debug;

use dq_model::catalog::{self, ColumnArity, RuleId};
use dq_model::{ColumnGroup, ParamMap, RuleInstance, RuleSetDoc, is_valid_set_name};

use crate::error::{Result, StoreError};
use crate::paths::{RULE_SET_EXTENSION, RULE_SETS_DIR, VALIDATIONS_DIR};

/// Filesystem-backed store owning the per-name rule-set documents.
///
/// The UI layer never touches the documents directly; all mutation goes
/// through these operations.
#[derive(Debug, Clone)]
pub struct RuleSetStore {
    sets_dir: PathBuf,
    validations_dir: PathBuf,
}

impl RuleSetStore {
    /// Open a store rooted at `root`, creating its directory layout.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let store = Self {
            sets_dir: root.join(RULE_SETS_DIR),
            validations_dir: root.join(VALIDATIONS_DIR),
        };
        for dir in [&store.sets_dir, &store.validations_dir] {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(store)
    }

    pub fn validations_dir(&self) -> &Path {
        &self.validations_dir
    }

    /// Path of the document backing a rule set.
    pub fn set_path(&self, set_name: &str) -> PathBuf {
        self.sets_dir
            .join(format!("{set_name}.{RULE_SET_EXTENSION}"))
    }

    /// Create an empty rule set if one does not exist yet.
    ///
    /// Returns true when a new document was created; an existing document is
    /// left untouched.
    pub fn create_empty(&self, set_name: &str) -> Result<bool> {
        if !is_valid_set_name(set_name) {
            return Err(StoreError::InvalidName {
                name: set_name.to_string(),
            });
        }
        let path = self.set_path(set_name);
        if path.exists() {
            return Ok(false);
        }
        self.save(&RuleSetDoc::empty(set_name, timestamp()))?;
        debug!(set_name, "created empty rule set");
        Ok(true)
    }

    /// Load a rule-set document.
    ///
    /// A missing document is an error: once a set has been listed, its file
    /// is expected to be present.
    pub fn load(&self, set_name: &str) -> Result<RuleSetDoc> {
        let path = self.set_path(set_name);
        let raw = std::fs::read_to_string(&path).map_err(|source| StoreError::Read {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Parse { path, source })
    }

    /// Append a rule under a single-column group key.
    ///
    /// No duplicate guard here: single-column duplicate rejection happens at
    /// interface-name granularity before this call.
    pub fn add_single_column(
        &self,
        set_name: &str,
        column: &str,
        rule: RuleId,
        parameters: ParamMap,
    ) -> Result<()> {
        let mut doc = self.load_or_create(set_name)?;
        doc.push_rule(
            ColumnGroup::single(column).key(),
            RuleInstance::new(rule, parameters),
        );
        self.save(&doc)?;
        debug!(set_name, column, rule = %rule, "added single-column rule");
        Ok(())
    }

    /// Append a rule under a multi-column group key.
    ///
    /// For any-column-count rules the key is canonicalized against existing
    /// keys, so a set-equal column group in a different order reuses the
    /// stored order. An identical `(rule, parameters)` pair already present
    /// in the group is not appended twice.
    pub fn add_multi_column(
        &self,
        set_name: &str,
        columns: &ColumnGroup,
        rule: RuleId,
        parameters: ParamMap,
    ) -> Result<()> {
        let mut doc = self.load_or_create(set_name)?;
        let order_agnostic = catalog::describe(rule).arity == ColumnArity::Any;
        let key = doc.canonical_key(columns, order_agnostic);
        let instance = RuleInstance::new(rule, parameters);
        if !doc.contains_instance(&key, &instance) {
            doc.push_rule(key, instance);
        }
        self.save(&doc)?;
        debug!(set_name, columns = %columns, rule = %rule, "added multi-column rule");
        Ok(())
    }

    /// Zipped removal: for each `(group, rule)` pair, drop every instance of
    /// that rule from the group's list, scanning in reverse index order so
    /// removals do not shift pending indices. Drained group keys are removed
    /// from the document.
    pub fn delete_rules(
        &self,
        set_name: &str,
        removals: &[(ColumnGroup, RuleId)],
    ) -> Result<()> {
        let mut doc = self.load(set_name)?;
        for (group, rule) in removals {
            let Some(key) = resolve_group_key(&doc, group) else {
                continue;
            };
            if let Some(instances) = doc.expectations.get_mut(&key) {
                for idx in (0..instances.len()).rev() {
                    if instances[idx].rule == *rule {
                        instances.remove(idx);
                    }
                }
                if instances.is_empty() {
                    doc.expectations.remove(&key);
                }
            }
        }
        self.save(&doc)?;
        debug!(set_name, removed = removals.len(), "deleted rules");
        Ok(())
    }

    /// Delete every rule-set document whose rule collection is empty.
    ///
    /// Called after a rule set is confirmed, to silently discard sets
    /// abandoned mid-definition. Returns the names of deleted sets.
    pub fn prune_empty_sets(&self) -> Result<Vec<String>> {
        let mut pruned = Vec::new();
        for set_name in self.list_names()? {
            if self.load(&set_name)?.is_empty() {
                self.delete_set(&set_name)?;
                pruned.push(set_name);
            }
        }
        if !pruned.is_empty() {
            debug!(count = pruned.len(), "pruned empty rule sets");
        }
        Ok(pruned)
    }

    /// Names of all stored rule sets, sorted.
    pub fn list_names(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.sets_dir).map_err(|source| StoreError::Io {
            path: self.sets_dir.clone(),
            source,
        })?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.sets_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(RULE_SET_EXTENSION)
                && let Some(stem) = path.file_stem().and_then(|stem| stem.to_str())
            {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove a rule-set document from disk.
    pub fn delete_set(&self, set_name: &str) -> Result<()> {
        let path = self.set_path(set_name);
        std::fs::remove_file(&path).map_err(|source| StoreError::Io { path, source })
    }

    fn load_or_create(&self, set_name: &str) -> Result<RuleSetDoc> {
        if !self.set_path(set_name).exists() {
            self.create_empty(set_name)?;
        }
        self.load(set_name)
    }

    /// Persist a document, refreshing its last-edited timestamp.
    fn save(&self, doc: &RuleSetDoc) -> Result<()> {
        let mut doc = doc.clone();
        doc.last_edited = timestamp();
        let path = self.set_path(&doc.name);
        let json =
            serde_json::to_string_pretty(&doc).map_err(|source| StoreError::Serialize {
                name: doc.name.clone(),
                source,
            })?;
        std::fs::write(&path, format!("{json}\n"))
            .map_err(|source| StoreError::Write { path, source })
    }
}

/// Exact group-key lookup with an order-insensitive fallback.
///
/// Interface names normally carry the stored key order, but a set-equal match
/// keeps deletion working if the orders ever diverge. No match means the
/// rules are already gone and the removal is a no-op.
fn resolve_group_key(doc: &RuleSetDoc, group: &ColumnGroup) -> Option<String> {
    let key = group.key();
    if doc.expectations.contains_key(&key) {
        return Some(key);
    }
    doc.expectations
        .keys()
        .find(|existing| ColumnGroup::from_key(existing).set_eq(group))
        .cloned()
}

fn timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
