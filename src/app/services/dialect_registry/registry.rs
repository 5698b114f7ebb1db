//! Named dialect storage
//!
//! The registry owns every dialect it holds. A [`DialectBuilder`] is a handle
//! onto one registry entry, so all builders for the same name see and modify
//! the same rules. Readers keep only the dialect name and take a validated
//! snapshot with [`DialectRegistry::resolve`] when parsing starts.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError, RwLock};
use tracing::{debug, info};

use super::dialect::{Dialect, LineTerminator};
use crate::constants::{DEFAULT_DIALECT, EXCEL_DIALECT, UNIX_DIALECT};
use crate::{Error, Result};

type Slot = Arc<Mutex<Dialect>>;

static GLOBAL_REGISTRY: LazyLock<DialectRegistry> = LazyLock::new(DialectRegistry::new);

/// Registry mapping dialect names to shared, mutable dialects
///
/// Cloning a registry yields another handle onto the same storage.
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    dialects: Arc<RwLock<HashMap<String, Slot>>>,
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectRegistry {
    /// Create a registry seeded with the built-in dialects
    pub fn new() -> Self {
        let registry = Self {
            dialects: Arc::new(RwLock::new(HashMap::new())),
        };
        registry.register(DEFAULT_DIALECT, Dialect::default());
        registry.register(EXCEL_DIALECT, Dialect::excel());
        registry.register(UNIX_DIALECT, Dialect::unix());
        registry
    }

    /// The process-wide registry, seeded on first access
    pub fn global() -> &'static DialectRegistry {
        &GLOBAL_REGISTRY
    }

    /// Builder bound to `name`, creating a default dialect if none exists
    pub fn configure(&self, name: &str) -> DialectBuilder {
        if let Some(slot) = self.slot(name) {
            return DialectBuilder::new(name, slot);
        }

        let mut dialects = self
            .dialects
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let slot = dialects
            .entry(name.to_string())
            .or_insert_with(|| {
                debug!("Registering new dialect '{}'", name);
                Arc::new(Mutex::new(Dialect::default()))
            })
            .clone();
        DialectBuilder::new(name, slot)
    }

    /// Insert or replace a dialect
    ///
    /// An existing entry is overwritten in place, so builders for `name` see
    /// the new rules.
    pub fn register(&self, name: impl Into<String>, dialect: Dialect) {
        let mut dialects = self
            .dialects
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        match dialects.entry(name.into()) {
            Entry::Occupied(entry) => {
                *lock(entry.get()) = dialect;
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Mutex::new(dialect)));
            }
        }
    }

    /// Snapshot of a dialect without validation
    pub fn get(&self, name: &str) -> Option<Dialect> {
        self.slot(name).map(|slot| lock(&slot).clone())
    }

    /// Validated snapshot of a dialect
    pub fn resolve(&self, name: &str) -> Result<Dialect> {
        let dialect = self.get(name).ok_or_else(|| Error::unknown_dialect(name))?;
        dialect.validate(name)?;
        debug!("Resolved dialect '{}': {:?}", name, dialect);
        Ok(dialect)
    }

    /// Check if a dialect is registered
    pub fn contains(&self, name: &str) -> bool {
        self.slot(name).is_some()
    }

    /// Registered dialect names in sorted order
    pub fn names(&self) -> Vec<String> {
        let dialects = self
            .dialects
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = dialects.keys().cloned().collect();
        names.sort();
        names
    }

    /// Register every dialect defined in a JSON file
    ///
    /// The file holds an object mapping names to dialect definitions; omitted
    /// fields take their default values. Nothing is registered unless every
    /// definition is valid. Returns the number of dialects loaded.
    pub fn load_json(&self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::source_not_found(path)
            } else {
                Error::io(format!("Failed to read {}", path.display()), e)
            }
        })?;

        let definitions: BTreeMap<String, Dialect> = serde_json::from_str(&content)
            .map_err(|e| Error::dialect_file(path, e.to_string()))?;

        for (name, dialect) in &definitions {
            dialect.validate(name)?;
        }

        let count = definitions.len();
        for (name, dialect) in definitions {
            self.register(name, dialect);
        }

        info!("Loaded {} dialects from {}", count, path.display());
        Ok(count)
    }

    fn slot(&self, name: &str) -> Option<Slot> {
        let dialects = self
            .dialects
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        dialects.get(name).cloned()
    }
}

fn lock(slot: &Slot) -> MutexGuard<'_, Dialect> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fluent handle for configuring one registered dialect
///
/// Every setter writes through to the registry immediately. `trim_characters`
/// and `ignore_columns` add to the existing sets rather than replacing them.
#[derive(Debug, Clone)]
pub struct DialectBuilder {
    name: String,
    slot: Slot,
}

impl DialectBuilder {
    fn new(name: &str, slot: Slot) -> Self {
        Self {
            name: name.to_string(),
            slot,
        }
    }

    /// Name this builder is bound to
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current rules for this dialect
    pub fn snapshot(&self) -> Dialect {
        lock(&self.slot).clone()
    }

    fn update(self, apply: impl FnOnce(&mut Dialect)) -> Self {
        {
            let mut dialect = lock(&self.slot);
            apply(&mut *dialect);
        }
        self
    }

    /// Set the field delimiter; may be several characters long
    pub fn delimiter(self, delimiter: impl Into<String>) -> Self {
        let delimiter = delimiter.into();
        self.update(|dialect| dialect.delimiter = delimiter)
    }

    pub fn quote_character(self, quote: char) -> Self {
        self.update(|dialect| dialect.quote_character = quote)
    }

    /// Add characters to the trim set
    pub fn trim_characters(self, characters: impl IntoIterator<Item = char>) -> Self {
        self.update(|dialect| dialect.trim_characters.extend(characters))
    }

    pub fn skip_initial_space(self, skip: bool) -> Self {
        self.update(|dialect| dialect.skip_initial_space = skip)
    }

    pub fn header(self, header: bool) -> Self {
        self.update(|dialect| dialect.header = header)
    }

    /// Add column names to the ignored set
    pub fn ignore_columns<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update(|dialect| {
            dialect
                .ignored_columns
                .extend(columns.into_iter().map(Into::into))
        })
    }

    pub fn line_terminator(self, terminator: LineTerminator) -> Self {
        self.update(|dialect| dialect.line_terminator = terminator)
    }
}
