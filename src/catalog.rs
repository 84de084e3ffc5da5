use crate::model::{CreatureRecord, MoveRecord, TypeRecord, TypeRelations};
use crate::types::builtin_type_relations;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Endpoint {
    Creature,
    Move,
    Type,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Creature => "pokemon",
            Endpoint::Move => "move",
            Endpoint::Type => "type",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A failed catalog lookup. Callers are expected to treat every variant the same way.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    #[error("{endpoint} '{name}' not found")]
    NotFound { endpoint: Endpoint, name: String },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl LookupError {
    fn not_found(endpoint: Endpoint, name: &str) -> Self {
        LookupError::NotFound {
            endpoint,
            name: name.to_string(),
        }
    }
}

/// Source of creature, move and type records. Lookups are idempotent.
pub trait Catalog {
    fn lookup_creature(&self, name: &str) -> Result<CreatureRecord, LookupError>;
    fn lookup_move(&self, name: &str) -> Result<MoveRecord, LookupError>;
    fn lookup_type(&self, name: &str) -> Result<TypeRelations, LookupError>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn lookup_creature(&self, name: &str) -> Result<CreatureRecord, LookupError> {
        (**self).lookup_creature(name)
    }

    fn lookup_move(&self, name: &str) -> Result<MoveRecord, LookupError> {
        (**self).lookup_move(name)
    }

    fn lookup_type(&self, name: &str) -> Result<TypeRelations, LookupError> {
        (**self).lookup_type(name)
    }
}

impl<C: Catalog + ?Sized> Catalog for Box<C> {
    fn lookup_creature(&self, name: &str) -> Result<CreatureRecord, LookupError> {
        (**self).lookup_creature(name)
    }

    fn lookup_move(&self, name: &str) -> Result<MoveRecord, LookupError> {
        (**self).lookup_move(name)
    }

    fn lookup_type(&self, name: &str) -> Result<TypeRelations, LookupError> {
        (**self).lookup_type(name)
    }
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by `POKEAPI_BASE_URL` and `POKEAPI_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = read_env::<String>("POKEAPI_BASE_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = read_env::<u64>("POKEAPI_TIMEOUT_SECS") {
            config.timeout_secs = secs.max(1);
        }
        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// Blocking HTTP client for a PokeAPI-compatible catalog.
pub struct HttpCatalog {
    config: CatalogConfig,
    client: reqwest::blocking::Client,
}

impl HttpCatalog {
    pub fn new(config: CatalogConfig) -> Result<Self, LookupError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        Ok(Self { config, client })
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint, name: &str) -> Result<T, LookupError> {
        let url = format!("{}/{}/{}", self.config.base_url, endpoint.path(), name);
        debug!(%url, "catalog request");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            debug!(status = %response.status(), %url, "catalog miss");
            return Err(LookupError::not_found(endpoint, name));
        }
        response
            .json()
            .map_err(|e| LookupError::Malformed(e.to_string()))
    }
}

impl Catalog for HttpCatalog {
    fn lookup_creature(&self, name: &str) -> Result<CreatureRecord, LookupError> {
        let key = name.trim().to_lowercase();
        self.get_json(Endpoint::Creature, &key)
    }

    fn lookup_move(&self, name: &str) -> Result<MoveRecord, LookupError> {
        self.get_json(Endpoint::Move, name)
    }

    fn lookup_type(&self, name: &str) -> Result<TypeRelations, LookupError> {
        let record: TypeRecord = self.get_json(Endpoint::Type, name)?;
        Ok(TypeRelations::from_record(&record))
    }
}

#[derive(Clone)]
enum CachedRecord {
    Creature(CreatureRecord),
    Move(MoveRecord),
    Type(TypeRelations),
}

/// Memoizes successful lookups of an inner catalog, keyed by (endpoint, exact name).
/// Failures are not cached. Entries never expire.
pub struct CachedCatalog<C> {
    inner: C,
    entries: RefCell<HashMap<(Endpoint, String), CachedRecord>>,
}

impl<C: Catalog> CachedCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            entries: RefCell::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    fn memoize<T, F>(
        &self,
        endpoint: Endpoint,
        name: &str,
        fetch: F,
        wrap: fn(T) -> CachedRecord,
        unwrap: fn(&CachedRecord) -> Option<&T>,
    ) -> Result<T, LookupError>
    where
        T: Clone,
        F: FnOnce(&C) -> Result<T, LookupError>,
    {
        let key = (endpoint, name.to_string());
        if let Some(hit) = self.entries.borrow().get(&key).and_then(unwrap) {
            debug!(%endpoint, name, "catalog cache hit");
            return Ok(hit.clone());
        }
        let value = fetch(&self.inner)?;
        self.entries.borrow_mut().insert(key, wrap(value.clone()));
        Ok(value)
    }
}

impl<C: Catalog> Catalog for CachedCatalog<C> {
    fn lookup_creature(&self, name: &str) -> Result<CreatureRecord, LookupError> {
        self.memoize(
            Endpoint::Creature,
            name,
            |c| c.lookup_creature(name),
            CachedRecord::Creature,
            |r| match r {
                CachedRecord::Creature(v) => Some(v),
                _ => None,
            },
        )
    }

    fn lookup_move(&self, name: &str) -> Result<MoveRecord, LookupError> {
        self.memoize(
            Endpoint::Move,
            name,
            |c| c.lookup_move(name),
            CachedRecord::Move,
            |r| match r {
                CachedRecord::Move(v) => Some(v),
                _ => None,
            },
        )
    }

    fn lookup_type(&self, name: &str) -> Result<TypeRelations, LookupError> {
        self.memoize(
            Endpoint::Type,
            name,
            |c| c.lookup_type(name),
            CachedRecord::Type,
            |r| match r {
                CachedRecord::Type(v) => Some(v),
                _ => None,
            },
        )
    }
}

#[derive(Debug, Error)]
pub enum CatalogFileError {
    #[error("IO error reading '{path}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: serde_json::Error,
        path: PathBuf,
    },
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    creatures: Vec<CreatureRecord>,
    #[serde(default)]
    moves: Vec<MoveRecord>,
    #[serde(default)]
    types: Vec<TypeRecord>,
}

/// In-memory catalog. Types it does not hold fall back to the built-in chart
/// unless that fallback is disabled.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    creatures: HashMap<String, CreatureRecord>,
    moves: HashMap<String, MoveRecord>,
    types: HashMap<String, TypeRelations>,
    builtin_types: bool,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self {
            creatures: HashMap::new(),
            moves: HashMap::new(),
            types: HashMap::new(),
            builtin_types: true,
        }
    }

    pub fn without_builtin_types(mut self) -> Self {
        self.builtin_types = false;
        self
    }

    pub fn with_creature(mut self, record: CreatureRecord) -> Self {
        self.creatures.insert(record.name.clone(), record);
        self
    }

    pub fn with_move(mut self, record: MoveRecord) -> Self {
        self.moves.insert(record.name.clone(), record);
        self
    }

    pub fn with_type(mut self, name: &str, relations: TypeRelations) -> Self {
        self.types.insert(name.to_string(), relations);
        self
    }

    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        let file: CatalogFile = serde_json::from_str(raw)?;
        let mut catalog = Self::new();
        for record in file.creatures {
            catalog = catalog.with_creature(record);
        }
        for record in file.moves {
            catalog = catalog.with_move(record);
        }
        for record in &file.types {
            catalog = catalog.with_type(&record.name, TypeRelations::from_record(record));
        }
        Ok(catalog)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CatalogFileError> {
        let raw = std::fs::read_to_string(path).map_err(|error| CatalogFileError::Io {
            error,
            path: path.to_path_buf(),
        })?;
        Self::from_json_str(&raw).map_err(|error| CatalogFileError::Parse {
            error,
            path: path.to_path_buf(),
        })
    }
}

impl Catalog for StaticCatalog {
    fn lookup_creature(&self, name: &str) -> Result<CreatureRecord, LookupError> {
        let key = name.trim().to_lowercase();
        self.creatures
            .get(&key)
            .cloned()
            .ok_or_else(|| LookupError::not_found(Endpoint::Creature, &key))
    }

    fn lookup_move(&self, name: &str) -> Result<MoveRecord, LookupError> {
        self.moves
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::not_found(Endpoint::Move, name))
    }

    fn lookup_type(&self, name: &str) -> Result<TypeRelations, LookupError> {
        if let Some(relations) = self.types.get(name) {
            return Ok(relations.clone());
        }
        if self.builtin_types {
            if let Some(relations) = builtin_type_relations(name) {
                return Ok(relations);
            }
        }
        Err(LookupError::not_found(Endpoint::Type, name))
    }
}
