use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::ship;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::{debug, warn};

use crate::errors::{db_err, ServiceError};
use crate::pagination::PageRequest;
use crate::ship::domain::ShipRecord;
use crate::ship::repository::ShipRepository;
use crate::ship::specification::{ShipFilter, ShipOrder};

/// On-disk layout: the id sequence plus every ship.
#[derive(Default, Serialize, Deserialize)]
struct ShipFile {
    next_id: i64,
    ships: Vec<ship::Model>,
}

struct ShipTable {
    next_id: i64,
    ships: BTreeMap<i64, ship::Model>,
}

impl From<ShipFile> for ShipTable {
    fn from(file: ShipFile) -> Self {
        let ships: BTreeMap<i64, ship::Model> = file.ships.into_iter().map(|s| (s.id, s)).collect();
        // never hand out an id that is already taken
        let floor = ships.keys().next_back().map_or(1, |max| max + 1);
        Self { next_id: file.next_id.max(floor), ships }
    }
}

/// JSON file-backed ship repository.
///
/// Keeps every ship in memory and rewrites the whole file after each
/// mutation. Suited to local runs and tests; Postgres is the production store.
pub struct FileShipRepository {
    inner: RwLock<ShipTable>,
    file_path: Option<PathBuf>,
}

impl FileShipRepository {
    /// Load from `path`, creating an empty file if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        common::env::ensure_parent_dir(&file_path).await.map_err(db_err)?;

        let file: ShipFile = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Db(format!("corrupt ship file {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %file_path.display(), "ship file missing; starting empty");
                ShipFile::default()
            }
            Err(e) => return Err(db_err(e)),
        };

        let repo = Self { inner: RwLock::new(file.into()), file_path: Some(file_path) };
        {
            let table = repo.inner.read().await;
            repo.persist(&table).await?;
        }
        Ok(Arc::new(repo))
    }

    /// A store that never touches disk.
    pub fn ephemeral() -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(ShipFile::default().into()), file_path: None })
    }

    async fn persist(&self, table: &ShipTable) -> Result<(), ServiceError> {
        let Some(path) = &self.file_path else { return Ok(()) };
        let file = ShipFile { next_id: table.next_id, ships: table.ships.values().cloned().collect() };
        let data = serde_json::to_vec_pretty(&file).map_err(db_err)?;
        fs::write(path, data).await.map_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to write ship file");
            db_err(e)
        })
    }
}

#[async_trait]
impl ShipRepository for FileShipRepository {
    async fn find_all(&self, filter: &ShipFilter, order: ShipOrder, page: PageRequest) -> Result<Vec<ship::Model>, ServiceError> {
        let table = self.inner.read().await;
        let mut hits: Vec<&ship::Model> = table.ships.values().filter(|s| filter.matches(s)).collect();
        hits.sort_by(|a, b| order.compare(a, b));
        let skip = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(page.page_size).unwrap_or(usize::MAX);
        Ok(hits.into_iter().skip(skip).take(take).cloned().collect())
    }

    async fn count(&self, filter: &ShipFilter) -> Result<u64, ServiceError> {
        let table = self.inner.read().await;
        Ok(table.ships.values().filter(|s| filter.matches(s)).count() as u64)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ship::Model>, ServiceError> {
        Ok(self.inner.read().await.ships.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.inner.read().await.ships.contains_key(&id))
    }

    async fn save(&self, record: ShipRecord) -> Result<ship::Model, ServiceError> {
        let mut table = self.inner.write().await;
        let id = match record.id {
            Some(id) => id,
            None => {
                let id = table.next_id;
                table.next_id += 1;
                id
            }
        };
        let model = record.into_model(id);
        table.ships.insert(id, model.clone());
        self.persist(&table).await?;
        Ok(model)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        let mut table = self.inner.write().await;
        if table.ships.remove(&id).is_some() {
            self.persist(&table).await?;
        }
        Ok(())
    }
}
