use async_trait::async_trait;
use rigdex_model::{DictionaryEntry, DictionaryKind, Page, PageRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::dictionary::DictionaryRepository;
use crate::error::Result;

/// PostgreSQL-backed storage for all dictionary tables.
///
/// Table names come from [`DictionaryKind::table`] and are interpolated into
/// the statements; values are always bound.
#[derive(Clone, Debug)]
pub struct PostgresDictionaryRepository {
    pool: PgPool,
}

impl PostgresDictionaryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DictionaryRepository for PostgresDictionaryRepository {
    async fn list(&self, kind: DictionaryKind) -> Result<Vec<DictionaryEntry>> {
        let sql = format!("SELECT id, name FROM {} ORDER BY seq", kind.table());
        let rows = sqlx::query_as::<_, DictionaryEntry>(&sql)
            .fetch_all(self.pool())
            .await?;

        Ok(rows)
    }

    async fn page(
        &self,
        kind: DictionaryKind,
        request: PageRequest,
    ) -> Result<Page<DictionaryEntry>> {
        let total = self.count(kind).await?;

        let direction = request.direction.as_sql();
        let sql = format!(
            r#"
            SELECT id, name
            FROM {}
            ORDER BY name {direction}, id {direction}
            LIMIT $1 OFFSET $2
            "#,
            kind.table()
        );
        let rows = sqlx::query_as::<_, DictionaryEntry>(&sql)
            .bind(request.limit() as i64)
            .bind(request.offset() as i64)
            .fetch_all(self.pool())
            .await?;

        Ok(Page::new(rows, request, total))
    }

    async fn get(
        &self,
        kind: DictionaryKind,
        id: Uuid,
    ) -> Result<Option<DictionaryEntry>> {
        let sql = format!("SELECT id, name FROM {} WHERE id = $1", kind.table());
        let row = sqlx::query_as::<_, DictionaryEntry>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(row)
    }

    async fn find_by_name(
        &self,
        kind: DictionaryKind,
        name: &str,
    ) -> Result<Option<DictionaryEntry>> {
        let sql =
            format!("SELECT id, name FROM {} WHERE name = $1", kind.table());
        let row = sqlx::query_as::<_, DictionaryEntry>(&sql)
            .bind(name)
            .fetch_optional(self.pool())
            .await?;

        Ok(row)
    }

    async fn insert(
        &self,
        kind: DictionaryKind,
        entry: &DictionaryEntry,
    ) -> Result<()> {
        let sql =
            format!("INSERT INTO {} (id, name) VALUES ($1, $2)", kind.table());
        sqlx::query(&sql)
            .bind(entry.id)
            .bind(&entry.name)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn update(
        &self,
        kind: DictionaryKind,
        entry: &DictionaryEntry,
    ) -> Result<bool> {
        let sql = format!("UPDATE {} SET name = $2 WHERE id = $1", kind.table());
        let result = sqlx::query(&sql)
            .bind(entry.id)
            .bind(&entry.name)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, kind: DictionaryKind, id: Uuid) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&sql).bind(id).execute(self.pool()).await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, kind: DictionaryKind) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
        let count: i64 =
            sqlx::query_scalar(&sql).fetch_one(self.pool()).await?;

        Ok(count.max(0) as u64)
    }
}
