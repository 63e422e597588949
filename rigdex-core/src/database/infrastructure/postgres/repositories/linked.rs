use async_trait::async_trait;
use rigdex_model::{DictionaryEntry, LinkedEntry, LinkedKind, Page, PageRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::linked::LinkedRepository;
use crate::error::Result;

#[derive(Debug, sqlx::FromRow)]
struct LinkedRow {
    id: Uuid,
    name: String,
    parent_id: Uuid,
    parent_name: String,
}

impl From<LinkedRow> for LinkedEntry {
    fn from(row: LinkedRow) -> Self {
        LinkedEntry {
            id: row.id,
            name: row.name,
            parent: DictionaryEntry {
                id: row.parent_id,
                name: row.parent_name,
            },
        }
    }
}

/// PostgreSQL-backed storage for chipsets and designs.
#[derive(Clone, Debug)]
pub struct PostgresLinkedRepository {
    pool: PgPool,
}

impl PostgresLinkedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// `SELECT … FROM child JOIN parent` prefix shared by every read.
    fn select_joined(kind: LinkedKind) -> String {
        format!(
            r#"
            SELECT c.id, c.name, p.id AS parent_id, p.name AS parent_name
            FROM {child} c
            JOIN {parent} p ON p.id = c.{column}
            "#,
            child = kind.table(),
            parent = kind.parent().table(),
            column = kind.parent_column(),
        )
    }
}

#[async_trait]
impl LinkedRepository for PostgresLinkedRepository {
    async fn list(&self, kind: LinkedKind) -> Result<Vec<LinkedEntry>> {
        let sql = format!("{} ORDER BY c.seq", Self::select_joined(kind));
        let rows = sqlx::query_as::<_, LinkedRow>(&sql)
            .fetch_all(self.pool())
            .await?;

        Ok(rows.into_iter().map(LinkedEntry::from).collect())
    }

    async fn page(
        &self,
        kind: LinkedKind,
        request: PageRequest,
    ) -> Result<Page<LinkedEntry>> {
        let total = self.count(kind).await?;

        let direction = request.direction.as_sql();
        let sql = format!(
            "{} ORDER BY c.name {direction}, p.name {direction}, c.id {direction} LIMIT $1 OFFSET $2",
            Self::select_joined(kind)
        );
        let rows = sqlx::query_as::<_, LinkedRow>(&sql)
            .bind(request.limit() as i64)
            .bind(request.offset() as i64)
            .fetch_all(self.pool())
            .await?;

        Ok(Page::new(
            rows.into_iter().map(LinkedEntry::from).collect(),
            request,
            total,
        ))
    }

    async fn get(
        &self,
        kind: LinkedKind,
        id: Uuid,
    ) -> Result<Option<LinkedEntry>> {
        let sql = format!("{} WHERE c.id = $1", Self::select_joined(kind));
        let row = sqlx::query_as::<_, LinkedRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(LinkedEntry::from))
    }

    async fn find_by_name_and_parent(
        &self,
        kind: LinkedKind,
        name: &str,
        parent_id: Uuid,
    ) -> Result<Option<LinkedEntry>> {
        let sql = format!(
            "{} WHERE c.name = $1 AND p.id = $2",
            Self::select_joined(kind)
        );
        let row = sqlx::query_as::<_, LinkedRow>(&sql)
            .bind(name)
            .bind(parent_id)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(LinkedEntry::from))
    }

    async fn insert(&self, kind: LinkedKind, entry: &LinkedEntry) -> Result<()> {
        let sql = format!(
            "INSERT INTO {} (id, name, {}) VALUES ($1, $2, $3)",
            kind.table(),
            kind.parent_column()
        );
        sqlx::query(&sql)
            .bind(entry.id)
            .bind(&entry.name)
            .bind(entry.parent_id())
            .execute(self.pool())
            .await?;

        Ok(())
    }

    async fn update(
        &self,
        kind: LinkedKind,
        entry: &LinkedEntry,
    ) -> Result<bool> {
        let sql = format!(
            "UPDATE {} SET name = $2, {} = $3 WHERE id = $1",
            kind.table(),
            kind.parent_column()
        );
        let result = sqlx::query(&sql)
            .bind(entry.id)
            .bind(&entry.name)
            .bind(entry.parent_id())
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, kind: LinkedKind, id: Uuid) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&sql).bind(id).execute(self.pool()).await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, kind: LinkedKind) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
        let count: i64 =
            sqlx::query_scalar(&sql).fetch_one(self.pool()).await?;

        Ok(count.max(0) as u64)
    }
}
