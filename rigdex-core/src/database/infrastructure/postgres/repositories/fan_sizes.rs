use async_trait::async_trait;
use rigdex_model::{FanSize, Page, PageRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::ports::fan_sizes::FanSizeRepository;
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct PostgresFanSizeRepository {
    pool: PgPool,
}

impl PostgresFanSizeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl FanSizeRepository for PostgresFanSizeRepository {
    async fn list(&self) -> Result<Vec<FanSize>> {
        let rows = sqlx::query_as::<_, FanSize>(
            "SELECT id, length, width, height FROM fan_sizes ORDER BY seq",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }

    async fn page(&self, request: PageRequest) -> Result<Page<FanSize>> {
        let total = self.count().await?;

        let direction = request.direction.as_sql();
        let sql = format!(
            r#"
            SELECT id, length, width, height
            FROM fan_sizes
            ORDER BY length {direction}, width {direction}, height {direction}, id {direction}
            LIMIT $1 OFFSET $2
            "#
        );
        let rows = sqlx::query_as::<_, FanSize>(&sql)
            .bind(request.limit() as i64)
            .bind(request.offset() as i64)
            .fetch_all(self.pool())
            .await?;

        Ok(Page::new(rows, request, total))
    }

    async fn get(&self, id: Uuid) -> Result<Option<FanSize>> {
        let row = sqlx::query_as::<_, FanSize>(
            "SELECT id, length, width, height FROM fan_sizes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }

    async fn find_by_dimensions(
        &self,
        length: i32,
        width: i32,
        height: i32,
    ) -> Result<Option<FanSize>> {
        let row = sqlx::query_as::<_, FanSize>(
            r#"
            SELECT id, length, width, height
            FROM fan_sizes
            WHERE length = $1 AND width = $2 AND height = $3
            "#,
        )
        .bind(length)
        .bind(width)
        .bind(height)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }

    async fn insert(&self, fan_size: &FanSize) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO fan_sizes (id, length, width, height)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(fan_size.id)
        .bind(fan_size.length)
        .bind(fan_size.width)
        .bind(fan_size.height)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    async fn update(&self, fan_size: &FanSize) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE fan_sizes
            SET length = $2, width = $3, height = $4
            WHERE id = $1
            "#,
        )
        .bind(fan_size.id)
        .bind(fan_size.length)
        .bind(fan_size.width)
        .bind(fan_size.height)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM fan_sizes WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM fan_sizes")
            .fetch_one(self.pool())
            .await?;

        Ok(count.max(0) as u64)
    }
}
