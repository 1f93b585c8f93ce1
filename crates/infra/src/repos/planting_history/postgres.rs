use super::IPlantingHistoryRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tanam_domain::{PlantingHistory, ID};

pub struct PostgresPlantingHistoryRepo {
    pool: PgPool,
}

impl PostgresPlantingHistoryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PlantingHistoryRaw {
    planting_history_uid: Uuid,
    user_uid: Uuid,
    crop_name: String,
    is_completed: bool,
}

impl From<PlantingHistoryRaw> for PlantingHistory {
    fn from(raw: PlantingHistoryRaw) -> Self {
        Self {
            id: raw.planting_history_uid.into(),
            user_id: raw.user_uid.into(),
            crop_name: raw.crop_name,
            is_completed: raw.is_completed,
        }
    }
}

#[async_trait::async_trait]
impl IPlantingHistoryRepo for PostgresPlantingHistoryRepo {
    async fn insert(&self, planting: &PlantingHistory) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO planting_histories
            (planting_history_uid, user_uid, crop_name, is_completed)
            VALUES($1, $2, $3, $4)
            "#,
        )
        .bind(planting.id.inner_ref())
        .bind(planting.user_id.inner_ref())
        .bind(&planting.crop_name)
        .bind(planting.is_completed)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_active(&self, user_id: &ID) -> anyhow::Result<Vec<PlantingHistory>> {
        let raws = sqlx::query_as::<_, PlantingHistoryRaw>(
            r#"
            SELECT * FROM planting_histories AS p
            WHERE p.user_uid = $1 AND
            p.is_completed = FALSE
            "#,
        )
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;
        Ok(raws.into_iter().map(|p| p.into()).collect())
    }

    async fn find_by_user(
        &self,
        planting_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<PlantingHistory>> {
        let raw = sqlx::query_as::<_, PlantingHistoryRaw>(
            r#"
            SELECT * FROM planting_histories AS p
            WHERE p.planting_history_uid = $1 AND
            p.user_uid = $2
            "#,
        )
        .bind(planting_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;
        Ok(raw.map(|p| p.into()))
    }
}
