mod inmemory;
mod postgres;

pub use inmemory::InMemoryPlantingHistoryRepo;
pub use postgres::PostgresPlantingHistoryRepo;
use tanam_domain::{PlantingHistory, ID};

#[async_trait::async_trait]
pub trait IPlantingHistoryRepo: Send + Sync {
    async fn insert(&self, planting: &PlantingHistory) -> anyhow::Result<()>;
    /// Plantings of the user that are not completed
    async fn find_active(&self, user_id: &ID) -> anyhow::Result<Vec<PlantingHistory>>;
    async fn find_by_user(
        &self,
        planting_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<PlantingHistory>>;
}

#[cfg(test)]
mod tests {
    use crate::TanamContext;
    use tanam_domain::{PlantingHistory, ID};

    #[tokio::test]
    async fn finds_active_plantings_of_user() {
        let ctx = TanamContext::create_inmemory();
        let user_id = ID::new();
        let tomato = PlantingHistory::new(user_id.clone(), "Tomat");
        let mut corn = PlantingHistory::new(user_id.clone(), "Jagung");
        corn.is_completed = true;
        let other_user = PlantingHistory::new(ID::new(), "Cabai");
        for p in [&tomato, &corn, &other_user] {
            ctx.repos
                .planting_histories
                .insert(p)
                .await
                .expect("To insert planting");
        }

        let active = ctx
            .repos
            .planting_histories
            .find_active(&user_id)
            .await
            .expect("To find plantings");
        assert_eq!(active, vec![tomato.clone()]);

        let repo = &ctx.repos.planting_histories;
        assert!(repo
            .find_by_user(&corn.id, &user_id)
            .await
            .expect("To find planting")
            .is_some());
        assert!(repo
            .find_by_user(&other_user.id, &user_id)
            .await
            .expect("To find planting")
            .is_none());
    }
}
