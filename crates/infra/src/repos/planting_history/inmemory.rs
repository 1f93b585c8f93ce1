use super::IPlantingHistoryRepo;
use crate::repos::shared::inmemory_repo::*;
use tanam_domain::{PlantingHistory, ID};

pub struct InMemoryPlantingHistoryRepo {
    plantings: std::sync::Mutex<Vec<PlantingHistory>>,
}

impl InMemoryPlantingHistoryRepo {
    pub fn new() -> Self {
        Self {
            plantings: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IPlantingHistoryRepo for InMemoryPlantingHistoryRepo {
    async fn insert(&self, planting: &PlantingHistory) -> anyhow::Result<()> {
        insert(planting, &self.plantings);
        Ok(())
    }

    async fn find_active(&self, user_id: &ID) -> anyhow::Result<Vec<PlantingHistory>> {
        Ok(find_by(&self.plantings, |p| {
            p.user_id == *user_id && !p.is_completed
        }))
    }

    async fn find_by_user(
        &self,
        planting_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<PlantingHistory>> {
        Ok(find(planting_id, &self.plantings).filter(|p| p.user_id == *user_id))
    }
}
