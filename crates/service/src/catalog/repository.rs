use async_trait::async_trait;
use models::dish::{DishFilter, DishPatch, NewDish};
use uuid::Uuid;

use super::domain::Dish;
use crate::errors::ServiceError;

/// Catalog store.
#[async_trait]
pub trait DishRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, filter: DishFilter) -> Result<Vec<Dish>, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Dish>, ServiceError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Dish>, ServiceError>;
    async fn create(&self, input: NewDish) -> Result<Dish, ServiceError>;
    async fn update(&self, id: Uuid, patch: DishPatch) -> Result<Option<Dish>, ServiceError>;
}

pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockDishRepository {
        dishes: Mutex<Vec<Dish>>,
    }

    impl MockDishRepository {
        fn guard(&self) -> Result<MutexGuard<'_, Vec<Dish>>, ServiceError> {
            self.dishes.lock().map_err(|_| ServiceError::Repository("mock lock poisoned".into()))
        }
    }

    #[async_trait]
    impl DishRepository for MockDishRepository {
        async fn list(&self, filter: DishFilter) -> Result<Vec<Dish>, ServiceError> {
            let mut out: Vec<Dish> = self
                .guard()?
                .iter()
                .filter(|d| !filter.available_only || d.available)
                .filter(|d| filter.dish_type.map_or(true, |t| d.dish_type == t))
                .filter(|d| filter.category.as_ref().map_or(true, |c| &d.category == c))
                .cloned()
                .collect();
            // 插入顺序即创建顺序，倒序即最新在前
            out.reverse();
            Ok(out)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Dish>, ServiceError> {
            Ok(self.guard()?.iter().find(|d| d.id == id).cloned())
        }

        async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Dish>, ServiceError> {
            Ok(self.guard()?.iter().filter(|d| ids.contains(&d.id)).cloned().collect())
        }

        async fn create(&self, input: NewDish) -> Result<Dish, ServiceError> {
            models::dish::validate_new(&input)?;
            let dish = Dish {
                id: Uuid::new_v4(),
                name: input.name,
                dish_type: input.dish_type,
                category: input.category,
                price: input.price,
                description: input.description,
                image: input.image,
                available: input.available,
                created_at: chrono::Utc::now(),
            };
            self.guard()?.push(dish.clone());
            Ok(dish)
        }

        async fn update(&self, id: Uuid, patch: DishPatch) -> Result<Option<Dish>, ServiceError> {
            if let Some(p) = patch.price { models::dish::validate_price(p)?; }
            let mut dishes = self.guard()?;
            let Some(dish) = dishes.iter_mut().find(|d| d.id == id) else { return Ok(None); };
            if let Some(p) = patch.price { dish.price = p; }
            if let Some(a) = patch.available { dish.available = a; }
            Ok(Some(dish.clone()))
        }
    }
}
