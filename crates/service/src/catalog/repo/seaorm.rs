use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::dish::{self, DishFilter, DishPatch, NewDish};

use crate::catalog::domain::Dish;
use crate::catalog::repository::DishRepository;
use crate::errors::ServiceError;

pub struct SeaOrmDishRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmDishRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_domain(m: dish::Model) -> Dish {
    Dish {
        id: m.id,
        name: m.name,
        dish_type: m.dish_type,
        category: m.category,
        price: m.price,
        description: m.description,
        image: m.image,
        available: m.available,
        created_at: m.created_at.into(),
    }
}

#[async_trait]
impl DishRepository for SeaOrmDishRepository {
    async fn list(&self, filter: DishFilter) -> Result<Vec<Dish>, ServiceError> {
        Ok(dish::list(&self.db, &filter).await?.into_iter().map(to_domain).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Dish>, ServiceError> {
        Ok(dish::find_by_id(&self.db, id).await?.map(to_domain))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Dish>, ServiceError> {
        Ok(dish::find_by_ids(&self.db, ids.to_vec()).await?.into_iter().map(to_domain).collect())
    }

    async fn create(&self, input: NewDish) -> Result<Dish, ServiceError> {
        Ok(to_domain(dish::create(&self.db, input).await?))
    }

    async fn update(&self, id: Uuid, patch: DishPatch) -> Result<Option<Dish>, ServiceError> {
        Ok(dish::update(&self.db, id, patch).await?.map(to_domain))
    }
}
