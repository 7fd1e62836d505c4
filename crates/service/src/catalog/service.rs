use std::sync::Arc;

use models::dish::{DishFilter, DishPatch, NewDish};
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{Dish, DishUpdateInput, MenuQuery, NewDishInput};
use super::repository::DishRepository;
use crate::errors::ServiceError;

pub struct CatalogService {
    repo: Arc<dyn DishRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn DishRepository>) -> Self { Self { repo } }

    /// Public menu: available dishes only, newest first.
    pub async fn list_menu(&self, query: MenuQuery) -> Result<Vec<Dish>, ServiceError> {
        let filter = DishFilter {
            dish_type: query.dish_type,
            category: query.category.filter(|c| !c.trim().is_empty()),
            available_only: true,
        };
        self.repo.list(filter).await
    }

    /// Any dish by id, available or not.
    pub async fn get(&self, id: Uuid) -> Result<Dish, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("Dish"))
    }

    /// # Examples
    /// ```
    /// use service::catalog::{CatalogService, repository::mock::MockDishRepository, domain::NewDishInput};
    /// use models::dish::DishType;
    /// use rust_decimal::Decimal;
    /// use std::sync::Arc;
    /// let svc = CatalogService::new(Arc::new(MockDishRepository::default()));
    /// let dish = tokio_test::block_on(svc.add_dish(NewDishInput {
    ///     name: "Butter Naan".into(), dish_type: DishType::Veg, category: "Breads".into(),
    ///     price: Decimal::from(35), description: "Soft naan".into(),
    ///     image: "https://img.example/naan.jpg".into(), available: None,
    /// })).unwrap();
    /// assert!(dish.available);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_dish(&self, input: NewDishInput) -> Result<Dish, ServiceError> {
        let dish = self
            .repo
            .create(NewDish {
                name: input.name.trim().to_string(),
                dish_type: input.dish_type,
                price: input.price,
                description: input.description,
                image: input.image.trim().to_string(),
                category: input.category.trim().to_string(),
                available: input.available.unwrap_or(true),
            })
            .await?;
        info!(dish_id = %dish.id, "dish_added");
        Ok(dish)
    }

    #[instrument(skip(self, input))]
    pub async fn update_dish(&self, id: Uuid, input: DishUpdateInput) -> Result<Dish, ServiceError> {
        if input.price.is_none() && input.available.is_none() {
            return Err(ServiceError::Validation("nothing to update".into()));
        }
        let patch = DishPatch { price: input.price, available: input.available };
        let dish = self.repo.update(id, patch).await?.ok_or_else(|| ServiceError::not_found("Dish"))?;
        info!(dish_id = %dish.id, price = %dish.price, available = dish.available, "dish_updated");
        Ok(dish)
    }
}
