use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use models::order::{self, NewOrder, OrderStatus, PaymentStatus};

use crate::errors::ServiceError;
use crate::orders::domain::Order;
use crate::orders::repository::OrderRepository;

pub struct SeaOrmOrderRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_domain(m: order::Model) -> Order {
    Order {
        id: m.id,
        account_id: m.account_id,
        items: m.items.0,
        total_amount: m.total_amount,
        payment_method: m.payment_method,
        payment_status: m.payment_status,
        status: m.status,
        created_at: m.created_at.into(),
        updated_at: m.updated_at.into(),
    }
}

#[async_trait]
impl OrderRepository for SeaOrmOrderRepository {
    async fn create(&self, input: NewOrder) -> Result<Order, ServiceError> {
        Ok(to_domain(order::create(&self.db, input).await?))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, ServiceError> {
        Ok(order::find_by_id(&self.db, id).await?.map(to_domain))
    }

    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Order>, ServiceError> {
        Ok(order::list_by_account(&self.db, account_id).await?.into_iter().map(to_domain).collect())
    }

    async fn list_all(&self) -> Result<Vec<Order>, ServiceError> {
        Ok(order::list_all(&self.db).await?.into_iter().map(to_domain).collect())
    }

    async fn update_status(&self, id: Uuid, status: OrderStatus, payment_status: Option<PaymentStatus>) -> Result<Option<Order>, ServiceError> {
        Ok(order::update_status(&self.db, id, status, payment_status).await?.map(to_domain))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use models::account::{NewAccount, Role};
    use models::dish::DishType;
    use models::order::PaymentMethod;
    use rust_decimal::Decimal;

    use super::*;
    use crate::auth::repo::seaorm::SeaOrmAccountRepository;
    use crate::auth::repository::AccountRepository;
    use crate::catalog::domain::{DishUpdateInput, NewDishInput};
    use crate::catalog::repo::seaorm::SeaOrmDishRepository;
    use crate::catalog::CatalogService;
    use crate::orders::domain::{CreateOrderInput, OrderItemRequest, StatusUpdateInput};
    use crate::orders::OrderService;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn order_snapshot_survives_price_change_in_postgres() -> anyhow::Result<()> {
        let Some(db) = get_db().await? else { return Ok(()); };
        let accounts = Arc::new(SeaOrmAccountRepository::new(db.clone()));
        let dishes = Arc::new(SeaOrmDishRepository::new(db.clone()));
        let catalog = CatalogService::new(dishes.clone());
        let svc = OrderService::new(Arc::new(SeaOrmOrderRepository::new(db.clone())), dishes, accounts.clone());

        let owner = accounts
            .create(NewAccount {
                email: format!("order_{}@example.com", Uuid::new_v4()),
                password_hash: None,
                display_name: "Order Tester".into(),
                role: Role::Customer,
                phone_number: None,
                photo_url: None,
                federated_id: None,
            })
            .await?;
        let dish = catalog
            .add_dish(NewDishInput {
                name: "Snapshot Thali".into(),
                dish_type: DishType::Veg,
                category: "Thalis".into(),
                price: Decimal::from(249),
                description: "d".into(),
                image: "https://img.example/t.jpg".into(),
                available: None,
            })
            .await?;

        let input = CreateOrderInput {
            items: vec![OrderItemRequest { dish_id: dish.id.to_string(), quantity: 2 }],
            payment_method: Some(PaymentMethod::Online),
        };
        let placed = svc.create_order(owner.id, input).await?;
        assert_eq!(placed.total_amount, Decimal::from(498));

        catalog.update_dish(dish.id, DishUpdateInput { price: Some(Decimal::from(300)), available: None }).await?;
        let read = svc.get_order(owner.id, placed.id).await?;
        assert_eq!(read.items[0].price, Decimal::from(249));
        assert_eq!(read.total_amount, Decimal::from(498));

        let updated = svc
            .update_status(placed.id, StatusUpdateInput { status: "Preparing".into(), payment_status: Some("Paid".into()) })
            .await?;
        assert_eq!(updated.status, OrderStatus::Preparing);
        assert_eq!(updated.payment_status, PaymentStatus::Paid);
        Ok(())
    }
}
