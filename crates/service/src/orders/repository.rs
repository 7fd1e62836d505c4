use async_trait::async_trait;
use models::order::{NewOrder, OrderStatus, PaymentStatus};
use uuid::Uuid;

use super::domain::Order;
use crate::errors::ServiceError;

/// Order store.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, input: NewOrder) -> Result<Order, ServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, ServiceError>;
    /// Newest first.
    async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Order>, ServiceError>;
    /// Newest first.
    async fn list_all(&self) -> Result<Vec<Order>, ServiceError>;
    async fn update_status(&self, id: Uuid, status: OrderStatus, payment_status: Option<PaymentStatus>) -> Result<Option<Order>, ServiceError>;
}

pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockOrderRepository {
        orders: Mutex<Vec<Order>>,
    }

    impl MockOrderRepository {
        fn guard(&self) -> Result<MutexGuard<'_, Vec<Order>>, ServiceError> {
            self.orders.lock().map_err(|_| ServiceError::Repository("mock lock poisoned".into()))
        }

        /// Number of stored orders.
        pub fn len(&self) -> usize {
            self.orders.lock().map(|o| o.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool { self.len() == 0 }
    }

    #[async_trait]
    impl OrderRepository for MockOrderRepository {
        async fn create(&self, input: NewOrder) -> Result<Order, ServiceError> {
            let now = chrono::Utc::now();
            let order = Order {
                id: Uuid::new_v4(),
                account_id: input.account_id,
                total_amount: input.items.total(),
                items: input.items.0,
                payment_method: input.payment_method,
                payment_status: PaymentStatus::Pending,
                status: OrderStatus::Pending,
                created_at: now,
                updated_at: now,
            };
            self.guard()?.push(order.clone());
            Ok(order)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, ServiceError> {
            Ok(self.guard()?.iter().find(|o| o.id == id).cloned())
        }

        async fn list_by_account(&self, account_id: Uuid) -> Result<Vec<Order>, ServiceError> {
            Ok(self.guard()?.iter().rev().filter(|o| o.account_id == account_id).cloned().collect())
        }

        async fn list_all(&self) -> Result<Vec<Order>, ServiceError> {
            Ok(self.guard()?.iter().rev().cloned().collect())
        }

        async fn update_status(&self, id: Uuid, status: OrderStatus, payment_status: Option<PaymentStatus>) -> Result<Option<Order>, ServiceError> {
            let mut orders = self.guard()?;
            let Some(order) = orders.iter_mut().find(|o| o.id == id) else { return Ok(None); };
            order.status = status;
            if let Some(ps) = payment_status { order.payment_status = ps; }
            order.updated_at = chrono::Utc::now();
            Ok(Some(order.clone()))
        }
    }
}
