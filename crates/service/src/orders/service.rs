use std::collections::HashMap;
use std::sync::Arc;

use models::order::{LineItem, LineItems, NewOrder, OrderStatus, PaymentStatus};
use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::domain::{CreateOrderInput, CustomerSummary, DishSummary, Order, OrderLine, OrderView, StatusUpdateInput};
use super::repository::OrderRepository;
use crate::auth::repository::AccountRepository;
use crate::catalog::domain::Dish;
use crate::catalog::repository::DishRepository;
use crate::errors::ServiceError;

/// Order service: prices requests against the catalog, persists snapshots and
/// enforces ownership on reads.
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    dishes: Arc<dyn DishRepository>,
    accounts: Arc<dyn AccountRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, dishes: Arc<dyn DishRepository>, accounts: Arc<dyn AccountRepository>) -> Self {
        Self { orders, dishes, accounts }
    }

    /// Validate every line, snapshot catalog prices and persist in one write.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::orders::{OrderService, domain::{CreateOrderInput, OrderItemRequest}};
    /// use service::orders::repository::mock::MockOrderRepository;
    /// use service::catalog::{CatalogService, domain::NewDishInput, repository::mock::MockDishRepository};
    /// use service::auth::repository::mock::MockAccountRepository;
    /// use models::{dish::DishType, order::PaymentMethod};
    /// use rust_decimal::Decimal;
    ///
    /// let dishes = Arc::new(MockDishRepository::default());
    /// let catalog = CatalogService::new(dishes.clone());
    /// let thali = tokio_test::block_on(catalog.add_dish(NewDishInput {
    ///     name: "Maharaja Thali".into(), dish_type: DishType::Veg, category: "Thalis".into(),
    ///     price: Decimal::from(249), description: "Full meal".into(),
    ///     image: "https://img.example/thali.jpg".into(), available: None,
    /// })).unwrap();
    /// let svc = OrderService::new(Arc::new(MockOrderRepository::default()), dishes, Arc::new(MockAccountRepository::default()));
    /// let input = CreateOrderInput {
    ///     items: vec![OrderItemRequest { dish_id: thali.id.to_string(), quantity: 2 }],
    ///     payment_method: Some(PaymentMethod::Cod),
    /// };
    /// let order = tokio_test::block_on(svc.create_order(uuid::Uuid::new_v4(), input)).unwrap();
    /// assert_eq!(order.total_amount, Decimal::from(498));
    /// ```
    #[instrument(skip(self, input), fields(account_id = %account_id, lines = input.items.len()))]
    pub async fn create_order(&self, account_id: Uuid, input: CreateOrderInput) -> Result<OrderView, ServiceError> {
        if input.items.is_empty() {
            return Err(ServiceError::EmptyOrder);
        }
        let payment_method = input
            .payment_method
            .ok_or_else(|| ServiceError::Validation("paymentMethod required".into()))?;

        let mut requested = Vec::with_capacity(input.items.len());
        for item in &input.items {
            let raw = item.dish_id.trim();
            if raw.is_empty() {
                return Err(ServiceError::Validation("dishId required".into()));
            }
            let dish_id = Uuid::parse_str(raw).map_err(|_| ServiceError::Validation(format!("invalid dishId: {}", raw)))?;
            models::order::validate_quantity(item.quantity)?;
            requested.push((dish_id, item.quantity));
        }

        let ids: Vec<Uuid> = requested.iter().map(|(id, _)| *id).collect();
        let catalog = self.dish_index(&ids).await?;

        let mut lines = Vec::with_capacity(requested.len());
        for (dish_id, quantity) in requested {
            let dish = catalog.get(&dish_id).ok_or(ServiceError::DishNotFound(dish_id))?;
            if !dish.available {
                return Err(ServiceError::DishUnavailable(dish.name.clone()));
            }
            lines.push(LineItem { dish_id, quantity, price: dish.price });
        }
        let items = LineItems(lines);
        models::order::validate_items(&items)?;

        let order = self
            .orders
            .create(NewOrder { account_id, items, payment_method })
            .await?;
        info!(order_id = %order.id, total = %order.total_amount, "order_created");
        Ok(view(order, &catalog, None))
    }

    /// The caller's orders, newest first.
    #[instrument(skip(self))]
    pub async fn my_orders(&self, account_id: Uuid) -> Result<Vec<OrderView>, ServiceError> {
        let orders = self.orders.list_by_account(account_id).await?;
        self.resolve(orders, false).await
    }

    /// One order, visible only to its owner.
    #[instrument(skip(self))]
    pub async fn get_order(&self, account_id: Uuid, order_id: Uuid) -> Result<OrderView, ServiceError> {
        let order = self.orders.find_by_id(order_id).await?.ok_or_else(|| ServiceError::not_found("Order"))?;
        if order.account_id != account_id {
            warn!(owner = %order.account_id, "order read by non-owner");
            return Err(ServiceError::Forbidden("Not authorized to view this order".into()));
        }
        let mut views = self.resolve(vec![order], false).await?;
        views.pop().ok_or_else(|| ServiceError::not_found("Order"))
    }

    /// Every order with its customer, newest first.
    pub async fn list_all(&self) -> Result<Vec<OrderView>, ServiceError> {
        let orders = self.orders.list_all().await?;
        self.resolve(orders, true).await
    }

    /// Overwrite fulfillment and optionally payment status. Any known value is
    /// accepted from any state.
    #[instrument(skip(self, input), fields(status = %input.status))]
    pub async fn update_status(&self, order_id: Uuid, input: StatusUpdateInput) -> Result<OrderView, ServiceError> {
        let status: OrderStatus = parse_enum("status", &input.status)?;
        let payment_status = input
            .payment_status
            .as_deref()
            .map(|raw| parse_enum::<PaymentStatus>("paymentStatus", raw))
            .transpose()?;

        let order = self
            .orders
            .update_status(order_id, status, payment_status)
            .await?
            .ok_or_else(|| ServiceError::not_found("Order"))?;
        info!(order_id = %order.id, status = ?order.status, payment_status = ?order.payment_status, "order_status_updated");
        let mut views = self.resolve(vec![order], false).await?;
        views.pop().ok_or_else(|| ServiceError::not_found("Order"))
    }

    async fn dish_index(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Dish>, ServiceError> {
        let mut unique = ids.to_vec();
        unique.sort();
        unique.dedup();
        Ok(self.dishes.find_by_ids(&unique).await?.into_iter().map(|d| (d.id, d)).collect())
    }

    async fn resolve(&self, orders: Vec<Order>, with_customer: bool) -> Result<Vec<OrderView>, ServiceError> {
        let dish_ids: Vec<Uuid> = orders.iter().flat_map(|o| o.items.iter().map(|i| i.dish_id)).collect();
        let catalog = self.dish_index(&dish_ids).await?;

        let customers: HashMap<Uuid, CustomerSummary> = if with_customer {
            let mut ids: Vec<Uuid> = orders.iter().map(|o| o.account_id).collect();
            ids.sort();
            ids.dedup();
            self.accounts
                .find_by_ids(&ids)
                .await?
                .into_iter()
                .map(|a| {
                    (a.id, CustomerSummary { id: a.id, display_name: a.display_name, email: a.email, phone_number: a.phone_number })
                })
                .collect()
        } else {
            HashMap::new()
        };

        Ok(orders
            .into_iter()
            .map(|o| {
                let customer = customers.get(&o.account_id).cloned();
                view(o, &catalog, customer)
            })
            .collect())
    }
}

fn view(order: Order, catalog: &HashMap<Uuid, Dish>, customer: Option<CustomerSummary>) -> OrderView {
    let items = order
        .items
        .into_iter()
        .map(|li| OrderLine {
            dish_id: li.dish_id,
            dish: catalog
                .get(&li.dish_id)
                .map(|d| DishSummary { id: d.id, name: d.name.clone(), image: d.image.clone() }),
            quantity: li.quantity,
            price: li.price,
        })
        .collect();
    OrderView {
        id: order.id,
        user: order.account_id,
        customer,
        items,
        total_amount: order.total_amount,
        payment_method: order.payment_method,
        payment_status: order.payment_status,
        status: order.status,
        created_at: order.created_at,
        updated_at: order.updated_at,
    }
}

fn parse_enum<T: DeserializeOwned>(field: &str, raw: &str) -> Result<T, ServiceError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| ServiceError::Validation(format!("invalid {}: {}", field, raw)))
}
