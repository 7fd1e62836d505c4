use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use models::{dish::DishType, order::PaymentMethod};
use rust_decimal::Decimal;
use service::auth::repository::mock::MockAccountRepository;
use service::catalog::{domain::NewDishInput, repository::mock::MockDishRepository, CatalogService};
use service::orders::domain::{CreateOrderInput, OrderItemRequest};
use service::orders::{repository::mock::MockOrderRepository, OrderService};

fn bench_create_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dishes = Arc::new(MockDishRepository::default());
    let catalog = CatalogService::new(dishes.clone());
    let svc = OrderService::new(Arc::new(MockOrderRepository::default()), dishes, Arc::new(MockAccountRepository::default()));

    // build a small menu outside of the benchmark
    let menu: Vec<_> = (0..8)
        .map(|i| {
            rt.block_on(catalog.add_dish(NewDishInput {
                name: format!("dish-{}", i),
                dish_type: DishType::Veg,
                category: "Bench".into(),
                price: Decimal::new(14_950 + i * 1000, 2),
                description: "bench".into(),
                image: "https://img.example/bench.jpg".into(),
                available: None,
            }))
            .unwrap()
        })
        .collect();
    let account = uuid::Uuid::new_v4();

    c.bench_function("order_create_priced", |b| {
        b.iter(|| {
            let input = CreateOrderInput {
                items: menu.iter().map(|d| OrderItemRequest { dish_id: d.id.to_string(), quantity: 2 }).collect(),
                payment_method: Some(PaymentMethod::Cod),
            };
            let _ = rt.block_on(svc.create_order(account, input)).unwrap();
        });
    });
}

criterion_group!(benches, bench_create_order);
criterion_main!(benches);
