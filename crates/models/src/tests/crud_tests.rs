use anyhow::Result;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::setup_test_db;
use crate::account::{self, NewAccount, Role};
use crate::dish::{self, DishFilter, DishPatch, DishType, NewDish};
use crate::errors::ModelError;
use crate::order::{self, LineItem, LineItems, NewOrder, OrderStatus, PaymentMethod, PaymentStatus};

fn new_account(email: &str) -> NewAccount {
    NewAccount {
        email: email.to_string(),
        password_hash: Some("$argon2id$placeholder".into()),
        display_name: "Crud Tester".into(),
        role: Role::Customer,
        phone_number: None,
        photo_url: None,
        federated_id: None,
    }
}

fn new_dish(price: i64) -> NewDish {
    NewDish {
        name: format!("dish_{}", Uuid::new_v4()),
        dish_type: DishType::NonVeg,
        price: Decimal::from(price),
        description: "Homestyle chicken gravy".into(),
        image: "https://img.example/curry.jpg".into(),
        category: format!("cat_{}", Uuid::new_v4()),
        available: true,
    }
}

#[tokio::test]
async fn test_account_crud_and_unique_email() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()); };

    let email = format!("crud_{}@example.com", Uuid::new_v4());
    let created = account::create(&db, new_account(&email)).await?;
    assert_eq!(created.role, Role::Customer);

    let found = account::find_by_email(&db, &email).await?.expect("account by email");
    assert_eq!(found.id, created.id);

    // 大小写敏感：不同大小写视为不同邮箱
    assert!(account::find_by_email(&db, &email.to_uppercase()).await?.is_none());

    let dup = account::create(&db, new_account(&email)).await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))));

    let uid = format!("fed_{}", Uuid::new_v4());
    let linked = account::link_federated_identity(&db, created.id, &uid, Some("https://img/p.png".into())).await?;
    assert_eq!(linked.federated_id.as_deref(), Some(uid.as_str()));
    assert_eq!(linked.photo_url.as_deref(), Some("https://img/p.png"));
    Ok(())
}

#[tokio::test]
async fn test_dish_filter_and_patch() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()); };

    let mut input = new_dish(279);
    let category = input.category.clone();
    let available = dish::create(&db, input.clone()).await?;
    input.available = false;
    let hidden = dish::create(&db, input).await?;

    let filter = DishFilter { category: Some(category), available_only: true, ..Default::default() };
    let listed = dish::list(&db, &filter).await?;
    assert!(listed.iter().any(|d| d.id == available.id));
    assert!(listed.iter().all(|d| d.id != hidden.id));

    let patched = dish::update(&db, available.id, DishPatch { price: Some(Decimal::from(300)), available: None })
        .await?
        .expect("dish exists");
    assert_eq!(patched.price, Decimal::from(300));
    assert!(dish::update(&db, Uuid::new_v4(), DishPatch::default()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_order_roundtrip_keeps_snapshot() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()); };

    let owner = account::create(&db, new_account(&format!("order_{}@example.com", Uuid::new_v4()))).await?;
    let d = dish::create(&db, new_dish(249)).await?;

    let created = order::create(&db, NewOrder {
        account_id: owner.id,
        items: LineItems(vec![LineItem { dish_id: d.id, quantity: 2, price: d.price }]),
        payment_method: PaymentMethod::Cod,
    })
    .await?;
    assert_eq!(created.total_amount, Decimal::from(498));
    assert_eq!(created.status, OrderStatus::Pending);
    assert_eq!(created.payment_status, PaymentStatus::Pending);

    dish::update(&db, d.id, DishPatch { price: Some(Decimal::from(999)), available: None }).await?;
    let reloaded = order::find_by_id(&db, created.id).await?.expect("order exists");
    assert_eq!(reloaded.items.0[0].price, Decimal::from(249));
    assert_eq!(reloaded.total_amount, Decimal::from(498));

    let updated = order::update_status(&db, created.id, OrderStatus::Preparing, Some(PaymentStatus::Paid))
        .await?
        .expect("order exists");
    assert_eq!(updated.status, OrderStatus::Preparing);
    assert_eq!(updated.payment_status, PaymentStatus::Paid);

    let mine = order::list_by_account(&db, owner.id).await?;
    assert_eq!(mine.len(), 1);
    Ok(())
}
