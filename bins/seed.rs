//! Seed the default menu into an empty catalog.

use std::sync::Arc;

use anyhow::Context;
use migration::MigratorTrait;
use models::dish::DishType;
use rust_decimal::Decimal;
use service::catalog::{domain::NewDishInput, repo::seaorm::SeaOrmDishRepository, CatalogService};
use tracing::info;

struct SeedDish {
    name: &'static str,
    dish_type: DishType,
    price: i64,
    description: &'static str,
    image: &'static str,
    category: &'static str,
}

const MENU: &[SeedDish] = &[
    SeedDish {
        name: "Maharaja Thali",
        dish_type: DishType::Veg,
        price: 249,
        description: "Dal Makhani, Paneer, 2 Vegetables, Raita, Rice, 3 Butter Roti, Gulab Jamun",
        image: "https://images.unsplash.com/photo-1546833999-b9f581a1996d?auto=format&fit=crop&q=80&w=800",
        category: "Thalis",
    },
    SeedDish {
        name: "Economy Thali",
        dish_type: DishType::Veg,
        price: 149,
        description: "Dal, Seasonal Vegetable, Rice, 4 Roti, Salad",
        image: "https://images.unsplash.com/photo-1626777552726-4a6b54c97e46?auto=format&fit=crop&q=80&w=800",
        category: "Thalis",
    },
    SeedDish {
        name: "Paneer Butter Masala",
        dish_type: DishType::Veg,
        price: 199,
        description: "Cubes of paneer cooked in rich creamy tomato based gravy",
        image: "https://images.unsplash.com/photo-1567184109411-b2033c464670?auto=format&fit=crop&q=80&w=800",
        category: "Main Course",
    },
    SeedDish {
        name: "Chicken Curry",
        dish_type: DishType::NonVeg,
        price: 279,
        description: "Homestyle chicken gravy cooked with traditional Indian spices",
        image: "https://images.unsplash.com/photo-1603894584104-699741e7379f?auto=format&fit=crop&q=80&w=800",
        category: "Main Course",
    },
    SeedDish {
        name: "Hara Bhara Kabab",
        dish_type: DishType::Veg,
        price: 129,
        description: "Crispy spinach and potato patties filled with peas and spices",
        image: "https://images.unsplash.com/photo-1606491956391-70868b5d0f47?auto=format&fit=crop&q=80&w=800",
        category: "Starters",
    },
    SeedDish {
        name: "Hyderabadi Biryani",
        dish_type: DishType::NonVeg,
        price: 219,
        description: "Authentic spice-rich biryani cooked with marinated chicken pieces",
        image: "https://images.unsplash.com/photo-1589302168068-964664d93dc0?auto=format&fit=crop&q=80&w=800",
        category: "Rice & Biryani",
    },
    SeedDish {
        name: "Butter Naan",
        dish_type: DishType::Veg,
        price: 35,
        description: "Soft and fluffy leavened bread cooked in clay oven with butter",
        image: "https://images.unsplash.com/photo-1601050690597-df056fb1ce24?auto=format&fit=crop&q=80&w=800",
        category: "Breads",
    },
    SeedDish {
        name: "Gulab Jamun (2 Pcs)",
        dish_type: DishType::Veg,
        price: 59,
        description: "Soft milk solids dumplings dipped in warm sugar syrup",
        image: "https://images.unsplash.com/photo-1589119908995-c6837fa14848?auto=format&fit=crop&q=80&w=800",
        category: "Desserts",
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let db = models::db::connect().await.context("connect database")?;
    migration::Migrator::up(&db, None).await.context("apply migrations")?;

    let existing = models::dish::count(&db).await?;
    if existing > 0 {
        info!(existing, "catalog already populated, nothing to seed");
        return Ok(());
    }

    let catalog = CatalogService::new(Arc::new(SeaOrmDishRepository::new(db)));
    for d in MENU {
        let dish = catalog
            .add_dish(NewDishInput {
                name: d.name.to_string(),
                dish_type: d.dish_type,
                category: d.category.to_string(),
                price: Decimal::from(d.price),
                description: d.description.to_string(),
                image: d.image.to_string(),
                available: Some(true),
            })
            .await
            .with_context(|| format!("insert {}", d.name))?;
        info!(dish_id = %dish.id, name = %dish.name, "seeded dish");
    }
    info!(count = MENU.len(), "menu seeded");
    Ok(())
}
