use std::sync::Arc;
use std::time::Duration;

use configs::AppConfig;
use sea_orm::DatabaseConnection;
use service::{
    admin_auth::AdminAuthService,
    auth::{repo::seaorm::SeaOrmAccountRepository, repository::{mock::MockAccountRepository, AccountRepository}, AuthService},
    catalog::{repo::seaorm::SeaOrmDishRepository, repository::{mock::MockDishRepository, DishRepository}, CatalogService},
    orders::{repo::seaorm::SeaOrmOrderRepository, repository::{mock::MockOrderRepository, OrderRepository}, OrderService},
    token::TokenCodec,
};

/// The three stores every service is built from.
#[derive(Clone)]
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub dishes: Arc<dyn DishRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    pub fn seaorm(db: DatabaseConnection) -> Self {
        Self {
            accounts: Arc::new(SeaOrmAccountRepository::new(db.clone())),
            dishes: Arc::new(SeaOrmDishRepository::new(db.clone())),
            orders: Arc::new(SeaOrmOrderRepository::new(db)),
        }
    }

    /// Process-local stores; nothing survives a restart.
    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(MockAccountRepository::default()),
            dishes: Arc::new(MockDishRepository::default()),
            orders: Arc::new(MockOrderRepository::default()),
        }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
    pub admin: Arc<AdminAuthService>,
    pub catalog: Arc<CatalogService>,
    pub orders: Arc<OrderService>,
    pub cookie_secure: bool,
}

impl ServerState {
    pub fn new(repos: Repositories, cfg: &AppConfig) -> Self {
        let tokens = TokenCodec::new(cfg.auth.jwt_secret.clone(), cfg.auth.token_ttl_days);
        let admin = AdminAuthService::new(
            cfg.admin.email.clone(),
            cfg.admin.password.clone(),
            Duration::from_secs(cfg.admin.session_ttl_secs),
            tokens.clone(),
        );
        Self {
            auth: Arc::new(AuthService::new(repos.accounts.clone(), tokens)),
            admin: Arc::new(admin),
            catalog: Arc::new(CatalogService::new(repos.dishes.clone())),
            orders: Arc::new(OrderService::new(repos.orders, repos.dishes, repos.accounts)),
            cookie_secure: cfg.admin.cookie_secure,
        }
    }
}
