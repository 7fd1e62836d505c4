use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// 顾客令牌签发配置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_days")]
    pub token_ttl_days: i64,
}

fn default_token_ttl_days() -> i64 { 30 }

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), token_ttl_days: default_token_ttl_days() }
    }
}

/// 运营方配置的静态管理员凭据与会话参数
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_secs: u64,
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_session_ttl() -> u64 { 24 * 60 * 60 }

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            session_ttl_secs: default_session_ttl(),
            cookie_secure: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> { vec!["http://localhost:5173".to_string()] }

impl Default for CorsConfig {
    fn default() -> Self { Self { allowed_origins: default_allowed_origins() } }
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// 读取 config.toml；文件缺失时退回默认值，再统一用环境变量补全并校验
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize_from_env();
        self.server.normalize()?;
        // 归一化 database（支持从环境变量填充 URL）
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.admin.normalize_from_env();
        self.admin.validate()?;
        self.cors.normalize_from_env();
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port 必须在 1..=65535 范围内"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // 若 TOML 中未提供 URL，则尝试从环境变量填充
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
        // Default derive leaves zeros when the [database] table is absent
        if self.max_connections == 0 { self.max_connections = default_max_connections(); }
        if self.min_connections == 0 { self.min_connections = default_min_connections(); }
        if self.connect_timeout_secs == 0 { self.connect_timeout_secs = default_connect_timeout(); }
        if self.idle_timeout_secs == 0 { self.idle_timeout_secs = default_idle_timeout(); }
        if self.max_lifetime_secs == 0 { self.max_lifetime_secs = default_max_lifetime(); }
        if self.acquire_timeout_secs == 0 { self.acquire_timeout_secs = default_acquire_timeout(); }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url 为空；请在 config.toml 或环境变量 DATABASE_URL 中提供"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url 必须以 postgresql:// 或 postgres:// 开头"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections 必须 >= min_connections"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        if self.jwt_secret.trim().is_empty() {
            self.jwt_secret = std::env::var("JWT_SECRET").unwrap_or_default();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.trim().is_empty() {
            return Err(anyhow!("auth.jwt_secret 为空；请在 config.toml 或环境变量 JWT_SECRET 中提供"));
        }
        if self.token_ttl_days <= 0 {
            return Err(anyhow!("auth.token_ttl_days 必须为正数"));
        }
        Ok(())
    }
}

impl AdminConfig {
    pub fn normalize_from_env(&mut self) {
        if self.email.trim().is_empty() {
            self.email = std::env::var("ADMIN_EMAIL").unwrap_or_default();
        }
        if self.password.is_empty() {
            self.password = std::env::var("ADMIN_PASSWORD").unwrap_or_default();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(anyhow!("admin.email/admin.password 未配置；请设置 ADMIN_EMAIL 与 ADMIN_PASSWORD"));
        }
        if self.session_ttl_secs == 0 {
            return Err(anyhow!("admin.session_ttl_secs 必须 > 0"));
        }
        Ok(())
    }
}

impl CorsConfig {
    pub fn normalize_from_env(&mut self) {
        if let Ok(origin) = std::env::var("FRONTEND_URL") {
            let origin = origin.trim().to_string();
            if !origin.is_empty() && !self.allowed_origins.contains(&origin) {
                self.allowed_origins.push(origin);
            }
        }
    }
}
