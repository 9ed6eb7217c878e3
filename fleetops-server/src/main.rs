use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::info;

use fleetops_api::{create_router, AppState};
use fleetops_core::services::{
    AuthService, BankService, EmployeeService, IncomeService, LoadTypeService, OrderService,
    RoleService, UserService,
};
use fleetops_infrastructure::{
    create_pool, FsAttachmentStore, PgBankRepository, PgEmployeeRepository, PgIncomeRepository,
    PgLoadTypeRepository, PgOrderRepository, PgPermissionRepository, PgRoleRepository,
    PgUserRepository,
};
use fleetops_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes the file appender on exit.
    let _guard = fleetops_shared::telemetry::init_telemetry(config.app.log_dir.as_deref());

    info!("FleetOps server starting...");

    // Connect to database
    info!("Connecting to database...");
    let pool = create_pool(&config.database.url, config.database.max_connections).await?;
    info!("Database connection established.");

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Migrations applied.");

    // Repositories and blob store
    let employees = Arc::new(PgEmployeeRepository::new(pool.clone()));
    let incomes = Arc::new(PgIncomeRepository::new(pool.clone()));
    let orders = Arc::new(PgOrderRepository::new(pool.clone()));
    let banks = Arc::new(PgBankRepository::new(pool.clone()));
    let load_types = Arc::new(PgLoadTypeRepository::new(pool.clone()));
    let roles = Arc::new(PgRoleRepository::new(pool.clone()));
    let permissions = Arc::new(PgPermissionRepository::new(pool.clone()));
    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let attachments = Arc::new(FsAttachmentStore::new(config.storage.root.clone()));

    // Services and app state
    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            users.clone(),
            config.jwt.secret.clone(),
            config.jwt.access_token_expiry,
        )),
        employee_service: Arc::new(EmployeeService::new(employees)),
        income_service: Arc::new(IncomeService::new(
            incomes.clone(),
            orders.clone(),
            banks.clone(),
            attachments,
        )),
        order_service: Arc::new(OrderService::new(orders, incomes.clone())),
        bank_service: Arc::new(BankService::new(banks, incomes)),
        load_type_service: Arc::new(LoadTypeService::new(load_types)),
        role_service: Arc::new(RoleService::new(roles.clone(), permissions)),
        user_service: Arc::new(UserService::new(users, roles)),
    };

    // Build router with CORS
    let app = create_router(state).layer(
        CorsLayer::new()
            .allow_origin(config.cors.allowed_origin.parse::<HeaderValue>()?)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
    );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
