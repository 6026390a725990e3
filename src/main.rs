use dotenv::dotenv;
use food_ordering::auth_jwt::auth::TokenService;
use food_ordering::config::configuration;
use food_ordering::db::{establish_connection, run_migrations};
use food_ordering::routes::menu::seed::seed_menus;
use food_ordering::startup::Application;
use food_ordering::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    let subscriber = get_subscriber("food_ordering".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = configuration::Settings::new().expect("Failed to load configurations");
    let token_service =
        TokenService::new(&config.jwt.secret).expect("Failed to initialise token service");
    let pool = establish_connection(&config.database.url, config.database.max_connections)
        .expect("Failed to create database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    if config.application.seed_menus {
        seed_menus(&pool).await.expect("Failed to seed menus");
    }

    let application = Application::build(
        &config.application.host,
        config.application.port,
        pool,
        token_service,
    )
    .await?;
    application.run_until_stopped().await?;
    Ok(())
}
