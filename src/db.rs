use crate::errors::custom::DbError;
use diesel::sql_query;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use diesel_async_migrations::{embed_migrations, EmbeddedMigrations};
use tracing::instrument;

pub type PgPool = Pool<AsyncPgConnection>;

pub static MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/******************************************/
// Establishing Db Connection
/******************************************/
pub fn establish_connection(database_url: &str, max_connections: usize) -> Result<PgPool, DbError> {
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
    Pool::builder(manager)
        .max_size(max_connections)
        .build()
        .map_err(|err| DbError::ConnectionError(err.to_string()))
}

/******************************************/
// Running embedded migrations
/******************************************/
#[instrument(name = "Run pending migrations", skip(pool))]
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;
    // The bookkeeping table is only created once per process otherwise.
    MIGRATIONS
        .setup_migrations_table(&mut *conn)
        .await
        .map_err(|err| DbError::MigrationError(err.to_string()))?;
    MIGRATIONS
        .run_pending_migrations(&mut *conn)
        .await
        .map_err(|err| DbError::MigrationError(err.to_string()))
}

/******************************************/
// Creating new db for tests
/******************************************/
pub async fn create_database(maintenance_url: &str, database_name: &str) -> Result<(), DbError> {
    let mut connection = AsyncPgConnection::establish(maintenance_url)
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    let create_db_query = format!(r#"CREATE DATABASE "{}";"#, database_name);
    sql_query(create_db_query)
        .execute(&mut connection)
        .await
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?;
    tracing::info!(database_name, "Database created");
    Ok(())
}

/******************************************/
// Dropping db code
/******************************************/
pub async fn drop_database(maintenance_url: &str, database_name: &str) -> Result<(), DbError> {
    let mut connection = AsyncPgConnection::establish(maintenance_url)
        .await
        .map_err(|err| DbError::ConnectionError(err.to_string()))?;

    // Postgres refuses to drop a database with live sessions.
    let terminate_query = format!(
        r#"
        SELECT pg_terminate_backend(pid)
        FROM pg_stat_activity
        WHERE datname = '{}';
    "#,
        database_name
    );
    sql_query(terminate_query)
        .execute(&mut connection)
        .await
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?;

    let drop_query = format!(r#"DROP DATABASE IF EXISTS "{}";"#, database_name);
    sql_query(drop_query)
        .execute(&mut connection)
        .await
        .map_err(|err| DbError::QueryBuilderError(err.to_string()))?;
    tracing::info!(database_name, "Database dropped");
    Ok(())
}
