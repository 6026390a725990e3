use crate::db::PgPool;
use actix_web::{web, HttpResponse};

/******************************************/
// Health check route
/******************************************/
/// 200 with an empty body while the pool can hand out a connection.
pub async fn health_check(pool: web::Data<PgPool>) -> HttpResponse {
    match pool.get().await {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(err) => {
            tracing::warn!(error = %err, "Health check could not reach the database");
            HttpResponse::ServiceUnavailable().finish()
        }
    }
}
