use crate::auth_jwt::auth::TokenService;
use crate::db::PgPool;
use crate::errors::custom::CustomError;
use crate::middleware::jwt_auth_middleware;
use crate::routes::{
    customer::customer::{list_customers, login_customer, profile, register_customer},
    health_check::health_check,
    menu::menu::get_menus,
    order::order::{create_order, order_summary},
};
use actix_web::{dev::Server, error::JsonPayloadError, web, App, HttpRequest, HttpServer};
use actix_web_lab::middleware::from_fn;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

/**************************************************************/
// Application State re reuse the same code in main and tests
/***************************************************************/
pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(
        host: &str,
        port: u16,
        pool: PgPool,
        token_service: TokenService,
    ) -> Result<Self, std::io::Error> {
        let address = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&address)?;
        let actual_port = listener.local_addr()?.port();
        tracing::info!(address = %address, port = actual_port, "Listening");

        let server = run_server(listener, pool, token_service)?;
        Ok(Self {
            port: actual_port,
            server,
        })
    }
    pub fn port(&self) -> u16 {
        self.port
    }
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    CustomError::ValidationError("Invalid JSON body".to_string()).into()
}

/******************************************/
// Running Server
/******************************************/
pub fn run_server(
    listener: TcpListener,
    pool: PgPool,
    token_service: TokenService,
) -> Result<Server, std::io::Error> {
    let pool = web::Data::new(pool);
    let token_service = web::Data::new(token_service);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(pool.clone())
            .app_data(token_service.clone())
            .route("/health_check", web::get().to(health_check))
            .route("/auth/register", web::post().to(register_customer))
            .route("/auth/login", web::post().to(login_customer))
            // Guarded per resource so unknown paths still fall through to 404.
            .service(
                web::resource("/profile")
                    .wrap(from_fn(jwt_auth_middleware))
                    .route(web::get().to(profile)),
            )
            .service(
                web::resource("/customers")
                    .wrap(from_fn(jwt_auth_middleware))
                    .route(web::get().to(list_customers)),
            )
            .service(
                web::resource("/orders")
                    .wrap(from_fn(jwt_auth_middleware))
                    .route(web::post().to(create_order)),
            )
            .service(
                web::resource("/orders/summary")
                    .wrap(from_fn(jwt_auth_middleware))
                    .route(web::get().to(order_summary)),
            )
            .service(
                web::resource("/menus")
                    .wrap(from_fn(jwt_auth_middleware))
                    .route(web::get().to(get_menus)),
            )
    })
    .listen(listener)?
    .run();
    Ok(server)
}
