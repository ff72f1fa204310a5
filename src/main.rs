mod account;
mod calculator;
mod category;
mod pool;
mod program;
mod saved;
mod university;
mod utils;

use axum::Router;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use listenfd::ListenFd;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Migrations need a sync connection; everything after runs on the
    // async pool.
    tokio::task::spawn_blocking(|| {
        let mut conn = axum_unihub::establish_connection();
        conn.run_pending_migrations(MIGRATIONS)
            .expect("failed to run migrations");
    })
    .await
    .expect("migration task failed");

    let pool = pool::get_pool().await.expect("failed to create db pool");

    let routes = Router::new()
        .merge(category::routes::get_routes())
        .merge(university::routes::get_routes())
        .merge(program::routes::get_routes())
        .merge(account::routes::get_routes())
        .merge(saved::routes::get_routes())
        .merge(calculator::routes::get_routes())
        .with_state(pool);
    let app = Router::new().nest("/api", routes);
    let app = app.fallback(utils::handler_404);

    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0).unwrap() {
        // if we are given a tcp listener on listen fd 0, we use that one
        Some(listener) => {
            listener.set_nonblocking(true).unwrap();
            TcpListener::from_std(listener).unwrap()
        }
        // otherwise fall back to local listening
        None => TcpListener::bind("127.0.0.1:3000").await.unwrap(),
    };
    info!("listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
