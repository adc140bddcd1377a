use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{configuration::{ApplicationSettings, Settings, StoreBackend}, lifecycle::Lifecycle, routes, store::{MemoryStore, PgStore, Store}, utils::get_connection_pool};

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    pub fn build(settings: Settings) -> Result<Self, anyhow::Error>{
        match settings.database.backend {
            StoreBackend::Postgres => {
                let store = PgStore::new(get_connection_pool(&settings.database));
                store.run_migrations()?;
                Application::build_with_store(settings.application, store)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store, data will not survive a restart");
                Application::build_with_store(settings.application, MemoryStore::new())
            }
        }
    }

    // Binding to port 0 picks a free port; the bound port is reported back
    pub fn build_with_store<S: Store>(settings: ApplicationSettings, store: S) -> Result<Self, anyhow::Error>{
        let listener = TcpListener::bind((settings.host.as_str(), settings.port))?;
        let port = listener.local_addr()?.port();

        let lifecycle = web::Data::new(Lifecycle::new(store));

        let server = HttpServer::new(move || {
            App::new()
                .wrap(TracingLogger::default())
                .app_data(lifecycle.clone())
                .configure(routes::configure::<S>)
        })
        .listen(listener)?
        .run();

        Ok(Application{
            host: settings.host,
            port,
            server
        })
    }
}
