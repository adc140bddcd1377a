use cafe_pos::{configuration::{DatabaseSettings, Settings, StoreBackend}, startup::Application, telemetry::{get_subscriber, init_subscriber}};
use diesel::{Connection, PgConnection, RunQueryDsl};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use uuid::Uuid;

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "cafe-pos-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub api_client: reqwest::Client
}

impl TestApp {
    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    pub async fn spawn_app() -> TestApp{
        let mut settings = Settings::get().expect("Failed to read configuration");
        settings.database.backend = StoreBackend::Memory;

        TestApp::launch(settings)
    }

    // Fresh database per app; the application runs the migrations on build
    pub async fn spawn_app_with_postgres() -> TestApp{
        let mut settings = Settings::get().expect("Failed to read configuration");
        settings.database.backend = StoreBackend::Postgres;
        settings.database.name = Uuid::new_v4().to_string();

        TestApp::create_db(&settings.database);

        TestApp::launch(settings)
    }

    fn create_db(settings: &DatabaseSettings){
        let mut connection = PgConnection::establish(&settings.get_database_url())
                                .expect("Failed to connect to postgres database");

        let query = format!(r#"CREATE DATABASE "{}";"#, settings.name);
        diesel::sql_query(query)
            .execute(&mut connection)
            .expect("Failed to create test database");
    }

    fn launch(mut settings: Settings) -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        settings.application.port = 0;

        let application = Application::build(settings)
                            .expect("Failed to build application");

        let host = application.host.clone();
        let port = application.port;
        tokio::task::spawn(application.server);

        TestApp{
            host,
            port,
            api_client: reqwest::Client::new()
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response{
        self.api_client
            .get(format!("{}{}", self.get_app_url(), path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post(&self, path: &str, body: &Value) -> reqwest::Response{
        self.api_client
            .post(format!("{}{}", self.get_app_url(), path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put(&self, path: &str, body: &Value) -> reqwest::Response{
        self.api_client
            .put(format!("{}{}", self.get_app_url(), path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch(&self, path: &str, body: Option<&Value>) -> reqwest::Response{
        let request = self.api_client.patch(format!("{}{}", self.get_app_url(), path));
        let request = match body {
            Some(body) => request.json(body),
            None => request
        };

        request.send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str) -> reqwest::Response{
        self.api_client
            .delete(format!("{}{}", self.get_app_url(), path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn create_item_type(&self, name: &str) -> Uuid{
        let response = self.post("/item-types", &json!({
            "name": name,
            "display_name": name.to_uppercase()
        })).await;
        assert_eq!(response.status().as_u16(), 201);

        id_of(response, "item_type_id").await
    }

    pub async fn create_item(&self, item_type_id: Uuid, name: &str, price: i64) -> Uuid{
        let response = self.post("/items", &json!({
            "name": name,
            "abbreviation": &name[..2],
            "price": price,
            "key": &name[..1],
            "item_type_id": item_type_id
        })).await;
        assert_eq!(response.status().as_u16(), 201);

        id_of(response, "item_id").await
    }

    pub async fn create_order(&self, item_ids: &[Uuid]) -> Value{
        let response = self.post("/orders", &json!({
            "order_number": 7,
            "billing_amount": 900,
            "received_amount": 1000,
            "item_ids": item_ids
        })).await;
        assert_eq!(response.status().as_u16(), 201);

        response.json().await.expect("Failed to parse order")
    }
}

pub async fn id_of(response: reqwest::Response, field: &str) -> Uuid{
    let body: Value = response.json().await.expect("Failed to parse body");
    serde_json::from_value(body[field].clone()).expect("Missing id field")
}
