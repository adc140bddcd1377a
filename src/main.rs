use cafe_pos::{configuration::Settings, startup::Application, telemetry::{get_subscriber, init_subscriber}};

#[actix_web::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("cafe-pos".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = Settings::get()?;

    let application = Application::build(settings)?;
    tracing::info!("Listening on {}:{}", application.host, application.port);

    application.server.await?;
    Ok(())
}
