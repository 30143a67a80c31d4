use std::sync::Arc;

use auth::Authenticator;
use mongodb::bson::doc;
use mongodb::Client;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use mood_service::config::Config;
use mood_service::domain::emotion::service::EmotionService;
use mood_service::domain::user::service::UserService;
use mood_service::inbound::http::router::create_router;
use mood_service::inbound::http::router::AppState;
use mood_service::outbound::repositories::MongoEmotionRepository;
use mood_service::outbound::repositories::MongoUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mood_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "mood-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    config.warn_on_insecure_defaults();

    tracing::info!(
        database = %config.database.name,
        port = config.server.port,
        token_validity_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let client = Client::with_uri_str(&config.database.uri).await?;
    let database = client.database(&config.database.name);

    // An unreachable store at boot is fatal; better to halt than to serve
    // requests that can only fail.
    database.run_command(doc! { "ping": 1 }).await?;
    tracing::info!(database = %config.database.name, "Database connection verified");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let user_repository = Arc::new(MongoUserRepository::new(
        &database,
        &config.database.user_collection,
    ));
    let emotion_repository = Arc::new(MongoEmotionRepository::new(
        &database,
        &config.database.emotion_collection,
    ));

    let state = AppState {
        user_service: Arc::new(UserService::new(
            user_repository,
            Arc::clone(&authenticator),
            config.jwt.expiration_hours,
        )),
        emotion_service: Arc::new(EmotionService::new(emotion_repository)),
        authenticator,
    };

    let address = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Http server listening");

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
