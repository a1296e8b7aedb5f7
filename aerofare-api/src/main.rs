use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use aerofare_api::{app, state::AppState};
use aerofare_catalog::airlines::AirlineCatalog;
use aerofare_catalog::airports::AirportCatalog;
use aerofare_catalog::geo::RoutePolicy;
use aerofare_core::repository::PricingConfigSource;
use aerofare_offer::generator::FlightOfferAssembler;
use aerofare_store::app_config::Config;
use aerofare_store::sources::{EnvSource, PostgresSource, RedisSource};
use aerofare_store::{ConfigResolver, DbClient, RedisClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "aerofare_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load configuration");

    // Assemble the pricing source chain in priority order. Postgres and
    // Redis are optional tiers; the env seed always participates and simply
    // reads empty when the variable is unset.
    let mut sources: Vec<Arc<dyn PricingConfigSource>> = Vec::new();
    let mut redis_client: Option<Arc<RedisClient>> = None;

    if let Some(database) = &config.database {
        let db = DbClient::connect_lazy(&database.url).expect("Invalid database URL");
        match db.migrate().await {
            Ok(()) => tracing::info!("Database migrations applied"),
            Err(e) => tracing::warn!("Skipping migrations, postgres tier degraded: {}", e),
        }
        sources.push(Arc::new(PostgresSource::new(db)));
    }

    if let Some(redis) = &config.redis {
        match RedisClient::new(&redis.url).await {
            Ok(client) => {
                let client = Arc::new(client);
                redis_client = Some(client.clone());
                sources.push(Arc::new(RedisSource::new(client.as_ref().clone())));
            }
            Err(e) => tracing::warn!("Redis unavailable, skipping tier: {}", e),
        }
    }

    sources.push(Arc::new(EnvSource::new(config.pricing.env_var.clone())));

    let resolver = ConfigResolver::new(
        sources,
        Duration::from_millis(config.pricing.source_timeout_ms),
    );

    let airports = AirportCatalog::embedded().expect("Invalid embedded airport dataset");
    let airlines = AirlineCatalog::with_premium_carriers(
        &config.airlines.premium_carriers,
        config.airlines.premium_surcharge,
    );
    let route_policy = RoutePolicy::new(
        config.route_policy.home_country.clone(),
        config.route_policy.short_haul_max_km,
        config.route_policy.medium_haul_max_km,
    );

    let state = AppState {
        resolver: Arc::new(resolver),
        airports: Arc::new(airports),
        route_policy: Arc::new(route_policy),
        assembler: Arc::new(FlightOfferAssembler::new(airlines)),
        redis: redis_client,
        max_offers: config.pricing.max_offers,
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Aerofare API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server address");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
