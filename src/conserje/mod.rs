use anyhow::{anyhow, Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method, Request,
    },
    routing::{get, post},
    Extension, Router,
};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use url::Url;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error;
pub mod handlers;
pub mod storage;

use self::handlers::{health, types};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::login::login,
        handlers::hoteles::list_hoteles,
        handlers::hoteles::create_hotel,
        handlers::clientes::list_clientes,
        handlers::clientes::create_cliente,
        handlers::habitaciones::list_habitaciones,
        handlers::habitaciones::create_habitacion,
        handlers::fechas::list_fechas,
        handlers::fechas::create_fecha,
        handlers::canales::list_canales,
        handlers::pagos::list_pagos,
        handlers::tipos_hab::list_tipos_hab,
        handlers::reservas::list_reservas,
        handlers::reservas::create_reserva,
    ),
    components(schemas(
        health::Health,
        types::LoginRequest,
        types::LoginResponse,
        types::HotelIn,
        types::HotelOut,
        types::ClienteIn,
        types::ClienteOut,
        types::TipoHabOut,
        types::HabitacionIn,
        types::HabitacionOut,
        types::FechaIn,
        types::FechaOut,
        types::CanalReservaOut,
        types::PagoOut,
        types::ReservaIn,
        types::ReservaOut,
    )),
    tags(
        (name = "conserje", description = "Hotel reservation management API")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, dsn: String, cors_origin: &str) -> Result<()> {
    // Connect to database
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(&dsn)
        .await
        .context("Failed to connect to database")?;

    let origin = allowed_origin(cors_origin)?;
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(AllowOrigin::exact(origin))
        .allow_credentials(true);

    let app = Router::new()
        .route("/", get(|| async { "🛎️" }))
        .route("/login", post(handlers::login))
        .route("/reservas", get(handlers::list_reservas))
        .route("/nueva-reserva", post(handlers::create_reserva))
        .route("/hoteles", get(handlers::list_hoteles))
        .route("/nuevo-hotel", post(handlers::create_hotel))
        .route("/habitaciones/:hotel_id", get(handlers::list_habitaciones))
        .route("/nueva-habitacion", post(handlers::create_habitacion))
        .route("/clientes", get(handlers::list_clientes))
        .route("/nuevo-cliente", post(handlers::create_cliente))
        .route("/fechas", get(handlers::list_fechas))
        .route("/nueva-fecha", post(handlers::create_fecha))
        .route("/canal-reservas", get(handlers::list_canales))
        .route("/pagos", get(handlers::list_pagos))
        .route("/tipoHab", get(handlers::list_tipos_hab))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors)
                .layer(Extension(pool.clone())),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi()))
        .route("/health", get(handlers::health).options(handlers::health))
        .layer(Extension(pool.clone()));

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    // Release all pooled connections before the process exits.
    pool.close().await;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}

fn allowed_origin(cors_origin: &str) -> Result<HeaderValue> {
    let parsed =
        Url::parse(cors_origin).with_context(|| format!("Invalid CORS origin: {cors_origin}"))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| anyhow!("CORS origin must include a valid host: {cors_origin}"))?;
    let port = parsed
        .port()
        .map_or_else(String::new, |port| format!(":{port}"));
    let origin = format!("{}://{}{}", parsed.scheme(), host, port);
    HeaderValue::from_str(&origin).context("Failed to build CORS origin header")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_origin_keeps_scheme_host_and_port() {
        let origin = allowed_origin("http://localhost:3000").expect("origin");
        assert_eq!(origin, HeaderValue::from_static("http://localhost:3000"));

        let origin = allowed_origin("https://reservas.example.com").expect("origin");
        assert_eq!(
            origin,
            HeaderValue::from_static("https://reservas.example.com")
        );
    }

    #[test]
    fn allowed_origin_drops_path() {
        let origin = allowed_origin("https://reservas.example.com/app/").expect("origin");
        assert_eq!(
            origin,
            HeaderValue::from_static("https://reservas.example.com")
        );
    }

    #[test]
    fn allowed_origin_rejects_garbage() {
        assert!(allowed_origin("not a url").is_err());
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/login",
            "/reservas",
            "/nueva-reserva",
            "/hoteles",
            "/nuevo-hotel",
            "/habitaciones/{hotel_id}",
            "/nueva-habitacion",
            "/clientes",
            "/nuevo-cliente",
            "/fechas",
            "/nueva-fecha",
            "/canal-reservas",
            "/pagos",
            "/tipoHab",
            "/health",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }
}
