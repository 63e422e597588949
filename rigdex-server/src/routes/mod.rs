pub mod v1;

use axum::{Router, http::HeaderValue, routing::get};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;
use crate::handlers::{health_handler, ping_handler};
use rigdex_core::api_routes::{self, v1::ROOT};

/// Create the main API router with all versions
pub fn create_api_router() -> Router<AppState> {
    Router::new().nest(ROOT, v1::create_v1_router())
}

/// Full application: operational endpoints, the versioned API and the
/// CORS and tracing layers.
pub fn create_app(state: AppState) -> Router {
    // Permissive in dev, allow-list otherwise. An empty list admits no
    // foreign origin.
    let cors_layer = if state.config.dev_mode {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .cors
            .allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| *origin != "*")
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    };

    Router::new()
        .route(api_routes::PING, get(ping_handler))
        .route(api_routes::HEALTH, get(health_handler))
        .merge(create_api_router())
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use rigdex_core::CatalogUnitOfWork;

    use super::*;
    use crate::infra::config::{
        Config, ConfigMetadata, CorsConfig, DatabaseConfig, ServerConfig,
    };

    fn app(dev_mode: bool, origins: &[&str]) -> Router {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
            database: DatabaseConfig::default(),
            cors: CorsConfig {
                allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
            },
            dev_mode,
            metadata: ConfigMetadata::default(),
        };
        create_app(AppState::new(
            Arc::new(CatalogUnitOfWork::in_memory()),
            Arc::new(config),
        ))
    }

    fn get_with_origin(uri: &str, origin: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn allow_list_echoes_known_origins_only() {
        let app = app(false, &["http://localhost:5173"]);

        let allowed = app
            .clone()
            .oneshot(get_with_origin(api_routes::PING, "http://localhost:5173"))
            .await
            .unwrap();
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );

        let foreign = app
            .oneshot(get_with_origin(api_routes::PING, "http://evil.test"))
            .await
            .unwrap();
        assert!(
            foreign
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn empty_allow_list_admits_no_origin() {
        for origins in [&[][..], &["*"][..]] {
            let response = app(false, origins)
                .oneshot(get_with_origin(api_routes::PING, "http://evil.test"))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert!(
                response
                    .headers()
                    .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                    .is_none()
            );
        }
    }

    #[tokio::test]
    async fn every_resource_is_mounted_under_v1() {
        let app = app(true, &[]);
        let segments = rigdex_model::DictionaryKind::ALL
            .map(|kind| kind.segment())
            .into_iter()
            .chain(["chipsets", "designs", "fan-sizes"]);

        for segment in segments {
            for uri in [
                api_routes::utils::collection(segment),
                api_routes::utils::pageable(segment),
            ] {
                let response = app
                    .clone()
                    .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
                    .await
                    .unwrap();
                assert_eq!(response.status(), StatusCode::OK, "{uri}");
            }
        }
    }
}
