//! Test harness for the dashboard router.
//!
//! Every test gets its own [`TestApp`]: the real router from
//! [`duka_kuu_dashboard::build_app`] over a fresh [`MemoryCatalog`], driven
//! in-process with `tower::ServiceExt::oneshot`. Session tokens are minted
//! with the same HS256 secret the app verifies with.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p duka-kuu-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;
use tower::ServiceExt;

use duka_kuu_core::{HexColor, Price, StoreName, UserId};
use duka_kuu_dashboard::build_app;
use duka_kuu_dashboard::config::{AuthConfig, DashboardConfig, JwtKey, StorageConfig};
use duka_kuu_dashboard::db::{Catalog, MemoryCatalog};
use duka_kuu_dashboard::middleware::{SESSION_COOKIE, TokenVerifier};
use duka_kuu_dashboard::models::{
    CategoryDetails, CategoryInput, Color, ColorInput, Hero, HeroInput, ProductDetails,
    ProductInput, Size, SizeInput, Store,
};
use duka_kuu_dashboard::state::AppState;

/// HS256 secret shared by the app under test and [`TestApp::token`].
pub const TEST_SECRET: &str = "kP9#vR2$wX7!qL4@zN8%mT3^bJ6&hF1*";

/// Public base URL configured for the app under test.
pub const PUBLIC_API_URL: &str = "https://shop.example.com";

#[derive(Serialize)]
struct Claims<'a> {
    sub: &'a str,
    exp: i64,
}

/// A response, decoded for assertions.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// Parse the body as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// A store with one hero, category, size and color, ready for products.
#[derive(Debug, Clone)]
pub struct SeededStore {
    pub store: Store,
    pub hero: Hero,
    pub category: CategoryDetails,
    pub size: Size,
    pub color: Color,
}

/// The dashboard router over an in-memory catalog.
pub struct TestApp {
    router: Router,
    catalog: Arc<MemoryCatalog>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Build a fresh app with an empty catalog.
    pub fn new() -> Self {
        let config = test_config();
        let verifier = TokenVerifier::from_config(&config.auth).unwrap();
        let catalog = Arc::new(MemoryCatalog::new());
        let state = AppState::new(config, catalog.clone(), verifier);

        Self {
            router: build_app(state),
            catalog,
        }
    }

    /// Direct access to the catalog, for seeding and checking writes.
    pub fn catalog(&self) -> &MemoryCatalog {
        &self.catalog
    }

    /// Mint a session token for `user` that expires in an hour.
    pub fn token(user: &str) -> String {
        Self::token_expiring_at(user, chrono::Utc::now().timestamp() + 3600)
    }

    /// Mint a session token with an explicit `exp`.
    pub fn token_expiring_at(user: &str, exp: i64) -> String {
        encode(
            &Header::default(),
            &Claims { sub: user, exp },
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    /// Send a request, authenticated as `user` with a bearer token when given.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", Self::token(user)));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send_request(builder.body(body).unwrap()).await
    }

    /// Send a request authenticated through the session cookie.
    pub async fn send_with_cookie(&self, method: Method, uri: &str, token: &str) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, format!("theme=dark; {SESSION_COOKIE}={token}"))
            .body(Body::empty())
            .unwrap();
        self.send_request(request).await
    }

    /// Send a prebuilt request.
    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    /// Create a store owned by `user`.
    pub async fn create_store(&self, user: &str, name: &str) -> Store {
        self.catalog
            .create_store(&UserId::new(user), &StoreName::parse(name).unwrap())
            .await
            .unwrap()
    }

    /// Create a store with one of each product attribute.
    pub async fn seed_store(&self, user: &str, name: &str) -> SeededStore {
        let store = self.create_store(user, name).await;
        let hero = self
            .catalog
            .create_hero(
                &store.id,
                &HeroInput {
                    label: "Summer".to_string(),
                    image_url: "http://x/hero.png".to_string(),
                },
            )
            .await
            .unwrap();
        let category = self
            .catalog
            .create_category(
                &store.id,
                &CategoryInput {
                    name: "Shirts".to_string(),
                    hero_id: hero.id.clone(),
                },
            )
            .await
            .unwrap();
        let size = self
            .catalog
            .create_size(
                &store.id,
                &SizeInput {
                    name: "Medium".to_string(),
                    value: "M".to_string(),
                },
            )
            .await
            .unwrap();
        let color = self
            .catalog
            .create_color(
                &store.id,
                &ColorInput {
                    name: "Red".to_string(),
                    value: HexColor::parse("#FF0000").unwrap(),
                },
            )
            .await
            .unwrap();

        SeededStore {
            store,
            hero,
            category,
            size,
            color,
        }
    }

    /// Create a product in a seeded store.
    pub async fn seed_product(&self, seeded: &SeededStore, name: &str) -> ProductDetails {
        self.catalog
            .create_product(
                &seeded.store.id,
                &ProductInput {
                    name: name.to_string(),
                    price: Price::new(Decimal::new(1000, 2)).unwrap(),
                    category_id: seeded.category.category.id.clone(),
                    size_id: seeded.size.id.clone(),
                    color_id: seeded.color.id.clone(),
                    image_urls: vec!["http://x/old.png".to_string()],
                    is_featured: false,
                    is_archived: false,
                },
            )
            .await
            .unwrap()
    }
}

/// Configuration for the app under test.
pub fn test_config() -> DashboardConfig {
    DashboardConfig {
        storage: StorageConfig::Memory,
        host: "127.0.0.1".parse().unwrap(),
        port: 3001,
        public_api_url: PUBLIC_API_URL.to_string(),
        auth: AuthConfig {
            key: JwtKey::Hs256(SecretString::from(TEST_SECRET)),
            issuer: None,
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
        tls: None,
    }
}
