//! In-memory stand-in for the mobile backend.
//!
//! Serves the handful of routes the client talks to: location uploads,
//! login, land registry address and transaction lookups and a body-less ping.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const DEMO_USER: &str = "demo";
pub const DEMO_PASS: &str = "demo";

/// A stored location upload.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LocationRecord {
    pub id: Uuid,
    pub data: serde_json::Value,
}

#[derive(Deserialize)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
}

/// Runtime settings, read from `HOST`, `PORT` and `LOG_LEVEL`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

type Address = HashMap<String, String>;

struct Backend {
    locations: HashMap<Uuid, LocationRecord>,
    addresses: HashMap<String, Vec<Address>>,
    transactions: Vec<Address>,
}

type Db = Arc<RwLock<Backend>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Backend {
        locations: HashMap::new(),
        addresses: seed_addresses(),
        transactions: seed_transactions(),
    }));
    Router::new()
        .route("/location", post(create_location))
        .route("/location/{id}", get(get_location))
        .route("/login", post(login))
        .route("/land-registry/get-addresses/{post_code}", get(get_addresses))
        .route("/land-registry/get-transactions/{post_code}", get(get_transactions))
        .route("/land-registry/get-transactionsTown/{town}", get(get_town_transactions))
        .route("/ping", get(ping))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn seed_addresses() -> HashMap<String, Vec<Address>> {
    let address = |paon: &str, street: &str| -> Address {
        [
            ("paon", paon),
            ("street", street),
            ("town", "SOUTHAMPTON"),
            ("postcode", "SO17 1BJ"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    };
    HashMap::from([(
        post_code_key("SO17 1BJ"),
        vec![address("1", "HIGHFIELD ROAD"), address("3", "HIGHFIELD ROAD")],
    )])
}

fn seed_transactions() -> Vec<Address> {
    let sale = |paon: &str, street: &str, town: &str, post_code: &str, price: &str, date: &str| -> Address {
        [
            ("paon", paon),
            ("street", street),
            ("town", town),
            ("postcode", post_code),
            ("pricePaid", price),
            ("transactionDate", date),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    };
    vec![
        sale("1", "HIGHFIELD ROAD", "SOUTHAMPTON", "SO17 1BJ", "265000", "2023-04-14"),
        sale("3", "HIGHFIELD ROAD", "SOUTHAMPTON", "SO17 1BJ", "289950", "2024-09-02"),
        sale("12", "PORTSWOOD ROAD", "SOUTHAMPTON", "SO17 2ES", "198000", "2022-11-30"),
        sale("7", "HIGH STREET", "WINCHESTER", "SO23 9AX", "410000", "2024-01-19"),
    ]
}

fn post_code_key(post_code: &str) -> String {
    post_code
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

async fn create_location(
    State(db): State<Db>,
    Json(data): Json<serde_json::Value>,
) -> (StatusCode, Json<LocationRecord>) {
    let record = LocationRecord {
        id: Uuid::new_v4(),
        data,
    };
    db.write().await.locations.insert(record.id, record.clone());
    tracing::debug!(id = %record.id, "stored location");
    (StatusCode::CREATED, Json(record))
}

async fn get_location(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<LocationRecord>, StatusCode> {
    let backend = db.read().await;
    backend.locations.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn login(Json(credentials): Json<Credentials>) -> Result<Json<Session>, StatusCode> {
    if credentials.user == DEMO_USER && credentials.pass == DEMO_PASS {
        return Ok(Json(Session {
            token: Uuid::new_v4().to_string(),
        }));
    }
    tracing::info!(user = %credentials.user, "rejected login");
    Err(StatusCode::UNAUTHORIZED)
}

async fn get_addresses(State(db): State<Db>, Path(post_code): Path<String>) -> Json<Vec<Address>> {
    let backend = db.read().await;
    let addresses = backend
        .addresses
        .get(&post_code_key(&post_code))
        .cloned()
        .unwrap_or_default();
    Json(addresses)
}

async fn get_transactions(
    State(db): State<Db>,
    Path(post_code): Path<String>,
) -> Json<Vec<Address>> {
    let key = post_code_key(&post_code);
    let backend = db.read().await;
    let sales = backend
        .transactions
        .iter()
        .filter(|sale| post_code_key(&sale["postcode"]) == key)
        .cloned()
        .collect();
    Json(sales)
}

async fn get_town_transactions(State(db): State<Db>, Path(town): Path<String>) -> Json<Vec<Address>> {
    let backend = db.read().await;
    let sales = backend
        .transactions
        .iter()
        .filter(|sale| sale["town"].eq_ignore_ascii_case(town.trim()))
        .cloned()
        .collect();
    Json(sales)
}

async fn ping() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_code_key_ignores_spacing_and_case() {
        assert_eq!(post_code_key("so17 1bj"), "SO171BJ");
        assert_eq!(post_code_key("SO171BJ"), "SO171BJ");
    }

    #[test]
    fn seeded_addresses_are_keyed_by_post_code() {
        let seeded = seed_addresses();
        let addresses = &seeded["SO171BJ"];
        assert_eq!(addresses.len(), 2);
        assert_eq!(addresses[0]["postcode"], "SO17 1BJ");
    }

    #[test]
    fn seeded_transactions_carry_price_and_date() {
        for sale in seed_transactions() {
            assert!(sale["pricePaid"].parse::<u64>().is_ok());
            assert_eq!(sale["transactionDate"].len(), 10);
        }
    }

    #[test]
    fn location_record_serializes_to_json() {
        let record = LocationRecord {
            id: Uuid::nil(),
            data: serde_json::json!({"latitude": 50.9}),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["data"]["latitude"], 50.9);
    }

    #[test]
    fn credentials_require_both_fields() {
        let result: Result<Credentials, _> = serde_json::from_str(r#"{"user":"a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn server_config_defaults() {
        let config: ServerConfig = envy::from_iter(Vec::<(String, String)>::new()).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:3000");
        assert_eq!(config.log_level, "info");
    }
}
