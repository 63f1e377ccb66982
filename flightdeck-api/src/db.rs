//! Database Connection Pool Module
//!
//! PostgreSQL connection pooling via deadpool-postgres and typed query
//! wrappers over the three store tables (flights, airports, weather).
//! All SQL is parameterized; text lookup keys are uppercased before
//! comparison so code lookups are case-insensitive by contract.

use crate::error::{ApiError, ApiResult};
use deadpool_postgres::{Config, ManagerConfig, Pool, PoolConfig, RecyclingMethod, Runtime};
use flightdeck_core::{Airport, Flight, FlightWithRoute, Weather, WeatherReport};
use std::time::Duration;
use tokio_postgres::types::ToSql;
use tokio_postgres::{NoTls, Row};

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Maximum pool size
    pub max_size: usize,
    /// Connection timeout
    pub timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "flight_db".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            max_size: 16,
            timeout: Duration::from_secs(30),
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("FLIGHTDECK_DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: std::env::var("FLIGHTDECK_DB_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5432),
            dbname: std::env::var("FLIGHTDECK_DB_NAME")
                .unwrap_or_else(|_| "flight_db".to_string()),
            user: std::env::var("FLIGHTDECK_DB_USER").unwrap_or_else(|_| "postgres".to_string()),
            password: std::env::var("FLIGHTDECK_DB_PASSWORD")
                .unwrap_or_else(|_| "postgres".to_string()),
            max_size: std::env::var("FLIGHTDECK_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(16),
            timeout: Duration::from_secs(
                std::env::var("FLIGHTDECK_DB_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }

    /// Create a connection pool from this configuration.
    /// Pool construction is lazy: no connection is opened until first use.
    pub fn create_pool(&self) -> ApiResult<Pool> {
        let mut cfg = Config::new();
        cfg.host = Some(self.host.clone());
        cfg.port = Some(self.port);
        cfg.dbname = Some(self.dbname.clone());
        cfg.user = Some(self.user.clone());
        cfg.password = Some(self.password.clone());
        cfg.pool = Some(PoolConfig::new(self.max_size));

        cfg.manager = Some(ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        });

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| ApiError::database_error(format!("Failed to create pool: {}", e)))?;

        Ok(pool)
    }
}

// ============================================================================
// DATABASE CLIENT WRAPPER
// ============================================================================

/// Database client wrapping a connection pool with typed query methods.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

const FLIGHT_COLUMNS: &str = "f.flight_code, f.airline, f.from_airport, f.to_airport, \
     f.departure_time, f.arrival_time, f.status, f.gate, f.price, \
     f.delay_minutes, f.delay_reason";

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create a new database client from configuration.
    pub fn from_config(config: &DbConfig) -> ApiResult<Self> {
        let pool = config.create_pool()?;
        Ok(Self::new(pool))
    }

    /// Get the current pool size for observability.
    pub fn pool_size(&self) -> usize {
        let status = self.pool.status();
        status.size
    }

    /// Get a connection from the pool. The connection returns to the pool
    /// when the returned object drops, on every exit path.
    async fn get_conn(&self) -> ApiResult<deadpool_postgres::Object> {
        self.pool.get().await.map_err(ApiError::from)
    }

    /// Verify database connectivity.
    pub async fn health_check(&self) -> ApiResult<()> {
        let conn = self.get_conn().await?;
        conn.query_one("SELECT 1", &[]).await?;
        Ok(())
    }

    // ========================================================================
    // FLIGHT QUERIES
    // ========================================================================

    /// Look up one flight by code, joined with both endpoint airports.
    pub async fn flight_by_code(&self, code: &str) -> ApiResult<Option<FlightWithRoute>> {
        let conn = self.get_conn().await?;
        let code = code.to_uppercase();

        let sql = format!(
            "SELECT {FLIGHT_COLUMNS}, \
                    a1.name AS from_name, a1.city AS from_city, \
                    a2.name AS to_name, a2.city AS to_city \
             FROM flights f \
             JOIN airports a1 ON f.from_airport = a1.airport_code \
             JOIN airports a2 ON f.to_airport = a2.airport_code \
             WHERE f.flight_code = $1"
        );
        let row = conn.query_opt(sql.as_str(), &[&code]).await?;

        row.map(|r| flight_with_route_from_row(&r, true)).transpose()
    }

    /// List flights ordered by departure time, optionally filtered by
    /// either endpoint.
    pub async fn flights_list(
        &self,
        from_airport: Option<&str>,
        to_airport: Option<&str>,
    ) -> ApiResult<Vec<FlightWithRoute>> {
        let conn = self.get_conn().await?;

        let from_code = from_airport.map(str::to_uppercase);
        let to_code = to_airport.map(str::to_uppercase);

        let mut query = format!(
            "SELECT {FLIGHT_COLUMNS}, a1.city AS from_city, a2.city AS to_city \
             FROM flights f \
             JOIN airports a1 ON f.from_airport = a1.airport_code \
             JOIN airports a2 ON f.to_airport = a2.airport_code"
        );

        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();
        let mut clauses: Vec<String> = Vec::new();

        if let Some(code) = from_code.as_ref() {
            params.push(code);
            clauses.push(format!("f.from_airport = ${}", params.len()));
        }
        if let Some(code) = to_code.as_ref() {
            params.push(code);
            clauses.push(format!("f.to_airport = ${}", params.len()));
        }

        if !clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&clauses.join(" AND "));
        }
        query.push_str(" ORDER BY f.departure_time");

        let rows = conn.query(query.as_str(), &params).await?;
        rows.iter()
            .map(|r| flight_with_route_from_row(r, false))
            .collect()
    }

    /// Non-cancelled flights on a route, ordered by departure time.
    pub async fn alternatives(
        &self,
        from_airport: &str,
        to_airport: &str,
    ) -> ApiResult<Vec<FlightWithRoute>> {
        let conn = self.get_conn().await?;
        let from_code = from_airport.to_uppercase();
        let to_code = to_airport.to_uppercase();

        let sql = format!(
            "SELECT {FLIGHT_COLUMNS}, a1.city AS from_city, a2.city AS to_city \
             FROM flights f \
             JOIN airports a1 ON f.from_airport = a1.airport_code \
             JOIN airports a2 ON f.to_airport = a2.airport_code \
             WHERE f.from_airport = $1 AND f.to_airport = $2 \
             AND f.status NOT IN ('Cancelled') \
             ORDER BY f.departure_time"
        );
        let rows = conn.query(sql.as_str(), &[&from_code, &to_code]).await?;

        rows.iter()
            .map(|r| flight_with_route_from_row(r, false))
            .collect()
    }

    // ========================================================================
    // AIRPORT QUERIES
    // ========================================================================

    /// Look up one airport by code.
    pub async fn airport_by_code(&self, code: &str) -> ApiResult<Option<Airport>> {
        let conn = self.get_conn().await?;
        let code = code.to_uppercase();

        let row = conn
            .query_opt(
                "SELECT airport_code, name, city, lounges \
                 FROM airports WHERE airport_code = $1",
                &[&code],
            )
            .await?;

        Ok(row.map(|r| airport_from_row(&r)))
    }

    /// All airports ordered by code.
    pub async fn airports_list(&self) -> ApiResult<Vec<Airport>> {
        let conn = self.get_conn().await?;

        let rows = conn
            .query(
                "SELECT airport_code, name, city, lounges \
                 FROM airports ORDER BY airport_code",
                &[],
            )
            .await?;

        Ok(rows.iter().map(airport_from_row).collect())
    }

    // ========================================================================
    // WEATHER QUERIES
    // ========================================================================

    /// Weather at one airport, joined with the airport's name and city.
    pub async fn weather_by_airport(&self, code: &str) -> ApiResult<Option<WeatherReport>> {
        let conn = self.get_conn().await?;
        let code = code.to_uppercase();

        let row = conn
            .query_opt(
                "SELECT w.airport_code, w.temperature, w.condition, w.humidity, w.wind, \
                        a.name AS airport_name, a.city \
                 FROM weather w \
                 JOIN airports a ON w.airport_code = a.airport_code \
                 WHERE w.airport_code = $1",
                &[&code],
            )
            .await?;

        Ok(row.map(|r| weather_report_from_row(&r)))
    }

    /// Weather at all airports, ordered by airport code.
    pub async fn weather_list(&self) -> ApiResult<Vec<WeatherReport>> {
        let conn = self.get_conn().await?;

        let rows = conn
            .query(
                "SELECT w.airport_code, w.temperature, w.condition, w.humidity, w.wind, \
                        a.name AS airport_name, a.city \
                 FROM weather w \
                 JOIN airports a ON w.airport_code = a.airport_code \
                 ORDER BY w.airport_code",
                &[],
            )
            .await?;

        Ok(rows.iter().map(weather_report_from_row).collect())
    }
}

// ============================================================================
// ROW MAPPING
// ============================================================================

fn flight_from_row(row: &Row) -> ApiResult<Flight> {
    let status: String = row.get("status");
    let status = status
        .parse()
        .map_err(|e: String| ApiError::internal_error(e))?;

    Ok(Flight {
        flight_code: row.get("flight_code"),
        airline: row.get("airline"),
        from_airport: row.get("from_airport"),
        to_airport: row.get("to_airport"),
        departure_time: row.get("departure_time"),
        arrival_time: row.get("arrival_time"),
        status,
        gate: row.get("gate"),
        price: row.get("price"),
        delay_minutes: row.get("delay_minutes"),
        delay_reason: row.get("delay_reason"),
    })
}

fn flight_with_route_from_row(row: &Row, with_names: bool) -> ApiResult<FlightWithRoute> {
    Ok(FlightWithRoute {
        flight: flight_from_row(row)?,
        from_name: if with_names { row.get("from_name") } else { None },
        from_city: row.get("from_city"),
        to_name: if with_names { row.get("to_name") } else { None },
        to_city: row.get("to_city"),
    })
}

fn airport_from_row(row: &Row) -> Airport {
    Airport {
        airport_code: row.get("airport_code"),
        name: row.get("name"),
        city: row.get("city"),
        lounges: row.get("lounges"),
    }
}

fn weather_report_from_row(row: &Row) -> WeatherReport {
    WeatherReport {
        weather: Weather {
            airport_code: row.get("airport_code"),
            temperature: row.get("temperature"),
            condition: row.get("condition"),
            humidity: row.get("humidity"),
            wind: row.get("wind"),
        },
        airport_name: row.get("airport_name"),
        city: row.get("city"),
    }
}
