mod electrical_meters;
mod energy_producers;
mod error;
mod factories;
mod invoices;
mod meter_readings;

pub use error::ApiError;

use axum::extract::State;
use axum::routing::get;
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub price_per_kwh: f64,
    pub metrics: Option<PrometheusHandle>,
}

/// `skip`/`limit` query parameters accepted by every list endpoint.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

pub fn router(state: AppState) -> Router {
    // matchit requires one parameter name per segment position, so the
    // first segment under /invoices and /meter-readings is always ":uid"
    // even on the routes where it carries a year.
    Router::new()
        .route("/", get(welcome))
        .route("/metrics", get(render_metrics))
        .route(
            "/energy-producers",
            get(energy_producers::list).post(energy_producers::create),
        )
        .route("/energy-producers/:uid", get(energy_producers::by_uid))
        .route(
            "/energy-producers/:uid/factories",
            get(energy_producers::factories),
        )
        .route(
            "/energy-producers/:uid/invoices",
            get(energy_producers::invoices),
        )
        .route(
            "/energy-producers/:uid/invoices/:year/:month",
            get(energy_producers::invoices_at_period),
        )
        .route("/factories", get(factories::list).post(factories::create))
        .route("/factories/:uid", get(factories::by_uid))
        .route(
            "/factories/:uid/electrical-meters",
            get(factories::electrical_meters),
        )
        .route("/factories/:uid/invoices", get(factories::invoices))
        .route(
            "/factories/:uid/invoices/:year/:month",
            get(factories::invoice_at_period),
        )
        .route(
            "/electrical-meters",
            get(electrical_meters::list).post(electrical_meters::create),
        )
        .route("/electrical-meters/:uid", get(electrical_meters::by_uid))
        .route(
            "/electrical-meters/:uid/readings",
            get(electrical_meters::readings),
        )
        .route(
            "/meter-readings",
            get(meter_readings::list).post(meter_readings::create),
        )
        .route("/meter-readings/:uid", get(meter_readings::by_uid))
        .route("/meter-readings/:uid/:month", get(meter_readings::by_month))
        .route(
            "/meter-readings/:uid/:month/:day",
            get(meter_readings::by_day),
        )
        .route("/invoices", get(invoices::list))
        .route("/invoices/:uid", get(invoices::by_uid))
        .route("/invoices/:uid/:month", get(invoices::by_period))
        .with_state(state)
}

async fn welcome() -> &'static str {
    "Hello, this is the energy billing API"
}

async fn render_metrics(State(state): State<AppState>) -> String {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_to_first_hundred() {
        let page: Pagination = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(page.skip, 0);
        assert_eq!(page.limit, 100);
    }

    #[test]
    fn pagination_accepts_explicit_values() {
        let page: Pagination =
            serde_json::from_value(serde_json::json!({ "skip": 10, "limit": 5 })).unwrap();
        assert_eq!(page.skip, 10);
        assert_eq!(page.limit, 5);
    }
}
