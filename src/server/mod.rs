//! HTTP surface: maps [`QueryService`] results to JSON and HTML responses.

pub mod error;

use crate::data_store::DataStore;
use crate::query::{PrecipitationByDate, QueryError, QueryService, API_PREFIX};
use crate::types::readings::TemperatureSummary;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use error::ApiError;
use log::info;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task;

type SharedService<S> = State<Arc<QueryService<S>>>;

/// Builds the router for every API route over a shared service.
pub fn router<S: DataStore + 'static>(service: Arc<QueryService<S>>) -> Router {
    Router::new()
        .route("/", get(welcome::<S>))
        .route(&format!("{}/precipitation", API_PREFIX), get(precipitation::<S>))
        .route(&format!("{}/stations", API_PREFIX), get(stations::<S>))
        .route(&format!("{}/tobs", API_PREFIX), get(tobs::<S>))
        .route(&format!("{}/:start", API_PREFIX), get(stats_from::<S>))
        .route(&format!("{}/:start/:end", API_PREFIX), get(stats_between::<S>))
        .with_state(service)
}

/// Serves the router on `listener` until `shutdown` resolves.
pub async fn serve<S, F>(
    listener: TcpListener,
    service: Arc<QueryService<S>>,
    shutdown: F,
) -> std::io::Result<()>
where
    S: DataStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Runs a query on the blocking pool; Polars collects are CPU-bound.
async fn run_query<S, T, F>(service: Arc<QueryService<S>>, query: F) -> Result<T, ApiError>
where
    S: DataStore + 'static,
    T: Send + 'static,
    F: FnOnce(&QueryService<S>) -> Result<T, QueryError> + Send + 'static,
{
    Ok(task::spawn_blocking(move || query(&service)).await??)
}

fn welcome_page(routes: &[String]) -> String {
    let escaped: Vec<String> = routes
        .iter()
        .map(|route| route.replace('<', "&lt;").replace('>', "&gt;"))
        .collect();
    format!("Available Routes:<br/>{}", escaped.join("<br/>"))
}

async fn welcome<S: DataStore + 'static>(State(service): SharedService<S>) -> Html<String> {
    Html(welcome_page(&service.list_routes()))
}

async fn precipitation<S: DataStore + 'static>(
    State(service): SharedService<S>,
) -> Result<Json<PrecipitationByDate>, ApiError> {
    Ok(Json(run_query(service, |s| s.precipitation()).await?))
}

async fn stations<S: DataStore + 'static>(
    State(service): SharedService<S>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(run_query(service, |s| s.stations()).await?))
}

async fn tobs<S: DataStore + 'static>(
    State(service): SharedService<S>,
) -> Result<Json<Vec<f64>>, ApiError> {
    Ok(Json(run_query(service, |s| s.temperature_observations()).await?))
}

async fn stats_from<S: DataStore + 'static>(
    State(service): SharedService<S>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    Ok(Json(run_query(service, move |s| s.stats(&start, None)).await?))
}

async fn stats_between<S: DataStore + 'static>(
    State(service): SharedService<S>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureSummary>, ApiError> {
    Ok(Json(
        run_query(service, move |s| s.stats(&start, Some(&end))).await?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{empty_store, fixture_store};
    use crate::FrameStore;
    use reqwest::StatusCode;
    use serde_json::{json, Value};

    /// Starts the router on an ephemeral port and returns its base URL.
    async fn spawn_server(store: FrameStore) -> String {
        let service = Arc::new(QueryService::new(store).unwrap());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, service, std::future::pending()));
        format!("http://{}", addr)
    }

    async fn get_json(url: &str) -> (StatusCode, Value) {
        let response = reqwest::get(url).await.unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    #[test]
    fn test_welcome_page_escapes_templates() {
        let page = welcome_page(&crate::list_routes());
        assert_eq!(
            page,
            "Available Routes:<br/>/api/v1.0/precipitation<br/>/api/v1.0/stations<br/>\
             /api/v1.0/tobs<br/>/api/v1.0/&lt;start&gt;<br/>/api/v1.0/&lt;start&gt;/&lt;end&gt;"
        );
    }

    #[tokio::test]
    async fn test_welcome_route_serves_html() {
        let base = spawn_server(fixture_store()).await;
        let response = reqwest::get(format!("{}/", base)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
        assert!(response.text().await.unwrap().starts_with("Available Routes:<br/>"));
    }

    #[tokio::test]
    async fn test_precipitation_route() {
        let base = spawn_server(fixture_store()).await;
        let (status, body) = get_json(&format!("{}/api/v1.0/precipitation", base)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["2017-01-01"], json!(0.3));
        assert_eq!(body["2017-01-15"], Value::Null);
        assert!(body.get("2016-08-22").is_none());
        assert_eq!(body.as_object().unwrap().len(), 7);
    }

    #[tokio::test]
    async fn test_stations_route() {
        let base = spawn_server(fixture_store()).await;
        let (status, body) = get_json(&format!("{}/api/v1.0/stations", base)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!(["USC00519397", "USC00513117", "USC00519281", "USC00518838"])
        );
    }

    #[tokio::test]
    async fn test_tobs_route() {
        let base = spawn_server(fixture_store()).await;
        let (status, body) = get_json(&format!("{}/api/v1.0/tobs", base)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([62.0, 66.0, 76.0, 79.0]));
    }

    #[tokio::test]
    async fn test_stats_routes() {
        let base = spawn_server(fixture_store()).await;

        let (status, body) = get_json(&format!("{}/api/v1.0/2017-08-01", base)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"TMIN": 76.0, "TAVG": 77.5, "TMAX": 79.0}));

        let (status, body) =
            get_json(&format!("{}/api/v1.0/2017-01-01/2017-01-31", base)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["TMIN"], json!(60.0));
        assert_eq!(body["TMAX"], json!(70.0));

        let (status, body) = get_json(&format!("{}/api/v1.0/2020-01-01", base)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"TMIN": null, "TAVG": null, "TMAX": null}));
    }

    #[tokio::test]
    async fn test_invalid_date_is_bad_request() {
        let base = spawn_server(fixture_store()).await;
        let (status, body) = get_json(&format!("{}/api/v1.0/not-a-date", base)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("not-a-date"));

        let (status, _) = get_json(&format!("{}/api/v1.0/2017-01-01/2017-1-x", base)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_empty_dataset_is_service_unavailable() {
        let base = spawn_server(empty_store()).await;
        let (status, body) = get_json(&format!("{}/api/v1.0/precipitation", base)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].is_string());

        let (status, _) = get_json(&format!("{}/api/v1.0/tobs", base)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        // Stations and stats do not depend on a max date.
        let (status, _) = get_json(&format!("{}/api/v1.0/stations", base)).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = get_json(&format!("{}/api/v1.0/2017-01-01", base)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["TMIN"], Value::Null);
    }
}
