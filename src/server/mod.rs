//! HTTP API over the planner.

use crate::{core::TravelPlanner, error::PlannerError, types::TripRequest};
use serde_json::{json, Value};
use std::{convert::Infallible, sync::Arc};
use tracing::{error, info};
use warp::{
    http::StatusCode,
    hyper::body::Bytes,
    reply::{self, Response},
    Filter, Rejection, Reply,
};

const PLAN_FAILED: &str = "plan generation failed";

pub fn routes(
    planner: Arc<TravelPlanner>,
) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
    let index = warp::path::end().and(warp::get()).map(|| {
        reply::json(&json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "routes": ["GET /", "GET /health", "POST /plan", "POST /weather"],
            "request_schema": schemars::schema_for!(TripRequest),
        }))
    });

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| reply::json(&json!({ "status": "healthy" })));

    let plan = warp::path("plan")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::bytes())
        .and(with_planner(planner.clone()))
        .and_then(handle_plan);

    let weather = warp::path("weather")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::bytes())
        .and(with_planner(planner))
        .and_then(handle_weather);

    index.or(health).or(plan).or(weather)
}

fn with_planner(
    planner: Arc<TravelPlanner>,
) -> impl Filter<Extract = (Arc<TravelPlanner>,), Error = Infallible> + Clone {
    warp::any().map(move || planner.clone())
}

async fn handle_plan(body: Bytes, planner: Arc<TravelPlanner>) -> Result<Response, Infallible> {
    let trip = match validated(&body) {
        Ok(trip) => trip,
        Err(response) => return Ok(response),
    };
    info!(destination = %trip.destination, "plan request received");

    Ok(match planner.generate_plan(&trip).await {
        Ok(plan) => reply::json(&plan).into_response(),
        Err(err) => pipeline_failure(&err),
    })
}

async fn handle_weather(
    body: Bytes,
    planner: Arc<TravelPlanner>,
) -> Result<Response, Infallible> {
    let trip = match validated(&body) {
        Ok(trip) => trip,
        Err(response) => return Ok(response),
    };
    info!(destination = %trip.destination, "weather request received");

    Ok(match planner.generate_weather_only(&trip).await {
        Ok(report) => reply::json(&report).into_response(),
        Err(err) => pipeline_failure(&err),
    })
}

/// Parse and validate a trip request body; any problem becomes a 400.
fn validated(body: &[u8]) -> std::result::Result<TripRequest, Response> {
    let bad_request = |err: PlannerError| {
        reply::with_status(reply::json(&err.to_error_payload()), StatusCode::BAD_REQUEST)
            .into_response()
    };

    let payload: Value = serde_json::from_slice(body).map_err(|err| {
        bad_request(PlannerError::InvalidRequest(format!(
            "request body is not valid JSON: {err}"
        )))
    })?;
    let trip = TripRequest::from_value(&payload);
    trip.validate().map_err(bad_request)?;
    Ok(trip)
}

fn pipeline_failure(err: &PlannerError) -> Response {
    error!(code = err.error_code(), "request failed: {}", err);
    let body = json!({
        "error": {
            "code": err.error_code(),
            "message": PLAN_FAILED,
            "details": err.to_string(),
        }
    });
    reply::with_status(reply::json(&body), StatusCode::INTERNAL_SERVER_ERROR).into_response()
}

/// Serve until the process exits
pub async fn serve(planner: Arc<TravelPlanner>, port: u16) {
    let routes = routes(planner).with(warp::log("trip_agent::server"));
    info!("Server listening on {}", port);
    warp::serve(routes).run(([0, 0, 0, 0], port)).await;
}
