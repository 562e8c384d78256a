//! REST API endpoints for the FeeGateway
//!
//! Fee quotes for single prices and batches, the fixed rate table, and a
//! health check. Errors share one JSON envelope.

use crate::config::GatewayConfig;
use fee_calculator::rates::{BPS_DENOMINATOR, TOTAL_FEE_BPS};
use fee_calculator::{
    calculate_fees, BreakdownLine, FeeBreakdown, FeeComponent, FeeError, PriceBreakdown,
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, warn};
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

/// Maximum accepted request body size in bytes
const MAX_BODY_BYTES: u64 = 64 * 1024;

/// Rejection carrying a status code and an error envelope
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    fn bad_request(code: &str, message: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, body: ErrorResponse::new(code, message, details) }
    }
}

impl From<FeeError> for ApiError {
    fn from(err: FeeError) -> Self {
        Self::bad_request(err.code(), err.to_string(), None)
    }
}

fn reject(err: impl Into<ApiError>) -> Rejection {
    warp::reject::custom(err.into())
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub timestamp: String,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn new(code: &str, message: impl Into<String>, details: Option<serde_json::Value>) -> Self {
        Self {
            error: ErrorDetail { code: code.to_string(), message: message.into(), details },
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Quote query parameters
#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    pub price: f64,
    pub sol_usd: Option<f64>,
}

/// USD values of a quote at the supplied SOL/USD rate
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsdQuote {
    pub rate: f64,
    pub price: f64,
    pub total_fees: f64,
    pub seller_receives: f64,
    pub buyer_total: f64,
}

/// Single quote response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub price: f64,
    pub fees: FeeBreakdown,
    pub buyer_total: f64,
    pub usd: Option<UsdQuote>,
    pub display: Vec<BreakdownLine>,
    pub timestamp: String,
}

impl QuoteResponse {
    fn from_breakdown(breakdown: &PriceBreakdown) -> Self {
        let usd = breakdown.sol_usd_rate.map(|rate| UsdQuote {
            rate,
            price: breakdown.price * rate,
            total_fees: breakdown.fees.total_fees * rate,
            seller_receives: breakdown.fees.seller_receives * rate,
            buyer_total: breakdown.buyer_total * rate,
        });

        Self {
            price: breakdown.price,
            fees: breakdown.fees,
            buyer_total: breakdown.buyer_total,
            usd,
            display: breakdown.lines(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Batch quote request body
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchQuoteRequest {
    pub prices: Vec<f64>,
}

/// Batch quote response
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchQuoteResponse {
    pub quotes: Vec<FeeBreakdown>,
    pub timestamp: String,
}

/// One row of the rate table
#[derive(Debug, Serialize, Deserialize)]
pub struct RateEntry {
    pub component: FeeComponent,
    pub label: String,
    pub bps: u32,
    pub rate: f64,
}

/// Rate table response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTableResponse {
    pub rates: Vec<RateEntry>,
    pub total_bps: u32,
    pub total_rate: f64,
}

/// Build the fixed rate table
pub fn rate_table() -> RateTableResponse {
    RateTableResponse {
        rates: FeeComponent::ALL
            .iter()
            .map(|&component| RateEntry {
                component,
                label: component.label().to_string(),
                bps: component.bps(),
                rate: component.rate(),
            })
            .collect(),
        total_bps: TOTAL_FEE_BPS,
        total_rate: TOTAL_FEE_BPS as f64 / BPS_DENOMINATOR as f64,
    }
}

/// Quote a single listing price
pub async fn get_quote(params: QuoteParams) -> Result<impl Reply, Rejection> {
    let mut breakdown = PriceBreakdown::new(params.price).map_err(reject)?;
    if let Some(rate) = params.sol_usd {
        breakdown = breakdown.with_usd_rate(rate).map_err(reject)?;
    }

    debug!(
        "Quoted price {}: total_fees={}, seller_receives={}",
        breakdown.price, breakdown.fees.total_fees, breakdown.fees.seller_receives
    );

    Ok(warp::reply::json(&QuoteResponse::from_breakdown(&breakdown)))
}

/// Quote a batch of listing prices
pub async fn post_batch_quote(
    request: BatchQuoteRequest,
    config: Arc<GatewayConfig>,
) -> Result<impl Reply, Rejection> {
    let max = config.limits.max_batch_size;

    if request.prices.is_empty() {
        return Err(reject(ApiError::bad_request(
            "INVALID_REQUEST",
            "prices must not be empty",
            None,
        )));
    }

    if request.prices.len() > max {
        return Err(reject(ApiError::bad_request(
            "BATCH_TOO_LARGE",
            format!("batch of {} prices exceeds the limit of {}", request.prices.len(), max),
            Some(serde_json::json!({ "max": max, "received": request.prices.len() })),
        )));
    }

    let quotes = request
        .prices
        .iter()
        .enumerate()
        .map(|(index, &price)| {
            calculate_fees(price).map_err(|err| {
                ApiError::bad_request(
                    err.code(),
                    err.to_string(),
                    Some(serde_json::json!({ "index": index })),
                )
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()
        .map_err(reject)?;

    debug!("Quoted batch of {} prices", quotes.len());

    Ok(warp::reply::json(&BatchQuoteResponse {
        quotes,
        timestamp: chrono::Utc::now().to_rfc3339(),
    }))
}

/// Turn rejections into the JSON error envelope
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, body) = if let Some(api_error) = err.find::<ApiError>() {
        (api_error.status, api_error.body.clone())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, ErrorResponse::new("NOT_FOUND", "Route not found", None))
    } else if let Some(e) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, ErrorResponse::new("INVALID_REQUEST", e.to_string(), None))
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, ErrorResponse::new("INVALID_REQUEST", e.to_string(), None))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            ErrorResponse::new("PAYLOAD_TOO_LARGE", "Request body too large", None),
        )
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ErrorResponse::new(
                "UNSUPPORTED_MEDIA_TYPE",
                "Request body must be application/json",
                None,
            ),
        )
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (
            StatusCode::LENGTH_REQUIRED,
            ErrorResponse::new("LENGTH_REQUIRED", "Content-Length header is required", None),
        )
    } else if let Some(e) = err.find::<warp::filters::cors::CorsForbidden>() {
        (StatusCode::FORBIDDEN, ErrorResponse::new("CORS_FORBIDDEN", e.to_string(), None))
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorResponse::new("METHOD_NOT_ALLOWED", "Method not allowed", None),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("INTERNAL_ERROR", format!("Unhandled rejection: {:?}", err), None),
        )
    };

    warn!("Request rejected with {}: {}", body.error.code, body.error.message);

    Ok(warp::reply::with_status(warp::reply::json(&body), status))
}

/// Create all REST API routes
pub fn create_routes(
    config: Arc<GatewayConfig>,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let config_filter = warp::any().map(move || config.clone());

    // Single quote endpoint
    let quote = warp::path("api")
        .and(warp::path("fees"))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<QuoteParams>())
        .and_then(get_quote);

    // Batch quote endpoint
    let batch = warp::path("api")
        .and(warp::path("fees"))
        .and(warp::path("batch"))
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::json())
        .and(config_filter)
        .and_then(post_batch_quote);

    // Rate table endpoint
    let rates = warp::path("api")
        .and(warp::path("fees"))
        .and(warp::path("rates"))
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::json(&rate_table()));

    // Health check endpoint
    let health = warp::path("health").and(warp::path::end()).and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    });

    quote
        .or(batch)
        .or(rates)
        .or(health)
        .with(
            warp::cors()
                .allow_any_origin()
                .allow_headers(vec!["content-type"])
                .allow_methods(vec!["GET", "POST", "OPTIONS"]),
        )
        .recover(handle_rejection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn routes() -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
        create_routes(Arc::new(GatewayConfig::default()))
    }

    fn body_json(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn test_quote_unit_price() {
        let response =
            warp::test::request().method("GET").path("/api/fees?price=1").reply(&routes()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.body());
        let fees = &json["fees"];
        assert!((fees["totalFees"].as_f64().unwrap() - 0.095).abs() < 1e-9);
        assert!((fees["sellerReceives"].as_f64().unwrap() - 0.905).abs() < 1e-9);
        assert!((json["buyerTotal"].as_f64().unwrap() - 1.095).abs() < 1e-9);
        assert!(json["usd"].is_null());
        assert_eq!(json["display"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_quote_with_usd_rate() {
        let response = warp::test::request()
            .method("GET")
            .path("/api/fees?price=1.23&sol_usd=200")
            .reply(&routes())
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.body());
        assert!((json["usd"]["buyerTotal"].as_f64().unwrap() - 269.37).abs() < 1e-9);
        assert_eq!(json["display"][7]["sol"], "1.347 SOL");
        assert_eq!(json["display"][7]["usd"], "$269.37");
    }

    #[tokio::test]
    async fn test_quote_rejects_negative_price() {
        let response =
            warp::test::request().method("GET").path("/api/fees?price=-5").reply(&routes()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response.body())["error"]["code"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_quote_rejects_non_finite_price() {
        let response =
            warp::test::request().method("GET").path("/api/fees?price=NaN").reply(&routes()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response.body())["error"]["code"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_quote_rejects_overflowing_totals() {
        let response =
            warp::test::request().method("GET").path("/api/fees?price=1.7e308").reply(&routes()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response.body())["error"]["code"], "INVALID_ARGUMENT");

        let response = warp::test::request()
            .method("GET")
            .path("/api/fees?price=1e10&sol_usd=1e300")
            .reply(&routes())
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response.body())["error"]["code"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_batch_rejects_non_json_body() {
        let response = warp::test::request()
            .method("POST")
            .path("/api/fees/batch")
            .header("content-type", "application/x-www-form-urlencoded")
            .body("prices=1")
            .reply(&routes())
            .await;

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body_json(response.body())["error"]["code"], "UNSUPPORTED_MEDIA_TYPE");
    }

    #[tokio::test]
    async fn test_batch_requires_content_length() {
        let response =
            warp::test::request().method("POST").path("/api/fees/batch").reply(&routes()).await;

        assert_eq!(response.status(), StatusCode::LENGTH_REQUIRED);
        assert_eq!(body_json(response.body())["error"]["code"], "LENGTH_REQUIRED");
    }

    #[tokio::test]
    async fn test_preflight_with_disallowed_header() {
        let response = warp::test::request()
            .method("OPTIONS")
            .path("/api/fees/batch")
            .header("origin", "https://primos.example")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "authorization")
            .reply(&routes())
            .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response.body())["error"]["code"], "CORS_FORBIDDEN");
    }

    #[tokio::test]
    async fn test_quote_rejects_bad_rate() {
        let response = warp::test::request()
            .method("GET")
            .path("/api/fees?price=1&sol_usd=0")
            .reply(&routes())
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response.body())["error"]["code"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_quote_missing_price() {
        let response = warp::test::request().method("GET").path("/api/fees").reply(&routes()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response.body())["error"]["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_batch_quote() {
        let response = warp::test::request()
            .method("POST")
            .path("/api/fees/batch")
            .json(&serde_json::json!({ "prices": [0.08, 100.0] }))
            .reply(&routes())
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.body());
        let quotes = json["quotes"].as_array().unwrap();
        assert_eq!(quotes.len(), 2);
        assert!((quotes[0]["totalFees"].as_f64().unwrap() - 0.0076).abs() < 1e-9);
        assert!((quotes[0]["sellerReceives"].as_f64().unwrap() - 0.0724).abs() < 1e-9);
        assert!((quotes[1]["sellerReceives"].as_f64().unwrap() - 90.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_batch_reports_invalid_index() {
        let response = warp::test::request()
            .method("POST")
            .path("/api/fees/batch")
            .json(&serde_json::json!({ "prices": [1.0, -2.0] }))
            .reply(&routes())
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response.body());
        assert_eq!(json["error"]["code"], "INVALID_ARGUMENT");
        assert_eq!(json["error"]["details"]["index"], 1);
    }

    #[tokio::test]
    async fn test_batch_limits() {
        let mut config = GatewayConfig::default();
        config.limits.max_batch_size = 2;
        let routes = create_routes(Arc::new(config));

        let too_large = warp::test::request()
            .method("POST")
            .path("/api/fees/batch")
            .json(&serde_json::json!({ "prices": [1.0, 2.0, 3.0] }))
            .reply(&routes)
            .await;
        assert_eq!(too_large.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(too_large.body())["error"]["code"], "BATCH_TOO_LARGE");

        let empty = warp::test::request()
            .method("POST")
            .path("/api/fees/batch")
            .json(&serde_json::json!({ "prices": [] }))
            .reply(&routes)
            .await;
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(empty.body())["error"]["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_rate_table() {
        let response =
            warp::test::request().method("GET").path("/api/fees/rates").reply(&routes()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response.body());
        assert_eq!(json["totalBps"], 950);
        assert_eq!(json["rates"].as_array().unwrap().len(), 4);
        assert_eq!(json["rates"][1]["component"], "creatorRoyalty");
        assert_eq!(json["rates"][1]["bps"], 500);
    }

    #[tokio::test]
    async fn test_health_and_unknown_route() {
        let health = warp::test::request().method("GET").path("/health").reply(&routes()).await;
        assert_eq!(health.status(), StatusCode::OK);
        assert_eq!(body_json(health.body())["status"], "healthy");

        let missing = warp::test::request().method("GET").path("/api/nope").reply(&routes()).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(missing.body())["error"]["code"], "NOT_FOUND");
    }
}
