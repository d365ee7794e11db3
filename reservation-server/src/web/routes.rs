//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::domain::{InvalidClass, ReservationId, TrainClass, UserId};
use crate::service::{BookingRequest, ReservationError, SearchQuery, SeatQuery};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/fares/distance", get(distance_fares))
        .route("/api/train/search", get(search_trains))
        .route("/api/train/seats", get(train_seats))
        .route("/api/train/reserve", post(reserve))
        .route("/api/user/reservations", get(user_reservations))
        .route("/api/user/reservations/:id", get(user_reservation))
        .route("/api/user/reservations/:id/cancel", post(cancel_reservation))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Every station, ordered by id.
async fn list_stations(State(state): State<AppState>) -> Json<StationListResponse> {
    Json(StationListResponse {
        stations: state.service.directory().stations().to_vec(),
    })
}

/// Distance fare bands, ordered by threshold.
async fn distance_fares(State(state): State<AppState>) -> Json<Vec<DistanceFareResult>> {
    let bands = state
        .service
        .fare_table()
        .bands()
        .iter()
        .map(|b| DistanceFareResult {
            distance: b.distance,
            fare: b.fare,
        })
        .collect();
    Json(bands)
}

fn parse_train_class(s: &str) -> Result<TrainClass, AppError> {
    s.parse().map_err(|e: InvalidClass| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Date of a timestamp in the service time zone.
fn service_date(use_at: &str, offset: &FixedOffset) -> Result<NaiveDate, AppError> {
    let at = DateTime::parse_from_rfc3339(use_at).map_err(|e| AppError::BadRequest {
        message: format!("Invalid use_at {use_at:?}: {e}"),
    })?;
    Ok(at.with_timezone(offset).date_naive())
}

/// Runs between two stations with availability and fares.
async fn search_trains(
    State(state): State<AppState>,
    Query(req): Query<TrainSearchRequest>,
) -> Result<Json<Vec<TrainSearchResult>>, AppError> {
    let train_class = req
        .train_class
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(parse_train_class)
        .transpose()?;

    let query = SearchQuery {
        date: service_date(&req.use_at, &state.utc_offset)?,
        from: req.from,
        to: req.to,
        train_class,
    };

    let results = state.service.search(&query).await?;
    Ok(Json(results.into_iter().map(TrainSearchResult::from).collect()))
}

/// Seat map of one car with occupancy for a segment.
async fn train_seats(
    State(state): State<AppState>,
    Query(req): Query<TrainSeatsRequest>,
) -> Result<Json<CarResponse>, AppError> {
    let query = SeatQuery {
        date: req.date,
        train_class: parse_train_class(&req.train_class)?,
        train_name: req.train_name,
        car_number: req.car_number,
        from: req.from,
        to: req.to,
    };

    let car = state.service.seats(&query).await?;
    Ok(Json(CarResponse::from(car)))
}

/// Reserve seats.
async fn reserve(
    State(state): State<AppState>,
    Json(req): Json<ReserveRequest>,
) -> Result<(StatusCode, Json<ReservationResult>), AppError> {
    let request = BookingRequest {
        user_id: UserId(req.user_id),
        date: req.date,
        train_class: parse_train_class(&req.train_class)?,
        train_name: req.train_name,
        departure: req.departure,
        arrival: req.arrival,
        seats: req.seats,
        payment_id: req.payment_id,
    };

    let booking = state.service.reserve(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReservationResult::from_reservation(
            booking.reservation,
            Some(booking.fare),
        )),
    ))
}

/// Every reservation of a user.
async fn user_reservations(
    State(state): State<AppState>,
    Query(user): Query<UserQuery>,
) -> Result<Json<ReservationListResponse>, AppError> {
    let reservations = state.service.user_reservations(UserId(user.user_id)).await?;
    Ok(Json(ReservationListResponse {
        reservations: reservations
            .into_iter()
            .map(|r| ReservationResult::from_reservation(r, None))
            .collect(),
    }))
}

/// One reservation of a user.
async fn user_reservation(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(user): Query<UserQuery>,
) -> Result<Json<ReservationResult>, AppError> {
    let reservation = state
        .service
        .reservation(ReservationId(id), UserId(user.user_id))
        .await?;
    Ok(Json(ReservationResult::from_reservation(reservation, None)))
}

/// Cancel a reservation of a user.
async fn cancel_reservation(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(user): Json<UserQuery>,
) -> Result<Json<ReservationResult>, AppError> {
    let reservation = state
        .service
        .cancel(ReservationId(id), UserId(user.user_id))
        .await?;
    Ok(Json(ReservationResult::from_reservation(reservation, None)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl From<ReservationError> for AppError {
    fn from(e: ReservationError) -> Self {
        match e {
            ReservationError::NotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            ReservationError::InvalidSegment(_) | ReservationError::InvalidRequest(_) => {
                AppError::BadRequest {
                    message: e.to_string(),
                }
            }
            ReservationError::Conflict { .. } => AppError::Conflict {
                message: e.to_string(),
            },
            ReservationError::Consistency(_) | ReservationError::Storage(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Conflict { message } => (StatusCode::CONFLICT, message),
            AppError::Internal { message } => {
                // Details stay in the log
                error!(%message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
