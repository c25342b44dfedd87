use std::borrow::Cow;

use axum::extract::rejection::QueryRejection;
use axum::response::IntoResponse;
use axum::Json;
use hyper::StatusCode;

use crate::lookup::{LookupError, LookupErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct ApiErrorCode(pub u16);

impl ApiErrorCode {
	/// The requested route does not exist.
	pub const ROUTE_NOT_FOUND: Self = Self(404);
	/// The requested game slug does not exist.
	pub const UNKNOWN_GAME: Self = Self(1000);
	/// Username, tag or platform failed validation.
	pub const INVALID_QUERY: Self = Self(1001);
	/// TRN answered but had no profile for the player.
	pub const PLAYER_NOT_FOUND: Self = Self(2000);
	/// TRN answered with a non-success status.
	pub const UPSTREAM_ERROR: Self = Self(3000);
	/// TRN could not be reached.
	pub const UPSTREAM_UNAVAILABLE: Self = Self(3001);
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiError {
	#[serde(skip)]
	pub status_code: StatusCode,
	pub status: Cow<'static, str>,
	pub error_code: ApiErrorCode,
	pub error: Cow<'static, str>,
}

impl ApiError {
	pub fn new(status_code: StatusCode, error_code: ApiErrorCode, error: impl Into<Cow<'static, str>>) -> Self {
		Self {
			status_code,
			status: status_code.canonical_reason().unwrap_or("unknown").into(),
			error_code,
			error: error.into(),
		}
	}

	pub fn bad_request(error_code: ApiErrorCode, error: impl Into<Cow<'static, str>>) -> Self {
		Self::new(StatusCode::BAD_REQUEST, error_code, error)
	}

	pub fn not_found(error_code: ApiErrorCode, error: impl Into<Cow<'static, str>>) -> Self {
		Self::new(StatusCode::NOT_FOUND, error_code, error)
	}

	pub fn internal_server_error(error_code: ApiErrorCode, error: impl Into<Cow<'static, str>>) -> Self {
		Self::new(StatusCode::INTERNAL_SERVER_ERROR, error_code, error)
	}
}

/// Provider statuses are forwarded verbatim; a network failure is a 500.
impl From<LookupError> for ApiError {
	fn from(e: LookupError) -> Self {
		let upstream_status = e
			.status
			.and_then(|s| StatusCode::from_u16(s).ok())
			.filter(|s| s.is_client_error() || s.is_server_error());

		match e.kind {
			LookupErrorKind::ValidationFailed => Self::bad_request(ApiErrorCode::INVALID_QUERY, e.message),
			LookupErrorKind::NotFound => Self::not_found(ApiErrorCode::PLAYER_NOT_FOUND, e.message),
			LookupErrorKind::UpstreamError => Self::new(
				upstream_status.unwrap_or(StatusCode::BAD_GATEWAY),
				ApiErrorCode::UPSTREAM_ERROR,
				e.message,
			),
			LookupErrorKind::NetworkFailure => {
				Self::internal_server_error(ApiErrorCode::UPSTREAM_UNAVAILABLE, e.message)
			}
		}
	}
}

impl From<QueryRejection> for ApiError {
	fn from(rejection: QueryRejection) -> Self {
		Self::bad_request(ApiErrorCode::INVALID_QUERY, rejection.body_text())
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> axum::http::Response<axum::body::Body> {
		(self.status_code, Json(self)).into_response()
	}
}
