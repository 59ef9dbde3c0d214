use axum::{http::StatusCode, response::IntoResponse, Json};
use bikeshare::RequestError;
use model::{journey::Journey, station::Station, WithId};

pub type RouteResult<O> = Result<O, RouteErrorResponse>;

/// Successful outcome of a dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Station(WithId<Station>),
    Stations(Vec<WithId<Station>>),
    Journeys(Vec<Journey>),
    StationCreated,
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            Self::Station(station) => Json(station).into_response(),
            Self::Stations(stations) => Json(stations).into_response(),
            Self::Journeys(journeys) => Json(journeys).into_response(),
            Self::StationCreated => {
                (StatusCode::OK, "new station added successfully!").into_response()
            }
        }
    }
}

// - Error responses -

/// An error as returned to the caller: plain text, or a JSON array when
/// there are several validation messages.
#[derive(Debug, Clone)]
pub struct RouteErrorResponse {
    pub status_code: StatusCode,
    pub message: Option<String>,
    pub validation_errors: Option<Vec<String>>,
}

impl RouteErrorResponse {
    pub fn new(status_code: StatusCode) -> Self {
        Self {
            status_code,
            message: None,
            validation_errors: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_validation_errors(mut self, errors: Vec<String>) -> Self {
        self.validation_errors = Some(errors);
        self
    }
}

impl From<RequestError> for RouteErrorResponse {
    fn from(value: RequestError) -> Self {
        let status_code = match &value {
            RequestError::Validation(_) | RequestError::UnknownResource(_) => {
                StatusCode::BAD_REQUEST
            }
            RequestError::Conflicts(errors) => {
                return Self::new(StatusCode::BAD_REQUEST)
                    .with_validation_errors(errors.clone())
            }
            RequestError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            RequestError::NotFound(_) => StatusCode::NOT_FOUND,
            RequestError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            RequestError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status_code).with_message(value.to_string())
    }
}

impl IntoResponse for RouteErrorResponse {
    fn into_response(self) -> axum::response::Response {
        match (self.validation_errors, self.message) {
            (Some(errors), _) => (self.status_code, Json(errors)).into_response(),
            (None, Some(message)) => (self.status_code, message).into_response(),
            (None, None) => self.status_code.into_response(),
        }
    }
}
