use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use snafu::Snafu;
use std::num::ParseIntError;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse IP port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("Unable to parse `{}` as a number: {:?}", name, original))]
    ParseNumber {
        source: ParseIntError,
        name: &'static str,
        original: String,
    },
    #[snafu(display("Unable to listen on {}", address))]
    BindListener {
        source: std::io::Error,
        address: String,
    },
    #[snafu(display("Error serving app"))]
    Serve { source: std::io::Error },
    #[snafu(display("Student not found with id: {}", id))]
    MissingStudent { id: i64 },
    #[snafu(display("No student ids left after {}", last))]
    IdsExhausted { last: i64 },
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl RosterError {
    #[allow(clippy::match_same_arms)]
    pub fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found

        match self {
            Self::MissingStudent { .. } => NF,
            Self::MakeQuery { .. } | Self::IdsExhausted { .. } => ISE,
            Self::OpenDatabase { .. } | Self::MigrateError { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParsePort { .. } | Self::ParseNumber { .. } => ISE,
            Self::BindListener { .. } | Self::Serve { .. } => ISE,
        }
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            debug!(%self, "Request failed");
        }

        (
            status_code,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
