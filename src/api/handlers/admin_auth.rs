use crate::service::{error_response, CredentialService, CredentialSummary, ErrorBody};
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::{error, instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthAction {
    #[default]
    Login,
    Signup,
}

/// Request body for `POST /admin/auth`.
#[derive(ToSchema, Deserialize)]
pub struct AdminAuthRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    action: AuthAction,
    /// Only used on signup; defaults to the email local part.
    #[serde(default)]
    name: Option<String>,
}

impl std::fmt::Debug for AdminAuthRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuthRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .field("action", &self.action)
            .field("name", &self.name)
            .finish()
    }
}

/// A parsed request, one variant per action.
#[derive(Debug)]
pub enum AuthCommand {
    Login {
        email: String,
        password: SecretString,
    },
    Signup {
        email: String,
        password: SecretString,
        name: Option<String>,
    },
}

impl From<AdminAuthRequest> for AuthCommand {
    fn from(request: AdminAuthRequest) -> Self {
        let password = SecretString::from(request.password);
        match request.action {
            AuthAction::Login => Self::Login {
                email: request.email,
                password,
            },
            AuthAction::Signup => Self::Signup {
                email: request.email,
                password,
                name: request.name,
            },
        }
    }
}

#[utoipa::path(
    post,
    path = "/admin/auth",
    request_body = AdminAuthRequest,
    responses (
        (status = 200, description = "Login or signup successful", body = [CredentialSummary], content_type = "application/json"),
        (status = 400, description = "Malformed request, missing fields or email already in use", body = ErrorBody),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 500, description = "Password hashing, insert or lookup failure", body = ErrorBody),
    ),
    tag = "auth"
)]
#[instrument(skip(service, payload))]
pub async fn admin_auth(
    service: Extension<CredentialService>,
    payload: Result<Json<AdminAuthRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            error!("Invalid request body: {}", rejection.body_text());

            return error_response(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    let result = match AuthCommand::from(request) {
        AuthCommand::Login { email, password } => service.login(&email, &password).await,
        AuthCommand::Signup {
            email,
            password,
            name,
        } => service.signup(&email, &password, name.as_deref()).await,
    };

    match result {
        Ok(summary) => (StatusCode::OK, Json(vec![summary])).into_response(),
        Err(e) => e.into_response(),
    }
}
