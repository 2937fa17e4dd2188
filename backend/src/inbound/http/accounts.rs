//! Account API handlers.
//!
//! ```text
//! POST /registration {"fullName":"Some Full Name","phoneNumber":"+62821232342","password":"SawitPro123$"}
//! POST /login {"phoneNumber":"+62821232342","password":"SawitPro123$"}
//! GET /profile            (Authorization: Bearer <jwt>)
//! PATCH /profile {"fullName":"New Name"}
//! ```
//!
//! Bodies are decoded by hand rather than through `web::Json` so malformed
//! payloads produce the envelope's "Bad request" failure, and so the profile
//! update can reject a missing session before looking at the body.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{HttpRequest, HttpResponse, get, patch, post, web};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::domain::validation::messages;
use crate::domain::{
    Error, LoginCredentials, LoginOutcome, Profile, ProfileUpdateRequest, RegistrationRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{Envelope, HeaderOnly};
use crate::inbound::http::state::HttpState;

/// Body for `POST /registration`. Missing keys decode as empty strings.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationBody {
    #[schema(example = "Some Full Name")]
    pub full_name: String,
    #[schema(example = "+62821232342")]
    pub phone_number: String,
    #[schema(example = "SawitPro123$")]
    pub password: String,
}

impl From<RegistrationBody> for RegistrationRequest {
    fn from(value: RegistrationBody) -> Self {
        Self::new(value.full_name, value.phone_number, value.password)
    }
}

/// Body for `POST /login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginBody {
    #[schema(example = "+62821232342")]
    pub phone_number: String,
    #[schema(example = "SawitPro123$")]
    pub password: String,
}

impl From<LoginBody> for LoginCredentials {
    fn from(value: LoginBody) -> Self {
        Self::new(value.phone_number, value.password)
    }
}

/// Body for `PATCH /profile`. Absent or empty fields are left unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdateBody {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
}

impl From<ProfileUpdateBody> for ProfileUpdateRequest {
    fn from(value: ProfileUpdateBody) -> Self {
        Self {
            full_name: value.full_name,
            phone_number: value.phone_number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct RegistrationData {
    #[schema(example = 1)]
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct LoginData {
    #[schema(example = 1)]
    pub id: i64,
    pub jwt: String,
}

impl From<LoginOutcome> for LoginData {
    fn from(value: LoginOutcome) -> Self {
        Self {
            id: value.user_id.get(),
            jwt: value.token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    #[schema(example = "Some Full Name")]
    pub full_name: String,
    #[schema(example = "+62821232342")]
    pub phone_number: String,
}

impl From<Profile> for ProfileData {
    fn from(value: Profile) -> Self {
        Self {
            full_name: value.full_name,
            phone_number: value.phone_number,
        }
    }
}

fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(body).map_err(|err| {
        warn!(error = %err, "request body rejected");
        Error::invalid_request(messages::BAD_REQUEST)
    })
}

/// Raw `Authorization` value, if present and ASCII.
fn authorization(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/registration",
    request_body = RegistrationBody,
    responses(
        (status = 200, description = "User registered", body = Envelope<RegistrationData>),
        (status = 400, description = "Malformed body or validation failure", body = HeaderOnly),
        (status = 500, description = "Internal server error", body = HeaderOnly)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/registration")]
pub async fn register(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let payload: RegistrationBody = decode_json(&body)?;
    let id = state.accounts.register(payload.into()).await?;
    Ok(Envelope::ok(
        messages::REGISTERED,
        RegistrationData { id: id.get() },
    ))
}

/// Exchange a phone number and password for a session token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = Envelope<LoginData>),
        (status = 400, description = "Malformed body or rejected credentials", body = HeaderOnly),
        (status = 500, description = "Internal server error", body = HeaderOnly)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(state: web::Data<HttpState>, body: web::Bytes) -> ApiResult<HttpResponse> {
    let payload: LoginBody = decode_json(&body)?;
    let outcome = state.accounts.login(payload.into()).await?;
    Ok(Envelope::ok(messages::LOGGED_IN, LoginData::from(outcome)))
}

/// Read the caller's profile.
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile", body = Envelope<ProfileData>),
        (status = 403, description = "Missing, expired or invalid session", body = HeaderOnly),
        (status = 500, description = "Internal server error", body = HeaderOnly)
    ),
    tags = ["accounts"],
    operation_id = "getProfile"
)]
#[get("/profile")]
pub async fn profile(req: HttpRequest, state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let profile = state.accounts.profile(authorization(&req)).await?;
    Ok(Envelope::ok(
        messages::PROFILE_FETCHED,
        ProfileData::from(profile),
    ))
}

/// Update the caller's name and/or phone number.
#[utoipa::path(
    patch,
    path = "/profile",
    request_body = ProfileUpdateBody,
    responses(
        (status = 200, description = "Profile updated", body = HeaderOnly),
        (status = 400, description = "Malformed body, validation failure or no update", body = HeaderOnly),
        (status = 403, description = "Missing, expired or invalid session", body = HeaderOnly),
        (status = 409, description = "Phone number owned by another user", body = HeaderOnly),
        (status = 500, description = "Internal server error", body = HeaderOnly)
    ),
    tags = ["accounts"],
    operation_id = "updateProfile"
)]
#[patch("/profile")]
pub async fn update_profile(
    req: HttpRequest,
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let session = state.accounts.resolve_session(authorization(&req))?;
    let payload: ProfileUpdateBody = decode_json(&body)?;
    debug!(user_id = %session.user_id(), "profile update body decoded");
    state
        .accounts
        .update_profile(session, payload.into())
        .await?;
    Ok(HeaderOnly::ok(messages::PROFILE_UPDATED))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
