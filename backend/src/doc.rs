//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the account and health endpoints. Envelope and body
//! schemas are collected from the path annotations. The bearer security
//! scheme is added by a modifier so handlers only name it.
//!
//! The document backs Swagger UI in debug builds and is printed by
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer token security scheme.
pub const BEARER_SCHEME: &str = "BearerToken";

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("RS256 token returned by POST /login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Accounts API",
        description = "Registration, login and profile management over bearer tokens."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::profile,
        crate::inbound::http::accounts::update_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    tags(
        (name = "accounts", description = "Registration, login and profile"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
