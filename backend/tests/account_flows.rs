//! End-to-end account flows over the HTTP adapter.
//!
//! Wires the real `AuthService` to the in-memory repository and the bundled
//! development key pair, then drives it through Actix's test harness.

use std::sync::Arc;

use accounts::Trace;
use accounts::domain::ports::AccountService;
use accounts::domain::{AuthService, PasswordHasher, TokenKeys, TokenService, User, UserId};
use accounts::inbound::http::accounts::{login, profile, register, update_profile};
use accounts::inbound::http::state::HttpState;
use accounts::middleware::trace::TRACE_ID_HEADER;
use accounts::outbound::InMemoryUserRepository;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test, web};
use chrono::{DateTime, Duration, Local, Utc};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const PRIVATE_PEM: &str = include_str!("../keys/dev_private.pem");
const PUBLIC_PEM: &str = include_str!("../keys/dev_public.pem");

const PHONE: &str = "+62821232342";
const OTHER_PHONE: &str = "+628123456789";
const PASSWORD: &str = "SawitPro123$";
const FULL_NAME: &str = "Some Full Name";

struct PastClock;

impl Clock for PastClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc::now() - Duration::hours(48)
    }
}

fn keys() -> Arc<TokenKeys> {
    Arc::new(
        TokenKeys::from_pem(PRIVATE_PEM.as_bytes(), PUBLIC_PEM.as_bytes())
            .expect("development key pair parses"),
    )
}

struct Harness {
    repo: Arc<InMemoryUserRepository>,
    accounts: Arc<dyn AccountService>,
}

#[fixture]
fn harness() -> Harness {
    let repo = Arc::new(InMemoryUserRepository::new());
    let tokens = Arc::new(TokenService::new(keys(), Arc::new(DefaultClock)));
    let accounts: Arc<dyn AccountService> = Arc::new(AuthService::new(
        Arc::clone(&repo),
        PasswordHasher::default(),
        tokens,
    ));
    Harness { repo, accounts }
}

fn app(
    accounts: Arc<dyn AccountService>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(HttpState::new(accounts)))
        .wrap(Trace)
        .service(register)
        .service(login)
        .service(profile)
        .service(update_profile)
}

async fn into_json(response: ServiceResponse) -> (StatusCode, Value) {
    let status = response.status();
    let body = test::read_body(response).await;
    (status, serde_json::from_slice(&body).expect("response is JSON"))
}

fn registration(full_name: &str, phone_number: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/registration").set_json(json!({
        "fullName": full_name,
        "phoneNumber": phone_number,
        "password": password,
    }))
}

fn login_request(phone_number: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post().uri("/login").set_json(json!({
        "phoneNumber": phone_number,
        "password": password,
    }))
}

fn bearer(jwt: &str) -> (actix_web::http::header::HeaderName, String) {
    (AUTHORIZATION, format!("Bearer {jwt}"))
}

fn messages(body: &Value) -> Vec<&str> {
    body["header"]["messages"]
        .as_array()
        .expect("messages array")
        .iter()
        .filter_map(Value::as_str)
        .collect()
}

#[rstest]
#[actix_web::test]
async fn register_login_and_manage_profile(harness: Harness) {
    let app = test::init_service(app(Arc::clone(&harness.accounts))).await;

    let response =
        test::call_service(&app, registration(FULL_NAME, PHONE, PASSWORD).to_request()).await;
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let (status, body) = into_json(response).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["header"]["statusCode"], 200);
    assert_eq!(messages(&body), ["Successfully Create User Register!"]);
    assert_eq!(body["data"]["id"], 1);

    let (status, body) = into_json(
        test::call_service(&app, login_request(PHONE, PASSWORD).to_request()).await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(messages(&body), ["Successfully Login!"]);
    assert_eq!(body["data"]["id"], 1);
    let jwt = body["data"]["jwt"].as_str().expect("jwt string").to_owned();
    assert_eq!(
        harness.repo.login_count(UserId::new(1)).expect("count"),
        1
    );

    let (status, body) = into_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/profile")
                .insert_header(bearer(&jwt))
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({ "fullName": FULL_NAME, "phoneNumber": PHONE })
    );

    let (status, body) = into_json(
        test::call_service(
            &app,
            test::TestRequest::patch()
                .uri("/profile")
                .insert_header(bearer(&jwt))
                .set_json(json!({ "fullName": "Renamed Person" }))
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(messages(&body), ["Successfully Update User!"]);
    assert!(body.get("data").is_none());

    let (_, body) = into_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/profile")
                .insert_header(bearer(&jwt))
                .to_request(),
        )
        .await,
    )
    .await;
    assert_eq!(
        body["data"],
        json!({ "fullName": "Renamed Person", "phoneNumber": PHONE })
    );
}

#[rstest]
#[actix_web::test]
async fn registration_reports_every_violation(harness: Harness) {
    let app = test::init_service(app(harness.accounts)).await;

    let (status, body) =
        into_json(test::call_service(&app, registration("ab", "123", "weak").to_request()).await)
            .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["header"]["statusCode"], 422);
    assert_eq!(body["header"]["successful"], false);
    assert_eq!(
        messages(&body),
        [
            "Full name must be at minimum 3 characters and maximum 60 characters",
            "Phone numbers must be at minimum 10 characters and maximum 13 characters",
            "Phone numbers must start with the Indonesia country code \u{201c}+62\u{201d}",
            "Passwords must be minimum 6 characters and maximum 64 characters, containing at least 1 capital characters AND 1 number AND 1 special (non alpha-numeric) characters",
        ]
    );
}

#[rstest]
#[actix_web::test]
async fn duplicate_registration_is_rejected(harness: Harness) {
    let app = test::init_service(app(harness.accounts)).await;
    test::call_service(&app, registration(FULL_NAME, PHONE, PASSWORD).to_request()).await;

    let (status, body) = into_json(
        test::call_service(&app, registration(FULL_NAME, PHONE, PASSWORD).to_request()).await,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), ["Phone number is already registered"]);
}

#[rstest]
#[case(PHONE, "Wrong123$", "Wrong password")]
#[case(OTHER_PHONE, PASSWORD, "Phone number is not found")]
#[actix_web::test]
async fn bad_credentials_are_rejected(
    harness: Harness,
    #[case] phone_number: &str,
    #[case] password: &str,
    #[case] expected: &str,
) {
    let app = test::init_service(app(Arc::clone(&harness.accounts))).await;
    test::call_service(&app, registration(FULL_NAME, PHONE, PASSWORD).to_request()).await;

    let (status, body) = into_json(
        test::call_service(&app, login_request(phone_number, password).to_request()).await,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["header"]["statusCode"], 422);
    assert_eq!(messages(&body), [expected]);
    assert!(body.get("data").is_none());
    assert_eq!(harness.repo.login_count(UserId::new(1)).expect("count"), 0);
}

#[rstest]
#[actix_web::test]
async fn profile_requires_a_valid_session(harness: Harness) {
    let app = test::init_service(app(harness.accounts)).await;
    let stale = TokenService::new(keys(), Arc::new(PastClock))
        .issue(&User {
            id: UserId::new(1),
            phone_number: PHONE.to_owned(),
            ..User::default()
        })
        .expect("sign stale token");

    let cases: [(Option<String>, &str); 3] = [
        (None, "Unauthorized"),
        (Some("Bearer garbage".to_owned()), "There was an error when parsing JWT"),
        (Some(format!("Bearer {stale}")), "Session is expired"),
    ];

    for (authorization, expected) in cases {
        let mut request = test::TestRequest::get().uri("/profile");
        if let Some(value) = authorization {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let (status, body) = into_json(test::call_service(&app, request.to_request()).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["header"]["statusCode"], 401);
        assert_eq!(messages(&body), [expected]);
    }
}

#[rstest]
#[actix_web::test]
async fn profile_update_guards(harness: Harness) {
    let app = test::init_service(app(harness.accounts)).await;
    test::call_service(&app, registration(FULL_NAME, PHONE, PASSWORD).to_request()).await;
    test::call_service(
        &app,
        registration("Another Person", OTHER_PHONE, PASSWORD).to_request(),
    )
    .await;
    let (_, body) =
        into_json(test::call_service(&app, login_request(PHONE, PASSWORD).to_request()).await)
            .await;
    let jwt = body["data"]["jwt"].as_str().expect("jwt string").to_owned();

    let patch = |payload: &'static str| {
        test::TestRequest::patch()
            .uri("/profile")
            .insert_header(bearer(&jwt))
            .insert_header(("content-type", "application/json"))
            .set_payload(payload)
            .to_request()
    };

    let (status, body) = into_json(test::call_service(&app, patch("{}")).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), ["No update"]);

    let (status, body) = into_json(
        test::call_service(&app, patch(r#"{"phoneNumber":"+628123456789"}"#)).await,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["header"]["statusCode"], 422);
    assert_eq!(messages(&body), ["Phone number is already registered"]);

    let (status, body) = into_json(test::call_service(&app, patch("{\"fullName\":")).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["header"]["statusCode"], 500);
    assert_eq!(messages(&body), ["Bad request"]);

    let (status, _) = into_json(
        test::call_service(&app, patch(r#"{"phoneNumber":"+62821232342"}"#)).await,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
