use anyhow::Result;
use cleaning_booking::{
    BookingChange, BookingError, BookingGateway, BookingSession, ConfigProvider, ContactChange,
    ContactSession, Configuration, Frequency, HttpGateway, ServiceType, SubmissionController,
    SubmissionState, TomlConfig,
};
use httpmock::prelude::*;
use std::time::Duration;
use tempfile::TempDir;

fn gateway(server: &MockServer) -> HttpGateway {
    HttpGateway::new(
        &server.base_url(),
        "/api/bookings",
        "/api/contact",
        Duration::from_secs(5),
    )
    .unwrap()
}

fn filled_booking() -> Configuration {
    let mut configuration = Configuration::default();
    configuration.apply_all([
        BookingChange::ServiceType(ServiceType::Deep),
        BookingChange::Rooms(3),
        BookingChange::Bathrooms(2),
        BookingChange::Frequency(Frequency::Weekly),
        BookingChange::PreferredDate("2099-06-01".to_string()),
        BookingChange::PreferredTime("9:00 AM".to_string()),
        BookingChange::FirstName("Grace".to_string()),
        BookingChange::LastName("Hopper".to_string()),
        BookingChange::Email("grace@example.com".to_string()),
        BookingChange::Phone("555-0142".to_string()),
        BookingChange::Address("12 Harbor Lane".to_string()),
    ]);
    configuration
}

#[tokio::test]
async fn test_booking_is_posted_with_estimated_price() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/bookings")
            .header("content-type", "application/json")
            .json_body_partial(
                r#"{
                    "serviceType": "deep",
                    "rooms": 3,
                    "bathrooms": 2,
                    "frequency": "weekly",
                    "preferredTime": "9:00 AM",
                    "estimatedPrice": 198
                }"#,
            );
        then.status(201).json_body(serde_json::json!({ "id": "bk_1" }));
    });

    let mut session =
        BookingSession::with_form(filled_booking(), SubmissionController::new(gateway(&server)));
    assert_eq!(session.estimate(), 198);

    session.submit().await?;

    mock.assert();
    assert_eq!(session.state(), SubmissionState::Succeeded);
    assert_eq!(session.form(), &Configuration::default());
    Ok(())
}

#[tokio::test]
async fn test_blank_instructions_are_not_sent() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/bookings")
            .matches(|req| {
                let body: serde_json::Value =
                    serde_json::from_slice(req.body.as_deref().unwrap_or_default())
                        .unwrap_or_default();
                body.get("instructions").is_none()
            });
        then.status(200);
    });

    let mut configuration = filled_booking();
    configuration.apply(BookingChange::Instructions("   ".to_string()));
    let controller = SubmissionController::new(gateway(&server));
    controller.submit(&configuration).await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_server_error_fails_and_keeps_form() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/bookings");
        then.status(500).body("internal error");
    });

    let mut session =
        BookingSession::with_form(filled_booking(), SubmissionController::new(gateway(&server)));
    let err = session.submit().await.unwrap_err();

    mock.assert();
    assert!(matches!(err, BookingError::Rejected { status: 500 }));
    assert!(err.is_retryable());
    assert_eq!(session.form(), &filled_booking());
    match session.state() {
        SubmissionState::Failed { reason } => {
            assert_eq!(
                reason,
                "We couldn't submit your request. Please check your information and try again."
            );
        }
        other => panic!("expected failed state, got {:?}", other),
    }

    // A retry after the server recovers goes through.
    let mut mock = mock;
    mock.delete();
    let retry = server.mock(|when, then| {
        when.method(POST).path("/api/bookings");
        then.status(200);
    });
    session.submit().await?;
    retry.assert();
    assert_eq!(session.state(), SubmissionState::Succeeded);
    Ok(())
}

#[tokio::test]
async fn test_invalid_booking_never_reaches_server() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/bookings");
        then.status(200);
    });

    let mut configuration = filled_booking();
    configuration.apply(BookingChange::Email("not-an-email".to_string()));
    configuration.apply(BookingChange::Rooms(0));

    let mut session =
        BookingSession::with_form(configuration, SubmissionController::new(gateway(&server)));
    let err = session.submit().await.unwrap_err();

    mock.assert_hits(0);
    match err {
        BookingError::Validation(errors) => {
            assert_eq!(errors.len(), 2);
        }
        other => panic!("expected validation errors, got {:?}", other),
    }
    assert_eq!(session.state(), SubmissionState::Idle);
    Ok(())
}

#[tokio::test]
async fn test_contact_message_is_posted() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/contact").json_body(serde_json::json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "message": "Do you bring your own supplies?"
        }));
        then.status(202);
    });

    let mut session = ContactSession::new(SubmissionController::new(gateway(&server)));
    session.edit(ContactChange::FirstName("Ada".to_string()));
    session.edit(ContactChange::LastName("Lovelace".to_string()));
    session.edit(ContactChange::Email("ada@example.com".to_string()));
    session.edit(ContactChange::Message(
        "Do you bring your own supplies?".to_string(),
    ));

    session.submit().await?;

    mock.assert();
    assert_eq!(session.state(), SubmissionState::Succeeded);
    assert!(session.form().first_name().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_slow_server_times_out() -> Result<()> {
    let server = MockServer::start_async().await;
    server.mock(|when, then| {
        when.method(POST).path("/api/bookings");
        then.status(200).delay(Duration::from_secs(3));
    });

    let gateway = HttpGateway::new(
        &server.base_url(),
        "/api/bookings",
        "/api/contact",
        Duration::from_millis(200),
    )?;
    let controller = SubmissionController::new(gateway);

    let err = controller.submit(&filled_booking()).await.unwrap_err();

    assert!(matches!(err, BookingError::Timeout { .. }));
    assert!(matches!(controller.state(), SubmissionState::Failed { .. }));
    Ok(())
}

#[tokio::test]
async fn test_gateway_from_config_file() -> Result<()> {
    let server = MockServer::start_async().await;
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v2/bookings");
        then.status(200);
    });

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("booking.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[service]
base_url = "{}"
booking_path = "/v2/bookings"
timeout_seconds = 5
"#,
            server.base_url()
        ),
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    assert_eq!(config.timeout(), Duration::from_secs(5));

    let gateway = HttpGateway::from_config(&config)?;
    assert_eq!(gateway.booking_url().path(), "/v2/bookings");
    assert_eq!(gateway.contact_url().path(), "/api/contact");

    gateway
        .submit_booking(&filled_booking().to_request())
        .await?;

    mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_shared_link_seeds_booking() -> Result<()> {
    let server = MockServer::start_async().await;
    let session = BookingSession::from_query(
        "?service=moveout&rooms=4&bathrooms=2&frequency=monthly",
        SubmissionController::new(gateway(&server)),
    );

    assert_eq!(session.form().service_type(), ServiceType::Moveout);
    // 200 + 3*35 + 25 = 330, less 20%
    assert_eq!(session.estimate(), 264);
    Ok(())
}
