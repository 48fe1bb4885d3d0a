use fundvs::core::ComparisonError;
use fundvs::core::error::RateError;
use fundvs::core::rates::{Instrument, RateSide};
use std::fs;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const ACCESS_KEY: &str = "integration-key";

    pub async fn mount_historical(mock_server: &MockServer, date: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path("/historical"))
            .and(query_param("access_key", ACCESS_KEY))
            .and(query_param("date", date))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    pub async fn mount_live(mock_server: &MockServer, body: &str) {
        Mock::given(method("GET"))
            .and(path("/live"))
            .and(query_param("access_key", ACCESS_KEY))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(mock_server)
            .await;
    }

    pub fn write_config(base_url: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
        providers:
          exchangerate:
            base_url: {base_url}
            access_key: {ACCESS_KEY}
        fund:
          name: "V Mall Fon"
          purchase_date: 2024-04-26
          unit_price: 20100
          quantity: 50
          current_price: 35133
    "#
        );
        std::fs::write(config_file.path(), &config_content).expect("Failed to write config file");
        config_file
    }
}

const HISTORICAL_BODY: &str =
    r#"{"success": true, "quotes": {"TRYUSD": 0.03125, "TRYEUR": 0.0285, "TRYXAU": 0.0000133}}"#;
const LIVE_BODY: &str =
    r#"{"success": true, "quotes": {"TRYUSD": 0.025, "TRYEUR": 0.0225, "TRYXAU": 0.00001}}"#;

#[test_log::test(tokio::test)]
async fn test_full_compare_flow_with_mock() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_historical(&mock_server, "2024-04-26", HISTORICAL_BODY).await;
    test_utils::mount_live(&mock_server, LIVE_BODY).await;

    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fundvs::run_command(
        fundvs::AppCommand::Compare(Default::default()),
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Compare command failed with: {:?}",
        result.err()
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
}

#[test_log::test(tokio::test)]
async fn test_compare_reports_missing_gold() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_historical(
        &mock_server,
        "2024-04-26",
        r#"{"success": true, "quotes": {"TRYUSD": 0.03125, "TRYEUR": 0.0285}}"#,
    )
    .await;
    test_utils::mount_live(&mock_server, LIVE_BODY).await;

    let config_file = test_utils::write_config(&mock_server.uri());

    let err = fundvs::run_command(
        fundvs::AppCommand::Compare(Default::default()),
        Some(config_file.path().to_str().unwrap()),
    )
    .await
    .unwrap_err();

    match err.downcast_ref::<ComparisonError>() {
        Some(ComparisonError::Rates {
            side: RateSide::Historical,
            source: RateError::PartialData { missing },
        }) => assert_eq!(missing, &vec![Instrument::Xau]),
        other => panic!("Expected missing gold data, got {other:?}"),
    }
    assert!(fundvs::cli::ui::describe_error(&err).contains("Gold (XAU)"));
}

#[test_log::test(tokio::test)]
async fn test_compare_reports_service_error() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_historical(&mock_server, "2024-04-26", HISTORICAL_BODY).await;
    test_utils::mount_live(
        &mock_server,
        r#"{"success": false, "error": {"info": "Your monthly usage limit has been reached."}}"#,
    )
    .await;

    let config_file = test_utils::write_config(&mock_server.uri());

    let err = fundvs::run_command(
        fundvs::AppCommand::Compare(Default::default()),
        Some(config_file.path().to_str().unwrap()),
    )
    .await
    .unwrap_err();

    let message = fundvs::cli::ui::describe_error(&err);
    assert!(message.contains("live rates"));
    assert!(message.contains("Your monthly usage limit has been reached."));
}

#[test_log::test(tokio::test)]
async fn test_rates_command_with_mock() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_live(&mock_server, LIVE_BODY).await;

    let config_file = test_utils::write_config(&mock_server.uri());

    let result = fundvs::run_command(
        fundvs::AppCommand::Rates { date: None },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;
    assert!(result.is_ok(), "Rates command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("missing.yaml");

    let err = fundvs::run_command(
        fundvs::AppCommand::Rates { date: None },
        Some(missing.to_str().unwrap()),
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test_log::test(tokio::test)]
async fn test_invalid_config_file_fails() {
    let config_file = tempfile::NamedTempFile::new().unwrap();
    fs::write(config_file.path(), "providers: 42").unwrap();

    let err = fundvs::run_command(
        fundvs::AppCommand::Rates { date: None },
        Some(config_file.path().to_str().unwrap()),
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
