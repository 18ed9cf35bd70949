//! Error mapping and failure behavior.

use crate::acceptance::common::{load_xml, MockController};
use vantage::objects::base::VantageObject;
use vantage::objects::interfaces::LoadInterface;
use vantage::{ClientError, Vantage, VantageConfig};

#[tokio::test]
async fn test_login_failure_maps_to_login_failed() {
    let mock = MockController::start().await;
    mock.hc.lock().unwrap().credentials = Some(("admin".into(), "secret".into()));

    let mut config = mock.config();
    config.username = Some("bad".into());
    config.password = Some("bad".into());
    let vantage = Vantage::new(config);

    let err = vantage
        .command_client()
        .command("VERSION", &[])
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::LoginFailed("login failed".into()));
}

#[tokio::test]
async fn test_command_error_preserves_code_and_message() {
    let mock = MockController::start().await;
    mock.fail_invokes_for(999);

    let vantage = mock.vantage();
    let err = vantage
        .command_client()
        .invoke(999, "Load.GetLevel", &[])
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClientError::Command {
            code: 7,
            message: "Invalid VID".into()
        }
    );
}

#[tokio::test]
async fn test_disconnected_controller_still_serves_reads() {
    let mock = MockController::start().await;
    mock.set_app_version("2.1.0");
    mock.set_objects(vec![load_xml(42, "Desk Lamp")]);

    let vantage = mock.vantage();
    vantage.loads.initialize(true, false).await.unwrap();

    // Take the Host Command service away entirely
    mock.stop_hc();

    // Queryset reads keep returning last-known state
    let load = vantage.loads.get(42).unwrap();
    assert_eq!(load.name(), "Desk Lamp");
    assert_eq!(vantage.loads.queryset().count(), 1);

    // State-mutating calls fail with a connection error
    let err = load.turn_on(None, None).await.unwrap_err();
    assert!(err.is_connection_error());

    vantage.close().await;
}

#[tokio::test]
async fn test_config_connection_refused() {
    // A configuration for a port nothing listens on
    let mut config = VantageConfig::new("127.0.0.1");
    config.config_service.tls = false;
    config.config_service.port = Some(1);
    config.config_service.connect_timeout = std::time::Duration::from_millis(500);

    let vantage = Vantage::new(config);
    let err = vantage.loads.initialize(false, false).await.unwrap_err();
    assert!(err.is_connection_error());
}
