//! Status-event scenarios: category statuses on legacy firmware and
//! enhanced-log object statuses on current firmware.

use crate::acceptance::common::{load_xml, thermostat_xml, wait_for, MockController};
use rust_decimal::Decimal;
use std::str::FromStr;
use vantage::{ObjectEvent, StatusType};

#[tokio::test]
async fn test_load_level_category_status() {
    let mock = MockController::start().await;
    // 2.x firmware: no enhanced log, controllers fall back to categories
    mock.set_app_version("2.1.0");
    mock.set_objects(vec![load_xml(42, "Desk Lamp")]);
    mock.set_invoke_result(42, "Load.GetLevel", "0.000");

    let vantage = mock.vantage();
    vantage.initialize().await.unwrap();

    let load = vantage.loads.get(42).unwrap();
    assert_eq!(load.level, Some(Decimal::ZERO));
    assert!(!load.is_on());
    assert_eq!(vantage.loads.status_type(), Some(StatusType::Category));

    let mut events = vantage.loads.subscribe();
    mock.broadcast_event("S:LOAD 42 75.000");

    let event = wait_for(&mut events, |e| matches!(e, ObjectEvent::Updated { .. })).await;
    match event {
        ObjectEvent::Updated { object, changed } => {
            assert_eq!(changed, vec!["level"]);
            assert_eq!(object.level, Some(Decimal::from_str("75.000").unwrap()));
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let load = vantage.loads.get(42).unwrap();
    assert!(load.is_on());

    vantage.close().await;
}

#[tokio::test]
async fn test_thermostat_enhanced_log_status() {
    let mock = MockController::start().await;
    mock.set_objects(vec![thermostat_xml(7, "Hallway")]);

    let vantage = mock.vantage();
    // 3.x firmware (the mock default) uses enhanced-log object statuses
    vantage.initialize().await.unwrap();
    assert_eq!(vantage.thermostats.status_type(), Some(StatusType::Object));

    // The controller's subscription must have enabled the enhanced log
    let commands = mock.hc_commands();
    assert!(commands.contains(&"ELENABLE STATUS ON".to_string()));
    assert!(commands.contains(&"ELLOG STATUS ON".to_string()));

    let mut events = vantage.thermostats.subscribe();
    mock.broadcast_event("EL: 7 Thermostat.GetHeatSetPoint 21.500");

    let event = wait_for(&mut events, |e| {
        matches!(e, ObjectEvent::Updated { changed, .. } if changed.contains(&"heat_set_point"))
    })
    .await;
    match event {
        ObjectEvent::Updated { object, .. } => {
            assert_eq!(
                object.heat_set_point,
                Some(Decimal::from_str("21.500").unwrap())
            );
        }
        other => panic!("unexpected event: {other:?}"),
    }

    vantage.close().await;
}

#[tokio::test]
async fn test_status_for_unmanaged_vid_is_ignored() {
    let mock = MockController::start().await;
    mock.set_app_version("2.1.0");
    mock.set_objects(vec![load_xml(42, "Desk Lamp")]);

    let vantage = mock.vantage();
    vantage.initialize().await.unwrap();

    let mut events = vantage.loads.subscribe();
    mock.broadcast_event("S:LOAD 999 50.000");
    mock.broadcast_event("S:LOAD 42 25.000");

    // Only the managed VID produces an update
    let event = wait_for(&mut events, |e| matches!(e, ObjectEvent::Updated { .. })).await;
    match event {
        ObjectEvent::Updated { object, .. } => {
            assert_eq!(object.level, Some(Decimal::from_str("25.000").unwrap()));
        }
        other => panic!("unexpected event: {other:?}"),
    }

    vantage.close().await;
}
