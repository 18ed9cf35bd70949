//! Reconnect behavior: subscription replay and state re-fetch.

use crate::acceptance::common::{eventually, load_xml, wait_for, MockController};
use rust_decimal::Decimal;
use std::str::FromStr;
use vantage::Event;

#[tokio::test]
async fn test_reconnect_replays_and_refetches() {
    let mock = MockController::start().await;
    mock.set_app_version("2.1.0");
    mock.set_objects(vec![load_xml(42, "Desk Lamp")]);
    mock.set_invoke_result(42, "Load.GetLevel", "0.000");

    let vantage = mock.vantage();
    let mut events = vantage.subscribe();
    vantage.initialize().await.unwrap();

    wait_for(&mut events, |e| matches!(e, Event::Connected)).await;
    assert_eq!(vantage.loads.get(42).unwrap().level, Some(Decimal::ZERO));

    // The load changes while we are disconnected
    mock.set_invoke_result(42, "Load.GetLevel", "50.000");
    mock.drop_hc_connections();

    wait_for(&mut events, |e| matches!(e, Event::Disconnected)).await;
    wait_for(&mut events, |e| matches!(e, Event::Reconnected)).await;

    // The replayed subscription shows up on the new event connection, and
    // the controller re-fetches state it may have missed
    eventually(|| mock.hc_commands().iter().filter(|c| *c == "STATUS LOAD").count() >= 2).await;
    eventually(|| {
        vantage.loads.get(42).map(|load| load.level) == Some(Some(Decimal::from_str("50").unwrap()))
    })
    .await;

    vantage.close().await;
}

#[tokio::test]
async fn test_close_preserves_subscriptions_for_restart() {
    let mock = MockController::start().await;
    mock.set_app_version("2.1.0");
    mock.set_objects(vec![load_xml(42, "Desk Lamp")]);

    let vantage = mock.vantage();
    vantage.initialize().await.unwrap();
    vantage.close().await;

    // Restarting the event stream replays the still-counted subscription
    let before = mock
        .hc_commands()
        .iter()
        .filter(|c| *c == "STATUS LOAD")
        .count();
    vantage.command_client().start_event_stream().await.unwrap();
    eventually(|| {
        mock.hc_commands()
            .iter()
            .filter(|c| *c == "STATUS LOAD")
            .count()
            > before
    })
    .await;

    vantage.close().await;
}
