//! Object lifecycle: population diffing and queryset behavior.

use crate::acceptance::common::{load_xml, MockController};
use vantage::objects::base::VantageObject;
use vantage::ObjectEvent;

#[tokio::test]
async fn test_reinitialize_diffs_population() {
    let mock = MockController::start().await;
    mock.set_objects(vec![load_xml(1, "One"), load_xml(2, "Two")]);

    let vantage = mock.vantage();
    let mut events = vantage.loads.subscribe();

    vantage.loads.initialize(false, false).await.unwrap();
    assert_eq!(vantage.loads.len(), 2);

    // First population: two Added events
    for expected_vid in [1, 2] {
        match events.recv().await.unwrap() {
            ObjectEvent::Added(load) => assert_eq!(load.vid(), expected_vid),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    // Rename VID 1, delete VID 2, add VID 3
    mock.set_objects(vec![load_xml(1, "One Renamed"), load_xml(3, "Three")]);
    vantage.loads.initialize(false, false).await.unwrap();

    match events.recv().await.unwrap() {
        ObjectEvent::Updated { object, changed } => {
            assert_eq!(object.vid(), 1);
            assert_eq!(changed, vec!["name"]);
            assert_eq!(object.name(), "One Renamed");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    match events.recv().await.unwrap() {
        ObjectEvent::Added(load) => assert_eq!(load.vid(), 3),
        other => panic!("unexpected event: {other:?}"),
    }
    match events.recv().await.unwrap() {
        ObjectEvent::Deleted(load) => assert_eq!(load.vid(), 2),
        other => panic!("unexpected event: {other:?}"),
    }

    assert_eq!(vantage.loads.len(), 2);
    assert!(vantage.loads.contains(1));
    assert!(vantage.loads.contains(3));
    assert!(!vantage.loads.contains(2));

    vantage.close().await;
}

#[tokio::test]
async fn test_queryset_accessors() {
    let mock = MockController::start().await;
    mock.set_app_version("2.1.0");
    mock.set_objects(vec![
        load_xml(1, "Lamp"),
        load_xml(2, "Fan"),
        load_xml(3, "Spot"),
    ]);
    mock.set_invoke_result(2, "Load.GetLevel", "100.000");

    let vantage = mock.vantage();
    vantage.loads.initialize(true, false).await.unwrap();

    // Only VID 2 reported a non-zero level
    assert_eq!(vantage.loads.on().count(), 1);
    assert_eq!(vantage.loads.off().count(), 2);

    let fan = vantage.loads.queryset().get(|load| load.name() == "Fan");
    assert_eq!(fan.unwrap().vid(), 2);

    let first = vantage.loads.queryset().first().unwrap();
    assert_eq!(first.vid(), 1);

    vantage.close().await;
}

#[tokio::test]
async fn test_async_accessors_lazily_initialize() {
    let mock = MockController::start().await;
    mock.set_app_version("2.1.0");
    mock.set_objects(vec![load_xml(5, "Lazy")]);

    let vantage = mock.vantage();
    assert!(!vantage.loads.is_initialized());

    // aget triggers a full initialize (fetch + monitoring)
    let load = vantage.loads.aget(5).await.unwrap().unwrap();
    assert_eq!(load.name(), "Lazy");
    assert!(vantage.loads.is_initialized());

    let first = vantage.loads.afirst().await.unwrap().unwrap();
    assert_eq!(first.vid(), 5);

    vantage.close().await;
}
