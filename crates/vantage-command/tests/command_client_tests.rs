//! Integration tests for the Host Command client against an in-process mock
//! service speaking the line protocol over plaintext TCP.

use futures_util::{SinkExt, StreamExt};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::time::timeout;
use tokio_util::codec::{Framed, LinesCodec};
use vantage_command::{CommandClient, Event, StatusCategory};
use vantage_common::{ClientError, Param, VantageConfig, Vid};

/// A line pushed to a live connection by the test body.
#[derive(Debug)]
enum Push {
    Line(String),
    Close,
}

#[derive(Debug, Default)]
struct HcState {
    /// Every received command line, tagged with its connection index.
    commands: Vec<(usize, String)>,
    /// Scripted `INVOKE` results, keyed by (vid, method).
    invoke_results: HashMap<(Vid, String), String>,
    /// Expected credentials, when authentication is required.
    credentials: Option<(String, String)>,
    /// Push channels of live connections.
    connections: Vec<mpsc::UnboundedSender<Push>>,
    /// Total number of accepted connections.
    accepted: usize,
}

type SharedState = Arc<Mutex<HcState>>;

struct MockHcServer {
    addr: SocketAddr,
    state: SharedState,
}

impl MockHcServer {
    async fn start(state: HcState) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(Mutex::new(state));

        let server_state = state.clone();
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    return;
                };

                let (push_tx, push_rx) = mpsc::unbounded_channel();
                let id = {
                    let mut state = server_state.lock().unwrap();
                    state.connections.push(push_tx);
                    let id = state.accepted;
                    state.accepted += 1;
                    id
                };
                tokio::spawn(handle_connection(socket, id, server_state.clone(), push_rx));
            }
        });

        Self { addr, state }
    }

    fn client(&self) -> CommandClient {
        let mut config = VantageConfig::new("127.0.0.1");
        config.command_service.tls = false;
        config.command_service.port = Some(self.addr.port());
        config.command_service.read_timeout = Duration::from_secs(2);
        config.reconnect_delay = Duration::from_millis(50);
        CommandClient::new(&config)
    }

    fn client_with_credentials(&self, user: &str, password: &str) -> CommandClient {
        let mut config = VantageConfig::with_credentials("127.0.0.1", user, password);
        config.command_service.tls = false;
        config.command_service.port = Some(self.addr.port());
        config.command_service.read_timeout = Duration::from_secs(2);
        config.reconnect_delay = Duration::from_millis(50);
        CommandClient::new(&config)
    }

    /// Send an event line to every live connection.
    fn broadcast_event(&self, line: &str) {
        let state = self.state.lock().unwrap();
        for connection in &state.connections {
            let _ = connection.send(Push::Line(line.to_string()));
        }
    }

    /// Drop every live connection.
    fn drop_connections(&self) {
        let mut state = self.state.lock().unwrap();
        for connection in state.connections.drain(..) {
            let _ = connection.send(Push::Close);
        }
    }

    /// Command lines received on the given connection, in order.
    fn commands_on(&self, connection: usize) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .commands
            .iter()
            .filter(|(id, _)| *id == connection)
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Every command line received, in order.
    fn commands(&self) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .commands
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }
}

async fn handle_connection(
    socket: TcpStream,
    id: usize,
    state: SharedState,
    mut push_rx: mpsc::UnboundedReceiver<Push>,
) {
    let mut framed = Framed::new(socket, LinesCodec::new());

    loop {
        tokio::select! {
            line = framed.next() => match line {
                Some(Ok(line)) => {
                    let replies = respond(&state, id, &line);
                    for reply in replies {
                        if framed.send(reply).await.is_err() {
                            return;
                        }
                    }
                }
                _ => return,
            },
            push = push_rx.recv() => match push {
                Some(Push::Line(line)) => {
                    if framed.send(line).await.is_err() {
                        return;
                    }
                }
                Some(Push::Close) | None => return,
            },
        }
    }
}

fn respond(state: &SharedState, id: usize, line: &str) -> Vec<String> {
    let mut state = state.lock().unwrap();
    state.commands.push((id, line.to_string()));

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let command = tokens.first().copied().unwrap_or_default();

    match command {
        "LOGIN" => {
            let ok = match &state.credentials {
                Some((user, password)) => {
                    let presented_user = tokens.get(1).copied().unwrap_or_default();
                    let presented_password = tokens.get(2).copied().unwrap_or_default();
                    presented_user.trim_matches('"') == user
                        && presented_password.trim_matches('"') == password
                }
                None => true,
            };
            if ok {
                vec!["R:LOGIN".to_string()]
            } else {
                vec!["R:ERROR:23 \"login failed\"".to_string()]
            }
        }
        "INVOKE" => {
            let vid: Vid = tokens
                .get(1)
                .and_then(|token| token.parse().ok())
                .unwrap_or(0);
            let method = tokens.get(2).copied().unwrap_or_default();
            match state.invoke_results.get(&(vid, method.to_string())) {
                Some(result) => vec![format!("R:INVOKE {vid} {result} {method}")],
                None => vec!["R:ERROR:7 \"Invalid VID\"".to_string()],
            }
        }
        "HELP" => vec![
            "LOAD <vid> <level>".to_string(),
            "GETLOAD <vid>".to_string(),
            "R:HELP".to_string(),
        ],
        _ => vec![format!("R:{line}")],
    }
}

/// Wait for an event matching the predicate, skipping others.
async fn wait_for_event(
    events: &mut tokio::sync::broadcast::Receiver<Event>,
    mut predicate: impl FnMut(&Event) -> bool,
) -> Event {
    timeout(Duration::from_secs(5), async {
        loop {
            match events.recv().await {
                Ok(event) if predicate(&event) => return event,
                Ok(_) => {}
                Err(err) => panic!("event channel closed: {err}"),
            }
        }
    })
    .await
    .expect("timed out waiting for event")
}

#[tokio::test]
async fn test_command_echoes_reply_args() {
    let server = MockHcServer::start(HcState::default()).await;
    let client = server.client();

    let response = client
        .command("GETLOAD", &[Param::from(118u32)])
        .await
        .unwrap();
    assert_eq!(response.command, "GETLOAD");
    assert_eq!(response.args, vec!["118"]);
}

#[tokio::test]
async fn test_command_collects_data_lines() {
    let server = MockHcServer::start(HcState::default()).await;
    let client = server.client();

    let response = client.command("HELP", &[]).await.unwrap();
    assert_eq!(response.command, "HELP");
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.data[0], "LOAD <vid> <level>");
}

#[tokio::test]
async fn test_login_failure_maps_to_error() {
    let server = MockHcServer::start(HcState {
        credentials: Some(("admin".into(), "secret".into())),
        ..HcState::default()
    })
    .await;

    let client = server.client_with_credentials("bad", "bad");
    let err = client.command("VERSION", &[]).await.unwrap_err();
    assert_eq!(err, ClientError::LoginFailed("login failed".into()));
}

#[tokio::test]
async fn test_invoke_returns_decoded_reply() {
    let mut invoke_results = HashMap::new();
    invoke_results.insert((42, "Load.GetLevel".to_string()), "75.000".to_string());
    let server = MockHcServer::start(HcState {
        invoke_results,
        ..HcState::default()
    })
    .await;

    let client = server.client();
    let reply = client.invoke(42, "Load.GetLevel", &[]).await.unwrap();
    assert_eq!(reply.vid, 42);
    assert_eq!(reply.result, "75.000");
    assert_eq!(reply.method, "Load.GetLevel");
}

#[tokio::test]
async fn test_invoke_unknown_vid_is_command_error() {
    let server = MockHcServer::start(HcState::default()).await;
    let client = server.client();

    let err = client.invoke(999, "Load.GetLevel", &[]).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Command {
            code: 7,
            message: "Invalid VID".into()
        }
    );
}

#[tokio::test]
async fn test_subscription_reference_counting() {
    let server = MockHcServer::start(HcState::default()).await;
    let client = server.client();

    // Two subscribers to the same category: one STATUS command
    let first = client
        .subscribe_status(&[StatusCategory::Load])
        .await
        .unwrap();
    let second = client
        .subscribe_status(&[StatusCategory::Load])
        .await
        .unwrap();

    let status_commands: Vec<String> = server
        .commands()
        .into_iter()
        .filter(|line| line.starts_with("STATUS"))
        .collect();
    assert_eq!(status_commands, vec!["STATUS LOAD"]);

    // Dropping both references sends nothing (no category unsubscribe
    // command exists); a later resubscribe transitions 0 -> 1 again
    first.unsubscribe();
    second.unsubscribe();
    let _third = client
        .subscribe_status(&[StatusCategory::Load])
        .await
        .unwrap();

    let status_commands: Vec<String> = server
        .commands()
        .into_iter()
        .filter(|line| line.starts_with("STATUS"))
        .collect();
    assert_eq!(status_commands, vec!["STATUS LOAD", "STATUS LOAD"]);
}

#[tokio::test]
async fn test_object_subscription_batches_and_delstatus() {
    let server = MockHcServer::start(HcState::default()).await;
    let client = server.client();

    // 20 VIDs: one full batch of 16 and one of 4
    let vids: Vec<Vid> = (1..=20).collect();
    let subscription = client.subscribe_objects(&vids).await.unwrap();

    let add_commands: Vec<String> = server
        .commands()
        .into_iter()
        .filter(|line| line.starts_with("ADDSTATUS"))
        .collect();
    assert_eq!(add_commands.len(), 2);
    assert_eq!(
        add_commands[0],
        format!(
            "ADDSTATUS {}",
            (1..=16).map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
        )
    );
    assert_eq!(add_commands[1], "ADDSTATUS 17 18 19 20");

    subscription.unsubscribe().await.unwrap();
    let del_commands: Vec<String> = server
        .commands()
        .into_iter()
        .filter(|line| line.starts_with("DELSTATUS"))
        .collect();
    assert_eq!(del_commands.len(), 2);
}

#[tokio::test]
async fn test_status_events_are_delivered_in_order() {
    let server = MockHcServer::start(HcState::default()).await;
    let client = server.client();

    let mut events = client.subscribe();
    let _subscription = client
        .subscribe_status(&[StatusCategory::Load])
        .await
        .unwrap();

    server.broadcast_event("S:LOAD 42 75.000");
    server.broadcast_event("S:LOAD 42 50.000");
    server.broadcast_event("EL: 7 Thermostat.GetHeatSetPoint 21500");

    let first = wait_for_event(&mut events, |e| matches!(e, Event::Status { .. })).await;
    match first {
        Event::Status {
            category,
            vid,
            args,
        } => {
            assert_eq!(category, StatusCategory::Load);
            assert_eq!(vid, 42);
            assert_eq!(args, vec!["75.000"]);
        }
        other => panic!("unexpected event: {other:?}"),
    }

    let second = wait_for_event(&mut events, |e| matches!(e, Event::Status { .. })).await;
    match second {
        Event::Status { args, .. } => assert_eq!(args, vec!["50.000"]),
        other => panic!("unexpected event: {other:?}"),
    }

    let log = wait_for_event(&mut events, |e| matches!(e, Event::EnhancedLog { .. })).await;
    match log {
        Event::EnhancedLog { log } => {
            assert_eq!(log, "7 Thermostat.GetHeatSetPoint 21500");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_reconnect_replays_subscriptions_in_order() {
    let server = MockHcServer::start(HcState::default()).await;
    let client = server.client();
    let mut events = client.subscribe();

    // Build the book: LOAD x1, BTN x2, objects 17+33, enhanced log STATUS
    let _load = client
        .subscribe_status(&[StatusCategory::Load])
        .await
        .unwrap();
    let _btn_a = client
        .subscribe_status(&[StatusCategory::Btn])
        .await
        .unwrap();
    let _btn_b = client
        .subscribe_status(&[StatusCategory::Btn])
        .await
        .unwrap();
    let _objects = client.subscribe_objects(&[17, 33]).await.unwrap();
    let _logs = client.subscribe_enhanced_log(&["STATUS"]).await.unwrap();

    wait_for_event(&mut events, |e| matches!(e, Event::Connected)).await;

    // Force a disconnect and wait for the reconnect cycle
    server.drop_connections();
    wait_for_event(&mut events, |e| matches!(e, Event::Disconnected)).await;
    wait_for_event(&mut events, |e| matches!(e, Event::Reconnected)).await;

    // The replay happens on the second accepted connection, in the fixed
    // order categories -> objects -> event logs
    assert_eq!(
        server.commands_on(1),
        vec![
            "STATUS LOAD",
            "STATUS BTN",
            "ADDSTATUS 17 33",
            "ELENABLE STATUS ON",
            "ELLOG STATUS ON",
        ]
    );
}

#[tokio::test]
async fn test_events_arrive_during_inflight_command() {
    let server = MockHcServer::start(HcState::default()).await;
    let client = server.client();

    let mut events = client.subscribe();
    let _subscription = client
        .subscribe_status(&[StatusCategory::Load])
        .await
        .unwrap();

    // An event broadcast while a control command is in flight still reaches
    // subscribers: fire a burst of both
    server.broadcast_event("S:LOAD 1 10.000");
    let _more = client
        .subscribe_status(&[StatusCategory::Btn])
        .await
        .unwrap();
    server.broadcast_event("S:LOAD 1 20.000");

    let event = wait_for_event(&mut events, |e| matches!(e, Event::Status { .. })).await;
    match event {
        Event::Status { vid, .. } => assert_eq!(vid, 1),
        other => panic!("unexpected event: {other:?}"),
    }
}
