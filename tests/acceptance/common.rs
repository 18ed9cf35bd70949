//! A mock InFusion controller: in-process Configuration (ACI) and Host
//! Command services over plaintext TCP, with scripted inventory, invoke
//! results, and fault injection.

#![allow(dead_code)] // Not every helper is used by every test module

use futures_util::{SinkExt, StreamExt};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::codec::{Framed, LinesCodec};
use vantage::{Vantage, VantageConfig};
use vantage_common::{Vid, XmlElement};

/// A line pushed to a live Host Command connection.
#[derive(Debug)]
pub enum Push {
    Line(String),
    Close,
}

#[derive(Debug, Default)]
pub struct AciState {
    /// `<Object>…</Object>` fragments served as filter results.
    pub objects: Vec<String>,
    /// Read position of the open cursor.
    pub cursor: usize,
    /// Firmware app version served by GetVersion.
    pub app_version: String,
    /// Expected credentials, when authentication is required.
    pub credentials: Option<(String, String)>,
}

#[derive(Debug, Default)]
pub struct HcState {
    /// Every received command line, tagged with its connection index.
    pub commands: Vec<(usize, String)>,
    /// Scripted `INVOKE` results by (vid, method); missing entries answer
    /// `0`.
    pub invoke_results: HashMap<(Vid, String), String>,
    /// VIDs that answer every INVOKE with an error.
    pub failing_vids: HashSet<Vid>,
    /// Expected credentials, when authentication is required.
    pub credentials: Option<(String, String)>,
    /// Push channels of live connections.
    pub connections: Vec<mpsc::UnboundedSender<Push>>,
    /// Total accepted connections.
    pub accepted: usize,
}

/// The mock controller: both services on dynamic localhost ports.
pub struct MockController {
    pub aci: Arc<Mutex<AciState>>,
    pub hc: Arc<Mutex<HcState>>,
    config_port: u16,
    command_port: u16,
    hc_accept_task: JoinHandle<()>,
}

impl MockController {
    pub async fn start() -> Self {
        let aci = Arc::new(Mutex::new(AciState {
            app_version: "3.2.1".to_string(),
            ..AciState::default()
        }));
        let hc = Arc::new(Mutex::new(HcState::default()));

        let aci_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config_port = aci_listener.local_addr().unwrap().port();
        let aci_state = aci.clone();
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = aci_listener.accept().await else {
                    return;
                };
                tokio::spawn(handle_aci_connection(socket, aci_state.clone()));
            }
        });

        let hc_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let command_port = hc_listener.local_addr().unwrap().port();
        let hc_state = hc.clone();
        let hc_accept_task = tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = hc_listener.accept().await else {
                    return;
                };
                let (push_tx, push_rx) = mpsc::unbounded_channel();
                let id = {
                    let mut state = hc_state.lock().unwrap();
                    state.connections.push(push_tx);
                    let id = state.accepted;
                    state.accepted += 1;
                    id
                };
                tokio::spawn(handle_hc_connection(socket, id, hc_state.clone(), push_rx));
            }
        });

        Self {
            aci,
            hc,
            config_port,
            command_port,
            hc_accept_task,
        }
    }

    /// A client configuration pointing at this mock, with test-friendly
    /// timeouts.
    pub fn config(&self) -> VantageConfig {
        let mut config = VantageConfig::new("127.0.0.1");
        config.config_service.tls = false;
        config.config_service.port = Some(self.config_port);
        config.config_service.read_timeout = Duration::from_secs(2);
        config.command_service.tls = false;
        config.command_service.port = Some(self.command_port);
        config.command_service.read_timeout = Duration::from_secs(2);
        config.reconnect_delay = Duration::from_millis(50);
        config
    }

    pub fn vantage(&self) -> Vantage {
        Vantage::new(self.config())
    }

    pub fn set_objects(&self, objects: Vec<String>) {
        let mut state = self.aci.lock().unwrap();
        state.objects = objects;
        state.cursor = 0;
    }

    pub fn set_app_version(&self, version: &str) {
        self.aci.lock().unwrap().app_version = version.to_string();
    }

    pub fn set_invoke_result(&self, vid: Vid, method: &str, result: &str) {
        self.hc
            .lock()
            .unwrap()
            .invoke_results
            .insert((vid, method.to_string()), result.to_string());
    }

    pub fn fail_invokes_for(&self, vid: Vid) {
        self.hc.lock().unwrap().failing_vids.insert(vid);
    }

    /// Send an event line to every live Host Command connection.
    pub fn broadcast_event(&self, line: &str) {
        let state = self.hc.lock().unwrap();
        for connection in &state.connections {
            let _ = connection.send(Push::Line(line.to_string()));
        }
    }

    /// Drop every live Host Command connection.
    pub fn drop_hc_connections(&self) {
        let mut state = self.hc.lock().unwrap();
        for connection in state.connections.drain(..) {
            let _ = connection.send(Push::Close);
        }
    }

    /// Stop accepting Host Command connections and drop the live ones.
    pub fn stop_hc(&self) {
        self.hc_accept_task.abort();
        self.drop_hc_connections();
    }

    /// Every Host Command line received, in order.
    pub fn hc_commands(&self) -> Vec<String> {
        self.hc
            .lock()
            .unwrap()
            .commands
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// Host Command lines received on the given connection, in order.
    pub fn hc_commands_on(&self, connection: usize) -> Vec<String> {
        self.hc
            .lock()
            .unwrap()
            .commands
            .iter()
            .filter(|(id, _)| *id == connection)
            .map(|(_, line)| line.clone())
            .collect()
    }
}

async fn handle_aci_connection(mut socket: TcpStream, state: Arc<Mutex<AciState>>) {
    let mut buffer: Vec<u8> = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let Ok(n) = socket.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            return;
        }
        buffer.extend_from_slice(&chunk[..n]);

        while let Some(end) = aci_request_end(&buffer) {
            let request = String::from_utf8_lossy(&buffer[..end]).into_owned();
            buffer.drain(..end);

            let response = aci_respond(&state, &request);
            if socket.write_all(response.as_bytes()).await.is_err() {
                return;
            }
        }
    }
}

fn aci_request_end(buffer: &[u8]) -> Option<usize> {
    let text = String::from_utf8_lossy(buffer);
    for interface in ["ILogin", "IConfiguration", "IIntrospection"] {
        let terminator = format!("</{interface}>");
        if let Some(pos) = text.find(&terminator) {
            return Some(pos + terminator.len());
        }
    }
    None
}

fn aci_respond(state: &Arc<Mutex<AciState>>, request: &str) -> String {
    let envelope = XmlElement::parse(request).expect("mock received malformed request");
    let method = &envelope.children[0];
    let call = method.child("call");

    let mut state = state.lock().unwrap();
    match method.name.as_str() {
        "Login" => {
            let user = call.and_then(|c| c.child_text("User")).unwrap_or_default();
            let password = call
                .and_then(|c| c.child_text("Password"))
                .unwrap_or_default();
            let ok = match &state.credentials {
                Some((expected_user, expected_password)) => {
                    user == expected_user && password == expected_password
                }
                None => true,
            };
            wrap_aci("ILogin", "Login", &format!("<return>{ok}</return>"))
        }
        "OpenFilter" => {
            state.cursor = 0;
            wrap_aci("IConfiguration", "OpenFilter", "<return>11</return>")
        }
        "GetFilterResults" => {
            let count: usize = call
                .and_then(|c| c.child_text("Count"))
                .and_then(|t| t.parse().ok())
                .unwrap_or(50);
            let start = state.cursor;
            let end = usize::min(start + count, state.objects.len());
            state.cursor = end;
            let body: String = state.objects[start..end].concat();
            wrap_aci(
                "IConfiguration",
                "GetFilterResults",
                &format!("<return>{body}</return>"),
            )
        }
        "CloseFilter" => wrap_aci("IConfiguration", "CloseFilter", "<return>true</return>"),
        "GetObject" => wrap_aci("IConfiguration", "GetObject", "<return></return>"),
        "GetVersion" => wrap_aci(
            "IIntrospection",
            "GetVersion",
            &format!(
                "<return><kernel>2.1.0</kernel><rootfs>2.1.0</rootfs><app>{}</app></return>",
                state.app_version
            ),
        ),
        other => wrap_aci("IConfiguration", other, ""),
    }
}

fn wrap_aci(interface: &str, method: &str, body: &str) -> String {
    format!("<{interface}><{method}>{body}</{method}></{interface}>\n")
}

async fn handle_hc_connection(
    socket: TcpStream,
    id: usize,
    state: Arc<Mutex<HcState>>,
    mut push_rx: mpsc::UnboundedReceiver<Push>,
) {
    let mut framed = Framed::new(socket, LinesCodec::new());

    loop {
        tokio::select! {
            line = framed.next() => match line {
                Some(Ok(line)) => {
                    let reply = hc_respond(&state, id, &line);
                    if framed.send(reply).await.is_err() {
                        return;
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

fn hc_respond(state: &Arc<Mutex<HcState>>, id: usize, line: &str) -> String {
    let mut state = state.lock().unwrap();
    state.commands.push((id, line.to_string()));

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let command = tokens.first().copied().unwrap_or_default();

    match command {
        "LOGIN" => {
            let ok = match &state.credentials {
                Some((user, password)) => {
                    tokens.get(1).copied().unwrap_or_default().trim_matches('"') == user
                        && tokens.get(2).copied().unwrap_or_default().trim_matches('"') == password
                }
                None => true,
            };
            if ok {
                "R:LOGIN".to_string()
            } else {
                "R:ERROR:23 \"login failed\"".to_string()
            }
        }
        "INVOKE" => {
            let vid: Vid = tokens
                .get(1)
                .and_then(|token| token.parse().ok())
                .unwrap_or(0);
            let method = tokens.get(2).copied().unwrap_or_default();
            if state.failing_vids.contains(&vid) {
                "R:ERROR:7 \"Invalid VID\"".to_string()
            } else {
                let result = state
                    .invoke_results
                    .get(&(vid, method.to_string()))
                    .cloned()
                    .unwrap_or_else(|| "0".to_string());
                format!("R:INVOKE {vid} {result} {method}")
            }
        }
        _ => format!("R:{line}"),
    }
}

/// Build a `<Load>` object fragment for the mock inventory.
pub fn load_xml(vid: Vid, name: &str) -> String {
    format!(
        r#"<Object VID="{vid}"><Load VID="{vid}" Master="1"><Name>{name}</Name><Model/><Note/><DName/><Area>1</Area><Location/><LoadType>Incandescent</LoadType><PowerProfile>1</PowerProfile><Parent Position="1">2</Parent></Load></Object>"#
    )
}

/// Build a `<Thermostat>` object fragment for the mock inventory.
pub fn thermostat_xml(vid: Vid, name: &str) -> String {
    format!(
        r#"<Object VID="{vid}"><Thermostat VID="{vid}" Master="1"><Name>{name}</Name><Model/><Note/><Area>1</Area></Thermostat></Object>"#
    )
}

/// Wait for an event matching the predicate, skipping others.
pub async fn wait_for<T: Clone>(
    events: &mut tokio::sync::broadcast::Receiver<T>,
    mut predicate: impl FnMut(&T) -> bool,
) -> T {
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

/// Poll a condition until it holds or a timeout expires.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    timeout(Duration::from_secs(5), async {
        loop {
            if condition() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("timed out waiting for condition");
}
