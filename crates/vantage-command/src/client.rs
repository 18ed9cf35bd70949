//! The Host Command client: ad-hoc commands, object invocation, and the
//! long-lived event connection with subscription replay.

use crate::connection::CommandConnection;
use crate::events::{Event, StatusCategory};
use crate::response::CommandResponse;
use crate::subscriptions::{
    EnhancedLogSubscription, ObjectSubscription, StatusSubscription, SubscriptionBook,
    OBJECT_BATCH_SIZE,
};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vantage_common::{parse_vid, tokenize, ClientError, ClientResult, Param, VantageConfig, Vid};

/// Capacity of the event broadcast channel. Slow receivers that fall further
/// behind than this observe a lag error and skip ahead.
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// A decoded `R:INVOKE` reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeReply {
    /// The VID the method was invoked on.
    pub vid: Vid,
    /// The method's return value token.
    pub result: String,
    /// The echoed `Interface.Method` name.
    pub method: String,
    /// Any additional argument tokens after the method name.
    pub args: Vec<String>,
}

impl InvokeReply {
    fn from_response(vid: Vid, method: &str, response: CommandResponse) -> ClientResult<Self> {
        if response.args.len() < 3 {
            return Err(ClientError::Response(format!(
                "short INVOKE reply: {:?}",
                response.args
            )));
        }

        let reply_vid = parse_vid(&response.args[0])?;
        let reply_method = &response.args[2];
        if reply_vid != vid || reply_method != method {
            return Err(ClientError::Response(format!(
                "INVOKE reply mismatch: expected {vid} {method}, got {reply_vid} {reply_method}"
            )));
        }

        Ok(Self {
            vid,
            result: response.args[1].clone(),
            method: response.args[2].clone(),
            args: response.args[3..].to_vec(),
        })
    }
}

/// Client for the Host Command service.
///
/// Ad-hoc commands each use a short-lived, freshly authenticated connection,
/// so replies trivially pair with requests. A single long-lived event
/// connection owns the `S:`/`EL:` stream and all subscription-management
/// commands; it reconnects automatically with subscription replay.
///
/// Cloning shares the underlying client.
#[derive(Clone)]
pub struct CommandClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    host: String,
    port: u16,
    tls: bool,
    username: Option<String>,
    password: Option<String>,
    connect_timeout: Duration,
    read_timeout: Duration,
    reconnect_delay: Duration,
    events_tx: broadcast::Sender<Event>,
    book: StdMutex<SubscriptionBook>,
    event_loop: Mutex<Option<EventLoopHandle>>,
    supports_enhanced_log: AtomicBool,
}

struct EventLoopHandle {
    control_tx: mpsc::Sender<ControlRequest>,
    task: JoinHandle<()>,
}

struct ControlRequest {
    request: String,
    reply: oneshot::Sender<ClientResult<CommandResponse>>,
}

impl fmt::Debug for CommandClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandClient")
            .field("host", &self.inner.host)
            .field("port", &self.inner.port)
            .field("tls", &self.inner.tls)
            .finish_non_exhaustive()
    }
}

impl CommandClient {
    /// Create a client from the shared configuration.
    pub fn new(config: &VantageConfig) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(ClientInner {
                host: config.host.clone(),
                port: config.command_port(),
                tls: config.command_service.tls,
                username: config.username.clone(),
                password: config.password.clone(),
                connect_timeout: config.command_service.connect_timeout,
                read_timeout: config.command_service.read_timeout,
                reconnect_delay: config.reconnect_delay,
                events_tx,
                book: StdMutex::new(SubscriptionBook::default()),
                event_loop: Mutex::new(None),
                supports_enhanced_log: AtomicBool::new(true),
            }),
        }
    }

    /// Subscribe to the event bus. Events are delivered in the order they
    /// were read off the event connection.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.inner.events_tx.subscribe()
    }

    /// Whether the controller supports enhanced-log object statuses.
    ///
    /// Defaults to true; the facade refines this from the firmware version.
    pub fn supports_enhanced_log(&self) -> bool {
        self.inner.supports_enhanced_log.load(Ordering::Relaxed)
    }

    /// Record whether the controller supports the enhanced log.
    pub fn set_supports_enhanced_log(&self, supported: bool) {
        self.inner
            .supports_enhanced_log
            .store(supported, Ordering::Relaxed);
    }

    /// Send a command over a fresh connection and return its reply.
    pub async fn command(&self, command: &str, params: &[Param]) -> ClientResult<CommandResponse> {
        let mut connection = self.open_connection().await?;
        connection.command(command, params).await
    }

    /// Invoke an object-interface method:
    /// `INVOKE <vid> <Interface.Method> [args…]`.
    pub async fn invoke(
        &self,
        vid: Vid,
        method: &str,
        params: &[Param],
    ) -> ClientResult<InvokeReply> {
        let mut all_params = Vec::with_capacity(params.len() + 2);
        all_params.push(Param::from(vid));
        all_params.push(Param::from(method));
        all_params.extend_from_slice(params);

        let response = self.command("INVOKE", &all_params).await?;
        InvokeReply::from_response(vid, method, response)
    }

    /// Start the event connection if it is not already running.
    ///
    /// The first connection attempt happens on the caller; a login failure
    /// at startup is therefore fatal and propagated. Subsequent failures are
    /// handled by the reconnect loop.
    pub async fn start_event_stream(&self) -> ClientResult<()> {
        let mut guard = self.inner.event_loop.lock().await;
        if let Some(handle) = guard.as_ref() {
            if !handle.task.is_finished() {
                return Ok(());
            }
        }

        let connection = open_authenticated_connection(&self.inner).await?;
        let (control_tx, control_rx) = mpsc::channel(32);
        let task = tokio::spawn(run_event_loop(self.inner.clone(), connection, control_rx));
        *guard = Some(EventLoopHandle { control_tx, task });
        Ok(())
    }

    /// Stop the event connection. Subscription tables are preserved, so a
    /// later restart replays them.
    pub async fn close(&self) {
        let mut guard = self.inner.event_loop.lock().await;
        if let Some(handle) = guard.take() {
            handle.task.abort();
            debug!("event stream stopped");
        }
    }

    /// Subscribe to `S:<CATEGORY>` events for the given categories, sending
    /// `STATUS <CATEGORY>` for each category not already subscribed.
    pub async fn subscribe_status(
        &self,
        categories: &[StatusCategory],
    ) -> ClientResult<StatusSubscription> {
        self.start_event_stream().await?;

        let newly_active: Vec<StatusCategory> = {
            let mut book = self.book();
            categories
                .iter()
                .filter(|category| book.statuses.increment((*category).clone()) == 1)
                .cloned()
                .collect()
        };

        for category in &newly_active {
            if let Err(err) = self.event_command(format!("STATUS {category}")).await {
                let mut book = self.book();
                for category in categories {
                    book.statuses.decrement(category);
                }
                return Err(err);
            }
        }

        Ok(StatusSubscription::new(self.clone(), categories.to_vec()))
    }

    /// Subscribe to object statuses for the given VIDs, sending `ADDSTATUS`
    /// (in batches of up to 16) for each VID not already subscribed.
    pub async fn subscribe_objects(&self, vids: &[Vid]) -> ClientResult<ObjectSubscription> {
        self.start_event_stream().await?;

        let newly_active: Vec<Vid> = {
            let mut book = self.book();
            vids.iter()
                .filter(|vid| book.objects.increment(**vid) == 1)
                .copied()
                .collect()
        };

        for chunk in newly_active.chunks(OBJECT_BATCH_SIZE) {
            let batch: Vec<String> = chunk.iter().map(ToString::to_string).collect();
            if let Err(err) = self
                .event_command(format!("ADDSTATUS {}", batch.join(" ")))
                .await
            {
                let mut book = self.book();
                for vid in vids {
                    book.objects.decrement(vid);
                }
                return Err(err);
            }
        }

        Ok(ObjectSubscription::new(self.clone(), vids.to_vec()))
    }

    /// Subscribe to enhanced-log events for the given log types, sending
    /// `ELENABLE <type> ON` and `ELLOG <type> ON` for each type not already
    /// subscribed.
    pub async fn subscribe_enhanced_log(
        &self,
        log_types: &[&str],
    ) -> ClientResult<EnhancedLogSubscription> {
        self.start_event_stream().await?;

        let newly_active: Vec<String> = {
            let mut book = self.book();
            log_types
                .iter()
                .filter(|log_type| book.event_logs.increment((*log_type).to_string()) == 1)
                .map(|log_type| (*log_type).to_string())
                .collect()
        };

        for log_type in &newly_active {
            let result = async {
                self.event_command(format!("ELENABLE {log_type} ON")).await?;
                self.event_command(format!("ELLOG {log_type} ON")).await
            }
            .await;

            if let Err(err) = result {
                let mut book = self.book();
                for log_type in log_types {
                    book.event_logs.decrement(&(*log_type).to_string());
                }
                return Err(err);
            }
        }

        Ok(EnhancedLogSubscription::new(
            self.clone(),
            log_types.iter().map(|s| (*s).to_string()).collect(),
        ))
    }

    /// Execute a subscription-management command on the event connection.
    pub(crate) async fn event_command(&self, request: String) -> ClientResult<CommandResponse> {
        self.start_event_stream().await?;

        let control_tx = {
            let guard = self.inner.event_loop.lock().await;
            guard.as_ref().map(|handle| handle.control_tx.clone())
        }
        .ok_or_else(|| ClientError::Connection("event stream is not running".into()))?;

        let (reply_tx, reply_rx) = oneshot::channel();
        control_tx
            .send(ControlRequest {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| ClientError::Connection("event stream terminated".into()))?;

        reply_rx
            .await
            .map_err(|_| ClientError::Connection("event stream terminated".into()))?
    }

    pub(crate) fn book(&self) -> MutexGuard<'_, SubscriptionBook> {
        self.inner
            .book
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    async fn open_connection(&self) -> ClientResult<CommandConnection> {
        open_authenticated_connection(&self.inner).await
    }
}

/// Open and authenticate a connection with the client's settings.
async fn open_authenticated_connection(inner: &ClientInner) -> ClientResult<CommandConnection> {
    let mut connection = CommandConnection::open(
        &inner.host,
        inner.port,
        inner.tls,
        inner.connect_timeout,
        inner.read_timeout,
    )
    .await?;

    if let (Some(user), Some(password)) = (&inner.username, &inner.password) {
        connection.authenticate(user, password).await?;
    }

    Ok(connection)
}

/// The event-connection task: serves events and control commands, and
/// reconnects with subscription replay on any failure.
async fn run_event_loop(
    inner: Arc<ClientInner>,
    first_connection: CommandConnection,
    mut control_rx: mpsc::Receiver<ControlRequest>,
) {
    let mut pending = Some(first_connection);
    let mut first = true;

    loop {
        let mut connection = match pending.take() {
            Some(connection) => connection,
            None => match open_authenticated_connection(&inner).await {
                Ok(connection) => connection,
                Err(err) => {
                    warn!(error = %err, "event connection attempt failed");
                    tokio::time::sleep(inner.reconnect_delay).await;
                    continue;
                }
            },
        };

        if let Err(err) = replay_subscriptions(&inner, &mut connection).await {
            warn!(error = %err, "subscription replay failed");
            tokio::time::sleep(inner.reconnect_delay).await;
            continue;
        }

        if first {
            info!("connected and listening for events");
            emit(&inner, Event::Connected);
        } else {
            info!("event connection re-established");
            emit(&inner, Event::Reconnected);
        }
        first = false;

        let closed = serve(&inner, &mut connection, &mut control_rx).await;
        emit(&inner, Event::Disconnected);
        if closed {
            return;
        }

        tokio::time::sleep(inner.reconnect_delay).await;
    }
}

/// Serve one live connection. Returns true when the control channel closed
/// (client shut down), false when the connection was lost.
async fn serve(
    inner: &ClientInner,
    connection: &mut CommandConnection,
    control_rx: &mut mpsc::Receiver<ControlRequest>,
) -> bool {
    loop {
        tokio::select! {
            line = connection.next_line() => match line {
                Ok(line) => handle_event_line(inner, &line),
                Err(err) => {
                    warn!(error = %err, "event connection lost");
                    return false;
                }
            },
            control = control_rx.recv() => match control {
                Some(request) => {
                    let result = connection
                        .request_with_events(&request.request, |event| {
                            handle_event_line(inner, event);
                        })
                        .await;
                    let connection_lost =
                        matches!(&result, Err(err) if err.is_connection_error());
                    let _ = request.reply.send(result);
                    if connection_lost {
                        return false;
                    }
                }
                None => return true,
            },
        }
    }
}

/// Replay every subscription whose counter is positive, in the fixed order
/// categories → objects → event logs.
async fn replay_subscriptions(
    inner: &ClientInner,
    connection: &mut CommandConnection,
) -> ClientResult<()> {
    let (categories, vids, log_types) = {
        let book = inner.book.lock().unwrap_or_else(PoisonError::into_inner);
        (
            book.statuses.active(),
            book.objects.active(),
            book.event_logs.active(),
        )
    };

    if categories.is_empty() && vids.is_empty() && log_types.is_empty() {
        return Ok(());
    }

    debug!(
        categories = categories.len(),
        objects = vids.len(),
        logs = log_types.len(),
        "replaying subscriptions"
    );

    for category in categories {
        connection
            .request_with_events(&format!("STATUS {category}"), |event| {
                handle_event_line(inner, event);
            })
            .await?;
    }

    for chunk in vids.chunks(OBJECT_BATCH_SIZE) {
        let batch: Vec<String> = chunk.iter().map(ToString::to_string).collect();
        connection
            .request_with_events(&format!("ADDSTATUS {}", batch.join(" ")), |event| {
                handle_event_line(inner, event);
            })
            .await?;
    }

    for log_type in log_types {
        connection
            .request_with_events(&format!("ELENABLE {log_type} ON"), |event| {
                handle_event_line(inner, event);
            })
            .await?;
        connection
            .request_with_events(&format!("ELLOG {log_type} ON"), |event| {
                handle_event_line(inner, event);
            })
            .await?;
    }

    Ok(())
}

/// Parse an `S:`/`EL:` line and publish it to the event bus.
fn handle_event_line(inner: &ClientInner, line: &str) {
    if line.starts_with("S:") {
        let tokens = tokenize(line);
        if tokens.len() < 2 {
            warn!(line, "malformed status event");
            return;
        }

        let category = StatusCategory::from_wire(&tokens[0][2..]);
        let Ok(vid) = tokens[1].parse::<Vid>() else {
            warn!(line, "status event with invalid VID");
            return;
        };

        emit(
            inner,
            Event::Status {
                category,
                vid,
                args: tokens[2..].to_vec(),
            },
        );
    } else if let Some(body) = line.strip_prefix("EL:") {
        emit(
            inner,
            Event::EnhancedLog {
                log: body.trim_start().to_string(),
            },
        );
    } else {
        warn!(line, "unexpected line on event connection");
    }
}

fn emit(inner: &ClientInner, event: Event) {
    // Send only fails when there are no receivers, which is fine
    let _ = inner.events_tx.send(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(args: &[&str]) -> CommandResponse {
        CommandResponse {
            command: "INVOKE".into(),
            args: args.iter().map(ToString::to_string).collect(),
            data: vec![],
        }
    }

    #[test]
    fn test_invoke_reply_decode() {
        let decoded = InvokeReply::from_response(
            42,
            "Load.GetLevel",
            reply(&["42", "75.000", "Load.GetLevel"]),
        )
        .unwrap();
        assert_eq!(decoded.vid, 42);
        assert_eq!(decoded.result, "75.000");
        assert!(decoded.args.is_empty());
    }

    #[test]
    fn test_invoke_reply_extra_args() {
        let decoded = InvokeReply::from_response(
            10,
            "Blind.GetBlindState",
            reply(&["10", "1", "Blind.GetBlindState", "25000", "75000"]),
        )
        .unwrap();
        assert_eq!(decoded.args, vec!["25000", "75000"]);
    }

    #[test]
    fn test_invoke_reply_mismatch() {
        let err = InvokeReply::from_response(
            42,
            "Load.GetLevel",
            reply(&["42", "0", "Blind.GetPosition"]),
        )
        .unwrap_err();
        assert!(matches!(err, ClientError::Response(_)));

        let err =
            InvokeReply::from_response(42, "Load.GetLevel", reply(&["43", "0", "Load.GetLevel"]))
                .unwrap_err();
        assert!(matches!(err, ClientError::Response(_)));
    }

    #[test]
    fn test_invoke_reply_short() {
        let err = InvokeReply::from_response(42, "Load.GetLevel", reply(&["42"])).unwrap_err();
        assert!(matches!(err, ClientError::Response(_)));
    }
}
