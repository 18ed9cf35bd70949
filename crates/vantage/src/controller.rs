//! The generic controller core: population, state fetch, and status
//! routing for one family of object types.

use crate::events::ObjectEvent;
use crate::query::QuerySet;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex as StdMutex, PoisonError, RwLock as StdRwLock};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use vantage_command::{
    CommandClient, EnhancedLogSubscription, Event, StatusCategory, StatusSubscription,
};
use vantage_common::{tokenize, ClientResult, Vid};
use vantage_config::ConfigClient;
use vantage_objects::{ConfigObject, StatefulObject};

/// Capacity of a controller's object-event channel.
const OBJECT_EVENT_CAPACITY: usize = 256;

/// Static description of a controller family.
#[derive(Debug, Clone, Copy)]
pub struct ControllerMeta {
    /// The wire tags this controller enumerates.
    pub vantage_types: &'static [&'static str],
    /// The legacy status categories relevant to this family.
    pub status_categories: &'static [StatusCategory],
    /// Whether this controller must use category statuses even when the
    /// enhanced log is available.
    pub force_category_status: bool,
}

/// Which status-event shape a controller is monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusType {
    /// Object statuses from the enhanced log (`STATUS`/`STATUSEX`).
    Object,
    /// Legacy category statuses (`S:LOAD`, `S:BLIND`, …).
    Category,
}

#[derive(Debug, Default)]
struct MonitorState {
    status_type: Option<StatusType>,
    routing_task: Option<JoinHandle<()>>,
    status_subscription: Option<StatusSubscription>,
    log_subscription: Option<EnhancedLogSubscription>,
}

/// State and behavior shared by every typed controller.
///
/// The controller owns an ordered `VID → object` map. Initialization is
/// exclusive; reads take lock-free snapshots of already-populated data.
#[derive(Debug, Clone)]
pub struct ControllerCore<T: StatefulObject> {
    meta: &'static ControllerMeta,
    config_client: ConfigClient,
    command_client: CommandClient,
    objects: Arc<StdRwLock<BTreeMap<Vid, T>>>,
    initialized: Arc<AtomicBool>,
    init_lock: Arc<Mutex<()>>,
    events_tx: broadcast::Sender<ObjectEvent<T>>,
    monitor: Arc<StdMutex<MonitorState>>,
}

impl<T: StatefulObject> ControllerCore<T> {
    pub(crate) fn new(
        meta: &'static ControllerMeta,
        config_client: ConfigClient,
        command_client: CommandClient,
    ) -> Self {
        let (events_tx, _) = broadcast::channel(OBJECT_EVENT_CAPACITY);
        Self {
            meta,
            config_client,
            command_client,
            objects: Arc::new(StdRwLock::new(BTreeMap::new())),
            initialized: Arc::new(AtomicBool::new(false)),
            init_lock: Arc::new(Mutex::new(())),
            events_tx,
            monitor: Arc::new(StdMutex::new(MonitorState::default())),
        }
    }

    /// The wire tags this controller enumerates.
    pub fn vantage_types(&self) -> &'static [&'static str] {
        self.meta.vantage_types
    }

    /// Which status shape the controller is monitoring, if any.
    pub fn status_type(&self) -> Option<StatusType> {
        self.monitor_state().status_type
    }

    /// Whether the controller has completed an initial population.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Subscribe to this controller's object lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<ObjectEvent<T>> {
        self.events_tx.subscribe()
    }

    /// Populate the controller from the configuration service, then
    /// optionally fetch object state and enable state monitoring.
    ///
    /// Re-initialization diffs against the previous population and emits
    /// `Added`/`Updated`/`Deleted` events accordingly.
    pub async fn initialize(
        &self,
        fetch_state: bool,
        enable_state_monitoring: bool,
    ) -> ClientResult<()> {
        // Serialize concurrent initializations; the diff batch-modifies the
        // object map.
        let guard = self.init_lock.lock().await;

        let mut incoming: Vec<T> = Vec::new();
        let mut stream = self.config_client.get_objects(self.meta.vantage_types).await?;
        while let Some(result) = stream.next().await {
            let el = result?;
            match ConfigObject::from_xml(&el) {
                Ok(Some(object)) => {
                    if let Some(object) = T::from_config(object) {
                        incoming.push(object);
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    // Tolerate single malformed objects rather than failing
                    // the whole enumeration
                    warn!(tag = %el.name, error = %err, "skipping undecodable object");
                }
            }
        }

        let mut events = Vec::new();
        {
            let mut map = self.objects_write();
            let previous: BTreeSet<Vid> = map.keys().copied().collect();
            let mut seen: BTreeSet<Vid> = BTreeSet::new();

            for mut object in incoming {
                let vid = object.vid();
                seen.insert(vid);

                if let Some(existing) = map.get_mut(&vid) {
                    let changed = existing.apply_config(object);
                    if !changed.is_empty() {
                        events.push(ObjectEvent::Updated {
                            object: existing.clone(),
                            changed,
                        });
                    }
                } else {
                    object.attach(self.command_client.clone());
                    events.push(ObjectEvent::Added(object.clone()));
                    map.insert(vid, object);
                }
            }

            for vid in previous.difference(&seen) {
                if let Some(object) = map.remove(vid) {
                    events.push(ObjectEvent::Deleted(object));
                }
            }

            info!(
                types = ?self.meta.vantage_types,
                count = map.len(),
                "controller populated"
            );
        }
        for event in events {
            let _ = self.events_tx.send(event);
        }

        self.initialized.store(true, Ordering::Release);
        drop(guard);

        if !self.is_empty() {
            if fetch_state {
                self.fetch_state().await?;
            }
            if enable_state_monitoring {
                self.enable_state_monitoring().await?;
            }
        }

        Ok(())
    }

    /// Fetch the state of every object, emitting `Updated` events for
    /// changed fields.
    pub async fn fetch_state(&self) -> ClientResult<()> {
        let vids: Vec<Vid> = self.objects_read().keys().copied().collect();

        for vid in vids {
            let Some(mut object) = self.get(vid) else {
                continue;
            };
            let changed = object.fetch_state().await?;
            if !changed.is_empty() {
                self.objects_write().insert(vid, object.clone());
                let _ = self.events_tx.send(ObjectEvent::Updated { object, changed });
            }
        }

        debug!(types = ?self.meta.vantage_types, "controller state fetched");
        Ok(())
    }

    /// Start monitoring for state changes on this controller's objects.
    ///
    /// Object statuses via the enhanced log are preferred; controllers fall
    /// back to category statuses on older firmware or when the family
    /// forces them.
    pub async fn enable_state_monitoring(&self) -> ClientResult<()> {
        if self.status_type().is_some() {
            return Ok(());
        }

        // Subscribe to the bus before sending any subscription commands so
        // no event can slip past the routing task.
        let events = self.command_client.subscribe();

        let use_object_status =
            self.command_client.supports_enhanced_log() && !self.meta.force_category_status;

        let (status_type, status_subscription, log_subscription) = if use_object_status {
            let subscription = self
                .command_client
                .subscribe_enhanced_log(&["STATUS", "STATUSEX"])
                .await?;
            (StatusType::Object, None, Some(subscription))
        } else {
            let subscription = if self.meta.status_categories.is_empty() {
                None
            } else {
                Some(
                    self.command_client
                        .subscribe_status(self.meta.status_categories)
                        .await?,
                )
            };
            (StatusType::Category, subscription, None)
        };

        let routing_task = tokio::spawn(route_events(self.clone(), events, status_type));

        let mut monitor = self.monitor_state();
        monitor.status_type = Some(status_type);
        monitor.routing_task = Some(routing_task);
        monitor.status_subscription = status_subscription;
        monitor.log_subscription = log_subscription;

        info!(types = ?self.meta.vantage_types, ?status_type, "state monitoring enabled");
        Ok(())
    }

    /// Stop monitoring for state changes.
    pub async fn disable_state_monitoring(&self) {
        let (routing_task, status_subscription, log_subscription) = {
            let mut monitor = self.monitor_state();
            monitor.status_type = None;
            (
                monitor.routing_task.take(),
                monitor.status_subscription.take(),
                monitor.log_subscription.take(),
            )
        };

        if let Some(task) = routing_task {
            task.abort();
        }
        if let Some(subscription) = status_subscription {
            subscription.unsubscribe();
        }
        if let Some(subscription) = log_subscription {
            if let Err(err) = subscription.unsubscribe().await {
                warn!(error = %err, "failed to unsubscribe from the enhanced log");
            }
        }
    }

    /// Get an object by VID.
    pub fn get(&self, vid: Vid) -> Option<T> {
        self.objects_read().get(&vid).cloned()
    }

    /// Whether the controller manages the given VID.
    pub fn contains(&self, vid: Vid) -> bool {
        self.objects_read().contains_key(&vid)
    }

    /// Number of managed objects.
    pub fn len(&self) -> usize {
        self.objects_read().len()
    }

    /// Whether the controller manages no objects.
    pub fn is_empty(&self) -> bool {
        self.objects_read().is_empty()
    }

    /// A queryset over a snapshot of the current population.
    pub fn queryset(&self) -> QuerySet<T> {
        QuerySet::new(self.objects_read().values().cloned().collect())
    }

    /// A queryset over the population, initializing the controller first if
    /// it has never been populated.
    pub async fn objects(&self) -> ClientResult<QuerySet<T>> {
        self.ensure_initialized().await?;
        Ok(self.queryset())
    }

    /// Get an object by VID, initializing the controller first if needed.
    pub async fn aget(&self, vid: Vid) -> ClientResult<Option<T>> {
        self.ensure_initialized().await?;
        Ok(self.get(vid))
    }

    /// The first object, initializing the controller first if needed.
    pub async fn afirst(&self) -> ClientResult<Option<T>> {
        self.ensure_initialized().await?;
        Ok(self.queryset().first())
    }

    async fn ensure_initialized(&self) -> ClientResult<()> {
        if !self.is_initialized() {
            self.initialize(true, true).await?;
        }
        Ok(())
    }

    fn objects_read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<Vid, T>> {
        self.objects.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn objects_write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<Vid, T>> {
        self.objects.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn monitor_state(&self) -> std::sync::MutexGuard<'_, MonitorState> {
        self.monitor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Route one object-interface status to the owning object.
    fn dispatch_object_status(&self, vid: Vid, method: &str, result: &str, args: &[String]) {
        let changed_object = {
            let mut map = self.objects_write();
            let Some(object) = map.get_mut(&vid) else {
                return;
            };
            let changed = object.handle_object_status(method, result, args);
            if changed.is_empty() {
                None
            } else {
                Some((object.clone(), changed))
            }
        };

        if let Some((object, changed)) = changed_object {
            let _ = self.events_tx.send(ObjectEvent::Updated { object, changed });
        }
    }

    /// Route one category status to the owning object.
    fn dispatch_category_status(&self, vid: Vid, category: &StatusCategory, args: &[String]) {
        let changed_object = {
            let mut map = self.objects_write();
            let Some(object) = map.get_mut(&vid) else {
                return;
            };
            let changed = object.handle_category_status(category, args);
            if changed.is_empty() {
                None
            } else {
                Some((object.clone(), changed))
            }
        };

        if let Some((object, changed)) = changed_object {
            let _ = self.events_tx.send(ObjectEvent::Updated { object, changed });
        }
    }
}

/// The controller's routing task: translates inbound events into object
/// updates, and schedules a full state re-fetch after a reconnect.
async fn route_events<T: StatefulObject>(
    controller: ControllerCore<T>,
    mut events: broadcast::Receiver<Event>,
    status_type: StatusType,
) {
    loop {
        match events.recv().await {
            Ok(Event::Status {
                category,
                vid,
                args,
            }) if status_type == StatusType::Category => {
                if category == StatusCategory::Status {
                    // S:STATUS <vid> <method> <result> <args…>
                    if args.len() < 2 {
                        continue;
                    }
                    controller.dispatch_object_status(vid, &args[0], &args[1], &args[2..]);
                } else {
                    controller.dispatch_category_status(vid, &category, &args);
                }
            }
            Ok(Event::EnhancedLog { log }) if status_type == StatusType::Object => {
                // EL: <vid> <method> <result> <args…>
                let tokens = tokenize(&log);
                if tokens.len() < 3 {
                    continue;
                }
                let Ok(vid) = tokens[0].parse::<Vid>() else {
                    continue;
                };
                controller.dispatch_object_status(vid, &tokens[1], &tokens[2], &tokens[3..]);
            }
            Ok(Event::Reconnected) => {
                // Refresh state lost while disconnected
                let controller = controller.clone();
                tokio::spawn(async move {
                    if let Err(err) = controller.fetch_state().await {
                        warn!(error = %err, "state re-fetch after reconnect failed");
                    }
                });
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!(missed, "controller event receiver lagged");
            }
            Err(broadcast::error::RecvError::Closed) => return,
        }
    }
}
