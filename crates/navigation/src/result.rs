/*!
Typed result channel.

A screen that is about to be popped can hand a value back to whichever
earlier screen is listening:

```ignore
// child screen
navigator.pop_with_result(&REFRESH_RESULT_KEY, RefreshResult::refresh());

// parent view-model
let mut refreshes = navigator.result_events(&REFRESH_RESULT_KEY);
while let Some(result) = refreshes.next().await { /* reload */ }
```

The publisher does not know who, if anyone, subscribed. Keys carry their own
codec so values cross the bus as a transport-neutral [`RawResult`] and are
decoded back into the key's `Output` type per subscriber.

The bus is a `tokio::sync::broadcast` channel. A result published while nobody
listens on its key is held until the next subscriber for that key takes it, so
a parent that subscribes shortly after the pop still sees the value. Once a
result has been handed out it is gone; a later subscriber does not see it again.
*/

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use futures::future;
use futures::stream::{self, BoxStream, StreamExt};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{trace, warn};

use crate::errors::{NavigationError, Result};

/// Transport-neutral representation of a result value.
pub type RawResult = serde_json::Value;

/// Stream of decoded results for one key.
pub type ResultStream<T> = BoxStream<'static, T>;

/// Identifies a result channel and defines how its payload crosses the bus.
pub trait NavigationResultKey: Send + Sync + 'static {
    type Output: Send + 'static;

    /// Stable channel name; two keys with the same name share a channel.
    fn name(&self) -> &str;

    fn serialize(&self, value: &Self::Output) -> Result<RawResult>;

    fn deserialize(&self, raw: &RawResult) -> Result<Self::Output>;
}

/// Result key backed by a serde_json codec.
pub struct JsonResultKey<T> {
    name: &'static str,
    _output: PhantomData<fn() -> T>,
}

impl<T> JsonResultKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _output: PhantomData,
        }
    }
}

impl<T> Clone for JsonResultKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for JsonResultKey<T> {}

impl<T> PartialEq for JsonResultKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for JsonResultKey<T> {}

impl<T> fmt::Debug for JsonResultKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("JsonResultKey").field(&self.name).finish()
    }
}

impl<T> NavigationResultKey for JsonResultKey<T>
where
    T: Serialize + DeserializeOwned + Send + 'static,
{
    type Output = T;

    fn name(&self) -> &str {
        self.name
    }

    fn serialize(&self, value: &T) -> Result<RawResult> {
        serde_json::to_value(value).map_err(|source| NavigationError::Encode {
            key: self.name.to_owned(),
            source,
        })
    }

    fn deserialize(&self, raw: &RawResult) -> Result<T> {
        T::deserialize(raw).map_err(|source| NavigationError::Decode {
            key: self.name.to_owned(),
            source,
        })
    }
}

/// "The previous screen should reload its data."
///
/// `refresh == Some(true)` asks for a reload; `false` or `None` does not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshResult {
    pub refresh: Option<bool>,
}

impl RefreshResult {
    pub fn refresh() -> Self {
        Self {
            refresh: Some(true),
        }
    }

    pub fn needs_refresh(&self) -> bool {
        self.refresh == Some(true)
    }
}

/// Shared key for [`RefreshResult`] hand-backs.
pub const REFRESH_RESULT_KEY: JsonResultKey<RefreshResult> = JsonResultKey::new("refresh_result");

/// One published result, already encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEvent {
    pub key: String,
    pub raw: RawResult,
}

impl ResultEvent {
    /// Encode `value` with `key`'s codec.
    pub fn encode<K: NavigationResultKey>(key: &K, value: &K::Output) -> Result<Self> {
        Ok(Self {
            key: key.name().to_owned(),
            raw: key.serialize(value)?,
        })
    }
}

/// Multi-producer / multi-consumer bus for [`ResultEvent`]s.
///
/// Cheap to clone; all clones publish into the same channel.
#[derive(Clone)]
pub struct ResultBus {
    inner: Arc<BusInner>,
}

struct BusInner {
    tx: broadcast::Sender<ResultEvent>,
    state: Mutex<BusState>,
    replay_capacity: usize,
}

#[derive(Default)]
struct BusState {
    /// Events published while nobody listened on their key.
    pending: VecDeque<ResultEvent>,
    /// Live subscriptions per key.
    listeners: HashMap<String, usize>,
}

impl BusInner {
    fn state(&self) -> MutexGuard<'_, BusState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A subscription taken from the bus for one key: events that were waiting
/// for a listener plus the live receiver.
pub struct Subscription {
    backlog: Vec<ResultEvent>,
    rx: broadcast::Receiver<ResultEvent>,
    listener: Listener,
}

/// Keeps a key registered as listened-to until dropped.
struct Listener {
    bus: Weak<BusInner>,
    key: String,
}

impl Drop for Listener {
    fn drop(&mut self) {
        let Some(bus) = self.bus.upgrade() else {
            return;
        };
        let mut state = bus.state();
        if let Some(count) = state.listeners.get_mut(&self.key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                state.listeners.remove(&self.key);
            }
        }
    }
}

impl ResultBus {
    /// `buffer` bounds how far a slow subscriber may lag before losing events;
    /// `replay` bounds how many events are held for keys nobody listens on yet.
    pub fn new(buffer: usize, replay: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer.max(1));
        Self {
            inner: Arc::new(BusInner {
                tx,
                state: Mutex::new(BusState::default()),
                replay_capacity: replay,
            }),
        }
    }

    /// Deliver `event` to the live subscribers of its key, or hold it for the
    /// next subscriber when there are none.
    pub fn publish(&self, event: ResultEvent) {
        // The state lock is held across the send so a concurrent subscribe
        // sees each event exactly once: either in its backlog or live.
        let mut state = self.inner.state();
        let listeners = state.listeners.get(&event.key).copied().unwrap_or(0);
        if listeners > 0 {
            let key = event.key.clone();
            match self.inner.tx.send(event) {
                Ok(_) => trace!(%key, listeners, "result published"),
                Err(_) => trace!(%key, "result published without live receivers"),
            }
            return;
        }

        if self.inner.replay_capacity == 0 {
            trace!(key = %event.key, "no listener, result dropped");
            return;
        }
        if state.pending.len() == self.inner.replay_capacity {
            if let Some(dropped) = state.pending.pop_front() {
                warn!(key = %dropped.key, "result never collected, dropping");
            }
        }
        trace!(key = %event.key, "no listener yet, holding result");
        state.pending.push_back(event);
    }

    /// Subscribe to `key`. Events held for `key` move into this subscription,
    /// so each is handed out once.
    pub fn subscribe(&self, key: &str) -> Subscription {
        let mut state = self.inner.state();
        let (backlog, rest): (VecDeque<_>, VecDeque<_>) = std::mem::take(&mut state.pending)
            .into_iter()
            .partition(|event| event.key == key);
        let backlog = Vec::from(backlog);
        state.pending = rest;
        *state.listeners.entry(key.to_owned()).or_default() += 1;
        Subscription {
            backlog,
            rx: self.inner.tx.subscribe(),
            listener: Listener {
                bus: Arc::downgrade(&self.inner),
                key: key.to_owned(),
            },
        }
    }

    /// Decoded stream of results published under `key` from now on, preceded
    /// by any that were waiting for a listener.
    pub fn events<K>(&self, key: K) -> ResultStream<K::Output>
    where
        K: NavigationResultKey,
    {
        let name = key.name().to_owned();
        self.subscribe(&name)
            .into_stream()
            .filter_map(move |event| {
                let decoded = if event.key == name {
                    match key.deserialize(&event.raw) {
                        Ok(value) => Some(value),
                        Err(err) => {
                            warn!(key = %name, error = %err, "dropping undecodable result");
                            None
                        }
                    }
                } else {
                    None
                };
                future::ready(decoded)
            })
            .boxed()
    }
}

impl Default for ResultBus {
    fn default() -> Self {
        Self::new(32, 32)
    }
}

impl fmt::Debug for ResultBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultBus")
            .field("subscribers", &self.inner.tx.receiver_count())
            .field("replay_capacity", &self.inner.replay_capacity)
            .finish()
    }
}

impl Subscription {
    /// Raw event stream; ends when every bus handle is dropped.
    ///
    /// The key stays registered as listened-to while the stream is alive.
    pub fn into_stream(self) -> BoxStream<'static, ResultEvent> {
        let Self {
            backlog,
            rx,
            listener,
        } = self;
        let live = stream::unfold((rx, listener), |(mut rx, listener)| async move {
            loop {
                match rx.recv().await {
                    Ok(event) => return Some((event, (rx, listener))),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "result subscriber lagged behind, events lost");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        });
        stream::iter(backlog).chain(live).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct PickedAddress {
        id: i64,
        label: String,
    }

    const ADDRESS_KEY: JsonResultKey<PickedAddress> = JsonResultKey::new("picked_address");

    fn address(id: i64) -> PickedAddress {
        PickedAddress {
            id,
            label: format!("address {id}"),
        }
    }

    #[test]
    fn json_key_round_trips() {
        let value = address(5);
        let raw = ADDRESS_KEY.serialize(&value).expect("encode");
        assert_eq!(ADDRESS_KEY.deserialize(&raw).expect("decode"), value);
    }

    #[test]
    fn decode_error_names_the_key() {
        let err = ADDRESS_KEY
            .deserialize(&serde_json::json!({ "nope": true }))
            .unwrap_err();
        assert!(matches!(err, NavigationError::Decode { ref key, .. } if key == "picked_address"));
    }

    #[test]
    fn refresh_result_flags() {
        assert!(RefreshResult::refresh().needs_refresh());
        assert!(!RefreshResult::default().needs_refresh());
        assert!(!RefreshResult {
            refresh: Some(false)
        }
        .needs_refresh());
    }

    #[tokio::test]
    async fn publish_then_subscribe_replays() {
        let bus = ResultBus::default();
        bus.publish(ResultEvent::encode(&ADDRESS_KEY, &address(1)).unwrap());

        let mut events = bus.events(ADDRESS_KEY);
        assert_eq!(events.next().await, Some(address(1)));
    }

    #[tokio::test]
    async fn subscribers_only_see_their_key() {
        let bus = ResultBus::default();
        let mut addresses = bus.events(ADDRESS_KEY);
        let mut refreshes = bus.events(REFRESH_RESULT_KEY);

        bus.publish(ResultEvent::encode(&REFRESH_RESULT_KEY, &RefreshResult::refresh()).unwrap());
        bus.publish(ResultEvent::encode(&ADDRESS_KEY, &address(2)).unwrap());

        assert_eq!(addresses.next().await, Some(address(2)));
        assert_eq!(refreshes.next().await, Some(RefreshResult::refresh()));
    }

    #[tokio::test]
    async fn every_subscriber_is_notified() {
        let bus = ResultBus::new(8, 0);
        let mut first = bus.events(ADDRESS_KEY);
        let mut second = bus.events(ADDRESS_KEY);

        bus.publish(ResultEvent::encode(&ADDRESS_KEY, &address(3)).unwrap());

        assert_eq!(first.next().await, Some(address(3)));
        assert_eq!(second.next().await, Some(address(3)));
    }

    #[tokio::test]
    async fn undecodable_events_are_skipped() {
        let bus = ResultBus::default();
        let mut events = bus.events(ADDRESS_KEY);

        bus.publish(ResultEvent {
            key: "picked_address".into(),
            raw: serde_json::json!("garbage"),
        });
        bus.publish(ResultEvent::encode(&ADDRESS_KEY, &address(4)).unwrap());

        assert_eq!(events.next().await, Some(address(4)));
    }

    #[test]
    fn replay_ring_is_bounded() {
        let bus = ResultBus::new(8, 2);
        for id in 1..=3 {
            bus.publish(ResultEvent::encode(&ADDRESS_KEY, &address(id)).unwrap());
        }

        let subscription = bus.subscribe("picked_address");
        let backlog: Vec<i64> = subscription
            .backlog
            .iter()
            .map(|event| event.raw["id"].as_i64().unwrap())
            .collect();
        assert_eq!(backlog, vec![2, 3]);
    }

    #[tokio::test]
    async fn consumed_result_is_not_delivered_again() {
        use futures::FutureExt;

        let bus = ResultBus::default();
        let mut first = bus.events(REFRESH_RESULT_KEY);
        bus.publish(ResultEvent::encode(&REFRESH_RESULT_KEY, &RefreshResult::refresh()).unwrap());
        assert_eq!(first.next().await, Some(RefreshResult::refresh()));
        drop(first);

        let mut second = bus.events(REFRESH_RESULT_KEY);
        assert_eq!(second.next().now_or_never(), None);
    }

    #[tokio::test]
    async fn held_result_goes_to_one_subscriber() {
        use futures::FutureExt;

        let bus = ResultBus::default();
        bus.publish(ResultEvent::encode(&ADDRESS_KEY, &address(6)).unwrap());

        let mut first = bus.events(ADDRESS_KEY);
        assert_eq!(first.next().await, Some(address(6)));

        let mut second = bus.events(ADDRESS_KEY);
        assert_eq!(second.next().now_or_never(), None);
    }

    #[tokio::test]
    async fn held_results_of_other_keys_stay_held() {
        let bus = ResultBus::default();
        bus.publish(ResultEvent::encode(&ADDRESS_KEY, &address(9)).unwrap());
        bus.publish(ResultEvent::encode(&REFRESH_RESULT_KEY, &RefreshResult::refresh()).unwrap());

        let mut refreshes = bus.events(REFRESH_RESULT_KEY);
        assert_eq!(refreshes.next().await, Some(RefreshResult::refresh()));

        let mut addresses = bus.events(ADDRESS_KEY);
        assert_eq!(addresses.next().await, Some(address(9)));
    }

    #[tokio::test]
    async fn stream_ends_when_bus_dropped() {
        let bus = ResultBus::new(4, 0);
        let mut events = bus.events(ADDRESS_KEY);
        drop(bus);
        assert_eq!(events.next().await, None);
    }
}
