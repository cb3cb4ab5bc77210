//! The navigation coordinator.
//!
//! A [`Navigator`] is shared (`Arc<Navigator>`) between view-models and the
//! UI host. Every request becomes a [`NavigationCommand`]; with a controller
//! attached it runs immediately, otherwise it waits in a FIFO queue that is
//! drained on the next attach.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, trace, warn};

use crate::command::NavigationCommand;
use crate::config::NavigatorConfig;
use crate::controller::NavigationController;
use crate::errors::Result;
use crate::interceptor::RouteInterceptor;
use crate::options::NavigationOptions;
use crate::result::{NavigationResultKey, ResultBus, ResultEvent, ResultStream};
use crate::route::Route;
use crate::session::AuthState;

struct NavigatorState {
    controller: Option<Arc<dyn NavigationController>>,
    pending: VecDeque<NavigationCommand>,
}

pub struct Navigator {
    state: Mutex<NavigatorState>,
    results: ResultBus,
    interceptor: RouteInterceptor,
    auth: Arc<dyn AuthState>,
    config: NavigatorConfig,
}

impl Navigator {
    pub fn new(auth: Arc<dyn AuthState>) -> Self {
        Self::with_config(auth, NavigatorConfig::default())
    }

    pub fn with_config(auth: Arc<dyn AuthState>, config: NavigatorConfig) -> Self {
        Self {
            state: Mutex::new(NavigatorState {
                controller: None,
                pending: VecDeque::new(),
            }),
            results: ResultBus::new(config.result_buffer, config.result_replay),
            interceptor: RouteInterceptor::new(),
            auth,
            config,
        }
    }

    /// Replace the login policy.
    pub fn with_interceptor(mut self, interceptor: RouteInterceptor) -> Self {
        self.interceptor = interceptor;
        self
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    /// Bus the UI host hands to its controller so popped results reach
    /// [`Navigator::result_events`] subscribers.
    pub fn results(&self) -> ResultBus {
        self.results.clone()
    }

    fn lock(&self) -> MutexGuard<'_, NavigatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- lifecycle ---

    /// Attach the live controller and run everything queued while detached,
    /// in issue order, before any later request.
    pub fn attach_controller(&self, controller: Arc<dyn NavigationController>) {
        let mut state = self.lock();
        debug!(queued = state.pending.len(), "controller attached");
        state.controller = Some(controller.clone());
        drain_pending(&mut state, controller.as_ref());
    }

    /// Detach `controller` if it is the one currently attached.
    ///
    /// A late detach from a host that was already replaced is ignored.
    pub fn detach_controller(&self, controller: &Arc<dyn NavigationController>) {
        let mut state = self.lock();
        match &state.controller {
            Some(current) if same_controller(current, controller) => {
                state.controller = None;
                debug!("controller detached");
            }
            Some(_) => debug!("ignoring detach from a controller that is no longer attached"),
            None => debug!("ignoring detach: no controller attached"),
        }
    }

    pub fn is_attached(&self) -> bool {
        self.lock().controller.is_some()
    }

    /// Number of commands waiting for a controller.
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    fn execute_or_enqueue(&self, command: NavigationCommand) {
        let mut state = self.lock();
        if let Some(controller) = state.controller.clone() {
            // Leftovers of an interrupted drain still run first.
            drain_pending(&mut state, controller.as_ref());
            debug!(command = command.label(), "executing");
            command.execute(controller.as_ref());
            return;
        }

        if let Some(limit) = self.config.pending_limit {
            let limit = limit.get();
            while state.pending.len() >= limit {
                if let Some(dropped) = state.pending.pop_front() {
                    warn!(
                        dropped = dropped.label(),
                        limit, "pending queue full, dropping oldest command"
                    );
                }
            }
        }
        debug!(
            command = command.label(),
            queued = state.pending.len() + 1,
            "no controller attached, queueing"
        );
        state.pending.push_back(command);
    }

    // --- navigation ---

    /// Navigate to `route`, or to the login screen when `route` needs an
    /// authenticated session and there is none.
    pub fn navigate_to(&self, route: Route, options: Option<NavigationOptions>) {
        let route = if self.interceptor.requires_login(&route) && !self.auth.is_logged_in() {
            let login = self.interceptor.login_route();
            debug!(
                requested = route.name(),
                redirect = login.name(),
                "login required"
            );
            login
        } else {
            route
        };
        self.execute_or_enqueue(NavigationCommand::NavigateTo { route, options });
    }

    /// Navigate to `route` and remove `current`, even if it is the bottom entry.
    pub fn navigate_and_close_current(&self, route: Route, current: Route) {
        self.navigate_to(route, Some(NavigationOptions::close_current(current)));
    }

    pub fn navigate_with_pop_up_to(&self, route: Route, pop_up_to: Route, inclusive: bool) {
        self.navigate_to(route, Some(NavigationOptions::pop_up_to(pop_up_to, inclusive)));
    }

    pub fn navigate_back(&self) {
        self.execute_or_enqueue(NavigationCommand::NavigateUp);
    }

    pub fn navigate_back_to(&self, route: Route, inclusive: bool) {
        self.execute_or_enqueue(NavigationCommand::NavigateBackTo { route, inclusive });
    }

    // --- results ---

    /// Close the current screen, handing `value` to subscribers of `key`.
    ///
    /// If `value` cannot be encoded the result is dropped and the screen is
    /// still closed.
    pub fn pop_with_result<K>(&self, key: &K, value: K::Output)
    where
        K: NavigationResultKey,
    {
        let command = match ResultEvent::encode(key, &value) {
            Ok(event) => NavigationCommand::PopWithResult { event },
            Err(err) => {
                error!(key = key.name(), error = %err, "dropping result that failed to encode");
                NavigationCommand::NavigateUp
            }
        };
        self.execute_or_enqueue(command);
    }

    pub fn navigate_back_with_result<K>(&self, key: &K, value: K::Output)
    where
        K: NavigationResultKey,
    {
        self.pop_with_result(key, value);
    }

    /// Publish `value` under `key` without touching the stack.
    pub fn dispatch_result<K>(&self, key: &K, value: K::Output) -> Result<()>
    where
        K: NavigationResultKey,
    {
        self.results.publish(ResultEvent::encode(key, &value)?);
        Ok(())
    }

    /// Results published under `key`, decoded.
    pub fn result_events<K>(&self, key: &K) -> ResultStream<K::Output>
    where
        K: NavigationResultKey + Clone,
    {
        self.results.events(key.clone())
    }
}

/// Run queued commands in issue order. Each command leaves the queue before it
/// runs, so a panicking command is not replayed.
fn drain_pending(state: &mut NavigatorState, controller: &dyn NavigationController) {
    while let Some(command) = state.pending.pop_front() {
        trace!(command = command.label(), "replaying queued command");
        command.execute(controller);
    }
}

fn same_controller(a: &Arc<dyn NavigationController>, b: &Arc<dyn NavigationController>) -> bool {
    // Compare data pointers only; vtable pointers may differ across codegen units.
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Navigator")
            .field("attached", &state.controller.is_some())
            .field("pending", &state.pending.len())
            .field("results", &self.results)
            .field("config", &self.config)
            .finish()
    }
}
