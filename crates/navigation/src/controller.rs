//! Live back stack and the controller that mutates it.
//!
//! The UI host owns a [`BackStack`], wraps it in a [`BackStackController`] and
//! attaches that to the [`Navigator`](crate::Navigator) while it is alive. The
//! host re-renders from [`BackStack::subscribe`].

use std::sync::Arc;

use tokio::sync::watch;
use tracing::trace;

use crate::options::NavigationOptions;
use crate::result::{ResultBus, ResultEvent};
use crate::route::Route;

/// Performs the actual stack mutations for one UI host.
///
/// Implementations are called while the navigator holds its command lock and
/// must not call back into the navigator.
pub trait NavigationController: Send + Sync {
    fn navigate_to(&self, route: Route, options: Option<NavigationOptions>);

    fn navigate_back(&self);

    fn navigate_back_to(&self, route: &Route, inclusive: bool);

    fn pop_with_result(&self, event: ResultEvent);
}

/// Shared handle to an ordered stack of routes; index 0 is the bottom.
#[derive(Debug, Clone)]
pub struct BackStack {
    tx: Arc<watch::Sender<Vec<Route>>>,
}

impl BackStack {
    pub fn new(root: Route) -> Self {
        let (tx, _) = watch::channel(vec![root]);
        Self { tx: Arc::new(tx) }
    }

    pub fn snapshot(&self) -> Vec<Route> {
        self.tx.borrow().clone()
    }

    pub fn top(&self) -> Option<Route> {
        self.tx.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.borrow().is_empty()
    }

    /// Receiver notified after every mutation that changed the stack.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Route>> {
        self.tx.subscribe()
    }

    pub fn push(&self, route: Route) {
        self.tx.send_modify(|entries| entries.push(route));
    }

    /// Apply the pop-up-to of `options`, then push `route`, as one update.
    ///
    /// Watchers never observe the intermediate stack, which may be empty when
    /// `allow_pop_to_empty` removes the bottom entry.
    pub fn push_with_options(&self, route: Route, options: Option<NavigationOptions>) {
        self.tx.send_modify(|entries| {
            if let Some(NavigationOptions {
                pop_up_to: Some(target),
                inclusive,
                allow_pop_to_empty,
            }) = options
            {
                pop_up_to(entries, &target, inclusive, allow_pop_to_empty);
            }
            entries.push(route);
        });
    }

    /// Remove the top entry; the bottom entry is never popped implicitly.
    pub fn pop_one(&self) -> bool {
        let popped = self.tx.send_if_modified(|entries| {
            if entries.len() > 1 {
                entries.pop();
                true
            } else {
                false
            }
        });
        if !popped {
            trace!("pop ignored: single-entry stack");
        }
        popped
    }

    /// Pop entries above the top-most occurrence of `route`
    /// (and `route` itself when `inclusive`).
    ///
    /// When that would remove the bottom entry, the stack is cleared only if
    /// `allow_pop_to_empty`; otherwise the bottom entry is kept.
    pub fn pop_up_to(&self, route: &Route, inclusive: bool, allow_pop_to_empty: bool) -> bool {
        let changed = self
            .tx
            .send_if_modified(|entries| pop_up_to(entries, route, inclusive, allow_pop_to_empty));
        if !changed {
            trace!(target_route = route.name(), inclusive, "pop-up-to left stack unchanged");
        }
        changed
    }
}

fn pop_up_to(
    entries: &mut Vec<Route>,
    route: &Route,
    inclusive: bool,
    allow_pop_to_empty: bool,
) -> bool {
    let Some(target) = entries.iter().rposition(|entry| entry == route) else {
        return false;
    };

    let remove_from = if inclusive { target } else { target + 1 };
    if remove_from >= entries.len() {
        return false;
    }

    if remove_from == 0 {
        if allow_pop_to_empty {
            entries.clear();
            return true;
        }
        if entries.len() > 1 {
            entries.truncate(1);
            return true;
        }
        return false;
    }

    entries.truncate(remove_from);
    true
}

/// [`NavigationController`] over a [`BackStack`].
#[derive(Debug, Clone)]
pub struct BackStackController {
    stack: BackStack,
    results: ResultBus,
}

impl BackStackController {
    pub fn new(stack: BackStack, results: ResultBus) -> Self {
        Self { stack, results }
    }

    pub fn stack(&self) -> &BackStack {
        &self.stack
    }
}

impl NavigationController for BackStackController {
    fn navigate_to(&self, route: Route, options: Option<NavigationOptions>) {
        self.stack.push_with_options(route, options);
    }

    fn navigate_back(&self) {
        self.stack.pop_one();
    }

    fn navigate_back_to(&self, route: &Route, inclusive: bool) {
        self.stack.pop_up_to(route, inclusive, false);
    }

    fn pop_with_result(&self, event: ResultEvent) {
        self.results.publish(event);
        self.stack.pop_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn stack_of(routes: &[Route]) -> BackStack {
        let (root, rest) = routes.split_first().expect("non-empty");
        let stack = BackStack::new(root.clone());
        for route in rest {
            stack.push(route.clone());
        }
        stack
    }

    fn detail(order_id: i64) -> Route {
        Route::OrderDetail { order_id }
    }

    #[test]
    fn pop_one_keeps_bottom_entry() {
        let stack = stack_of(&[Route::Home]);
        assert!(!stack.pop_one());
        assert_eq!(stack.snapshot(), vec![Route::Home]);

        stack.push(Route::Settings);
        assert!(stack.pop_one());
        assert_eq!(stack.snapshot(), vec![Route::Home]);
    }

    #[test]
    fn pop_up_to_targets_most_recent_occurrence() {
        let stack = stack_of(&[
            Route::Home,
            detail(1),
            Route::Settings,
            detail(1),
            Route::About,
        ]);
        assert!(stack.pop_up_to(&detail(1), false, false));
        assert_eq!(
            stack.snapshot(),
            vec![Route::Home, detail(1), Route::Settings, detail(1)]
        );
    }

    #[test]
    fn pop_up_to_inclusive_removes_target() {
        let stack = stack_of(&[Route::Home, Route::Settings, Route::About]);
        assert!(stack.pop_up_to(&Route::Settings, true, false));
        assert_eq!(stack.snapshot(), vec![Route::Home]);
    }

    #[test]
    fn pop_up_to_absent_route_is_noop() {
        let stack = stack_of(&[Route::Home, Route::Settings]);
        assert!(!stack.pop_up_to(&Route::About, false, false));
        assert_eq!(stack.snapshot(), vec![Route::Home, Route::Settings]);
    }

    #[test]
    fn pop_up_to_top_entry_exclusive_is_noop() {
        let stack = stack_of(&[Route::Home, Route::Settings]);
        assert!(!stack.pop_up_to(&Route::Settings, false, false));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn bottom_inclusive_keeps_bottom_without_allow_empty() {
        let stack = stack_of(&[Route::Splash, Route::Guide { from_settings: false }]);
        assert!(stack.pop_up_to(&Route::Splash, true, false));
        assert_eq!(stack.snapshot(), vec![Route::Splash]);

        let single = stack_of(&[Route::Splash]);
        assert!(!single.pop_up_to(&Route::Splash, true, false));
        assert_eq!(single.snapshot(), vec![Route::Splash]);
    }

    #[test]
    fn bottom_inclusive_with_allow_empty_clears() {
        let stack = stack_of(&[Route::Splash, Route::Guide { from_settings: false }]);
        assert!(stack.pop_up_to(&Route::Splash, true, true));
        assert!(stack.is_empty());

        let single = stack_of(&[Route::Splash]);
        assert!(single.pop_up_to(&Route::Splash, true, true));
        assert!(single.is_empty());
    }

    #[test]
    fn navigate_to_with_close_current_replaces_bottom() {
        let stack = stack_of(&[Route::Splash]);
        let controller = BackStackController::new(stack.clone(), ResultBus::default());
        controller.navigate_to(
            Route::Main,
            Some(NavigationOptions::close_current(Route::Splash)),
        );
        assert_eq!(stack.snapshot(), vec![Route::Main]);
    }

    #[test]
    fn navigate_back_to_never_empties() {
        let stack = stack_of(&[Route::Home, Route::Settings]);
        let controller = BackStackController::new(stack.clone(), ResultBus::default());
        controller.navigate_back_to(&Route::Home, true);
        assert_eq!(stack.snapshot(), vec![Route::Home]);
    }

    #[test]
    fn close_current_is_never_observed_empty() {
        use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

        let stack = stack_of(&[Route::Splash]);
        let controller = BackStackController::new(stack.clone(), ResultBus::default());
        let done = AtomicBool::new(false);
        let empty_reads = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                while !done.load(Ordering::Acquire) {
                    if stack.is_empty() || stack.snapshot().is_empty() {
                        empty_reads.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });

            for round in 0..5_000 {
                let (next, current) = if round % 2 == 0 {
                    (Route::Main, Route::Splash)
                } else {
                    (Route::Splash, Route::Main)
                };
                controller.navigate_to(next, Some(NavigationOptions::close_current(current)));
            }
            done.store(true, Ordering::Release);
        });

        assert_eq!(empty_reads.load(Ordering::Relaxed), 0);
        assert_eq!(stack.snapshot(), vec![Route::Splash]);
    }

    #[tokio::test]
    async fn close_current_notifies_once_with_final_stack() {
        let stack = stack_of(&[Route::Splash]);
        let controller = BackStackController::new(stack.clone(), ResultBus::default());
        let mut rx = stack.subscribe();
        rx.borrow_and_update();

        controller.navigate_to(
            Route::Main,
            Some(NavigationOptions::close_current(Route::Splash)),
        );

        rx.changed().await.expect("sender alive");
        assert_eq!(*rx.borrow_and_update(), vec![Route::Main]);
        assert!(!rx.has_changed().expect("sender alive"));
    }

    #[tokio::test]
    async fn watchers_only_see_real_changes() {
        let stack = stack_of(&[Route::Home]);
        let mut rx = stack.subscribe();
        rx.borrow_and_update();

        stack.pop_one();
        assert!(!rx.has_changed().expect("sender alive"));

        stack.push(Route::Cart {
            show_back_icon: true,
        });
        rx.changed().await.expect("sender alive");
        assert_eq!(
            rx.borrow_and_update().last(),
            Some(&Route::Cart {
                show_back_icon: true
            })
        );
    }

    #[tokio::test]
    async fn pop_with_result_publishes_then_pops() {
        use crate::result::{RefreshResult, REFRESH_RESULT_KEY};
        use futures::StreamExt;

        let bus = ResultBus::default();
        let mut refreshes = bus.events(REFRESH_RESULT_KEY);
        let stack = stack_of(&[Route::OrderList { tab: None }, detail(3)]);
        let controller = BackStackController::new(stack.clone(), bus);

        let event = ResultEvent::encode(&REFRESH_RESULT_KEY, &RefreshResult::refresh()).unwrap();
        controller.pop_with_result(event);

        assert_eq!(stack.snapshot(), vec![Route::OrderList { tab: None }]);
        assert_eq!(refreshes.next().await, Some(RefreshResult::refresh()));
    }
}
