//! Process-wide navigator binding.
//!
//! Code that cannot receive an `Arc<Navigator>` explicitly (feature
//! navigators, deep call sites) goes through these functions. The application
//! binds its navigator once at startup.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::errors::{NavigationError, Result};
use crate::navigator::Navigator;
use crate::options::NavigationOptions;
use crate::result::{NavigationResultKey, ResultStream};
use crate::route::Route;

static NAVIGATOR: RwLock<Option<Arc<Navigator>>> = RwLock::new(None);

/// Namespace for the process-wide binding.
pub struct NavigationService;

impl NavigationService {
    pub fn bind(navigator: Arc<Navigator>) {
        let mut slot = NAVIGATOR.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            debug!("replacing bound navigator");
        }
        *slot = Some(navigator);
    }

    /// Clear the binding if `navigator` is the bound instance.
    pub fn unbind(navigator: &Arc<Navigator>) {
        let mut slot = NAVIGATOR.write().unwrap_or_else(PoisonError::into_inner);
        if slot
            .as_ref()
            .is_some_and(|bound| Arc::ptr_eq(bound, navigator))
        {
            *slot = None;
        } else {
            debug!("ignoring unbind of a navigator that is not bound");
        }
    }

    pub fn current() -> Option<Arc<Navigator>> {
        NAVIGATOR
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn try_navigator() -> Result<Arc<Navigator>> {
        Self::current().ok_or(NavigationError::NotBound)
    }

    /// The bound navigator.
    ///
    /// # Panics
    ///
    /// If no navigator has been bound; that is a startup wiring bug.
    pub fn require_navigator() -> Arc<Navigator> {
        match Self::current() {
            Some(navigator) => navigator,
            None => panic!("NavigationService used before a Navigator was bound"),
        }
    }
}

pub fn navigate(route: Route, options: Option<NavigationOptions>) {
    NavigationService::require_navigator().navigate_to(route, options);
}

pub fn navigate_and_close_current(route: Route, current: Route) {
    NavigationService::require_navigator().navigate_and_close_current(route, current);
}

pub fn navigate_with_pop_up_to(route: Route, pop_up_to: Route, inclusive: bool) {
    NavigationService::require_navigator().navigate_with_pop_up_to(route, pop_up_to, inclusive);
}

pub fn navigate_back() {
    NavigationService::require_navigator().navigate_back();
}

pub fn navigate_back_to(route: Route, inclusive: bool) {
    NavigationService::require_navigator().navigate_back_to(route, inclusive);
}

pub fn pop_with_result<K: NavigationResultKey>(key: &K, value: K::Output) {
    NavigationService::require_navigator().pop_with_result(key, value);
}

pub fn navigate_back_with_result<K: NavigationResultKey>(key: &K, value: K::Output) {
    NavigationService::require_navigator().navigate_back_with_result(key, value);
}

pub fn result_events<K>(key: &K) -> ResultStream<K::Output>
where
    K: NavigationResultKey + Clone,
{
    NavigationService::require_navigator().result_events(key)
}

/// Serializes unit tests that touch the global binding.
#[cfg(test)]
pub(crate) fn test_guard() -> std::sync::MutexGuard<'static, ()> {
    static GUARD: std::sync::Mutex<()> = std::sync::Mutex::new(());
    GUARD.lock().unwrap_or_else(PoisonError::into_inner)
}
