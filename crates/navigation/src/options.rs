use serde::{Deserialize, Serialize};

use crate::route::Route;

/// Stack-mutation intent that accompanies a navigate-to request.
///
/// * `pop_up_to` - route the back stack is popped to before the push
/// * `inclusive` - also remove `pop_up_to` itself
/// * `allow_pop_to_empty` - permit clearing the whole stack when `pop_up_to`
///   is the bottom entry (e.g. replacing `Splash` with `Main`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationOptions {
    pub pop_up_to: Option<Route>,
    pub inclusive: bool,
    pub allow_pop_to_empty: bool,
}

impl NavigationOptions {
    pub fn pop_up_to(route: Route, inclusive: bool) -> Self {
        Self {
            pop_up_to: Some(route),
            inclusive,
            allow_pop_to_empty: false,
        }
    }

    /// Remove `current` (even if it is the bottom entry) before pushing.
    pub fn close_current(current: Route) -> Self {
        Self {
            pop_up_to: Some(current),
            inclusive: true,
            allow_pop_to_empty: true,
        }
    }
}
