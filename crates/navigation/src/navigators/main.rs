//! Main shell and its bottom-bar tabs.

use crate::route::Route;
use crate::service::{navigate, navigate_and_close_current};

pub fn to_main() {
    navigate(Route::Main, None);
}

/// Open the main shell and drop `current` (usually a launch screen).
pub fn to_main_and_close_current(current: Route) {
    navigate_and_close_current(Route::Main, current);
}

pub fn to_home() {
    navigate(Route::Home, None);
}

pub fn to_category() {
    navigate(Route::Category, None);
}

/// Cart as a standalone screen; `show_back_icon` is set when it is not
/// opened from the bottom bar.
pub fn to_cart(show_back_icon: bool) {
    navigate(Route::Cart { show_back_icon }, None);
}

pub fn to_mine() {
    navigate(Route::Mine, None);
}
