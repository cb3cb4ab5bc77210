use crate::route::Route;
use crate::service::{navigate, navigate_and_close_current};

pub fn to_splash() {
    navigate(Route::Splash, None);
}

pub fn to_guide(from_settings: bool) {
    navigate(Route::Guide { from_settings }, None);
}

pub fn to_guide_and_close_current(current: Route, from_settings: bool) {
    navigate_and_close_current(Route::Guide { from_settings }, current);
}
