use crate::route::Route;
use crate::service::navigate;

/// Customer service chat.
pub fn to_chat() {
    navigate(Route::Chat, None);
}
