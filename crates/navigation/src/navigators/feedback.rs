use crate::route::Route;
use crate::service::navigate;

pub fn to_list() {
    navigate(Route::FeedbackList, None);
}

pub fn to_submit() {
    navigate(Route::FeedbackSubmit, None);
}
