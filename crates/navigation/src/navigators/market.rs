use crate::route::Route;
use crate::service::navigate;

pub fn to_coupon() {
    navigate(Route::Coupon, None);
}
