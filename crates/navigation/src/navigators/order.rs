//! Order screens. All of them require login.

use crate::route::Route;
use crate::service::navigate;

/// Order list, optionally opened on a status tab (e.g. `"unpaid"`).
pub fn to_list(tab: Option<&str>) {
    navigate(
        Route::OrderList {
            tab: tab.map(str::to_owned),
        },
        None,
    );
}

pub fn to_confirm() {
    navigate(Route::OrderConfirm, None);
}

pub fn to_detail(order_id: i64) {
    navigate(Route::OrderDetail { order_id }, None);
}

/// Cashier for `order_id`. `price` is in cents; `from` names the screen that
/// opened the cashier so it can route back afterwards.
pub fn to_pay(order_id: i64, price: i32, from: Option<&str>) {
    navigate(
        Route::OrderPay {
            order_id,
            price,
            from: from.map(str::to_owned),
        },
        None,
    );
}

pub fn to_refund(order_id: i64) {
    navigate(Route::OrderRefund { order_id }, None);
}

pub fn to_comment(order_id: i64, goods_id: i64) {
    navigate(Route::OrderComment { order_id, goods_id }, None);
}

pub fn to_logistics(order_id: i64) {
    navigate(Route::OrderLogistics { order_id }, None);
}
