//! Login gate for protected destinations.

use std::collections::HashSet;

use crate::route::{Route, RouteKind};

/// Screens that need an authenticated session.
///
/// Matching happens on [`RouteKind`], so every `OrderDetail { .. }` is
/// protected regardless of its `order_id`.
const LOGIN_REQUIRED: &[RouteKind] = &[
    RouteKind::Profile,
    RouteKind::AddressList,
    RouteKind::AddressDetail,
    RouteKind::OrderList,
    RouteKind::OrderConfirm,
    RouteKind::OrderDetail,
    RouteKind::OrderPay,
    RouteKind::OrderRefund,
    RouteKind::OrderComment,
    RouteKind::OrderLogistics,
    RouteKind::Chat,
    RouteKind::Coupon,
    RouteKind::FeedbackList,
    RouteKind::FeedbackSubmit,
];

/// Pure policy: which routes require login, and where to send the user instead.
#[derive(Debug, Clone)]
pub struct RouteInterceptor {
    protected: HashSet<RouteKind>,
    login: Route,
}

impl RouteInterceptor {
    pub fn new() -> Self {
        Self::with_protected(LOGIN_REQUIRED.iter().copied(), Route::Login)
    }

    /// Interceptor with a custom protected set and fallback route.
    pub fn with_protected(kinds: impl IntoIterator<Item = RouteKind>, login: Route) -> Self {
        Self {
            protected: kinds.into_iter().collect(),
            login,
        }
    }

    pub fn requires_login(&self, route: &Route) -> bool {
        self.protected.contains(&route.kind())
    }

    pub fn login_route(&self) -> Route {
        self.login.clone()
    }
}

impl Default for RouteInterceptor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_kinds_match_any_parameters() {
        let interceptor = RouteInterceptor::new();
        assert!(interceptor.requires_login(&Route::Profile));
        assert!(interceptor.requires_login(&Route::OrderDetail { order_id: 1 }));
        assert!(interceptor.requires_login(&Route::OrderDetail { order_id: 99 }));
        assert!(interceptor.requires_login(&Route::AddressList { select_mode: true }));
        assert!(interceptor.requires_login(&Route::Chat));
    }

    #[test]
    fn public_routes_pass() {
        let interceptor = RouteInterceptor::new();
        assert!(!interceptor.requires_login(&Route::Home));
        assert!(!interceptor.requires_login(&Route::GoodsDetail { goods_id: 3 }));
        assert!(!interceptor.requires_login(&Route::Login));
        assert!(!interceptor.requires_login(&Route::Footprint));
    }

    #[test]
    fn login_route_is_login() {
        assert_eq!(RouteInterceptor::new().login_route(), Route::Login);
    }

    #[test]
    fn custom_policy() {
        let interceptor = RouteInterceptor::with_protected([RouteKind::Cart], Route::SmsLogin);
        assert!(interceptor.requires_login(&Route::Cart {
            show_back_icon: false
        }));
        assert!(!interceptor.requires_login(&Route::Profile));
        assert_eq!(interceptor.login_route(), Route::SmsLogin);
    }
}
