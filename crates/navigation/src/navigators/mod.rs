//! Per-feature shortcuts over the bound navigator.
//!
//! Each function builds one [`Route`](crate::Route) and hands it to
//! [`service`](crate::service). They panic like
//! [`NavigationService::require_navigator`](crate::NavigationService::require_navigator)
//! when no navigator is bound.

pub mod auth;
pub mod common;
pub mod cs;
pub mod feedback;
pub mod goods;
pub mod launch;
pub mod main;
pub mod market;
pub mod order;
pub mod user;

pub use goods::GoodsCategoryQuery;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::controller::{BackStack, BackStackController, NavigationController};
    use crate::navigator::Navigator;
    use crate::route::Route;
    use crate::service::{test_guard, NavigationService};
    use crate::session::{AuthState, Session};

    fn with_bound_stack(logged_in: bool, root: Route, run: impl FnOnce(&BackStack)) {
        let _guard = test_guard();
        let auth: Arc<dyn AuthState> = Arc::new(Session::new(logged_in));
        let navigator = Arc::new(Navigator::new(auth));
        let stack = BackStack::new(root);
        let controller: Arc<dyn NavigationController> =
            Arc::new(BackStackController::new(stack.clone(), navigator.results()));
        navigator.attach_controller(controller);
        NavigationService::bind(navigator.clone());

        run(&stack);

        NavigationService::unbind(&navigator);
    }

    #[test]
    fn launch_flow_replaces_splash() {
        with_bound_stack(false, Route::Splash, |stack| {
            launch::to_guide_and_close_current(Route::Splash, false);
            assert_eq!(
                stack.snapshot(),
                vec![Route::Guide {
                    from_settings: false
                }]
            );

            main::to_main_and_close_current(Route::Guide {
                from_settings: false,
            });
            assert_eq!(stack.snapshot(), vec![Route::Main]);
        });
    }

    #[test]
    fn order_helpers_are_gated() {
        with_bound_stack(false, Route::Home, |stack| {
            order::to_detail(12);
            assert_eq!(stack.top(), Some(Route::Login));
        });

        with_bound_stack(true, Route::Home, |stack| {
            order::to_pay(12, 9_900, Some("confirm"));
            assert_eq!(
                stack.top(),
                Some(Route::OrderPay {
                    order_id: 12,
                    price: 9_900,
                    from: Some("confirm".into()),
                })
            );
        });
    }

    #[test]
    fn public_helpers_push_their_route() {
        with_bound_stack(false, Route::Home, |stack| {
            goods::to_detail(4);
            common::to_web("https://example.com", None);
            main::to_cart(true);
            assert_eq!(
                stack.snapshot(),
                vec![
                    Route::Home,
                    Route::GoodsDetail { goods_id: 4 },
                    Route::Web {
                        url: "https://example.com".into(),
                        title: None,
                    },
                    Route::Cart {
                        show_back_icon: true
                    },
                ]
            );
        });
    }
}
