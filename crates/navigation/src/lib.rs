//! Navigation command/control layer for the storefront client.
//!
//! View-models request navigation through a [`Navigator`] (or the
//! process-wide [`service`] functions) without holding a reference to the
//! live UI host. The host attaches a [`NavigationController`] while it
//! exists; requests issued before that are queued as [`NavigationCommand`]s
//! and replayed in order on attach.
//!
//! ```ignore
//! let session = Arc::new(Session::logged_out());
//! let navigator = Arc::new(Navigator::new(session.clone()));
//!
//! // UI host side
//! let stack = BackStack::new(Route::Home);
//! let controller: Arc<dyn NavigationController> =
//!     Arc::new(BackStackController::new(stack.clone(), navigator.results()));
//! navigator.attach_controller(controller.clone());
//!
//! // view-model side
//! navigator.navigate_to(Route::Profile, None); // -> [Home, Login]
//! ```

pub mod command;
pub mod config;
pub mod controller;
pub mod errors;
pub mod interceptor;
pub mod navigator;
pub mod navigators;
pub mod options;
pub mod result;
pub mod route;
pub mod service;
pub mod session;

pub use command::NavigationCommand;
pub use config::NavigatorConfig;
pub use controller::{BackStack, BackStackController, NavigationController};
pub use errors::NavigationError;
pub use interceptor::RouteInterceptor;
pub use navigator::Navigator;
pub use options::NavigationOptions;
pub use result::{
    JsonResultKey, NavigationResultKey, RawResult, RefreshResult, ResultBus, ResultEvent,
    ResultStream, REFRESH_RESULT_KEY,
};
pub use route::{Route, RouteKind};
pub use service::NavigationService;
pub use session::{AuthState, Session};
