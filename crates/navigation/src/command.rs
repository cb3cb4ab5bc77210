use crate::controller::NavigationController;
use crate::options::NavigationOptions;
use crate::result::ResultEvent;
use crate::route::Route;

/// A navigation request, detached from the controller that will run it.
///
/// Commands are created by the [`Navigator`](crate::Navigator) and executed
/// exactly once, either immediately or when a controller attaches.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationCommand {
    NavigateTo {
        route: Route,
        options: Option<NavigationOptions>,
    },
    NavigateUp,
    NavigateBackTo {
        route: Route,
        inclusive: bool,
    },
    /// Pop the current screen and publish an already-encoded result.
    PopWithResult {
        event: ResultEvent,
    },
}

impl NavigationCommand {
    pub fn execute(self, controller: &dyn NavigationController) {
        match self {
            Self::NavigateTo { route, options } => controller.navigate_to(route, options),
            Self::NavigateUp => controller.navigate_back(),
            Self::NavigateBackTo { route, inclusive } => {
                controller.navigate_back_to(&route, inclusive)
            }
            Self::PopWithResult { event } => controller.pop_with_result(event),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NavigateTo { .. } => "navigate_to",
            Self::NavigateUp => "navigate_up",
            Self::NavigateBackTo { .. } => "navigate_back_to",
            Self::PopWithResult { .. } => "pop_with_result",
        }
    }
}
