//! Headless stand-in for the UI host.
//!
//! Owns the live [`BackStack`], attaches its controller to the navigator while
//! mounted and "renders" (logs) the top screen whenever the stack changes.

use std::sync::Arc;

use navigation::{BackStack, BackStackController, NavigationController, Navigator, Route};
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub struct Host {
    navigator: Arc<Navigator>,
    stack: BackStack,
    controller: Arc<dyn NavigationController>,
    render_task: Option<JoinHandle<()>>,
}

impl Host {
    pub fn new(navigator: Arc<Navigator>, root: Route) -> Self {
        let stack = BackStack::new(root);
        let controller: Arc<dyn NavigationController> =
            Arc::new(BackStackController::new(stack.clone(), navigator.results()));
        Self {
            navigator,
            stack,
            controller,
            render_task: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.render_task.is_some()
    }

    /// Attach to the navigator. Commands queued while unmounted run now.
    pub fn mount(&mut self) {
        if self.is_mounted() {
            debug!("host already mounted");
            return;
        }
        let mut changes = self.stack.subscribe();
        render(&changes.borrow_and_update());
        self.render_task = Some(tokio::spawn(async move {
            while changes.changed().await.is_ok() {
                let entries = changes.borrow_and_update().clone();
                render(&entries);
            }
        }));
        self.navigator.attach_controller(self.controller.clone());
    }

    pub fn unmount(&mut self) {
        let Some(task) = self.render_task.take() else {
            debug!("host not mounted");
            return;
        };
        self.navigator.detach_controller(&self.controller);
        task.abort();
    }

    pub fn stack(&self) -> &BackStack {
        &self.stack
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn render(entries: &[Route]) {
    match entries.last() {
        Some(top) => info!(screen = top.name(), depth = entries.len(), "render"),
        None => info!("render: empty stack"),
    }
}
