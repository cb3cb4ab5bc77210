//! Scripted navigation sessions.
//!
//! ```toml
//! root = { kind = "home" }
//!
//! [[steps]]
//! action = "navigate"
//! route = { kind = "profile" }
//!
//! [[steps]]
//! action = "expect_stack"
//! routes = [{ kind = "home" }, { kind = "login" }]
//! ```

use std::path::Path;
use std::sync::Arc;

use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use futures::StreamExt;
use navigation::{
    NavigationOptions, Navigator, RefreshResult, Route, Session, REFRESH_RESULT_KEY,
};
use serde::Deserialize;
use tracing::{info, info_span};

use crate::host::Host;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_root")]
    pub root: Route,
    /// Login state before the first step.
    #[serde(default)]
    pub logged_in: bool,
    /// Whether the host is mounted before the first step.
    #[serde(default = "mounted_by_default")]
    pub mounted: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_root() -> Route {
    Route::Home
}

fn mounted_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Navigate {
        route: Route,
        #[serde(default)]
        options: Option<NavigationOptions>,
    },
    Back,
    BackTo {
        route: Route,
        #[serde(default)]
        inclusive: bool,
    },
    PopRefresh {
        #[serde(default = "refresh_by_default")]
        refresh: bool,
    },
    LogIn,
    LogOut,
    Mount,
    Unmount,
    ExpectStack {
        routes: Vec<Route>,
    },
}

fn refresh_by_default() -> bool {
    true
}

const DEMO: &str = include_str!("../scenarios/login_redirect.toml");

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("reading scenario {}", path.display()))?;
        Self::parse(&raw).wrap_err_with(|| format!("in scenario {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Logged out, open a protected screen, log in, go back, open it again.
    pub fn demo() -> Result<Self> {
        Self::parse(DEMO)
    }

    /// Drive `navigator` through every step with a fresh host.
    ///
    /// Returns the final stack.
    pub async fn run(&self, navigator: Arc<Navigator>, session: &Session) -> Result<Vec<Route>> {
        if self.logged_in {
            session.log_in();
        } else {
            session.log_out();
        }

        let mut refreshes = navigator.result_events(&REFRESH_RESULT_KEY);
        let refresh_listener = tokio::spawn(async move {
            while let Some(result) = refreshes.next().await {
                info!(refresh = result.needs_refresh(), "previous screen received result");
            }
        });

        let mut host = Host::new(navigator.clone(), self.root.clone());
        if self.mounted {
            host.mount();
        }

        let outcome = self.steps.iter().enumerate().try_for_each(|(index, step)| {
            let _span = info_span!("step", index).entered();
            step.apply(&navigator, session, &mut host)
                .wrap_err_with(|| format!("step {} ({step:?}) failed", index + 1))
        });

        let stack = host.stack().snapshot();
        drop(host);
        refresh_listener.abort();
        outcome.map(|()| stack)
    }
}

impl Step {
    fn apply(&self, navigator: &Navigator, session: &Session, host: &mut Host) -> Result<()> {
        match self {
            Step::Navigate { route, options } => {
                navigator.navigate_to(route.clone(), options.clone());
            }
            Step::Back => navigator.navigate_back(),
            Step::BackTo { route, inclusive } => {
                navigator.navigate_back_to(route.clone(), *inclusive);
            }
            Step::PopRefresh { refresh } => navigator.pop_with_result(
                &REFRESH_RESULT_KEY,
                RefreshResult {
                    refresh: Some(*refresh),
                },
            ),
            Step::LogIn => session.log_in(),
            Step::LogOut => session.log_out(),
            Step::Mount => host.mount(),
            Step::Unmount => host.unmount(),
            Step::ExpectStack { routes } => {
                let actual = host.stack().snapshot();
                if &actual != routes {
                    bail!(
                        "expected stack [{}], found [{}]",
                        names(routes),
                        names(&actual)
                    );
                }
                info!(stack = %names(&actual), "stack as expected");
            }
        }
        Ok(())
    }
}

fn names(routes: &[Route]) -> String {
    routes
        .iter()
        .map(Route::name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn navigator_for(session: &Session) -> Arc<Navigator> {
        Arc::new(Navigator::new(Arc::new(session.clone())))
    }

    #[tokio::test]
    async fn demo_ends_on_profile() {
        let session = Session::logged_out();
        let stack = Scenario::demo()
            .unwrap()
            .run(navigator_for(&session), &session)
            .await
            .unwrap();
        assert_eq!(stack, vec![Route::Home, Route::Profile]);
    }

    #[tokio::test]
    async fn checkout_scenario_passes() {
        let scenario =
            Scenario::load(&Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/checkout.toml"))
                .unwrap();
        let session = Session::logged_out();
        let stack = scenario
            .run(navigator_for(&session), &session)
            .await
            .unwrap();
        assert_eq!(stack, vec![Route::Main]);
    }

    #[tokio::test]
    async fn stack_mismatch_fails_the_run() {
        let scenario = Scenario::parse(
            r#"
            [[steps]]
            action = "navigate"
            route = { kind = "about" }

            [[steps]]
            action = "expect_stack"
            routes = [{ kind = "home" }]
            "#,
        )
        .unwrap();
        let session = Session::logged_out();
        let err = scenario
            .run(navigator_for(&session), &session)
            .await
            .unwrap_err();
        assert!(format!("{err:?}").contains("expected stack [Home], found [Home, About]"));
    }

    #[test]
    fn parses_every_step_kind() {
        let scenario = Scenario::parse(
            r#"
            root = { kind = "splash" }
            logged_in = true
            mounted = false

            [[steps]]
            action = "navigate"
            route = { kind = "main" }
            options = { pop_up_to = { kind = "splash" }, inclusive = true, allow_pop_to_empty = true }

            [[steps]]
            action = "back"

            [[steps]]
            action = "back_to"
            route = { kind = "home" }

            [[steps]]
            action = "pop_refresh"
            refresh = false

            [[steps]]
            action = "log_out"

            [[steps]]
            action = "mount"
            "#,
        )
        .unwrap();

        assert_eq!(scenario.root, Route::Splash);
        assert!(!scenario.mounted);
        assert_eq!(
            scenario.steps,
            vec![
                Step::Navigate {
                    route: Route::Main,
                    options: Some(NavigationOptions::close_current(Route::Splash)),
                },
                Step::Back,
                Step::BackTo {
                    route: Route::Home,
                    inclusive: false,
                },
                Step::PopRefresh { refresh: false },
                Step::LogOut,
                Step::Mount,
            ]
        );
    }
}
