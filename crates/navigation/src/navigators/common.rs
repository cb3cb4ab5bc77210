use crate::route::Route;
use crate::service::navigate;

pub fn to_about() {
    navigate(Route::About, None);
}

/// In-app browser.
pub fn to_web(url: impl Into<String>, title: Option<&str>) {
    navigate(
        Route::Web {
            url: url.into(),
            title: title.map(str::to_owned),
        },
        None,
    );
}

pub fn to_settings() {
    navigate(Route::Settings, None);
}

pub fn to_user_agreement() {
    navigate(Route::UserAgreement, None);
}

pub fn to_privacy_policy() {
    navigate(Route::PrivacyPolicy, None);
}

pub fn to_contributors() {
    navigate(Route::Contributors, None);
}
