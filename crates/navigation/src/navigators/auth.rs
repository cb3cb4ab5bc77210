use crate::route::Route;
use crate::service::navigate;

pub fn to_login() {
    navigate(Route::Login, None);
}

pub fn to_account_login() {
    navigate(Route::AccountLogin, None);
}

pub fn to_sms_login() {
    navigate(Route::SmsLogin, None);
}

pub fn to_register() {
    navigate(Route::Register, None);
}

pub fn to_reset_password() {
    navigate(Route::ResetPassword, None);
}
