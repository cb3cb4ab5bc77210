use crate::route::Route;
use crate::service::navigate;

pub fn to_profile() {
    navigate(Route::Profile, None);
}

/// Address list; in `select_mode` the screen hands the picked address back
/// through a result key instead of opening the editor.
pub fn to_address_list(select_mode: bool) {
    navigate(Route::AddressList { select_mode }, None);
}

/// Address editor. `address_id` is ignored unless `edit_mode` is set.
pub fn to_address_detail(edit_mode: bool, address_id: i64) {
    navigate(
        Route::AddressDetail {
            edit_mode,
            address_id,
        },
        None,
    );
}

pub fn to_footprint() {
    navigate(Route::Footprint, None);
}
