//! Destinations of the storefront.
//!
//! A [`Route`] is compared structurally: `OrderDetail { order_id: 1 }` and
//! `OrderDetail { order_id: 2 }` are different stack entries. Policy code that
//! only cares about *which screen* a route points at uses [`RouteKind`], the
//! parameter-free discriminant.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumDiscriminants, EnumIter, IntoStaticStr};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(RouteKind), derive(Hash, Display, EnumIter, IntoStaticStr))]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    // --- launch ---
    Splash,
    Guide {
        #[serde(default)]
        from_settings: bool,
    },

    // --- main (bottom bar) ---
    Main,
    Home,
    Category,
    Cart {
        #[serde(default)]
        show_back_icon: bool,
    },
    Mine,

    // --- auth ---
    Login,
    AccountLogin,
    SmsLogin,
    Register,
    ResetPassword,

    // --- user ---
    Profile,
    AddressList {
        #[serde(default)]
        select_mode: bool,
    },
    AddressDetail {
        #[serde(default)]
        edit_mode: bool,
        #[serde(default)]
        address_id: i64,
    },
    Footprint,

    // --- goods ---
    GoodsDetail {
        goods_id: i64,
    },
    GoodsSearch,
    GoodsCategory {
        type_id: Option<String>,
        #[serde(default)]
        featured: bool,
        #[serde(default)]
        recommend: bool,
        keyword: Option<String>,
        min_price: Option<String>,
    },
    GoodsComment {
        goods_id: i64,
    },

    // --- order ---
    OrderList {
        tab: Option<String>,
    },
    OrderConfirm,
    OrderDetail {
        order_id: i64,
    },
    OrderPay {
        order_id: i64,
        price: i32,
        from: Option<String>,
    },
    OrderRefund {
        order_id: i64,
    },
    OrderComment {
        order_id: i64,
        goods_id: i64,
    },
    OrderLogistics {
        order_id: i64,
    },

    // --- common ---
    About,
    Web {
        url: String,
        title: Option<String>,
    },
    Settings,
    UserAgreement,
    PrivacyPolicy,
    Contributors,

    // --- customer service ---
    Chat,

    // --- market ---
    Coupon,

    // --- feedback ---
    FeedbackList,
    FeedbackSubmit,
}

impl Route {
    /// Type identity of this route, ignoring its parameters.
    pub fn kind(&self) -> RouteKind {
        RouteKind::from(self)
    }

    /// Stable screen name, handy for logs.
    pub fn name(&self) -> &'static str {
        self.kind().into()
    }
}
