use crate::route::Route;
use crate::service::navigate;

/// Optional filters of the goods category screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoodsCategoryQuery {
    /// Comma separated category ids.
    pub type_id: Option<String>,
    pub featured: bool,
    pub recommend: bool,
    pub keyword: Option<String>,
    pub min_price: Option<String>,
}

impl GoodsCategoryQuery {
    pub fn type_id(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn recommend(mut self) -> Self {
        self.recommend = true;
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn min_price(mut self, min_price: impl Into<String>) -> Self {
        self.min_price = Some(min_price.into());
        self
    }

    pub fn into_route(self) -> Route {
        let Self {
            type_id,
            featured,
            recommend,
            keyword,
            min_price,
        } = self;
        Route::GoodsCategory {
            type_id,
            featured,
            recommend,
            keyword,
            min_price,
        }
    }
}

impl From<GoodsCategoryQuery> for Route {
    fn from(query: GoodsCategoryQuery) -> Self {
        query.into_route()
    }
}

pub fn to_detail(goods_id: i64) {
    navigate(Route::GoodsDetail { goods_id }, None);
}

pub fn to_search() {
    navigate(Route::GoodsSearch, None);
}

pub fn to_category(query: GoodsCategoryQuery) {
    navigate(query.into_route(), None);
}

pub fn to_comment(goods_id: i64) {
    navigate(Route::GoodsComment { goods_id }, None);
}
