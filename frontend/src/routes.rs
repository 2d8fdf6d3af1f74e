use dioxus::prelude::*;

use common::item_type::ItemType;
use common::search_query::SearchParams;

use crate::components::navbar::Navbar;
use crate::data_definitions::url_param::SearchUrl;
use crate::pages::home_page::HomePage;
use crate::pages::search_page::SearchPage;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]


    #[route("/")]
    HomePage {},


    #[route("/browse?:..query")]
    SearchPage { query: SearchUrl },

}

impl Route {
    pub fn search_page(params: SearchParams) -> Self {
        Self::SearchPage { query: SearchUrl::from(params) }
    }

    pub fn browse(item_type: &ItemType) -> Self {
        Self::search_page(item_type.baseline_params())
    }
}
