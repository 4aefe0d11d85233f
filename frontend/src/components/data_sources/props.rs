use common::model::datasource::DataSource;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct DataSourceProps {
    /// Receives the selected source, or `None` when none is registered.
    pub on_select: Callback<Option<DataSource>>,
}
