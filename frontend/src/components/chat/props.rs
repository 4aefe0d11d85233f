use common::model::datasource::DataSource;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ChatProps {
    /// Source questions are asked about. `None` lets the backend fall back to
    /// its default source.
    #[prop_or_default]
    pub source: Option<DataSource>,
}

impl ChatProps {
    pub fn source_id(&self) -> String {
        self.source
            .as_ref()
            .map(|s| s.id.clone())
            .unwrap_or_default()
    }
}
