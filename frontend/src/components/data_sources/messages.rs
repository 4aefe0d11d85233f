use common::model::datasource::{DataSource, SourceKind};

pub enum Msg {
    /// Fetch the list, then select the given id if present.
    Reload(Option<String>),
    Loaded(Result<Vec<DataSource>, String>, Option<String>),
    Select(String),
    OpenAdd,
    OpenEdit(String),
    CloseDialog,
    SetTitle(String),
    SetKind(SourceKind),
    SetUrl(String),
    SetDefault(bool),
    Save,
    Saved(Result<DataSource, String>),
}
