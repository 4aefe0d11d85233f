use common::model::datasource::{DataSource, NewDataSource, SourceKind};
use common::source_url::parse_source_url;
use yew::prelude::*;

pub struct DataSourceManager {
    pub sources: Vec<DataSource>,
    pub selected: Option<String>,
    pub loading: bool,
    /// Guard for the first-render fetch.
    pub loaded: bool,
    pub saving: bool,
    pub form: SourceForm,
    pub dialog_ref: NodeRef,
}

impl DataSourceManager {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            selected: None,
            loading: false,
            loaded: false,
            saving: false,
            form: SourceForm::default(),
            dialog_ref: NodeRef::default(),
        }
    }

    pub fn selected_source(&self) -> Option<&DataSource> {
        let id = self.selected.as_deref()?;
        self.sources.iter().find(|s| s.id == id)
    }

    /// Keeps `preferred` selected when it still exists, otherwise picks the
    /// default source, otherwise the first one.
    pub fn reselect(&mut self, preferred: Option<String>) {
        let exists = |id: &String| self.sources.iter().any(|s| &s.id == id);
        self.selected = preferred
            .filter(exists)
            .or_else(|| self.selected.clone().filter(exists))
            .or_else(|| {
                self.sources
                    .iter()
                    .find(|s| s.is_default)
                    .or_else(|| self.sources.first())
                    .map(|s| s.id.clone())
            });
    }
}

/// Contents of the add/edit dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceForm {
    /// Id of the source being edited; `None` when adding.
    pub editing: Option<String>,
    pub title: String,
    pub kind: SourceKind,
    pub url: String,
    pub is_default: bool,
}

impl SourceForm {
    pub fn edit(source: &DataSource) -> Self {
        Self {
            editing: Some(source.id.clone()),
            title: source.title.clone(),
            kind: source.kind,
            url: source.locator.source_url(),
            is_default: source.is_default,
        }
    }

    /// Validates the form without touching the network.
    pub fn to_new(&self) -> Result<NewDataSource, String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("데이터 소스 이름을 입력해주세요.".to_string());
        }
        let locator = parse_source_url(&self.url).map_err(|e| e.to_string())?;
        Ok(NewDataSource {
            title: title.to_string(),
            kind: self.kind,
            locator,
            is_default: self.is_default,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::datasource::SourceLocator;

    fn source(id: &str, is_default: bool) -> DataSource {
        DataSource {
            id: id.to_string(),
            title: id.to_uppercase(),
            kind: SourceKind::Survey,
            locator: SourceLocator::Spreadsheet {
                spreadsheet_id: format!("sheet-{}", id),
                gid: "0".to_string(),
            },
            is_default,
        }
    }

    #[test]
    fn selects_default_then_keeps_selection() {
        let mut manager = DataSourceManager::new();
        manager.sources = vec![source("a", false), source("b", true)];
        manager.reselect(None);
        assert_eq!(manager.selected.as_deref(), Some("b"));

        manager.selected = Some("a".to_string());
        manager.reselect(None);
        assert_eq!(manager.selected.as_deref(), Some("a"));

        manager.reselect(Some("missing".to_string()));
        assert_eq!(manager.selected.as_deref(), Some("a"));
    }

    #[test]
    fn falls_back_to_first_source() {
        let mut manager = DataSourceManager::new();
        manager.reselect(None);
        assert_eq!(manager.selected, None);

        manager.sources = vec![source("a", false), source("b", false)];
        manager.reselect(None);
        assert_eq!(manager.selected.as_deref(), Some("a"));
    }

    #[test]
    fn sheet_url_without_gid_is_rejected() {
        let form = SourceForm {
            title: "설문 응답".to_string(),
            url: "https://docs.google.com/spreadsheets/d/abc123/edit".to_string(),
            ..Default::default()
        };
        assert!(form.to_new().is_err());
    }

    #[test]
    fn edit_form_round_trips_to_same_locator() {
        let original = source("a", true);
        let new = SourceForm::edit(&original).to_new().unwrap();
        assert_eq!(new.locator, original.locator);
        assert_eq!(new.title, "A");
        assert!(new.is_default);
    }

    #[test]
    fn blank_title_is_rejected() {
        let form = SourceForm {
            title: "  ".to_string(),
            url: "https://docs.google.com/document/d/doc1/edit".to_string(),
            ..Default::default()
        };
        assert_eq!(form.to_new().unwrap_err(), "데이터 소스 이름을 입력해주세요.");
    }
}
