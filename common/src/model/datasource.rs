use serde::{Deserialize, Serialize};

/// A spreadsheet tab or document the chat widget can answer questions about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub id: String, // UUID
    pub title: String,
    pub kind: SourceKind,
    #[serde(flatten)]
    pub locator: SourceLocator,
    #[serde(default)]
    pub is_default: bool,
}

/// What the rows of a source contain. Only used for labelling in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Survey,
    Interview,
}

/// Where the content of a source lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source_type", rename_all = "snake_case")]
pub enum SourceLocator {
    Spreadsheet { spreadsheet_id: String, gid: String },
    Document { document_id: String },
}

/// Payload of the add and edit forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDataSource {
    pub title: String,
    pub kind: SourceKind,
    #[serde(flatten)]
    pub locator: SourceLocator,
    #[serde(default)]
    pub is_default: bool,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Survey => "survey",
            SourceKind::Interview => "interview",
        }
    }

    /// Label shown next to the tab title.
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Survey => "설문",
            SourceKind::Interview => "인터뷰",
        }
    }

    /// Inverse of [`SourceKind::as_str`]; unknown values fall back to `Survey`.
    pub fn parse(value: &str) -> Self {
        match value {
            "interview" => SourceKind::Interview,
            _ => SourceKind::Survey,
        }
    }
}

impl SourceLocator {
    /// Locator named by loose request parameters. A document id wins over a
    /// spreadsheet id; a spreadsheet without a gid reads the first tab. Blank
    /// ids count as absent.
    pub fn from_ids(
        spreadsheet_id: Option<&str>,
        gid: Option<&str>,
        document_id: Option<&str>,
    ) -> Option<SourceLocator> {
        let present = |id: &&str| !id.trim().is_empty();
        if let Some(document_id) = document_id.filter(present) {
            return Some(SourceLocator::Document {
                document_id: document_id.to_string(),
            });
        }
        spreadsheet_id
            .filter(present)
            .map(|spreadsheet_id| SourceLocator::Spreadsheet {
                spreadsheet_id: spreadsheet_id.to_string(),
                gid: gid.filter(present).unwrap_or("0").to_string(),
            })
    }

    pub fn source_type(&self) -> &'static str {
        match self {
            SourceLocator::Spreadsheet { .. } => "spreadsheet",
            SourceLocator::Document { .. } => "document",
        }
    }

    /// Spreadsheet id or document id.
    pub fn resource_id(&self) -> &str {
        match self {
            SourceLocator::Spreadsheet { spreadsheet_id, .. } => spreadsheet_id,
            SourceLocator::Document { document_id } => document_id,
        }
    }

    /// Canonical Google url of the source, used to prefill the edit form.
    pub fn source_url(&self) -> String {
        match self {
            SourceLocator::Spreadsheet {
                spreadsheet_id,
                gid,
            } => format!(
                "https://docs.google.com/spreadsheets/d/{}/edit#gid={}",
                spreadsheet_id, gid
            ),
            SourceLocator::Document { document_id } => {
                format!("https://docs.google.com/document/d/{}/edit", document_id)
            }
        }
    }
}

impl DataSource {
    pub fn from_new(id: String, new: NewDataSource) -> Self {
        DataSource {
            id,
            title: new.title,
            kind: new.kind,
            locator: new.locator,
            is_default: new.is_default,
        }
    }

    /// Form payload equivalent to this source, used to open the edit form.
    pub fn to_new(&self) -> NewDataSource {
        NewDataSource {
            title: self.title.clone(),
            kind: self.kind,
            locator: self.locator.clone(),
            is_default: self.is_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn spreadsheet_source_wire_format() {
        let source = DataSource {
            id: "a1".to_string(),
            title: "고등학생 설문".to_string(),
            kind: SourceKind::Survey,
            locator: SourceLocator::Spreadsheet {
                spreadsheet_id: "1-wkd".to_string(),
                gid: "187909252".to_string(),
            },
            is_default: true,
        };

        let json = serde_json::to_value(&source).unwrap();
        assert_eq!(json["source_type"], "spreadsheet");
        assert_eq!(json["spreadsheet_id"], "1-wkd");
        assert_eq!(json["gid"], "187909252");
        assert_eq!(json["kind"], "survey");

        let back: DataSource = serde_json::from_value(json).unwrap();
        assert_eq!(back, source);
    }

    #[test]
    fn document_payload_defaults_is_default_flag() {
        let new: NewDataSource = serde_json::from_str(
            r#"{"title":"인터뷰 원본","kind":"interview","source_type":"document","document_id":"1HRM"}"#,
        )
        .unwrap();

        assert_eq!(
            new.locator,
            SourceLocator::Document {
                document_id: "1HRM".to_string()
            }
        );
        assert!(!new.is_default);
    }

    #[test]
    fn locator_from_request_ids() {
        assert_eq!(SourceLocator::from_ids(None, Some("5"), None), None);
        assert_eq!(SourceLocator::from_ids(Some(" "), None, Some("")), None);
        assert_eq!(
            SourceLocator::from_ids(Some("sheet"), Some(""), None),
            Some(SourceLocator::Spreadsheet {
                spreadsheet_id: "sheet".to_string(),
                gid: "0".to_string(),
            })
        );
        assert_eq!(
            SourceLocator::from_ids(Some("sheet"), Some("7"), Some("doc")),
            Some(SourceLocator::Document {
                document_id: "doc".to_string(),
            })
        );
    }

    #[test]
    fn canonical_urls() {
        let sheet = SourceLocator::Spreadsheet {
            spreadsheet_id: "abc".to_string(),
            gid: "0".to_string(),
        };
        assert_eq!(
            sheet.source_url(),
            "https://docs.google.com/spreadsheets/d/abc/edit#gid=0"
        );
        assert_eq!(sheet.resource_id(), "abc");
        assert_eq!(SourceKind::parse("interview"), SourceKind::Interview);
        assert_eq!(SourceKind::parse("whatever"), SourceKind::Survey);
    }
}
