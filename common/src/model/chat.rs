use crate::model::datasource::{DataSource, SourceLocator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message of the conversation context sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat`.
///
/// The sheet identifiers are optional: when none is given the backend answers
/// from its default source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spreadsheet_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_gid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
    #[serde(default)]
    pub enable_web_search: bool,
}

impl ChatRequest {
    pub fn for_source(
        question: impl Into<String>,
        source: Option<&DataSource>,
        conversation_history: Vec<ConversationTurn>,
    ) -> Self {
        let mut request = ChatRequest {
            question: question.into(),
            conversation_history,
            ..Default::default()
        };

        if let Some(source) = source {
            request.sheet_name = Some(source.title.clone());
            match &source.locator {
                SourceLocator::Spreadsheet {
                    spreadsheet_id,
                    gid,
                } => {
                    request.spreadsheet_id = Some(spreadsheet_id.clone());
                    request.sheet_gid = Some(gid.clone());
                }
                SourceLocator::Document { document_id } => {
                    request.document_id = Some(document_id.clone());
                }
            }
        }

        request
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.enable_web_search = enabled;
        self
    }

    /// The source named explicitly by the request, if any. A document id wins
    /// over a spreadsheet id; a spreadsheet without a gid reads the first tab.
    pub fn locator(&self) -> Option<SourceLocator> {
        SourceLocator::from_ids(
            self.spreadsheet_id.as_deref(),
            self.sheet_gid.as_deref(),
            self.document_id.as_deref(),
        )
    }
}

/// A web search hit cited under an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSource {
    pub title: String,
    pub link: String,
    /// Display host of the hit, e.g. `www.example.com`.
    pub source: String,
    #[serde(default)]
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    #[serde(default)]
    pub data_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_search_count: Option<usize>,
    #[serde(default)]
    pub search_sources: Vec<SearchSource>,
}

/// Error payload returned by every backend endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Shown when the backend cannot be reached at all.
pub const CONNECTION_ERROR: &str =
    "서버와 연결할 수 없습니다. 백엔드 서버가 실행 중인지 확인해주세요.";

const UNKNOWN_ERROR: &str = "알 수 없는 오류가 발생했습니다.";

/// Turns the status and body of a `/api/chat` reply into either the answer or
/// the message shown in place of the loading placeholder.
pub fn interpret_reply(ok: bool, body: &str) -> Result<ChatResponse, String> {
    if ok {
        if let Ok(response) = serde_json::from_str::<ChatResponse>(body) {
            if !response.answer.is_empty() {
                return Ok(response);
            }
        }
    }
    let detail = serde_json::from_str::<ErrorBody>(body)
        .map(|e| e.error)
        .unwrap_or_else(|_| UNKNOWN_ERROR.to_string());
    Err(format!("오류: {}", detail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::datasource::SourceKind;
    use pretty_assertions::assert_eq;

    fn sheet_source() -> DataSource {
        DataSource {
            id: "s1".to_string(),
            title: "Sheet1".to_string(),
            kind: SourceKind::Survey,
            locator: SourceLocator::Spreadsheet {
                spreadsheet_id: "sheet-id".to_string(),
                gid: "187909252".to_string(),
            },
            is_default: true,
        }
    }

    #[test]
    fn request_for_spreadsheet_source() {
        let request = ChatRequest::for_source(
            "GPT를 어떻게 사용하고 있어?",
            Some(&sheet_source()),
            vec![ConversationTurn::user("안녕")],
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["spreadsheet_id"], "sheet-id");
        assert_eq!(json["sheet_gid"], "187909252");
        assert_eq!(json["sheet_name"], "Sheet1");
        assert!(json.get("document_id").is_none());
        assert_eq!(json["conversation_history"][0]["role"], "user");
        assert_eq!(json["enable_web_search"], false);
    }

    #[test]
    fn request_without_source_has_no_identifiers() {
        let request = ChatRequest::for_source("질문", None, Vec::new());
        assert_eq!(request.locator(), None);
    }

    #[test]
    fn document_id_wins_over_spreadsheet() {
        let request = ChatRequest {
            question: "q".to_string(),
            spreadsheet_id: Some("sheet".to_string()),
            document_id: Some("doc".to_string()),
            ..Default::default()
        };
        assert_eq!(
            request.locator(),
            Some(SourceLocator::Document {
                document_id: "doc".to_string()
            })
        );
    }

    #[test]
    fn minimal_request_body_deserializes() {
        let request: ChatRequest = serde_json::from_str(r#"{"question":"몇 명이야?"}"#).unwrap();
        assert_eq!(request.question, "몇 명이야?");
        assert!(request.conversation_history.is_empty());
        assert!(!request.enable_web_search);
    }

    #[test]
    fn reply_with_answer() {
        let reply = interpret_reply(true, r#"{"answer":"답변","data_count":3}"#).unwrap();
        assert_eq!(reply.answer, "답변");
    }

    #[test]
    fn reply_errors_echo_backend_message() {
        assert_eq!(
            interpret_reply(false, r#"{"error":"질문을 입력해주세요."}"#),
            Err("오류: 질문을 입력해주세요.".to_string())
        );
        assert_eq!(
            interpret_reply(true, r#"{"data_count":3}"#),
            Err("오류: 알 수 없는 오류가 발생했습니다.".to_string())
        );
        assert_eq!(
            interpret_reply(false, "<html>502 Bad Gateway</html>"),
            Err("오류: 알 수 없는 오류가 발생했습니다.".to_string())
        );
    }

    #[test]
    fn response_without_search_fields() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"answer":"총 12명입니다.","data_count":12}"#).unwrap();
        assert_eq!(response.web_search_count, None);
        assert!(response.search_sources.is_empty());
    }
}
