//! Reading the content of a data source through Google's public export urls.
//!
//! Spreadsheets are exported as CSV for a single tab (`gid`), documents as
//! plain text. Both only work for files shared with "anyone with the link";
//! a private document answers with an HTML login page instead of text.

use common::model::datasource::SourceLocator;
use log::info;
use reqwest::header::{CACHE_CONTROL, EXPIRES, PRAGMA};
use reqwest::Client;

use crate::services::ServiceError;

/// A spreadsheet tab: first row as headers, every other non-blank row padded
/// or cut to the header width.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// Index of the first header equal to one of `exact`, else of the first
    /// header containing one of `partial` (case-insensitive).
    pub fn find_column(&self, exact: &[&str], partial: &[&str]) -> Option<usize> {
        exact
            .iter()
            .find_map(|name| self.headers.iter().position(|h| h == name))
            .or_else(|| {
                self.headers.iter().position(|h| {
                    let h = h.to_lowercase();
                    partial.iter().any(|p| h.contains(&p.to_lowercase()))
                })
            })
    }

    /// Values of column `index`, one per row.
    pub fn column_values(&self, index: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceContent {
    Table(SheetTable),
    Document(String),
}

impl SourceContent {
    /// Value reported back as `data_count`.
    pub fn data_count(&self) -> usize {
        match self {
            SourceContent::Table(table) => table.rows.len(),
            SourceContent::Document(text) if text.trim().is_empty() => 0,
            SourceContent::Document(_) => 1,
        }
    }
}

pub async fn fetch_source(
    client: &Client,
    docs_base_url: &str,
    locator: &SourceLocator,
) -> Result<SourceContent, ServiceError> {
    let base = docs_base_url.trim_end_matches('/');
    match locator {
        SourceLocator::Spreadsheet {
            spreadsheet_id,
            gid,
        } => {
            let url = format!("{}/spreadsheets/d/{}/export", base, spreadsheet_id);
            let body = get_export(client, &url, &[("format", "csv"), ("gid", gid.as_str())]).await?;
            if looks_like_html(&body) {
                return Err(ServiceError::Upstream(
                    "시트를 읽을 수 없습니다. 링크가 있는 모든 사용자에게 공개되어 있는지 확인해주세요."
                        .to_string(),
                ));
            }
            let table = parse_csv(&body)?;
            info!(
                "Read {} rows ({} columns) from spreadsheet {} gid {}",
                table.rows.len(),
                table.headers.len(),
                spreadsheet_id,
                gid
            );
            Ok(SourceContent::Table(table))
        }
        SourceLocator::Document { document_id } => {
            let url = format!("{}/document/d/{}/export", base, document_id);
            let body = get_export(client, &url, &[("format", "txt")]).await?;
            if looks_like_html(&body) {
                return Err(ServiceError::Upstream(
                    "문서를 읽을 수 없습니다. 링크가 있는 모든 사용자에게 공개되어 있는지 확인해주세요."
                        .to_string(),
                ));
            }
            info!("Read {} characters from document {}", body.chars().count(), document_id);
            Ok(SourceContent::Document(body))
        }
    }
}

async fn get_export(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<String, ServiceError> {
    let response = client
        .get(url)
        .query(query)
        .header(CACHE_CONTROL, "no-cache, no-store, must-revalidate")
        .header(PRAGMA, "no-cache")
        .header(EXPIRES, "0")
        .send()
        .await
        .map_err(|e| ServiceError::Upstream(format!("구글 데이터에 연결할 수 없습니다: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ServiceError::Upstream(format!(
            "구글 데이터를 가져오지 못했습니다 (HTTP {})",
            status.as_u16()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ServiceError::Upstream(e.to_string()))?;
    let text = String::from_utf8_lossy(&bytes);
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

fn looks_like_html(body: &str) -> bool {
    let head: String = body.trim_start().chars().take(100).collect::<String>().to_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

pub fn parse_csv(text: &str) -> Result<SheetTable, ServiceError> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .map_err(|e| ServiceError::Upstream(format!("CSV 형식 오류: {}", e)))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect(),
        None => {
            return Ok(SheetTable {
                headers: Vec::new(),
                rows: Vec::new(),
            })
        }
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| ServiceError::Upstream(format!("CSV 형식 오류: {}", e)))?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        let row: Vec<String> = (0..headers.len())
            .map(|i| record.get(i).unwrap_or("").to_string())
            .collect();
        rows.push(row);
    }

    Ok(SheetTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use pretty_assertions::assert_eq;

    #[test]
    fn csv_rows_are_padded_and_blank_rows_skipped() {
        let table = parse_csv(
            "\u{feff}이름,학년,지역\n김민지,중2,서울\n,,\n박서준,고1\n\"이, 지은\",중3,부산,extra\n",
        )
        .unwrap();

        assert_eq!(table.headers[1], "학년");
        assert_eq!(
            table.rows,
            vec![
                vec!["김민지".to_string(), "중2".to_string(), "서울".to_string()],
                vec!["박서준".to_string(), "고1".to_string(), String::new()],
                vec!["이, 지은".to_string(), "중3".to_string(), "부산".to_string()],
            ]
        );
    }

    #[test]
    fn columns_are_found_by_exact_then_partial_name() {
        let table = parse_csv("타임스탬프,이름을 적어주세요,현재 학년은?\n1,김민지,중2\n2,박서준,고1\n").unwrap();

        assert_eq!(table.find_column(&["이름을 적어주세요", "이름"], &["이름"]), Some(1));
        assert_eq!(table.find_column(&[], &["학년", "grade"]), Some(2));
        assert_eq!(table.find_column(&["Name"], &["성별"]), None);
        assert_eq!(table.column_values(2), vec!["중2", "고1"]);
    }

    #[test]
    fn empty_csv() {
        let table = parse_csv("").unwrap();
        assert!(table.headers.is_empty());
        assert_eq!(SourceContent::Table(table).data_count(), 0);
    }

    #[test]
    fn html_detection() {
        assert!(looks_like_html("  <!DOCTYPE html><html>"));
        assert!(looks_like_html("<HTML lang=\"ko\">"));
        assert!(!looks_like_html("인터뷰 스크립트\n질문: ..."));
    }

    #[actix_web::test]
    async fn fetches_spreadsheet_tab_as_csv() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Regex(r"^/spreadsheets/d/sheet-1/export".to_string()))
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("format".into(), "csv".into()),
                Matcher::UrlEncoded("gid".into(), "42".into()),
            ]))
            .with_status(200)
            .with_body("이름,학년\n김민지,중2\n")
            .create_async()
            .await;

        let locator = SourceLocator::Spreadsheet {
            spreadsheet_id: "sheet-1".to_string(),
            gid: "42".to_string(),
        };
        let content = fetch_source(&Client::new(), &server.url(), &locator)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(content.data_count(), 1);
    }

    #[actix_web::test]
    async fn private_document_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/document/d/doc-1/export".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<!DOCTYPE html><html><body>Sign in</body></html>")
            .create_async()
            .await;

        let locator = SourceLocator::Document {
            document_id: "doc-1".to_string(),
        };
        let err = fetch_source(&Client::new(), &server.url(), &locator)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Upstream(_)));
    }

    #[actix_web::test]
    async fn private_spreadsheet_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/spreadsheets/d/private/export".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                "<!DOCTYPE html><html><head><title>Google Sheets - Sign in</title></head>\n<body>Sign in to continue</body></html>",
            )
            .create_async()
            .await;

        let locator = SourceLocator::Spreadsheet {
            spreadsheet_id: "private".to_string(),
            gid: "0".to_string(),
        };
        let err = fetch_source(&Client::new(), &server.url(), &locator)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Upstream(_)));
        assert!(err.to_string().contains("시트를 읽을 수 없습니다"));
    }

    #[actix_web::test]
    async fn export_failure_reports_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", Matcher::Regex(r"^/spreadsheets/d/gone/export".to_string()))
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let locator = SourceLocator::Spreadsheet {
            spreadsheet_id: "gone".to_string(),
            gid: "0".to_string(),
        };
        let err = fetch_source(&Client::new(), &server.url(), &locator)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));
    }
}
