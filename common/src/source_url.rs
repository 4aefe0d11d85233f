//! Extraction of spreadsheet/document identifiers from a pasted Google url.
//!
//! The data-source forms accept the url copied from the browser address bar.
//! A spreadsheet url must point at a specific tab, i.e. carry a `gid`, either
//! in the fragment (`#gid=123`) or in the query (`?gid=123`).

use crate::model::datasource::SourceLocator;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

static SPREADSHEET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/spreadsheets/d/([A-Za-z0-9_-]+)").expect("valid regex"));
static DOCUMENT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/document/d/([A-Za-z0-9_-]+)").expect("valid regex"));
static GID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#?&]gid=([0-9]+)").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceUrlError {
    #[error("스프레드시트 URL에 시트 번호(gid)가 없습니다. 시트 탭을 선택한 뒤 주소를 다시 복사해주세요.")]
    MissingSheetIndex,
    #[error("올바른 구글 스프레드시트 또는 문서 URL이 아닙니다.")]
    Unrecognized,
}

/// Parses a pasted url into a [`SourceLocator`].
pub fn parse_source_url(url: &str) -> Result<SourceLocator, SourceUrlError> {
    let url = url.trim();

    if let Some(caps) = SPREADSHEET_ID_RE.captures(url) {
        let spreadsheet_id = caps[1].to_string();
        let gid = GID_RE
            .captures(url)
            .map(|caps| caps[1].to_string())
            .ok_or(SourceUrlError::MissingSheetIndex)?;
        return Ok(SourceLocator::Spreadsheet {
            spreadsheet_id,
            gid,
        });
    }

    if let Some(caps) = DOCUMENT_ID_RE.captures(url) {
        return Ok(SourceLocator::Document {
            document_id: caps[1].to_string(),
        });
    }

    Err(SourceUrlError::Unrecognized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn spreadsheet_with_fragment_gid() {
        let locator = parse_source_url(
            "https://docs.google.com/spreadsheets/d/1-wkdWGG1aE9yfYNN0GFoIQXRxKTSf0x8ZcltGCgYltI/edit#gid=187909252",
        )
        .unwrap();

        assert_eq!(
            locator,
            SourceLocator::Spreadsheet {
                spreadsheet_id: "1-wkdWGG1aE9yfYNN0GFoIQXRxKTSf0x8ZcltGCgYltI".to_string(),
                gid: "187909252".to_string(),
            }
        );
    }

    #[test]
    fn spreadsheet_with_query_gid() {
        let locator = parse_source_url(
            "  https://docs.google.com/spreadsheets/d/abc_DEF-1/edit?usp=sharing&gid=42  ",
        )
        .unwrap();

        assert_eq!(
            locator,
            SourceLocator::Spreadsheet {
                spreadsheet_id: "abc_DEF-1".to_string(),
                gid: "42".to_string(),
            }
        );
    }

    #[test]
    fn spreadsheet_without_gid_is_rejected() {
        let err = parse_source_url("https://docs.google.com/spreadsheets/d/abc/edit").unwrap_err();
        assert_eq!(err, SourceUrlError::MissingSheetIndex);
    }

    #[test]
    fn document_url() {
        let locator = parse_source_url(
            "https://docs.google.com/document/d/1HRMkP8KjHkQSqjJrq_V1QNXJqJ63JaGE6RSFiY_zBRo/edit?tab=t.0",
        )
        .unwrap();

        assert_eq!(
            locator,
            SourceLocator::Document {
                document_id: "1HRMkP8KjHkQSqjJrq_V1QNXJqJ63JaGE6RSFiY_zBRo".to_string()
            }
        );
    }

    #[test]
    fn unrelated_url_is_rejected() {
        assert_eq!(
            parse_source_url("https://example.com/sheet#gid=1"),
            Err(SourceUrlError::Unrecognized)
        );
        assert_eq!(parse_source_url(""), Err(SourceUrlError::Unrecognized));
    }

    #[test]
    fn canonical_url_parses_back() {
        let locator = SourceLocator::Spreadsheet {
            spreadsheet_id: "xyz".to_string(),
            gid: "7".to_string(),
        };
        assert_eq!(parse_source_url(&locator.source_url()), Ok(locator));
    }
}
