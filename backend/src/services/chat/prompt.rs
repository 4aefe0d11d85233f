//! Prompt construction for the chat endpoint.
//!
//! The prompt has three parts: the source data, the optional web search
//! results, and the question with the answering instructions. Sheet data is
//! rendered one of two ways. Short survey answers become a compact `|` table.
//! Sheets holding interview scripts or other long text become one block per
//! row so that the model sees every field name next to its value.

use common::model::chat::SearchSource;

use super::fetch::{SheetTable, SourceContent};

pub const SYSTEM_PROMPT: &str = "당신은 데이터 분석을 도와주는 친절한 어시스턴트입니다. \
주어진 데이터를 기반으로 정확하게 답변해주세요. 이전 대화 내용이 있다면 맥락을 이어서 답변하세요.";

/// A value longer than this marks the sheet as long-text.
const LONG_VALUE_CHARS: usize = 200;
/// Long values are clipped to this many characters.
const LONG_VALUE_EXCERPT: usize = 500;
/// Table cells are clipped to this many characters.
const TABLE_CELL_CHARS: usize = 50;
/// Document text beyond this is dropped.
const MAX_DOCUMENT_CHARS: usize = 60_000;

const INSTRUCTIONS: &str = "주의사항:
1. 데이터에 인터뷰 스크립트나 대화 내용이 있다면, 해당 내용을 꼼꼼히 분석하여 답변하세요.
2. 사람의 이름이 언급되면, 해당 인물과 관련된 모든 정보를 종합하여 답변하세요.
3. 답변은 친절하고 상세하게 작성해주세요.
4. 데이터를 기반으로 정확한 정보를 제공하고, 필요한 경우 추가적인 분석이나 인사이트도 제공하세요.";

const SEARCH_INSTRUCTION: &str =
    "5. 웹 검색 결과를 인용할 때는 [번호] 형식으로 출처를 표시하세요.";

/// `source_name` is the tab title shown to the user, when known.
pub fn build_prompt(
    question: &str,
    source_name: Option<&str>,
    content: &SourceContent,
    search: &[SearchSource],
) -> String {
    let source_name = source_name.map(str::trim).filter(|name| !name.is_empty());
    let mut prompt = match content {
        SourceContent::Table(table) => render_table(table, source_name),
        SourceContent::Document(text) => render_document(text, source_name),
    };

    if !search.is_empty() {
        prompt.push_str(&render_search_results(search));
    }

    prompt.push_str("\n\n위 데이터를 참고하여 다음 질문에 답해주세요:\n");
    prompt.push_str(&format!("질문: {}\n\n", question));
    prompt.push_str(INSTRUCTIONS);
    if !search.is_empty() {
        prompt.push('\n');
        prompt.push_str(SEARCH_INSTRUCTION);
    }
    prompt.push('\n');
    prompt
}

/// First `max` characters of `value`.
fn clip(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

fn is_long_text(table: &SheetTable) -> bool {
    let header_hint = table.headers.iter().any(|h| {
        let h = h.to_lowercase();
        h.contains("interview") || h.contains("script") || h.contains("인터뷰")
    });
    header_hint
        || table
            .rows
            .iter()
            .flatten()
            .any(|value| value.chars().count() > LONG_VALUE_CHARS)
}

fn render_table(table: &SheetTable, source_name: Option<&str>) -> String {
    let mut out = match source_name {
        Some(name) => format!("다음은 '{}' 시트의 데이터입니다:\n\n", name),
        None => String::from("다음은 구글 시트의 데이터입니다:\n\n"),
    };
    if table.rows.is_empty() {
        out.push_str("데이터가 없습니다.\n");
        return out;
    }

    if is_long_text(table) {
        for (i, row) in table.rows.iter().enumerate() {
            out.push_str(&format!("\n=== 데이터 #{} ===\n", i + 1));
            for (header, value) in table.headers.iter().zip(row) {
                if value.is_empty() {
                    continue;
                }
                let len = value.chars().count();
                if len > LONG_VALUE_CHARS {
                    out.push_str(&format!(
                        "\n[{}]:\n{}...\n(총 {}자)\n",
                        header,
                        clip(value, LONG_VALUE_EXCERPT),
                        len
                    ));
                } else {
                    out.push_str(&format!("{}: {}\n", header, value));
                }
            }
            out.push('\n');
        }
    } else {
        out.push_str(&table.headers.join(" | "));
        out.push('\n');
        out.push_str(&"-".repeat(50));
        out.push('\n');
        for row in &table.rows {
            let cells: Vec<&str> = row.iter().map(|v| clip(v, TABLE_CELL_CHARS)).collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }
    }
    out
}

fn render_document(text: &str, source_name: Option<&str>) -> String {
    let mut out = match source_name {
        Some(name) => format!("다음은 '{}' 문서의 내용입니다:\n\n", name),
        None => String::from("다음은 구글 문서의 내용입니다:\n\n"),
    };
    let text = text.trim();
    if text.is_empty() {
        out.push_str("데이터가 없습니다.\n");
        return out;
    }
    let clipped = clip(text, MAX_DOCUMENT_CHARS);
    out.push_str(clipped);
    out.push('\n');
    if clipped.len() < text.len() {
        out.push_str(&format!(
            "\n(문서가 길어 앞부분 {}자만 포함했습니다.)\n",
            MAX_DOCUMENT_CHARS
        ));
    }
    out
}

fn render_search_results(results: &[SearchSource]) -> String {
    let mut out = String::from("\n\n=== 웹 검색 결과 ===\n\n");
    for (idx, result) in results.iter().enumerate() {
        out.push_str(&format!("[{}] {}\n", idx + 1, result.title));
        out.push_str(&format!("   출처: {}\n", result.source));
        out.push_str(&format!("   요약: {}\n", result.snippet));
        out.push_str(&format!("   링크: {}\n\n", result.link));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(headers: &[&str], rows: &[&[&str]]) -> SheetTable {
        SheetTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|v| v.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn short_answers_render_as_table() {
        let content = SourceContent::Table(table(
            &["이름", "학년"],
            &[&["김민지", "중2"], &["박서준", "고1"]],
        ));
        let prompt = build_prompt("중학생은 몇 명?", None, &content, &[]);

        assert!(prompt.contains("이름 | 학년\n"));
        assert!(prompt.contains("김민지 | 중2\n"));
        assert!(prompt.contains("질문: 중학생은 몇 명?"));
        assert!(!prompt.contains("웹 검색 결과"));
    }

    #[test]
    fn table_cells_are_clipped() {
        let long = "가".repeat(80);
        let content = SourceContent::Table(table(&["메모"], &[&[long.as_str()]]));
        let rendered = build_prompt("q", None, &content, &[]);
        assert!(rendered.contains(&format!("{}\n", "가".repeat(50))));
        assert!(!rendered.contains(&"가".repeat(51)));
    }

    #[test]
    fn interview_header_renders_records() {
        let content = SourceContent::Table(table(
            &["이름", "Interview Script"],
            &[&["김민지", "GPT로 숙제를 해요"]],
        ));
        let prompt = build_prompt("q", None, &content, &[]);

        assert!(prompt.contains("=== 데이터 #1 ===\n이름: 김민지\nInterview Script: GPT로 숙제를 해요\n"));
    }

    #[test]
    fn long_values_are_excerpted_with_length() {
        let long = "a".repeat(700);
        let content = SourceContent::Table(table(&["이름", "답변"], &[&["김민지", long.as_str()]]));
        let prompt = build_prompt("q", None, &content, &[]);

        assert!(prompt.contains(&format!("[답변]:\n{}...\n(총 700자)", "a".repeat(500))));
    }

    #[test]
    fn empty_sheet() {
        let content = SourceContent::Table(table(&["이름"], &[]));
        assert!(build_prompt("q", None, &content, &[]).contains("데이터가 없습니다."));
    }

    #[test]
    fn search_results_are_numbered() {
        let content = SourceContent::Document("인터뷰 원문".to_string());
        let search = vec![SearchSource {
            title: "AI 교육 동향".to_string(),
            link: "https://news.example.com/ai".to_string(),
            source: "news.example.com".to_string(),
            snippet: "요약".to_string(),
        }];
        let prompt = build_prompt("최신 트렌드?", None, &content, &search);

        assert!(prompt.starts_with("다음은 구글 문서의 내용입니다:\n\n인터뷰 원문\n"));
        assert!(prompt.contains("[1] AI 교육 동향\n   출처: news.example.com\n"));
        assert!(prompt.contains(SEARCH_INSTRUCTION));
    }

    #[test]
    fn source_name_titles_the_data() {
        let content = SourceContent::Table(table(&["이름"], &[&["김민지"]]));
        assert!(build_prompt("q", Some("2025 설문"), &content, &[])
            .starts_with("다음은 '2025 설문' 시트의 데이터입니다:\n\n"));
        assert!(build_prompt("q", Some("  "), &content, &[])
            .starts_with("다음은 구글 시트의 데이터입니다:"));

        let document = SourceContent::Document("원문".to_string());
        assert!(build_prompt("q", Some("인터뷰"), &document, &[])
            .starts_with("다음은 '인터뷰' 문서의 내용입니다:\n\n원문\n"));
    }

    #[test]
    fn clip_respects_char_boundaries() {
        assert_eq!(clip("한글텍스트", 2), "한글");
        assert_eq!(clip("abc", 10), "abc");
    }
}
