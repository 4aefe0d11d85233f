//! Student survey record submitted to the spreadsheet web-app.
//!
//! The record only lives for one submit call: the form collects the values,
//! [`StudentSurvey::submission_url`] turns them into a query string and the
//! frontend fires a single request at the spreadsheet endpoint.

use serde::{Deserialize, Serialize};

/// Lowest birth year accepted by the form.
pub const MIN_BIRTH_YEAR: i32 = 1990;

/// One submitted survey row. Field names follow the wire (camelCase) names
/// the spreadsheet script reads from the request parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSurvey {
    pub name: String,
    pub birth_year: String,
    pub grade: String,
    pub school_name: String,
    pub city: String,
    pub school_score: String,
    pub mock_exam_score: String,
    pub study_style: String,
    pub preferred_method: String,
    pub challenging_part: String,
    pub feature_request: String,
    pub timestamp: String,
}

impl StudentSurvey {
    /// Returns the `(parameter, value)` pairs of every non-empty field, in the
    /// column order of the target sheet. Values are trimmed.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("birthYear", &self.birth_year),
            ("grade", &self.grade),
            ("schoolName", &self.school_name),
            ("city", &self.city),
            ("schoolScore", &self.school_score),
            ("mockExamScore", &self.mock_exam_score),
            ("studyStyle", &self.study_style),
            ("preferredMethod", &self.preferred_method),
            ("challengingPart", &self.challenging_part),
            ("featureRequest", &self.feature_request),
            ("timestamp", &self.timestamp),
        ]
        .into_iter()
        .map(|(key, value)| (key, value.trim()))
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }

    /// Percent-encoded query string built from [`Self::query_pairs`].
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Full GET url for the spreadsheet endpoint.
    pub fn submission_url(&self, endpoint: &str) -> String {
        let query = self.query_string();
        if query.is_empty() {
            return endpoint.to_string();
        }
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!("{}{}{}", endpoint, separator, query)
    }
}

/// Clamps the birth year typed into the form to `MIN_BIRTH_YEAR..=current_year`.
///
/// Input that is not an integer is returned unchanged.
pub fn clamp_birth_year(input: &str, current_year: i32) -> String {
    match input.trim().parse::<i32>() {
        Ok(year) if year < MIN_BIRTH_YEAR => MIN_BIRTH_YEAR.to_string(),
        Ok(year) if year > current_year => current_year.to_string(),
        _ => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> StudentSurvey {
        StudentSurvey {
            name: "김민지".to_string(),
            birth_year: "2008".to_string(),
            grade: "고2".to_string(),
            school_name: "한빛 고등학교".to_string(),
            city: "서울시 강남구".to_string(),
            timestamp: "2024. 3. 1. 오후 3:00:00".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn query_pairs_skip_empty_fields() {
        let mut survey = sample();
        survey.study_style = "   ".to_string();
        survey.feature_request = "AI 튜터".to_string();

        let keys: Vec<&str> = survey.query_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "birthYear",
                "grade",
                "schoolName",
                "city",
                "featureRequest",
                "timestamp"
            ]
        );
    }

    #[test]
    fn submission_url_encodes_every_non_empty_field() {
        let url = sample().submission_url("https://script.example.com/exec");

        assert!(url.starts_with("https://script.example.com/exec?name="));
        assert!(url.contains("birthYear=2008"));
        assert!(url.contains(&format!("city={}", urlencoding::encode("서울시 강남구"))));
        assert!(!url.contains(' '));
        assert!(!url.contains("schoolScore"));
    }

    #[test]
    fn submission_url_appends_to_existing_query() {
        let url = sample().submission_url("https://script.example.com/exec?v=2");
        assert!(url.starts_with("https://script.example.com/exec?v=2&name="));
    }

    #[test]
    fn empty_survey_targets_bare_endpoint() {
        let url = StudentSurvey::default().submission_url("https://script.example.com/exec");
        assert_eq!(url, "https://script.example.com/exec");
    }

    #[test]
    fn birth_year_is_clamped_to_range() {
        assert_eq!(clamp_birth_year("1985", 2026), "1990");
        assert_eq!(clamp_birth_year("2031", 2026), "2026");
        assert_eq!(clamp_birth_year("2009", 2026), "2009");
        assert_eq!(clamp_birth_year("", 2026), "");
        assert_eq!(clamp_birth_year("20", 2026), "1990");
    }

    #[test]
    fn serializes_with_sheet_parameter_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["birthYear"], "2008");
        assert_eq!(json["schoolName"], "한빛 고등학교");
    }
}
