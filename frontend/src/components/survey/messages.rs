use common::model::survey::StudentSurvey;

/// Form controls, one per survey field.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Name,
    BirthYear,
    Grade,
    SchoolName,
    City,
    SchoolScore,
    MockExamScore,
    StudyStyle,
    PreferredMethod,
    ChallengingPart,
    FeatureRequest,
}

impl Field {
    pub fn value(self, survey: &StudentSurvey) -> &str {
        match self {
            Field::Name => &survey.name,
            Field::BirthYear => &survey.birth_year,
            Field::Grade => &survey.grade,
            Field::SchoolName => &survey.school_name,
            Field::City => &survey.city,
            Field::SchoolScore => &survey.school_score,
            Field::MockExamScore => &survey.mock_exam_score,
            Field::StudyStyle => &survey.study_style,
            Field::PreferredMethod => &survey.preferred_method,
            Field::ChallengingPart => &survey.challenging_part,
            Field::FeatureRequest => &survey.feature_request,
        }
    }

    pub fn set(self, survey: &mut StudentSurvey, value: String) {
        let slot = match self {
            Field::Name => &mut survey.name,
            Field::BirthYear => &mut survey.birth_year,
            Field::Grade => &mut survey.grade,
            Field::SchoolName => &mut survey.school_name,
            Field::City => &mut survey.city,
            Field::SchoolScore => &mut survey.school_score,
            Field::MockExamScore => &mut survey.mock_exam_score,
            Field::StudyStyle => &mut survey.study_style,
            Field::PreferredMethod => &mut survey.preferred_method,
            Field::ChallengingPart => &mut survey.challenging_part,
            Field::FeatureRequest => &mut survey.feature_request,
        };
        *slot = value;
    }
}

pub enum Msg {
    Set(Field, String),
    /// Birth year input lost focus.
    ClampBirthYear,
    Submit,
    Submitted,
    Failed(String),
    Reset,
}
