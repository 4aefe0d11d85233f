use common::model::survey::StudentSurvey;

pub struct SurveyForm {
    pub survey: StudentSurvey,
    /// A submission is in flight; the submit button shows a spinner.
    pub loading: bool,
    pub submitted: bool,
}

impl SurveyForm {
    pub fn new() -> Self {
        Self {
            survey: StudentSurvey::default(),
            loading: false,
            submitted: false,
        }
    }
}
