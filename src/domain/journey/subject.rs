//! Subject demographics and interview preferences.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Highest education level reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    HighSchool,
    Bachelor,
    Master,
    Phd,
    Other,
}

/// Current occupation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectStatus {
    Working,
    Student,
    Exploring,
    Transitioning,
}

/// Preferred register for question wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStyle {
    Formal,
    #[default]
    Casual,
}

/// Who is being interviewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    age: u8,
    education_level: Option<EducationLevel>,
    current_status: Option<SubjectStatus>,
    location: Option<String>,
}

impl Demographics {
    pub const MIN_AGE: u8 = 16;
    pub const MAX_AGE: u8 = 80;

    /// Creates demographics, validating the age range.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if age is outside 16-80
    pub fn new(
        age: u8,
        education_level: Option<EducationLevel>,
        current_status: Option<SubjectStatus>,
        location: Option<String>,
    ) -> Result<Self, ValidationError> {
        if !(Self::MIN_AGE..=Self::MAX_AGE).contains(&age) {
            return Err(ValidationError::out_of_range(
                "age",
                Self::MIN_AGE as i32,
                Self::MAX_AGE as i32,
                age as i32,
            ));
        }
        Ok(Self {
            age,
            education_level,
            current_status,
            location,
        })
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn education_level(&self) -> Option<EducationLevel> {
        self.education_level
    }

    pub fn current_status(&self) -> Option<SubjectStatus> {
        self.current_status
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

/// How the subject wants the interview run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub language: String,
    pub question_style: QuestionStyle,
    pub time_available: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            question_style: QuestionStyle::Casual,
            time_available: "15-20 minutes".to_string(),
        }
    }
}
