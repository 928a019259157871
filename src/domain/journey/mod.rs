//! Journey module - the interview aggregate and its surrounding types.

mod aggregate;
mod answer;
mod errors;
mod events;
mod question;
mod subject;

pub use aggregate::{Journey, MAX_CLARIFICATIONS, STANDARD_QUESTION_BUDGET};
pub use answer::Answer;
pub use errors::JourneyError;
pub use events::{
    JourneyAbandoned, JourneyCompleted, JourneyStarted, QuestionGenerated, ResponseProcessed,
};
pub use question::{
    OptionDimension, OptionInterest, OptionMotivator, Question, QuestionDraft, QuestionOption,
};
pub use subject::{Demographics, EducationLevel, Preferences, QuestionStyle, SubjectStatus};
