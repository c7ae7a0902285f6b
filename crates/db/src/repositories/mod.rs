//! Repository layer: one unit struct per table.

pub mod action_repo;
pub mod admin_repo;
pub mod organization_repo;
pub mod question_repo;
pub mod respondent_repo;
pub mod response_repo;
pub mod survey_repo;
pub mod user_repo;

pub use action_repo::ActionRepo;
pub use admin_repo::AdminRepo;
pub use organization_repo::OrganizationRepo;
pub use question_repo::QuestionRepo;
pub use respondent_repo::RespondentRepo;
pub use response_repo::ResponseRepo;
pub use survey_repo::SurveyRepo;
pub use user_repo::UserRepo;
