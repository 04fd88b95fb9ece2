pub mod account_service;
pub mod grading;
pub mod quiz_service;

pub use account_service::AccountService;
pub use quiz_service::QuizService;
