pub mod auth;
pub mod bot_session;
pub mod company;
pub mod employee;

// Re-export common types
pub use auth::{SessionClaims, SESSION_TTL_DAYS};
pub use bot_session::{mask_token, BotSession, BotSessionSummary, NewBotSession};
pub use company::{Company, CompanyStatus, NewCompany};
pub use employee::{Employee, EmployeeChanges, EmployeeStatus, NewEmployee};
