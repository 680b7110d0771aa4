pub mod file;
pub mod seaorm;
