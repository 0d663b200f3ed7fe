pub mod backup;
pub mod config;
pub mod console;
pub mod error;
pub mod grades;
pub mod roster;
pub mod session;
pub mod sheet;
pub mod student;
