// File: ./src/model/mod.rs
pub mod dates;
pub mod directive;
pub mod item;
pub mod parser;

pub use item::{Phase, Project, Reminder, ReminderReport, Status, Task};
