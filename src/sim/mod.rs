pub mod event;
pub mod maze;
pub mod outcome_log;
pub mod step;
pub mod world;
