mod apply;
mod name_builder;
mod planner;
mod types;

pub use apply::{apply_plan, ApplyError};
pub use name_builder::generate_file_name;
pub use planner::plan_directory;
pub use types::{ApplyReport, RenameEntry, RenamePlan};
