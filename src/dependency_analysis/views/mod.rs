mod cycles_only;
mod list_mode_preset;
mod reachability_from;
mod view_filter;
mod view_stack;

pub use cycles_only::CyclesOnly;
pub use list_mode_preset::{ListModePreset, ARCHIVE_PREFIX, DIRECTORY_PREFIX};
pub use reachability_from::ReachabilityFrom;
pub use view_filter::ViewFilter;
pub use view_stack::ViewStack;
