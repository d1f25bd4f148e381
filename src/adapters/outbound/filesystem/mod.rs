/// Filesystem adapters: reading class directories, writing reports
mod class_directory_source;
mod file_writer;

pub use class_directory_source::ClassDirectorySource;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
