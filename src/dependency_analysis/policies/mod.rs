mod excused_dependencies;

pub use excused_dependencies::{
    ExcuseRule, ExcusedDependencies, FACTORY_SUFFIX, TEST_MARKERS, TEST_SUITE_MARKERS,
};
