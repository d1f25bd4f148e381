use std::collections::BTreeSet;

/// A compiled unit after parsing: its dotted name and the names it references.
///
/// The dependency set never contains the unit's own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUnit {
    name: String,
    dependencies: BTreeSet<String>,
}

impl ParsedUnit {
    pub fn new(name: String, mut dependencies: BTreeSet<String>) -> Self {
        dependencies.remove(&name);
        Self { name, dependencies }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }

    /// Simple name: the part after the last package separator.
    pub fn simple_name(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(_, simple)| simple)
    }

    pub fn into_parts(self) -> (String, BTreeSet<String>) {
        (self.name, self.dependencies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parsed_unit_drops_self_reference() {
        let unit = ParsedUnit::new(
            "de.x.A".to_string(),
            deps(&["de.x.A", "de.x.B", "java.lang.Object"]),
        );
        assert_eq!(unit.name(), "de.x.A");
        assert_eq!(unit.dependencies(), &deps(&["de.x.B", "java.lang.Object"]));
    }

    #[test]
    fn test_parsed_unit_without_dependencies() {
        let unit = ParsedUnit::new("A".to_string(), BTreeSet::new());
        assert!(unit.dependencies().is_empty());
        assert_eq!(unit.simple_name(), "A");
    }

    #[test]
    fn test_simple_name_of_inner_unit() {
        let unit = ParsedUnit::new("de.x.Outer$Inner".to_string(), BTreeSet::new());
        assert_eq!(unit.simple_name(), "Outer$Inner");
    }
}
