use std::collections::HashSet;

/// The set of field names a client asked for, parsed from the raw `fields`
/// query value. Duplicates are idempotent and empty segments match nothing,
/// so `"id,,id"` is just `{"", "id"}`.
#[derive(Debug, Clone, Default)]
pub struct ProjectionRequest {
    names: HashSet<String>,
}

impl ProjectionRequest {
    pub fn parse(raw: &str) -> Self {
        Self {
            names: raw.split(',').map(str::to_string).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_commas() {
        let request = ProjectionRequest::parse("id,name,group");
        assert!(request.contains("id"));
        assert!(request.contains("name"));
        assert!(request.contains("group"));
        assert!(!request.contains("code"));
    }

    #[test]
    fn duplicates_are_idempotent() {
        let request = ProjectionRequest::parse("id,id,id");
        assert!(request.contains("id"));
    }

    #[test]
    fn empty_segments_match_nothing_registered() {
        let request = ProjectionRequest::parse("id,,name");
        assert!(request.contains(""));
        assert!(request.contains("id"));
        assert!(request.contains("name"));
    }

    #[test]
    fn empty_string_yields_only_the_empty_name() {
        let request = ProjectionRequest::parse("");
        assert!(request.contains(""));
        assert!(!request.contains("id"));
    }
}
