//! Group lookup collaborator

/// A group known to the platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    pub id: String,
    pub name: String,
}

impl GroupRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Resolves group names found in vendor extensions to group ids
pub trait GroupLookup: Send + Sync {
    fn find_groups_by_name(&self, name: &str) -> Vec<GroupRef>;
}

/// Fixed set of groups, matched by exact name
#[derive(Debug, Clone, Default)]
pub struct InMemoryGroupLookup {
    groups: Vec<GroupRef>,
}

impl InMemoryGroupLookup {
    pub fn new(groups: Vec<GroupRef>) -> Self {
        Self { groups }
    }

    pub fn with_group(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.groups.push(GroupRef::new(id, name));
        self
    }
}

impl GroupLookup for InMemoryGroupLookup {
    fn find_groups_by_name(&self, name: &str) -> Vec<GroupRef> {
        self.groups
            .iter()
            .filter(|group| group.name == name)
            .cloned()
            .collect()
    }
}
