//! Group manager - named, capacity-bounded groups of entities.
//!
//! Every mutation validates against the current snapshot and then either
//! applies exactly one change (and schedules one snapshot write) or leaves
//! the collection untouched. Expected refusals (unknown group, full group,
//! duplicate or missing member) are reported as `false`, never as errors.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::config::{CollectionConfig, InitialMembersPolicy};
use crate::domain::entity::dedup_by_id;
use crate::domain::{
    EntityId, EntityRef, Group, GroupId, GroupName, GroupNameError, GroupOrigin, MAX_GROUP_MEMBERS,
};
use crate::ports::KeyValueStore;

use super::snapshot::{SnapshotWriter, read_snapshot};

/// Storage key of the group snapshot.
pub const GROUPS_KEY: &str = "@teams";

/// Reasons `create_group` refuses its input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GroupError {
    #[error("Invalid group name: {0}")]
    InvalidName(#[from] GroupNameError),

    #[error("A group holds at most {max} members, got {count}")]
    TooManyMembers { count: usize, max: usize },
}

/// Owner of the Group Collection.
pub struct GroupManager {
    state: RwLock<Arc<Vec<Group>>>,
    store: Arc<dyn KeyValueStore>,
    writer: SnapshotWriter,
    config: CollectionConfig,
}

impl GroupManager {
    /// Create the manager and restore the persisted snapshot.
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        writer: SnapshotWriter,
        config: CollectionConfig,
    ) -> Self {
        let manager = Self {
            state: RwLock::new(Arc::new(Vec::new())),
            store,
            writer,
            config,
        };
        manager.load().await;
        manager
    }

    /// Replace in-memory state with the persisted snapshot.
    ///
    /// Queued writes are flushed first so the read observes them.
    /// Never fails: a missing or unreadable snapshot yields no groups.
    pub async fn load(&self) {
        self.writer.flush().await;
        let mut groups: Vec<Group> = read_snapshot(self.store.as_ref(), GROUPS_KEY).await;

        for group in &mut groups {
            let dropped = dedup_by_id(&mut group.members);
            if dropped > 0 {
                tracing::warn!(
                    group_id = %group.id,
                    dropped,
                    "Collapsed duplicate members in stored group"
                );
            }
        }

        tracing::debug!(count = groups.len(), "Loaded groups");
        *self.write_state() = Arc::new(groups);
    }

    /// All groups, in creation order.
    pub fn groups(&self) -> Arc<Vec<Group>> {
        Arc::clone(&self.read_state())
    }

    /// A copy of the group with `id`, if it exists.
    pub fn get(&self, id: &GroupId) -> Option<Group> {
        self.read_state().iter().find(|g| &g.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read_state().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_state().is_empty()
    }

    /// Groups that already hold `entity_id`.
    pub fn groups_containing(&self, entity_id: EntityId) -> Vec<Group> {
        self.read_state()
            .iter()
            .filter(|g| g.contains(entity_id))
            .cloned()
            .collect()
    }

    /// Groups that `add_member` would accept `entity_id` into.
    pub fn groups_accepting(&self, entity_id: EntityId) -> Vec<Group> {
        self.read_state()
            .iter()
            .filter(|g| g.accepts(entity_id))
            .cloned()
            .collect()
    }

    /// Append a new group and return its id.
    ///
    /// The name is trimmed and must be 1..=30 characters. Repeated entity ids
    /// in `initial_members` are collapsed. A list longer than
    /// [`MAX_GROUP_MEMBERS`] is handled per [`InitialMembersPolicy`].
    pub fn create_group(
        &self,
        name: &str,
        initial_members: Vec<EntityRef>,
        origin: GroupOrigin,
    ) -> Result<GroupId, GroupError> {
        let name = GroupName::parse(name)?;

        let mut members = initial_members;
        dedup_by_id(&mut members);

        if members.len() > MAX_GROUP_MEMBERS {
            match self.config.initial_members {
                InitialMembersPolicy::Accept => {
                    tracing::warn!(
                        count = members.len(),
                        max = MAX_GROUP_MEMBERS,
                        "Creating group over capacity"
                    );
                }
                InitialMembersPolicy::Truncate => {
                    tracing::debug!(count = members.len(), "Truncating initial members");
                    members.truncate(MAX_GROUP_MEMBERS);
                }
                InitialMembersPolicy::Reject => {
                    return Err(GroupError::TooManyMembers {
                        count: members.len(),
                        max: MAX_GROUP_MEMBERS,
                    });
                }
            }
        }

        let group = Group {
            id: GroupId::generate(),
            name: name.into_inner(),
            members,
            origin,
        };
        let id = group.id.clone();

        let mut state = self.write_state();
        let mut next = Vec::with_capacity(state.len() + 1);
        next.extend(state.iter().cloned());
        tracing::info!(
            group_id = %id,
            name = %group.name,
            members = group.members.len(),
            origin = %origin,
            "Created group"
        );
        next.push(group);
        self.commit(&mut state, next);

        Ok(id)
    }

    /// Delete the group with `id`. Returns `false` if no such group exists.
    pub fn delete_group(&self, id: &GroupId) -> bool {
        let mut state = self.write_state();
        if !state.iter().any(|g| &g.id == id) {
            tracing::debug!(group_id = %id, "Group not found; nothing to delete");
            return false;
        }

        let next = state.iter().filter(|g| &g.id != id).cloned().collect();
        self.commit(&mut state, next);
        tracing::info!(group_id = %id, "Deleted group");
        true
    }

    /// Delete every group. Returns how many were removed.
    pub fn delete_all(&self) -> usize {
        let mut state = self.write_state();
        let removed = state.len();
        if removed > 0 {
            self.commit(&mut state, Vec::new());
        }
        tracing::info!(removed, "Deleted all groups");
        removed
    }

    /// Rename the group with `id`.
    ///
    /// Returns `false` if the group does not exist or the trimmed name is
    /// empty or longer than 30 characters.
    pub fn rename_group(&self, id: &GroupId, new_name: &str) -> bool {
        let name = match GroupName::parse(new_name) {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!(group_id = %id, error = %e, "Ignoring rename");
                return false;
            }
        };

        self.update_group(id, |group| {
            Some(Group {
                name: name.into_inner(),
                ..group.clone()
            })
        })
    }

    /// Append `entity` to the group with `group_id`.
    ///
    /// Returns `false` without changing anything if the group does not
    /// exist, is full, or already holds an entity with the same id.
    pub fn add_member(&self, group_id: &GroupId, entity: EntityRef) -> bool {
        self.update_group(group_id, |group| {
            if group.is_full() {
                tracing::debug!(group_id = %group.id, "Group is full");
                return None;
            }
            if group.contains(entity.id) {
                tracing::debug!(group_id = %group.id, entity_id = entity.id, "Already a member");
                return None;
            }

            let mut members = Vec::with_capacity(group.members.len() + 1);
            members.extend(group.members.iter().cloned());
            members.push(entity);
            Some(Group {
                members,
                ..group.clone()
            })
        })
    }

    /// Remove the member with `entity_id` from the group with `group_id`.
    ///
    /// Returns `false` if the group does not exist or has no such member.
    pub fn remove_member(&self, group_id: &GroupId, entity_id: EntityId) -> bool {
        self.update_group(group_id, |group| {
            if !group.contains(entity_id) {
                tracing::debug!(group_id = %group.id, entity_id, "Not a member");
                return None;
            }

            Some(Group {
                members: group
                    .members
                    .iter()
                    .filter(|m| m.id != entity_id)
                    .cloned()
                    .collect(),
                ..group.clone()
            })
        })
    }

    /// Wait for every scheduled snapshot write to complete.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    /// Replace one group with the result of `apply`, under a single write lock.
    ///
    /// `apply` sees the pre-mutation group and returns `None` to refuse.
    fn update_group<F>(&self, id: &GroupId, apply: F) -> bool
    where
        F: FnOnce(&Group) -> Option<Group>,
    {
        let mut state = self.write_state();
        let Some(index) = state.iter().position(|g| &g.id == id) else {
            tracing::debug!(group_id = %id, "Group not found");
            return false;
        };
        let Some(updated) = apply(&state[index]) else {
            return false;
        };

        let mut next = Vec::clone(&state);
        next[index] = updated;
        self.commit(&mut state, next);
        true
    }

    /// Swap in the new state and queue its snapshot.
    fn commit(&self, state: &mut Arc<Vec<Group>>, next: Vec<Group>) {
        let next = Arc::new(next);
        self.writer.schedule(GROUPS_KEY, next.as_slice());
        *state = next;
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Arc<Vec<Group>>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Arc<Vec<Group>>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::InMemoryKeyValueStore;

    fn entity(id: EntityId) -> EntityRef {
        EntityRef::new(id, format!("entity-{id}"), format!("https://img.example/{id}.png"), vec![])
    }

    async fn open_with(store: Arc<InMemoryKeyValueStore>, config: CollectionConfig) -> GroupManager {
        let writer = SnapshotWriter::spawn(store.clone());
        GroupManager::open(store, writer, config).await
    }

    async fn open_empty() -> GroupManager {
        open_with(Arc::new(InMemoryKeyValueStore::new()), CollectionConfig::default()).await
    }

    #[tokio::test]
    async fn test_create_appends_in_order() {
        let manager = open_empty().await;
        let a = manager.create_group("Alpha", vec![], GroupOrigin::User).unwrap();
        let b = manager.create_group("Beta", vec![entity(1)], GroupOrigin::Assistant).unwrap();

        let groups = manager.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id, a);
        assert_eq!(groups[1].id, b);
        assert_eq!(groups[1].origin, GroupOrigin::Assistant);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_create_trims_and_validates_name() {
        let manager = open_empty().await;
        let id = manager.create_group("  Fire  ", vec![], GroupOrigin::User).unwrap();
        assert_eq!(manager.get(&id).unwrap().name, "Fire");

        assert_eq!(
            manager.create_group("   ", vec![], GroupOrigin::User),
            Err(GroupError::InvalidName(GroupNameError::Empty))
        );
        assert!(matches!(
            manager.create_group(&"x".repeat(31), vec![], GroupOrigin::User),
            Err(GroupError::InvalidName(GroupNameError::TooLong { len: 31 }))
        ));
        assert_eq!(manager.len(), 1);
    }

    #[tokio::test]
    async fn test_create_allows_duplicate_names() {
        let manager = open_empty().await;
        let a = manager.create_group("Team", vec![], GroupOrigin::User).unwrap();
        let b = manager.create_group("Team", vec![], GroupOrigin::User).unwrap();
        assert_ne!(a, b);
        assert_eq!(manager.len(), 2);
    }

    #[tokio::test]
    async fn test_create_collapses_duplicate_initial_members() {
        let manager = open_empty().await;
        let id = manager
            .create_group("Dupes", vec![entity(1), entity(1), entity(2)], GroupOrigin::User)
            .unwrap();
        assert_eq!(manager.get(&id).unwrap().members.len(), 2);
    }

    #[tokio::test]
    async fn test_oversized_initial_members_accept() {
        let manager = open_empty().await;
        let members = (1..=8).map(entity).collect();
        let id = manager.create_group("Big", members, GroupOrigin::Assistant).unwrap();

        let group = manager.get(&id).unwrap();
        assert_eq!(group.members.len(), 8);
        assert!(!manager.add_member(&id, entity(9)));
        assert!(manager.remove_member(&id, 1));
    }

    #[tokio::test]
    async fn test_oversized_initial_members_truncate() {
        let config =
            CollectionConfig::default().with_initial_members(InitialMembersPolicy::Truncate);
        let manager = open_with(Arc::new(InMemoryKeyValueStore::new()), config).await;

        let members = (1..=8).map(entity).collect();
        let id = manager.create_group("Big", members, GroupOrigin::User).unwrap();

        let ids: Vec<EntityId> = manager.get(&id).unwrap().members.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_oversized_initial_members_reject() {
        let config = CollectionConfig::default().with_initial_members(InitialMembersPolicy::Reject);
        let manager = open_with(Arc::new(InMemoryKeyValueStore::new()), config).await;

        let members = (1..=7).map(entity).collect();
        assert_eq!(
            manager.create_group("Big", members, GroupOrigin::User),
            Err(GroupError::TooManyMembers { count: 7, max: 6 })
        );
        assert!(manager.is_empty());

        let exactly_six = (1..=6).map(entity).collect();
        assert!(manager.create_group("Six", exactly_six, GroupOrigin::User).is_ok());
    }

    #[tokio::test]
    async fn test_add_member_refuses_unknown_group() {
        let manager = open_empty().await;
        assert!(!manager.add_member(&GroupId::from("missing"), entity(1)));
    }

    #[tokio::test]
    async fn test_add_member_twice_keeps_one_copy() {
        let manager = open_empty().await;
        let id = manager.create_group("Team", vec![], GroupOrigin::User).unwrap();

        assert!(manager.add_member(&id, entity(4)));
        assert!(!manager.add_member(&id, entity(4)));

        let group = manager.get(&id).unwrap();
        assert_eq!(group.members.iter().filter(|m| m.id == 4).count(), 1);
    }

    #[tokio::test]
    async fn test_full_group_is_unchanged_by_add() {
        let manager = open_empty().await;
        let id = manager
            .create_group("Full", (1..=6).map(entity).collect(), GroupOrigin::User)
            .unwrap();
        let before = manager.get(&id).unwrap().members;

        assert!(!manager.add_member(&id, entity(7)));
        assert_eq!(manager.get(&id).unwrap().members, before);
    }

    #[tokio::test]
    async fn test_full_group_still_renames_and_drains() {
        let manager = open_empty().await;
        let id = manager
            .create_group("Full", (1..=6).map(entity).collect(), GroupOrigin::User)
            .unwrap();

        assert!(manager.rename_group(&id, "Still Full"));
        assert!(manager.remove_member(&id, 3));
        assert!(manager.add_member(&id, entity(7)));

        let ids: Vec<EntityId> = manager.get(&id).unwrap().members.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 4, 5, 6, 7]);
    }

    #[tokio::test]
    async fn test_remove_member_refusals() {
        let manager = open_empty().await;
        let id = manager
            .create_group("Team", vec![entity(1), entity(2)], GroupOrigin::User)
            .unwrap();

        assert!(!manager.remove_member(&id, 99));
        assert!(!manager.remove_member(&GroupId::from("missing"), 1));
        assert_eq!(manager.get(&id).unwrap().members, vec![entity(1), entity(2)]);
    }

    #[tokio::test]
    async fn test_rename_rules() {
        let manager = open_empty().await;
        let id = manager.create_group("Fire", vec![], GroupOrigin::User).unwrap();

        assert!(!manager.rename_group(&id, "  "));
        assert!(!manager.rename_group(&id, &"y".repeat(31)));
        assert!(!manager.rename_group(&GroupId::from("missing"), "Water"));
        assert_eq!(manager.get(&id).unwrap().name, "Fire");

        assert!(manager.rename_group(&id, " Fire Squad "));
        assert_eq!(manager.get(&id).unwrap().name, "Fire Squad");
    }

    #[tokio::test]
    async fn test_delete_group_and_delete_all() {
        let manager = open_empty().await;
        let a = manager.create_group("A", vec![], GroupOrigin::User).unwrap();
        let b = manager.create_group("B", vec![], GroupOrigin::User).unwrap();
        let c = manager.create_group("C", vec![], GroupOrigin::User).unwrap();

        assert!(manager.delete_group(&b));
        assert!(!manager.delete_group(&b));
        let names: Vec<String> = manager.groups().iter().map(|g| g.name.clone()).collect();
        assert_eq!(names, vec!["A".to_string(), "C".to_string()]);

        assert_eq!(manager.delete_all(), 2);
        assert!(manager.is_empty());
        assert!(!manager.delete_group(&a));
        assert!(!manager.delete_group(&c));
        assert_eq!(manager.delete_all(), 0);
    }

    #[tokio::test]
    async fn test_cross_population_queries() {
        let manager = open_empty().await;
        let full = manager
            .create_group("Full", (1..=6).map(entity).collect(), GroupOrigin::User)
            .unwrap();
        let holds = manager.create_group("Holds", vec![entity(25)], GroupOrigin::User).unwrap();
        let open = manager.create_group("Open", vec![], GroupOrigin::User).unwrap();

        let containing: Vec<GroupId> =
            manager.groups_containing(25).into_iter().map(|g| g.id).collect();
        assert_eq!(containing, vec![holds]);

        let accepting: Vec<GroupId> =
            manager.groups_accepting(25).into_iter().map(|g| g.id).collect();
        assert_eq!(accepting, vec![open.clone()]);

        let accepting_new: Vec<GroupId> =
            manager.groups_accepting(99).into_iter().map(|g| g.id).collect();
        assert!(!accepting_new.contains(&full));
        assert!(accepting_new.contains(&open));
    }

    #[tokio::test]
    async fn test_snapshot_written_and_restored() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let manager = open_with(store.clone(), CollectionConfig::default()).await;

        let id = manager.create_group("Water Team", vec![], GroupOrigin::User).unwrap();
        manager.add_member(&id, entity(7));
        manager.flush().await;

        let raw = store.peek(GROUPS_KEY).unwrap();
        let stored: Vec<Group> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.as_slice(), manager.groups().as_slice());

        let reopened = open_with(store, CollectionConfig::default()).await;
        assert_eq!(reopened.groups(), manager.groups());
    }

    #[tokio::test]
    async fn test_load_waits_for_queued_writes() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let manager = open_with(store.clone(), CollectionConfig::default()).await;

        let id = manager.create_group("Fire Team", vec![entity(4)], GroupOrigin::User).unwrap();
        manager.load().await;
        manager.flush().await;

        let raw = store.peek(GROUPS_KEY).unwrap();
        let stored: Vec<Group> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(stored.as_slice(), manager.groups().as_slice());
    }

    #[tokio::test]
    async fn test_refused_mutation_writes_nothing() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let manager = open_with(store.clone(), CollectionConfig::default()).await;

        assert!(!manager.add_member(&GroupId::from("missing"), entity(1)));
        assert!(!manager.delete_group(&GroupId::from("missing")));
        manager.flush().await;

        assert!(store.peek(GROUPS_KEY).is_none());
    }

    #[tokio::test]
    async fn test_load_collapses_duplicate_members() {
        let raw = r#"[{"id":"1700000000000","name":"Legacy","pokemons":[
            {"id":1,"name":"bulbasaur","imageUrl":"","types":["grass"]},
            {"id":1,"name":"bulbasaur","imageUrl":"","types":["grass"]}
        ],"createdBy":"user"}]"#;
        let store = Arc::new(InMemoryKeyValueStore::with_entry(GROUPS_KEY, raw));
        let manager = open_with(store, CollectionConfig::default()).await;

        let group = manager.get(&GroupId::from("1700000000000")).unwrap();
        assert_eq!(group.members.len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_fails_open() {
        let store = Arc::new(InMemoryKeyValueStore::with_entry(GROUPS_KEY, "[{\"id\":"));
        let manager = open_with(store, CollectionConfig::default()).await;
        assert!(manager.is_empty());
    }
}
