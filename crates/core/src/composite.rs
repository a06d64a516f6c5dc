//! Composite folder/record tree.
//!
//! A [`Folder`] owns an ordered sequence of [`CompositeNode`]s, each of which is either another
//! folder or a [`RecordItem`] leaf. Children keep insertion order and every child has exactly
//! one parent.
//!
//! Ids are expected to be unique among a folder's direct children. [`Folder::add`] does not
//! check this; when ids collide, [`Folder::remove`] removes the first match in insertion order.
//! Use [`Folder::try_add`] to reject duplicates up front.

use chrono::{DateTime, Utc};
use medfolder_types::ComponentId;
use serde::{Deserialize, Serialize};

use crate::{FolderError, FolderResult};

/// A node of the composite tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompositeNode {
    Folder(Folder),
    Record(RecordItem),
}

impl CompositeNode {
    pub fn id(&self) -> ComponentId {
        match self {
            CompositeNode::Folder(folder) => folder.id.clone(),
            CompositeNode::Record(record) => ComponentId::Number(record.id),
        }
    }

    /// Returns `true` if this node is identified by `id`.
    pub fn has_id(&self, id: &ComponentId) -> bool {
        match self {
            CompositeNode::Folder(folder) => &folder.id == id,
            CompositeNode::Record(record) => id.as_number() == Some(record.id),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CompositeNode::Folder(folder) => &folder.name,
            CompositeNode::Record(record) => &record.name,
        }
    }

    /// Records are leaves; folders never are, even when empty.
    pub fn is_leaf(&self) -> bool {
        match self {
            CompositeNode::Folder(folder) => folder.is_leaf(),
            CompositeNode::Record(record) => record.is_leaf(),
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, CompositeNode::Folder(_))
    }

    pub fn is_record(&self) -> bool {
        matches!(self, CompositeNode::Record(_))
    }

    pub fn as_folder(&self) -> Option<&Folder> {
        match self {
            CompositeNode::Folder(folder) => Some(folder),
            CompositeNode::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordItem> {
        match self {
            CompositeNode::Folder(_) => None,
            CompositeNode::Record(record) => Some(record),
        }
    }

    pub fn display(&self) -> DisplayNode {
        match self {
            CompositeNode::Folder(folder) => folder.display(),
            CompositeNode::Record(record) => record.display(),
        }
    }
}

impl From<Folder> for CompositeNode {
    fn from(folder: Folder) -> Self {
        CompositeNode::Folder(folder)
    }
}

impl From<RecordItem> for CompositeNode {
    fn from(record: RecordItem) -> Self {
        CompositeNode::Record(record)
    }
}

/// A folder of records and sub-folders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Folder {
    id: ComponentId,
    name: String,
    children: Vec<CompositeNode>,
}

impl Folder {
    pub fn new(id: impl Into<ComponentId>, name: impl Into<String>) -> Self {
        Self::with_children(id, name, Vec::new())
    }

    pub(crate) fn with_children(
        id: impl Into<ComponentId>,
        name: impl Into<String>,
        children: Vec<CompositeNode>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children,
        }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_leaf(&self) -> bool {
        false
    }

    /// Appends a child. No duplicate-id check, no sorting.
    pub fn add(&mut self, component: impl Into<CompositeNode>) {
        self.children.push(component.into());
    }

    pub fn add_folder(&mut self, folder: Folder) {
        self.add(folder);
    }

    pub fn add_record(&mut self, record: RecordItem) {
        self.add(record);
    }

    /// Appends a child unless a direct child with the same id already exists.
    ///
    /// # Errors
    ///
    /// Returns `FolderError::DuplicateId` if the id is already taken; the folder is unchanged.
    pub fn try_add(&mut self, component: impl Into<CompositeNode>) -> FolderResult<()> {
        let component = component.into();
        let id = component.id();

        if self.children.iter().any(|child| child.has_id(&id)) {
            tracing::warn!(%id, folder = %self.id, "rejected duplicate component id");
            return Err(FolderError::DuplicateId {
                id,
                folder: self.id.clone(),
            });
        }

        self.children.push(component);
        Ok(())
    }

    /// Removes the first direct child with the same id as `component`.
    ///
    /// Returns the removed child, or `None` (leaving the folder untouched) if no child matches.
    pub fn remove(&mut self, component: &CompositeNode) -> Option<CompositeNode> {
        self.remove_by_id(&component.id())
    }

    /// Removes the first direct child identified by `id`.
    pub fn remove_by_id(&mut self, id: &ComponentId) -> Option<CompositeNode> {
        let position = self.children.iter().position(|child| child.has_id(id))?;
        Some(self.children.remove(position))
    }

    pub fn children(&self) -> &[CompositeNode] {
        &self.children
    }

    /// Direct child folders, in child order.
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.children.iter().filter_map(CompositeNode::as_folder)
    }

    /// Direct child records, in child order.
    pub fn records(&self) -> impl Iterator<Item = &RecordItem> {
        self.children.iter().filter_map(CompositeNode::as_record)
    }

    /// Finds the first descendant identified by `id`, searching depth-first in child order.
    ///
    /// The folder itself is not considered.
    pub fn find(&self, id: &ComponentId) -> Option<&CompositeNode> {
        let mut pending: Vec<&CompositeNode> = self.children.iter().rev().collect();

        while let Some(node) = pending.pop() {
            if node.has_id(id) {
                return Some(node);
            }
            if let CompositeNode::Folder(folder) = node {
                pending.extend(folder.children.iter().rev());
            }
        }

        None
    }

    /// Total number of record leaves in this folder's subtree.
    pub fn record_count(&self) -> usize {
        let mut count = 0;
        let mut pending: Vec<&Folder> = vec![self];

        while let Some(folder) = pending.pop() {
            for child in &folder.children {
                match child {
                    CompositeNode::Folder(sub) => pending.push(sub),
                    CompositeNode::Record(_) => count += 1,
                }
            }
        }

        count
    }

    /// Projection of this folder and its whole subtree.
    pub fn display(&self) -> DisplayNode {
        let mut parents: Vec<DisplayFrame<'_>> = Vec::new();
        let mut current = DisplayFrame::open(self);

        loop {
            match current.pending.next() {
                Some(CompositeNode::Folder(sub)) => {
                    parents.push(std::mem::replace(&mut current, DisplayFrame::open(sub)));
                }
                Some(CompositeNode::Record(record)) => current.children.push(record.display()),
                None => {
                    let Some(mut parent) = parents.pop() else {
                        return current.close();
                    };
                    parent.children.push(current.close());
                    current = parent;
                }
            }
        }
    }
}

// Nested folders are flattened onto a work-list so deep trees drop in constant stack space.
impl Drop for Folder {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);

        while let Some(node) = pending.pop() {
            if let CompositeNode::Folder(mut folder) = node {
                pending.append(&mut folder.children);
            }
        }
    }
}

/// A folder whose projection is being built: children not yet visited and those already projected.
struct DisplayFrame<'a> {
    folder: &'a Folder,
    pending: std::slice::Iter<'a, CompositeNode>,
    children: Vec<DisplayNode>,
}

impl<'a> DisplayFrame<'a> {
    fn open(folder: &'a Folder) -> Self {
        Self {
            folder,
            pending: folder.children.iter(),
            children: Vec::with_capacity(folder.children.len()),
        }
    }

    fn close(self) -> DisplayNode {
        DisplayNode::Folder {
            id: self.folder.id.clone(),
            name: self.folder.name.clone(),
            children: self.children,
        }
    }
}

/// A medical record placed in the composite tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordItem {
    pub id: i64,
    pub name: String,
    pub date: DateTime<Utc>,
    pub diagnosis: String,
    pub treatment: String,
    pub notes: String,
    pub follow_up_date: Option<DateTime<Utc>>,
}

impl RecordItem {
    pub fn is_leaf(&self) -> bool {
        true
    }

    /// Projection for display. `notes` and `follow_up_date` are not included.
    pub fn display(&self) -> DisplayNode {
        DisplayNode::Record {
            id: ComponentId::Number(self.id),
            name: self.name.clone(),
            date: self.date,
            diagnosis: self.diagnosis.clone(),
            treatment: self.treatment.clone(),
        }
    }
}

/// Plain nested projection of a composite tree, handed to the presentation layer.
///
/// Serialises with a `type` discriminant of `"folder"` or `"record"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DisplayNode {
    Folder {
        id: ComponentId,
        name: String,
        children: Vec<DisplayNode>,
    },
    Record {
        id: ComponentId,
        name: String,
        date: DateTime<Utc>,
        diagnosis: String,
        treatment: String,
    },
}

impl DisplayNode {
    pub fn id(&self) -> &ComponentId {
        match self {
            DisplayNode::Folder { id, .. } | DisplayNode::Record { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DisplayNode::Folder { name, .. } | DisplayNode::Record { name, .. } => name,
        }
    }

    pub fn children(&self) -> &[DisplayNode] {
        match self {
            DisplayNode::Folder { children, .. } => children,
            DisplayNode::Record { .. } => &[],
        }
    }
}

impl Drop for DisplayNode {
    fn drop(&mut self) {
        let DisplayNode::Folder { children, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(children);

        while let Some(mut node) = pending.pop() {
            if let DisplayNode::Folder { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MedicalComponentFactory;
    use chrono::TimeZone;

    fn record(id: i64, name: &str) -> RecordItem {
        MedicalComponentFactory::create_record(
            id,
            name,
            Utc.with_ymd_and_hms(2023, 7, 20, 0, 0, 0).unwrap(),
            "Routine bloodwork",
            "No abnormalities detected",
            "All values within normal range",
            None,
        )
    }

    fn child_ids(folder: &Folder) -> Vec<ComponentId> {
        folder.children().iter().map(CompositeNode::id).collect()
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let mut folder = Folder::new("lab-results", "Lab Results");
        folder.add_record(record(12, "Lipid Panel"));
        folder.add_folder(Folder::new("archive", "Archive"));
        folder.add(record(11, "Complete Blood Count"));

        assert_eq!(
            child_ids(&folder),
            vec![
                ComponentId::Number(12),
                ComponentId::from("archive"),
                ComponentId::Number(11)
            ]
        );
    }

    #[test]
    fn add_does_not_check_duplicates() {
        let mut folder = Folder::new("root", "Root");
        folder.add_record(record(1, "first"));
        folder.add_record(record(1, "second"));
        assert_eq!(folder.children().len(), 2);
    }

    #[test]
    fn try_add_rejects_duplicate_ids() {
        let mut folder = Folder::new("root", "Root");
        folder.try_add(record(1, "first")).expect("first add succeeds");

        let err = folder
            .try_add(record(1, "second"))
            .expect_err("duplicate should be rejected");
        assert!(matches!(
            err,
            FolderError::DuplicateId { id: ComponentId::Number(1), ref folder } if folder == &ComponentId::from("root")
        ));
        assert_eq!(folder.children().len(), 1);
        assert_eq!(folder.children()[0].name(), "first");
    }

    #[test]
    fn try_add_treats_numeric_and_textual_ids_as_distinct() {
        let mut folder = Folder::new("root", "Root");
        folder.try_add(record(1, "record")).expect("record");
        folder
            .try_add(Folder::new("1", "Folder named one"))
            .expect("textual id does not collide with numeric id");
        assert_eq!(folder.children().len(), 2);
    }

    #[test]
    fn remove_deletes_matching_child() {
        let mut folder = Folder::new("root", "Root");
        folder.add_record(record(1, "one"));
        folder.add_record(record(2, "two"));

        let target = CompositeNode::from(record(1, "whatever the name"));
        let removed = folder.remove(&target).expect("removed");

        assert_eq!(removed.name(), "one");
        assert_eq!(child_ids(&folder), vec![ComponentId::Number(2)]);
    }

    #[test]
    fn remove_is_a_no_op_when_absent() {
        let mut folder = Folder::new("root", "Root");
        folder.add_record(record(1, "one"));

        assert!(folder.remove_by_id(&ComponentId::Number(9)).is_none());
        assert!(folder.remove_by_id(&ComponentId::from("1")).is_none());
        assert_eq!(folder.children().len(), 1);
    }

    #[test]
    fn remove_with_colliding_ids_takes_the_first_match() {
        let mut folder = Folder::new("root", "Root");
        folder.add_record(record(1, "first"));
        folder.add_record(record(1, "second"));

        let removed = folder.remove_by_id(&ComponentId::Number(1)).expect("removed");
        assert_eq!(removed.name(), "first");
        assert_eq!(folder.children()[0].name(), "second");
    }

    #[test]
    fn remove_only_looks_at_direct_children() {
        let mut inner = Folder::new("inner", "Inner");
        inner.add_record(record(5, "nested"));
        let mut folder = Folder::new("root", "Root");
        folder.add_folder(inner);

        assert!(folder.remove_by_id(&ComponentId::Number(5)).is_none());
        assert_eq!(folder.record_count(), 1);
    }

    #[test]
    fn folders_and_records_filter_by_variant() {
        let mut folder = Folder::new("root", "Root");
        folder.add_record(record(1, "one"));
        folder.add_folder(Folder::new("a", "A"));
        folder.add_record(record(2, "two"));
        folder.add_folder(Folder::new("b", "B"));

        let folder_names: Vec<&str> = folder.folders().map(Folder::name).collect();
        let record_ids: Vec<i64> = folder.records().map(|r| r.id).collect();

        assert_eq!(folder_names, vec!["A", "B"]);
        assert_eq!(record_ids, vec![1, 2]);
    }

    #[test]
    fn leaf_capability_follows_variant() {
        let empty = CompositeNode::from(Folder::new("empty", "Empty"));
        let leaf = CompositeNode::from(record(1, "one"));

        assert!(!empty.is_leaf());
        assert!(empty.is_folder());
        assert!(leaf.is_leaf());
        assert!(leaf.is_record());
        assert!(leaf.as_folder().is_none());
    }

    #[test]
    fn find_searches_depth_first() {
        let mut diagnoses = Folder::new("diagnosis", "Diagnoses");
        diagnoses.add_record(record(8, "Hypertension"));
        let mut appointments = Folder::new("appointments", "Appointments");
        appointments.add_record(record(3, "Annual Checkup"));

        let mut root = Folder::new("root", "Patient Records");
        root.add_folder(appointments);
        root.add_folder(diagnoses);
        root.add_record(record(8, "Shadowed"));

        let found = root.find(&ComponentId::Number(8)).expect("found");
        assert_eq!(found.name(), "Hypertension");

        let folder = root.find(&ComponentId::from("diagnosis")).expect("found");
        assert!(folder.is_folder());

        assert!(root.find(&ComponentId::from("root")).is_none());
    }

    #[test]
    fn record_count_includes_nested_records() {
        let mut inner = Folder::new("inner", "Inner");
        inner.add_record(record(2, "two"));
        inner.add_record(record(3, "three"));
        let mut root = Folder::new("root", "Root");
        root.add_record(record(1, "one"));
        root.add_folder(inner);
        root.add_folder(Folder::new("empty", "Empty"));

        assert_eq!(root.record_count(), 3);
    }

    #[test]
    fn display_projects_nested_structure() {
        let mut inner = Folder::new("lab-results", "Lab Results");
        inner.add_record(record(11, "Complete Blood Count"));
        let mut root = Folder::new("root", "Patient Records");
        root.add_folder(inner);

        let value = serde_json::to_value(root.display()).expect("serialise");
        assert_eq!(
            value,
            serde_json::json!({
                "type": "folder",
                "id": "root",
                "name": "Patient Records",
                "children": [{
                    "type": "folder",
                    "id": "lab-results",
                    "name": "Lab Results",
                    "children": [{
                        "type": "record",
                        "id": 11,
                        "name": "Complete Blood Count",
                        "date": "2023-07-20T00:00:00Z",
                        "diagnosis": "Routine bloodwork",
                        "treatment": "No abnormalities detected"
                    }]
                }]
            })
        );
    }

    #[test]
    fn display_omits_notes_and_follow_up() {
        let mut item = record(1, "one");
        item.follow_up_date = Some(Utc.with_ymd_and_hms(2023, 8, 1, 0, 0, 0).unwrap());

        let value = serde_json::to_value(item.display()).expect("serialise");
        assert!(value.get("notes").is_none());
        assert!(value.get("followUpDate").is_none());
        assert!(value.get("follow_up_date").is_none());

        // Still retained on the record itself
        assert_eq!(item.notes, "All values within normal range");
        assert!(item.follow_up_date.is_some());
    }

    #[test]
    fn display_is_idempotent() {
        let mut root = Folder::new("root", "Root");
        root.add_record(record(1, "one"));
        root.add_folder(Folder::new("empty", "Empty"));

        assert_eq!(root.display(), root.display());
    }

    #[test]
    fn display_round_trips_through_json() {
        let mut root = Folder::new("root", "Root");
        root.add_record(record(1, "one"));

        let display = root.display();
        let json = serde_json::to_string(&display).expect("serialise");
        let parsed: DisplayNode = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(parsed, display);
        assert_eq!(parsed.children().len(), 1);
        assert_eq!(parsed.children()[0].id(), &ComponentId::Number(1));
    }

    /// A folder chain `depth` levels deep, each level holding one record and the next folder.
    fn nested_chain(depth: i64) -> Folder {
        let mut folder = Folder::new("level-0", "Level 0");
        for level in 1..depth {
            let mut parent = Folder::new(format!("level-{level}"), format!("Level {level}"));
            parent.add_record(record(level, "entry"));
            parent.add_folder(folder);
            folder = parent;
        }
        folder
    }

    #[test]
    fn display_keeps_child_order_across_nesting() {
        let mut inner = Folder::new("inner", "Inner");
        inner.add_record(record(2, "two"));
        let mut root = Folder::new("root", "Root");
        root.add_record(record(1, "one"));
        root.add_folder(inner);
        root.add_record(record(3, "three"));

        let display = root.display();
        let ids: Vec<&ComponentId> = display.children().iter().map(DisplayNode::id).collect();
        assert_eq!(
            ids,
            vec![
                &ComponentId::Number(1),
                &ComponentId::from("inner"),
                &ComponentId::Number(3)
            ]
        );
        assert_eq!(display.children()[1].children()[0].name(), "two");
    }

    #[test]
    fn deep_folder_chain_displays_and_drops() {
        let depth = 200_000;
        let root = nested_chain(depth);
        assert_eq!(root.record_count(), (depth - 1) as usize);

        let display = root.display();
        let mut levels = 1;
        let mut current = &display;
        while let Some(next) = current.children().iter().find(|c| !c.children().is_empty()) {
            levels += 1;
            current = next;
        }
        // The innermost folder is empty, so the walk stops one level above it
        assert_eq!(levels, depth - 1);

        drop(display);
        drop(root);
    }

    #[test]
    fn removed_deep_subtree_drops() {
        let mut root = Folder::new("root", "Root");
        root.add_folder(nested_chain(200_000));

        let removed = root.remove_by_id(&ComponentId::from("level-199999"));
        assert!(removed.is_some());
        assert!(root.children().is_empty());
    }
}
