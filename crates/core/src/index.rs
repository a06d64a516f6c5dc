//! Ordered record index.
//!
//! An unbalanced binary search tree of [`MedicalRecord`]s keyed on `date`. For every node, all
//! records in the left subtree are strictly older than the node and all records in the right
//! subtree are the same age or newer (ties go right). There is no rebalancing, so the shape is
//! purely a function of insertion order; a monotonic date sequence degenerates into a list.
//!
//! Insertion, traversal and drop all walk the tree with explicit work-lists, so list-shaped
//! trees of any length are handled without deep call stacks.

use crate::MedicalRecord;

/// A node of the index, owning one record and its two subtrees.
#[derive(Debug)]
pub struct TreeNode {
    record: MedicalRecord,
    left: Option<Box<TreeNode>>,
    right: Option<Box<TreeNode>>,
}

impl TreeNode {
    fn new(record: MedicalRecord) -> Self {
        Self {
            record,
            left: None,
            right: None,
        }
    }

    pub fn record(&self) -> &MedicalRecord {
        &self.record
    }

    /// Subtree of strictly older records.
    pub fn left(&self) -> Option<&TreeNode> {
        self.left.as_deref()
    }

    /// Subtree of records with the same or a newer date.
    pub fn right(&self) -> Option<&TreeNode> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Binary search tree of medical records ordered by date.
#[derive(Debug, Default)]
pub struct OrderedRecordIndex {
    root: Option<Box<TreeNode>>,
    len: usize,
}

impl OrderedRecordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record.
    ///
    /// Descends from the root, going left when the record's date is strictly earlier than the
    /// current node's and right otherwise, and attaches a new node at the first empty link.
    /// Always succeeds, duplicates included.
    pub fn insert(&mut self, record: MedicalRecord) {
        let mut depth = 0usize;
        let mut link = &mut self.root;

        while let Some(node) = link {
            link = if record.date < node.record.date {
                &mut node.left
            } else {
                &mut node.right
            };
            depth += 1;
        }

        tracing::debug!(record_id = record.id, depth, "inserted record into index");
        *link = Some(Box::new(TreeNode::new(record)));
        self.len += 1;
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path (0 for an empty index).
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending: Vec<(&TreeNode, usize)> =
            self.root().map(|n| (n, 1)).into_iter().collect();

        while let Some((node, depth)) = pending.pop() {
            height = height.max(depth);
            pending.extend(node.left().map(|n| (n, depth + 1)));
            pending.extend(node.right().map(|n| (n, depth + 1)));
        }

        height
    }

    /// In-order iterator over the records, yielding them by non-decreasing date.
    ///
    /// Records with equal dates come out in insertion order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root());
        iter
    }
}

impl Drop for OrderedRecordIndex {
    fn drop(&mut self) {
        let mut pending: Vec<Box<TreeNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl Extend<MedicalRecord> for OrderedRecordIndex {
    fn extend<I: IntoIterator<Item = MedicalRecord>>(&mut self, records: I) {
        for record in records {
            self.insert(record);
        }
    }
}

impl FromIterator<MedicalRecord> for OrderedRecordIndex {
    fn from_iter<I: IntoIterator<Item = MedicalRecord>>(records: I) -> Self {
        let mut index = Self::new();
        index.extend(records);
        index
    }
}

impl<'a> IntoIterator for &'a OrderedRecordIndex {
    type Item = &'a MedicalRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator returned by [`OrderedRecordIndex::iter`].
pub struct Iter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut node: Option<&'a TreeNode>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a MedicalRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.record())
    }
}
