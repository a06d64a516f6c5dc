//! Hierarchy synthesis.
//!
//! Converts the shape of an [`OrderedRecordIndex`] into a [`Folder`] tree the presentation layer
//! can render without knowing anything about the index. Each index node contributes, in order:
//!
//! 1. a record leaf named `"Record <id>"`,
//! 2. if it has a right subtree, a folder `"Newer (After <date>)"` (id `folder-<id>-right`)
//!    holding that subtree,
//! 3. if it has a left subtree, a folder `"Older (Before <date>)"` (id `folder-<id>-left`)
//!    holding that subtree.
//!
//! Folders are only created for links that exist, and folder nesting mirrors index depth: a
//! record whose node sits at depth `d` in the index sits at depth `d + 1` below the root folder.

use crate::constants::{
    NEWER_FOLDER_SUFFIX, OLDER_FOLDER_SUFFIX, ROOT_FOLDER_ID, ROOT_FOLDER_NAME,
};
use crate::index::TreeNode;
use crate::{CompositeNode, CoreConfig, Folder, MedicalComponentFactory, OrderedRecordIndex};

/// Synthesizes a folder hierarchy using the default configuration.
pub fn synthesize(index: &OrderedRecordIndex) -> Folder {
    HierarchySynthesizer::default().synthesize(index)
}

/// Builds folder hierarchies from ordered record indexes.
#[derive(Clone, Debug, Default)]
pub struct HierarchySynthesizer {
    config: CoreConfig,
}

enum Step<'a> {
    Enter(&'a TreeNode),
    Assemble(&'a TreeNode),
}

impl HierarchySynthesizer {
    pub fn new(config: CoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Synthesizes the folder hierarchy for `index`.
    ///
    /// Returns a root folder (id `"root"`, name `"Medical Records"`), empty when the index is.
    pub fn synthesize(&self, index: &OrderedRecordIndex) -> Folder {
        let mut steps: Vec<Step<'_>> = index.root().map(Step::Enter).into_iter().collect();
        // Contents of each finished subtree; a node's right subtree always finishes first
        let mut finished: Vec<Vec<CompositeNode>> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(node) => {
                    steps.push(Step::Assemble(node));
                    steps.extend(node.left().map(Step::Enter));
                    steps.extend(node.right().map(Step::Enter));
                }
                Step::Assemble(node) => {
                    let older = node.left().and_then(|_| finished.pop());
                    let newer = node.right().and_then(|_| finished.pop());
                    finished.push(self.assemble(node, newer, older));
                }
            }
        }

        let children = finished.pop().unwrap_or_default();
        let root = Folder::with_children(ROOT_FOLDER_ID, ROOT_FOLDER_NAME, children);

        tracing::debug!(
            records = index.len(),
            depth = index.height(),
            "synthesized folder hierarchy"
        );
        root
    }

    fn assemble(
        &self,
        node: &TreeNode,
        newer: Option<Vec<CompositeNode>>,
        older: Option<Vec<CompositeNode>>,
    ) -> Vec<CompositeNode> {
        let record = node.record();
        let date = record.date.format(self.config.label_date_format());
        let mut contents = Vec::with_capacity(3);

        tracing::trace!(record_id = record.id, "synthesizing node");
        contents.push(CompositeNode::from(MedicalComponentFactory::record_from(record)));

        if let Some(children) = newer {
            contents.push(
                Folder::with_children(
                    format!("folder-{}-{}", record.id, NEWER_FOLDER_SUFFIX),
                    format!("Newer (After {date})"),
                    children,
                )
                .into(),
            );
        }

        if let Some(children) = older {
            contents.push(
                Folder::with_children(
                    format!("folder-{}-{}", record.id, OLDER_FOLDER_SUFFIX),
                    format!("Older (Before {date})"),
                    children,
                )
                .into(),
            );
        }

        contents
    }
}
