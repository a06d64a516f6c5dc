//! # Medfolder Core
//!
//! Core logic for building browsable medical folder hierarchies:
//! - [`OrderedRecordIndex`]: an unbalanced binary search tree of records keyed by date
//! - [`synthesize`]: turns the shape of an index into nested "Newer"/"Older" folders
//! - [`Folder`] / [`CompositeNode`]: the composite tree handed to the presentation layer, which
//!   can also be authored by hand
//!
//! **No presentation concerns**: rendering, expand/collapse state and icons belong to the
//! caller, which reads the tree through `is_leaf()`, `children()` and `display()`.

pub mod composite;
pub mod config;
pub mod constants;
pub mod error;
pub mod factory;
pub mod hierarchy;
pub mod index;
pub mod record;

pub use composite::{CompositeNode, DisplayNode, Folder, RecordItem};
pub use config::CoreConfig;
pub use error::{FolderError, FolderResult};
pub use factory::MedicalComponentFactory;
pub use hierarchy::{synthesize, HierarchySynthesizer};
pub use index::{OrderedRecordIndex, TreeNode};
pub use record::MedicalRecord;

pub use medfolder_types::{ComponentId, ComponentIdError};
