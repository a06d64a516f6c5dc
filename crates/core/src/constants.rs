//! Constants used throughout the medfolder core crate.
//!
//! Folder ids, names and label templates produced by the hierarchy synthesizer live here so
//! that presentation code and tests agree on them.

/// Id of the root folder returned by the synthesizer.
pub const ROOT_FOLDER_ID: &str = "root";

/// Display name of the root folder returned by the synthesizer.
pub const ROOT_FOLDER_NAME: &str = "Medical Records";

/// Default strftime pattern for dates rendered into folder labels.
pub const DEFAULT_LABEL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Environment variable read by the binary to override the label date format.
pub const LABEL_DATE_FORMAT_ENV: &str = "MEDFOLDER_DATE_FORMAT";

/// Id suffix of the folder holding a node's right (newer) subtree.
pub const NEWER_FOLDER_SUFFIX: &str = "right";

/// Id suffix of the folder holding a node's left (older) subtree.
pub const OLDER_FOLDER_SUFFIX: &str = "left";
