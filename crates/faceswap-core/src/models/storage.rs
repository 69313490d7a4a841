//! Storage areas: the three directories every stored file lives in.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// A directory under the static root holding one kind of file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageArea {
    /// Images produced by the generation service
    Generated,
    /// Gallery template images managed by the admin
    Templates,
    /// Photos uploaded by users for a single swap
    UserUploads,
}

impl StorageArea {
    pub const ALL: [StorageArea; 3] = [
        StorageArea::Generated,
        StorageArea::Templates,
        StorageArea::UserUploads,
    ];

    /// Directory name relative to the static root
    pub fn dir_name(&self) -> &'static str {
        match self {
            StorageArea::Generated => "generated",
            StorageArea::Templates => "templates_gallery",
            StorageArea::UserUploads => "user_uploads",
        }
    }

    /// URL path a stored file is served from, when the area is publicly served.
    pub fn public_path(&self, filename: &str) -> Option<String> {
        match self {
            StorageArea::Generated | StorageArea::Templates => {
                Some(format!("/static/{}/{}", self.dir_name(), filename))
            }
            StorageArea::UserUploads => None,
        }
    }
}

impl Display for StorageArea {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.dir_name())
    }
}
