//! File-valued fields of the domain entities.
//!
//! Every stored file belongs to exactly one field of exactly one entity. The
//! catalogue below is the single declaration consumed by upload path
//! derivation, upload validation, the save-time diff and delete-time cleanup.

use std::fmt;

/// A file-valued field of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileField {
    CategoryIcon,
    ChannelBanner,
    ChannelIcon,
}

impl FileField {
    /// Attribute name as exposed on the entity.
    pub fn name(&self) -> &'static str {
        match self {
            FileField::CategoryIcon | FileField::ChannelIcon => "icon",
            FileField::ChannelBanner => "banner",
        }
    }

    /// Top-level storage directory of the owning entity type.
    fn entity_dir(&self) -> &'static str {
        match self {
            FileField::CategoryIcon => "category",
            FileField::ChannelBanner | FileField::ChannelIcon => "channel",
        }
    }

    /// Per-field sub-directory.
    fn field_dir(&self) -> &'static str {
        match self {
            FileField::CategoryIcon => "category_icon",
            FileField::ChannelBanner => "channel_banner",
            FileField::ChannelIcon => "channel_icon",
        }
    }

    /// Whether uploads to this field are subject to the icon size limit.
    pub fn is_icon(&self) -> bool {
        matches!(self, FileField::CategoryIcon | FileField::ChannelIcon)
    }

    /// Storage path for `filename` uploaded to this field of entity `id`.
    ///
    /// `filename` must already be sanitized (see [`super::sanitize_filename`]).
    pub fn upload_path(&self, id: i64, filename: &str) -> String {
        format!("{}/{}/{}/{}", self.entity_dir(), id, self.field_dir(), filename)
    }
}

impl fmt::Display for FileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.entity_dir(), self.name())
    }
}

/// Entities owning stored files.
pub trait FileAssets {
    /// The file-valued fields of this entity type, declared once.
    const FILE_FIELDS: &'static [FileField];

    /// Current stored path of `field`, if any.
    fn file(&self, field: FileField) -> Option<&str>;

    /// Replace the stored path of `field`.
    fn set_file(&mut self, field: FileField, path: Option<String>);

    /// All stored paths currently referenced by this entity.
    fn stored_files(&self) -> Vec<String> {
        Self::FILE_FIELDS
            .iter()
            .filter_map(|field| self.file(*field))
            .map(str::to_owned)
            .collect()
    }
}
