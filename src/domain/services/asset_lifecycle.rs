//! Stored-file bookkeeping across entity writes.
//!
//! Pure functions over [`FileAssets`]; the application layer performs the
//! actual storage deletions.

use crate::domain::value_objects::FileAssets;

/// Files referenced by `current` that `next` no longer references.
///
/// A field whose value is unchanged, or that keeps the identical path
/// (an in-place overwrite), yields nothing.
pub fn superseded_files<T: FileAssets>(current: &T, next: &T) -> Vec<String> {
    T::FILE_FIELDS
        .iter()
        .filter_map(|field| match (current.file(*field), next.file(*field)) {
            (Some(old), new) if new != Some(old) => Some(old.to_string()),
            _ => None,
        })
        .collect()
}

/// Files that become orphaned when `entity` is deleted.
pub fn owned_files<T: FileAssets>(entity: &T) -> Vec<String> {
    entity.stored_files()
}
