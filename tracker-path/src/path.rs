//! Field paths.

use core::fmt;

use tracker_registry::FieldRegistry;
use tracker_value::{FieldId, UNKNOWN_FIELD};

/// Separator between segments of a textual path. Field names themselves
/// contain dots, so segments are split on `/` only.
pub const SEPARATOR: char = '/';

/// A path of field ids from some starting node down to a descendant.
///
/// Built from text (`"dot11.device/dot11.device.last_bssid"`), from a list
/// of name segments, or from ids directly. Names are resolved through a
/// [`FieldRegistry`] once, at construction; a name the registry does not know
/// becomes [`UNKNOWN_FIELD`], which matches no child, so the path simply
/// resolves to nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    ids: Vec<FieldId>,
}

impl FieldPath {
    /// The empty path, which resolves to the starting node itself.
    pub const fn root() -> Self {
        FieldPath { ids: Vec::new() }
    }

    /// Resolve a `/`-separated path of field names. Empty segments are
    /// ignored, so leading, trailing and doubled separators are harmless.
    pub fn parse(text: &str, registry: &dyn FieldRegistry) -> Self {
        Self::from_segments(text.split(SEPARATOR), registry)
    }

    /// Resolve a list of field names.
    pub fn from_segments<S: AsRef<str>>(
        segments: impl IntoIterator<Item = S>,
        registry: &dyn FieldRegistry,
    ) -> Self {
        FieldPath {
            ids: segments
                .into_iter()
                .filter(|s| !s.as_ref().is_empty())
                .map(|s| registry.id_or_unknown(s.as_ref()))
                .collect(),
        }
    }

    /// A path of already resolved ids.
    pub fn from_ids(ids: impl Into<Vec<FieldId>>) -> Self {
        FieldPath { ids: ids.into() }
    }

    /// The resolved ids.
    pub fn ids(&self) -> &[FieldId] {
        &self.ids
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns `true` if some segment named a field the registry did not know.
    pub fn has_unknown(&self) -> bool {
        self.ids.contains(&UNKNOWN_FIELD)
    }

    /// The path extended by one step.
    pub fn join(&self, id: FieldId) -> FieldPath {
        let mut ids = self.ids.clone();
        ids.push(id);
        FieldPath { ids }
    }

    /// Render with registered names, falling back to the numeric id.
    pub fn format(&self, registry: &dyn FieldRegistry) -> String {
        let mut out = String::new();
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                out.push(SEPARATOR);
            }
            match registry.name_of(*id) {
                Some(name) => out.push_str(&name),
                None => out.push_str(&id.to_string()),
            }
        }
        out
    }
}

impl fmt::Display for FieldPath {
    /// Renders the id form, e.g. `3/7/12`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                write!(f, "{SEPARATOR}")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

impl From<Vec<FieldId>> for FieldPath {
    fn from(ids: Vec<FieldId>) -> Self {
        FieldPath { ids }
    }
}

impl From<&[FieldId]> for FieldPath {
    fn from(ids: &[FieldId]) -> Self {
        FieldPath { ids: ids.to_vec() }
    }
}
