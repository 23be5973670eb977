//! Content registry: the fixed set of islands and the designated home island.
//!
//! Islands arrive once at startup, either as a JSON document or built in
//! code, and are validated here so that later geometry never sees an empty
//! set or a degenerate rectangle. The `metadata` bag is opaque to the
//! engine; [`Meta`] gives the detail view typed access to its usual keys.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NavError;
use crate::geometry::{ContentBounds, Rect, content_bounds};

/// Stable identifier of an island.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IslandId(pub String);

impl IslandId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IslandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IslandId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A content card at a fixed position on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Island {
    pub id: IslandId,
    /// Position and size in canvas coordinates.
    pub rect: Rect,
    /// Opaque payload for the detail view (title, image, description, ...).
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl Island {
    #[must_use]
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self { id: IslandId::new(id), rect, metadata: serde_json::Value::Null }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn meta(&self) -> Meta<'_> {
        Meta::new(&self.metadata)
    }
}

/// Typed access to the conventional detail-view keys of an island's metadata.
pub struct Meta<'a> {
    value: &'a serde_json::Value,
}

impl<'a> Meta<'a> {
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    #[must_use]
    pub fn title(&self) -> Option<&'a str> {
        self.str_field("title")
    }

    /// Image URL, from `imageSrc`.
    #[must_use]
    pub fn image_src(&self) -> Option<&'a str> {
        self.str_field("imageSrc")
    }

    #[must_use]
    pub fn description(&self) -> Option<&'a str> {
        self.str_field("description")
    }

    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.value.get(key).and_then(|v| v.as_str())
    }
}

#[derive(Deserialize)]
struct RegistryDoc {
    home: IslandId,
    islands: Vec<Island>,
}

/// Validated, ordered island set plus the home island's id.
///
/// Order is preserved: later islands sit above earlier ones for hit-testing.
#[derive(Debug, Clone)]
pub struct ContentRegistry {
    islands: Vec<Island>,
    index: HashMap<IslandId, usize>,
    home: IslandId,
    home_index: usize,
    bounds: ContentBounds,
}

// Never empty once built, so `is_empty` would always be false.
#[allow(clippy::len_without_is_empty)]
impl ContentRegistry {
    /// Validate `islands` and designate `home` as the welcome island.
    ///
    /// # Errors
    ///
    /// `NoContent` for an empty list, `InvalidIslandGeometry` for a
    /// non-positive or non-finite rectangle, `DuplicateIsland` for a repeated
    /// id, and `UnknownHomeIsland` when `home` is missing.
    pub fn new(islands: Vec<Island>, home: IslandId) -> Result<Self, NavError> {
        let mut index = HashMap::with_capacity(islands.len());
        for (i, island) in islands.iter().enumerate() {
            if !island.rect.is_well_formed() {
                return Err(NavError::InvalidIslandGeometry {
                    id: island.id.clone(),
                    width: island.rect.width,
                    height: island.rect.height,
                });
            }
            if index.insert(island.id.clone(), i).is_some() {
                return Err(NavError::DuplicateIsland(island.id.clone()));
            }
        }
        let Some(bounds) = content_bounds(islands.iter().map(|i| i.rect)) else {
            return Err(NavError::NoContent);
        };
        let Some(&home_index) = index.get(&home) else {
            return Err(NavError::UnknownHomeIsland(home));
        };
        Ok(Self { islands, index, home, home_index, bounds })
    }

    /// Parse `{"home": "<id>", "islands": [...]}` and validate it.
    ///
    /// # Errors
    ///
    /// `Parse` for malformed JSON, otherwise as [`ContentRegistry::new`].
    pub fn from_json(raw: &str) -> Result<Self, NavError> {
        let doc: RegistryDoc = serde_json::from_str(raw)?;
        Self::new(doc.islands, doc.home)
    }

    #[must_use]
    pub fn get(&self, id: &IslandId) -> Option<&Island> {
        self.index.get(id).and_then(|&i| self.islands.get(i))
    }

    /// Like [`ContentRegistry::get`], failing with `InvalidIslandReference`.
    pub fn require(&self, id: &IslandId) -> Result<&Island, NavError> {
        self.get(id).ok_or_else(|| NavError::InvalidIslandReference(id.clone()))
    }

    #[must_use]
    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    #[must_use]
    pub fn home_id(&self) -> &IslandId {
        &self.home
    }

    /// The home island, resolved when the registry was built.
    #[must_use]
    pub fn home(&self) -> &Island {
        &self.islands[self.home_index]
    }

    /// Bounding box of every island.
    #[must_use]
    pub fn bounds(&self) -> ContentBounds {
        self.bounds
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.islands.len()
    }
}
