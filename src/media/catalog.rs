use crate::foundation::error::{ReelError, ReelResult};

/// Placeholder substituted with the 1-based clip index in a source template.
pub const INDEX_PLACEHOLDER: &str = "{index}";

/// 1-based position in a [`MediaCatalog`]; always within `[1, N]`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct MediaIndex(u32);

impl MediaIndex {
    /// The first clip.
    pub const FIRST: Self = Self(1);

    /// The 1-based value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for MediaIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed, ordered set of interchangeable clips addressed by a cyclic 1-based index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaCatalog {
    len: u32,
    template: String,
}

impl MediaCatalog {
    /// Build a catalog of `len` clips whose sources follow `template`.
    ///
    /// A cycle needs at least two clips, and the template must contain `{index}`.
    pub fn new(len: u32, template: impl Into<String>) -> ReelResult<Self> {
        let template = template.into();
        if len < 2 {
            return Err(ReelError::validation(format!(
                "media catalog needs at least 2 clips (got {len})"
            )));
        }
        if !template.contains(INDEX_PLACEHOLDER) {
            return Err(ReelError::validation(format!(
                "media source template '{template}' has no {INDEX_PLACEHOLDER} placeholder"
            )));
        }
        Ok(Self { len, template })
    }

    /// Number of clips.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Always `false`; a catalog holds at least two clips.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Fold any integer onto `[1, N]` with the cyclic rule, so `0 → N` and `N + 1 → 1`.
    pub fn normalize(&self, raw: i64) -> MediaIndex {
        let n = i128::from(self.len);
        // rem_euclid keeps negatives on the cycle instead of mirroring them.
        let zero_based = (i128::from(raw) - 1).rem_euclid(n);
        MediaIndex(zero_based as u32 + 1)
    }

    /// The clip after `index`, wrapping from N to 1.
    pub fn successor(&self, index: MediaIndex) -> MediaIndex {
        MediaIndex(index.0 % self.len + 1)
    }

    /// Resource identifier for any integer index, normalized first.
    pub fn resolve_source(&self, raw: i64) -> String {
        self.source_of(self.normalize(raw))
    }

    /// Resource identifier of an in-range index.
    pub fn source_of(&self, index: MediaIndex) -> String {
        self.template
            .replace(INDEX_PLACEHOLDER, &index.0.to_string())
    }

    /// Every index in order.
    pub fn indices(&self) -> impl Iterator<Item = MediaIndex> {
        (1..=self.len).map(MediaIndex)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/catalog.rs"]
mod tests;
