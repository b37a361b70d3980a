//! Agent kinds and the roster that lists them.

use shoal_core::{KindId, Vec2};

/// One roster entry: how many agents of a kind to spawn and how.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KindSpec {
    /// Label for the kind.  Renderers map it to a sprite.
    pub name: String,
    pub count: usize,
    pub schooling: bool,
    /// Initial speed, and the agent's speed cap for the whole run.
    pub move_speed: f32,
    /// Spawn anywhere in the arena instead of around `spawn_point`.
    pub random_spawn: bool,
    pub spawn_point: Vec2,
}

impl KindSpec {
    pub fn new(name: impl Into<String>, count: usize, schooling: bool, move_speed: f32) -> Self {
        Self {
            name: name.into(),
            count,
            schooling,
            move_speed,
            random_spawn: true,
            spawn_point: Vec2::ZERO,
        }
    }

    /// Spawn around `point` instead of at random.
    pub fn at(mut self, point: Vec2) -> Self {
        self.random_spawn = false;
        self.spawn_point = point;
        self
    }
}

/// Ordered list of kinds.  A kind's position in the list is its `KindId`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Roster {
    kinds: Vec<KindSpec>,
}

impl Roster {
    pub fn new(kinds: Vec<KindSpec>) -> Self {
        Self { kinds }
    }

    /// Total agents across all kinds.
    pub fn population(&self) -> usize {
        self.kinds.iter().map(|k| k.count).sum()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn get(&self, kind: KindId) -> Option<&KindSpec> {
        self.kinds.get(kind.index())
    }

    /// `(KindId, &KindSpec)` pairs in roster order.
    pub fn iter(&self) -> impl Iterator<Item = (KindId, &KindSpec)> + '_ {
        self.kinds
            .iter()
            .enumerate()
            .map(|(i, k)| (KindId(i as u16), k))
    }
}

impl FromIterator<KindSpec> for Roster {
    fn from_iter<I: IntoIterator<Item = KindSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
