//! Playlist ordering: the natural folder order or a shuffled permutation.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::SessionError;
use crate::library::Track;

/// The ordered sequence of tracks loaded into a session.
///
/// Duplicates are allowed. A playlist produced by `load` is never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    /// Build a playlist from `tracks`, keeping their order.
    pub fn load(tracks: impl IntoIterator<Item = Track>) -> Result<Self, SessionError> {
        let tracks: Vec<Track> = tracks.into_iter().collect();
        if tracks.is_empty() {
            return Err(SessionError::EmptySource);
        }
        Ok(Self { tracks })
    }

    /// A uniformly random permutation of this playlist, drawn from the
    /// entropy-seeded thread RNG. Not reproducible across runs.
    pub fn shuffled(&self) -> Self {
        self.shuffled_with(&mut rand::rng())
    }

    /// Like [`Playlist::shuffled`], with a caller-provided RNG.
    pub fn shuffled_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut tracks = self.tracks.clone();
        if tracks.len() > 1 {
            tracks.shuffle(rng);
        }
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn tracks(names: &[&str]) -> Vec<Track> {
        names.iter().map(|n| Track::from(*n)).collect()
    }

    #[test]
    fn load_keeps_insertion_order_and_duplicates() {
        let p = Playlist::load(tracks(&["b", "a", "b"])).unwrap();
        assert_eq!(p.tracks(), tracks(&["b", "a", "b"]).as_slice());
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn load_of_nothing_is_empty_source() {
        assert_eq!(Playlist::load(Vec::<Track>::new()), Err(SessionError::EmptySource));
    }

    #[test]
    fn shuffle_of_single_track_is_unchanged() {
        let p = Playlist::load(tracks(&["only"])).unwrap();
        assert_eq!(p.shuffled(), p);
        assert!(Playlist::default().shuffled().is_empty());
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let names: Vec<String> = (0..50).map(|i| format!("t{i}")).collect();
        let p = Playlist::load(names.iter().map(|n| Track::from(n.as_str()))).unwrap();
        let s = p.shuffled();

        assert_eq!(s.len(), p.len());
        let a: HashSet<&Track> = p.tracks().iter().collect();
        let b: HashSet<&Track> = s.tracks().iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_with_seeded_rng_is_deterministic() {
        let p = Playlist::load(tracks(&["a", "b", "c", "d", "e", "f"])).unwrap();
        let x = p.shuffled_with(&mut StdRng::seed_from_u64(7));
        let y = p.shuffled_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(x, y);
    }

    #[test]
    fn shuffle_places_each_track_first_roughly_uniformly() {
        let p = Playlist::load(tracks(&["a", "b", "c", "d"])).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let rounds = 8_000;
        let mut first = [0usize; 4];
        for _ in 0..rounds {
            let s = p.shuffled_with(&mut rng);
            let head = s.get(0).unwrap();
            let idx = p.tracks().iter().position(|t| t == head).unwrap();
            first[idx] += 1;
        }
        // Expected 2000 each; allow a generous band.
        for count in first {
            assert!((1_700..=2_300).contains(&count), "skewed: {first:?}");
        }
    }
}
