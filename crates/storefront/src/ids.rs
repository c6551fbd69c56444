//! Id generators used by the storefront page.

use aso_cart_core::{IdGenerator, LineItemId, UuidIdGenerator};
use rand::seq::IndexedRandom;

use crate::config::IdStrategy;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Random lowercase base-36 ids, nine characters long (`k3j2h1x9z`).
///
/// This is the id shape already present in shoppers' stored carts.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl RandomIdGenerator {
    /// Length of generated ids.
    pub const LEN: usize = 9;
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&mut self) -> LineItemId {
        let mut rng = rand::rng();
        let id: String = (0..Self::LEN)
            .filter_map(|_| BASE36.choose(&mut rng).copied().map(char::from))
            .collect();
        LineItemId::new(id)
    }
}

/// Generator selected at runtime from [`IdStrategy`].
#[derive(Debug, Clone, Copy)]
pub enum ConfiguredIdGenerator {
    Random(RandomIdGenerator),
    Uuid(UuidIdGenerator),
}

impl From<IdStrategy> for ConfiguredIdGenerator {
    fn from(strategy: IdStrategy) -> Self {
        match strategy {
            IdStrategy::Random => Self::Random(RandomIdGenerator),
            IdStrategy::Uuid => Self::Uuid(UuidIdGenerator),
        }
    }
}

impl IdGenerator for ConfiguredIdGenerator {
    fn next_id(&mut self) -> LineItemId {
        match self {
            Self::Random(ids) => ids.next_id(),
            Self::Uuid(ids) => ids.next_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_id_shape() {
        let id = RandomIdGenerator.next_id();
        assert_eq!(id.as_str().len(), RandomIdGenerator::LEN);
        assert!(
            id.as_str()
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_lowercase())
        );
    }

    #[test]
    fn test_random_ids_vary() {
        let mut ids = RandomIdGenerator;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_configured_uuid() {
        let mut ids = ConfiguredIdGenerator::from(IdStrategy::Uuid);
        assert_eq!(ids.next_id().as_str().len(), 36);
    }
}
