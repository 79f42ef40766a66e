//! Short code generation.

use rand::Rng;
use rand::distr::Alphanumeric;

/// Length of a generated short code.
///
/// Six characters over the 62-symbol alphabet give a keyspace of 62^6
/// (about 56.8 billion), so random collisions stay rare and are handled by
/// the caller's retry-until-unique loop against the store.
pub const CODE_LENGTH: usize = 6;

/// Generates a random short code of [`CODE_LENGTH`] characters drawn
/// uniformly from `[A-Za-z0-9]`.
///
/// Makes no uniqueness guarantee by itself; uniqueness is enforced by the
/// storage layer's unique constraint plus caller-side retry.
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}
