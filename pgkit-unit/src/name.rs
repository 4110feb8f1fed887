//! Random names for temporary database objects.

use rand::Rng;

/// Number of characters in a generated name.
pub const NAME_LENGTH: usize = 12;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Generate a random lowercase name for a temporary database object.
///
/// Names are drawn from the thread-local CSPRNG, which is seeded once from
/// the operating system, so concurrent test runs do not collide.
pub fn random_name() -> String {
    let mut rng = rand::rng();
    (0..NAME_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}
