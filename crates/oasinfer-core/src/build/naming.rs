//! Names for path parameters synthesized while unifying path templates.

use rand::Rng as _;

/// Length of a generated placeholder name.
pub const PLACEHOLDER_NAME_LEN: usize = 8;

/// Source of fresh placeholder names for unified path templates.
///
/// Inject a deterministic implementation to get reproducible documents.
pub trait PlaceholderNames {
    /// Returns a name usable inside `{...}` in a path template.
    fn generate_placeholder_name(&self) -> String;
}

/// Generates names of [`PLACEHOLDER_NAME_LEN`] random lowercase ASCII letters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNames;

impl PlaceholderNames for RandomNames {
    fn generate_placeholder_name(&self) -> String {
        let mut rng = rand::rng();
        (0..PLACEHOLDER_NAME_LEN)
            .map(|_| char::from(rng.random_range(b'a'..=b'z')))
            .collect()
    }
}
