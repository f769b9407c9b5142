/// Share-link token generation
///
/// Share links are addressed by a short random token ("hash") made of digits
/// and lowercase letters. Tokens are opaque identifiers, not secrets: they are
/// generated with `rand::thread_rng()` and uniqueness is enforced by the store,
/// not by the generator.
///
/// # Example
///
/// ```
/// use secondbrain_shared::share_token::{generate, SHARE_HASH_LENGTH};
///
/// let hash = generate(SHARE_HASH_LENGTH);
/// assert_eq!(hash.len(), 10);
/// assert!(hash.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
/// ```

use rand::Rng;

/// Symbols a share token is drawn from
pub const ALPHABET: &[u8] = b"0123456789qwertyuiopasdfghjklzxcvbnm";

/// Length of the hash handed out by `POST /brain/share`
pub const SHARE_HASH_LENGTH: usize = 10;

/// Generates a random token of `length` characters
///
/// Each character is drawn independently and uniformly from [`ALPHABET`].
pub fn generate(length: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}
