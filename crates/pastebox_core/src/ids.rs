//! Short public identifiers for pastes.

use uuid::Uuid;

/// Length of a public paste id.
pub const ID_LEN: usize = 8;

/// Generate a new paste id from a random UUID.
///
/// Uniqueness is not checked here; the store rejects duplicate inserts.
///
/// # Returns
/// An 8-character lowercase hexadecimal string.
pub fn new_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LEN);
    id
}

/// Check whether `value` has the shape of an id produced by [`new_id`].
pub fn is_valid_id(value: &str) -> bool {
    value.len() == ID_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_id_is_eight_lowercase_hex_chars() {
        for _ in 0..100 {
            let id = new_id();
            assert!(is_valid_id(&id), "unexpected id shape: {}", id);
        }
    }

    #[test]
    fn new_id_rarely_collides_across_ten_thousand_draws() {
        // 32 random bits: about a 1% chance of one birthday collision here.
        let ids: HashSet<String> = (0..10_000).map(|_| new_id()).collect();
        assert!(10_000 - ids.len() <= 2, "{} collisions", 10_000 - ids.len());
    }

    #[test]
    fn is_valid_id_rejects_malformed_values() {
        for value in ["", "abc", "0A1B2C3D", "0a1b2c3g", "0a1b2c3d4", "../etc/"] {
            assert!(!is_valid_id(value), "value: {:?}", value);
        }
    }
}
