use rand::Rng;

pub const SHORT_ID_LEN: usize = 8;

// 16 ** 8 = 4,294,967,296 possible ids
const SHORT_ID_CHARS: &[u8] = b"0123456789abcdef";

/// Generate a random 8 character lowercase hex id
pub fn generate_short_id() -> String {
    short_id_from_rng(&mut rand::rng())
}

pub fn short_id_from_rng<R: Rng>(rng: &mut R) -> String {
    (0..SHORT_ID_LEN)
        .map(|_| SHORT_ID_CHARS[rng.random_range(0..SHORT_ID_CHARS.len())] as char)
        .collect()
}

/// Whether `id` has the shape of a generated short id.
pub fn is_valid_short_id(id: &str) -> bool {
    id.len() == SHORT_ID_LEN && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
