// Random identifiers for stored records.

use rand::distributions::{Alphanumeric, Distribution, Uniform};
use rand::Rng;

const ID_LEN: usize = 10;
const REFERRAL_LEN: usize = 6;
const REFERRAL_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Short opaque record id (URL-safe alphanumerics).
pub fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}

/// `REF` followed by six uppercase base-36 characters.
pub fn referral_code() -> String {
    let mut rng = rand::thread_rng();
    let pick = Uniform::from(0..REFERRAL_ALPHABET.len());
    let suffix: String = (0..REFERRAL_LEN)
        .map(|_| char::from(REFERRAL_ALPHABET[pick.sample(&mut rng)]))
        .collect();
    format!("REF{}", suffix)
}
