// Password hashing for locally registered users.

/// bcrypt work factor for stored password hashes.
pub const HASH_COST: u32 = 8;

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, HASH_COST)
}

/// Returns false both on mismatch and when `hash` is not a valid bcrypt string.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
