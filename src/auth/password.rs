use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hash a plaintext password with argon2 and a fresh random salt.
///
/// The returned digest is self-contained (salt and cost parameters embedded),
/// so two calls on the same plaintext produce different strings.
pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?;
    Ok(digest.to_string())
}

/// Verify a plaintext against a stored digest. A mismatch is `Ok(false)`;
/// only a malformed digest is an error.
pub fn verify_password(plain: &str, digest: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(digest).map_err(|e| {
        error!(error = %e, "argon2 parse digest error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let digest = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, &digest).expect("verify should succeed"));
    }

    #[test]
    fn repeated_hashes_differ() {
        let password = "same-input";
        let a = hash_password(password).unwrap();
        let b = hash_password(password).unwrap();
        assert_ne!(a, b);
        assert!(verify_password(password, &a).unwrap());
        assert!(verify_password(password, &b).unwrap());
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let digest = hash_password("correct-horse-battery-staple").unwrap();
        assert!(!verify_password("wrong-password", &digest).expect("verify should not error"));
    }

    #[test]
    fn verify_errors_on_malformed_digest() {
        let err = verify_password("anything", "not-a-valid-digest").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
