use sha1::{Digest, Sha1};

/// Checks the platform's ownership-proof signature: SHA-1 over the
/// lexicographically sorted concatenation of token, timestamp and nonce,
/// compared as lowercase hex. Plain equality is fine here — this guards a
/// one-time handshake, not a persistent secret.
pub fn verify(token: &str, signature: &str, timestamp: &str, nonce: &str) -> bool {
    expected_signature(token, timestamp, nonce) == signature
}

fn expected_signature(token: &str, timestamp: &str, nonce: &str) -> String {
    let mut parts = [token, timestamp, nonce];
    parts.sort_unstable();

    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_documented_digest() {
        // sha1("1409735669" + "5983437" + "token")
        assert!(verify(
            "token",
            "4c7c1ee8563ce64d0507211c1246c394dfba4af4",
            "1409735669",
            "5983437",
        ));
    }

    #[test]
    fn sorts_inputs_before_hashing() {
        // sha1("1700000000" + "abc123" + "pawtrace") — sorting makes the
        // digest independent of which argument carried which value.
        assert!(verify(
            "pawtrace",
            "ce63057618d65f8a9db006ef594eac1e9f8c7c15",
            "1700000000",
            "abc123",
        ));
        assert!(verify(
            "pawtrace",
            "ce63057618d65f8a9db006ef594eac1e9f8c7c15",
            "abc123",
            "1700000000",
        ));
    }

    #[test]
    fn rejects_any_other_signature() {
        assert!(!verify("token", "deadbeef", "1409735669", "5983437"));
        assert!(!verify("token", "", "1409735669", "5983437"));
    }
}
