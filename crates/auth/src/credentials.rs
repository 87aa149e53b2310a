use subtle::ConstantTimeEq;

use crate::Role;

/// Checks a presented credential for a requested role.
///
/// Injected into the [`AccessGate`](crate::AccessGate) so secrets come from
/// configuration rather than code.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, role: Role, credential: &str) -> bool;
}

/// Shared-secret verifier: one configured password per role.
pub struct SecretCredentials {
    staff: String,
    admin: String,
}

impl SecretCredentials {
    pub fn new(staff: impl Into<String>, admin: impl Into<String>) -> Self {
        Self {
            staff: staff.into(),
            admin: admin.into(),
        }
    }
}

impl core::fmt::Debug for SecretCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretCredentials")
            .field("staff", &"<redacted>")
            .field("admin", &"<redacted>")
            .finish()
    }
}

impl CredentialVerifier for SecretCredentials {
    fn verify(&self, role: Role, credential: &str) -> bool {
        let expected = match role {
            Role::Staff => &self.staff,
            Role::Admin => &self.admin,
            Role::None => return false,
        };
        constant_time_eq(credential, expected)
    }
}

/// Constant-time string comparison; also hides which of the two was longer.
fn constant_time_eq(a: &str, b: &str) -> bool {
    let max_len = a.len().max(b.len());

    // Different pad bytes so unequal lengths never compare equal.
    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];
    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);
    (lengths_equal & contents_equal).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_role_has_its_own_secret() {
        let creds = SecretCredentials::new("staff-pw", "admin-pw");
        assert!(creds.verify(Role::Staff, "staff-pw"));
        assert!(creds.verify(Role::Admin, "admin-pw"));
        assert!(!creds.verify(Role::Staff, "admin-pw"));
        assert!(!creds.verify(Role::Admin, "staff-pw"));
        assert!(!creds.verify(Role::None, "staff-pw"));
    }

    #[test]
    fn comparison_is_exact() {
        assert!(constant_time_eq("secret", "secret"));
        assert!(!constant_time_eq("secret", "Secret"));
        assert!(!constant_time_eq("secret", "secre"));
        assert!(!constant_time_eq("secret", "secrets"));
        assert!(!constant_time_eq("", "x"));
    }

    #[test]
    fn debug_does_not_leak_secrets() {
        let creds = SecretCredentials::new("staff-pw", "admin-pw");
        let shown = format!("{creds:?}");
        assert!(!shown.contains("staff-pw"));
        assert!(!shown.contains("admin-pw"));
    }
}
