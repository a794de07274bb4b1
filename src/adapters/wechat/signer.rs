//! Notification signature scheme.
//!
//! The string to sign is every non-empty field except `sign`, sorted by
//! name, joined as `k=v` pairs with `&`, followed by `&key=<partner key>`.
//! The digest is MD5 or HMAC-SHA256 (keyed by the partner key) depending on
//! `sign_type`, rendered as uppercase hex.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::notification::{AuthError, Fields};

/// Field carrying the signature.
pub const SIGN_FIELD: &str = "sign";

/// Field selecting the digest.
pub const SIGN_TYPE_FIELD: &str = "sign_type";

/// Digest used for the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignType {
    Md5,
    HmacSha256,
}

impl SignType {
    /// Reads `sign_type`; absent means MD5.
    ///
    /// # Errors
    ///
    /// Unknown sign types are rejected as `Unauthorized`.
    pub fn from_field(value: Option<&str>) -> Result<Self, AuthError> {
        match value.map(str::trim) {
            None | Some("") => Ok(SignType::Md5),
            Some(v) if v.eq_ignore_ascii_case("MD5") => Ok(SignType::Md5),
            Some(v) if v.eq_ignore_ascii_case("HMAC-SHA256") => Ok(SignType::HmacSha256),
            Some(_) => Err(AuthError::Unauthorized),
        }
    }
}

/// Builds the string to sign.
pub fn string_to_sign(fields: &Fields, partner_key: &str) -> String {
    let mut out = fields
        .iter()
        .filter(|(name, value)| name.as_str() != SIGN_FIELD && !value.is_empty())
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("&");
    if !out.is_empty() {
        out.push('&');
    }
    out.push_str("key=");
    out.push_str(partner_key);
    out
}

/// Computes the uppercase hex signature for `fields`.
pub fn sign(fields: &Fields, partner_key: &str, sign_type: SignType) -> Result<String, AuthError> {
    let payload = string_to_sign(fields, partner_key);
    match sign_type {
        SignType::Md5 => Ok(format!("{:X}", md5::compute(payload.as_bytes()))),
        SignType::HmacSha256 => {
            let mut mac = Hmac::<Sha256>::new_from_slice(partner_key.as_bytes())
                .map_err(|_| AuthError::Unauthorized)?;
            mac.update(payload.as_bytes());
            Ok(hex::encode_upper(mac.finalize().into_bytes()))
        }
    }
}

/// Verifies the `sign` field against the partner key.
///
/// # Errors
///
/// `Unauthorized` if the signature is missing, the sign type is unknown, or
/// the signature does not match.
pub fn verify(fields: &Fields, partner_key: &str) -> Result<(), AuthError> {
    let provided = fields
        .get(SIGN_FIELD)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or(AuthError::Unauthorized)?;

    let sign_type = SignType::from_field(fields.get(SIGN_TYPE_FIELD).map(String::as_str))?;
    let expected = sign(fields, partner_key, sign_type)?;

    if constant_time_compare(expected.as_bytes(), provided.to_ascii_uppercase().as_bytes()) {
        Ok(())
    } else {
        Err(AuthError::Unauthorized)
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PARTNER_KEY: &str = "192006250b4c09247ec02edce69f6a2d";

    fn fields(pairs: &[(&str, &str)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn signed(pairs: &[(&str, &str)], sign_type: SignType) -> Fields {
        let mut f = fields(pairs);
        let signature = sign(&f, PARTNER_KEY, sign_type).unwrap();
        f.insert(SIGN_FIELD.to_string(), signature);
        f
    }

    // ══════════════════════════════════════════════════════════════
    // String-to-sign Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn string_to_sign_sorts_and_skips_sign_and_empty() {
        let f = fields(&[
            ("nonce_str", "abc"),
            ("appid", "wx1"),
            ("sign", "ZZZ"),
            ("attach", ""),
            ("body", "test"),
        ]);

        assert_eq!(
            string_to_sign(&f, "k"),
            "appid=wx1&body=test&nonce_str=abc&key=k"
        );
    }

    #[test]
    fn string_to_sign_of_empty_fields_is_key_only() {
        assert_eq!(string_to_sign(&Fields::new(), "k"), "key=k");
    }

    #[test]
    fn md5_signature_matches_known_vector() {
        // Example from the gateway's signing documentation.
        let f = fields(&[
            ("appid", "wxd930ea5d5a258f4f"),
            ("mch_id", "10000100"),
            ("device_info", "1000"),
            ("body", "test"),
            ("nonce_str", "ibuaiVcKdpRxkhJA"),
        ]);

        assert_eq!(
            sign(&f, PARTNER_KEY, SignType::Md5).unwrap(),
            "9A0A8659F005D6984697E2CA0A9CF3B7"
        );
    }

    #[test]
    fn hmac_signature_is_uppercase_hex() {
        let signature = sign(&fields(&[("a", "1")]), PARTNER_KEY, SignType::HmacSha256).unwrap();
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    // ══════════════════════════════════════════════════════════════
    // Sign Type Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn sign_type_defaults_to_md5() {
        assert_eq!(SignType::from_field(None).unwrap(), SignType::Md5);
        assert_eq!(SignType::from_field(Some("")).unwrap(), SignType::Md5);
        assert_eq!(SignType::from_field(Some("md5")).unwrap(), SignType::Md5);
    }

    #[test]
    fn sign_type_hmac() {
        assert_eq!(
            SignType::from_field(Some("HMAC-SHA256")).unwrap(),
            SignType::HmacSha256
        );
    }

    #[test]
    fn unknown_sign_type_is_unauthorized() {
        assert_eq!(
            SignType::from_field(Some("RSA")),
            Err(AuthError::Unauthorized)
        );
    }

    // ══════════════════════════════════════════════════════════════
    // Verification Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn verify_valid_md5_signature() {
        let f = signed(&[("appid", "wx1"), ("total_fee", "100")], SignType::Md5);
        assert!(verify(&f, PARTNER_KEY).is_ok());
    }

    #[test]
    fn verify_valid_hmac_signature() {
        let f = signed(
            &[("appid", "wx1"), ("sign_type", "HMAC-SHA256")],
            SignType::HmacSha256,
        );
        assert!(verify(&f, PARTNER_KEY).is_ok());
    }

    #[test]
    fn verify_accepts_lowercase_signature() {
        let mut f = signed(&[("appid", "wx1")], SignType::Md5);
        let lower = f.get(SIGN_FIELD).unwrap().to_ascii_lowercase();
        f.insert(SIGN_FIELD.to_string(), lower);
        assert!(verify(&f, PARTNER_KEY).is_ok());
    }

    #[test]
    fn verify_missing_signature_fails() {
        let f = fields(&[("appid", "wx1")]);
        assert_eq!(verify(&f, PARTNER_KEY), Err(AuthError::Unauthorized));
    }

    #[test]
    fn verify_wrong_key_fails() {
        let f = signed(&[("appid", "wx1")], SignType::Md5);
        assert_eq!(verify(&f, "other-key"), Err(AuthError::Unauthorized));
    }

    #[test]
    fn verify_tampered_field_fails() {
        let mut f = signed(&[("appid", "wx1"), ("total_fee", "100")], SignType::Md5);
        f.insert("total_fee".to_string(), "1".to_string());
        assert_eq!(verify(&f, PARTNER_KEY), Err(AuthError::Unauthorized));
    }

    #[test]
    fn verify_sign_type_downgrade_fails() {
        let mut f = signed(&[("appid", "wx1")], SignType::HmacSha256);
        f.insert(SIGN_TYPE_FIELD.to_string(), "MD5".to_string());
        assert_eq!(verify(&f, PARTNER_KEY), Err(AuthError::Unauthorized));
    }

    #[test]
    fn constant_time_compare_different_lengths() {
        assert!(!constant_time_compare(b"abc", b"abcd"));
        assert!(constant_time_compare(b"", b""));
    }

    // ══════════════════════════════════════════════════════════════
    // Properties
    // ══════════════════════════════════════════════════════════════

    proptest! {
        #[test]
        fn signed_fields_always_verify(
            entries in proptest::collection::btree_map("[a-z_]{1,12}", "[A-Za-z0-9]{0,16}", 0..8)
        ) {
            let mut f: Fields = entries;
            f.remove(SIGN_FIELD);
            f.remove(SIGN_TYPE_FIELD);
            let signature = sign(&f, PARTNER_KEY, SignType::Md5).unwrap();
            f.insert(SIGN_FIELD.to_string(), signature);
            prop_assert!(verify(&f, PARTNER_KEY).is_ok());
        }

        #[test]
        fn changing_any_signed_value_breaks_verification(
            entries in proptest::collection::btree_map("[a-z_]{1,12}", "[A-Za-z0-9]{1,16}", 1..8),
            index in 0usize..8,
        ) {
            let mut f: Fields = entries;
            f.remove(SIGN_FIELD);
            f.remove(SIGN_TYPE_FIELD);
            prop_assume!(!f.is_empty());
            let signature = sign(&f, PARTNER_KEY, SignType::Md5).unwrap();

            let name = f.keys().nth(index % f.len()).cloned().unwrap();
            let tampered = format!("{}x", f.get(&name).unwrap());
            f.insert(name, tampered);
            f.insert(SIGN_FIELD.to_string(), signature);
            prop_assert_eq!(verify(&f, PARTNER_KEY), Err(AuthError::Unauthorized));
        }
    }
}
