use crate::digest;
use crate::model::{DigestSet, ResourceDescriptor};

use super::{Context, ErrorKind, Validatable, ValidationError, ValidationResult};

impl Validatable for DigestSet {
    /// Every value must be hex. Recognized algorithms must also decode to
    /// their exact output size; unknown ones are accepted at any length.
    fn validate(&self) -> ValidationResult {
        for (algorithm, value) in self.iter() {
            let fail = |kind| {
                ValidationError::new(kind).within(Context::Digest {
                    algorithm: algorithm.to_owned(),
                })
            };

            let bytes = hex::decode(value).map_err(|_| fail(ErrorKind::InvalidDigestEncoding))?;

            if let Some(expected) = digest::expected_len(algorithm) {
                if bytes.len() != expected {
                    return Err(fail(ErrorKind::IncorrectDigestLength));
                }
            }
        }
        Ok(())
    }
}

impl Validatable for ResourceDescriptor {
    fn validate(&self) -> ValidationResult {
        if self.name.is_empty() && self.uri.is_empty() && self.digest.is_empty() {
            return Err(ErrorKind::RequiredFieldMissing.into());
        }
        self.digest.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rd_with_digest(alg: &str, value: &str) -> ResourceDescriptor {
        ResourceDescriptor::named("theName", alg, value)
    }

    #[test]
    fn requires_name_uri_or_digest() {
        let rd = ResourceDescriptor {
            download_location: "https://example.com/test.zip".into(),
            media_type: "theMediaType".into(),
            ..Default::default()
        };
        assert_eq!(rd.validate().unwrap_err(), ErrorKind::RequiredFieldMissing);
    }

    #[test]
    fn any_single_identifier_suffices() {
        let by_name = ResourceDescriptor {
            name: "n".into(),
            ..Default::default()
        };
        let by_uri = ResourceDescriptor {
            uri: "pkg:cargo/serde@1.0.0".into(),
            ..Default::default()
        };
        let by_digest = ResourceDescriptor {
            digest: [("sha1", "a".repeat(40))].into_iter().collect(),
            ..Default::default()
        };
        assert!(by_name.validate().is_ok());
        assert!(by_uri.validate().is_ok());
        assert!(by_digest.validate().is_ok());
    }

    #[test]
    fn sha256_one_byte_short() {
        let err = rd_with_digest("sha256", &"ab".repeat(31))
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncorrectDigestLength);
        assert_eq!(err.path(), "digest[sha256]");
    }

    #[test]
    fn sha256_exact_length() {
        assert!(rd_with_digest("sha256", &"ab".repeat(32)).validate().is_ok());
    }

    #[test]
    fn custom_algorithm_skips_length() {
        assert!(rd_with_digest("myCustomAlg", "abc123").validate().is_ok());
    }

    #[test]
    fn custom_algorithm_still_needs_hex() {
        let err = rd_with_digest("myCustomAlg", "anything-goes")
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDigestEncoding);
    }

    #[test]
    fn odd_length_hex_is_invalid() {
        let err = rd_with_digest("alg1", "abc").validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidDigestEncoding);
    }

    #[test]
    fn uppercase_hex_accepted() {
        assert!(rd_with_digest("sha1", &"AB".repeat(20)).validate().is_ok());
    }

    #[test]
    fn git_commit_is_sha1_sized() {
        assert!(rd_with_digest("gitCommit", &"0f".repeat(20)).validate().is_ok());
        let err = rd_with_digest("gitCommit", &"0f".repeat(32))
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncorrectDigestLength);
    }

    #[test]
    fn go_module_hash_is_sha256_sized() {
        assert!(rd_with_digest("goModuleH1", &"ab".repeat(32)).validate().is_ok());
        let err = rd_with_digest("goModuleH1", &"ab".repeat(31))
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncorrectDigestLength);
        assert_eq!(err.path(), "digest[goModuleH1]");
    }

    #[test]
    fn every_entry_is_checked() {
        let rd = ResourceDescriptor {
            name: "n".into(),
            digest: [("sha256", "ab".repeat(32)), ("sha512", "ab".repeat(63))]
                .into_iter()
                .collect(),
            ..Default::default()
        };
        let err = rd.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncorrectDigestLength);
        assert_eq!(
            err.context(),
            &[Context::Digest {
                algorithm: "sha512".into()
            }]
        );
    }

    proptest! {
        #[test]
        fn recognized_lengths_enforced(
            (alg, len) in prop::sample::select(digest::known_algorithms().collect::<Vec<_>>()),
            delta in 1usize..8,
        ) {
            let exact = rd_with_digest(alg, &"a5".repeat(len));
            prop_assert!(exact.validate().is_ok());

            let longer = rd_with_digest(alg, &"a5".repeat(len + delta));
            prop_assert_eq!(longer.validate().unwrap_err().kind(), ErrorKind::IncorrectDigestLength);

            let shorter = rd_with_digest(alg, &"a5".repeat(len - delta.min(len)));
            prop_assert_eq!(shorter.validate().unwrap_err().kind(), ErrorKind::IncorrectDigestLength);
        }

        #[test]
        fn unknown_algorithms_accept_any_hex(bytes in prop::collection::vec(any::<u8>(), 0..80)) {
            let rd = rd_with_digest("myCustomAlg", &hex::encode(bytes));
            prop_assert!(rd.validate().is_ok());
        }

        #[test]
        fn non_hex_always_rejected(
            alg in "[a-zA-Z0-9_]{1,12}",
            prefix in "[0-9a-f]{0,6}",
            bad in "[g-zG-Z_\\-]",
        ) {
            let rd = rd_with_digest(&alg, &format!("{prefix}{bad}{prefix}"));
            prop_assert_eq!(rd.validate().unwrap_err().kind(), ErrorKind::InvalidDigestEncoding);
        }

        #[test]
        fn validation_is_idempotent(
            name in "[a-z]{0,4}",
            value in "[0-9a-fx]{0,70}",
        ) {
            let rd = ResourceDescriptor {
                name,
                digest: [("sha256", value)].into_iter().collect(),
                ..Default::default()
            };
            prop_assert_eq!(rd.validate(), rd.validate());
        }
    }
}
