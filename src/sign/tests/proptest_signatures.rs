use proptest::prelude::*;

use crate::cert::TrustedCertificate;
use crate::keys::SigningKeyMaterial;
use crate::sign::{DigestAlgorithm, RequestSigner, ResponseVerifier, SignatureScheme};

const MERCHANT_KEY: &str = include_str!("../../../tests/fixtures/merchant_key_pkcs8.pem");
const GATEWAY_CERT: &[u8] = include_bytes!("../../../tests/fixtures/gateway_cert.pem");

fn signer(digest: DigestAlgorithm) -> RequestSigner {
    let key = SigningKeyMaterial::from_pem(MERCHANT_KEY).expect("fixture key loads");
    RequestSigner::new(key, SignatureScheme::new(digest))
}

fn verifier(digest: DigestAlgorithm) -> ResponseVerifier {
    let certificate = TrustedCertificate::from_bytes(GATEWAY_CERT).expect("fixture cert loads");
    ResponseVerifier::new(certificate, SignatureScheme::new(digest))
}

fn digest_strategy() -> impl Strategy<Value = DigestAlgorithm> {
    prop_oneof![Just(DigestAlgorithm::Sha1), Just(DigestAlgorithm::Sha256)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_sign_verify_roundtrip(
        digest in digest_strategy(),
        message in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let signature = signer(digest).sign(&message).expect("signing failed");
        let result = verifier(digest).verify(&message, &signature);
        prop_assert_eq!(result.expect("verification errored"), true);
    }

    #[test]
    fn test_single_byte_mutation_invalidates(
        digest in digest_strategy(),
        message in proptest::collection::vec(any::<u8>(), 1..512),
        index in any::<proptest::sample::Index>(),
    ) {
        let signature = signer(digest).sign(&message).expect("signing failed");

        let mut mutated = message.clone();
        let at = index.index(mutated.len());
        mutated[at] ^= 0x01;

        let result = verifier(digest).verify(&mutated, &signature);
        prop_assert_eq!(result.expect("verification errored"), false);
    }

    #[test]
    fn test_digest_mismatch_invalidates(
        message in proptest::collection::vec(any::<u8>(), 0..256),
    ) {
        let signature = signer(DigestAlgorithm::Sha1).sign(&message).expect("signing failed");
        let result = verifier(DigestAlgorithm::Sha256).verify(&message, &signature);
        prop_assert_eq!(result.expect("verification errored"), false);
    }
}
