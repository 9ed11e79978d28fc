//! Property tests for the detector's public contract

use langsniff::{DetectionResult, Detector, Profile};
use proptest::prelude::*;

fn detector(profile: Profile) -> Detector {
    Detector::for_profile(profile).expect("built-in table")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn confidence_stays_in_unit_interval_for_random_bytes(
        bytes in proptest::collection::vec(any::<u8>(), 0..512)
    ) {
        for profile in [Profile::Standard, Profile::Compact] {
            let result = detector(profile).detect_bytes(&bytes, None);
            prop_assert!((0.0..=1.0).contains(&result.confidence), "{:?}", result);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn detection_is_idempotent(code in "\\PC{0,200}") {
        let detector = detector(Profile::Standard);
        prop_assert_eq!(detector.detect(&code, None), detector.detect(&code, None));
    }

    #[test]
    fn mapped_extension_ignores_content(code in "\\PC{0,200}", stem in "[a-z]{1,8}") {
        let detector = detector(Profile::Standard);
        let filename = format!("{stem}.py");
        prop_assert_eq!(detector.detect(&code, Some(&filename)), DetectionResult::new("python", 0.9));
    }

    #[test]
    fn unknown_only_at_fallback_confidence(code in "\\PC{0,200}") {
        let result = detector(Profile::Standard).detect(&code, None);
        if result.is_unknown() {
            prop_assert_eq!(result.confidence, 0.3);
        } else {
            prop_assert!(result.confidence > 0.0 && result.confidence <= 0.98);
        }
    }
}

#[test]
fn listing_is_stable_across_calls() {
    let detector = detector(Profile::Standard);
    let first: Vec<String> =
        detector.registry().list_supported_languages().into_iter().map(String::from).collect();
    let second: Vec<String> =
        detector.registry().list_supported_languages().into_iter().map(String::from).collect();
    assert_eq!(first, second);
}
