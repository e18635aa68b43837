use proptest::prelude::*;
use std::path::{Path, PathBuf};
use tinyimg::{forwarded_for, CandidateFile, Config, Decision, ImageFilter, RepeatController};

fn default_filter() -> ImageFilter {
    let config = Config::new(PathBuf::from("."), None, false).unwrap();
    ImageFilter::from_config(&config)
}

proptest! {
    #[test]
    fn unlisted_extensions_never_admitted(
        stem in "[a-zA-Z0-9_-]{1,12}",
        ext in "[a-zA-Z]{1,5}",
        size in 0u64..=5_000_000u64
    ) {
        prop_assume!(ext != "jpg" && ext != "png");
        let candidate = CandidateFile {
            path: PathBuf::from(format!("{stem}.{ext}")),
            size,
            is_file: true,
        };
        prop_assert!(!default_filter().admits(&candidate));
    }

    #[test]
    fn size_ceiling_decides_admission(
        stem in "[a-zA-Z0-9_-]{1,12}",
        ext in prop::sample::select(vec!["jpg", "png"]),
        size in 0u64..10_000_000u64
    ) {
        let candidate = CandidateFile {
            path: PathBuf::from(format!("{stem}.{ext}")),
            size,
            is_file: true,
        };
        prop_assert_eq!(default_filter().admits(&candidate), size <= 5_000_000);
    }

    #[test]
    fn round_trips_match_target(target in 1u32..=10u32) {
        let mut controller = RepeatController::new(target);
        let path = Path::new("/img/a.png");
        let mut rounds = 0;

        loop {
            rounds += 1;
            prop_assert_eq!(controller.attempts(path), rounds - 1);
            match controller.complete_round(path) {
                Decision::Repeat { attempt } => prop_assert_eq!(attempt, rounds + 1),
                Decision::Finalize => break,
            }
            prop_assert!(rounds <= target);
        }

        prop_assert_eq!(rounds, target);
        prop_assert_eq!(controller.attempts(path), target);
    }

    #[test]
    fn forwarded_for_is_dotted_quad(octets in any::<[u8; 3]>(), millis in any::<i64>()) {
        let value = forwarded_for(octets, millis);
        let parts: Vec<u32> = value.split('.').map(|p| p.parse().unwrap()).collect();
        prop_assert_eq!(parts.len(), 4);
        prop_assert!(parts.iter().all(|p| *p < 255));
        prop_assert_eq!(i64::from(parts[3]), millis.rem_euclid(255));
    }
}
