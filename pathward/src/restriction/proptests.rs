//! Property-based tests for restriction checks.

use super::RestrictionSet;
use crate::Error;
use proptest::prelude::*;
use std::path::PathBuf;

fn relative_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec("[a-z0-9_]{1,12}", 1..6)
        .prop_map(|parts| parts.into_iter().collect::<PathBuf>())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    // Paths outside every entry are always PathRestricted, read or write
    #[test]
    fn outside_paths_are_restricted(
        allowed in relative_path_strategy(),
        other in relative_path_strategy(),
        write in any::<bool>(),
    ) {
        let dir = tempfile::tempdir().unwrap();
        let mut set = RestrictionSet::new("prop");
        set.add_path(dir.path().join("in").join(&allowed), true).unwrap();

        let result = set.check(dir.path().join("out").join(&other), write);
        prop_assert!(matches!(result, Err(Error::PathRestricted { .. })));
    }

    // Under a read-only entry, reads pass and writes are WriteRestricted
    #[test]
    fn read_only_entries_block_writes(nested in relative_path_strategy()) {
        let dir = tempfile::tempdir().unwrap();
        let mut set = RestrictionSet::new("prop");
        set.add_path(dir.path(), false).unwrap();

        let candidate = dir.path().join(&nested);
        prop_assert!(set.check(&candidate, false).is_ok());
        prop_assert!(matches!(
            set.check(&candidate, true),
            Err(Error::WriteRestricted { .. })
        ));
    }

    // The unrestricted policy accepts any string at all
    #[test]
    fn allow_all_accepts_anything(input in ".*", write in any::<bool>()) {
        prop_assert!(RestrictionSet::allow_all().check(&input, write).is_ok());
    }
}
