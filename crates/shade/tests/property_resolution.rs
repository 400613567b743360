//! Property tests for scheme derivation and literal parsing.

use proptest::prelude::*;
use shade::{Preference, Scheme};

fn any_preference() -> impl Strategy<Value = Preference> {
    prop_oneof![
        Just(Preference::Light),
        Just(Preference::Dark),
        Just(Preference::System),
    ]
}

proptest! {
    /// Derivation is total and matches the definition: a pinned
    /// preference wins, `system` maps the signal.
    #[test]
    fn resolve_is_total_and_correct(preference in any_preference(), dark in any::<bool>()) {
        let scheme = preference.resolve(dark);
        match preference {
            Preference::Light => prop_assert_eq!(scheme, Scheme::Light),
            Preference::Dark => prop_assert_eq!(scheme, Scheme::Dark),
            Preference::System => {
                prop_assert_eq!(scheme, if dark { Scheme::Dark } else { Scheme::Light });
            }
        }
    }

    /// The canonical literal round-trips through parsing.
    #[test]
    fn literal_round_trips(preference in any_preference()) {
        prop_assert_eq!(preference.as_str().parse::<Preference>().unwrap(), preference);
    }

    /// Only the three exact literals parse; everything else is rejected
    /// (and therefore read as "absent" at the storage boundary).
    #[test]
    fn foreign_strings_never_parse(raw in "[a-zA-Z0-9 ]{0,12}") {
        let parsed = raw.parse::<Preference>();
        let recognized = matches!(raw.as_str(), "light" | "dark" | "system");
        prop_assert_eq!(parsed.is_ok(), recognized);
    }
}
