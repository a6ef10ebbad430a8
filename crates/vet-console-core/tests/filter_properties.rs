//! Property tests for the filter engine.

use proptest::prelude::*;
use vet_console_core::filter::{self, FilterCriteria};
use vet_console_core::Pet;

fn arb_pet() -> impl Strategy<Value = Pet> {
    (
        proptest::option::of("[A-Za-z]{0,6}"),
        proptest::option::of("[A-Za-z ]{0,10}"),
        proptest::option::of(prop_oneof![Just("Dog"), Just("Cat"), Just("Bird"), Just("dog")]),
        proptest::option::of("[a-z]{0,5}"),
    )
        .prop_map(|(name, owner, pet_type, breed)| Pet {
            name: name.unwrap_or_default(),
            owner_fullname: owner.unwrap_or_default(),
            pet_type: pet_type.map(str::to_string).unwrap_or_default(),
            breed: breed.unwrap_or_default(),
            ..Default::default()
        })
}

fn arb_criteria() -> impl Strategy<Value = Vec<(&'static str, String)>> {
    proptest::collection::vec(
        (
            prop_oneof![Just("petName"), Just("petOwner"), Just("petType"), Just("petBreed")],
            "[A-Za-z]{0,3}",
        ),
        0..4,
    )
}

fn criteria_from(pairs: &[(&'static str, String)]) -> FilterCriteria {
    let mut criteria = FilterCriteria::for_resource::<Pet>();
    for (key, value) in pairs {
        criteria.set(key, value.clone()).unwrap();
    }
    criteria
}

/// Reference predicate, written out per filter key.
fn expected_match(pet: &Pet, criteria: &FilterCriteria) -> bool {
    let contains = |field: &str, query: &str| field.to_lowercase().contains(&query.to_lowercase());
    criteria.active().all(|(spec, query)| match spec.key {
        "petName" => !pet.name.is_empty() && contains(&pet.name, query),
        "petOwner" => !pet.owner_fullname.is_empty() && contains(&pet.owner_fullname, query),
        "petType" => !pet.pet_type.is_empty() && pet.pet_type.eq_ignore_ascii_case(query),
        "petBreed" => !pet.breed.is_empty() && contains(&pet.breed, query),
        other => panic!("unexpected filter {}", other),
    })
}

proptest! {
    #[test]
    fn prop_filtered_is_exact_matching_subset(
        pets in proptest::collection::vec(arb_pet(), 0..20),
        pairs in arb_criteria(),
    ) {
        let criteria = criteria_from(&pairs);
        let indices = filter::matching_indices(&pets, &criteria);

        // Order preserved, no duplicates.
        prop_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        for (i, pet) in pets.iter().enumerate() {
            prop_assert_eq!(indices.contains(&i), expected_match(pet, &criteria));
        }
    }

    #[test]
    fn prop_recompute_is_idempotent(
        pets in proptest::collection::vec(arb_pet(), 0..20),
        pairs in arb_criteria(),
    ) {
        let criteria = criteria_from(&pairs);
        let first = filter::apply(&pets, &criteria);
        let second = filter::apply(&pets, &criteria);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_clearing_restores_full_collection(
        pets in proptest::collection::vec(arb_pet(), 0..20),
        pairs in arb_criteria(),
    ) {
        let mut criteria = criteria_from(&pairs);
        criteria.clear();
        let all: Vec<&Pet> = pets.iter().collect();
        prop_assert_eq!(filter::apply(&pets, &criteria), all);
    }
}
