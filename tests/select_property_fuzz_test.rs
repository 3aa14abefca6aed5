use html_select::{
    BoundValue, MULTIPLE_NAME_SUFFIX, Node, OptionEntry, Scalar, Select, Selectable,
    has_any_selection, propagate,
};
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::{FileFailurePersistence, TestCaseResult};

const SELECT_PROPTEST_REGRESSION_FILE: &str =
    "tests/proptest-regressions/select_property_fuzz_test.txt";
const DEFAULT_SELECT_PROPTEST_CASES: u32 = 128;

fn select_proptest_cases() -> u32 {
    std::env::var("HTML_SELECT_PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SELECT_PROPTEST_CASES)
}

fn scalar_strategy() -> BoxedStrategy<Scalar> {
    prop_oneof![
        4 => prop_oneof![
            Just(""),
            Just("0"),
            Just("1"),
            Just("a"),
            Just("b"),
        ]
        .prop_map(Scalar::from),
        3 => (0_i64..3).prop_map(Scalar::Int),
        1 => any::<bool>().prop_map(Scalar::Bool),
    ]
    .boxed()
}

fn label_strategy() -> BoxedStrategy<String> {
    "[A-Za-z ]{0,6}".boxed()
}

fn entry_strategy() -> BoxedStrategy<OptionEntry> {
    prop_oneof![
        3 => (scalar_strategy(), label_strategy())
            .prop_map(|(value, label)| OptionEntry::item(value, label)),
        1 => (label_strategy(), vec((scalar_strategy(), label_strategy()), 0..=4))
            .prop_map(|(label, items)| OptionEntry::group(label, items)),
    ]
    .boxed()
}

fn entries_strategy() -> BoxedStrategy<Vec<OptionEntry>> {
    vec(entry_strategy(), 0..=8).boxed()
}

fn leaves(nodes: &[Node]) -> Vec<(Scalar, bool)> {
    let mut out = Vec::new();
    for node in nodes {
        match node {
            Node::Optgroup(group) => out.extend(leaves(group.children())),
            Node::Option(option) => out.push((option.value().clone(), option.is_selected())),
            Node::Element(_) | Node::Text(_) => {}
        }
    }
    out
}

fn assert_selection_matches(select: &Select, expected: &[Scalar]) -> TestCaseResult {
    for (value, is_selected) in leaves(select.children()) {
        let should_be_selected = expected.iter().any(|candidate| *candidate == value);
        prop_assert_eq!(
            is_selected,
            should_be_selected,
            "leaf {:?} selection mismatch for expected set {:?}",
            value,
            expected
        );
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: select_proptest_cases(),
        failure_persistence: Some(Box::new(
            FileFailurePersistence::Direct(SELECT_PROPTEST_REGRESSION_FILE),
        )),
        .. ProptestConfig::default()
    })]

    #[test]
    fn single_select_marks_exactly_strict_matches(
        entries in entries_strategy(),
        bound in scalar_strategy(),
    ) {
        let select = Select::new().entries(entries).value(bound.clone());
        assert_selection_matches(&select, &[bound])?;
    }

    #[test]
    fn single_select_with_list_only_uses_first_element(
        entries in entries_strategy(),
        bound in vec(scalar_strategy(), 0..=4),
    ) {
        let select = Select::new().entries(entries).value(bound.clone());
        let first = bound.first().cloned().into_iter().collect::<Vec<_>>();
        assert_selection_matches(&select, &first)?;
    }

    #[test]
    fn multi_select_marks_members_at_any_depth(
        entries in entries_strategy(),
        bound in vec(scalar_strategy(), 0..=4),
    ) {
        let before = Select::new().entries(entries.clone()).multiple().value(bound.clone());
        let after = Select::new().multiple().value(bound.clone()).entries(entries);
        assert_selection_matches(&before, &bound)?;
        assert_selection_matches(&after, &bound)?;
    }

    #[test]
    fn int_and_string_values_never_cross_match(value in 0_i64..3) {
        let select = Select::new()
            .options([(Scalar::Int(value), "int"), (Scalar::Str(value.to_string()), "str")]);

        let as_str = Scalar::Str(value.to_string());
        let as_int = Scalar::Int(value);

        let by_str = select.value(value.to_string());
        prop_assert_eq!(by_str.selected_values(), vec![&as_str]);

        let by_int = select.value(value);
        prop_assert_eq!(by_int.selected_values(), vec![&as_int]);
    }

    #[test]
    fn placeholder_is_selected_exactly_when_nothing_else_is(
        entries in entries_strategy(),
        bound in scalar_strategy(),
    ) {
        let select = Select::new().entries(entries).value(bound);
        let had_selection = select.has_selection();
        let with_placeholder = select.placeholder("Choose");

        let Some(Node::Option(first)) = with_placeholder.children().first() else {
            return Err(TestCaseError::fail("placeholder is not the first child"));
        };
        prop_assert_eq!(first.value(), &Scalar::from(""));
        prop_assert_eq!(first.is_selected(), !had_selection);
        prop_assert_eq!(&with_placeholder.children()[1..], select.children());
    }

    #[test]
    fn propagate_twice_equals_propagate_once(
        entries in entries_strategy(),
        bound in vec(scalar_strategy(), 0..=4),
        multiple in any::<bool>(),
    ) {
        let tree = Select::new().entries(entries).children().to_vec();
        let value = BoundValue::List(bound);

        let once = propagate(&value, multiple, &tree);
        let twice = propagate(&value, multiple, &once);
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(
            has_any_selection(&once),
            leaves(&once).iter().any(|(_, is_selected)| *is_selected)
        );
    }

    #[test]
    fn multiple_suffixes_the_name_exactly_once(name in "[a-z]{1,8}(\\[\\])?") {
        let once = Select::new().name(name.clone()).multiple();
        let twice = once.multiple();

        let expected = if name.ends_with(MULTIPLE_NAME_SUFFIX) {
            name.clone()
        } else {
            format!("{name}{MULTIPLE_NAME_SUFFIX}")
        };
        prop_assert_eq!(once.name_attr(), Some(expected.as_str()));
        prop_assert_eq!(twice.name_attr(), Some(expected.as_str()));
    }
}
