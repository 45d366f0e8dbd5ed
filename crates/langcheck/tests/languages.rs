//! Behavioural tests for compiled languages.

#![expect(clippy::expect_used, reason = "tests assert compilation succeeds")]

use rstest::rstest;

use langcheck::{
    EvalBudget, EvalError, ExprError, Language, Primitive, Registry, compile, compile_with,
};

fn words(max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        frontier = frontier
            .iter()
            .flat_map(|w| ['a', 'b', 'c'].map(|c| format!("{w}{c}")))
            .collect();
        all.extend(frontier.iter().cloned());
    }
    all
}

fn compiled(source: &str) -> Language {
    compile(source).expect("expression should compile")
}

#[rstest]
#[case("L1", "aab", true)]
#[case("L1", "abb", false)]
#[case("L2", "aabbc", true)]
#[case("L4", "abab", true)]
#[case("L1+L4", "ab", true)]
#[case("L1.L4", "aab", true)]
#[case("L1*", "", true)]
#[case("(L1+L4)*", "aababba", true)]
#[case("L2.L3", "aabbbbcc", true)]
#[case("L4.L1", "xyz", false)]
fn evaluates_concrete_scenarios(
    #[case] source: &str,
    #[case] candidate: &str,
    #[case] expected: bool,
) {
    assert_eq!(
        compiled(source).contains(candidate),
        expected,
        "{source} on {candidate:?}"
    );
}

#[rstest]
#[case(&["L1+L2+L4", "(L1+L2)+L4", "L1+(L2+L4)"])]
#[case(&["L1.L4.L2", "(L1.L4).L2", "L1.(L4.L2)"])]
#[case(&["L4*.L1", "(L4*).L1", "((L4)*).(L1)"])]
fn equivalent_groupings_agree(#[case] sources: &[&str]) {
    let languages: Vec<Language> = sources.iter().map(|s| compiled(s)).collect();
    for w in words(6) {
        let verdicts: Vec<bool> = languages.iter().map(|l| l.contains(&w)).collect();
        assert!(
            verdicts.windows(2).all(|pair| pair.first() == pair.last()),
            "{sources:?} disagree on {w:?}: {verdicts:?}"
        );
    }
}

#[test]
fn compiling_twice_gives_identical_verdicts() {
    let first = compiled("(L1 + L2 . L3)* + L4");
    let second = compiled("(L1 + L2 . L3)* + L4");
    for w in words(6) {
        assert_eq!(first.contains(&w), second.contains(&w), "{w:?}");
    }
}

#[test]
fn star_binds_tighter_than_concatenation() {
    let mut registry = Registry::with_primitives();
    registry
        .define("L5", Language::from_fn(|s| s == "a"))
        .expect("L5 is a valid name");
    registry
        .define("L6", Language::from_fn(|s| s == "b"))
        .expect("L6 is a valid name");

    let unparenthesised = compile_with("L5.L6*", &registry).expect("compiles");
    let explicit = compile_with("L5.(L6*)", &registry).expect("compiles");
    let starred_pair = compile_with("(L5.L6)*", &registry).expect("compiles");

    assert!(unparenthesised.contains("abb"));
    assert!(explicit.contains("abb"));
    assert!(!starred_pair.contains("abb"));
    assert!(starred_pair.contains("abab"));
}

#[test]
fn concatenation_binds_tighter_than_union() {
    // "ac" splits as "a" in L1 followed by "c" in L2, which only the
    // parenthesised reading allows.
    let language = compiled("L1 + L4.L2");
    assert!(language.contains("abc"));
    assert!(!language.contains("ac"));
    assert!(compiled("(L1 + L4).L2").contains("ac"));
}

#[test]
fn combinators_match_compiled_expressions() {
    let l1 = Language::primitive(Primitive::L1);
    let l3 = Language::primitive(Primitive::L3);
    let built = Language::union(&Language::star(&l1), &Language::concat(&l1, &l3));
    let parsed = compiled("L1* + L1.L3");
    for w in words(6) {
        assert_eq!(built.contains(&w), parsed.contains(&w), "{w:?}");
    }
}

#[rstest]
#[case("L5*")]
#[case("L1 . (L2 + L100)")]
#[case("L01 + L1")]
fn rejects_undefined_references(#[case] source: &str) {
    assert!(matches!(
        compile(source),
        Err(ExprError::UndefinedReference { .. })
    ));
}

#[rstest]
#[case("(L1 + L2")]
#[case("L1 + L2)")]
fn rejects_unbalanced_grouping(#[case] source: &str) {
    assert!(matches!(
        compile(source),
        Err(ExprError::UnbalancedGrouping { .. })
    ));
}

#[rstest]
#[case("")]
#[case("L1 L2")]
#[case("L1 | L2")]
#[case("L1 + * L2")]
#[case("L5")]
#[case("(L5)")]
#[case("L01")]
#[case("L1 . (L9)")]
fn rejects_invalid_expressions(#[case] source: &str) {
    assert!(matches!(
        compile(source),
        Err(ExprError::InvalidExpression(_))
    ));
}

#[test]
fn budget_turns_runaway_star_into_an_error() {
    let language = compiled("(L4* . L4*)*");
    let candidate = format!("{}c", "ab".repeat(40));
    assert_eq!(
        language.evaluate(&candidate, EvalBudget::steps(1_000)),
        Err(EvalError::BudgetExhausted { limit: 1_000 })
    );
    assert_eq!(language.evaluate("abba", EvalBudget::steps(1_000)), Ok(true));
}

#[test]
fn foreign_alphabets_yield_false_rather_than_errors() {
    let language = compiled("(L1 + L2 + L3 + L4)*");
    assert!(!language.contains("héllo"));
    assert!(!language.contains("a b"));
}

#[rstest]
#[case::concatenation(".L1")]
#[case::union(" + L1")]
#[case::star("*")]
fn long_operator_chains_are_rejected(#[case] link: &str) {
    let chain = format!("L1{}", link.repeat(10_000));
    let Err(ExprError::InvalidExpression(info)) = compile(&chain) else {
        panic!("a 10k operator chain should be rejected");
    };
    assert_eq!(info.message, "expression nested too deeply");
}

#[test]
fn chains_below_the_depth_limit_evaluate() {
    let language = compiled(&format!("L4{}", " . L4".repeat(400)));
    assert!(language.contains("abba"));
    assert!(!language.contains("abc"));
}
