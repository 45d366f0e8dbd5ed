//! Built-in base languages referenced as `L1` to `L4` in expressions.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static A_PLUS_B_STAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^a+b*$").unwrap_or_else(|_| unreachable!()));
static A_B_C_BLOCKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^a*b*c*$").unwrap_or_else(|_| unreachable!()));
static A_B_ANY_ORDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ab]*$").unwrap_or_else(|_| unreachable!()));

/// One of the fixed primitive languages.
///
/// Every primitive first checks the shape of its input against an anchored
/// pattern and only then compares letter counts, so strings over a foreign
/// alphabet are rejected without counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `a^n b^m` with `n > 0` and either `m = 0` or `m < n <= 3m`.
    L1,
    /// `a^i b^j c^k` with `i = j`.
    L2,
    /// `a^i b^j c^k` with `j = k`.
    L3,
    /// Words over `{a, b}` with as many `a` as `b`.
    L4,
}

impl Primitive {
    /// All primitives in registry order.
    pub const ALL: [Self; 4] = [Self::L1, Self::L2, Self::L3, Self::L4];

    /// Return the name used to reference the primitive in expressions.
    ///
    /// # Examples
    ///
    /// ```
    /// use langcheck::Primitive;
    ///
    /// assert_eq!(Primitive::L3.name(), "L3");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
            Self::L4 => "L4",
        }
    }

    /// Look a primitive up by its expression name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Short human-readable description of the language.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::L1 => "a^n b^m where m = 0 < n, or m < n <= 3m",
            Self::L2 => "a^i b^j c^k where i = j",
            Self::L3 => "a^i b^j c^k where j = k",
            Self::L4 => "words over {a, b} with equally many a and b",
        }
    }

    /// Test whether `candidate` belongs to the language.
    ///
    /// # Examples
    ///
    /// ```
    /// use langcheck::Primitive;
    ///
    /// assert!(Primitive::L1.contains("aab"));
    /// assert!(!Primitive::L1.contains("abb"));
    /// assert!(Primitive::L4.contains("abab"));
    /// ```
    #[must_use]
    pub fn contains(self, candidate: &str) -> bool {
        match self {
            Self::L1 => in_l1(candidate),
            Self::L2 => balanced(&A_B_C_BLOCKS, candidate, 'a', 'b'),
            Self::L3 => balanced(&A_B_C_BLOCKS, candidate, 'b', 'c'),
            Self::L4 => balanced(&A_B_ANY_ORDER, candidate, 'a', 'b'),
        }
    }
}

fn balanced(shape: &Regex, candidate: &str, left: char, right: char) -> bool {
    shape.is_match(candidate) && count(candidate, left) == count(candidate, right)
}

fn in_l1(candidate: &str) -> bool {
    if !A_PLUS_B_STAR.is_match(candidate) {
        return false;
    }
    let n = count(candidate, 'a');
    let m = count(candidate, 'b');
    if m == 0 {
        return n > 0;
    }
    m < n && n <= m.saturating_mul(3)
}

fn count(candidate: &str, letter: char) -> usize {
    candidate.chars().filter(|&c| c == letter).count()
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a name does not denote a primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a primitive language")]
pub struct UnknownPrimitive(
    /// The rejected name.
    pub String,
);

impl FromStr for Primitive {
    type Err = UnknownPrimitive;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownPrimitive(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a", true)]
    #[case("aaaa", true)]
    #[case("aab", true)]
    #[case("aaab", true)]
    #[case("aaaab", false)]
    #[case("aaaaaabb", true)]
    #[case("aaaaaaabb", false)]
    #[case("ab", false)]
    #[case("abb", false)]
    #[case("", false)]
    #[case("b", false)]
    #[case("aba", false)]
    #[case("aac", false)]
    fn l1_membership(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(Primitive::L1.contains(input), expected, "L1 on {input:?}");
    }

    #[rstest]
    #[case("", true)]
    #[case("ab", true)]
    #[case("aabbc", true)]
    #[case("aabbccccc", true)]
    #[case("ccc", true)]
    #[case("aab", false)]
    #[case("ba", false)]
    #[case("abca", false)]
    #[case("abd", false)]
    fn l2_membership(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(Primitive::L2.contains(input), expected, "L2 on {input:?}");
    }

    #[rstest]
    #[case("", true)]
    #[case("bc", true)]
    #[case("aaabbcc", true)]
    #[case("aaa", true)]
    #[case("abcc", false)]
    #[case("cb", false)]
    fn l3_membership(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(Primitive::L3.contains(input), expected, "L3 on {input:?}");
    }

    #[rstest]
    #[case("", true)]
    #[case("abab", true)]
    #[case("ba", true)]
    #[case("bbaa", true)]
    #[case("aab", false)]
    #[case("abc", false)]
    #[case("äb", false)]
    fn l4_membership(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(Primitive::L4.contains(input), expected, "L4 on {input:?}");
    }

    #[test]
    fn names_round_trip_through_lookup() {
        for primitive in Primitive::ALL {
            assert_eq!(Primitive::from_name(primitive.name()), Some(primitive));
        }
        assert_eq!(Primitive::from_name("L5"), None);
        assert_eq!(Primitive::from_name("L01"), None);
    }

    #[test]
    fn parses_from_str() {
        assert_eq!("L2".parse::<Primitive>().ok(), Some(Primitive::L2));
        let Err(err) = "l2".parse::<Primitive>() else {
            panic!("lower-case names are not primitives");
        };
        assert_eq!(err.to_string(), "`l2` is not a primitive language");
    }
}
