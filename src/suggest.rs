//! Edit-distance closest-match over visible command/flag names (spec §4.7).
//! The distance function is grounded on
//! `examples/pacak-bpaf/src/meta_youmean.rs`'s `levenshtein`.

/// `max(2, len/3)` is the acceptance threshold from spec §4.7.
pub fn threshold(len: usize) -> usize {
    std::cmp::max(2, len / 3)
}

/// Closest candidate to `needle` among `haystack`, if within threshold.
/// Hidden names must already be filtered out of `haystack` by the caller
/// (spec §4.7 "Hidden commands are excluded from suggestions").
pub fn suggest<'a>(needle: &str, haystack: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut best: Option<(usize, &str)> = None;
    for candidate in haystack {
        let d = levenshtein(needle, candidate);
        if best.map_or(true, |(bd, _)| d < bd) {
            best = Some((d, candidate));
        }
    }
    match best {
        Some((d, name)) if d <= threshold(needle.len()) => Some(name),
        _ => None,
    }
}

pub fn levenshtein(a: &str, b: &str) -> usize {
    let mut result = 0;
    let mut cache = (1..=a.chars().count()).collect::<Vec<_>>();
    let mut distance_a;
    let mut distance_b;

    for (index_b, code_b) in b.chars().enumerate() {
        result = index_b;
        distance_a = index_b;

        for (index_a, code_a) in a.chars().enumerate() {
            distance_b = if code_a == code_b { distance_a } else { distance_a + 1 };
            distance_a = cache[index_a];

            result = if distance_a > result {
                if distance_b > result {
                    result + 1
                } else {
                    distance_b
                }
            } else if distance_b > distance_a {
                distance_a + 1
            } else {
                distance_b
            };

            cache[index_a] = result;
        }
    }
    if a.is_empty() {
        b.chars().count()
    } else {
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_have_zero_distance() {
        assert_eq!(levenshtein("serve", "serve"), 0);
    }

    #[test]
    fn one_substitution() {
        assert_eq!(levenshtein("servv", "serve"), 1);
    }

    #[test]
    fn empty_needle_distance_is_length() {
        assert_eq!(levenshtein("", "abc"), 3);
    }

    #[test]
    fn suggest_picks_closest_within_threshold() {
        let names = ["serve", "build", "deploy"];
        assert_eq!(suggest("servv", names), Some("serve"));
    }

    #[test]
    fn suggest_none_when_too_far() {
        let names = ["serve", "build", "deploy"];
        assert_eq!(suggest("xyz", names), None);
    }

    #[test]
    fn threshold_matches_spec_formula() {
        assert_eq!(threshold(3), 2);
        assert_eq!(threshold(12), 4);
    }
}
