//! Ranking and top-N selection shared by both scoring paths

use crate::model::RankedCareer;
use indexmap::IndexMap;
use std::cmp::Ordering;

/// Sort descending by score.
///
/// The sort is stable: equal scores keep their first-seen order. Incomparable
/// scores (NaN) are treated as equal.
pub fn rank_descending<T, S, F>(items: &mut [T], score: F)
where
    S: PartialOrd,
    F: Fn(&T) -> S,
{
    items.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
}

/// Keep the first `n` entries
pub fn top_n<T>(mut ranked: Vec<T>, n: usize) -> Vec<T> {
    ranked.truncate(n);
    ranked
}

/// Rank career totals and return the best `n` with display names
pub fn rank_careers(scores: &IndexMap<String, i64>, n: usize) -> Vec<RankedCareer> {
    let mut entries: Vec<(&String, i64)> = scores.iter().map(|(slug, score)| (slug, *score)).collect();
    rank_descending(&mut entries, |(_, score)| *score);

    top_n(entries, n)
        .into_iter()
        .map(|(slug, score)| RankedCareer {
            slug: slug.clone(),
            name: display_name(slug),
            score,
        })
        .collect()
}

/// `data-scientist` -> `Data Scientist`, `b.tech` -> `B.Tech`
pub fn display_name(slug: &str) -> String {
    let mut name = String::with_capacity(slug.len());
    let mut previous_is_letter = false;

    for c in slug.replace('-', " ").chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                name.extend(c.to_lowercase());
            } else {
                name.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            name.push(c);
            previous_is_letter = false;
        }
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(entries: &[(&str, i64)]) -> IndexMap<String, i64> {
        entries.iter().map(|(s, v)| (s.to_string(), *v)).collect()
    }

    #[test]
    fn test_rank_careers_orders_by_score() {
        let scores = board(&[("cse", 10), ("me", 3), ("ce", 7)]);

        let ranked = rank_careers(&scores, 3);
        let slugs: Vec<&str> = ranked.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["cse", "ce", "me"]);

        let top_two = rank_careers(&scores, 2);
        let slugs: Vec<&str> = top_two.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["cse", "ce"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let scores = board(&[("me", 5), ("cse", 9), ("ce", 5), ("it", 5)]);
        let ranked = rank_careers(&scores, 4);
        let slugs: Vec<&str> = ranked.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["cse", "me", "ce", "it"]);
    }

    #[test]
    fn test_negative_totals_are_kept() {
        let scores = board(&[("me", -2), ("ce", -5)]);
        let ranked = rank_careers(&scores, 3);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].slug, "me");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("cse"), "Cse");
        assert_eq!(display_name("data-scientist"), "Data Scientist");
        assert_eq!(display_name("b.tech"), "B.Tech");
    }

    #[test]
    fn test_rank_descending_with_floats() {
        let mut values = vec![("a", 1.5), ("b", 4.25), ("c", 9.0), ("d", 4.25)];
        rank_descending(&mut values, |(_, v)| *v);
        let order: Vec<&str> = values.iter().map(|(k, _)| *k).collect();
        assert_eq!(order, vec!["c", "b", "d", "a"]);
    }
}
