use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::provider::{ProviderId, ServiceName};

/// Finds the registered service that most resembles `query`.
///
/// One name must fuzzily contain the other, and the contained name must be at
/// least half as long as the containing one.
pub(super) fn closest<'a, I>(query: &str, candidates: I) -> Option<(&'a ServiceName, &'a ProviderId)>
where
    I: IntoIterator<Item = (&'a ServiceName, &'a ProviderId)>,
{
    let matcher = SkimMatcherV2::default().ignore_case();
    let mut best: Option<(i64, (&ServiceName, &ProviderId))> = None;
    for (service, provider) in candidates {
        let Some(rank) = score(&matcher, query, service.as_str()) else {
            continue;
        };
        if best.map_or(true, |(top, _)| rank > top) {
            best = Some((rank, (service, provider)));
        }
    }
    best.map(|(_, hit)| hit)
}

fn score(matcher: &SkimMatcherV2, query: &str, candidate: &str) -> Option<i64> {
    let forward = (query.len() * 2 >= candidate.len())
        .then(|| matcher.fuzzy_match(candidate, query))
        .flatten();
    let backward = (candidate.len() * 2 >= query.len())
        .then(|| matcher.fuzzy_match(query, candidate))
        .flatten();
    forward.max(backward)
}
