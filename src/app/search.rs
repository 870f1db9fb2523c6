//! Search box operations.
//!
//! Each operation turns one user gesture into the store dispatches it
//! causes. Timing (the debounce) and the network lookup live elsewhere; these
//! functions only decide what changes.

use crate::app::store::Dispatch;
use crate::domain::search::resolve_selection;
use crate::domain::{SearchPopup, SearchResult};

/// Placeholder shown in an empty search input.
pub const PLACEHOLDER: &str = "Search nation, state, city...";

/// What to do once the input has been quiet for the debounce period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled {
    /// The input is blank: close the autocomplete without a lookup.
    Clear,
    /// Look up the trimmed term.
    Lookup(String),
}

/// Text typed into the input. Applied immediately, before any debounce.
#[must_use]
pub fn on_input(text: &str) -> Dispatch {
    Dispatch::SearchTermSet(text.to_string())
}

/// The latest input after the quiet period elapsed.
///
/// Whitespace-only input counts as blank since the lookup trims its term.
#[must_use]
pub fn on_settled(text: &str) -> Settled {
    let term = text.trim();
    if term.is_empty() {
        Settled::Clear
    } else {
        Settled::Lookup(term.to_string())
    }
}

/// Results of a successful lookup. An empty list closes the autocomplete.
#[must_use]
pub fn on_results(results: Vec<SearchResult>) -> Dispatch {
    Dispatch::SearchResultsSet(Some(results).filter(|r| !r.is_empty()))
}

/// Enter pressed with `selection` in the input.
///
/// Resolves the coordinates (exact name match, else the first result), then
/// sets the term, places the marker and closes the autocomplete, in that
/// order. Without results this is a no-op and returns no dispatches.
#[must_use]
pub fn on_confirm(results: Option<&[SearchResult]>, selection: &str) -> Vec<Dispatch> {
    let Some(coords) = results.and_then(|r| resolve_selection(r, selection)) else {
        return Vec::new();
    };

    vec![
        Dispatch::SearchTermSet(selection.to_string()),
        Dispatch::Marker(SearchPopup {
            coords,
            content: selection.to_string(),
        }),
        Dispatch::SearchResultsSet(None),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;

    fn result(name: &str, coordinates: [f64; 2]) -> SearchResult {
        SearchResult {
            name: name.to_string(),
            bbox: [0.0; 4],
            point: GeoPoint { coordinates },
        }
    }

    #[test]
    fn confirm_emits_term_marker_and_clear_in_order() {
        let results = vec![result("Oakland, CA", [37.8, -122.27])];

        let dispatches = on_confirm(Some(&results), "Oakland, CA");
        let kinds: Vec<&str> = dispatches.iter().map(Dispatch::kind).collect();

        assert_eq!(kinds, vec!["ui:search:term:set", "data:marker", "ui:search:results:set"]);
        match &dispatches[1] {
            Dispatch::Marker(popup) => {
                assert_eq!(popup.coords, [37.8, -122.27]);
                assert_eq!(popup.content, "Oakland, CA");
            }
            other => panic!("unexpected dispatch {other:?}"),
        }
        assert!(matches!(&dispatches[2], Dispatch::SearchResultsSet(None)));
    }

    #[test]
    fn confirm_without_match_uses_first_result() {
        let results = vec![result("Oakland, CA", [37.8, -122.27]), result("Oakland, NJ", [41.0, -74.2])];

        let dispatches = on_confirm(Some(&results), "oak");

        assert!(matches!(&dispatches[0], Dispatch::SearchTermSet(t) if t == "oak"));
        assert!(matches!(&dispatches[1], Dispatch::Marker(p) if p.coords == [37.8, -122.27] && p.content == "oak"));
    }

    #[test]
    fn confirm_without_results_is_noop() {
        assert!(on_confirm(None, "Oakland").is_empty());
        assert!(on_confirm(Some(&[]), "Oakland").is_empty());
    }

    #[test]
    fn settled_blank_input_clears() {
        assert_eq!(on_settled(""), Settled::Clear);
        assert_eq!(on_settled("   "), Settled::Clear);
        assert_eq!(on_settled(" Oakland "), Settled::Lookup("Oakland".to_string()));
    }

    #[test]
    fn empty_lookup_closes_autocomplete() {
        assert!(matches!(on_results(vec![]), Dispatch::SearchResultsSet(None)));
        assert!(matches!(on_results(vec![result("A", [1.0, 2.0])]), Dispatch::SearchResultsSet(Some(r)) if r.len() == 1));
    }
}
