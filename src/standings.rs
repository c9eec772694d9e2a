//! Standings fetch: event slug extraction and the Top-8 GraphQL query.
//!
//! One POST against the bracket service's GraphQL endpoint, bearer-token
//! auth, first page only, up to 8 standings nodes. No retry, no pagination.

use serde::Deserialize;

use crate::error::{Error, Result};

// ============================================================================
// Slug Extraction
// ============================================================================

/// Marker separating the hosting domain from the event slug in pasted URLs.
const DOMAIN_MARKER: &str = "start.gg/";
const OVERVIEW_SUFFIX: &str = "/overview";

/// Extracts the canonical event slug from a pasted URL or raw slug.
///
/// If the input contains the hosting domain marker, the substring after it
/// is taken, truncated before an `/overview` suffix if present. Inputs
/// without the marker are assumed to already be bare slug paths and are
/// returned unchanged.
pub fn extract_slug(input: &str) -> &str {
    let Some(pos) = input.find(DOMAIN_MARKER) else {
        return input;
    };
    let rest = &input[pos + DOMAIN_MARKER.len()..];
    match rest.find(OVERVIEW_SUFFIX) {
        Some(end) => &rest[..end],
        None => rest,
    }
}

// ============================================================================
// Standings Data
// ============================================================================

/// One ranked entrant record from the standings query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandingEntry {
    /// Final placement, 1-based.
    pub placement: u32,

    /// The entrant's display name as the bracket service reports it.
    pub entrant_name: String,
}

const STANDINGS_QUERY: &str = "\
query EventStandings($slug: String!) {
  event(slug: $slug) {
    standings(query: { perPage: 8, page: 1 }) {
      nodes {
        placement
        entrant { name }
      }
    }
  }
}";

#[derive(Deserialize)]
struct GqlResponse {
    data: Option<GqlData>,
}

#[derive(Deserialize)]
struct GqlData {
    event: Option<GqlEvent>,
}

#[derive(Deserialize)]
struct GqlEvent {
    standings: Option<GqlStandings>,
}

#[derive(Deserialize)]
struct GqlStandings {
    nodes: Vec<GqlNode>,
}

#[derive(Deserialize)]
struct GqlNode {
    placement: u32,
    entrant: Option<GqlEntrant>,
}

#[derive(Deserialize)]
struct GqlEntrant {
    name: String,
}

// ============================================================================
// StandingsClient
// ============================================================================

const DEFAULT_ENDPOINT: &str = "https://api.start.gg/gql/alpha";

/// Client for the bracket service's GraphQL API.
pub struct StandingsClient {
    token: String,
    endpoint: String,
}

impl StandingsClient {
    /// Creates a client with the given bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Creates a client from the `STARTGG_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("STARTGG_API_KEY")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(Error::MissingApiKey("standings"))?;
        Ok(Self::new(token))
    }

    /// Overrides the endpoint URL. Intended for tests.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Fetches up to 8 ranked entrants for the event at `event_url`.
    ///
    /// Accepts either a full URL or a bare slug. The returned list is in the
    /// order the service reports and may be empty for events without
    /// finalized standings.
    pub fn top8(&self, event_url: &str) -> Result<Vec<StandingEntry>> {
        if self.token.trim().is_empty() {
            return Err(Error::MissingApiKey("standings"));
        }

        let slug = extract_slug(event_url);
        log::info!("fetching standings for {slug}");

        let body = serde_json::json!({
            "query": STANDINGS_QUERY,
            "variables": { "slug": slug },
        });

        let response = ureq::post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.token))
            .send_json(body);

        let response = match response {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, resp)) => {
                let message = resp
                    .into_string()
                    .unwrap_or_else(|_| "unreadable error body".to_string());
                return Err(Error::Api {
                    service: "standings",
                    status,
                    message,
                });
            }
            Err(err) => return Err(err.into()),
        };

        let parsed: GqlResponse = response
            .into_json()
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;
        parse_standings(parsed)
    }
}

/// Flattens the GraphQL response envelope into standing entries.
///
/// A missing event is an input error (bad slug); an event with no standings
/// yields an empty list rather than an error.
fn parse_standings(response: GqlResponse) -> Result<Vec<StandingEntry>> {
    let event = response
        .data
        .and_then(|d| d.event)
        .ok_or_else(|| Error::MalformedResponse("no event for that slug".to_string()))?;

    let nodes = match event.standings {
        Some(standings) => standings.nodes,
        None => Vec::new(),
    };

    Ok(nodes
        .into_iter()
        .map(|node| StandingEntry {
            placement: node.placement,
            entrant_name: node.entrant.map(|e| e.name).unwrap_or_default(),
        })
        .collect())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_from_full_url() {
        assert_eq!(
            extract_slug("https://start.gg/tournament/foo/event/bar/overview"),
            "tournament/foo/event/bar"
        );
    }

    #[test]
    fn slug_from_url_without_overview() {
        assert_eq!(
            extract_slug("https://www.start.gg/tournament/foo/event/bar"),
            "tournament/foo/event/bar"
        );
    }

    #[test]
    fn bare_slug_passes_through() {
        assert_eq!(
            extract_slug("tournament/foo/event/bar"),
            "tournament/foo/event/bar"
        );
    }

    #[test]
    fn empty_token_fails_before_any_call() {
        let client = StandingsClient::new("").with_endpoint("http://127.0.0.1:1/unused");
        let err = client.top8("tournament/foo/event/bar").unwrap_err();
        assert!(matches!(err, Error::MissingApiKey(_)));
    }

    #[test]
    fn parse_full_response() {
        let json = serde_json::json!({
            "data": { "event": { "standings": { "nodes": [
                { "placement": 1, "entrant": { "name": "Alpha" } },
                { "placement": 2, "entrant": { "name": "Beta" } },
            ]}}}
        });
        let parsed: GqlResponse = serde_json::from_value(json).unwrap();
        let entries = parse_standings(parsed).unwrap();
        assert_eq!(
            entries,
            vec![
                StandingEntry { placement: 1, entrant_name: "Alpha".into() },
                StandingEntry { placement: 2, entrant_name: "Beta".into() },
            ]
        );
    }

    #[test]
    fn parse_missing_event_is_an_error() {
        let json = serde_json::json!({ "data": { "event": null } });
        let parsed: GqlResponse = serde_json::from_value(json).unwrap();
        assert!(matches!(
            parse_standings(parsed),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn parse_event_without_standings_is_empty() {
        let json = serde_json::json!({ "data": { "event": { "standings": null } } });
        let parsed: GqlResponse = serde_json::from_value(json).unwrap();
        assert_eq!(parse_standings(parsed).unwrap(), Vec::new());
    }
}
