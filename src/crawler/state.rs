/// Crawl state definitions
///
/// A crawl walks `Start -> IndexFetched -> CandidatesDiscovered`, then loops
/// over candidates (`CandidateFetched -> CandidateExtracted -> CandidateProbed`)
/// and ends in `Assembled` or `Failed`.
use std::fmt;

/// Represents the current state of a theme crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Nothing requested yet
    Start,

    /// Index page body is available
    IndexFetched,

    /// Candidate theme directories are known
    CandidatesDiscovered,

    /// A candidate's stylesheet was fetched
    CandidateFetched,

    /// A candidate's headers were extracted
    CandidateExtracted,

    /// A candidate's screenshot was probed
    CandidateProbed,

    /// At least one theme was assembled
    Assembled,

    /// The crawl ended with an error
    Failed,
}

impl CrawlState {
    /// Returns true if no further transition is possible
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Assembled | Self::Failed)
    }

    /// Returns true if moving to `next` follows the crawl state machine
    ///
    /// Any non-terminal state may fail.
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        use CrawlState::*;

        if next == Failed {
            return !self.is_terminal();
        }

        matches!(
            (self, next),
            (Start, IndexFetched)
                | (IndexFetched, CandidatesDiscovered)
                | (CandidatesDiscovered, CandidateFetched)
                | (CandidateFetched, CandidateExtracted)
                // a bundled stylesheet skips straight to the next candidate
                | (CandidateFetched, CandidateFetched)
                | (CandidateFetched, Assembled)
                | (CandidateExtracted, CandidateProbed)
                | (CandidateProbed, CandidateFetched)
                | (CandidateProbed, Assembled)
        )
    }

    /// Short lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::IndexFetched => "index_fetched",
            Self::CandidatesDiscovered => "candidates_discovered",
            Self::CandidateFetched => "candidate_fetched",
            Self::CandidateExtracted => "candidate_extracted",
            Self::CandidateProbed => "candidate_probed",
            Self::Assembled => "assembled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let path = [
            CrawlState::Start,
            CrawlState::IndexFetched,
            CrawlState::CandidatesDiscovered,
            CrawlState::CandidateFetched,
            CrawlState::CandidateExtracted,
            CrawlState::CandidateProbed,
            CrawlState::CandidateFetched,
            CrawlState::CandidateExtracted,
            CrawlState::CandidateProbed,
            CrawlState::Assembled,
        ];

        for pair in path.windows(2) {
            assert!(
                pair[0].can_transition_to(pair[1]),
                "{} -> {} should be allowed",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_skipped_candidate_transition() {
        assert!(CrawlState::CandidateFetched.can_transition_to(CrawlState::CandidateFetched));
        assert!(CrawlState::CandidateFetched.can_transition_to(CrawlState::Assembled));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!CrawlState::Start.can_transition_to(CrawlState::CandidatesDiscovered));
        assert!(!CrawlState::IndexFetched.can_transition_to(CrawlState::Assembled));
        assert!(!CrawlState::CandidatesDiscovered.can_transition_to(CrawlState::Assembled));
        assert!(!CrawlState::CandidateExtracted.can_transition_to(CrawlState::Assembled));
        assert!(!CrawlState::Assembled.can_transition_to(CrawlState::Start));
    }

    #[test]
    fn test_failure_from_any_active_state() {
        assert!(CrawlState::Start.can_transition_to(CrawlState::Failed));
        assert!(CrawlState::CandidateProbed.can_transition_to(CrawlState::Failed));
        assert!(!CrawlState::Assembled.can_transition_to(CrawlState::Failed));
        assert!(!CrawlState::Failed.can_transition_to(CrawlState::Failed));
    }

    #[test]
    fn test_terminal_states() {
        assert!(CrawlState::Assembled.is_terminal());
        assert!(CrawlState::Failed.is_terminal());
        assert!(!CrawlState::Start.is_terminal());
    }
}
