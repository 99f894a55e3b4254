//! Goal analyzer
//!
//! Classifies a free-text goal into overlapping keyword signals, then
//! resolves the signals into one closed category. Pure and infallible:
//! every goal lands in a category, defaulting to General.

use tracing::debug;

const LEARNING_KEYWORDS: &[&str] = &["learn", "study", "understand"];
const DEVELOPMENT_KEYWORDS: &[&str] = &["build", "create", "develop", "make"];
const BUSINESS_KEYWORDS: &[&str] = &["launch", "start", "business", "company"];
const FITNESS_KEYWORDS: &[&str] = &["fitness", "exercise", "workout", "gym"];
const LANGUAGE_KEYWORDS: &[&str] = &["language", "speak", "learn english", "learn spanish"];
const CODING_KEYWORDS: &[&str] = &["programming", "coding", "python", "javascript"];

/// Independent keyword signals extracted from a goal
///
/// Signals are not mutually exclusive; category resolution applies a
/// fixed priority order over them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalSignals {
    pub is_learning: bool,
    pub is_development: bool,
    pub is_business: bool,
    pub is_fitness: bool,
    pub is_language: bool,
    pub is_coding: bool,
}

/// Closed set of goal categories driving fallback template selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalCategory {
    CodingLearning,
    LanguageLearning,
    Learning,
    Development,
    Business,
    Fitness,
    General,
}

fn matches_any(goal: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| goal.contains(k))
}

/// Extract keyword signals from a goal (case-insensitive substring match)
pub fn analyze_goal(goal: &str) -> GoalSignals {
    let lower = goal.to_lowercase();

    let signals = GoalSignals {
        is_learning: matches_any(&lower, LEARNING_KEYWORDS),
        is_development: matches_any(&lower, DEVELOPMENT_KEYWORDS),
        is_business: matches_any(&lower, BUSINESS_KEYWORDS),
        is_fitness: matches_any(&lower, FITNESS_KEYWORDS),
        is_language: matches_any(&lower, LANGUAGE_KEYWORDS),
        is_coding: matches_any(&lower, CODING_KEYWORDS),
    };

    debug!(?signals, "analyze_goal: extracted signals");
    signals
}

impl GoalSignals {
    /// Resolve signals into a category
    ///
    /// Priority order is load-bearing: learning+coding, then
    /// learning+language, then learning, development, business,
    /// fitness, and finally General. Changing the order changes which
    /// template a mixed goal receives.
    pub fn category(&self) -> GoalCategory {
        if self.is_learning && self.is_coding {
            GoalCategory::CodingLearning
        } else if self.is_learning && self.is_language {
            GoalCategory::LanguageLearning
        } else if self.is_learning {
            GoalCategory::Learning
        } else if self.is_development {
            GoalCategory::Development
        } else if self.is_business {
            GoalCategory::Business
        } else if self.is_fitness {
            GoalCategory::Fitness
        } else {
            GoalCategory::General
        }
    }
}

/// Convenience: analyze and resolve in one step
pub fn classify_goal(goal: &str) -> GoalCategory {
    analyze_goal(goal).category()
}
