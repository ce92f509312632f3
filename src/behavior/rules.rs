use crate::types::telemetry::{BehavioralMetrics, MetricKind};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_FALLBACK_TAG: &str = "Normal";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparison {
    /// NaN never satisfies a comparison.
    pub fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::Gt => value > threshold,
            Comparison::Gte => value >= threshold,
            Comparison::Lt => value < threshold,
            Comparison::Lte => value <= threshold,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::Gt => ">",
            Comparison::Gte => ">=",
            Comparison::Lt => "<",
            Comparison::Lte => "<=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub metric: MetricKind,
    pub op: Comparison,
    pub value: f64,
}

impl Condition {
    pub const fn new(metric: MetricKind, op: Comparison, value: f64) -> Self {
        Self { metric, op, value }
    }

    pub fn holds(&self, metrics: &BehavioralMetrics) -> bool {
        self.op.holds(metrics.value(self.metric), self.value)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.metric, self.op.symbol(), self.value)
    }
}

/// A tag and the conjunction of threshold conditions that assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRule {
    pub tag: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub when: Vec<Condition>,
}

impl TagRule {
    pub fn new(tag: &str, description: &str, when: Vec<Condition>) -> Self {
        Self {
            tag: tag.to_string(),
            description: description.to_string(),
            when,
        }
    }

    /// A rule without conditions never fires.
    pub fn matches(&self, metrics: &BehavioralMetrics) -> bool {
        !self.when.is_empty() && self.when.iter().all(|condition| condition.holds(metrics))
    }
}

/// Static rule table plus the tag emitted when nothing matches. Every
/// matching rule contributes its tag; rules do not shadow each other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSet {
    pub rules: Vec<TagRule>,
    pub fallback: String,
}

impl RuleSet {
    pub fn new(rules: Vec<TagRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// Tags in table order, without duplicates. Never empty.
    pub fn evaluate(&self, metrics: &BehavioralMetrics) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for rule in self.rules.iter().filter(|rule| rule.matches(metrics)) {
            if !tags.contains(&rule.tag) {
                tags.push(rule.tag.clone());
            }
        }
        if tags.is_empty() {
            tags.push(self.fallback.clone());
        }
        tags
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::new(default_rules(), DEFAULT_FALLBACK_TAG)
    }
}

pub fn default_rules() -> Vec<TagRule> {
    use Comparison::{Gt, Lt};
    use MetricKind::*;

    vec![
        TagRule::new(
            "Hesitant",
            "long hover-to-click gaps with indirect pointer paths",
            vec![
                Condition::new(Hesitation, Gt, 5.0),
                Condition::new(MovementEfficiency, Lt, 0.6),
            ],
        ),
        TagRule::new(
            "Impulsive",
            "quick decisions with little dwell",
            vec![
                Condition::new(Hesitation, Lt, 2.0),
                Condition::new(DecisionEfficiency, Gt, 0.8),
            ],
        ),
        TagRule::new(
            "Analytical",
            "broad exploration under sustained load",
            vec![
                Condition::new(InteractionComplexity, Gt, 0.7),
                Condition::new(CognitiveLoad, Gt, 0.6),
            ],
        ),
        TagRule::new(
            "Efficient",
            "direct movement and fast decisions",
            vec![
                Condition::new(MovementEfficiency, Gt, 0.8),
                Condition::new(DecisionEfficiency, Gt, 0.7),
            ],
        ),
        TagRule::new(
            "Confused",
            "high load with erratic pointer headings",
            vec![
                Condition::new(CognitiveLoad, Gt, 0.8),
                Condition::new(DirectionChanges, Gt, 10.0),
            ],
        ),
        TagRule::new(
            "Methodical",
            "continuous sessions with regular timing",
            vec![
                Condition::new(SessionFragmentation, Lt, 0.2),
                Condition::new(ActionRhythm, Gt, 0.7),
            ],
        ),
    ]
}
