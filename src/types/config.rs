use crate::behavior::interactive::InteractivePattern;
use crate::behavior::rules::{RuleSet, TagRule, DEFAULT_FALLBACK_TAG};
use crate::behavior::AnalyzerSettings;
use crate::error::EcoError;
use crate::scoring::TierThresholds;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EcoConfig {
    pub scoring: Option<ScoringConfig>,
    pub telemetry: Option<TelemetryConfig>,
    pub tags: Option<TagsConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    pub eco_warrior_min: Option<u8>,
    pub eco_neutral_min: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TelemetryConfig {
    pub fragmentation_gap_ms: Option<i64>,
    pub rapid_repeat_ms: Option<i64>,
    pub decision_window_ms: Option<i64>,
    pub lookback_minutes: Option<u32>,
    pub interactive: Option<Vec<InteractivePattern>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagsConfig {
    pub fallback: Option<String>,
    pub rules: Option<Vec<TagRule>>,
}

impl EcoConfig {
    pub fn tier_thresholds(&self) -> TierThresholds {
        let defaults = TierThresholds::default();
        match &self.scoring {
            Some(scoring) => TierThresholds {
                eco_warrior_min: scoring.eco_warrior_min.unwrap_or(defaults.eco_warrior_min),
                eco_neutral_min: scoring.eco_neutral_min.unwrap_or(defaults.eco_neutral_min),
            },
            None => defaults,
        }
    }

    pub fn analyzer_settings(&self) -> AnalyzerSettings {
        let defaults = AnalyzerSettings::default();
        match &self.telemetry {
            Some(telemetry) => AnalyzerSettings {
                interactive: telemetry
                    .interactive
                    .clone()
                    .unwrap_or(defaults.interactive),
                fragmentation_gap_ms: telemetry
                    .fragmentation_gap_ms
                    .unwrap_or(defaults.fragmentation_gap_ms),
                rapid_repeat_ms: telemetry.rapid_repeat_ms.unwrap_or(defaults.rapid_repeat_ms),
                decision_window_ms: telemetry
                    .decision_window_ms
                    .unwrap_or(defaults.decision_window_ms),
            },
            None => defaults,
        }
    }

    pub fn rule_set(&self) -> RuleSet {
        let defaults = RuleSet::default();
        match &self.tags {
            Some(tags) => RuleSet::new(
                tags.rules.clone().unwrap_or(defaults.rules),
                tags.fallback
                    .clone()
                    .unwrap_or_else(|| DEFAULT_FALLBACK_TAG.to_string()),
            ),
            None => defaults,
        }
    }

    /// Default window for profile refreshes when the caller gives no start.
    pub fn lookback_minutes(&self) -> Option<u32> {
        self.telemetry
            .as_ref()
            .and_then(|telemetry| telemetry.lookback_minutes)
    }

    pub fn validate(&self) -> Result<(), EcoError> {
        let thresholds = self.tier_thresholds();
        if thresholds.eco_warrior_min > 100 {
            return Err(EcoError::ConfigParse(
                "scoring.eco_warrior_min must be between 0 and 100".to_string(),
            ));
        }
        if thresholds.eco_neutral_min > thresholds.eco_warrior_min {
            return Err(EcoError::ConfigParse(format!(
                "scoring.eco_neutral_min ({}) cannot exceed scoring.eco_warrior_min ({})",
                thresholds.eco_neutral_min, thresholds.eco_warrior_min
            )));
        }

        if let Some(telemetry) = &self.telemetry {
            for (key, value) in [
                ("fragmentation_gap_ms", telemetry.fragmentation_gap_ms),
                ("rapid_repeat_ms", telemetry.rapid_repeat_ms),
                ("decision_window_ms", telemetry.decision_window_ms),
            ] {
                if let Some(value) = value {
                    if value <= 0 {
                        return Err(EcoError::ConfigParse(format!(
                            "telemetry.{key} must be greater than 0"
                        )));
                    }
                }
            }
            if telemetry.lookback_minutes == Some(0) {
                return Err(EcoError::ConfigParse(
                    "telemetry.lookback_minutes must be greater than 0".to_string(),
                ));
            }
            if let Some(patterns) = &telemetry.interactive {
                if patterns.iter().any(|pattern| pattern.prefix.is_empty()) {
                    return Err(EcoError::ConfigParse(
                        "telemetry.interactive entries need a non-empty prefix".to_string(),
                    ));
                }
            }
        }

        if let Some(tags) = &self.tags {
            if let Some(fallback) = &tags.fallback {
                if fallback.trim().is_empty() {
                    return Err(EcoError::ConfigParse(
                        "tags.fallback must be a non-empty tag".to_string(),
                    ));
                }
            }
            if let Some(rules) = &tags.rules {
                validate_rules(rules)?;
            }
        }

        Ok(())
    }
}

fn validate_rules(rules: &[TagRule]) -> Result<(), EcoError> {
    let mut seen = HashSet::new();
    for rule in rules {
        let tag = rule.tag.trim();
        if tag.is_empty() {
            return Err(EcoError::ConfigParse(
                "tags.rules entries must have a non-empty tag".to_string(),
            ));
        }
        if !seen.insert(tag.to_string()) {
            return Err(EcoError::ConfigParse(format!(
                "tags.rules contains duplicate tag: {tag}"
            )));
        }
        if rule.when.is_empty() {
            return Err(EcoError::ConfigParse(format!(
                "tags.rules '{tag}' needs at least one condition"
            )));
        }
        if let Some(condition) = rule.when.iter().find(|condition| !condition.value.is_finite()) {
            return Err(EcoError::ConfigParse(format!(
                "tags.rules '{tag}' has a non-finite threshold for {}",
                condition.metric
            )));
        }
    }
    Ok(())
}
