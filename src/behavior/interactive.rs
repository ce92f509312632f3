use serde::{Deserialize, Serialize};

/// Declarative match for targets that count as interactive controls: the
/// target must start with `prefix` and, when set, contain `contains`
/// somewhere after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractivePattern {
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
}

impl InteractivePattern {
    pub fn new(prefix: &str, contains: Option<&str>) -> Self {
        Self {
            prefix: prefix.to_string(),
            contains: contains.map(ToString::to_string),
        }
    }

    pub fn matches(&self, target: &str) -> bool {
        match target.strip_prefix(self.prefix.as_str()) {
            Some(rest) => self
                .contains
                .as_deref()
                .map_or(true, |needle| rest.contains(needle)),
            None => false,
        }
    }
}

/// Buttons, inputs and the submit/login/register controls by their usual
/// id and class naming.
pub fn default_patterns() -> Vec<InteractivePattern> {
    vec![
        InteractivePattern::new("#", Some("Btn")),
        InteractivePattern::new("button", None),
        InteractivePattern::new("input", None),
        InteractivePattern::new(".btn", None),
        InteractivePattern::new("#", Some("Submit")),
        InteractivePattern::new("#", Some("Login")),
        InteractivePattern::new("#", Some("Register")),
    ]
}

pub fn is_interactive(patterns: &[InteractivePattern], target: &str) -> bool {
    patterns.iter().any(|pattern| pattern.matches(target))
}
