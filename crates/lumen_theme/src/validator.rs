//! Theme validation
//!
//! A validator is an ordered list of named rules. Each rule inspects a
//! composed theme and reports messages at its own severity. The report score
//! starts at 100 and loses 25 per error, 10 per warning and 2 per info
//! message, floored at 0.

use crate::contrast::{self, WcagLevel};
use crate::sync::RwLockExt;
use crate::theme::ComposedTheme;
use crate::tokens::ThemeTokens;
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Severity of a validation issue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    fn penalty(self) -> u32 {
        match self {
            Severity::Error => 25,
            Severity::Warning => 10,
            Severity::Info => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub rule: String,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationReport {
    pub theme: String,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub info: Vec<ValidationIssue>,
    /// 0..=100
    pub score: u8,
    pub status: ValidationStatus,
}

impl ValidationReport {
    fn from_issues(theme: &str, issues: Vec<ValidationIssue>) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut info = Vec::new();
        let mut penalty = 0u32;
        for issue in issues {
            penalty += issue.severity.penalty();
            match issue.severity {
                Severity::Error => errors.push(issue),
                Severity::Warning => warnings.push(issue),
                Severity::Info => info.push(issue),
            }
        }

        let status = if !errors.is_empty() {
            ValidationStatus::Fail
        } else if !warnings.is_empty() {
            ValidationStatus::Warn
        } else {
            ValidationStatus::Pass
        };

        Self {
            theme: theme.to_string(),
            errors,
            warnings,
            info,
            score: 100u32.saturating_sub(penalty) as u8,
            status,
        }
    }

    /// No error-level issues
    pub fn is_valid(&self) -> bool {
        self.status != ValidationStatus::Fail
    }

    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(&self.warnings).chain(&self.info)
    }
}

type Check = dyn Fn(&ComposedTheme) -> Vec<String> + Send + Sync;

/// A named check; every returned message becomes an issue at `severity`
#[derive(Clone)]
pub struct ValidationRule {
    name: String,
    severity: Severity,
    check: Arc<Check>,
}

impl ValidationRule {
    pub fn new<F>(name: impl Into<String>, severity: Severity, check: F) -> Self
    where
        F: Fn(&ComposedTheme) -> Vec<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            severity,
            check: Arc::new(check),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("name", &self.name)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

/// Ordered set of validation rules
pub struct ThemeValidator {
    rules: RwLock<Vec<ValidationRule>>,
}

impl ThemeValidator {
    /// Validator with no rules
    pub fn empty() -> Self {
        Self {
            rules: RwLock::new(Vec::new()),
        }
    }

    /// Add a rule, replacing any rule with the same name in place
    pub fn add_rule(&self, rule: ValidationRule) {
        let mut rules = self.rules.write_guard();
        match rules.iter().position(|r| r.name == rule.name) {
            Some(index) => rules[index] = rule,
            None => rules.push(rule),
        }
    }

    pub fn remove_rule(&self, name: &str) -> bool {
        let mut rules = self.rules.write_guard();
        let before = rules.len();
        rules.retain(|r| r.name != name);
        rules.len() != before
    }

    pub fn rule_names(&self) -> Vec<String> {
        self.rules.read_guard().iter().map(|r| r.name.clone()).collect()
    }

    pub fn validate(&self, theme: &ComposedTheme) -> ValidationReport {
        let rules = self.rules.read_guard().clone();
        let issues = rules
            .iter()
            .flat_map(|rule| {
                (rule.check)(theme)
                    .into_iter()
                    .map(move |message| ValidationIssue {
                        rule: rule.name.clone(),
                        severity: rule.severity,
                        message,
                    })
            })
            .collect();
        let report = ValidationReport::from_issues(&theme.name, issues);
        debug!(
            theme = %theme.name,
            score = report.score,
            status = ?report.status,
            "validated theme"
        );
        report
    }
}

impl Default for ThemeValidator {
    fn default() -> Self {
        let validator = Self::empty();
        validator.add_rule(ValidationRule::new(
            "token-completeness",
            Severity::Error,
            |theme| token_completeness(&theme.tokens),
        ));
        validator.add_rule(ValidationRule::new("color-format", Severity::Error, |theme| {
            color_format(&theme.tokens)
        }));
        validator.add_rule(ValidationRule::new("scale-order", Severity::Warning, |theme| {
            scale_order(&theme.tokens)
        }));
        validator.add_rule(ValidationRule::new("contrast", Severity::Warning, |theme| {
            contrast::audit(&theme.tokens.colors, WcagLevel::Aa)
                .failures()
                .map(|check| {
                    format!(
                        "{} on {} is {:.2}:1 ({}), needs {}",
                        check.foreground,
                        check.background,
                        check.report.ratio,
                        check.report.level,
                        WcagLevel::Aa
                    )
                })
                .collect()
        }));
        validator
    }
}

/// Values that are present but unusable: empty strings, non-finite or
/// negative sizes, out-of-range weights
fn token_completeness(tokens: &ThemeTokens) -> Vec<String> {
    let mut issues = Vec::new();
    for (key, family) in tokens.font_families.iter() {
        if family.trim().is_empty() {
            issues.push(format!("font-families.{key} is empty"));
        }
    }
    for (key, easing) in tokens.easings.iter() {
        if easing.trim().is_empty() {
            issues.push(format!("easings.{key} is empty"));
        }
    }
    for (key, weight) in tokens.font_weights.iter() {
        if !(1..=1000).contains(weight) {
            issues.push(format!("font-weights.{key} = {weight} is outside 1..=1000"));
        }
    }

    let mut positive = |category: &str, key: String, value: f32, allow_zero: bool| {
        let ok = value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0));
        if !ok {
            issues.push(format!("{category}.{key} = {value} is not a valid size"));
        }
    };
    for (key, v) in tokens.font_sizes.iter() {
        positive("font-sizes", key.to_string(), *v, false);
    }
    for (key, v) in tokens.line_heights.iter() {
        positive("line-heights", key.to_string(), *v, false);
    }
    for (key, v) in tokens.spacing.iter() {
        positive("spacing", key.to_string(), *v, true);
    }
    for (key, v) in tokens.radii.iter() {
        positive("radii", key.to_string(), *v, true);
    }
    for (key, v) in tokens.borders.iter() {
        positive("borders", key.to_string(), *v, true);
    }
    for (key, v) in tokens.sizes.iter() {
        positive("sizes", key.to_string(), *v, false);
    }
    issues
}

fn color_format(tokens: &ThemeTokens) -> Vec<String> {
    tokens
        .colors
        .iter()
        .filter(|(_, color)| !color.is_normalized())
        .map(|(key, color)| format!("colors.{key} has out-of-range channels ({color:?})"))
        .collect()
}

/// Scales must not shrink from one step to the next
fn scale_order(tokens: &ThemeTokens) -> Vec<String> {
    fn check<K: fmt::Display, V: PartialOrd + fmt::Display>(
        category: &str,
        entries: impl Iterator<Item = (K, V)>,
        issues: &mut Vec<String>,
    ) {
        let mut previous: Option<(K, V)> = None;
        for (key, value) in entries {
            if let Some((prev_key, prev_value)) = &previous {
                if value < *prev_value {
                    issues.push(format!(
                        "{category}.{key} ({value}) is smaller than {category}.{prev_key} ({prev_value})"
                    ));
                }
            }
            previous = Some((key, value));
        }
    }

    let mut issues = Vec::new();
    check("spacing", tokens.spacing.iter().map(|(k, v)| (k, *v)), &mut issues);
    check("font-sizes", tokens.font_sizes.iter().map(|(k, v)| (k, *v)), &mut issues);
    check("font-weights", tokens.font_weights.iter().map(|(k, v)| (k, *v)), &mut issues);
    check("breakpoints", tokens.breakpoints.iter().map(|(k, v)| (k, *v)), &mut issues);
    check("durations", tokens.durations.iter().map(|(k, v)| (k, *v)), &mut issues);
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::theme::ThemeConfig;
    use crate::tokens::TokenOverrides;
    use crate::ThemeComposer;
    use pretty_assertions::assert_eq;

    fn light() -> ComposedTheme {
        let composer = ThemeComposer::new();
        composer.register_theme(ThemeConfig::new("light")).unwrap();
        composer.compose("light", &TokenOverrides::default()).unwrap()
    }

    #[test]
    fn default_rules() {
        assert_eq!(
            ThemeValidator::default().rule_names(),
            vec!["token-completeness", "color-format", "scale-order", "contrast"]
        );
    }

    #[test]
    fn defaults_pass_cleanly() {
        let report = ThemeValidator::default().validate(&light());
        assert_eq!(report.status, ValidationStatus::Pass, "{:?}", report.warnings);
        assert_eq!(report.score, 100);
        assert!(report.is_valid());
    }

    #[test]
    fn low_contrast_is_a_warning() {
        let mut theme = light();
        theme.tokens.colors.text_primary = Color::from_hex(0xDDDDDD);
        let report = ThemeValidator::default().validate(&theme);
        assert_eq!(report.status, ValidationStatus::Warn);
        // text-primary on background and on surface
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.score, 80);
        assert!(report.is_valid());
    }

    #[test]
    fn broken_values_fail() {
        let mut theme = light();
        theme.tokens.colors.primary = Color::new(1.5, 0.0, 0.0, 1.0);
        theme.tokens.font_families.sans = String::new();
        let report = ThemeValidator::default().validate(&theme);
        assert_eq!(report.status, ValidationStatus::Fail);
        assert_eq!(report.errors.len(), 2);
        assert!(!report.is_valid());
    }

    #[test]
    fn scale_inversions_warn() {
        let mut theme = light();
        theme.tokens.spacing.space_8 = 4.0;
        let report = ThemeValidator::default().validate(&theme);
        assert_eq!(report.status, ValidationStatus::Warn);
        assert!(report.warnings.iter().all(|w| w.rule == "scale-order"));
    }

    #[test]
    fn score_floors_at_zero() {
        let validator = ThemeValidator::empty();
        validator.add_rule(ValidationRule::new("noisy", Severity::Error, |_| {
            (0..5).map(|i| format!("problem {i}")).collect()
        }));
        let report = validator.validate(&light());
        assert_eq!(report.score, 0);
    }

    #[test]
    fn rules_replace_and_remove_by_name() {
        let validator = ThemeValidator::default();
        validator.add_rule(ValidationRule::new("contrast", Severity::Info, |_| {
            vec!["always".to_string()]
        }));
        assert_eq!(validator.rule_names().len(), 4);
        let report = validator.validate(&light());
        assert_eq!(report.info.len(), 1);
        assert_eq!(report.score, 98);

        assert!(validator.remove_rule("contrast"));
        assert!(!validator.remove_rule("contrast"));
        assert_eq!(validator.rule_names().len(), 3);
    }
}
