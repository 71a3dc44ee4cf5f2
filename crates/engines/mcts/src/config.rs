//! User-settable search configuration.
//!
//! A configuration can be loaded from TOML, and each knob can be set by
//! name through the line protocol (`setoption name <N> value <V>`).
//!
//! ```toml
//! time_control = true
//! num_sims = 400
//! best_move = "q_value"
//! policy_enhancements = ["dirichlet", "dropping_moves"]
//! eval_features = ["material", "king_safety"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zh_classical::{EvalFeature, EvalFeatures};

use crate::enhance::PolicyEnhancement;
use crate::strategy::{BackpropStrategy, BestMoveStrategy, ExpansionStrategy};

pub const MIN_SIMS: u32 = 1;
pub const MAX_SIMS: u32 = 10_000;
pub const DEFAULT_SIMS: u32 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Search configuration. Missing TOML fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    /// Search on a time budget instead of a fixed simulation count
    pub time_control: bool,
    /// Drop the time budget while the low-time profile is active
    pub variable_time_control: bool,
    pub num_sims: u32,
    pub best_move: BestMoveStrategy,
    pub expansion: ExpansionStrategy,
    pub backprop: BackpropStrategy,
    pub eval_features: Vec<EvalFeature>,
    pub policy_enhancements: Vec<PolicyEnhancement>,
    /// Swap in the `ts_*` settings when the clock runs low
    pub time_saving_profile: bool,
    pub ts_eval_features: Vec<EvalFeature>,
    pub ts_policy_enhancements: Vec<PolicyEnhancement>,
    #[serde(skip)]
    changed: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            time_control: true,
            variable_time_control: false,
            num_sims: DEFAULT_SIMS,
            best_move: BestMoveStrategy::default(),
            expansion: ExpansionStrategy::default(),
            backprop: BackpropStrategy::default(),
            eval_features: Vec::new(),
            policy_enhancements: vec![PolicyEnhancement::Dirichlet],
            time_saving_profile: false,
            ts_eval_features: Vec::new(),
            ts_policy_enhancements: vec![PolicyEnhancement::Dirichlet],
            changed: false,
        }
    }
}

impl MctsConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let mut config: MctsConfig = toml::from_str(text)?;
        if !(MIN_SIMS..=MAX_SIMS).contains(&config.num_sims) {
            return Err(ConfigError::InvalidValue {
                name: "num_sims".to_string(),
                value: config.num_sims.to_string(),
            });
        }
        for list in [
            &mut config.policy_enhancements,
            &mut config.ts_policy_enhancements,
        ] {
            list.sort();
            list.dedup();
        }
        for list in [&mut config.eval_features, &mut config.ts_eval_features] {
            list.sort();
            list.dedup();
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Whether a `set_option` succeeded since the last [`MctsConfig::mark_applied`].
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn mark_applied(&mut self) {
        self.changed = false;
    }

    pub fn eval_mask(&self) -> EvalFeatures {
        self.eval_features.iter().collect()
    }

    pub fn ts_eval_mask(&self) -> EvalFeatures {
        self.ts_eval_features.iter().collect()
    }

    /// Apply one protocol option. On error the configuration is untouched.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };
        let lower = name.to_ascii_lowercase();

        match lower.as_str() {
            "uci_variant" => return Ok(()),
            "timecontrol" => {
                let (on, variable) = match value.to_ascii_lowercase().as_str() {
                    "default" => (true, false),
                    "variable" => (true, true),
                    "none" => (false, false),
                    _ => return Err(invalid()),
                };
                self.time_control = on;
                self.variable_time_control = variable;
            }
            "simulations/move" => {
                let sims: u32 = value.trim().parse().map_err(|_| invalid())?;
                if !(MIN_SIMS..=MAX_SIMS).contains(&sims) {
                    return Err(invalid());
                }
                self.num_sims = sims;
            }
            "bestmovestrategy" => {
                self.best_move = match value.to_ascii_lowercase().as_str() {
                    "default" => BestMoveStrategy::Visits,
                    "q-value" => BestMoveStrategy::QValue,
                    _ => return Err(invalid()),
                };
            }
            "nodeexpansionstrategy" => {
                self.expansion = match value.to_ascii_lowercase().as_str() {
                    "default" => ExpansionStrategy::Puct,
                    "exploration" => ExpansionStrategy::Exploration,
                    _ => return Err(invalid()),
                };
            }
            "backpropstrategy" => {
                self.backprop = match value.to_ascii_lowercase().as_str() {
                    "default" => BackpropStrategy::Average,
                    "sma" => BackpropStrategy::Sma,
                    _ => return Err(invalid()),
                };
            }
            "timesavingconfig" => {
                self.time_saving_profile = parse_check(value).ok_or_else(invalid)?;
            }
            _ => {
                let (time_saving, rest) = match lower.strip_prefix("ts_") {
                    Some(rest) => (true, rest),
                    None => (false, lower.as_str()),
                };
                if let Some(suffix) = rest.strip_prefix("pe_") {
                    let kind = PolicyEnhancement::from_option_name(suffix)
                        .ok_or_else(|| ConfigError::UnknownOption(name.to_string()))?;
                    let on = parse_check(value).ok_or_else(invalid)?;
                    let list = if time_saving {
                        &mut self.ts_policy_enhancements
                    } else {
                        &mut self.policy_enhancements
                    };
                    toggle(list, kind, on);
                } else if let Some(suffix) = rest.strip_prefix("eval_") {
                    let feature = EvalFeature::from_option_name(suffix)
                        .ok_or_else(|| ConfigError::UnknownOption(name.to_string()))?;
                    let on = parse_check(value).ok_or_else(invalid)?;
                    let list = if time_saving {
                        &mut self.ts_eval_features
                    } else {
                        &mut self.eval_features
                    };
                    toggle(list, feature, on);
                } else {
                    return Err(ConfigError::UnknownOption(name.to_string()));
                }
            }
        }

        self.changed = true;
        Ok(())
    }

    /// `option name ...` declarations announcing every option with its
    /// current value as the default.
    pub fn option_lines(&self) -> Vec<String> {
        let time_control = match (self.time_control, self.variable_time_control) {
            (false, _) => "None",
            (true, false) => "Default",
            (true, true) => "Variable",
        };
        let best_move = match self.best_move {
            BestMoveStrategy::Visits => "Default",
            BestMoveStrategy::QValue => "Q-value",
        };
        let expansion = match self.expansion {
            ExpansionStrategy::Puct => "Default",
            ExpansionStrategy::Exploration => "Exploration",
        };
        let backprop = match self.backprop {
            BackpropStrategy::Average => "Default",
            BackpropStrategy::Sma => "SMA",
        };

        let mut lines = vec![
            "option name UCI_Variant type combo default crazyhouse var crazyhouse".to_string(),
            format!(
                "option name TimeControl type combo default {time_control} var Default var Variable var None"
            ),
            format!(
                "option name Simulations/Move type spin default {} min {MIN_SIMS} max {MAX_SIMS}",
                self.num_sims
            ),
            format!("option name BestMoveStrategy type combo default {best_move} var Default var Q-value"),
            format!(
                "option name NodeExpansionStrategy type combo default {expansion} var Default var Exploration"
            ),
            format!("option name BackpropStrategy type combo default {backprop} var Default var SMA"),
        ];

        let checks = |prefix: &str, pe: &[PolicyEnhancement], ev: &[EvalFeature]| {
            let pe_lines = PolicyEnhancement::ALL.into_iter().map(move |kind| {
                (format!("{prefix}PE_{}", kind.option_name()), pe.contains(&kind))
            });
            let ev_lines = EvalFeature::ALL.into_iter().map(move |feature| {
                (format!("{prefix}Eval_{}", feature.option_name()), ev.contains(&feature))
            });
            pe_lines
                .chain(ev_lines)
                .map(|(name, on)| format!("option name {name} type check default {on}"))
                .collect::<Vec<_>>()
        };

        lines.extend(checks("", &self.policy_enhancements, &self.eval_features));
        lines.push(format!(
            "option name TimeSavingConfig type check default {}",
            self.time_saving_profile
        ));
        lines.extend(checks(
            "TS_",
            &self.ts_policy_enhancements,
            &self.ts_eval_features,
        ));
        lines
    }
}

fn parse_check(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Add or remove `item`, keeping the list sorted and free of duplicates.
fn toggle<T: Ord + Copy>(list: &mut Vec<T>, item: T, on: bool) {
    if on {
        if !list.contains(&item) {
            list.push(item);
            list.sort();
        }
    } else {
        list.retain(|x| *x != item);
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
