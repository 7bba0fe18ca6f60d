use serde::Serialize;

use crate::domain::{
    entities::project_config::ProjectConfig,
    error::DomainError,
    value_objects::{DataFetching, StateManagement, Styling, Testing},
};

/// The option subset a meta-framework plugin supports.
///
/// Each axis is either `Some(list)`, the labels the plugin can honour, or
/// `None`, meaning the axis is hidden for that framework and only its
/// default value is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionMatrix {
    pub styling: Option<&'static [Styling]>,
    pub testing: Option<&'static [Testing]>,
    pub state_management: Option<&'static [StateManagement]>,
    pub data_fetching: Option<&'static [DataFetching]>,
}

impl OptionMatrix {
    /// A matrix with every axis hidden.
    pub const fn hidden() -> Self {
        Self {
            styling: None,
            testing: None,
            state_management: None,
            data_fetching: None,
        }
    }

    /// Reject selections outside the declared subset.
    pub fn check(&self, config: &ProjectConfig) -> Result<(), DomainError> {
        let framework = config.framework().to_string();
        check_axis(
            Styling::AXIS,
            self.styling,
            config.styling(),
            Styling::as_str,
            Styling::is_default,
            &framework,
        )?;
        check_axis(
            Testing::AXIS,
            self.testing,
            config.testing(),
            Testing::as_str,
            Testing::is_default,
            &framework,
        )?;
        check_axis(
            StateManagement::AXIS,
            self.state_management,
            config.state_management(),
            StateManagement::as_str,
            StateManagement::is_default,
            &framework,
        )?;
        check_axis(
            DataFetching::AXIS,
            self.data_fetching,
            config.data_fetching(),
            DataFetching::as_str,
            DataFetching::is_default,
            &framework,
        )
    }

    /// `(axis, labels)` pairs for display; hidden axes are omitted.
    pub fn visible_axes(&self) -> Vec<(&'static str, Vec<&'static str>)> {
        let mut axes = Vec::new();
        if let Some(list) = self.styling {
            axes.push((Styling::AXIS, list.iter().map(Styling::as_str).collect()));
        }
        if let Some(list) = self.testing {
            axes.push((Testing::AXIS, list.iter().map(Testing::as_str).collect()));
        }
        if let Some(list) = self.state_management {
            axes.push((
                StateManagement::AXIS,
                list.iter().map(StateManagement::as_str).collect(),
            ));
        }
        if let Some(list) = self.data_fetching {
            axes.push((
                DataFetching::AXIS,
                list.iter().map(DataFetching::as_str).collect(),
            ));
        }
        axes
    }
}

fn check_axis<T: Copy + PartialEq>(
    axis: &'static str,
    supported: Option<&'static [T]>,
    selected: T,
    label: fn(&T) -> &'static str,
    is_default: fn(&T) -> bool,
    framework: &str,
) -> Result<(), DomainError> {
    let accepted = match supported {
        Some(list) => list.contains(&selected),
        None => is_default(&selected),
    };
    if accepted {
        return Ok(());
    }
    Err(DomainError::UnsupportedOption {
        axis,
        value: label(&selected).to_string(),
        framework: framework.to_string(),
        available: supported
            .map(|list| list.iter().map(label).collect())
            .unwrap_or_default(),
    })
}
