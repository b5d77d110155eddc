//! Core type definitions for the cat add-on

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{MeowError, Result};

/// String-only key/value parameters attached to a card action.
///
/// The host platform only round-trips strings through a button press.
pub type ActionParameters = BTreeMap<String, String>;

/// Parameter key holding the caption text
pub const PARAM_TEXT: &str = "text";

/// Parameter key holding the stringified homepage flag
pub const PARAM_IS_HOMEPAGE: &str = "isHomepage";

/// Which kind of card is being rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewContext {
    /// Shown when the add-on is opened with no specific context
    Homepage,
    /// Shown for contextual host state such as an open message
    Contextual,
}

impl ViewContext {
    pub fn is_homepage(self) -> bool {
        matches!(self, Self::Homepage)
    }

    /// Encode as the `"true"`/`"false"` homepage flag
    pub fn as_flag(self) -> &'static str {
        if self.is_homepage() {
            "true"
        } else {
            "false"
        }
    }

    /// Decode the `"true"`/`"false"` homepage flag
    pub fn from_flag(flag: &str) -> Result<Self> {
        match flag {
            "true" => Ok(Self::Homepage),
            "false" => Ok(Self::Contextual),
            other => Err(MeowError::InvalidParameter {
                key: PARAM_IS_HOMEPAGE.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

impl From<bool> for ViewContext {
    fn from(is_homepage: bool) -> Self {
        if is_homepage {
            Self::Homepage
        } else {
            Self::Contextual
        }
    }
}

impl std::fmt::Display for ViewContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Homepage => write!(f, "homepage"),
            Self::Contextual => write!(f, "contextual"),
        }
    }
}

impl std::str::FromStr for ViewContext {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "homepage" | "home" => Ok(Self::Homepage),
            "contextual" | "context" => Ok(Self::Contextual),
            _ => Err(format!("Invalid view context: {}", s)),
        }
    }
}

/// State carried from one card to the next through the refresh button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContext {
    /// Caption as supplied by the caller, before any sanitizing
    pub caption: String,
    /// Homepage or contextual card
    pub view: ViewContext,
}

impl CardContext {
    pub fn new(caption: impl Into<String>, view: ViewContext) -> Self {
        Self {
            caption: caption.into(),
            view,
        }
    }

    pub fn homepage(caption: impl Into<String>) -> Self {
        Self::new(caption, ViewContext::Homepage)
    }

    pub fn contextual(caption: impl Into<String>) -> Self {
        Self::new(caption, ViewContext::Contextual)
    }

    /// Encode into exactly the two action parameters `text` and `isHomepage`
    pub fn to_parameters(&self) -> ActionParameters {
        let mut parameters = ActionParameters::new();
        parameters.insert(PARAM_TEXT.to_string(), self.caption.clone());
        parameters.insert(PARAM_IS_HOMEPAGE.to_string(), self.view.as_flag().to_string());
        parameters
    }

    /// Decode from action parameters produced by [`CardContext::to_parameters`]
    pub fn from_parameters(parameters: &ActionParameters) -> Result<Self> {
        let caption = parameters
            .get(PARAM_TEXT)
            .ok_or_else(|| MeowError::MissingParameter(PARAM_TEXT.to_string()))?;
        let flag = parameters
            .get(PARAM_IS_HOMEPAGE)
            .ok_or_else(|| MeowError::MissingParameter(PARAM_IS_HOMEPAGE.to_string()))?;

        Ok(Self::new(caption.clone(), ViewContext::from_flag(flag)?))
    }
}

/// Homepage trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomepageEvent {
    /// Name of the host application, e.g. `gmail`
    pub host_app: String,
    /// IANA timezone identifier of the user
    pub timezone: String,
}

/// Contextual trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextualEvent {
    pub host_app: String,
    /// Text describing the context (message subject, selected items, ...)
    #[serde(default)]
    pub context: Option<String>,
}

/// Button press
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEvent {
    #[serde(default)]
    pub parameters: ActionParameters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_encoding() {
        assert_eq!(ViewContext::Homepage.as_flag(), "true");
        assert_eq!(ViewContext::Contextual.as_flag(), "false");
        assert_eq!(ViewContext::from_flag("true").unwrap(), ViewContext::Homepage);
        assert_eq!(ViewContext::from_flag("false").unwrap(), ViewContext::Contextual);
    }

    #[test]
    fn test_flag_rejects_other_strings() {
        for flag in ["TRUE", "1", "", "yes"] {
            let err = ViewContext::from_flag(flag).unwrap_err();
            assert!(matches!(err, MeowError::InvalidParameter { .. }), "{flag}");
        }
    }

    #[test]
    fn test_view_context_parsing() {
        assert_eq!("homepage".parse::<ViewContext>().unwrap(), ViewContext::Homepage);
        assert_eq!("Contextual".parse::<ViewContext>().unwrap(), ViewContext::Contextual);
        assert!("sidebar".parse::<ViewContext>().is_err());
        assert_eq!(ViewContext::from(true), ViewContext::Homepage);
    }

    #[test]
    fn test_context_parameters() {
        let context = CardContext::contextual("Hello/World");
        let parameters = context.to_parameters();

        assert_eq!(parameters.len(), 2);
        assert_eq!(parameters[PARAM_TEXT], "Hello/World");
        assert_eq!(parameters[PARAM_IS_HOMEPAGE], "false");
        assert_eq!(CardContext::from_parameters(&parameters).unwrap(), context);
    }

    #[test]
    fn test_missing_parameters() {
        let mut parameters = ActionParameters::new();
        parameters.insert(PARAM_IS_HOMEPAGE.to_string(), "true".to_string());
        let err = CardContext::from_parameters(&parameters).unwrap_err();
        assert!(matches!(err, MeowError::MissingParameter(ref key) if key == PARAM_TEXT));

        let mut parameters = ActionParameters::new();
        parameters.insert(PARAM_TEXT.to_string(), "Hi".to_string());
        let err = CardContext::from_parameters(&parameters).unwrap_err();
        assert!(matches!(err, MeowError::MissingParameter(ref key) if key == PARAM_IS_HOMEPAGE));
    }
}
