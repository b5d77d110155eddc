//! Framework-agnostic card description
//!
//! These types describe what a card contains. They carry no host-platform
//! vocabulary; an adapter translates them into whatever the host renders.

use serde::{Deserialize, Serialize};

use crate::types::ActionParameters;

/// A card: optional peek header, sections of widgets, optional fixed footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Header shown while the card is collapsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peek_header: Option<CardHeader>,
    pub sections: Vec<CardSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_footer: Option<FixedFooter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardHeader {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSection {
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    Image(Image),
    ButtonSet(ButtonSet),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub image_url: String,
    pub alt_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSet {
    pub buttons: Vec<TextButton>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextButton {
    pub text: String,
    #[serde(default)]
    pub style: TextButtonStyle,
    pub on_click: OnClick,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextButtonStyle {
    #[default]
    Text,
    Filled,
}

/// What happens when a button is pressed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnClick {
    /// Call back into the add-on
    Action(Action),
    /// Open a link in a new tab
    OpenLink(OpenLink),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Name of the callback the host invokes
    pub function_name: String,
    pub parameters: ActionParameters,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenLink {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedFooter {
    pub primary_button: TextButton,
}

/// Instruction to the host after a trigger or an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    pub navigation: Navigation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    /// Show the card on top of the stack
    PushCard(Card),
    /// Replace the currently displayed card
    UpdateCard(Card),
}

impl ActionResponse {
    pub fn push(card: Card) -> Self {
        Self {
            navigation: Navigation::PushCard(card),
        }
    }

    pub fn update(card: Card) -> Self {
        Self {
            navigation: Navigation::UpdateCard(card),
        }
    }

    pub fn card(&self) -> &Card {
        match &self.navigation {
            Navigation::PushCard(card) | Navigation::UpdateCard(card) => card,
        }
    }
}

impl Card {
    pub fn widgets(&self) -> impl Iterator<Item = &Widget> {
        self.sections.iter().flat_map(|s| s.widgets.iter())
    }

    /// First image widget, if any
    pub fn image(&self) -> Option<&Image> {
        self.widgets().find_map(|w| match w {
            Widget::Image(image) => Some(image),
            _ => None,
        })
    }

    /// All callback actions reachable from the card's buttons
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        let section_buttons = self.widgets().flat_map(|w| match w {
            Widget::ButtonSet(set) => set.buttons.as_slice(),
            _ => &[],
        });
        let footer_button = self.fixed_footer.iter().map(|f| &f.primary_button);

        section_buttons.chain(footer_button).filter_map(|b| match &b.on_click {
            OnClick::Action(action) => Some(action),
            OnClick::OpenLink(_) => None,
        })
    }
}
