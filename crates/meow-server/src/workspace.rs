//! Host platform wire format
//!
//! Decodes the JSON event objects the host posts to the endpoint and
//! translates internal cards into the host's card JSON.

use meow_core::card::{
    Action, ButtonSet, Card, CardHeader, FixedFooter, Image, OnClick, TextButton,
    TextButtonStyle, Widget,
};
use meow_core::{
    ActionEvent, ActionParameters, ActionResponse, ContextualEvent, HomepageEvent, MeowError,
    Navigation, Result, CHANGE_CAT_FUNCTION,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Event object posted by the host for every trigger and action
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceEvent {
    #[serde(default)]
    pub common_event_object: CommonEventObject,
    #[serde(default)]
    pub gmail: Option<GmailEventObject>,
    #[serde(default)]
    pub calendar: Option<CalendarEventObject>,
    #[serde(default)]
    pub drive: Option<DriveEventObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonEventObject {
    #[serde(default)]
    pub host_app: Option<String>,
    #[serde(default)]
    pub time_zone: Option<TimeZone>,
    #[serde(default)]
    pub parameters: ActionParameters,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TimeZone {
    pub id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GmailEventObject {
    /// Forwarded by hosts that resolve the subject before calling us
    #[serde(default)]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventObject {
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveEventObject {
    #[serde(default)]
    pub selected_items: Vec<DriveItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveItem {
    #[serde(default)]
    pub title: Option<String>,
}

impl WorkspaceEvent {
    /// Host application name, lower-cased (`GMAIL` -> `gmail`)
    pub fn host_app(&self) -> Result<String> {
        self.common_event_object
            .host_app
            .as_deref()
            .map(str::to_lowercase)
            .ok_or_else(|| MeowError::MissingParameter("commonEventObject.hostApp".to_string()))
    }

    pub fn to_homepage_event(&self) -> Result<HomepageEvent> {
        let timezone = self
            .common_event_object
            .time_zone
            .as_ref()
            .map(|tz| tz.id.clone())
            .ok_or_else(|| {
                MeowError::MissingParameter("commonEventObject.timeZone.id".to_string())
            })?;

        Ok(HomepageEvent {
            host_app: self.host_app()?,
            timezone,
        })
    }

    pub fn to_contextual_event(&self) -> Result<ContextualEvent> {
        Ok(ContextualEvent {
            host_app: self.host_app()?,
            context: self.context_text(),
        })
    }

    pub fn to_action_event(&self) -> ActionEvent {
        ActionEvent {
            parameters: self.common_event_object.parameters.clone(),
        }
    }

    /// Text describing what the user is looking at, if the event carries any
    fn context_text(&self) -> Option<String> {
        if let Some(subject) = self.gmail.as_ref().and_then(|g| g.subject.clone()) {
            return Some(subject);
        }
        if let Some(summary) = self.calendar.as_ref().and_then(|c| c.summary.clone()) {
            return Some(summary);
        }

        let items = &self.drive.as_ref()?.selected_items;
        match items.len() {
            0 => None,
            1 => items[0].title.clone(),
            n => Some(format!("{} items selected", n)),
        }
    }
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peek_card_header: Option<WsCardHeader>,
    pub sections: Vec<WsSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_footer: Option<WsFixedFooter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsCardHeader {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WsSection {
    pub widgets: Vec<WsWidget>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WsWidget {
    Image(WsImage),
    ButtonList(WsButtonList),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsImage {
    pub image_url: String,
    pub alt_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WsButtonList {
    pub buttons: Vec<WsButton>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsButton {
    pub text: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub button_type: Option<&'static str>,
    pub on_click: WsOnClick,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WsOnClick {
    Action(WsAction),
    OpenLink(WsOpenLink),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WsAction {
    /// Absolute URL of the endpoint the host calls back
    pub function: String,
    pub parameters: Vec<WsParameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WsParameter {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WsOpenLink {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WsFixedFooter {
    pub primary_button: WsButton,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// `{"action": {"navigations": [...]}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderAction {
    pub action: WsNavigations,
}

/// `{"renderActions": {"action": {"navigations": [...]}}}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderActions {
    pub render_actions: RenderAction,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WsNavigations {
    pub navigations: Vec<WsNavigation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WsNavigation {
    PushCard(WsCard),
    UpdateCard(WsCard),
}

/// Maps callback names to the absolute URLs the host should post to
#[derive(Debug, Clone)]
pub struct ActionEndpoints {
    public_url: String,
}

impl ActionEndpoints {
    pub fn new(public_url: impl Into<String>) -> Self {
        Self {
            public_url: public_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn resolve(&self, function_name: &str) -> String {
        let route = match function_name {
            CHANGE_CAT_FUNCTION => "change-cat",
            other => other,
        };
        format!("{}/{}", self.public_url, route)
    }
}

/// Translate an internal card into host card JSON
pub fn translate(card: &Card, endpoints: &ActionEndpoints) -> WsCard {
    WsCard {
        peek_card_header: card.peek_header.as_ref().map(translate_header),
        sections: card
            .sections
            .iter()
            .map(|section| WsSection {
                widgets: section
                    .widgets
                    .iter()
                    .map(|w| translate_widget(w, endpoints))
                    .collect(),
            })
            .collect(),
        fixed_footer: card
            .fixed_footer
            .as_ref()
            .map(|footer| translate_footer(footer, endpoints)),
    }
}

/// Translate an action response into the host's render actions
pub fn translate_response(response: &ActionResponse, endpoints: &ActionEndpoints) -> RenderAction {
    let navigation = match &response.navigation {
        Navigation::PushCard(card) => WsNavigation::PushCard(translate(card, endpoints)),
        Navigation::UpdateCard(card) => WsNavigation::UpdateCard(translate(card, endpoints)),
    };

    RenderAction {
        action: WsNavigations {
            navigations: vec![navigation],
        },
    }
}

fn translate_header(header: &CardHeader) -> WsCardHeader {
    WsCardHeader {
        title: header.title.clone(),
        subtitle: header.subtitle.clone(),
        image_url: header.image_url.clone(),
    }
}

fn translate_widget(widget: &Widget, endpoints: &ActionEndpoints) -> WsWidget {
    match widget {
        Widget::Image(Image {
            image_url,
            alt_text,
        }) => WsWidget::Image(WsImage {
            image_url: image_url.clone(),
            alt_text: alt_text.clone(),
        }),
        Widget::ButtonSet(ButtonSet { buttons }) => WsWidget::ButtonList(WsButtonList {
            buttons: buttons
                .iter()
                .map(|b| translate_button(b, endpoints))
                .collect(),
        }),
    }
}

fn translate_footer(footer: &FixedFooter, endpoints: &ActionEndpoints) -> WsFixedFooter {
    WsFixedFooter {
        primary_button: translate_button(&footer.primary_button, endpoints),
    }
}

fn translate_button(button: &TextButton, endpoints: &ActionEndpoints) -> WsButton {
    let on_click = match &button.on_click {
        OnClick::Action(Action {
            function_name,
            parameters,
        }) => WsOnClick::Action(WsAction {
            function: endpoints.resolve(function_name),
            parameters: parameters
                .iter()
                .map(|(key, value)| WsParameter {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
        }),
        OnClick::OpenLink(link) => WsOnClick::OpenLink(WsOpenLink {
            url: link.url.clone(),
        }),
    };

    WsButton {
        text: button.text.clone(),
        button_type: match button.style {
            TextButtonStyle::Filled => Some("FILLED"),
            TextButtonStyle::Text => None,
        },
        on_click,
    }
}
