//! Entry points invoked by the host platform

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::builder::CardBuilder;
use crate::card::{ActionResponse, Card};
use crate::config::MeowConfig;
use crate::greeting::compose_greeting;
use crate::truncate::truncate_to;
use crate::types::{ActionEvent, CardContext, ContextualEvent, HomepageEvent};
use crate::Result;

/// The cat add-on: one method per host entry point
#[derive(Debug, Clone)]
pub struct CatAddOn {
    builder: CardBuilder,
    contextual_caption: String,
    max_caption_length: usize,
}

impl CatAddOn {
    pub fn new(config: &MeowConfig) -> Self {
        Self {
            builder: CardBuilder::new(config),
            contextual_caption: config.card.contextual_caption.clone(),
            max_caption_length: config.card.max_caption_length,
        }
    }

    pub fn builder(&self) -> &CardBuilder {
        &self.builder
    }

    /// Homepage trigger: greeting card
    pub fn on_homepage(&self, event: &HomepageEvent) -> Result<Card> {
        self.on_homepage_at(event, Utc::now())
    }

    pub fn on_homepage_at(&self, event: &HomepageEvent, now: DateTime<Utc>) -> Result<Card> {
        debug!(?event, "homepage");
        let caption = compose_greeting(now, &event.timezone, &event.host_app)?;
        self.builder.build(&CardContext::homepage(caption), now)
    }

    /// Contextual trigger: card captioned with the event's context
    pub fn on_contextual(&self, event: &ContextualEvent) -> Result<Card> {
        self.on_contextual_at(event, Utc::now())
    }

    pub fn on_contextual_at(&self, event: &ContextualEvent, now: DateTime<Utc>) -> Result<Card> {
        debug!(?event, "contextual");
        let caption = self.contextual_caption(event.context.as_deref());
        self.builder.build(&CardContext::contextual(caption), now)
    }

    /// "Change cat" button: same caption, new image, replaces the current card
    pub fn on_change_cat(&self, event: &ActionEvent) -> Result<ActionResponse> {
        self.on_change_cat_at(event, Utc::now())
    }

    pub fn on_change_cat_at(&self, event: &ActionEvent, now: DateTime<Utc>) -> Result<ActionResponse> {
        debug!(?event, "change cat");
        let context = CardContext::from_parameters(&event.parameters)?;
        let card = self.builder.build(&context, now)?;
        Ok(ActionResponse::update(card))
    }

    /// Single-line, length-bounded caption for a contextual card
    fn contextual_caption(&self, context: Option<&str>) -> String {
        let text = context
            .map(|c| c.lines().collect::<Vec<_>>().join(" "))
            .unwrap_or_default();

        if text.trim().is_empty() {
            self.contextual_caption.clone()
        } else {
            truncate_to(&text, self.max_caption_length)
        }
    }
}

impl Default for CatAddOn {
    fn default() -> Self {
        Self::new(&MeowConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Navigation;
    use crate::types::{ActionParameters, PARAM_IS_HOMEPAGE, PARAM_TEXT};
    use crate::MeowError;
    use chrono::TimeZone;

    fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 3, 8, 15, 0).unwrap()
    }

    fn action_event(text: &str, is_homepage: &str) -> ActionEvent {
        let mut parameters = ActionParameters::new();
        parameters.insert(PARAM_TEXT.to_string(), text.to_string());
        parameters.insert(PARAM_IS_HOMEPAGE.to_string(), is_homepage.to_string());
        ActionEvent { parameters }
    }

    #[test]
    fn test_homepage_greeting_card() {
        let addon = CatAddOn::default();
        let event = HomepageEvent {
            host_app: "gmail".into(),
            timezone: "Europe/London".into(),
        };

        // 08:15 UTC is 09:15 BST
        let card = addon.on_homepage_at(&event, morning()).unwrap();
        assert!(card.peek_header.is_none());
        assert!(card.image().unwrap().image_url.contains("Good%20morning%20gmail"));

        let action = card.actions().next().unwrap();
        assert_eq!(action.parameters[PARAM_TEXT], "Good morning gmail");
        assert_eq!(action.parameters[PARAM_IS_HOMEPAGE], "true");
    }

    #[test]
    fn test_homepage_bad_timezone() {
        let event = HomepageEvent {
            host_app: "gmail".into(),
            timezone: "Nowhere/Special".into(),
        };
        let err = CatAddOn::default().on_homepage_at(&event, morning()).unwrap_err();
        assert!(matches!(err, MeowError::InvalidTimezone(_)));
    }

    #[test]
    fn test_change_cat_keeps_caption() {
        let response = CatAddOn::default()
            .on_change_cat_at(&action_event("Hi", "false"), morning())
            .unwrap();

        let Navigation::UpdateCard(card) = &response.navigation else {
            panic!("expected an update navigation");
        };
        let header = card.peek_header.as_ref().unwrap();
        assert_eq!(header.title, "Contextual Cat");
        assert_eq!(header.subtitle.as_deref(), Some("Hi"));
    }

    #[test]
    fn test_change_cat_escapes_control_characters() {
        let response = CatAddOn::default()
            .on_change_cat_at(&action_event("Hello\nWorld\tagain", "true"), morning())
            .unwrap();

        let image_url = &response.card().image().unwrap().image_url;
        assert!(image_url.contains("/Hello%0AWorld%09again?time="), "{image_url}");
        assert_eq!(
            response.card().actions().next().unwrap().parameters[PARAM_TEXT],
            "Hello\nWorld\tagain"
        );
    }

    #[test]
    fn test_change_cat_homepage_stays_homepage() {
        let response = CatAddOn::default()
            .on_change_cat_at(&action_event("Good night drive", "true"), morning())
            .unwrap();
        assert!(response.card().peek_header.is_none());
        assert_eq!(
            response.card().actions().next().unwrap().parameters[PARAM_IS_HOMEPAGE],
            "true"
        );
    }

    #[test]
    fn test_change_cat_rejects_bad_parameters() {
        let addon = CatAddOn::default();

        let err = addon.on_change_cat_at(&ActionEvent::default(), morning()).unwrap_err();
        assert!(matches!(err, MeowError::MissingParameter(_)));

        let err = addon
            .on_change_cat_at(&action_event("Hi", "maybe"), morning())
            .unwrap_err();
        assert!(matches!(err, MeowError::InvalidParameter { .. }));
    }

    #[test]
    fn test_contextual_caption() {
        let addon = CatAddOn::default();

        let event = ContextualEvent {
            host_app: "gmail".into(),
            context: Some("Lunch\r\non  Friday?".into()),
        };
        let card = addon.on_contextual_at(&event, morning()).unwrap();
        // only line breaks are replaced; other spacing is kept
        assert_eq!(
            card.peek_header.unwrap().subtitle.as_deref(),
            Some("Lunch on  Friday?")
        );

        let long = ContextualEvent {
            host_app: "gmail".into(),
            context: Some("Minutes of the extended steering committee offsite".into()),
        };
        let card = addon.on_contextual_at(&long, morning()).unwrap();
        assert_eq!(
            card.actions().next().unwrap().parameters[PARAM_TEXT],
            "Minutes of the extended steering..."
        );
    }

    #[test]
    fn test_contextual_without_context() {
        let event = ContextualEvent {
            host_app: "calendar".into(),
            context: Some("  \n ".into()),
        };
        let card = CatAddOn::default().on_contextual_at(&event, morning()).unwrap();
        assert_eq!(card.peek_header.unwrap().subtitle.as_deref(), Some("Meow"));
    }
}
