//! Cat card assembly
//!
//! Builds the card shown in the sidebar: a captioned cat image from the
//! remote service, a "Change cat" button that round-trips the caption, a
//! footer link to the service, and a peek header on contextual cards.

use chrono::{DateTime, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::card::{
    Action, ButtonSet, Card, CardHeader, CardSection, FixedFooter, Image, OnClick, OpenLink,
    TextButton, TextButtonStyle, Widget,
};
use crate::config::{CardConfig, MeowConfig, ServiceConfig};
use crate::truncate::truncate_to;
use crate::types::{CardContext, ViewContext};
use crate::{MeowError, Result};

/// Callback name attached to the refresh button
pub const CHANGE_CAT_FUNCTION: &str = "onChangeCat";

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds cat cards from a caption and a view context
#[derive(Debug, Clone, Default)]
pub struct CardBuilder {
    service: ServiceConfig,
    card: CardConfig,
}

impl CardBuilder {
    pub fn new(config: &MeowConfig) -> Self {
        Self {
            service: config.service.clone(),
            card: config.card.clone(),
        }
    }

    /// Image URL for `caption`, with `now` as cache-busting nonce.
    ///
    /// Slashes are replaced with spaces first; the service reads them as
    /// path separators. The caption is then escaped like
    /// `encodeURIComponent`, so control characters survive as `%0A`, `%09`.
    pub fn image_url(&self, caption: &str, now: DateTime<Utc>) -> Result<Url> {
        let caption = sanitize_caption(caption);

        let mut url = Url::parse(&self.service.base_url)?;
        if url.cannot_be_a_base() {
            return Err(MeowError::Config(format!(
                "Service URL cannot carry a path: {}",
                self.service.base_url
            )));
        }

        let mut path = url.path().trim_end_matches('/').to_string();
        let segments = self.service.says_path.split('/').filter(|s| !s.is_empty());
        for segment in segments.chain(std::iter::once(caption.as_str())) {
            path.push('/');
            path.extend(utf8_percent_encode(segment, URI_COMPONENT));
        }
        url.set_path(&path);

        url.query_pairs_mut()
            .clear()
            .append_pair("time", &now.timestamp_millis().to_string());

        Ok(url)
    }

    /// Assemble the full card
    pub fn build(&self, context: &CardContext, now: DateTime<Utc>) -> Result<Card> {
        let image = Image {
            image_url: self.image_url(&context.caption, now)?.to_string(),
            alt_text: self.card.alt_text.clone(),
        };

        let change_button = TextButton {
            text: self.card.change_button_text.clone(),
            style: TextButtonStyle::Filled,
            on_click: OnClick::Action(Action {
                function_name: CHANGE_CAT_FUNCTION.to_string(),
                parameters: context.to_parameters(),
            }),
        };

        let footer = FixedFooter {
            primary_button: TextButton {
                text: self.card.footer_text.clone(),
                style: TextButtonStyle::Text,
                on_click: OnClick::OpenLink(OpenLink {
                    url: self.service.base_url.clone(),
                }),
            },
        };

        // Homepage cards are never collapsed
        let peek_header = match context.view {
            ViewContext::Homepage => None,
            ViewContext::Contextual => Some(CardHeader {
                title: self.card.peek_title.clone(),
                subtitle: Some(truncate_to(&context.caption, self.card.max_caption_length)),
                image_url: Some(self.card.peek_icon_url.clone()),
            }),
        };

        Ok(Card {
            peek_header,
            sections: vec![CardSection {
                widgets: vec![
                    Widget::Image(image),
                    Widget::ButtonSet(ButtonSet {
                        buttons: vec![change_button],
                    }),
                ],
            }],
            fixed_footer: Some(footer),
        })
    }
}

/// Replace every forward slash with a space
pub fn sanitize_caption(caption: &str) -> String {
    caption.replace('/', " ")
}

/// Build a card with the default configuration at the current time
pub fn create_cat_card(caption: &str, view: ViewContext) -> Result<Card> {
    CardBuilder::default().build(&CardContext::new(caption, view), Utc::now())
}
