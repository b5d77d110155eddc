//! End-to-end scenarios through the public API

use meow_core::{
    create_cat_card, ActionEvent, CardContext, CatAddOn, MeowConfig, Navigation, ViewContext,
    PARAM_IS_HOMEPAGE, PARAM_TEXT,
};

#[test]
fn test_homepage_card_with_slash() {
    let card = create_cat_card("Hello/World", ViewContext::Homepage).unwrap();

    let image = card.image().unwrap();
    assert!(image.image_url.starts_with("https://cataas.com/cat/says/Hello%20World?time="));
    assert!(card.peek_header.is_none());
}

#[test]
fn test_change_cat_rebuilds_contextual_card() {
    let event: ActionEvent = serde_json::from_str(
        r#"{"parameters": {"text": "Hi", "isHomepage": "false"}}"#,
    )
    .unwrap();

    let response = CatAddOn::default().on_change_cat(&event).unwrap();
    match response.navigation {
        Navigation::UpdateCard(card) => {
            let header = card.peek_header.unwrap();
            assert_eq!(header.title, "Contextual Cat");
            assert_eq!(header.subtitle.as_deref(), Some("Hi"));
        }
        other => panic!("expected update navigation, got {:?}", other),
    }
}

#[test]
fn test_button_round_trips_through_change_cat() {
    let addon = CatAddOn::new(&MeowConfig::default());

    for view in [ViewContext::Homepage, ViewContext::Contextual] {
        let card = create_cat_card("Cats/Dogs & more", view).unwrap();
        let action = card.actions().next().unwrap();
        assert_eq!(action.parameters[PARAM_TEXT], "Cats/Dogs & more");
        assert_eq!(action.parameters[PARAM_IS_HOMEPAGE] == "true", view.is_homepage());

        let event = ActionEvent {
            parameters: action.parameters.clone(),
        };
        let rebuilt = addon.on_change_cat(&event).unwrap();
        let rebuilt_action = rebuilt.card().actions().next().unwrap();

        assert_eq!(
            CardContext::from_parameters(&rebuilt_action.parameters).unwrap(),
            CardContext::new("Cats/Dogs & more", view)
        );
        assert_eq!(rebuilt.card().peek_header.is_some(), !view.is_homepage());
    }
}
