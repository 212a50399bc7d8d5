//! Per-user sales funnel: language → welcome → PAMM pitch → owner contact.
//!
//! Driven entirely by inline button presses. The language a user picked is
//! never forgotten; only the stage moves.

use std::collections::HashMap;

use crate::{
    config::Config,
    domain::{Lang, UserId},
    messaging::types::{InlineButton, InlineKeyboard, OutgoingMessage},
    templates,
};

pub const CB_LEARN_MORE: &str = "pamm_info";
pub const CB_DECLINE: &str = "no_thanks";

/// Closed vocabulary of callback payloads the bot emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    /// `lang_<xx>`: pick a language and see the welcome.
    ChooseLanguage(Lang),
    /// `lang_<xx>_pamm`: pick a language and jump straight to the PAMM pitch.
    ChooseLanguageForPamm(Lang),
    LearnMore,
    Decline,
}

impl CallbackAction {
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            CB_LEARN_MORE => return Some(Self::LearnMore),
            CB_DECLINE => return Some(Self::Decline),
            _ => {}
        }

        let rest = data.strip_prefix("lang_")?;
        if let Some(code) = rest.strip_suffix("_pamm") {
            return Lang::from_code(code).map(Self::ChooseLanguageForPamm);
        }
        Lang::from_code(rest).map(Self::ChooseLanguage)
    }

    pub fn data(self) -> String {
        match self {
            Self::ChooseLanguage(lang) => format!("lang_{}", lang.code()),
            Self::ChooseLanguageForPamm(lang) => format!("lang_{}_pamm", lang.code()),
            Self::LearnMore => CB_LEARN_MORE.to_string(),
            Self::Decline => CB_DECLINE.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FunnelState {
    #[default]
    NoLanguage,
    LanguageChosen(Lang),
    InfoShown(Lang),
    /// Terminal for this pass; the user may start over with `/start`.
    Declined(Option<Lang>),
}

impl FunnelState {
    pub fn language(self) -> Option<Lang> {
        match self {
            Self::NoLanguage => None,
            Self::LanguageChosen(l) | Self::InfoShown(l) => Some(l),
            Self::Declined(l) => l,
        }
    }

    /// State after `action`. Every action is valid from every state.
    pub fn next(self, action: CallbackAction) -> Self {
        match action {
            CallbackAction::ChooseLanguage(lang) => Self::LanguageChosen(lang),
            CallbackAction::ChooseLanguageForPamm(lang) => Self::InfoShown(lang),
            CallbackAction::LearnMore => Self::InfoShown(self.language().unwrap_or_default()),
            CallbackAction::Decline => Self::Declined(self.language()),
        }
    }
}

#[derive(Debug, Default)]
pub struct Funnel {
    users: HashMap<UserId, FunnelState>,
}

impl Funnel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, user: UserId) -> FunnelState {
        self.users.get(&user).copied().unwrap_or_default()
    }

    pub fn language(&self, user: UserId) -> Option<Lang> {
        self.state(user).language()
    }

    /// Apply a button press and return the new state.
    pub fn apply(&mut self, user: UserId, action: CallbackAction) -> FunnelState {
        let next = self.state(user).next(action);
        self.users.insert(user, next);
        next
    }

    /// `/start pamm`: with a known language go straight to the pitch.
    pub fn open_pamm(&mut self, user: UserId) -> Option<FunnelState> {
        let lang = self.language(user)?;
        Some(self.apply(user, CallbackAction::ChooseLanguageForPamm(lang)))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Screen shown for a funnel state.
pub fn render(state: FunnelState, cfg: &Config) -> OutgoingMessage {
    match state {
        FunnelState::NoLanguage => language_picker(false),
        FunnelState::LanguageChosen(lang) => OutgoingMessage::with_keyboard(
            templates::welcome(lang, cfg),
            InlineKeyboard::single_row(vec![
                InlineButton::callback(templates::no_thanks_label(lang), CB_DECLINE),
                InlineButton::callback(templates::learn_more_label(lang), CB_LEARN_MORE),
            ]),
        ),
        FunnelState::InfoShown(lang) => OutgoingMessage::with_keyboard(
            templates::pamm_explanation(lang, cfg),
            InlineKeyboard::single_row(vec![
                InlineButton::callback(templates::no_thanks_label(lang), CB_DECLINE),
                InlineButton::url(templates::talk_to_owner_label(lang), owner_link(lang, cfg)),
            ]),
        ),
        FunnelState::Declined(lang) => {
            OutgoingMessage::html(templates::declined_ack(lang.unwrap_or_default()))
        }
    }
}

/// Trilingual language chooser. `for_pamm` routes the pick to the PAMM pitch.
pub fn language_picker(for_pamm: bool) -> OutgoingMessage {
    let buttons = Lang::ALL
        .into_iter()
        .map(|lang| {
            let action = if for_pamm {
                CallbackAction::ChooseLanguageForPamm(lang)
            } else {
                CallbackAction::ChooseLanguage(lang)
            };
            InlineButton::callback(
                format!("{} {}", lang.flag(), lang.native_name()),
                action.data(),
            )
        })
        .collect();
    let html = if for_pamm {
        templates::PAMM_LANGUAGE_PICKER
    } else {
        templates::LANGUAGE_PICKER
    };
    OutgoingMessage::with_keyboard(html, InlineKeyboard::single_row(buttons))
}

/// Private chat with the owner, pre-filled with a localized message.
pub fn owner_link(lang: Lang, cfg: &Config) -> String {
    format!(
        "https://t.me/{}?text={}",
        cfg.owner_username,
        urlencoding::encode(templates::owner_contact_message(lang))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::test_config, messaging::types::ButtonAction};

    const U: UserId = UserId(7);

    #[test]
    fn callback_vocabulary_parses() {
        assert_eq!(
            CallbackAction::parse("lang_pt"),
            Some(CallbackAction::ChooseLanguage(Lang::Pt))
        );
        assert_eq!(
            CallbackAction::parse("lang_es_pamm"),
            Some(CallbackAction::ChooseLanguageForPamm(Lang::Es))
        );
        assert_eq!(CallbackAction::parse("pamm_info"), Some(CallbackAction::LearnMore));
        assert_eq!(CallbackAction::parse("no_thanks"), Some(CallbackAction::Decline));
        assert_eq!(CallbackAction::parse("lang_fr"), None);
        assert_eq!(CallbackAction::parse("lang_en_vip"), None);
        assert_eq!(CallbackAction::parse(""), None);
        for lang in Lang::ALL {
            for action in [
                CallbackAction::ChooseLanguage(lang),
                CallbackAction::ChooseLanguageForPamm(lang),
            ] {
                assert_eq!(CallbackAction::parse(&action.data()), Some(action));
            }
        }
    }

    #[test]
    fn happy_path_walks_all_stages() {
        let mut f = Funnel::new();
        assert_eq!(f.state(U), FunnelState::NoLanguage);
        assert_eq!(
            f.apply(U, CallbackAction::ChooseLanguage(Lang::Es)),
            FunnelState::LanguageChosen(Lang::Es)
        );
        assert_eq!(
            f.apply(U, CallbackAction::LearnMore),
            FunnelState::InfoShown(Lang::Es)
        );
        assert_eq!(
            f.apply(U, CallbackAction::Decline),
            FunnelState::Declined(Some(Lang::Es))
        );
        assert_eq!(f.language(U), Some(Lang::Es));
    }

    #[test]
    fn decline_from_nothing_uses_default_language() {
        let mut f = Funnel::new();
        let state = f.apply(U, CallbackAction::Decline);
        assert_eq!(state, FunnelState::Declined(None));
        let cfg = test_config();
        assert_eq!(render(state, &cfg).html, templates::declined_ack(Lang::En));
    }

    #[test]
    fn choosing_same_language_twice_renders_identically() {
        let cfg = test_config();
        let mut f = Funnel::new();
        let first = render(f.apply(U, CallbackAction::ChooseLanguage(Lang::Pt)), &cfg);
        let second = render(f.apply(U, CallbackAction::ChooseLanguage(Lang::Pt)), &cfg);
        assert_eq!(first, second);
    }

    #[test]
    fn later_choice_overrides_language() {
        let cfg = test_config();
        let mut f = Funnel::new();
        f.apply(U, CallbackAction::ChooseLanguage(Lang::Pt));
        let screen = render(f.apply(U, CallbackAction::ChooseLanguage(Lang::En)), &cfg);
        assert_eq!(f.language(U), Some(Lang::En));
        assert_eq!(screen.html, templates::welcome(Lang::En, &cfg));
        let labels: Vec<_> = screen
            .keyboard
            .unwrap()
            .buttons()
            .map(|b| b.label.clone())
            .collect();
        assert_eq!(labels, vec!["No thanks", "Learn more 🏎️"]);
    }

    #[test]
    fn open_pamm_requires_known_language() {
        let mut f = Funnel::new();
        assert_eq!(f.open_pamm(U), None);
        f.apply(U, CallbackAction::Decline);
        assert_eq!(f.open_pamm(U), None);
        f.apply(U, CallbackAction::ChooseLanguage(Lang::Pt));
        f.apply(U, CallbackAction::Decline);
        assert_eq!(f.open_pamm(U), Some(FunnelState::InfoShown(Lang::Pt)));
    }

    #[test]
    fn info_screen_links_to_owner_with_prefilled_text() {
        let cfg = test_config();
        let screen = render(FunnelState::InfoShown(Lang::En), &cfg);
        let kb = screen.keyboard.unwrap();
        let last = kb.buttons().last().unwrap();
        assert_eq!(
            last.action,
            ButtonAction::Url(
                "https://t.me/apex_owner?text=Hello%21%20I%27m%20interested%20in%20the%20Apex%20Golden%20Community%20PAMM%20Account."
                    .to_string()
            )
        );
    }

    #[test]
    fn owner_link_encodes_accented_text_as_utf8() {
        let link = owner_link(Lang::Pt, &test_config());
        assert!(link.starts_with("https://t.me/apex_owner?text=Ol%C3%A1%21%20Tenho%20"));
        assert!(!link.contains(' '));
    }

    #[test]
    fn pamm_picker_routes_to_pamm_callbacks() {
        let picker = language_picker(true);
        let data: Vec<_> = picker
            .keyboard
            .unwrap()
            .buttons()
            .map(|b| b.action.clone())
            .collect();
        assert_eq!(
            data,
            vec![
                ButtonAction::Callback("lang_en_pamm".to_string()),
                ButtonAction::Callback("lang_pt_pamm".to_string()),
                ButtonAction::Callback("lang_es_pamm".to_string()),
            ]
        );
    }
}
