#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{Action, DispatchResult, KeyTranslator, Outcome, dispatch};
use core_events::{KeyCode, KeyEvent};
use core_match::MasterList;
use core_state::{Capacity, Session, SessionConfig};

/// Session driven through the same translate -> dispatch path as the runtime.
pub struct Harness {
    pub session: Session,
    translator: KeyTranslator,
    pub outcome: Option<Outcome>,
}

impl Harness {
    pub fn new(items: &[&str], config: SessionConfig) -> Self {
        let session = Session::new(
            MasterList::new(items.iter().copied()),
            config,
            Box::new(|s: &str| s.chars().count() + 2),
        );
        Self {
            session,
            translator: KeyTranslator::new(),
            outcome: None,
        }
    }

    pub fn rows(items: &[&str], rows: usize) -> Self {
        Self::new(
            items,
            SessionConfig {
                capacity: Capacity::Rows(rows),
                ..SessionConfig::default()
            },
        )
    }

    pub fn bar(items: &[&str], budget: usize) -> Self {
        Self::new(
            items,
            SessionConfig {
                capacity: Capacity::Width(budget),
                ..SessionConfig::default()
            },
        )
    }

    pub fn key(&mut self, key: KeyEvent) -> Option<DispatchResult> {
        let action = self.translator.translate(&self.session, &key)?;
        Some(self.act(action))
    }

    pub fn press(&mut self, code: KeyCode) -> Option<DispatchResult> {
        self.key(KeyEvent::plain(code))
    }

    pub fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    pub fn act(&mut self, action: Action) -> DispatchResult {
        let result = dispatch(action, &mut self.session);
        if let Some(outcome) = &result.outcome {
            self.outcome = Some(outcome.clone());
        }
        result
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.session.selected_text()
    }

    pub fn visible(&self) -> Vec<&str> {
        self.session.visible_items().map(|(_, t)| t).collect()
    }
}
