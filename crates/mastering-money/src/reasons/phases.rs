use super::catalog::ReasonCatalog;
use super::domain::{
    RankedReason, Reason, ReasonAnswer, ReasonId, ReasonResponse, ReasonsError, ReasonsResult,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

pub const RATING_PAGE_SIZE: usize = 5;
pub const MAX_CUSTOM_REASONS: usize = 3;
pub const MAX_RANKED_REASONS: usize = 3;

/// Answers and custom reasons shared by the rating and ranking phases.
#[derive(Debug, Clone, Default)]
pub struct ReasonResponses {
    answers: HashMap<ReasonId, ReasonAnswer>,
    custom: Vec<Reason>,
}

impl ReasonResponses {
    pub fn answer(&self, id: &ReasonId) -> ReasonAnswer {
        self.answers.get(id).copied().unwrap_or_default()
    }

    pub fn custom(&self) -> &[Reason] {
        &self.custom
    }

    /// Presets in catalog order followed by custom reasons that have text.
    pub fn reasons<'a>(&'a self, catalog: &'a ReasonCatalog) -> impl Iterator<Item = &'a Reason> {
        catalog
            .reasons()
            .iter()
            .chain(self.custom.iter().filter(|reason| reason.has_text()))
    }

    fn find<'a>(&'a self, catalog: &'a ReasonCatalog, id: &ReasonId) -> Option<&'a Reason> {
        catalog
            .get(id)
            .or_else(|| self.custom.iter().find(|reason| &reason.id == id))
    }

    fn responses(&self, catalog: &ReasonCatalog) -> Vec<ReasonResponse> {
        self.reasons(catalog)
            .map(|reason| ReasonResponse {
                id: reason.id.clone(),
                text: reason.text.clone(),
                answer: self.answer(&reason.id),
            })
            .collect()
    }
}

/// First phase: rate every reason page by page, optionally adding custom ones.
#[derive(Debug, Clone)]
pub struct RatingPhase {
    catalog: Arc<ReasonCatalog>,
    store: ReasonResponses,
    page: usize,
}

impl RatingPhase {
    pub fn new(catalog: Arc<ReasonCatalog>) -> Self {
        Self {
            catalog,
            store: ReasonResponses::default(),
            page: 0,
        }
    }

    pub fn responses(&self) -> &ReasonResponses {
        &self.store
    }

    /// Zero-based index of the page on screen.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.catalog.len().div_ceil(RATING_PAGE_SIZE).max(1)
    }

    pub fn is_last_page(&self) -> bool {
        self.page + 1 >= self.page_count()
    }

    /// Presets shown on the current page. Custom reasons are offered on the last page.
    pub fn current_page(&self) -> &[Reason] {
        let reasons = self.catalog.reasons();
        let start = (self.page * RATING_PAGE_SIZE).min(reasons.len());
        let end = (start + RATING_PAGE_SIZE).min(reasons.len());
        &reasons[start..end]
    }

    /// Advances one page; returns `false` when already on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.is_last_page() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Sets the answer for a preset or custom reason. `NotAnswered` clears it.
    pub fn rate(&mut self, id: &ReasonId, answer: ReasonAnswer) -> Result<(), ReasonsError> {
        if self.store.find(&self.catalog, id).is_none() {
            return Err(ReasonsError::UnknownReason(id.clone()));
        }

        match answer {
            ReasonAnswer::NotAnswered => {
                self.store.answers.remove(id);
            }
            answer => {
                self.store.answers.insert(id.clone(), answer);
            }
        }
        Ok(())
    }

    /// Appends an empty custom reason, or returns `None` once the limit is reached.
    pub fn add_custom(&mut self) -> Option<ReasonId> {
        if self.store.custom.len() >= MAX_CUSTOM_REASONS {
            return None;
        }
        let id = ReasonId::custom(self.store.custom.len() + 1);
        self.store.custom.push(Reason {
            id: id.clone(),
            text: String::new(),
        });
        Some(id)
    }

    pub fn edit_custom(&mut self, id: &ReasonId, text: &str) -> Result<(), ReasonsError> {
        if let Some(reason) = self.store.custom.iter_mut().find(|reason| &reason.id == id) {
            reason.text = text.to_string();
            return Ok(());
        }

        if self.catalog.get(id).is_some() {
            Err(ReasonsError::NotCustom(id.clone()))
        } else {
            Err(ReasonsError::UnknownReason(id.clone()))
        }
    }

    pub fn can_continue(&self) -> bool {
        self.is_last_page()
    }

    /// Moves on to ranking. Only possible from the last page; otherwise the phase is
    /// handed back unchanged.
    pub fn into_ranking(self) -> Result<RankingPhase, Self> {
        if !self.can_continue() {
            return Err(self);
        }

        debug!(
            rated = self.store.answers.len(),
            custom = self.store.custom.len(),
            "reason rating finished"
        );

        Ok(RankingPhase {
            catalog: self.catalog,
            store: self.store,
            selection: Vec::new(),
        })
    }

    pub(crate) fn incomplete_error(&self) -> ReasonsError {
        ReasonsError::RatingIncomplete {
            page: self.page + 1,
            page_count: self.page_count(),
        }
    }
}

/// Result of toggling a candidate during ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToggleOutcome {
    Selected { rank: usize },
    Deselected,
    /// Three barriers are already selected; nothing changed.
    LimitReached,
    /// Not a ranking candidate; nothing changed.
    Ignored,
}

/// Second phase: pick up to three affirmative reasons; rank follows selection order.
#[derive(Debug, Clone)]
pub struct RankingPhase {
    catalog: Arc<ReasonCatalog>,
    store: ReasonResponses,
    selection: Vec<ReasonId>,
}

impl RankingPhase {
    pub fn responses(&self) -> &ReasonResponses {
        &self.store
    }

    pub fn candidates(&self) -> Vec<&Reason> {
        self.store
            .reasons(&self.catalog)
            .filter(|reason| self.store.answer(&reason.id).is_affirmative())
            .collect()
    }

    fn is_candidate(&self, id: &ReasonId) -> bool {
        self.store
            .reasons(&self.catalog)
            .any(|reason| &reason.id == id && self.store.answer(id).is_affirmative())
    }

    pub fn toggle(&mut self, id: &ReasonId) -> ToggleOutcome {
        if let Some(position) = self.selection.iter().position(|selected| selected == id) {
            self.selection.remove(position);
            return ToggleOutcome::Deselected;
        }

        if !self.is_candidate(id) {
            return ToggleOutcome::Ignored;
        }

        if self.selection.len() >= MAX_RANKED_REASONS {
            return ToggleOutcome::LimitReached;
        }

        self.selection.push(id.clone());
        ToggleOutcome::Selected {
            rank: self.selection.len(),
        }
    }

    /// 1-based rank of a selected reason.
    pub fn rank_of(&self, id: &ReasonId) -> Option<usize> {
        self.selection
            .iter()
            .position(|selected| selected == id)
            .map(|position| position + 1)
    }

    pub fn selection(&self) -> Vec<&Reason> {
        self.selection
            .iter()
            .filter_map(|id| self.store.find(&self.catalog, id))
            .collect()
    }

    pub fn can_finish(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Assembles the final result. With nothing selected the phase is handed back.
    pub fn finish(self) -> Result<ReasonsResult, Self> {
        if !self.can_finish() {
            return Err(self);
        }

        let top_three = self
            .selection()
            .into_iter()
            .map(|reason| RankedReason {
                id: reason.id.clone(),
                text: reason.text.clone(),
            })
            .collect();

        let result = ReasonsResult {
            responses: self.store.responses(&self.catalog),
            top_three,
        };

        debug!(
            responses = result.responses.len(),
            ranked = result.top_three.len(),
            "reason ranking finished"
        );

        Ok(result)
    }
}
