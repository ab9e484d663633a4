use super::domain::{Reason, ReasonId};

/// Fixed list of preset barriers, in presentation order.
#[derive(Debug, Clone)]
pub struct ReasonCatalog {
    reasons: Vec<Reason>,
}

impl ReasonCatalog {
    pub fn new(reasons: Vec<Reason>) -> Self {
        Self { reasons }
    }

    pub fn standard() -> Self {
        Self::new(
            STANDARD_REASONS
                .iter()
                .enumerate()
                .map(|(idx, text)| Reason::new(format!("r{}", idx + 1), *text))
                .collect(),
        )
    }

    pub fn reasons(&self) -> &[Reason] {
        &self.reasons
    }

    pub fn get(&self, id: &ReasonId) -> Option<&Reason> {
        self.reasons.iter().find(|reason| &reason.id == id)
    }

    pub fn len(&self) -> usize {
        self.reasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}

const STANDARD_REASONS: [&str; 27] = [
    "I am not that motivated to do anything about it",
    "I am already good enough with money",
    "It feels overwhelming or unpleasant",
    "I am stressed about or ashamed of my current situation",
    "I don’t want to admit that I have a money problem",
    "No matter what I do I am screwed anyway, so why do anything",
    "I don’t want to give up my current lifestyle",
    "I don’t really think or worry about the future - YOLO",
    "I cannot control or do not want to control my spending",
    "I have limited or no financial literacy (e.g. budgeting, compounding, super, credit)",
    "I don’t want to have to create or run a budget",
    "I don’t understand how money works",
    "I don’t like or can’t use spreadsheets",
    "I don’t like or don’t have the time to learn about personal finance",
    "I’m not smart enough to learn financial literacy",
    "I’m no good at maths",
    "I don’t know how to get better",
    "I am no good with money",
    "I don’t earn enough money to be able to save any",
    "I am scared or anxious about money",
    "I have bigger problems (Health, Relationships, Addiction, Gambling, …)",
    "I use my spending to provide relief from other problems (Retail therapy)",
    "I am too busy and don’t have time to deal with it",
    "I don’t trust other people to give me good advice",
    "I don’t know who to trust or believe",
    "I have been burnt before",
    "I cannot afford the cost of getting help",
];
