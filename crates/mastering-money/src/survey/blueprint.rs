use super::domain::{AnswerOption, NextStep, Question, QuestionId, Theme, ThemeId};

/// Static description of the built-in questionnaire.
#[derive(Debug)]
pub struct SurveyBlueprint {
    themes: Vec<ThemeTemplate>,
}

#[derive(Debug, Clone)]
struct ThemeTemplate {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    questions: Vec<QuestionTemplate>,
}

#[derive(Debug, Clone)]
struct QuestionTemplate {
    id: &'static str,
    text: &'static str,
    options: Vec<(&'static str, u32, Option<&'static str>)>,
}

impl SurveyBlueprint {
    pub fn standard() -> Self {
        Self {
            themes: standard_theme_templates(),
        }
    }

    pub fn theme_count(&self) -> usize {
        self.themes.len()
    }

    pub fn into_themes(self) -> Vec<Theme> {
        self.themes
            .into_iter()
            .map(|theme| Theme {
                theme_id: ThemeId::from(theme.id),
                theme_name: theme.name.to_string(),
                description: theme.description.to_string(),
                questions: theme
                    .questions
                    .into_iter()
                    .map(QuestionTemplate::into_question)
                    .collect(),
            })
            .collect()
    }
}

impl QuestionTemplate {
    fn into_question(self) -> Question {
        Question {
            id: QuestionId::from(self.id),
            text: self.text.to_string(),
            options: self
                .options
                .into_iter()
                .map(|(label, value, next)| AnswerOption {
                    label: label.to_string(),
                    value,
                    next: match next {
                        Some(id) => NextStep::question(id),
                        None => NextStep::End,
                    },
                })
                .collect(),
        }
    }
}

fn standard_theme_templates() -> Vec<ThemeTemplate> {
    vec![
        ThemeTemplate {
            id: "1",
            name: "Spending",
            description: "How you manage day-to-day money and keep track of where it goes.",
            questions: vec![
                QuestionTemplate {
                    id: "1.1",
                    text: "Do you know how much you spent last month?",
                    options: vec![
                        ("No idea", 0, Some("1.2")),
                        ("Roughly", 2, Some("1.2")),
                        ("To the dollar", 4, Some("1.2")),
                    ],
                },
                QuestionTemplate {
                    id: "1.2",
                    text: "How often do you spend more than you earn in a month?",
                    options: vec![
                        ("Most months", 0, Some("2.1")),
                        ("Sometimes", 2, Some("2.1")),
                        ("Never", 4, Some("2.1")),
                    ],
                },
            ],
        },
        ThemeTemplate {
            id: "2",
            name: "Saving",
            description: "Building a buffer for surprises and putting money aside for later.",
            questions: vec![
                QuestionTemplate {
                    id: "2.1",
                    text: "How long could you cover your expenses if your income stopped?",
                    options: vec![
                        ("Less than a week", 0, Some("2.2")),
                        ("About a month", 2, Some("2.2")),
                        ("Three months or more", 4, Some("2.2")),
                    ],
                },
                QuestionTemplate {
                    id: "2.2",
                    text: "How do you usually save?",
                    options: vec![
                        ("I don't save", 0, Some("3.1")),
                        ("Whatever is left over", 2, Some("3.1")),
                        ("Automatically on payday", 4, Some("3.1")),
                    ],
                },
            ],
        },
        ThemeTemplate {
            id: "3",
            name: "Debt",
            description: "What you owe, what it costs you, and how quickly it is going down.",
            questions: vec![
                QuestionTemplate {
                    id: "3.1",
                    text: "Do you carry credit card, personal loan, or car loan debt?",
                    options: vec![("Yes", 0, Some("3.2")), ("No", 4, Some("3.3"))],
                },
                QuestionTemplate {
                    id: "3.2",
                    text: "How are you tracking on repayments?",
                    options: vec![
                        ("Minimums only or falling behind", 0, Some("3.3")),
                        ("Paying more than the minimum", 2, Some("3.3")),
                        ("On a plan to be debt free", 4, Some("3.3")),
                    ],
                },
                QuestionTemplate {
                    id: "3.3",
                    text: "Do you use buy now, pay later services?",
                    options: vec![
                        ("Regularly", 0, Some("4.1")),
                        ("Occasionally", 2, Some("4.1")),
                        ("Never", 4, Some("4.1")),
                    ],
                },
            ],
        },
        ThemeTemplate {
            id: "4",
            name: "Planning",
            description: "Knowing where you are heading and how your money will get you there.",
            questions: vec![
                QuestionTemplate {
                    id: "4.1",
                    text: "Do you have financial goals?",
                    options: vec![
                        ("No", 0, Some("4.2")),
                        ("Only in my head", 2, Some("4.2")),
                        ("Written down with dates", 4, Some("4.2")),
                    ],
                },
                QuestionTemplate {
                    id: "4.2",
                    text: "Do you know your superannuation balance and fees?",
                    options: vec![
                        ("No", 0, Some("5.1")),
                        ("Roughly", 2, Some("5.1")),
                        ("Yes, and I review them", 4, Some("5.1")),
                    ],
                },
            ],
        },
        ThemeTemplate {
            id: "5",
            name: "Protection",
            description: "Making sure a setback does not become a financial disaster.",
            questions: vec![
                QuestionTemplate {
                    id: "5.1",
                    text: "Would insurance cover your income if you could not work?",
                    options: vec![
                        ("No", 0, Some("5.2")),
                        ("Not sure", 1, Some("5.2")),
                        ("Yes", 2, Some("5.2")),
                    ],
                },
                QuestionTemplate {
                    id: "5.2",
                    text: "Do you have health cover that suits your situation?",
                    options: vec![
                        ("No", 0, Some("5.3")),
                        ("Not sure", 1, Some("5.3")),
                        ("Yes", 2, Some("5.3")),
                    ],
                },
                QuestionTemplate {
                    id: "5.3",
                    text: "Do you have a current will?",
                    options: vec![
                        ("No", 0, Some("5.4")),
                        ("It is out of date", 1, Some("5.4")),
                        ("Yes", 2, Some("5.4")),
                    ],
                },
                QuestionTemplate {
                    id: "5.4",
                    text: "Do you review your insurance each year?",
                    options: vec![
                        ("Never", 0, Some("6.1")),
                        ("Occasionally", 1, Some("6.1")),
                        ("Every year", 2, Some("6.1")),
                    ],
                },
            ],
        },
        ThemeTemplate {
            id: "6",
            name: "Knowledge & Mindset",
            description: "How confident you feel about money and where you turn for help.",
            questions: vec![
                QuestionTemplate {
                    id: "6.1",
                    text: "How confident are you making money decisions?",
                    options: vec![
                        ("Not confident", 0, Some("6.2")),
                        ("Somewhat confident", 2, Some("6.2")),
                        ("Very confident", 4, Some("6.2")),
                    ],
                },
                QuestionTemplate {
                    id: "6.2",
                    text: "Where do you get financial advice?",
                    options: vec![
                        ("Nowhere, or social media", 0, None),
                        ("Friends and family", 2, None),
                        ("A licensed adviser or trusted sources", 4, None),
                    ],
                },
            ],
        },
    ]
}
