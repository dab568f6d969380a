//! Lowering the exam model into the player's document tree
//!
//!     Each model type knows how to turn itself into an [`Element`]. The
//!     overall document shape:
//!
//!     exam
//!     ├── settings
//!     │   ├── navigation      (three events)
//!     │   ├── timing          (two events)
//!     │   ├── feedback > advice
//!     │   └── rulesets > set*
//!     ├── functions > function*
//!     ├── variables > variable*
//!     └── questions > question*
//!             statement, parts > part*, advice, notes, variables, functions, rulesets
//!
//!     Writers build the nodes that need content first and then place them in
//!     a skeleton, so nothing has to be looked up again after the tree exists.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::content::{content_node, parse_fragment};
use super::format::{flag, order, percent};
use super::Element;
use crate::exam::error::Result;
use crate::exam::model::{
    Event, Exam, Function, GapFillPart, JmePart, Matrix, MultipleChoicePart, NumberEntryPart, Part,
    PartKind, PatternMatchPart, Question, Restriction, Ruleset, RulesetEntry, SimplificationRule,
    Variable,
};
use crate::skeleton;

pub trait ToMarkup {
    fn to_markup(&self) -> Result<Element>;
}

impl ToMarkup for Exam {
    fn to_markup(&self) -> Result<Element> {
        let mut navigation = Element::with_attributes(
            "navigation",
            [
                ("allowregen", flag(self.navigation.allow_regen)),
                ("reverse", flag(self.navigation.reverse)),
                ("browse", flag(self.navigation.browse)),
                ("showfrontpage", flag(self.navigation.show_frontpage)),
            ],
        );
        navigation.extend(all_to_markup([
            &self.navigation.on_advance,
            &self.navigation.on_reverse,
            &self.navigation.on_move,
        ])?);

        let mut timing =
            Element::with_attributes("timing", [("duration", self.duration.to_string())]);
        timing.extend(all_to_markup([&self.timing.timeout, &self.timing.timed_warning])?);

        let feedback = &self.feedback;
        let advice = Element::with_attributes(
            "advice",
            [
                ("type", feedback.advice_type.clone()),
                ("threshold", feedback.advice_threshold.to_string()),
            ],
        );
        let mut feedback_element = skeleton!(["feedback", (advice)]).build();
        feedback_element
            .set("showactualmark", flag(feedback.show_actual_mark))
            .set("showtotalmark", flag(feedback.show_total_mark))
            .set("showanswerstate", flag(feedback.show_answer_state))
            .set("allowrevealanswer", flag(feedback.allow_reveal_answer));

        let mut root = skeleton!(["exam",
            ["settings",
                (navigation),
                (timing),
                (feedback_element),
                (collection("rulesets", &self.rulesets)?)
            ],
            (collection("functions", &self.functions)?),
            (collection("variables", &self.variables)?),
            (collection("questions", &self.questions)?)
        ])
        .build();
        root.set("name", self.name.as_str())
            .set("percentPass", percent(self.percent_pass))
            .set("shuffleQuestions", flag(self.shuffle_questions));
        Ok(root)
    }
}

impl ToMarkup for Event {
    fn to_markup(&self) -> Result<Element> {
        let mut event = skeleton!(["event", (content_node(&self.message)?)]).build();
        event
            .set("type", self.kind.as_str())
            .set("action", self.action.as_str());
        Ok(event)
    }
}

impl ToMarkup for Ruleset {
    fn to_markup(&self) -> Result<Element> {
        let mut set = Element::with_attributes("set", [("name", self.name.as_str())]);
        for entry in &self.entries {
            set.append(match entry {
                RulesetEntry::Include(name) => {
                    Element::with_attributes("include", [("name", name.as_str())])
                }
                RulesetEntry::Rule(rule) => rule.to_markup()?,
            });
        }
        Ok(set)
    }
}

impl ToMarkup for SimplificationRule {
    fn to_markup(&self) -> Result<Element> {
        let mut conditions = Element::new("conditions");
        for condition in &self.conditions {
            conditions.append(parse_fragment(&format!("<condition>{condition}</condition>"))?);
        }
        let mut rule = skeleton!(["ruledef", (conditions)]).build();
        rule.set("pattern", self.pattern.as_str())
            .set("result", self.result.as_str());
        Ok(rule)
    }
}

impl ToMarkup for Function {
    fn to_markup(&self) -> Result<Element> {
        let parameters = self
            .parameters
            .iter()
            .map(|(name, kind)| {
                Element::with_attributes("parameter", [("name", name), ("type", kind)])
            });
        let mut function = Element::with_attributes(
            "function",
            [
                ("name", &self.name),
                ("outtype", &self.output_type),
                ("definition", &self.definition),
                ("language", &self.language),
            ],
        );
        let mut parameter_list = Element::new("parameters");
        parameter_list.extend(parameters);
        function.append(parameter_list);
        Ok(function)
    }
}

impl ToMarkup for Variable {
    fn to_markup(&self) -> Result<Element> {
        Ok(Element::with_attributes(
            "variable",
            [("name", &self.name), ("value", &self.definition)],
        ))
    }
}

impl ToMarkup for Question {
    fn to_markup(&self) -> Result<Element> {
        let mut question = skeleton!(["question",
            ["statement", (content_node(&self.statement)?)],
            (collection("parts", &self.parts)?),
            ["advice", (content_node(&self.advice)?)],
            "notes",
            (collection("variables", &self.variables)?),
            (collection("functions", &self.functions)?),
            (collection("rulesets", &self.rulesets)?)
        ])
        .build();
        question.set("name", self.name.as_str());
        Ok(question)
    }
}

static GAP_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[(.*?)\]\]").unwrap());

/// Replace `[[id]]` placeholders with gap references.
pub fn substitute_gaps(prompt: &str) -> Cow<'_, str> {
    GAP_PLACEHOLDER.replace_all(prompt, r#"<gapfill reference="${1}" />"#)
}

impl ToMarkup for Part {
    fn to_markup(&self) -> Result<Element> {
        let prompt = match self.kind {
            PartKind::GapFill(_) => substitute_gaps(&self.prompt),
            _ => Cow::Borrowed(self.prompt.as_str()),
        };
        let mut part = skeleton!(["part",
            ["prompt", (content_node(&prompt)?)],
            (collection("steps", &self.steps)?)
        ])
        .build();
        part.set("type", self.type_name())
            .set("marks", self.total_marks().to_string())
            .set("stepspenalty", self.steps_penalty.to_string())
            .set("enableminimummarks", flag(self.enable_minimum_marks))
            .set("minimummarks", self.minimum_marks.to_string());

        match &self.kind {
            PartKind::Jme(jme) => append_jme(&mut part, jme)?,
            PartKind::NumberEntry(number_entry) => append_number_entry(&mut part, number_entry),
            PartKind::PatternMatch(pattern_match) => {
                append_pattern_match(&mut part, pattern_match)?
            }
            PartKind::MultipleChoice(choice) => append_multiple_choice(&mut part, choice)?,
            PartKind::GapFill(gapfill) => append_gapfill(&mut part, gapfill)?,
            PartKind::Information => {}
        }
        Ok(part)
    }
}

fn append_jme(part: &mut Element, jme: &JmePart) -> Result<()> {
    let mut correct_answer = Element::with_attributes(
        "correctanswer",
        [("simplification", jme.answer_simplification.as_str())],
    );
    correct_answer.append(Element::new("math").with_text(jme.answer.as_str()));
    let range = Element::with_attributes(
        "range",
        [
            ("start", jme.vset_range_start.to_string()),
            ("end", jme.vset_range_end.to_string()),
            ("points", jme.vset_range_points.to_string()),
        ],
    );
    let mut checking = Element::with_attributes(
        "checking",
        [
            ("type", jme.checking_type.clone()),
            ("accuracy", jme.checking_accuracy.to_string()),
            ("failurerate", jme.failure_rate.to_string()),
        ],
    );
    checking.append(range);

    let mut answer = skeleton!(["answer", (correct_answer), (checking)]).build();
    answer.extend(all_to_markup([
        &jme.max_length,
        &jme.min_length,
        &jme.must_have,
        &jme.not_allowed,
    ])?);
    part.append(answer);
    Ok(())
}

impl ToMarkup for Restriction {
    fn to_markup(&self) -> Result<Element> {
        let message = skeleton!(["message", (content_node(&self.message)?)]).build();
        let mut restriction = skeleton!([self.name.as_str(), (message)]).build();
        restriction
            .set("partialcredit", percent(self.partial_credit))
            .set("showstrings", flag(self.show_strings));
        if let Some(length) = self.emitted_length() {
            restriction.set("length", length.to_string());
        }
        restriction.extend(
            self.strings
                .iter()
                .map(|string| Element::new("string").with_text(string.as_str())),
        );
        Ok(restriction)
    }
}

fn append_pattern_match(part: &mut Element, pattern_match: &PatternMatchPart) -> Result<()> {
    let display_answer = content_node(&pattern_match.display_answer)?;
    part.append(skeleton!(["displayanswer", (display_answer)]).build());
    part.append(Element::new("correctanswer").with_text(pattern_match.answer.as_str()));
    part.append(Element::with_attributes(
        "case",
        [
            ("sensitive", flag(pattern_match.case_sensitive).to_string()),
            ("partialcredit", percent(pattern_match.partial_credit)),
        ],
    ));
    Ok(())
}

fn append_number_entry(part: &mut Element, number_entry: &NumberEntryPart) {
    let integers_only = Element::with_attributes(
        "allowonlyintegeranswers",
        [
            ("value", flag(number_entry.integer_answer).to_string()),
            ("partialcredit", percent(number_entry.partial_credit)),
        ],
    );
    let mut answer = skeleton!(["answer", (integers_only)]).build();
    answer
        .set("checkingType", number_entry.checking_type.as_str())
        .set("inputstep", number_entry.input_step.to_string());
    if number_entry.is_range() {
        answer
            .set("minvalue", number_entry.min_value.to_text())
            .set("maxvalue", number_entry.max_value.to_text());
    } else {
        answer
            .set("answer", number_entry.answer.to_text())
            .set("accuracy", number_entry.checking_accuracy.to_text());
    }
    part.append(answer);
}

fn append_multiple_choice(part: &mut Element, choice: &MultipleChoicePart) -> Result<()> {
    let mut choices = Element::with_attributes(
        "choices",
        [
            ("minimumexpected", choice.min_answers.to_string()),
            ("maximumexpected", choice.max_answers.to_string()),
            ("displaycolumns", choice.display_columns.to_string()),
            ("order", order(choice.shuffle_choices).to_string()),
            ("displaytype", choice.display_type.clone()),
        ],
    );
    for text in &choice.choices {
        choices.append(skeleton!(["choice", (content_node(text)?)]).build());
    }

    let mut answers =
        Element::with_attributes("answers", [("order", order(choice.shuffle_answers))]);
    for text in &choice.answers {
        answers.append(skeleton!(["answer", (content_node(text)?)]).build());
    }

    let mut matrix = Element::new("matrix");
    match &choice.matrix {
        Matrix::Formula(definition) => {
            matrix.set("def", definition.as_str());
        }
        Matrix::Table(rows) => {
            for (choice_index, row) in rows.iter().enumerate() {
                for (answer_index, value) in row.iter().enumerate() {
                    matrix.append(Element::with_attributes(
                        "mark",
                        [
                            ("answerindex", answer_index.to_string()),
                            ("choiceindex", choice_index.to_string()),
                            ("value", value.to_text()),
                        ],
                    ));
                }
            }
        }
    }

    let max_marks = Element::with_attributes(
        "maxmarks",
        [
            ("enabled", flag(choice.max_marks_enabled).to_string()),
            ("value", choice.max_marks.to_string()),
        ],
    );
    let min_marks = Element::with_attributes(
        "minmarks",
        [
            ("enabled", flag(choice.min_marks_enabled).to_string()),
            ("value", choice.min_marks.to_string()),
        ],
    );

    let mut distractors = Element::new("distractors");
    for (choice_index, row) in choice.distractors.iter().enumerate() {
        for (answer_index, text) in row.iter().enumerate() {
            let mut distractor = skeleton!(["distractor", (content_node(text)?)]).build();
            distractor
                .set("choiceindex", choice_index.to_string())
                .set("answerindex", answer_index.to_string());
            distractors.append(distractor);
        }
    }

    part.append(choices);
    part.append(answers);
    part.append(skeleton!(["marking", (matrix), (max_marks), (min_marks), (distractors)]).build());
    Ok(())
}

fn append_gapfill(part: &mut Element, gapfill: &GapFillPart) -> Result<()> {
    part.append(collection("gaps", &gapfill.gaps)?);
    Ok(())
}

/// A container element holding the markup of every item, in order.
fn collection<T: ToMarkup>(tag: &str, items: &[T]) -> Result<Element> {
    let mut element = Element::new(tag);
    for item in items {
        element.append(item.to_markup()?);
    }
    Ok(element)
}

fn all_to_markup<'a, T, I>(items: I) -> Result<Vec<Element>>
where
    T: ToMarkup + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(ToMarkup::to_markup).collect()
}
