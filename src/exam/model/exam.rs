//! The exam: settings plus the questions it contains

use super::{
    expect_mapping, mapping_field, sequence_field, Event, Function, Question, Ruleset, Variable,
};
use crate::exam::error::{ExamError, Result};
use crate::exam::notation;
use crate::exam::value::{Data, Number, Value};

const UNFINISHED_QUESTION: &str = "You have not finished the current question";

#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub allow_regen: bool,
    pub reverse: bool,
    pub browse: bool,
    pub show_frontpage: bool,
    pub on_advance: Event,
    pub on_reverse: Event,
    pub on_move: Event,
}

impl Default for Navigation {
    fn default() -> Self {
        Self {
            allow_regen: false,
            reverse: true,
            browse: true,
            show_frontpage: true,
            on_advance: Event::new("onadvance", "none", UNFINISHED_QUESTION),
            on_reverse: Event::new("onreverse", "none", UNFINISHED_QUESTION),
            on_move: Event::new("onmove", "none", UNFINISHED_QUESTION),
        }
    }
}

impl Navigation {
    fn load(&mut self, data: &Data) -> Result<()> {
        crate::load_fields!(data, self, {
            allow_regen => "allowregen",
            reverse => "reverse",
            browse => "browse",
            show_frontpage => "showfrontpage",
        });
        for event in [&mut self.on_advance, &mut self.on_reverse, &mut self.on_move] {
            if let Some(source) = mapping_field(data, &event.kind)? {
                event.load(source)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub timeout: Event,
    pub timed_warning: Event,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            timeout: Event::new("timeout", "none", ""),
            timed_warning: Event::new("timedwarning", "none", ""),
        }
    }
}

impl Timing {
    fn load(&mut self, data: &Data) -> Result<()> {
        for event in [&mut self.timeout, &mut self.timed_warning] {
            if let Some(source) = mapping_field(data, &event.kind)? {
                event.load(source)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub show_actual_mark: bool,
    pub show_total_mark: bool,
    pub show_answer_state: bool,
    pub allow_reveal_answer: bool,
    /// When advice is shown; only `onreveal` is understood by the player.
    pub advice_type: String,
    /// Advice is revealed below this percentage.
    pub advice_threshold: Number,
}

impl Default for Feedback {
    fn default() -> Self {
        Self {
            show_actual_mark: true,
            show_total_mark: true,
            show_answer_state: true,
            allow_reveal_answer: true,
            advice_type: "onreveal".to_string(),
            advice_threshold: Number::ZERO,
        }
    }
}

impl Feedback {
    fn load(&mut self, data: &Data) -> Result<()> {
        crate::load_fields!(data, self, {
            show_actual_mark => "showactualmark",
            show_total_mark => "showtotalmark",
            show_answer_state => "showanswerstate",
            allow_reveal_answer => "allowrevealanswer",
        });
        if let Some(advice) = mapping_field(data, "advice")? {
            crate::load_fields!(advice, self, {
                advice_type => "type",
                advice_threshold => "threshold",
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Exam {
    pub name: String,
    /// Allowed time in seconds; 0 means untimed.
    pub duration: Number,
    pub percent_pass: Number,
    pub shuffle_questions: bool,
    pub navigation: Navigation,
    pub timing: Timing,
    pub feedback: Feedback,
    pub rulesets: Vec<Ruleset>,
    pub functions: Vec<Function>,
    pub variables: Vec<Variable>,
    pub questions: Vec<Question>,
    /// Carried through untouched; not part of the XML.
    pub resources: Vec<Value>,
    pub extensions: Vec<Value>,
}

impl Default for Exam {
    fn default() -> Self {
        Self {
            name: "Untitled Exam".to_string(),
            duration: Number::ZERO,
            percent_pass: Number::ZERO,
            shuffle_questions: false,
            navigation: Navigation::default(),
            timing: Timing::default(),
            feedback: Feedback::default(),
            rulesets: Vec::new(),
            functions: Vec::new(),
            variables: Vec::new(),
            questions: Vec::new(),
            resources: Vec::new(),
            extensions: Vec::new(),
        }
    }
}

impl Exam {
    /// Parse exam notation and build the model from it.
    pub fn from_source(source: &str) -> Result<Self> {
        match notation::parse(source)? {
            Value::Mapping(data) => Exam::from_data(&data),
            other => Err(ExamError::FieldType {
                key: "exam".to_string(),
                expected: "a mapping",
                found: other.type_name().to_string(),
            }),
        }
    }

    pub fn from_data(data: &Data) -> Result<Self> {
        let mut exam = Exam::default();
        crate::load_fields!(data, exam, {
            name => "name",
            duration => "duration",
            percent_pass => "percentPass",
            shuffle_questions => "shuffleQuestions",
            resources => "resources",
            extensions => "extensions",
        });

        if let Some(navigation) = mapping_field(data, "navigation")? {
            exam.navigation.load(navigation)?;
        }
        if let Some(timing) = mapping_field(data, "timing")? {
            exam.timing.load(timing)?;
        }
        if let Some(feedback) = mapping_field(data, "feedback")? {
            exam.feedback.load(feedback)?;
        }

        exam.rulesets = Ruleset::all_from_data(data)?;
        exam.functions = Function::all_from_data(data)?;
        exam.variables = Variable::all_from_data(data)?;
        exam.questions = sequence_field(data, "questions")?
            .iter()
            .map(|question| Question::from_data(expect_mapping("questions", question)?))
            .collect::<Result<Vec<_>>>()?;

        Ok(exam)
    }
}
