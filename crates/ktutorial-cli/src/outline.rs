//! Condensed view of a tutorial for `ktutorial inspect`.

use ktutorial_model::{ResponseType, Step, TriggerType, Tutorial, WaitFor};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorialOutline {
    pub name: String,
    pub description: String,
    pub steps: Vec<StepOutline>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutline {
    pub id: String,
    pub text: String,
    pub reactions: Vec<ReactionOutline>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReactionOutline {
    pub trigger_type: TriggerType,
    pub response_type: ResponseType,
    /// Option name or condition, depending on the trigger type.
    pub trigger: String,
    /// Next step id or custom code, depending on the response type.
    pub response: String,
    /// Nodes in the condition tree, zero without a condition.
    pub condition_nodes: usize,
    /// The next step id names no step of the tutorial.
    pub next_step_missing: bool,
}

impl TutorialOutline {
    pub fn new(tutorial: &Tutorial) -> Self {
        Self {
            name: tutorial.name().to_string(),
            description: tutorial.description().to_string(),
            steps: tutorial
                .steps()
                .iter()
                .map(|step| StepOutline::new(step, tutorial))
                .collect(),
        }
    }

    pub fn reaction_count(&self) -> usize {
        self.steps.iter().map(|step| step.reactions.len()).sum()
    }

    pub fn condition_node_count(&self) -> usize {
        self.steps
            .iter()
            .flat_map(|step| &step.reactions)
            .map(|reaction| reaction.condition_nodes)
            .sum()
    }
}

impl StepOutline {
    fn new(step: &Step, tutorial: &Tutorial) -> Self {
        let reactions = step
            .reactions()
            .iter()
            .map(|reaction| ReactionOutline {
                trigger_type: reaction.trigger_type(),
                response_type: reaction.response_type(),
                trigger: match reaction.trigger_type() {
                    TriggerType::OptionSelected => reaction.option_name().to_string(),
                    TriggerType::ConditionMet => reaction
                        .wait_for()
                        .map(describe_condition)
                        .unwrap_or_default(),
                },
                response: match reaction.response_type() {
                    ResponseType::NextStep => reaction.next_step_id().to_string(),
                    ResponseType::CustomCode => first_line(reaction.custom_code()),
                },
                condition_nodes: reaction.wait_for().map_or(0, WaitFor::node_count),
                next_step_missing: reaction.response_type() == ResponseType::NextStep
                    && !reaction.next_step_id().is_empty()
                    && tutorial.step_by_id(reaction.next_step_id()).is_none(),
            })
            .collect();

        Self {
            id: step.id().to_string(),
            text: first_line(step.text()),
            reactions,
        }
    }
}

/// One-line description of a condition tree.
pub fn describe_condition(wait_for: &WaitFor) -> String {
    match wait_for {
        WaitFor::Event(event) => {
            format!("event {} in {}", event.event_name(), event.receiver_name())
        }
        WaitFor::Property(property) => format!(
            "property {}.{} == {}",
            property.object_name(),
            property.property_name(),
            property.value()
        ),
        WaitFor::Signal(signal) => {
            format!("signal {} by {}", signal.signal_name(), signal.emitter_name())
        }
        WaitFor::Window(window) => format!("window {} shown", window.window_object_name()),
        WaitFor::StepActivation(_) => "step activation".to_string(),
        WaitFor::Composed(composed) => {
            let children: Vec<String> =
                composed.wait_fors().iter().map(describe_condition).collect();
            format!(
                "{}({})",
                composed.composition_type().as_str().to_lowercase(),
                children.join(", ")
            )
        }
        WaitFor::Not(not) => format!(
            "not({})",
            not.negated_wait_for()
                .map(describe_condition)
                .unwrap_or_default()
        ),
    }
}

fn first_line(text: &str) -> String {
    let mut lines = text.lines();
    let first = lines.next().unwrap_or_default();
    if lines.next().is_some() {
        format!("{first} …")
    } else {
        first.to_string()
    }
}

#[cfg(test)]
mod tests {
    use ktutorial_model::{
        CompositionType, Reaction, WaitForComposed, WaitForNot, WaitForSignal,
        WaitForStepActivation, WaitForWindow,
    };

    use super::*;

    #[test]
    fn test_describe_nested_condition() {
        let mut composed = WaitForComposed::new(CompositionType::Or);
        composed.add_wait_for(WaitForSignal::new("button", "clicked()").into());
        composed.add_wait_for(
            WaitForNot::with_negated(WaitForWindow::new("dialog").into()).into(),
        );
        composed.add_wait_for(WaitForStepActivation::new().into());
        assert_eq!(
            describe_condition(&composed.into()),
            "or(signal clicked() by button, not(window dialog shown), step activation)"
        );
        assert_eq!(describe_condition(&WaitForNot::new().into()), "not()");
    }

    #[test]
    fn test_outline_picks_fields_by_type() {
        let mut tutorial = Tutorial::new();
        tutorial.set_name("Tour");
        let mut step = Step::with_id("start");
        step.set_text("First line\nSecond line");

        let mut option = Reaction::new();
        option.set_option_name("Next");
        option.set_next_step_id("end");
        step.add_reaction(option);

        let mut condition = Reaction::new();
        condition.set_trigger_type(TriggerType::ConditionMet);
        condition.set_response_type(ResponseType::CustomCode);
        condition.set_custom_code("doSomething();");
        step.add_reaction(condition);
        tutorial.add_step(step);

        let outline = TutorialOutline::new(&tutorial);
        assert_eq!(outline.reaction_count(), 2);
        let step = &outline.steps[0];
        assert_eq!(step.text, "First line …");
        assert_eq!(step.reactions[0].trigger, "Next");
        assert_eq!(step.reactions[0].response, "end");
        assert_eq!(step.reactions[1].trigger, "");
        assert_eq!(step.reactions[1].response, "doSomething();");
        assert!(step.reactions[0].next_step_missing);
        assert!(!step.reactions[1].next_step_missing);
    }

    #[test]
    fn test_outline_counts_condition_nodes_and_known_steps() {
        let mut tutorial = Tutorial::new();
        let mut start = Step::with_id("start");
        let mut reaction = Reaction::new();
        reaction.set_trigger_type(TriggerType::ConditionMet);
        let mut composed = WaitForComposed::new(CompositionType::And);
        composed.add_wait_for(WaitForSignal::new("button", "clicked()").into());
        composed.add_wait_for(
            WaitForNot::with_negated(WaitForWindow::new("dialog").into()).into(),
        );
        reaction.set_wait_for(Some(composed.into()));
        reaction.set_next_step_id("end");
        start.add_reaction(reaction);
        tutorial.add_step(start);
        tutorial.add_step(Step::with_id("end"));

        let outline = TutorialOutline::new(&tutorial);
        let reaction = &outline.steps[0].reactions[0];
        assert_eq!(reaction.condition_nodes, 4);
        assert!(!reaction.next_step_missing);
        assert_eq!(outline.condition_node_count(), 4);
    }
}
