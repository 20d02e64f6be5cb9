//! Undo history driven through the public command factories.

use ktutorial_commands::{
    Command, CommandGroup, UndoStack, reaction_commands, step_commands, tutorial_commands,
};
use ktutorial_model::{
    Reaction, ReactionKey, ResponseType, Step, StepKey, TriggerType, Tutorial, WaitForWindow,
};
use proptest::prelude::*;

struct Fixture {
    tutorial: Tutorial,
    step: StepKey,
    reaction: ReactionKey,
}

fn fixture() -> Fixture {
    let mut tutorial = Tutorial::new();
    tutorial.set_name("Fixture");
    let mut step = Step::with_id("start");
    step.set_text("Some text");
    let reaction = Reaction::new();
    let reaction_key = reaction.key();
    step.add_reaction(reaction);
    let step_key = step.key();
    tutorial.add_step(step);
    tutorial.add_step(Step::with_id("end"));
    Fixture {
        tutorial,
        step: step_key,
        reaction: reaction_key,
    }
}

fn reference() -> Tutorial {
    fixture().tutorial
}

#[derive(Debug, Clone)]
enum Edit {
    TutorialName(String),
    StepId(String),
    StepSetup(String),
    Trigger(bool),
    Response(bool),
    OptionName(String),
    NextStep(String),
    Condition(Option<String>),
    AddStep(String),
    /// Add a new reaction, or remove the fixture's reaction.
    Reaction(bool),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    let text = "[a-zA-Z \n\"]{0,12}";
    prop_oneof![
        text.prop_map(Edit::TutorialName),
        text.prop_map(Edit::StepId),
        text.prop_map(Edit::StepSetup),
        any::<bool>().prop_map(Edit::Trigger),
        any::<bool>().prop_map(Edit::Response),
        text.prop_map(Edit::OptionName),
        text.prop_map(Edit::NextStep),
        proptest::option::of(text).prop_map(Edit::Condition),
        text.prop_map(Edit::AddStep),
        any::<bool>().prop_map(Edit::Reaction),
    ]
}

fn command_for(edit: Edit, fixture: &Fixture) -> Box<dyn Command> {
    match edit {
        Edit::TutorialName(name) => Box::new(tutorial_commands::set_name(name)),
        Edit::StepId(id) => Box::new(step_commands::set_id(fixture.step, id)),
        Edit::StepSetup(code) => Box::new(step_commands::set_custom_setup_code(fixture.step, code)),
        Edit::Trigger(met) => Box::new(reaction_commands::set_trigger_type(
            fixture.reaction,
            if met {
                TriggerType::ConditionMet
            } else {
                TriggerType::OptionSelected
            },
        )),
        Edit::Response(custom) => Box::new(reaction_commands::set_response_type(
            fixture.reaction,
            if custom {
                ResponseType::CustomCode
            } else {
                ResponseType::NextStep
            },
        )),
        Edit::OptionName(name) => {
            Box::new(reaction_commands::set_option_name(fixture.reaction, name))
        }
        Edit::NextStep(id) => Box::new(reaction_commands::set_next_step_id(fixture.reaction, id)),
        Edit::Condition(window) => Box::new(reaction_commands::set_wait_for(
            fixture.reaction,
            window.map(|name| WaitForWindow::new(name).into()),
        )),
        Edit::AddStep(id) => Box::new(tutorial_commands::add_step(Step::with_id(id)).at(0)),
        Edit::Reaction(true) => Box::new(step_commands::add_reaction(fixture.step, Reaction::new())),
        Edit::Reaction(false) => Box::new(step_commands::remove_reaction(
            fixture.step,
            fixture.reaction,
        )),
    }
}

proptest! {
    #[test]
    fn undoing_every_edit_restores_the_document(edits in prop::collection::vec(edit_strategy(), 1..24)) {
        let mut fixture = fixture();
        let mut stack = UndoStack::new();

        for edit in edits {
            let command = command_for(edit, &fixture);
            // Edits of the removed reaction fail and are not recorded.
            let _ = stack.push(&mut fixture.tutorial, command);
        }
        while stack.undo(&mut fixture.tutorial).unwrap() {}

        prop_assert_eq!(&fixture.tutorial, &reference());
        prop_assert!(fixture.tutorial.contains_step(fixture.step));
        prop_assert!(fixture.tutorial.reaction(fixture.reaction).is_some());
    }
}

#[test]
fn test_redo_after_full_undo_reaches_final_state() {
    let mut fixture = fixture();
    let mut stack = UndoStack::new();
    let commands: Vec<Box<dyn Command>> = vec![
        Box::new(tutorial_commands::set_name("Renamed")),
        Box::new(step_commands::remove_reaction(fixture.step, fixture.reaction)),
        Box::new(tutorial_commands::add_step(Step::with_id("middle")).at(1)),
    ];
    for command in commands {
        stack.push(&mut fixture.tutorial, command).unwrap();
    }
    let ids = |tutorial: &Tutorial| -> Vec<String> {
        tutorial.steps().iter().map(|step| step.id().to_string()).collect()
    };
    assert_eq!(ids(&fixture.tutorial), ["start", "middle", "end"]);

    while stack.undo(&mut fixture.tutorial).unwrap() {}
    assert_eq!(fixture.tutorial, reference());

    while stack.redo(&mut fixture.tutorial).unwrap() {}
    assert_eq!(fixture.tutorial.name(), "Renamed");
    assert_eq!(ids(&fixture.tutorial), ["start", "middle", "end"]);
    assert!(fixture.tutorial.reaction(fixture.reaction).is_none());
}

#[test]
fn test_grouped_edit_is_one_history_entry() {
    let mut fixture = fixture();
    let mut stack = UndoStack::new();

    let mut group = CommandGroup::new();
    group.push(reaction_commands::set_trigger_type(
        fixture.reaction,
        TriggerType::ConditionMet,
    ));
    group.push(reaction_commands::set_wait_for(
        fixture.reaction,
        Some(WaitForWindow::new("dialog").into()),
    ));
    group.push(reaction_commands::set_next_step_id(fixture.reaction, "end"));
    assert!(stack.commit(&mut fixture.tutorial, group, "Set reaction data").unwrap());

    assert_eq!(stack.len(), 1);
    assert_eq!(stack.undo_text(), Some("Set reaction data"));
    stack.undo(&mut fixture.tutorial).unwrap();
    assert_eq!(fixture.tutorial, reference());
}
