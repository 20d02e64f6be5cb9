//! Building whole documents through the public API.

use ktutorial_model::{
    CompositionType, ResponseType, Reaction, Step, TriggerType, Tutorial, WaitFor,
    WaitForComposed, WaitForEvent, WaitForNot, WaitForProperty, WaitForStepActivation,
};

fn sample_tutorial() -> Tutorial {
    let mut tutorial = Tutorial::new();
    tutorial.set_name("Sample tutorial");
    tutorial.set_description("Shows every reaction kind");

    let mut start = Step::with_id("start");
    start.set_text("Welcome to <emphasis>KTutorial</emphasis>");

    let mut option = Reaction::new();
    option.set_option_name("Continue");
    option.set_next_step_id("end");
    start.add_reaction(option);

    let mut condition = Reaction::new();
    condition.set_trigger_type(TriggerType::ConditionMet);
    condition.set_response_type(ResponseType::CustomCode);
    condition.set_custom_code("tutorial.nextStep(\"end\");\n");
    let mut composed = WaitForComposed::new(CompositionType::Or);
    composed.add_wait_for(WaitForEvent::new("textEdit", "FocusIn").into());
    composed.add_wait_for(
        WaitForNot::with_negated(WaitForProperty::new("check", "checked", "true").into()).into(),
    );
    composed.add_wait_for(WaitForStepActivation::new().into());
    condition.set_wait_for(Some(composed.into()));
    start.add_reaction(condition);

    tutorial.add_step(start);
    tutorial.add_step(Step::with_id("end"));
    tutorial
}

#[test]
fn test_rebuilding_a_document_gives_an_equal_document() {
    let first = sample_tutorial();
    let second = sample_tutorial();
    assert_eq!(first, second);
    assert_ne!(first.steps()[0].key(), second.steps()[0].key());
}

#[test]
fn test_nested_condition_is_reachable_through_reaction() {
    let mut tutorial = sample_tutorial();
    let key = tutorial.steps()[0].reactions()[1].key();

    let reaction = tutorial.reaction_mut(key).expect("reaction exists");
    let Some(WaitFor::Composed(composed)) = reaction.wait_for_mut() else {
        panic!("expected composed condition");
    };
    let Some(WaitFor::Event(event)) = composed.wait_for_mut(0) else {
        panic!("expected event condition");
    };
    event.set_event_name("FocusOut");

    assert_ne!(tutorial, sample_tutorial());
    let condition = tutorial.reaction(key).and_then(Reaction::wait_for);
    assert_eq!(condition.map(WaitFor::node_count), Some(5));
}

#[test]
fn test_enum_literals_serialize_as_names() {
    let json = serde_json::to_string(&[TriggerType::ConditionMet, TriggerType::OptionSelected])
        .expect("serialize");
    assert_eq!(json, r#"["ConditionMet","OptionSelected"]"#);
    let parsed: ResponseType = serde_json::from_str(r#""CustomCode""#).expect("deserialize");
    assert_eq!(parsed, ResponseType::CustomCode);
}
