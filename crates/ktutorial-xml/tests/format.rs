//! Layout of the XML working format.

use ktutorial_model::{
    CompositionType, Reaction, ResponseType, Step, TriggerType, Tutorial, WaitForComposed,
    WaitForNot, WaitForSignal, WaitForWindow,
};
use ktutorial_xml::{read_tutorial, write_tutorial};

fn sample_tutorial() -> Tutorial {
    let mut tutorial = Tutorial::new();
    tutorial.set_name("Using the text editor");
    tutorial.set_description("Learn to type");
    tutorial.set_license_text("GPL");

    let mut start = Step::with_id("start");
    start.set_text("Hello");
    let mut option = Reaction::new();
    option.set_option_name("Continue");
    option.set_next_step_id("write");
    start.add_reaction(option);
    tutorial.add_step(start);

    let mut write = Step::with_id("write");
    write.set_text("Write");
    write.set_custom_setup_code("prepare();");
    let mut condition = Reaction::new();
    condition.set_trigger_type(TriggerType::ConditionMet);
    condition.set_response_type(ResponseType::CustomCode);
    let mut composed = WaitForComposed::new(CompositionType::And);
    composed.add_wait_for(WaitForSignal::new("textEdit", "textChanged()").into());
    composed.add_wait_for(WaitForNot::with_negated(WaitForWindow::new("dialog").into()).into());
    condition.set_wait_for(Some(composed.into()));
    condition.set_custom_code("tutorial.finish();");
    write.add_reaction(condition);
    tutorial.add_step(write);

    tutorial
}

#[test]
fn test_canonical_layout() {
    let xml = write_tutorial(&sample_tutorial()).unwrap();
    insta::assert_snapshot!(xml.trim_end(), @r#"
<?xml version="1.0" encoding="UTF-8"?>
<tutorial name="Using the text editor">
    <description>Learn to type</description>
    <license>GPL</license>
    <step id="start">
        <text>Hello</text>
        <reaction triggerType="OptionSelected" responseType="NextStep">
            <option name="Continue"/>
            <nextStep id="write"/>
        </reaction>
    </step>
    <step id="write">
        <text>Write</text>
        <setup>prepare();</setup>
        <reaction triggerType="ConditionMet" responseType="CustomCode">
            <waitForComposed compositionType="And">
                <waitForSignal emitterName="textEdit" signalName="textChanged()"/>
                <waitForNot>
                    <waitForWindow windowObjectName="dialog"/>
                </waitForNot>
            </waitForComposed>
            <customCode>tutorial.finish();</customCode>
        </reaction>
    </step>
</tutorial>
"#);
}

#[test]
fn test_canonical_layout_reads_back() {
    let tutorial = sample_tutorial();
    let read = read_tutorial(&write_tutorial(&tutorial).unwrap()).unwrap();
    assert_eq!(read, tutorial);
    assert_eq!(read.id(), "usingTheTextEditor");
}
