//! Tutorial to XML.

use std::borrow::Cow;
use std::io::Write;

use anyhow::{Context, Result};
use ktutorial_model::{Reaction, Step, Tutorial, WaitFor};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;

use crate::error::SerializationError;

/// Serialize a tutorial as an indented UTF-8 XML document.
pub fn write_tutorial(tutorial: &Tutorial) -> std::result::Result<String, SerializationError> {
    let mut buffer = Vec::new();
    write_tutorial_to(tutorial, &mut buffer)?;
    let xml = String::from_utf8(buffer).context("writer produced invalid UTF-8")?;
    tracing::debug!(
        steps = tutorial.steps().len(),
        bytes = xml.len(),
        "serialized tutorial"
    );
    Ok(xml)
}

/// Serialize a tutorial into `out`.
pub fn write_tutorial_to<W: Write>(
    tutorial: &Tutorial,
    out: W,
) -> std::result::Result<(), SerializationError> {
    write_document(tutorial, out).map_err(SerializationError::from)
}

fn write_document<W: Write>(tutorial: &Tutorial, out: W) -> Result<()> {
    let mut xml = Writer::new_with_indent(out, b' ', 4);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("tutorial");
    push_optional_attribute(&mut root, "name", tutorial.name());
    xml.write_event(Event::Start(root))?;

    write_optional_text(&mut xml, "description", tutorial.description())?;
    write_optional_text(&mut xml, "license", tutorial.license_text())?;
    write_optional_text(&mut xml, "setup", tutorial.custom_setup_code())?;
    write_optional_text(&mut xml, "tearDown", tutorial.custom_tear_down_code())?;
    for step in tutorial.steps() {
        write_step(&mut xml, step).with_context(|| format!("step {:?}", step.id()))?;
    }

    xml.write_event(Event::End(BytesEnd::new("tutorial")))?;
    xml.get_mut().write_all(b"\n")?;
    Ok(())
}

fn write_step<W: Write>(xml: &mut Writer<W>, step: &Step) -> Result<()> {
    let mut start = BytesStart::new("step");
    push_optional_attribute(&mut start, "id", step.id());
    xml.write_event(Event::Start(start))?;

    write_optional_text(xml, "text", step.text())?;
    write_optional_text(xml, "setup", step.custom_setup_code())?;
    write_optional_text(xml, "tearDown", step.custom_tear_down_code())?;
    for reaction in step.reactions() {
        write_reaction(xml, reaction)?;
    }

    xml.write_event(Event::End(BytesEnd::new("step")))?;
    Ok(())
}

fn write_reaction<W: Write>(xml: &mut Writer<W>, reaction: &Reaction) -> Result<()> {
    let mut start = BytesStart::new("reaction");
    push_attribute(&mut start, "triggerType", reaction.trigger_type().as_str());
    push_attribute(&mut start, "responseType", reaction.response_type().as_str());
    xml.write_event(Event::Start(start))?;

    if !reaction.option_name().is_empty() {
        let mut option = BytesStart::new("option");
        push_attribute(&mut option, "name", reaction.option_name());
        xml.write_event(Event::Empty(option))?;
    }
    if let Some(wait_for) = reaction.wait_for() {
        write_wait_for(xml, wait_for)?;
    }
    write_optional_text(xml, "customCode", reaction.custom_code())?;
    if !reaction.next_step_id().is_empty() {
        let mut next_step = BytesStart::new("nextStep");
        push_attribute(&mut next_step, "id", reaction.next_step_id());
        xml.write_event(Event::Empty(next_step))?;
    }

    xml.write_event(Event::End(BytesEnd::new("reaction")))?;
    Ok(())
}

fn write_wait_for<W: Write>(xml: &mut Writer<W>, wait_for: &WaitFor) -> Result<()> {
    let mut start = BytesStart::new(wait_for.kind_name());
    match wait_for {
        WaitFor::Event(event) => {
            push_optional_attribute(&mut start, "receiverName", event.receiver_name());
            push_optional_attribute(&mut start, "eventName", event.event_name());
        }
        WaitFor::Property(property) => {
            push_optional_attribute(&mut start, "objectName", property.object_name());
            push_optional_attribute(&mut start, "propertyName", property.property_name());
            push_optional_attribute(&mut start, "value", property.value());
        }
        WaitFor::Signal(signal) => {
            push_optional_attribute(&mut start, "emitterName", signal.emitter_name());
            push_optional_attribute(&mut start, "signalName", signal.signal_name());
        }
        WaitFor::Window(window) => {
            push_optional_attribute(&mut start, "windowObjectName", window.window_object_name());
        }
        WaitFor::StepActivation(_) | WaitFor::Not(_) => {}
        WaitFor::Composed(composed) => {
            push_attribute(&mut start, "compositionType", composed.composition_type().as_str());
        }
    }

    let children = wait_for.children();
    if children.is_empty() {
        xml.write_event(Event::Empty(start))?;
        return Ok(());
    }
    xml.write_event(Event::Start(start))?;
    for child in children {
        write_wait_for(xml, child)?;
    }
    xml.write_event(Event::End(BytesEnd::new(wait_for.kind_name())))?;
    Ok(())
}

fn push_optional_attribute(start: &mut BytesStart<'_>, name: &str, value: &str) {
    if !value.is_empty() {
        push_attribute(start, name, value);
    }
}

/// Readers normalize raw white space in attribute values to spaces, so
/// newlines, carriage returns and tabs are written as character references.
fn push_attribute(start: &mut BytesStart<'_>, name: &str, value: &str) {
    let escaped = escape_attribute(value);
    start.push_attribute(Attribute {
        key: QName(name.as_bytes()),
        value: Cow::Owned(escaped.into_bytes()),
    });
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for character in escape(value).chars() {
        match character {
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Write `<name>text</name>`, or nothing if `text` is empty.
fn write_optional_text<W: Write>(xml: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    xml.write_event(Event::Text(BytesText::new(text)))?;
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
