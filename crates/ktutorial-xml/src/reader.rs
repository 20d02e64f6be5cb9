//! XML to tutorial.
//!
//! The reader walks the event stream once. Elements and attributes it does
//! not know are skipped, missing ones leave the default value in place.
//! Every tag and reference is still checked for well-formedness, skipped
//! ones included.

use std::borrow::Cow;

use ktutorial_model::{
    CompositionType, Reaction, ResponseType, Step, TriggerType, Tutorial, WaitFor,
    WaitForComposed, WaitForEvent, WaitForNot, WaitForProperty, WaitForSignal,
    WaitForStepActivation, WaitForWindow,
};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};

use crate::error::DeserializationError;

type Result<T> = std::result::Result<T, DeserializationError>;

/// Deepest condition tree accepted, counting the condition of the reaction.
pub const MAX_CONDITION_DEPTH: usize = 256;

const WAIT_FOR_ELEMENTS: [&str; 7] = [
    "waitForComposed",
    "waitForEvent",
    "waitForNot",
    "waitForProperty",
    "waitForSignal",
    "waitForStepActivation",
    "waitForWindow",
];

/// Parse a tutorial document.
pub fn read_tutorial(xml: &str) -> Result<Tutorial> {
    let mut parser = Parser::new(xml);
    let (root, empty) = parser.root()?;
    let name = element_name(&root);
    if name != "tutorial" {
        return Err(DeserializationError::UnexpectedRoot { found: name });
    }

    let tutorial = parser.tutorial(&root, empty)?;
    parser.epilog()?;
    tracing::debug!(steps = tutorial.steps().len(), "deserialized tutorial");
    Ok(tutorial)
}

struct Parser<'a> {
    input: &'a str,
    reader: Reader<&'a [u8]>,
    condition_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            reader: Reader::from_str(input),
            condition_depth: 0,
        }
    }

    fn next(&mut self) -> Result<Event<'a>> {
        let event = match self.reader.read_event() {
            Ok(event) => event,
            Err(error) => {
                let position = offset(self.reader.error_position());
                return Err(self.malformed_at(error.to_string(), position));
            }
        };
        match &event {
            Event::Start(start) | Event::Empty(start) => self.check_attributes(start)?,
            Event::GeneralRef(reference) => {
                self.resolve(reference)?;
            }
            _ => {}
        }
        Ok(event)
    }

    /// Reject malformed, duplicated or unresolvable attributes of a tag.
    fn check_attributes(&self, start: &BytesStart<'_>) -> Result<()> {
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|error| self.malformed(error.to_string()))?;
            if attribute.value.contains(&b'<') {
                let name = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
                return Err(self.malformed(format!(
                    "'<' is not allowed in the value of attribute '{name}'"
                )));
            }
            attribute
                .decode_and_unescape_value(self.reader.decoder())
                .map_err(|error| self.malformed(error.to_string()))?;
        }
        Ok(())
    }

    fn malformed(&self, message: impl Into<String>) -> DeserializationError {
        let position = offset(self.reader.buffer_position());
        self.malformed_at(message.into(), position)
    }

    fn malformed_at(&self, message: String, position: usize) -> DeserializationError {
        let (line, column) = line_and_column(self.input, position);
        DeserializationError::Malformed {
            message,
            line,
            column,
        }
    }

    /// Skip the prolog and return the root element.
    fn root(&mut self) -> Result<(BytesStart<'a>, bool)> {
        loop {
            match self.next()? {
                Event::Start(start) => return Ok((start, false)),
                Event::Empty(start) => return Ok((start, true)),
                Event::Text(text) if is_blank(&text) => {}
                Event::Text(_) | Event::CData(_) | Event::GeneralRef(_) => {
                    return Err(self.malformed("content is not allowed in prolog"));
                }
                Event::End(_) => return Err(self.malformed("unexpected end tag")),
                Event::Eof => return Err(self.malformed("premature end of document")),
                _ => {}
            }
        }
    }

    /// Only comments, processing instructions and white space may follow
    /// the root element.
    fn epilog(&mut self) -> Result<()> {
        loop {
            match self.next()? {
                Event::Eof => return Ok(()),
                Event::Text(text) if is_blank(&text) => {}
                Event::Comment(_) | Event::PI(_) => {}
                _ => return Err(self.malformed("extra content at the end of the document")),
            }
        }
    }

    /// Visit the child elements of the element just opened, consuming the
    /// element up to and including its end tag.
    ///
    /// `visit` must consume each child it receives.
    fn children<F>(&mut self, empty: bool, mut visit: F) -> Result<()>
    where
        F: FnMut(&mut Self, BytesStart<'a>, bool) -> Result<()>,
    {
        if empty {
            return Ok(());
        }
        loop {
            match self.next()? {
                Event::Start(start) => visit(self, start, false)?,
                Event::Empty(start) => visit(self, start, true)?,
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(self.malformed("premature end of document")),
                _ => {}
            }
        }
    }

    /// Consume the element just opened without looking at it.
    fn skip(&mut self, empty: bool) -> Result<()> {
        if empty {
            return Ok(());
        }
        let mut depth = 0usize;
        loop {
            match self.next()? {
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => return Ok(()),
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(self.malformed("premature end of document")),
                _ => {}
            }
        }
    }

    /// All the text inside the element just opened, descendants included.
    fn text(&mut self, empty: bool) -> Result<String> {
        let mut content = String::new();
        if empty {
            return Ok(content);
        }
        let mut depth = 0usize;
        loop {
            match self.next()? {
                Event::Text(text) => content.push_str(&self.decode(&text)?),
                Event::CData(data) => content.push_str(&self.decode(&data)?),
                Event::GeneralRef(reference) => content.push_str(&self.resolve(&reference)?),
                Event::Start(_) => depth += 1,
                Event::End(_) if depth == 0 => return Ok(content),
                Event::End(_) => depth -= 1,
                Event::Eof => return Err(self.malformed("premature end of document")),
                _ => {}
            }
        }
    }

    fn decode<'b>(&self, bytes: &'b [u8]) -> Result<Cow<'b, str>> {
        self.reader
            .decoder()
            .decode(bytes)
            .map_err(|error| self.malformed(error.to_string()))
    }

    fn resolve(&self, reference: &BytesRef<'_>) -> Result<String> {
        if let Some(character) = reference
            .resolve_char_ref()
            .map_err(|error| self.malformed(error.to_string()))?
        {
            return Ok(character.to_string());
        }
        let name = self.decode(reference)?;
        match resolve_predefined_entity(&name) {
            Some(value) => Ok(value.to_string()),
            None => Err(self.malformed(format!("entity '{name}' not declared"))),
        }
    }

    fn attribute(&self, start: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|error| self.malformed(error.to_string()))?;
            if attribute.key.as_ref() == name.as_bytes() {
                let value = attribute
                    .decode_and_unescape_value(self.reader.decoder())
                    .map_err(|error| self.malformed(error.to_string()))?;
                return Ok(Some(value.into_owned()));
            }
        }
        Ok(None)
    }

    fn tutorial(&mut self, start: &BytesStart<'a>, empty: bool) -> Result<Tutorial> {
        let mut tutorial = Tutorial::new();
        if let Some(name) = self.attribute(start, "name")? {
            tutorial.set_name(name);
        }

        self.children(empty, |parser, child, empty| {
            match element_name(&child).as_str() {
                "description" => tutorial.set_description(parser.text(empty)?),
                "license" => tutorial.set_license_text(parser.text(empty)?),
                "setup" => tutorial.set_custom_setup_code(parser.text(empty)?),
                "tearDown" => tutorial.set_custom_tear_down_code(parser.text(empty)?),
                "step" => tutorial.add_step(parser.step(&child, empty)?),
                _ => parser.skip(empty)?,
            }
            Ok(())
        })?;
        Ok(tutorial)
    }

    fn step(&mut self, start: &BytesStart<'a>, empty: bool) -> Result<Step> {
        let mut step = Step::new();
        if let Some(id) = self.attribute(start, "id")? {
            step.set_id(id);
        }

        self.children(empty, |parser, child, empty| {
            match element_name(&child).as_str() {
                "text" => step.set_text(parser.text(empty)?),
                "setup" => step.set_custom_setup_code(parser.text(empty)?),
                "tearDown" => step.set_custom_tear_down_code(parser.text(empty)?),
                "reaction" => step.add_reaction(parser.reaction(&child, empty)?),
                _ => parser.skip(empty)?,
            }
            Ok(())
        })?;
        Ok(step)
    }

    fn reaction(&mut self, start: &BytesStart<'a>, empty: bool) -> Result<Reaction> {
        let mut reaction = Reaction::new();
        if let Some(trigger_type) = self.attribute(start, "triggerType")? {
            reaction.set_trigger_type(trigger_type.parse::<TriggerType>().unwrap_or_default());
        }
        if let Some(response_type) = self.attribute(start, "responseType")? {
            reaction.set_response_type(response_type.parse::<ResponseType>().unwrap_or_default());
        }

        self.children(empty, |parser, child, empty| {
            let name = element_name(&child);
            match name.as_str() {
                "option" => {
                    if let Some(option_name) = parser.attribute(&child, "name")? {
                        reaction.set_option_name(option_name);
                    }
                    parser.skip(empty)?;
                }
                "customCode" => reaction.set_custom_code(parser.text(empty)?),
                "nextStep" => {
                    if let Some(id) = parser.attribute(&child, "id")? {
                        reaction.set_next_step_id(id);
                    }
                    parser.skip(empty)?;
                }
                _ if is_wait_for_element(&name) => {
                    let wait_for = parser.wait_for(&child, empty)?;
                    reaction.set_wait_for(Some(wait_for));
                }
                _ => parser.skip(empty)?,
            }
            Ok(())
        })?;
        Ok(reaction)
    }

    /// Parse a condition element; the caller checks the element name first.
    fn wait_for(&mut self, start: &BytesStart<'a>, empty: bool) -> Result<WaitFor> {
        if self.condition_depth == MAX_CONDITION_DEPTH {
            return Err(self.malformed(format!(
                "conditions nested deeper than {MAX_CONDITION_DEPTH} levels"
            )));
        }
        self.condition_depth += 1;
        let wait_for = self.condition(start, empty);
        self.condition_depth -= 1;
        wait_for
    }

    fn condition(&mut self, start: &BytesStart<'a>, empty: bool) -> Result<WaitFor> {
        let wait_for = match element_name(start).as_str() {
            "waitForComposed" => {
                let composition_type = self
                    .attribute(start, "compositionType")?
                    .map(|value| value.parse::<CompositionType>().unwrap_or_default())
                    .unwrap_or_default();
                let mut composed = WaitForComposed::new(composition_type);
                self.children(empty, |parser, child, empty| {
                    if is_wait_for_element(&element_name(&child)) {
                        composed.add_wait_for(parser.wait_for(&child, empty)?);
                    } else {
                        parser.skip(empty)?;
                    }
                    Ok(())
                })?;
                return Ok(composed.into());
            }
            "waitForNot" => {
                let mut not = WaitForNot::new();
                self.children(empty, |parser, child, empty| {
                    if is_wait_for_element(&element_name(&child)) {
                        let negated = parser.wait_for(&child, empty)?;
                        not.set_negated_wait_for(Some(negated));
                    } else {
                        parser.skip(empty)?;
                    }
                    Ok(())
                })?;
                return Ok(not.into());
            }
            "waitForEvent" => WaitForEvent::new(
                self.attribute(start, "receiverName")?.unwrap_or_default(),
                self.attribute(start, "eventName")?.unwrap_or_default(),
            )
            .into(),
            "waitForProperty" => WaitForProperty::new(
                self.attribute(start, "objectName")?.unwrap_or_default(),
                self.attribute(start, "propertyName")?.unwrap_or_default(),
                self.attribute(start, "value")?.unwrap_or_default(),
            )
            .into(),
            "waitForSignal" => WaitForSignal::new(
                self.attribute(start, "emitterName")?.unwrap_or_default(),
                self.attribute(start, "signalName")?.unwrap_or_default(),
            )
            .into(),
            "waitForWindow" => WaitForWindow::new(
                self.attribute(start, "windowObjectName")?.unwrap_or_default(),
            )
            .into(),
            _ => WaitForStepActivation::new().into(),
        };
        self.skip(empty)?;
        Ok(wait_for)
    }
}

fn is_wait_for_element(name: &str) -> bool {
    WAIT_FOR_ELEMENTS.contains(&name)
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

fn offset(position: impl TryInto<usize>) -> usize {
    position.try_into().unwrap_or(usize::MAX)
}

/// One-based line and column of a byte offset into `input`.
fn line_and_column(input: &str, position: usize) -> (usize, usize) {
    let mut end = position.min(input.len());
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    let before = &input[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |index| index + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
