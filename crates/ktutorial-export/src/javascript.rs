//! Tutorial to KTutorial JavaScript.
//!
//! The generated script targets the Kross JavaScript interpreter used by the
//! KTutorial runtime. Missing data never stops the export: each incomplete
//! fragment is replaced by a `//Error: <message>` comment and the rest of the
//! tutorial is still written.

use std::collections::HashMap;

use ktutorial_model::naming::{to_lower_camel_case, to_upper_camel_case};
use ktutorial_model::{
    Reaction, ResponseType, Step, TriggerType, Tutorial, WaitFor, WaitForComposed, WaitForEvent,
    WaitForNot, WaitForProperty, WaitForSignal, WaitForWindow,
};
use tracing::debug;

use crate::markup::{might_be_rich_text, might_contain_semantic_markup};

/// Prefix of the comments that mark incomplete data in an exported script.
pub const ERROR_MARKER: &str = "//Error: ";

const INDENTATION: &str = "    ";

/// Writes a tutorial as a KTutorial JavaScript program.
///
/// An exporter is reusable; every call to [`export`](Self::export) starts
/// from a clean state.
#[derive(Debug, Default)]
pub struct JavascriptExporter {
    out: String,
    indentation_level: usize,
    /// Handler functions written after the setup function of the current step.
    pending_functions: Vec<String>,
    /// Times each variable name has been used in the current step.
    variables: HashMap<String, usize>,
}

impl JavascriptExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Export `tutorial` as JavaScript source code.
    pub fn export(&mut self, tutorial: &Tutorial) -> String {
        self.out.clear();
        self.indentation_level = 0;
        self.pending_functions.clear();
        self.variables.clear();

        self.write_license(tutorial);
        self.out.push_str("t = Kross.module(\"kdetranslation\");\n\n");
        self.write_information(tutorial);
        self.write_tutorial_setup(tutorial);
        self.write_tutorial_tear_down(tutorial);
        for step in tutorial.steps() {
            self.write_step(step);
        }

        let code = std::mem::take(&mut self.out);
        debug!(
            steps = tutorial.steps().len(),
            errors = code.matches(ERROR_MARKER).count(),
            "exported tutorial"
        );
        code
    }

    fn write_license(&mut self, tutorial: &Tutorial) {
        let license = tutorial.license_text();
        if license.is_empty() {
            return;
        }

        let lines: Vec<&str> = license.split('\n').collect();
        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let border = "*".repeat(width);
        self.out.push_str(&format!("/****{border}****\n"));
        for line in lines {
            let padding = " ".repeat(width - line.chars().count());
            self.out.push_str(&format!(" *   {line}{padding}   *\n"));
        }
        self.out.push_str(&format!(" ****{border}****/\n\n"));
    }

    fn write_information(&mut self, tutorial: &Tutorial) {
        if tutorial.name().is_empty() {
            self.line("//Error: Tutorial without name!");
        } else {
            self.line(&format!(
                "tutorial.tutorialInformationAsObject().setName(t.i18n(\"{}\"));",
                escape(tutorial.name())
            ));
        }

        if tutorial.description().is_empty() {
            self.line("//Error: Tutorial without description!");
        } else {
            self.line(&format!(
                "tutorial.tutorialInformationAsObject().setDescription(t.i18n(\"{}\"));",
                escape(tutorial.description())
            ));
        }

        self.out.push('\n');
    }

    fn write_tutorial_setup(&mut self, tutorial: &Tutorial) {
        self.write_tutorial_function("tutorialSetup", "setup", tutorial.custom_setup_code());
    }

    fn write_tutorial_tear_down(&mut self, tutorial: &Tutorial) {
        self.write_tutorial_function(
            "tutorialTearDown",
            "tearDown",
            tutorial.custom_tear_down_code(),
        );
    }

    fn write_tutorial_function(&mut self, function: &str, signal: &str, code: &str) {
        if code.is_empty() {
            return;
        }

        self.line(&format!("function {function}(tutorial) {{"));
        self.indentation_level += 1;
        let body = self.indented_code(code);
        self.out.push_str(&body);
        self.indentation_level -= 1;
        self.line("}");
        self.connect("tutorial", signal, function);
    }

    fn write_step(&mut self, step: &Step) {
        if step.id().is_empty() {
            self.line("//Error: Step without id!");
            self.out.push('\n');
            return;
        }

        self.line(&format!("//Step {}", step.id()));

        let step_variable = step_variable(step);
        self.line(&format!(
            "{step_variable} = ktutorial.newStep(\"{}\");",
            escape(step.id())
        ));

        let text = step.text();
        if text.is_empty() {
            self.line("//Error: Step without text!");
        } else {
            let context = if might_be_rich_text(text) || might_contain_semantic_markup(text) {
                "@info"
            } else {
                "@info/plain"
            };
            self.line(&format!(
                "{step_variable}.setText(t.i18nc(\"{context}\", \"{}\"));",
                escape(text)
            ));
        }
        self.out.push('\n');

        self.write_step_setup(step);
        self.write_step_tear_down(step);

        self.line(&format!("tutorial.addStep({step_variable});"));
        self.out.push('\n');
    }

    fn write_step_setup(&mut self, step: &Step) {
        let code = step.custom_setup_code();
        let reactions = step.reactions();
        if code.is_empty() && reactions.is_empty() {
            return;
        }

        let step_variable = step_variable(step);
        let function = format!("{step_variable}Setup");
        self.line(&format!("function {function}(step) {{"));
        self.indentation_level += 1;

        for (index, reaction) in reactions.iter().enumerate() {
            self.write_reaction(step, reaction);
            if index + 1 < reactions.len() || !code.is_empty() {
                self.out.push('\n');
            }
        }

        let body = self.indented_code(code);
        self.out.push_str(&body);
        self.indentation_level -= 1;
        self.line("}");
        self.connect(&step_variable, "setup", &function);

        for function in std::mem::take(&mut self.pending_functions) {
            self.out.push_str(&function);
            self.out.push('\n');
        }
        self.variables.clear();
    }

    fn write_step_tear_down(&mut self, step: &Step) {
        let code = step.custom_tear_down_code();
        if code.is_empty() {
            return;
        }

        let step_variable = step_variable(step);
        let function = format!("{step_variable}TearDown");
        self.line(&format!("function {function}(step) {{"));
        self.indentation_level += 1;
        let body = self.indented_code(code);
        self.out.push_str(&body);
        self.indentation_level -= 1;
        self.line("}");
        self.connect(&step_variable, "tearDown", &function);
    }

    fn write_reaction(&mut self, step: &Step, reaction: &Reaction) {
        let trigger = reaction.trigger_type();
        let response = reaction.response_type();

        if trigger == TriggerType::ConditionMet && reaction.wait_for().is_none() {
            self.line("//Error: WaitFor not set!");
            return;
        }
        if trigger == TriggerType::OptionSelected && reaction.option_name().is_empty() {
            self.line("//Error: Option without name!");
            return;
        }
        if response == ResponseType::NextStep && reaction.next_step_id().is_empty() {
            self.line("//Error: Next step id not set!");
            return;
        }

        match trigger {
            TriggerType::OptionSelected => {
                let option_variable = self.write_option(reaction.option_name());
                match response {
                    ResponseType::NextStep => self.line(&format!(
                        "step.addOption({option_variable}, \"{}\");",
                        escape(reaction.next_step_id())
                    )),
                    ResponseType::CustomCode => {
                        let function = format!(
                            "{}{}OptionSelected",
                            step_variable(step),
                            to_upper_camel_case(reaction.option_name())
                        );
                        self.line(&format!(
                            "step.addOption({option_variable}, self, \"{function}()\");"
                        ));
                        self.add_function(&function, reaction.custom_code());
                    }
                }
            }
            TriggerType::ConditionMet => {
                let Some(wait_for) = reaction.wait_for() else {
                    return;
                };
                let variable = self.write_wait_for(wait_for);
                if variable.is_empty() {
                    return;
                }
                match response {
                    ResponseType::NextStep => self.line(&format!(
                        "step.addWaitFor({variable}, \"{}\");",
                        escape(reaction.next_step_id())
                    )),
                    ResponseType::CustomCode => {
                        let function = format!(
                            "{}{}ConditionMet",
                            step_variable(step),
                            to_upper_camel_case(&variable)
                        );
                        self.line(&format!(
                            "step.addWaitFor({variable}, self, \"{function}()\");"
                        ));
                        self.add_function(&function, reaction.custom_code());
                    }
                }
            }
        }
    }

    fn write_option(&mut self, option_name: &str) -> String {
        let variable = self.add_variable(&format!("{}Option", to_lower_camel_case(option_name)));
        self.line(&format!(
            "{variable} = ktutorial.newOption(t.i18nc(\"@action Tutorial option\", \"{}\"));",
            escape(option_name)
        ));
        variable
    }

    /// Write the statements creating `wait_for` and return the name of its
    /// variable, or an empty string if it could not be written.
    fn write_wait_for(&mut self, wait_for: &WaitFor) -> String {
        match wait_for {
            WaitFor::Composed(composed) => self.write_wait_for_composed(composed),
            WaitFor::Event(event) => self.write_wait_for_event(event),
            WaitFor::Not(not) => self.write_wait_for_not(not),
            WaitFor::Property(property) => self.write_wait_for_property(property),
            WaitFor::Signal(signal) => self.write_wait_for_signal(signal),
            WaitFor::StepActivation(_) => self.write_wait_for_step_activation(),
            WaitFor::Window(window) => self.write_wait_for_window(window),
        }
    }

    fn write_wait_for_composed(&mut self, composed: &WaitForComposed) -> String {
        let kind = composed.composition_type().as_str();

        let mut children = Vec::with_capacity(composed.wait_fors().len());
        for child in composed.wait_fors() {
            children.push(self.write_wait_for(child));
            self.out.push('\n');
        }

        let variable = self.add_variable(&format!("waitFor{kind}"));
        self.line(&format!(
            "{variable} = ktutorial.newWaitFor(\"WaitFor{kind}\");"
        ));
        for child in children.iter().filter(|child| !child.is_empty()) {
            self.line(&format!("{variable}.add({child});"));
        }
        variable
    }

    fn write_wait_for_event(&mut self, event: &WaitForEvent) -> String {
        if event.receiver_name().is_empty() {
            self.line("//Error: WaitForEvent without receiver name!");
            return String::new();
        }
        if event.event_name().is_empty() {
            self.line("//Error: WaitForEvent without event name!");
            return String::new();
        }

        let variable = self.add_variable(&format!(
            "waitFor{}In{}",
            to_upper_camel_case(event.event_name()),
            to_upper_camel_case(event.receiver_name())
        ));
        self.line(&format!(
            "{variable} = ktutorial.newWaitFor(\"WaitForEvent\");"
        ));
        self.line(&format!(
            "{variable}.setEvent(ktutorial.findObject(\"{}\"), \"{}\");",
            escape(event.receiver_name()),
            escape(event.event_name())
        ));
        variable
    }

    fn write_wait_for_not(&mut self, not: &WaitForNot) -> String {
        let Some(negated) = not.negated_wait_for() else {
            self.line("//Error: WaitForNot without negated WaitFor!");
            return String::new();
        };

        let variable = self.add_variable("waitForNot");
        let negated_variable = self.write_wait_for(negated);
        self.out.push('\n');

        self.line(&format!("{variable} = ktutorial.newWaitFor(\"WaitForNot\");"));
        if !negated_variable.is_empty() {
            self.line(&format!(
                "{variable}.setNegatedWaitFor({negated_variable});"
            ));
        }
        variable
    }

    fn write_wait_for_property(&mut self, property: &WaitForProperty) -> String {
        if property.object_name().is_empty() {
            self.line("//Error: WaitForProperty without object name!");
            return String::new();
        }
        if property.property_name().is_empty() {
            self.line("//Error: WaitForProperty without property name!");
            return String::new();
        }
        if property.value().is_empty() {
            self.line("//Error: WaitForProperty without value!");
            return String::new();
        }

        let variable = self.add_variable(&format!(
            "waitFor{}In{}",
            to_upper_camel_case(strip_arguments(property.property_name())),
            to_upper_camel_case(property.object_name())
        ));
        self.line(&format!(
            "{variable} = ktutorial.newWaitFor(\"WaitForProperty\");"
        ));
        self.line(&format!(
            "{variable}.setProperty(ktutorial.findObject(\"{}\"), \"{}\", {});",
            escape(property.object_name()),
            escape(property.property_name()),
            property.value()
        ));
        variable
    }

    fn write_wait_for_signal(&mut self, signal: &WaitForSignal) -> String {
        if signal.emitter_name().is_empty() {
            self.line("//Error: WaitForSignal without emitter name!");
            return String::new();
        }
        if signal.signal_name().is_empty() {
            self.line("//Error: WaitForSignal without signal name!");
            return String::new();
        }

        let variable = self.add_variable(&format!(
            "waitFor{}By{}",
            to_upper_camel_case(strip_arguments(signal.signal_name())),
            to_upper_camel_case(signal.emitter_name())
        ));
        self.line(&format!(
            "{variable} = ktutorial.newWaitFor(\"WaitForSignal\");"
        ));
        self.line(&format!(
            "{variable}.setSignal(ktutorial.findObject(\"{}\"), \"{}\");",
            escape(signal.emitter_name()),
            escape(signal.signal_name())
        ));
        variable
    }

    fn write_wait_for_step_activation(&mut self) -> String {
        let variable = self.add_variable("waitForStepActivation");
        self.line(&format!(
            "{variable} = ktutorial.newWaitFor(\"WaitForStepActivation\");"
        ));
        self.line(&format!("{variable}.setStep(tutorial, step);"));
        variable
    }

    fn write_wait_for_window(&mut self, window: &WaitForWindow) -> String {
        if window.window_object_name().is_empty() {
            self.line("//Error: WaitForWindow without window object name!");
            return String::new();
        }

        let variable = self.add_variable(&format!(
            "waitFor{}ToBeShown",
            to_upper_camel_case(window.window_object_name())
        ));
        self.line(&format!(
            "{variable} = ktutorial.newWaitFor(\"WaitForWindow\");"
        ));
        self.line(&format!(
            "{variable}.setWindowObjectName(\"{}\");",
            escape(window.window_object_name())
        ));
        variable
    }

    /// Write one indented line.
    fn line(&mut self, text: &str) {
        let indentation = self.indentation();
        self.out.push_str(&indentation);
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn connect(&mut self, object: &str, signal: &str, function: &str) {
        self.line(&format!("connect({object}, \"{signal}(QObject*)\","));
        self.line(&format!("        this, \"{function}(QObject*)\");"));
        self.out.push('\n');
    }

    fn indentation(&self) -> String {
        INDENTATION.repeat(self.indentation_level)
    }

    /// Indent every line of `code` to the current level.
    ///
    /// The result always ends with a line break, unless `code` is empty.
    fn indented_code(&self, code: &str) -> String {
        if code.is_empty() {
            return String::new();
        }

        let indentation = self.indentation();
        let mut indented = String::with_capacity(code.len());
        for line in code.strip_suffix('\n').unwrap_or(code).split('\n') {
            indented.push_str(&indentation);
            indented.push_str(line);
            indented.push('\n');
        }
        indented
    }

    /// Queue a handler function, written after the current setup function.
    fn add_function(&mut self, name: &str, code: &str) {
        let previous_level = std::mem::replace(&mut self.indentation_level, 1);
        let body = if code.is_empty() {
            self.indented_code("//Error: No code set!\n")
        } else {
            self.indented_code(code)
        };
        self.indentation_level = previous_level;

        self.pending_functions
            .push(format!("function {name}() {{\n{body}}}\n"));
    }

    /// Reserve a variable name, numbering repeated names from 2.
    fn add_variable(&mut self, name: &str) -> String {
        let count = self.variables.entry(name.to_string()).or_insert(0);
        *count += 1;
        if *count == 1 {
            name.to_string()
        } else {
            format!("{name}{count}")
        }
    }
}

/// Export `tutorial` with a fresh [`JavascriptExporter`].
pub fn export_javascript(tutorial: &Tutorial) -> String {
    JavascriptExporter::new().export(tutorial)
}

fn step_variable(step: &Step) -> String {
    format!("{}Step", to_lower_camel_case(step.id()))
}

/// Drop the argument list of a property or signal name.
fn strip_arguments(name: &str) -> &str {
    name.find('(').map_or(name, |open| &name[..open])
}

/// Escape text for a double-quoted JavaScript string literal.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '"' => escaped.push_str("\\\""),
            c => escaped.push(c),
        }
    }
    escaped
}
