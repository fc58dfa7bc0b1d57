//! Content validator for process (BPMN XML) models

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::domain::validation::{
    ModelContentValidator, ModelValidationError, ValidationContext, ValidationError,
};

/// Structural checks on process content.
///
/// The content must be a well-formed XML document declaring at least one
/// `process` element (in any namespace), and every declared process needs a
/// non-empty `id` attribute. Markup inside comments or CDATA is not inspected.
#[derive(Debug, Clone, Default)]
pub struct ProcessContentValidator;

impl ProcessContentValidator {
    pub fn new() -> Self {
        Self
    }
}

impl ModelContentValidator for ProcessContentValidator {
    fn validate_model_content(
        &self,
        content: &[u8],
        context: &ValidationContext,
    ) -> Result<(), ModelValidationError> {
        let text = std::str::from_utf8(content).map_err(|e| {
            ModelValidationError::unparsable(format!(
                "content is not valid UTF-8 at byte offset {}",
                e.valid_up_to()
            ))
        })?;

        let trimmed = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

        match trimmed.chars().next() {
            Some('<') => {}
            Some(ch) => {
                return Err(ModelValidationError::unparsable(format!(
                    "An XML document must begin with '<' [character '{}']",
                    ch
                )));
            }
            None => {
                return Err(ModelValidationError::unparsable(
                    "An XML document must begin with '<' [end of input]",
                ));
            }
        }

        let processes = scan_processes(trimmed)?;

        let mut errors: Vec<ValidationError> = processes
            .iter()
            .enumerate()
            .filter(|(_, has_id)| !**has_id)
            .map(|(index, _)| {
                ValidationError::at(
                    &format!("process[{}]", index + 1),
                    "process element requires an id attribute",
                )
            })
            .collect();

        if processes.is_empty() {
            errors.push(ValidationError::at(
                "#",
                "no process element found in process content",
            ));
        }

        debug!(
            model_type = %context.model_type(),
            processes = processes.len(),
            violations = errors.len(),
            "Process content validation finished"
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ModelValidationError::semantic(errors))
        }
    }
}

/// Walk the whole document, returning for every `process` element whether it
/// carries an id. Any well-formedness problem is reported as unparsable.
fn scan_processes(text: &str) -> Result<Vec<bool>, ModelValidationError> {
    let mut reader = Reader::from_str(text);
    let mut processes = Vec::new();
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            ModelValidationError::unparsable(format!(
                "{} [byte {}]",
                e,
                reader.error_position()
            ))
        })?;

        match event {
            Event::Start(element) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
                if is_process(&element) {
                    processes.push(has_id(&element, &reader)?);
                }
            }
            Event::Empty(element) => {
                if depth == 0 {
                    roots += 1;
                }
                if is_process(&element) {
                    processes.push(has_id(&element, &reader)?);
                }
            }
            Event::End(_) => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    ModelValidationError::unparsable(format!(
                        "unexpected end tag [byte {}]",
                        reader.buffer_position()
                    ))
                })?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err(ModelValidationError::unparsable(
            "XML document structures must start and end within the same entity.",
        ));
    }

    if roots == 0 {
        return Err(ModelValidationError::unparsable(
            "Premature end of file: no root element",
        ));
    }

    Ok(processes)
}

fn is_process(element: &BytesStart<'_>) -> bool {
    element.local_name().as_ref() == b"process"
}

fn has_id(element: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<bool, ModelValidationError> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| {
            ModelValidationError::unparsable(format!(
                "{} [byte {}]",
                e,
                reader.buffer_position()
            ))
        })?;

        if attribute.key.as_ref() == b"id" {
            return Ok(!attribute.value.iter().all(u8::is_ascii_whitespace));
        }
    }

    Ok(false)
}
