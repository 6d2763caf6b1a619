//! Template filling: resolve parameters, then render in one strict pass.

use super::templates::UserTemplate;
use std::collections::HashMap;
use thiserror::Error;

/// Substituted for every optional parameter the caller leaves out.
pub const UNSPECIFIED: &str = "未指定";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("missing template parameter: {name}")]
    MissingParameter { name: String },
    #[error("malformed template at byte {position}: {reason}")]
    MalformedTemplate { position: usize, reason: &'static str },
}

/// Caller-supplied values. Blank values count as omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptParams(HashMap<String, String>);

impl PromptParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &str, value: impl ToString) -> Self {
        self.0.insert(name.to_string(), value.to_string());
        self
    }

    /// Sets `name` only when `value` is present.
    pub fn set_opt<V: ToString>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(name, v),
            None => self,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>, V: ToString> FromIterator<(K, V)> for PromptParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Fully populated parameter set for one template; every declared parameter has a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedParams(HashMap<&'static str, String>);

impl ResolvedParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Applies defaults: each declared optional parameter the caller omitted becomes
/// [`UNSPECIFIED`]. Parameters the template does not declare are ignored.
pub fn resolve_params(
    template: &UserTemplate,
    params: &PromptParams,
) -> Result<ResolvedParams, PromptError> {
    let mut resolved = HashMap::with_capacity(template.params.len());
    for param in template.params {
        let value = match params.get(param.name) {
            Some(v) => v.to_string(),
            None if param.required => {
                return Err(PromptError::MissingParameter {
                    name: param.name.to_string(),
                })
            }
            None => UNSPECIFIED.to_string(),
        };
        resolved.insert(param.name, value);
    }
    Ok(ResolvedParams(resolved))
}

enum Segment<'a> {
    Text(&'a str),
    Brace(char),
    Placeholder(&'a str),
}

fn parse(template: &str) -> Result<Vec<Segment<'_>>, PromptError> {
    let mut segments = Vec::new();
    let bytes = template.as_bytes();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b @ (b'{' | b'}') if bytes.get(i + 1) == Some(&b) => {
                segments.push(Segment::Text(&template[text_start..i]));
                segments.push(Segment::Brace(b as char));
                i += 2;
                text_start = i;
            }
            b'{' => {
                segments.push(Segment::Text(&template[text_start..i]));
                let rest = &template[i + 1..];
                let end = rest.find('}').ok_or(PromptError::MalformedTemplate {
                    position: i,
                    reason: "unterminated placeholder",
                })?;
                let name = rest[..end].trim();
                if name.is_empty() || name.contains('{') {
                    return Err(PromptError::MalformedTemplate {
                        position: i,
                        reason: "invalid placeholder name",
                    });
                }
                segments.push(Segment::Placeholder(name));
                i += end + 2;
                text_start = i;
            }
            b'}' => {
                return Err(PromptError::MalformedTemplate {
                    position: i,
                    reason: "unmatched `}`",
                })
            }
            _ => i += 1,
        }
    }
    segments.push(Segment::Text(&template[text_start..]));
    Ok(segments)
}

/// Placeholder names in order of appearance (repeats included).
pub fn placeholders(template: &str) -> Result<Vec<String>, PromptError> {
    Ok(parse(template)?
        .into_iter()
        .filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.to_string()),
            _ => None,
        })
        .collect())
}

/// Substitutes every placeholder. Any placeholder without a value is an error; nothing is
/// left half-filled.
pub fn render(template: &str, params: &ResolvedParams) -> Result<String, PromptError> {
    let mut out = String::with_capacity(template.len());
    for segment in parse(template)? {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Brace(c) => out.push(c),
            Segment::Placeholder(name) => {
                let value = params.get(name).ok_or_else(|| PromptError::MissingParameter {
                    name: name.to_string(),
                })?;
                out.push_str(value);
            }
        }
    }
    Ok(out)
}

pub fn fill_template(template: &UserTemplate, params: &PromptParams) -> Result<String, PromptError> {
    let resolved = resolve_params(template, params)?;
    let text = render(template.text, &resolved)?;
    tracing::debug!(
        target: "swm::prompts",
        template = template.name,
        supplied = params.len(),
        resolved = resolved.len(),
        "Template filled"
    );
    Ok(text)
}
