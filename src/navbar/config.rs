use std::fmt;

use ron::Value;
use thiserror::Error;

/// Id of the host element the navbar mounts into when none is configured.
pub const DEFAULT_CONTAINER_ID: &str = "jean-navbar-container";

/// Callback invoked with the resolved section id when a section is activated.
pub type SectionCallback = Box<dyn Fn(&str)>;

/// Configuration rejected during validation. Fatal to construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("options.{field} is not {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

impl ConfigError {
    /// Name of the offending configuration field.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::TypeMismatch { field, .. } => field,
        }
    }
}

/// Where section blocks land relative to the input order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionOrder {
    /// Blocks appear in the same order as `sections`.
    #[default]
    Input,
    /// Blocks appear in reverse order, matching older navbar markup.
    Legacy,
}

/// Caller-supplied navbar configuration. Absent fields take defaults.
#[derive(Default)]
pub struct NavbarConfig {
    pub title: String,
    pub container_id: Option<String>,
    /// Icon path; an empty string means no icon.
    pub icon: Option<String>,
    /// Section ids, each also used as the block label.
    pub sections: Option<Vec<String>>,
    pub on_section_click: Option<SectionCallback>,
    pub section_order: Option<SectionOrder>,
}

impl NavbarConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = Some(id.into());
        self
    }

    pub fn icon(mut self, path: impl Into<String>) -> Self {
        self.icon = Some(path.into());
        self
    }

    pub fn sections<I, S>(mut self, sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections = Some(sections.into_iter().map(Into::into).collect());
        self
    }

    pub fn on_section_click(mut self, callback: impl Fn(&str) + 'static) -> Self {
        self.on_section_click = Some(Box::new(callback));
        self
    }

    pub fn section_order(mut self, order: SectionOrder) -> Self {
        self.section_order = Some(order);
        self
    }

    /// Merge with defaults.
    pub fn resolve(self) -> NavbarOptions {
        NavbarOptions {
            title: self.title,
            container_id: self
                .container_id
                .unwrap_or_else(|| DEFAULT_CONTAINER_ID.to_string()),
            icon: self.icon.unwrap_or_default(),
            sections: self.sections.unwrap_or_default(),
            on_section_click: self.on_section_click.unwrap_or_else(|| Box::new(|_: &str| {})),
            section_order: self.section_order.unwrap_or_default(),
        }
    }
}

impl fmt::Debug for NavbarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavbarConfig")
            .field("title", &self.title)
            .field("container_id", &self.container_id)
            .field("icon", &self.icon)
            .field("sections", &self.sections)
            .field("on_section_click", &self.on_section_click.is_some())
            .field("section_order", &self.section_order)
            .finish()
    }
}

/// Configuration merged with defaults. Owned by one navbar, never mutated.
pub struct NavbarOptions {
    pub title: String,
    pub container_id: String,
    pub icon: String,
    pub sections: Vec<String>,
    pub on_section_click: SectionCallback,
    pub section_order: SectionOrder,
}

impl fmt::Debug for NavbarOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavbarOptions")
            .field("title", &self.title)
            .field("container_id", &self.container_id)
            .field("icon", &self.icon)
            .field("sections", &self.sections)
            .field("section_order", &self.section_order)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Validation of untyped input
// ---------------------------------------------------------------------------

/// Check an untyped configuration value and convert it to a typed config.
///
/// Fields are checked in declaration order and the first violation wins.
/// A non-map value counts as an empty configuration, which then fails on
/// the missing title. Deserialized data is never invocable, so any value
/// under `on_section_click` is rejected; attach callbacks to the result.
pub fn validate(value: &Value) -> Result<NavbarConfig, ConfigError> {
    let fields = Fields::new(value);

    let title = match fields.get("title") {
        Some(Value::String(s)) => s.clone(),
        _ => return Err(mismatch("title", "a string")),
    };
    let container_id = fields.optional_string("container_id")?;
    let icon = fields.optional_string("icon")?;

    let sections = match fields.get("sections") {
        None => None,
        Some(Value::Seq(items)) => Some(
            items
                .iter()
                .map(|item| match unwrap_some(item) {
                    Some(Value::String(s)) => Ok(s.clone()),
                    _ => Err(mismatch("sections", "a list of strings")),
                })
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Some(_) => return Err(mismatch("sections", "a list of strings")),
    };

    if fields.get("on_section_click").is_some() {
        return Err(mismatch("on_section_click", "a function"));
    }

    let section_order = match fields.get("section_order") {
        None => None,
        Some(Value::String(s)) if s == "input" => Some(SectionOrder::Input),
        Some(Value::String(s)) if s == "legacy" => Some(SectionOrder::Legacy),
        Some(_) => return Err(mismatch("section_order", "\"input\" or \"legacy\"")),
    };

    Ok(NavbarConfig {
        title,
        container_id,
        icon,
        sections,
        on_section_click: None,
        section_order,
    })
}

fn mismatch(field: &'static str, expected: &'static str) -> ConfigError {
    ConfigError::TypeMismatch { field, expected }
}

/// `Some(x)` is `x`, `None` is absent.
fn unwrap_some(value: &Value) -> Option<&Value> {
    match value {
        Value::Option(inner) => inner.as_deref().and_then(unwrap_some),
        other => Some(other),
    }
}

/// Key lookup over a configuration map. Keys may be strings or bare
/// identifiers, both of which parse to `Value::String`.
struct Fields<'a> {
    map: Option<&'a ron::Map>,
}

impl<'a> Fields<'a> {
    fn new(value: &'a Value) -> Self {
        match unwrap_some(value) {
            Some(Value::Map(map)) => Self { map: Some(map) },
            _ => Self { map: None },
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        let map = self.map?;
        map.iter()
            .find(|(k, _)| matches!(k, Value::String(s) if s == key))
            .and_then(|(_, v)| unwrap_some(v))
    }

    fn optional_string(&self, key: &'static str) -> Result<Option<String>, ConfigError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(mismatch(key, "a string")),
        }
    }
}
