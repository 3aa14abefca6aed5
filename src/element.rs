use crate::value::Scalar;
use crate::{Error, Result};

/// Ordered attribute list. A `None` value marks a boolean attribute that is
/// rendered without `="..."`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, Option<String>)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .and_then(|(_, value)| value.as_deref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|(key, _)| key.eq_ignore_ascii_case(name))
    }

    /// Replaces an existing attribute in place, or appends a new one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.insert(name.into(), Some(value.into()));
    }

    pub fn set_flag(&mut self, name: impl Into<String>) {
        self.insert(name.into(), None);
    }

    /// Like [`Attributes::set`], but rejects names that cannot appear in
    /// markup. Names stored through `set` are checked again when rendering.
    pub fn try_set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let name = name.into();
        if !is_valid_attr_name(&name) {
            return Err(Error::InvalidArgument(format!(
                "invalid attribute name: {name:?}"
            )));
        }
        self.set(name, value);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) {
        self.entries.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    fn insert(&mut self, name: String, value: Option<String>) {
        if let Some(slot) = self
            .entries
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(&name))
        {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }
}

/// Attribute names may not be empty or contain whitespace, controls, quotes,
/// `<`, `>`, `/` or `=`.
pub(crate) fn is_valid_attr_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().all(|ch| {
            !ch.is_whitespace()
                && !ch.is_control()
                && !matches!(ch, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

/// Tag names are an ASCII letter followed by ASCII alphanumerics or `-`.
pub(crate) fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
}

/// Capability shared by nodes that can carry a `selected` marker.
pub trait Selectable {
    fn value(&self) -> &Scalar;

    fn is_selected(&self) -> bool;

    fn set_selected(&mut self, selected: bool);
}

/// An `<option>` leaf.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionElement {
    value: Scalar,
    text: String,
    selected: bool,
    attributes: Attributes,
}

impl OptionElement {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(&self, value: impl Into<Scalar>) -> Self {
        let mut next = self.clone();
        next.value = value.into();
        next
    }

    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.text = text.into();
        next
    }

    #[must_use]
    pub fn selected_if(&self, condition: bool) -> Self {
        let mut next = self.clone();
        next.selected = condition;
        next
    }

    /// `value` and `selected` are routed to their dedicated fields; any
    /// `selected` attribute, whatever its text, marks the option selected.
    #[must_use]
    pub fn attribute(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if name.eq_ignore_ascii_case("value") {
            return self.with_value(Scalar::Str(value.into()));
        }
        if name.eq_ignore_ascii_case("selected") {
            return self.selected_if(true);
        }
        let mut next = self.clone();
        next.attributes.set(name, value);
        next
    }

    #[must_use]
    pub fn disabled(&self) -> Self {
        let mut next = self.clone();
        next.attributes.set_flag("disabled");
        next
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// `selected` and `value` live in dedicated fields rather than the
    /// attribute list.
    pub fn has_attribute(&self, name: &str) -> bool {
        if name.eq_ignore_ascii_case("selected") {
            return self.selected;
        }
        if name.eq_ignore_ascii_case("value") {
            return true;
        }
        self.attributes.has(name)
    }
}

impl Selectable for OptionElement {
    fn value(&self) -> &Scalar {
        &self.value
    }

    fn is_selected(&self) -> bool {
        self.selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

/// An `<optgroup>` container. Never selected itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Optgroup {
    label: String,
    attributes: Attributes,
    children: Vec<Node>,
}

impl Optgroup {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_label(&self, label: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.label = label.into();
        next
    }

    #[must_use]
    pub fn add_child(&self, child: impl Into<Node>) -> Self {
        let mut next = self.clone();
        next.children.push(child.into());
        next
    }

    #[must_use]
    pub fn set_children(&self, children: Vec<Node>) -> Self {
        Self {
            label: self.label.clone(),
            attributes: self.attributes.clone(),
            children,
        }
    }

    #[must_use]
    pub fn attribute(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.attributes.set(name, value);
        next
    }

    #[must_use]
    pub fn disabled(&self) -> Self {
        let mut next = self.clone();
        next.attributes.set_flag("disabled");
        next
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// Any other element. Passed through propagation untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag_name: String,
    attributes: Attributes,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attribute(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.attributes.set(name, value);
        next
    }

    #[must_use]
    pub fn add_child(&self, child: impl Into<Node>) -> Self {
        let mut next = self.clone();
        next.children.push(child.into());
        next
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Option(OptionElement),
    Optgroup(Optgroup),
    Element(Element),
    Text(String),
}

impl Node {
    pub fn as_selectable(&self) -> Option<&dyn Selectable> {
        match self {
            Self::Option(option) => Some(option),
            _ => None,
        }
    }

    pub fn as_selectable_mut(&mut self) -> Option<&mut dyn Selectable> {
        match self {
            Self::Option(option) => Some(option),
            _ => None,
        }
    }

    pub fn as_optgroup(&self) -> Option<&Optgroup> {
        match self {
            Self::Optgroup(group) => Some(group),
            _ => None,
        }
    }
}

impl From<OptionElement> for Node {
    fn from(value: OptionElement) -> Self {
        Self::Option(value)
    }
}

impl From<Optgroup> for Node {
    fn from(value: Optgroup) -> Self {
        Self::Optgroup(value)
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
