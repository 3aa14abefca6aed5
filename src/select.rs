use serde_json::Value as JsonValue;

use crate::Result;
use crate::element::{Attributes, Node, Optgroup, OptionElement, Selectable};
use crate::propagate::{apply_value_to_nodes, has_any_selection, propagate};
use crate::render::{write_attributes, write_nodes};
use crate::value::{BoundValue, Scalar, ValueSet};

/// Appended to the field name of multi-valued selects so that every submitted
/// value is collected under one name.
pub const MULTIPLE_NAME_SUFFIX: &str = "[]";

pub const PLACEHOLDER_VALUE: &str = "";

/// One entry of an option list: either a plain option or a labelled group of
/// options.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionEntry {
    Item { value: Scalar, label: String },
    Group { label: String, items: Vec<(Scalar, String)> },
}

impl OptionEntry {
    pub fn item(value: impl Into<Scalar>, label: impl Into<String>) -> Self {
        Self::Item {
            value: value.into(),
            label: label.into(),
        }
    }

    pub fn group<I, V, L>(label: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<Scalar>,
        L: Into<String>,
    {
        Self::Group {
            label: label.into(),
            items: items
                .into_iter()
                .map(|(value, label)| (value.into(), label.into()))
                .collect(),
        }
    }
}

/// A `<select>` control.
///
/// All builder methods leave `self` untouched and return a new control whose
/// options already reflect its bound value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    attributes: Attributes,
    children: Vec<Node>,
    value: BoundValue,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute. Names that cannot appear in markup are kept but
    /// left out of [`Select::render`]; use [`Attributes::try_set`] to reject
    /// them up front.
    #[must_use]
    pub fn attribute(&self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let mut next = self.clone();
        let affects_cardinality = name.eq_ignore_ascii_case("multiple");
        next.attributes.set(name, value);
        if affects_cardinality {
            next.apply_value_to_options();
        }
        next
    }

    #[must_use]
    pub fn forget_attribute(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.attributes.remove(name);
        if name.eq_ignore_ascii_case("multiple") {
            next.apply_value_to_options();
        }
        next
    }

    #[must_use]
    pub fn name(&self, name: impl Into<String>) -> Self {
        self.attribute("name", name)
    }

    #[must_use]
    pub fn id(&self, id: impl Into<String>) -> Self {
        self.attribute("id", id)
    }

    #[must_use]
    pub fn required(&self) -> Self {
        self.flag("required")
    }

    #[must_use]
    pub fn disabled(&self) -> Self {
        self.flag("disabled")
    }

    #[must_use]
    pub fn autofocus(&self) -> Self {
        self.flag("autofocus")
    }

    /// Appends one option per `(value, label)` pair.
    #[must_use]
    pub fn options<I, V, L>(&self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<Scalar>,
        L: Into<String>,
    {
        let values = self.effective_values();
        let built = pairs
            .into_iter()
            .map(|(value, label)| {
                Node::Option(build_option(&values, value.into(), label.into()))
            })
            .collect();
        self.with_appended(built)
    }

    /// Appends a mix of options and groups.
    #[must_use]
    pub fn entries(&self, entries: impl IntoIterator<Item = OptionEntry>) -> Self {
        let values = self.effective_values();
        let built = entries
            .into_iter()
            .map(|entry| match entry {
                OptionEntry::Item { value, label } => {
                    Node::Option(build_option(&values, value, label))
                }
                OptionEntry::Group { label, items } => {
                    Node::Optgroup(build_optgroup(&values, label, items))
                }
            })
            .collect();
        self.with_appended(built)
    }

    #[must_use]
    pub fn optgroup<I, V, L>(&self, label: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<Scalar>,
        L: Into<String>,
    {
        self.entries([OptionEntry::group(label, pairs)])
    }

    /// Appends an arbitrary child. Options inside it, including those nested
    /// in groups, are selected against the bound value; existing children keep
    /// their flags.
    #[must_use]
    pub fn add_child(&self, child: impl Into<Node>) -> Self {
        let values = self.effective_values();
        self.with_appended(apply_value_to_nodes(&values, &[child.into()]))
    }

    /// Prepends an empty-valued option that starts selected only when no
    /// other option is.
    #[must_use]
    pub fn placeholder(&self, label: impl Into<String>) -> Self {
        let placeholder = OptionElement::new()
            .with_value(PLACEHOLDER_VALUE)
            .with_text(label)
            .selected_if(!self.has_selection());
        let mut next = self.clone();
        next.children.insert(0, Node::Option(placeholder));
        next
    }

    /// Switches to multi-valued mode and suffixes the field name with `[]`
    /// unless it already ends with it.
    #[must_use]
    pub fn multiple(&self) -> Self {
        let mut next = self.clone();
        next.attributes.set_flag("multiple");
        let name = next.name_attr().unwrap_or_default().to_string();
        if !name.is_empty() && !name.ends_with(MULTIPLE_NAME_SUFFIX) {
            let suffixed = format!("{name}{MULTIPLE_NAME_SUFFIX}");
            log::debug!("renaming multi-valued select {name:?} to {suffixed:?}");
            next.attributes.set("name", suffixed);
        }
        next.apply_value_to_options();
        next
    }

    #[must_use]
    pub fn value(&self, value: impl Into<BoundValue>) -> Self {
        let mut next = self.clone();
        next.value = value.into();
        next.apply_value_to_options();
        next
    }

    /// Binds a value taken from JSON form state, failing on objects and
    /// nested arrays.
    pub fn try_value_json(&self, value: &JsonValue) -> Result<Self> {
        let value = BoundValue::from_json(value)?;
        Ok(self.value(value))
    }

    pub fn has_selection(&self) -> bool {
        has_any_selection(&self.children)
    }

    pub fn is_multiple(&self) -> bool {
        self.attributes.has("multiple")
    }

    pub fn name_attr(&self) -> Option<&str> {
        self.attributes.get("name")
    }

    pub fn bound_value(&self) -> &BoundValue {
        &self.value
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Values of all selected options in document order.
    pub fn selected_values(&self) -> Vec<&Scalar> {
        let mut out = Vec::new();
        collect_selected_values(&self.children, &mut out);
        out
    }

    pub fn render(&self) -> String {
        let mut out = String::from("<select");
        write_attributes(&mut out, &self.attributes);
        out.push('>');
        write_nodes(&mut out, &self.children);
        out.push_str("</select>");
        out
    }

    fn flag(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.attributes.set_flag(name);
        next
    }

    fn effective_values(&self) -> ValueSet {
        self.value.effective(self.is_multiple())
    }

    fn with_appended(&self, nodes: Vec<Node>) -> Self {
        let mut next = self.clone();
        next.children.extend(nodes);
        next
    }

    fn apply_value_to_options(&mut self) {
        self.children = propagate(&self.value, self.is_multiple(), &self.children);
    }
}

fn build_option(values: &ValueSet, value: Scalar, label: String) -> OptionElement {
    let selected = values.contains_strict(&value);
    OptionElement::new()
        .with_value(value)
        .with_text(label)
        .selected_if(selected)
}

fn build_optgroup(values: &ValueSet, label: String, items: Vec<(Scalar, String)>) -> Optgroup {
    let children = items
        .into_iter()
        .map(|(value, label)| Node::Option(build_option(values, value, label)))
        .collect();
    Optgroup::new(label).set_children(children)
}

fn collect_selected_values<'a>(nodes: &'a [Node], out: &mut Vec<&'a Scalar>) {
    for node in nodes {
        match node {
            Node::Optgroup(group) => collect_selected_values(group.children(), out),
            Node::Option(option) if option.is_selected() => out.push(option.value()),
            Node::Option(_) | Node::Element(_) | Node::Text(_) => {}
        }
    }
}
