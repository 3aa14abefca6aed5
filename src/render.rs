use crate::element::{
    Attributes, Element, Node, Optgroup, OptionElement, Selectable, is_valid_attr_name,
    is_valid_tag_name,
};

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 1024 * 1024;

impl Node {
    pub fn render(&self) -> String {
        let mut out = String::new();
        write_node(&mut out, self);
        out
    }
}

impl OptionElement {
    pub fn render(&self) -> String {
        let mut out = String::new();
        write_option(&mut out, self);
        out
    }
}

impl Optgroup {
    pub fn render(&self) -> String {
        let mut out = String::new();
        write_optgroup(&mut out, self);
        out
    }
}

impl Element {
    pub fn render(&self) -> String {
        let mut out = String::new();
        write_element(&mut out, self);
        out
    }
}

pub(crate) fn write_nodes(out: &mut String, nodes: &[Node]) {
    for node in nodes {
        write_node(out, node);
    }
}

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Option(option) => write_option(out, option),
        Node::Optgroup(group) => write_optgroup(out, group),
        Node::Element(element) => write_element(out, element),
        Node::Text(text) => out.push_str(&escape_html_text_for_serialization(text)),
    }
}

fn write_option(out: &mut String, option: &OptionElement) {
    out.push_str("<option");
    write_attr(out, "value", Some(option.value().to_string().as_str()));
    write_attributes(out, option.attributes());
    if option.is_selected() {
        write_attr(out, "selected", None);
    }
    out.push('>');
    out.push_str(&escape_html_text_for_serialization(option.text()));
    out.push_str("</option>");
}

fn write_optgroup(out: &mut String, group: &Optgroup) {
    out.push_str("<optgroup");
    write_attr(out, "label", Some(group.label()));
    write_attributes(out, group.attributes());
    out.push('>');
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
        write_nodes(out, group.children())
    });
    out.push_str("</optgroup>");
}

fn write_element(out: &mut String, element: &Element) {
    let tag = element.tag_name().to_ascii_lowercase();
    if !is_valid_tag_name(&tag) {
        log::warn!("skipping element with invalid tag name {tag:?}");
        return;
    }
    out.push('<');
    out.push_str(&tag);
    write_attributes(out, element.attributes());
    out.push('>');
    if is_void_tag(&tag) {
        return;
    }
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
        write_nodes(out, element.children())
    });
    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

pub(crate) fn write_attributes(out: &mut String, attributes: &Attributes) {
    for (name, value) in attributes.iter() {
        write_attr(out, name, value);
    }
}

fn write_attr(out: &mut String, name: &str, value: Option<&str>) {
    if !is_valid_attr_name(name) {
        log::warn!("skipping attribute with invalid name {name:?}");
        return;
    }
    out.push(' ');
    out.push_str(name);
    if let Some(value) = value {
        out.push_str("=\"");
        out.push_str(&escape_html_attr_for_serialization(value));
        out.push('"');
    }
}

fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "source"
            | "track"
            | "wbr"
    )
}

pub(crate) fn escape_html_text_for_serialization(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn escape_html_attr_for_serialization(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
