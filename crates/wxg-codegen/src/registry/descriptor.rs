//! Widget class descriptors.
//!
//! A descriptor is plain data: how one `base` tag of a wxGlade document maps
//! to a wxGo constructor call, property setters and, for containers, how
//! children are attached. [`Descriptor::resolve`] applies it to one element.

use std::borrow::Cow;

use indexmap::IndexMap;
use wxg_dom::Node;

use crate::error::{CodegenError, Result};
use crate::literal;

/// Where a binding reads its raw value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Text of a direct child element.
    Element(&'static str),
    /// An attribute of the element.
    Attribute(&'static str),
    /// The widget wrapped by a container item (notebook pages).
    WrappedChild,
}

impl Source {
    /// Field name used in diagnostics.
    pub fn field_name(&self) -> String {
        match self {
            Source::Element(tag) => (*tag).to_string(),
            Source::Attribute(name) => format!("@{}", name),
            Source::WrappedChild => "child object".to_string(),
        }
    }
}

/// Raw value handed to a [`Converter`].
#[derive(Debug, Clone)]
pub enum RawValue<'a> {
    Text(String),
    Node(Node<'a>),
}

impl RawValue<'_> {
    fn describe(&self) -> String {
        match self {
            RawValue::Text(text) => text.clone(),
            RawValue::Node(node) => format!("{:?}", node),
        }
    }
}

/// Value converters from document text to Go expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Converter {
    GoString,
    Int,
    Constant,
    Size,
    Colour,
    NegatedFlag,
    /// Label of the notebook tab whose `window` attribute names the node.
    TabLabel,
}

impl Converter {
    /// Apply the converter. `Ok(None)` means the conversion found nothing.
    pub fn apply(&self, raw: &RawValue<'_>) -> std::result::Result<Option<String>, String> {
        match (self, raw) {
            (Converter::TabLabel, RawValue::Node(node)) => Ok(tab_label(*node)),
            (Converter::TabLabel, RawValue::Text(_)) => {
                Err("tab label lookup needs a document node".to_string())
            }
            (_, RawValue::Node(_)) => Err(format!("{:?} converts text, not nodes", self)),
            (Converter::GoString, RawValue::Text(text)) => Ok(Some(literal::go_string(text))),
            (Converter::Int, RawValue::Text(text)) => literal::go_int(text).map(Some),
            (Converter::Constant, RawValue::Text(text)) => literal::wx_constant(text).map(Some),
            (Converter::Size, RawValue::Text(text)) => literal::size(text).map(Some),
            (Converter::Colour, RawValue::Text(text)) => literal::colour(text).map(Some),
            (Converter::NegatedFlag, RawValue::Text(text)) => {
                literal::negated_flag(text).map(Some)
            }
        }
    }
}

fn tab_label(page: Node<'_>) -> Option<String> {
    let name = page.attribute("name")?;
    page.descendants_by_path("../tabs/tab")
        .into_iter()
        .find(|tab| tab.attribute("window") == Some(name))
        .map(|tab| literal::go_string(&tab.text()))
}

/// A (source, converter, default) triple.
#[derive(Debug, Clone)]
pub struct Binding {
    pub source: Source,
    pub converter: Converter,
    /// Used verbatim when the source is absent.
    pub default: Option<&'static str>,
}

impl Binding {
    pub fn element(tag: &'static str, converter: Converter) -> Self {
        Self {
            source: Source::Element(tag),
            converter,
            default: None,
        }
    }

    pub fn attribute(name: &'static str, converter: Converter) -> Self {
        Self {
            source: Source::Attribute(name),
            converter,
            default: None,
        }
    }

    pub fn wrapped_child(converter: Converter) -> Self {
        Self {
            source: Source::WrappedChild,
            converter,
            default: None,
        }
    }

    pub fn or(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }

    /// Evaluate against `scope`, failing on conversion errors and empty results.
    pub fn evaluate(&self, scope: &Scope<'_>) -> Result<String> {
        let raw = match self.source {
            Source::Element(tag) => scope.node.child_element_text(tag).map(RawValue::Text),
            Source::Attribute(name) => scope
                .node
                .attribute(name)
                .map(|value| RawValue::Text(value.to_string())),
            Source::WrappedChild => scope.wrapped_child.map(RawValue::Node),
        };

        let converted = match &raw {
            None => self.default.map(str::to_string),
            Some(raw) => {
                log::trace!("converting {} = {:?}", self.source.field_name(), raw.describe());
                self.converter
                    .apply(raw)
                    .map_err(|message| conversion_error(scope.node, &self.source, raw, message))?
            }
        };

        match converted {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(CodegenError::EmptyRequiredValue {
                tag: tag_of(scope.node),
                class: class_of(scope.node),
                field: self.source.field_name(),
                raw: raw.map(|raw| raw.describe()),
            }),
        }
    }
}

/// The element a binding is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub node: Node<'a>,
    pub wrapped_child: Option<Node<'a>>,
}

impl<'a> Scope<'a> {
    pub fn new(node: Node<'a>) -> Self {
        Self {
            node,
            wrapped_child: None,
        }
    }

    pub fn with_child(node: Node<'a>, child: Node<'a>) -> Self {
        Self {
            node,
            wrapped_child: Some(child),
        }
    }
}

/// One positional argument of a generated call.
#[derive(Debug, Clone)]
pub enum ArgSlot {
    /// A fixed Go expression such as `wx.ID_ANY`.
    Fixed(&'static str),
    Bound(Binding),
}

/// Render argument slots in order, joined by `, `.
///
/// Returns `None` when there are no slots, so callers emit no extra arguments.
pub fn render_args(slots: &[ArgSlot], scope: &Scope<'_>) -> Result<Option<String>> {
    if slots.is_empty() {
        return Ok(None);
    }
    let args = slots
        .iter()
        .map(|slot| match slot {
            ArgSlot::Fixed(expr) => Ok((*expr).to_string()),
            ArgSlot::Bound(binding) => binding.evaluate(scope),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(args.join(", ")))
}

/// A property setter applied when its tag is present.
#[derive(Debug, Clone)]
pub struct Property {
    pub setter: &'static str,
    pub converter: Converter,
}

/// Convert the text of a property element that is present on `node`.
pub fn convert_property(
    node: Node<'_>,
    tag: &'static str,
    raw: String,
    converter: Converter,
) -> Result<String> {
    let source = Source::Element(tag);
    let raw = RawValue::Text(raw);
    let converted = converter
        .apply(&raw)
        .map_err(|message| conversion_error(node, &source, &raw, message))?;
    match converted {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(CodegenError::EmptyRequiredValue {
            tag: tag_of(node),
            class: class_of(node),
            field: source.field_name(),
            raw: Some(raw.describe()),
        }),
    }
}

fn conversion_error(node: Node<'_>, source: &Source, raw: &RawValue<'_>, message: String) -> CodegenError {
    CodegenError::ValueConversion {
        tag: tag_of(node),
        class: class_of(node),
        field: source.field_name(),
        raw: raw.describe(),
        message,
    }
}

pub(crate) fn tag_of(node: Node<'_>) -> String {
    node.tag_name().unwrap_or_default().to_string()
}

pub(crate) fn class_of(node: Node<'_>) -> String {
    node.attribute("class").unwrap_or_default().to_string()
}

/// A plain widget.
#[derive(Debug, Clone)]
pub struct WidgetClass {
    /// Designer-facing class name, e.g. `wxButton`.
    pub class_name: &'static str,
    /// Dispatch key, e.g. `EditButton`.
    pub base: &'static str,
    /// Go type of the struct member.
    pub type_name: &'static str,
    pub constructor: &'static str,
    /// Constructor arguments after the parent.
    pub args: Vec<ArgSlot>,
    pub needs_parent: bool,
    pub properties: IndexMap<&'static str, Property>,
}

impl WidgetClass {
    pub fn new(
        class_name: &'static str,
        base: &'static str,
        type_name: &'static str,
        constructor: &'static str,
    ) -> Self {
        Self {
            class_name,
            base,
            type_name,
            constructor,
            args: Vec::new(),
            needs_parent: true,
            properties: IndexMap::new(),
        }
    }

    pub fn args(mut self, args: Vec<ArgSlot>) -> Self {
        self.args = args;
        self
    }

    pub fn without_parent(mut self) -> Self {
        self.needs_parent = false;
        self
    }

    /// Register a property setter. Each tag may be registered once.
    pub fn property(mut self, tag: &'static str, setter: &'static str, converter: Converter) -> Self {
        assert!(
            !self.properties.contains_key(tag),
            "property '{}' registered twice on {}",
            tag,
            self.base
        );
        self.properties.insert(tag, Property { setter, converter });
        self
    }
}

/// How many widgets each wrapper of a container may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    ExactlyOne,
    AtMostOne,
    Any,
}

/// Whether a container is a layout manager or a window holding children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Sizer; `orientation` names the element holding `wxHORIZONTAL`/`wxVERTICAL`.
    Sizer { orientation: &'static str },
    Window,
}

/// A widget that lays out or hosts other widgets.
#[derive(Debug, Clone)]
pub struct ContainerClass {
    pub widget: WidgetClass,
    pub kind: ContainerKind,
    /// Class of the element wrapping each child; `None` when children sit
    /// directly inside the container element.
    pub wrapper: Option<&'static str>,
    /// Class of empty placeholder wrappers, skipped entirely.
    pub empty_slot: Option<&'static str>,
    /// Extra arguments of the attach call, evaluated against the wrapper.
    pub item_args: Vec<ArgSlot>,
    pub add_method: &'static str,
    /// Children are constructed with this container as their parent window.
    pub parents_children: bool,
    pub cardinality: Cardinality,
}

impl ContainerClass {
    pub fn new(widget: WidgetClass, kind: ContainerKind, add_method: &'static str) -> Self {
        Self {
            widget,
            kind,
            wrapper: None,
            empty_slot: None,
            item_args: Vec::new(),
            add_method,
            parents_children: false,
            cardinality: Cardinality::ExactlyOne,
        }
    }

    pub fn wrapped_in(mut self, wrapper: &'static str, empty_slot: Option<&'static str>) -> Self {
        self.wrapper = Some(wrapper);
        self.empty_slot = empty_slot;
        self
    }

    pub fn item_args(mut self, args: Vec<ArgSlot>) -> Self {
        self.item_args = args;
        self
    }

    pub fn parenting_children(mut self) -> Self {
        self.parents_children = true;
        self
    }

    pub fn cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    pub fn is_sizer(&self) -> bool {
        matches!(self.kind, ContainerKind::Sizer { .. })
    }
}

/// wxGlade's `CustomWidget`: a user type named by the element itself.
#[derive(Debug, Clone)]
pub struct CustomClass {
    pub class_name: &'static str,
    pub base: &'static str,
    /// Placeholder replaced by the parent window; only valid in first position.
    pub parent_marker: &'static str,
    /// Placeholders with a fixed Go replacement.
    pub tokens: IndexMap<&'static str, &'static str>,
    /// Arguments assumed when the element has no `arguments` list.
    pub default_arguments: &'static [&'static str],
    pub properties: IndexMap<&'static str, Property>,
}

impl CustomClass {
    fn resolve<'d>(&'d self, node: Node<'_>) -> Result<ResolvedClass<'d>> {
        let class = node.attribute("class").unwrap_or_default();
        if class.is_empty() {
            return Err(CodegenError::EmptyRequiredValue {
                tag: tag_of(node),
                class: String::new(),
                field: "@class".to_string(),
                raw: None,
            });
        }

        let declared = node.descendants_by_path("arguments/argument");
        let mut placeholders: Vec<String> = if node.child_elements("arguments").next().is_some() {
            declared.iter().map(|argument| argument.text().trim().to_string()).collect()
        } else {
            self.default_arguments.iter().map(|arg| arg.to_string()).collect()
        };

        let needs_parent = placeholders.first().map(String::as_str) == Some(self.parent_marker);
        if needs_parent {
            placeholders.remove(0);
        }
        if placeholders.iter().any(|arg| arg == self.parent_marker) {
            return Err(CodegenError::MalformedContainer {
                class: class.to_string(),
                name: node.attribute("name").unwrap_or_default().to_string(),
                reason: format!(
                    "'{}' may only appear once, as the first argument",
                    self.parent_marker
                ),
            });
        }

        let mut args = Vec::with_capacity(placeholders.len());
        for (index, placeholder) in placeholders.into_iter().enumerate() {
            if placeholder.is_empty() {
                return Err(CodegenError::EmptyRequiredValue {
                    tag: tag_of(node),
                    class: class.to_string(),
                    field: format!("argument {}", index + 1),
                    raw: Some(placeholder),
                });
            }
            match self.tokens.get(placeholder.as_str()) {
                Some(replacement) => args.push((*replacement).to_string()),
                None => args.push(placeholder),
            }
        }

        Ok(ResolvedClass {
            type_name: Cow::Owned(class.to_string()),
            constructor: Cow::Owned(custom_constructor(class)),
            needs_parent,
            args: (!args.is_empty()).then(|| args.join(", ")),
            properties: &self.properties,
            container: None,
        })
    }
}

/// `MyWidget` is built by `NewMyWidget`, `pkg.MyWidget` by `pkg.NewMyWidget`.
fn custom_constructor(class: &str) -> String {
    match class.rsplit_once('.') {
        Some((package, name)) => format!("{}.New{}", package, name),
        None => format!("New{}", class),
    }
}

/// Registry entry, dispatched by `base`.
#[derive(Debug, Clone)]
pub enum Descriptor {
    Widget(WidgetClass),
    Container(ContainerClass),
    Custom(CustomClass),
}

impl Descriptor {
    pub fn base(&self) -> &'static str {
        match self {
            Descriptor::Widget(widget) => widget.base,
            Descriptor::Container(container) => container.widget.base,
            Descriptor::Custom(custom) => custom.base,
        }
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Descriptor::Widget(widget) => widget.class_name,
            Descriptor::Container(container) => container.widget.class_name,
            Descriptor::Custom(custom) => custom.class_name,
        }
    }

    pub fn as_container(&self) -> Option<&ContainerClass> {
        match self {
            Descriptor::Container(container) => Some(container),
            _ => None,
        }
    }

    /// Apply this descriptor to one element.
    ///
    /// The element is passed in rather than stored, so a descriptor shared by
    /// many elements never carries per-element state.
    pub fn resolve<'d>(&'d self, node: Node<'_>) -> Result<ResolvedClass<'d>> {
        let widget = match self {
            Descriptor::Widget(widget) => widget,
            Descriptor::Container(container) => &container.widget,
            Descriptor::Custom(custom) => return custom.resolve(node),
        };
        Ok(ResolvedClass {
            type_name: Cow::Borrowed(widget.type_name),
            constructor: Cow::Borrowed(widget.constructor),
            needs_parent: widget.needs_parent,
            args: render_args(&widget.args, &Scope::new(node))?,
            properties: &widget.properties,
            container: self.as_container(),
        })
    }
}

/// A descriptor applied to one element.
#[derive(Debug, Clone)]
pub struct ResolvedClass<'d> {
    pub type_name: Cow<'d, str>,
    pub constructor: Cow<'d, str>,
    pub needs_parent: bool,
    /// Rendered constructor arguments after the parent, if any.
    pub args: Option<String>,
    pub properties: &'d IndexMap<&'static str, Property>,
    pub container: Option<&'d ContainerClass>,
}

/// A top-level window class.
#[derive(Debug, Clone)]
pub struct WindowClass {
    pub base: &'static str,
    pub type_name: &'static str,
    pub constructor: &'static str,
    /// Name of the embedded field holding the window itself.
    pub self_field: &'static str,
    pub properties: IndexMap<&'static str, Property>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxg_dom::parse_document;

    fn custom() -> CustomClass {
        let mut tokens = IndexMap::new();
        tokens.insert("$id", "wx.ID_ANY");
        CustomClass {
            class_name: "CustomWidget",
            base: "CustomWidget",
            parent_marker: "$parent",
            tokens,
            default_arguments: &["$parent", "$id"],
            properties: IndexMap::new(),
        }
    }

    #[test]
    fn test_binding_default_used_verbatim() {
        let doc = parse_document(r#"<object class="sizeritem"><border>5</border></object>"#).unwrap();
        let scope = Scope::new(doc.root_element().unwrap());

        let flag = Binding::element("flag", Converter::Constant).or("0");
        assert_eq!(flag.evaluate(&scope).unwrap(), "0");

        let border = Binding::element("border", Converter::Int);
        assert_eq!(border.evaluate(&scope).unwrap(), "5");
    }

    #[test]
    fn test_binding_absent_without_default_is_empty() {
        let doc = parse_document(r#"<object class="sizeritem"/>"#).unwrap();
        let scope = Scope::new(doc.root_element().unwrap());

        let err = Binding::element("option", Converter::Int).evaluate(&scope).unwrap_err();
        match err {
            CodegenError::EmptyRequiredValue { field, class, raw, .. } => {
                assert_eq!(field, "option");
                assert_eq!(class, "sizeritem");
                assert_eq!(raw, None);
            }
            other => panic!("Expected EmptyRequiredValue, got {:?}", other),
        }
    }

    #[test]
    fn test_binding_conversion_failure_names_field() {
        let doc = parse_document(r#"<object class="sizeritem"><option>lots</option></object>"#).unwrap();
        let scope = Scope::new(doc.root_element().unwrap());

        let err = Binding::element("option", Converter::Int).evaluate(&scope).unwrap_err();
        match err {
            CodegenError::ValueConversion { field, raw, tag, .. } => {
                assert_eq!(field, "option");
                assert_eq!(raw, "lots");
                assert_eq!(tag, "object");
            }
            other => panic!("Expected ValueConversion, got {:?}", other),
        }
    }

    #[test]
    fn test_render_args_mixes_fixed_and_bound() {
        let doc = parse_document(r#"<object><label>Hi</label></object>"#).unwrap();
        let scope = Scope::new(doc.root_element().unwrap());
        let slots = vec![
            ArgSlot::Fixed("wx.ID_ANY"),
            ArgSlot::Bound(Binding::element("label", Converter::GoString)),
        ];
        assert_eq!(render_args(&slots, &scope).unwrap().as_deref(), Some("wx.ID_ANY, \"Hi\""));
        assert_eq!(render_args(&[], &scope).unwrap(), None);
    }

    #[test]
    fn test_custom_strips_leading_parent_marker() {
        let doc = parse_document(
            r#"<object class="chart.Plot" name="plot" base="CustomWidget">
                <arguments><argument>$parent</argument><argument>$id</argument><argument>42</argument></arguments>
            </object>"#,
        )
        .unwrap();
        let class = custom();
        let resolved = class.resolve(doc.root_element().unwrap()).unwrap();

        assert!(resolved.needs_parent);
        assert_eq!(resolved.type_name, "chart.Plot");
        assert_eq!(resolved.constructor, "chart.NewPlot");
        assert_eq!(resolved.args.as_deref(), Some("wx.ID_ANY, 42"));
    }

    #[test]
    fn test_custom_without_parent_marker() {
        let doc = parse_document(
            r#"<object class="Gauge" name="g" base="CustomWidget">
                <arguments><argument>$id</argument></arguments>
            </object>"#,
        )
        .unwrap();
        let class = custom();
        let resolved = class.resolve(doc.root_element().unwrap()).unwrap();

        assert!(!resolved.needs_parent);
        assert_eq!(resolved.constructor, "NewGauge");
        assert_eq!(resolved.args.as_deref(), Some("wx.ID_ANY"));
    }

    #[test]
    fn test_custom_default_arguments() {
        let doc = parse_document(r#"<object class="Gauge" name="g" base="CustomWidget"/>"#).unwrap();
        let class = custom();
        let resolved = class.resolve(doc.root_element().unwrap()).unwrap();

        assert!(resolved.needs_parent);
        assert_eq!(resolved.args.as_deref(), Some("wx.ID_ANY"));
    }

    #[test]
    fn test_custom_duplicate_parent_marker() {
        let doc = parse_document(
            r#"<object class="Gauge" name="g" base="CustomWidget">
                <arguments><argument>$parent</argument><argument>$parent</argument></arguments>
            </object>"#,
        )
        .unwrap();
        let class = custom();
        let result = class.resolve(doc.root_element().unwrap());
        assert!(matches!(result, Err(CodegenError::MalformedContainer { .. })));
    }

    #[test]
    fn test_tab_label_lookup() {
        let doc = parse_document(
            r#"<object class="wxNotebook" name="nb" base="EditNotebook">
                <tabs><tab window="page_a">Alpha</tab><tab window="page_b">Beta</tab></tabs>
                <object class="wxPanel" name="page_b" base="EditPanel"/>
            </object>"#,
        )
        .unwrap();
        let notebook = doc.root_element().unwrap();
        let page = notebook.child_elements("object").next().unwrap();

        let label = Binding::wrapped_child(Converter::TabLabel)
            .evaluate(&Scope::with_child(notebook, page))
            .unwrap();
        assert_eq!(label, "\"Beta\"");
    }
}
