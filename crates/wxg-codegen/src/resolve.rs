//! Resolution of a wxGlade document into emission units.
//!
//! Each top-level window is resolved by a breadth-first walk over its
//! objects:
//! 1. Look up the object's descriptor by `base`
//! 2. Record the member, its construction, properties and event bindings
//! 3. For containers, enqueue the wrapped children and record how each is
//!    attached, turning sizer spacers into literal layout entries
//!
//! Construction order is therefore visit order, and every parent field is
//! constructed before the widgets that name it.

use std::collections::{HashSet, VecDeque};

use wxg_dom::{Document, Node, NodeId};

use crate::error::{CodegenError, Result};
use crate::model::{ConstructionEntry, EmissionUnit, EventBinding, LayoutChild, LayoutEntry, Member, PropertyEntry};
use crate::registry::{
    class_of, convert_property, render_args, tag_of, Cardinality, ContainerClass, ContainerKind,
    Scope, WidgetRegistry,
};

/// An object waiting to be visited.
#[derive(Debug, Clone)]
struct PendingVisit<'a> {
    node: Node<'a>,
    /// Field of the container (or window) the object was found in.
    parent_field: String,
    /// Window the object is constructed in, when it is not the root window.
    parent_object: Option<String>,
}

/// Resolves documents against a registry.
pub struct Resolver<'r> {
    registry: &'r WidgetRegistry,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r WidgetRegistry) -> Self {
        Self { registry }
    }

    /// Resolve every top-level window of the document, in document order.
    pub fn resolve_document(&self, doc: &Document) -> Result<Vec<EmissionUnit>> {
        let mut applications = doc.root().child_elements("application");
        let application = applications
            .next()
            .ok_or_else(|| CodegenError::InvalidDocument("no <application> element".to_string()))?;
        if applications.next().is_some() {
            return Err(CodegenError::InvalidDocument(
                "more than one <application> element".to_string(),
            ));
        }

        application
            .child_elements("object")
            .map(|window| self.resolve_window(window))
            .collect()
    }

    /// Resolve one top-level window.
    pub fn resolve_window(&self, window: Node<'_>) -> Result<EmissionUnit> {
        let base = window.attribute("base").unwrap_or_default();
        let class = window_class_name(window)?;
        let window_class =
            self.registry
                .window(base)
                .ok_or_else(|| CodegenError::UnknownWidgetType {
                    base: base.to_string(),
                    class: class.to_string(),
                    name: window.attribute("name").unwrap_or_default().to_string(),
                })?;
        log::info!("resolving window {} ({})", class, base);

        let title = window.child_element_text("title").unwrap_or_default();
        let mut unit = EmissionUnit::new(
            class,
            window_class.type_name,
            window_class.constructor,
            window_class.self_field,
            title,
        );

        for (&tag, property) in &window_class.properties {
            if let Some(raw) = window.child_element_text(tag) {
                unit.properties.push(PropertyEntry {
                    field: None,
                    setter: property.setter.to_string(),
                    value: Some(convert_property(window, tag, raw, property.converter)?),
                });
            }
        }

        let mut traversal = Traversal {
            registry: self.registry,
            unit,
            queue: VecDeque::new(),
            visited: HashSet::new(),
            members: HashSet::new(),
        };
        for child in window.child_elements("object") {
            traversal.queue.push_back(PendingVisit {
                node: child,
                parent_field: window_class.self_field.to_string(),
                parent_object: None,
            });
        }
        traversal.run()?;

        Ok(traversal.unit)
    }
}

fn window_class_name(window: Node<'_>) -> Result<&str> {
    match window.attribute("class") {
        Some(class) if !class.is_empty() => Ok(class),
        raw => Err(CodegenError::EmptyRequiredValue {
            tag: tag_of(window),
            class: String::new(),
            field: "@class".to_string(),
            raw: raw.map(str::to_string),
        }),
    }
}

/// State of one window's walk. Owned by a single `resolve_window` call.
struct Traversal<'r, 'a> {
    registry: &'r WidgetRegistry,
    unit: EmissionUnit,
    queue: VecDeque<PendingVisit<'a>>,
    visited: HashSet<NodeId>,
    /// Member names already taken in this unit.
    members: HashSet<String>,
}

impl<'r, 'a> Traversal<'r, 'a> {
    fn run(&mut self) -> Result<()> {
        while let Some(visit) = self.queue.pop_front() {
            self.visit(visit)?;
        }
        Ok(())
    }

    fn visit(&mut self, visit: PendingVisit<'a>) -> Result<()> {
        let registry = self.registry;
        let node = visit.node;
        if !self.visited.insert(node.id()) {
            return Err(CodegenError::MalformedContainer {
                class: class_of(node),
                name: node.attribute("name").unwrap_or_default().to_string(),
                reason: "object is reachable from more than one container".to_string(),
            });
        }

        let base = node.attribute("base").unwrap_or_default();
        if registry.is_ignored(base) {
            log::debug!("skipping ignored {} in {}", base, visit.parent_field);
            return Ok(());
        }

        let descriptor = registry
            .get(base)
            .ok_or_else(|| CodegenError::UnknownWidgetType {
                base: base.to_string(),
                class: class_of(node),
                name: node.attribute("name").unwrap_or_default().to_string(),
            })?;
        let resolved = descriptor.resolve(node)?;
        let name = member_name(node)?;
        if name == self.unit.self_field || !self.members.insert(name.clone()) {
            return Err(CodegenError::DuplicateMember {
                class: class_of(node),
                name,
                window: self.unit.name.clone(),
            });
        }
        log::debug!("visiting {} ({}) in {}", name, base, visit.parent_field);

        self.unit.members.push(Member {
            name: name.clone(),
            type_name: resolved.type_name.to_string(),
        });
        self.unit.constructions.push(ConstructionEntry {
            field: name.clone(),
            constructor: resolved.constructor.to_string(),
            args: resolved.args.clone(),
            needs_parent: resolved.needs_parent,
            parent: visit.parent_object.clone(),
        });

        // The first container visited is installed as the window's sizer.
        if resolved.container.is_some() && self.unit.sizer_field.is_none() {
            self.unit.sizer_field = Some(name.clone());
        }

        for (&tag, property) in resolved.properties {
            if let Some(raw) = node.child_element_text(tag) {
                self.unit.properties.push(PropertyEntry {
                    field: Some(name.clone()),
                    setter: property.setter.to_string(),
                    value: Some(convert_property(node, tag, raw, property.converter)?),
                });
            }
        }

        for handler in node.descendants_by_path("events/handler") {
            let event = handler.attribute("event").unwrap_or_default();
            let callback = handler.text().trim().to_string();
            if event.is_empty() || callback.is_empty() {
                return Err(CodegenError::EmptyRequiredValue {
                    tag: tag_of(handler),
                    class: class_of(node),
                    field: if event.is_empty() { "@event" } else { "handler" }.to_string(),
                    raw: Some(format!("{}={}", event, callback)),
                });
            }
            self.unit.bindings.push(EventBinding {
                handler: callback,
                event: event.to_string(),
                field: name.clone(),
            });
        }

        if let Some(container) = resolved.container {
            let parent_object = if container.parents_children {
                Some(name.clone())
            } else {
                visit.parent_object
            };
            self.enqueue_children(node, &name, container, parent_object)?;
        }

        Ok(())
    }

    fn enqueue_children(
        &mut self,
        node: Node<'a>,
        name: &str,
        container: &ContainerClass,
        parent_object: Option<String>,
    ) -> Result<()> {
        let malformed = |reason: String| CodegenError::MalformedContainer {
            class: class_of(node),
            name: name.to_string(),
            reason,
        };

        let wrappers: Vec<Node<'a>> = match container.wrapper {
            None => vec![node],
            Some(wrapper_class) => {
                let mut wrappers = Vec::new();
                for wrapper in node.child_elements("object") {
                    let class = wrapper.attribute("class").unwrap_or_default();
                    if Some(class) == container.empty_slot {
                        continue;
                    }
                    if class != wrapper_class {
                        return Err(malformed(format!(
                            "expected '{}' items, found '{}'",
                            wrapper_class, class
                        )));
                    }
                    wrappers.push(wrapper);
                }
                wrappers
            }
        };

        for wrapper in wrappers {
            let children: Vec<Node<'a>> = wrapper.child_elements("object").collect();
            let count_ok = match container.cardinality {
                Cardinality::ExactlyOne => children.len() == 1,
                Cardinality::AtMostOne => children.len() <= 1,
                Cardinality::Any => true,
            };
            if !count_ok {
                return Err(malformed(format!(
                    "'{}' holds {} objects, expected {}",
                    wrapper.attribute("class").unwrap_or_default(),
                    children.len(),
                    match container.cardinality {
                        Cardinality::ExactlyOne => "exactly one",
                        Cardinality::AtMostOne => "at most one",
                        Cardinality::Any => "any number",
                    }
                )));
            }

            for child in children {
                let child_base = child.attribute("base").unwrap_or_default();
                if self.registry.is_spacer(child_base) {
                    let entry = spacer_entry(node, name, container, wrapper, child)?;
                    log::debug!("{}.{} spacer", name, entry.method);
                    self.unit.layout.push(entry);
                    continue;
                }
                if self.registry.is_ignored(child_base) {
                    continue;
                }

                let child_name = member_name(child)?;
                let extra = render_args(&container.item_args, &Scope::with_child(wrapper, child))?;
                log::debug!("{}.{}({})", name, container.add_method, child_name);

                self.queue.push_back(PendingVisit {
                    node: child,
                    parent_field: name.to_string(),
                    parent_object: parent_object.clone(),
                });
                self.unit.layout.push(LayoutEntry {
                    parent: name.to_string(),
                    child: LayoutChild::Member(child_name),
                    extra,
                    method: container.add_method.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Layout entry for a spacer inside a sizer item.
///
/// A non-zero item proportion makes a stretch spacer; otherwise the spacer
/// takes its fixed extent along the sizer's main axis.
fn spacer_entry(
    sizer: Node<'_>,
    name: &str,
    container: &ContainerClass,
    item: Node<'_>,
    spacer: Node<'_>,
) -> Result<LayoutEntry> {
    let orientation = match container.kind {
        ContainerKind::Sizer { orientation } => orientation,
        ContainerKind::Window => {
            return Err(CodegenError::MalformedContainer {
                class: class_of(sizer),
                name: name.to_string(),
                reason: "spacers are only allowed inside sizers".to_string(),
            })
        }
    };
    let horizontal = sizer
        .child_element_text(orientation)
        .or_else(|| sizer.attribute(orientation).map(str::to_string))
        .map_or(false, |orient| orient.contains("HORIZONTAL"));

    let proportion = int_field(item, "option", Some(0))?;
    let (method, value) = if proportion != 0 {
        ("AddStretchSpacer", proportion)
    } else {
        let extent = if horizontal { "width" } else { "height" };
        ("AddSpacer", int_field(spacer, extent, None)?)
    };

    Ok(LayoutEntry {
        parent: name.to_string(),
        child: LayoutChild::Literal(value.to_string()),
        extra: None,
        method: method.to_string(),
    })
}

fn int_field(node: Node<'_>, tag: &str, default: Option<i64>) -> Result<i64> {
    match (node.child_element_text(tag), default) {
        (Some(raw), _) => raw
            .trim()
            .parse::<i64>()
            .map_err(|err| CodegenError::ValueConversion {
                tag: tag_of(node),
                class: class_of(node),
                field: tag.to_string(),
                raw,
                message: format!("not an integer ({})", err),
            }),
        (None, Some(default)) => Ok(default),
        (None, None) => Err(CodegenError::EmptyRequiredValue {
            tag: tag_of(node),
            class: class_of(node),
            field: tag.to_string(),
            raw: None,
        }),
    }
}

fn member_name(node: Node<'_>) -> Result<String> {
    match node.attribute("name") {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        raw => Err(CodegenError::EmptyRequiredValue {
            tag: tag_of(node),
            class: class_of(node),
            field: "@name".to_string(),
            raw: raw.map(str::to_string),
        }),
    }
}
