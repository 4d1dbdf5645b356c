//! Intermediate representation handed from the resolver to emitters.
//!
//! One [`EmissionUnit`] describes one top-level window. Entries are recorded
//! in traversal order and rendered in that order.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A struct member holding one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Member {
    pub name: String,
    pub type_name: String,
}

/// `field = constructor(parent, args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ConstructionEntry {
    pub field: String,
    pub constructor: String,
    /// Arguments after the parent, already rendered.
    pub args: Option<String>,
    pub needs_parent: bool,
    /// Parent window field; the root window when `None`.
    pub parent: Option<String>,
}

/// `field.setter(value)`; `field` is `None` for the window itself.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PropertyEntry {
    pub field: Option<String>,
    pub setter: String,
    pub value: Option<String>,
}

/// What a layout entry attaches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum LayoutChild {
    /// A member of the unit.
    Member(String),
    /// A literal expression, e.g. a spacer size.
    Literal(String),
}

/// `parent.method(child, extra)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LayoutEntry {
    pub parent: String,
    pub child: LayoutChild,
    pub extra: Option<String>,
    pub method: String,
}

/// An event handler bound to a member's window id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EventBinding {
    pub handler: String,
    pub event: String,
    pub field: String,
}

/// A fully resolved top-level window.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EmissionUnit {
    /// Name of the generated struct.
    pub name: String,
    pub base_type: String,
    pub constructor: String,
    /// Embedded field holding the window.
    pub self_field: String,
    pub title: String,
    /// Member installed as the window's sizer.
    pub sizer_field: Option<String>,
    pub members: Vec<Member>,
    pub constructions: Vec<ConstructionEntry>,
    pub properties: Vec<PropertyEntry>,
    pub layout: Vec<LayoutEntry>,
    pub bindings: Vec<EventBinding>,
}

impl EmissionUnit {
    pub fn new(
        name: impl Into<String>,
        base_type: impl Into<String>,
        constructor: impl Into<String>,
        self_field: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_type: base_type.into(),
            constructor: constructor.into(),
            self_field: self_field.into(),
            title: title.into(),
            sizer_field: None,
            members: Vec::new(),
            constructions: Vec::new(),
            properties: Vec::new(),
            layout: Vec::new(),
            bindings: Vec::new(),
        }
    }

    /// Distinct handler names in first-bound order.
    pub fn handler_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for binding in &self.bindings {
            if !names.contains(&binding.handler.as_str()) {
                names.push(&binding.handler);
            }
        }
        names
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_names_are_distinct_and_ordered() {
        let mut unit = EmissionUnit::new("Main", "wx.Frame", "wx.NewFrame", "Frame", "Main");
        for (handler, event, field) in [
            ("OnSave", "EVT_BUTTON", "save"),
            ("OnQuit", "EVT_BUTTON", "quit"),
            ("OnSave", "EVT_MENU", "save_item"),
        ] {
            unit.bindings.push(EventBinding {
                handler: handler.to_string(),
                event: event.to_string(),
                field: field.to_string(),
            });
        }

        assert_eq!(unit.handler_names(), vec!["OnSave", "OnQuit"]);
    }
}
