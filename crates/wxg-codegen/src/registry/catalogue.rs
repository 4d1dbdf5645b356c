//! wxGo descriptors for the wxGlade classes the converter understands.

use indexmap::IndexMap;

use super::descriptor::{
    ArgSlot, Binding, Cardinality, ContainerClass, ContainerKind, Converter, CustomClass,
    Descriptor, Property, WidgetClass, WindowClass,
};
use super::WidgetRegistry;

use ArgSlot::{Bound, Fixed};

pub(super) fn wxgo() -> WidgetRegistry {
    let mut registry = WidgetRegistry::new();

    registry.register_window(window("EditFrame", "wx.Frame", "wx.NewFrame", "Frame"));
    registry.register_window(window("EditDialog", "wx.Dialog", "wx.NewDialog", "Dialog"));

    registry.register(Descriptor::Container(
        ContainerClass::new(
            WidgetClass::new("wxBoxSizer", "EditBoxSizer", "wx.BoxSizer", "wx.NewBoxSizer")
                .args(vec![Bound(Binding::element("orient", Converter::Constant))])
                .without_parent(),
            ContainerKind::Sizer {
                orientation: "orient",
            },
            "Add",
        )
        .wrapped_in("sizeritem", Some("sizerslot"))
        .item_args(vec![
            Bound(Binding::element("option", Converter::Int)),
            Bound(Binding::element("flag", Converter::Constant).or("0")),
            Bound(Binding::element("border", Converter::Int)),
        ]),
    ));

    registry.register(Descriptor::Container(
        ContainerClass::new(
            common_properties(
                WidgetClass::new("wxPanel", "EditPanel", "wx.Panel", "wx.NewPanel").args(vec![
                    Fixed("wx.ID_ANY"),
                    Fixed("wx.DefaultPosition"),
                    Fixed("wx.DefaultSize"),
                    Bound(Binding::element("style", Converter::Constant).or("wx.TAB_TRAVERSAL")),
                ]),
            ),
            ContainerKind::Window,
            "SetSizer",
        )
        .parenting_children()
        .cardinality(Cardinality::AtMostOne),
    ));

    registry.register(Descriptor::Container(
        ContainerClass::new(
            common_properties(
                WidgetClass::new("wxNotebook", "EditNotebook", "wx.Notebook", "wx.NewNotebook")
                    .args(vec![
                        Fixed("wx.ID_ANY"),
                        Fixed("wx.DefaultPosition"),
                        Fixed("wx.DefaultSize"),
                        Bound(Binding::element("style", Converter::Constant).or("0")),
                        Bound(Binding::attribute("name", Converter::GoString)),
                    ]),
            ),
            ContainerKind::Window,
            "AddPage",
        )
        .item_args(vec![Bound(Binding::wrapped_child(Converter::TabLabel))])
        .parenting_children()
        .cardinality(Cardinality::Any),
    ));

    registry.register(Descriptor::Widget(common_properties(
        WidgetClass::new("wxStaticText", "EditStaticText", "wx.StaticText", "wx.NewStaticText")
            .args(vec![
                Fixed("wx.ID_ANY"),
                Bound(Binding::element("label", Converter::GoString).or("\"\"")),
            ]),
    )));

    registry.register(Descriptor::Widget(common_properties(
        WidgetClass::new("wxListBox", "EditListBox", "wx.ListBox", "wx.NewListBox").args(vec![
            Fixed("wx.ID_ANY"),
            Fixed("wx.DefaultPosition"),
            Fixed("wx.DefaultSize"),
            Fixed("[]string{}"),
        ]),
    )));

    registry.register(Descriptor::Widget(common_properties(
        WidgetClass::new(
            "wxStaticBitmap",
            "EditStaticBitmap",
            "wx.StaticBitmap",
            "wx.NewStaticBitmap",
        )
        .args(vec![Fixed("wx.ID_ANY"), Fixed("wx.NullBitmap")]),
    )));

    registry.register(Descriptor::Widget(common_properties(
        WidgetClass::new("wxButton", "EditButton", "wx.Button", "wx.NewButton").args(vec![
            Fixed("wx.ID_ANY"),
            Bound(Binding::element("label", Converter::GoString)),
            Fixed("wx.DefaultPosition"),
            Fixed("wx.DefaultSize"),
            Fixed("0"),
            Fixed("wx.DefaultValidator"),
            Bound(Binding::element("label", Converter::GoString)),
        ]),
    )));

    registry.register(Descriptor::Widget(common_properties(
        WidgetClass::new("wxTextCtrl", "EditTextCtrl", "wx.TextCtrl", "wx.NewTextCtrl").args(vec![
            Fixed("wx.ID_ANY"),
            Bound(Binding::element("value", Converter::GoString).or("\"\"")),
            Fixed("wx.DefaultPosition"),
            Fixed("wx.DefaultSize"),
            Bound(Binding::element("style", Converter::Constant).or("0")),
        ]),
    )));

    registry.register(Descriptor::Widget(common_properties(
        WidgetClass::new("wxCheckBox", "EditCheckBox", "wx.CheckBox", "wx.NewCheckBox").args(vec![
            Fixed("wx.ID_ANY"),
            Bound(Binding::element("label", Converter::GoString).or("\"\"")),
            Fixed("wx.DefaultPosition"),
            Fixed("wx.DefaultSize"),
            Bound(Binding::element("style", Converter::Constant).or("0")),
        ]),
    )));

    let mut tokens = IndexMap::new();
    tokens.insert("$id", "wx.ID_ANY");
    tokens.insert("$width", "-1");
    tokens.insert("$height", "-1");
    registry.register(Descriptor::Custom(CustomClass {
        class_name: "CustomWidget",
        base: "CustomWidget",
        parent_marker: "$parent",
        tokens,
        default_arguments: &["$parent", "$id"],
        properties: IndexMap::new(),
    }));

    registry.set_spacer("EditSpacer");

    registry
}

fn window(
    base: &'static str,
    type_name: &'static str,
    constructor: &'static str,
    self_field: &'static str,
) -> WindowClass {
    let mut properties = IndexMap::new();
    properties.insert(
        "size",
        Property {
            setter: "SetSize",
            converter: Converter::Size,
        },
    );
    properties.insert(
        "background",
        Property {
            setter: "SetBackgroundColour",
            converter: Converter::Colour,
        },
    );
    WindowClass {
        base,
        type_name,
        constructor,
        self_field,
        properties,
    }
}

/// Properties wxGlade offers on every window-based widget.
fn common_properties(widget: WidgetClass) -> WidgetClass {
    widget
        .property("tooltip", "SetToolTip", Converter::GoString)
        .property("disabled", "Enable", Converter::NegatedFlag)
        .property("hidden", "Show", Converter::NegatedFlag)
        .property("background", "SetBackgroundColour", Converter::Colour)
        .property("foreground", "SetForegroundColour", Converter::Colour)
        .property("size", "SetMinSize", Converter::Size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_sizer_is_wrapped_sizer() {
        let registry = wxgo();
        let sizer = registry.get("EditBoxSizer").and_then(Descriptor::as_container).unwrap();

        assert!(sizer.is_sizer());
        assert!(!sizer.widget.needs_parent);
        assert_eq!(sizer.wrapper, Some("sizeritem"));
        assert_eq!(sizer.cardinality, Cardinality::ExactlyOne);
        assert_eq!(sizer.item_args.len(), 3);
    }

    #[test]
    fn test_window_containers_reparent_children() {
        let registry = wxgo();
        for base in ["EditPanel", "EditNotebook"] {
            let container = registry.get(base).and_then(Descriptor::as_container).unwrap();
            assert!(container.parents_children, "{} should parent its children", base);
            assert!(!container.is_sizer());
            assert_eq!(container.wrapper, None);
        }
    }

    #[test]
    fn test_button_disable_property() {
        let registry = wxgo();
        let descriptor = registry.get("EditButton").unwrap();
        assert_eq!(descriptor.class_name(), "wxButton");
        match descriptor {
            Descriptor::Widget(button) => {
                let disabled = &button.properties["disabled"];
                assert_eq!(disabled.setter, "Enable");
                assert_eq!(disabled.converter, Converter::NegatedFlag);
            }
            other => panic!("Expected a plain widget, got {:?}", other),
        }
    }
}
