//! wxGo source emitter.

use super::{Emitter, Provenance};
use crate::literal;
use crate::model::{EmissionUnit, LayoutChild};

/// Default wxGo import path.
pub const WXGO_IMPORT: &str = "github.com/dontpanic92/wxGo/wx";

/// Go code emitter for the wxGo binding.
#[derive(Debug, Clone)]
pub struct GoEmitter {
    package_name: String,
    wx_import: String,
}

impl Default for GoEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl GoEmitter {
    /// Create an emitter for `package main`.
    pub fn new() -> Self {
        Self::with_package("main")
    }

    /// Create with a custom package name.
    pub fn with_package(package: &str) -> Self {
        Self {
            package_name: package.to_string(),
            wx_import: WXGO_IMPORT.to_string(),
        }
    }

    /// Use a different import path for the wx package.
    pub fn wx_import(mut self, path: &str) -> Self {
        self.wx_import = path.to_string();
        self
    }

    fn header(&self, provenance: &Provenance) -> Vec<String> {
        vec![
            format!("// Code generated by {}. DO NOT EDIT.", provenance.tool),
            format!(
                "// Generated at {} UTC",
                provenance.generated_at.format("%Y-%m-%d %H:%M:%S")
            ),
            format!("// from {}", provenance.source),
            String::new(),
            format!("package {}", self.package_name),
            String::new(),
            "import (".to_string(),
            format!("\t{}", literal::go_string(&self.wx_import)),
            ")".to_string(),
        ]
    }

    fn generate_struct(&self, unit: &EmissionUnit) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!("type {} struct {{", unit.name));
        lines.push(format!("\t{}", unit.base_type));
        for member in &unit.members {
            lines.push(format!("\t{} {}", member.name, member.type_name));
        }
        lines.push("}".to_string());
        lines
    }

    fn generate_events_interface(&self, unit: &EmissionUnit) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!("type {}Events interface {{", unit.name));
        for handler in unit.handler_names() {
            lines.push(format!("\t{}(wx.Event)", handler));
        }
        lines.push("}".to_string());
        lines
    }

    fn generate_init(&self, unit: &EmissionUnit) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!(
            "func init{}(handler {}Events) *{} {{",
            unit.name, unit.name, unit.name
        ));
        lines.push(format!("\tout := &{}{{}}", unit.name));
        lines.push(format!(
            "\tout.{} = {}(wx.NullWindow, wx.ID_ANY, {})",
            unit.self_field,
            unit.constructor,
            literal::go_string(&unit.title)
        ));

        for entry in &unit.constructions {
            let mut args = Vec::new();
            if entry.needs_parent {
                match &entry.parent {
                    Some(parent) => args.push(format!("out.{}", parent)),
                    None => args.push("out".to_string()),
                }
            }
            if let Some(extra) = &entry.args {
                args.push(extra.clone());
            }
            lines.push(format!(
                "\tout.{} = {}({})",
                entry.field,
                entry.constructor,
                args.join(", ")
            ));
        }

        lines.push(String::new());
        lines.push("\tout.setProperties()".to_string());
        lines.push("\tout.doLayout()".to_string());

        if !unit.bindings.is_empty() {
            lines.push(String::new());
            for binding in &unit.bindings {
                lines.push(format!(
                    "\twx.Bind(out, wx.{}, handler.{}, out.{}.GetId())",
                    binding.event, binding.handler, binding.field
                ));
            }
        }

        lines.push(String::new());
        lines.push("\treturn out".to_string());
        lines.push("}".to_string());
        lines
    }

    fn generate_layout(&self, unit: &EmissionUnit) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!("func (out *{}) doLayout() {{", unit.name));
        for entry in &unit.layout {
            let child = match &entry.child {
                LayoutChild::Member(name) => format!("out.{}", name),
                LayoutChild::Literal(expr) => expr.clone(),
            };
            let args = match &entry.extra {
                Some(extra) => format!("{}, {}", child, extra),
                None => child,
            };
            lines.push(format!("\tout.{}.{}({})", entry.parent, entry.method, args));
        }
        if let Some(sizer) = &unit.sizer_field {
            lines.push(format!("\tout.{}.SetSizer(out.{})", unit.self_field, sizer));
        }
        lines.push(format!("\tout.{}.Layout()", unit.self_field));
        lines.push("}".to_string());
        lines
    }

    fn generate_properties(&self, unit: &EmissionUnit) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!("func (window *{}) setProperties() {{", unit.name));
        lines.push(format!("\twindow.SetTitle({})", literal::go_string(&unit.title)));
        for entry in &unit.properties {
            let target = match &entry.field {
                Some(field) => format!("window.{}", field),
                None => "window".to_string(),
            };
            lines.push(format!(
                "\t{}.{}({})",
                target,
                entry.setter,
                entry.value.as_deref().unwrap_or_default()
            ));
        }
        lines.push("}".to_string());
        lines
    }
}

impl Emitter for GoEmitter {
    fn target_name(&self) -> &'static str {
        "go"
    }

    fn emit(&self, units: &[EmissionUnit], provenance: &Provenance) -> String {
        let mut sections = vec![self.header(provenance)];
        for unit in units {
            sections.push(self.generate_struct(unit));
            sections.push(self.generate_events_interface(unit));
            sections.push(self.generate_init(unit));
            sections.push(self.generate_layout(unit));
            sections.push(self.generate_properties(unit));
        }

        let mut out = sections
            .into_iter()
            .map(|lines| lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConstructionEntry, EventBinding, LayoutEntry, Member, PropertyEntry};
    use chrono::TimeZone;

    fn provenance() -> Provenance {
        Provenance::new(
            "wxg-to-go",
            "main.wxg",
            chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        )
    }

    fn unit() -> EmissionUnit {
        let mut unit = EmissionUnit::new("MainFrame", "wx.Frame", "wx.NewFrame", "Frame", "Say \"hi\"");
        unit.sizer_field = Some("row".to_string());
        unit.members.push(Member {
            name: "row".to_string(),
            type_name: "wx.BoxSizer".to_string(),
        });
        unit.members.push(Member {
            name: "ok".to_string(),
            type_name: "wx.Button".to_string(),
        });
        unit.constructions.push(ConstructionEntry {
            field: "row".to_string(),
            constructor: "wx.NewBoxSizer".to_string(),
            args: Some("wx.HORIZONTAL".to_string()),
            needs_parent: false,
            parent: None,
        });
        unit.constructions.push(ConstructionEntry {
            field: "ok".to_string(),
            constructor: "wx.NewButton".to_string(),
            args: Some("wx.ID_ANY, \"OK\"".to_string()),
            needs_parent: true,
            parent: None,
        });
        unit.layout.push(LayoutEntry {
            parent: "row".to_string(),
            child: LayoutChild::Member("ok".to_string()),
            extra: Some("0, 0, 0".to_string()),
            method: "Add".to_string(),
        });
        unit.layout.push(LayoutEntry {
            parent: "row".to_string(),
            child: LayoutChild::Literal("10".to_string()),
            extra: None,
            method: "AddSpacer".to_string(),
        });
        unit.properties.push(PropertyEntry {
            field: None,
            setter: "SetSize".to_string(),
            value: Some("wx.NewSize(400, 300)".to_string()),
        });
        unit.properties.push(PropertyEntry {
            field: Some("ok".to_string()),
            setter: "Enable".to_string(),
            value: Some("false".to_string()),
        });
        unit.bindings.push(EventBinding {
            handler: "OnOk".to_string(),
            event: "EVT_BUTTON".to_string(),
            field: "ok".to_string(),
        });
        unit
    }

    #[test]
    fn test_header() {
        let code = GoEmitter::new().emit(&[], &provenance());
        assert!(code.starts_with("// Code generated by wxg-to-go. DO NOT EDIT.\n"));
        assert!(code.contains("// Generated at 2024-05-01 12:30:00 UTC\n"));
        assert!(code.contains("// from main.wxg\n"));
        assert!(code.contains("package main\n"));
        assert!(code.contains("import (\n\t\"github.com/dontpanic92/wxGo/wx\"\n)"));
    }

    #[test]
    fn test_custom_package_and_import() {
        let emitter = GoEmitter::with_package("ui").wx_import("example.com/wx");
        let code = emitter.emit(&[], &provenance());
        assert!(code.contains("package ui\n"));
        assert!(code.contains("\t\"example.com/wx\""));
        assert_eq!(emitter.target_name(), "go");
    }

    #[test]
    fn test_struct_and_interface() {
        let code = GoEmitter::new().emit(&[unit()], &provenance());
        assert!(code.contains("type MainFrame struct {\n\twx.Frame\n\trow wx.BoxSizer\n\tok wx.Button\n}"));
        assert!(code.contains("type MainFrameEvents interface {\n\tOnOk(wx.Event)\n}"));
    }

    #[test]
    fn test_init_function() {
        let code = GoEmitter::new().emit(&[unit()], &provenance());
        assert!(code.contains("func initMainFrame(handler MainFrameEvents) *MainFrame {"));
        assert!(code.contains("\tout.Frame = wx.NewFrame(wx.NullWindow, wx.ID_ANY, \"Say \\\"hi\\\"\")"));
        assert!(code.contains("\tout.row = wx.NewBoxSizer(wx.HORIZONTAL)\n\tout.ok = wx.NewButton(out, wx.ID_ANY, \"OK\")"));
        assert!(code.contains("\twx.Bind(out, wx.EVT_BUTTON, handler.OnOk, out.ok.GetId())"));

        let properties = code.find("out.setProperties()").unwrap();
        let layout = code.find("out.doLayout()").unwrap();
        let bind = code.find("wx.Bind(").unwrap();
        assert!(properties < layout && layout < bind);
    }

    #[test]
    fn test_layout_function() {
        let code = GoEmitter::new().emit(&[unit()], &provenance());
        assert!(code.contains(
            "func (out *MainFrame) doLayout() {\n\
             \tout.row.Add(out.ok, 0, 0, 0)\n\
             \tout.row.AddSpacer(10)\n\
             \tout.Frame.SetSizer(out.row)\n\
             \tout.Frame.Layout()\n\
             }"
        ));
    }

    #[test]
    fn test_title_set_before_properties() {
        let code = GoEmitter::new().emit(&[unit()], &provenance());
        assert!(code.contains(
            "func (window *MainFrame) setProperties() {\n\
             \twindow.SetTitle(\"Say \\\"hi\\\"\")\n\
             \twindow.SetSize(wx.NewSize(400, 300))\n\
             \twindow.ok.Enable(false)\n\
             }"
        ));
    }

    #[test]
    fn test_no_sizer_no_bindings() {
        let bare = EmissionUnit::new("About", "wx.Dialog", "wx.NewDialog", "Dialog", "About");
        let code = GoEmitter::new().emit(&[bare], &provenance());
        assert!(code.contains("func (out *About) doLayout() {\n\tout.Dialog.Layout()\n}"));
        assert!(code.contains("type AboutEvents interface {\n}"));
        assert!(!code.contains("wx.Bind"));
    }

    #[test]
    fn test_emit_is_deterministic() {
        let emitter = GoEmitter::new();
        let units = vec![unit()];
        assert_eq!(emitter.emit(&units, &provenance()), emitter.emit(&units, &provenance()));
    }
}
