//! Widget class registry.
//!
//! Maps the `base` attribute of wxGlade objects to [`Descriptor`]s. Lookup
//! is a single map access; there is no fallback for unknown bases.

mod catalogue;
mod descriptor;

pub use descriptor::{
    convert_property, render_args, ArgSlot, Binding, Cardinality, ContainerClass, ContainerKind,
    Converter, CustomClass, Descriptor, Property, RawValue, ResolvedClass, Scope, Source,
    WidgetClass, WindowClass,
};

pub(crate) use descriptor::{class_of, tag_of};

use indexmap::{IndexMap, IndexSet};

/// A registry of widget descriptors, top-level window classes and ignored bases.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    descriptors: IndexMap<&'static str, Descriptor>,
    windows: IndexMap<&'static str, WindowClass>,
    ignored: IndexSet<&'static str>,
    spacer: Option<&'static str>,
}

impl WidgetRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The wxGo catalogue.
    pub fn wxgo() -> Self {
        catalogue::wxgo()
    }

    /// Register a descriptor under its base.
    ///
    /// # Panics
    ///
    /// If the base is already registered; the catalogue is static data.
    pub fn register(&mut self, descriptor: Descriptor) {
        let base = descriptor.base();
        assert!(
            !self.descriptors.contains_key(base) && !self.windows.contains_key(base),
            "descriptor for '{}' registered twice",
            base
        );
        self.descriptors.insert(base, descriptor);
    }

    /// Register a top-level window class.
    ///
    /// # Panics
    ///
    /// If the base is already registered.
    pub fn register_window(&mut self, window: WindowClass) {
        assert!(
            !self.descriptors.contains_key(window.base) && !self.windows.contains_key(window.base),
            "window class '{}' registered twice",
            window.base
        );
        self.windows.insert(window.base, window);
    }

    /// Skip objects with this base, together with everything inside them.
    pub fn ignore(&mut self, base: &'static str) {
        self.ignored.insert(base);
    }

    /// Base of spacer objects inside sizer items. Spacers are also ignored
    /// wherever they appear outside a sizer.
    pub fn set_spacer(&mut self, base: &'static str) {
        self.spacer = Some(base);
        self.ignore(base);
    }

    /// Get a descriptor by base.
    pub fn get(&self, base: &str) -> Option<&Descriptor> {
        self.descriptors.get(base)
    }

    /// Get a top-level window class by base.
    pub fn window(&self, base: &str) -> Option<&WindowClass> {
        self.windows.get(base)
    }

    pub fn is_ignored(&self, base: &str) -> bool {
        self.ignored.contains(base)
    }

    pub fn is_spacer(&self, base: &str) -> bool {
        self.spacer == Some(base)
    }

    /// Registered widget bases, in registration order.
    pub fn bases(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.keys().copied()
    }

    /// Number of registered widget descriptors.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_new() {
        let registry = WidgetRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("EditButton").is_none());
    }

    #[test]
    fn test_lookup_every_registered_base() {
        let registry = WidgetRegistry::wxgo();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), registry.bases().count());
        for base in registry.bases() {
            let descriptor = registry.get(base).unwrap();
            assert_eq!(descriptor.base(), base);
        }
    }

    #[test]
    fn test_lookup_unregistered_base() {
        let registry = WidgetRegistry::wxgo();
        assert!(registry.get("EditGauge").is_none());
        assert!(registry.get("editbutton").is_none());
        assert!(registry.get("").is_none());
    }

    #[test]
    fn test_windows_and_ignored() {
        let registry = WidgetRegistry::wxgo();
        assert_eq!(registry.window("EditFrame").unwrap().self_field, "Frame");
        assert!(registry.window("EditButton").is_none());
        assert!(registry.is_ignored("EditSpacer"));
        assert!(registry.is_spacer("EditSpacer"));
        assert!(!registry.is_ignored("EditButton"));
    }

    #[test]
    #[should_panic(expected = "registered twice")]
    fn test_duplicate_base_panics() {
        let mut registry = WidgetRegistry::new();
        registry.register(Descriptor::Widget(WidgetClass::new(
            "wxButton",
            "EditButton",
            "wx.Button",
            "wx.NewButton",
        )));
        registry.register(Descriptor::Widget(WidgetClass::new(
            "wxButton",
            "EditButton",
            "wx.Button",
            "wx.NewButton",
        )));
    }
}
