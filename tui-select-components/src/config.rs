//! Effective configuration of a select field

use tui_select_core::FeatureToggles;

/// Toggle names a select field reads from its [`FeatureToggles`]
pub mod toggle {
    pub const SEARCHABLE: &str = "searchable";
    pub const USE_PORTAL: &str = "use_portal";
    pub const MULTIPLE: &str = "multiple";
}

/// Stacking order of the menu layer unless the caller picks one
pub const DEFAULT_Z_INDEX: u16 = 1050;

/// Control text when nothing is selected
pub const DEFAULT_PLACEHOLDER: &str = "Select...";

/// The settings a select field actually runs with for one render or event
///
/// A toggle that is present in the field's [`FeatureToggles`] wins over the
/// prop of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveConfig<'a> {
    pub searchable: bool,
    pub use_portal: bool,
    pub multiple: bool,
    pub z_index: u16,
    pub placeholder: &'a str,
}

impl<'a> EffectiveConfig<'a> {
    /// Merge direct settings with optional toggles
    pub fn resolve(
        searchable: bool,
        use_portal: bool,
        multiple: bool,
        z_index: u16,
        placeholder: &'a str,
        toggles: Option<&FeatureToggles>,
    ) -> Self {
        let pick = |name: &str, direct: bool| toggles.map_or(direct, |t| t.resolve(name, direct));
        Self {
            searchable: pick(toggle::SEARCHABLE, searchable),
            use_portal: pick(toggle::USE_PORTAL, use_portal),
            multiple: pick(toggle::MULTIPLE, multiple),
            z_index,
            placeholder,
        }
    }
}
