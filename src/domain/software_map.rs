//! Software-to-parameter mapping table.
//!
//! Each affiliate-tracking software expects the click identifier in its own
//! query parameter. The map associates a software key (the value stored per
//! link) with a parameter template such as `afp={clickid}`; the placeholder
//! is substituted with a freshly generated click id at redirect time.
//!
//! The table is immutable once built. Deployments that need extra software
//! entries or different parameter names register overrides at startup through
//! [`SoftwareMapBuilder`] instead of mutating a global.

use std::collections::BTreeMap;

/// Placeholder token replaced by the generated click identifier.
pub const CLICK_ID_PLACEHOLDER: &str = "{clickid}";

/// Built-in software keys and their parameter templates.
const DEFAULT_TEMPLATES: &[(&str, &str)] = &[
    ("cellxpert", "afp1={clickid}"),
    ("referon", "clickid={clickid}"),
    ("incomeaccess", "c={clickid}"),
    ("myaffiliates", "payload={clickid}"),
    ("map", "cid={clickid}"),
    ("mexos", "var1={clickid}"),
    ("raventrack", "s1={clickid}"),
    ("comeon", "var={clickid}"),
    ("omarsys", "var={clickid}"),
    ("firstcasinopartners", "clickid={clickid}"),
    ("alanbase", "sub_id1={clickid}"),
    ("smartico", "afp={clickid}"),
    ("tap", "afp={clickid}"),
    ("postaffiliatepro", "s1={clickid}"),
    ("affelios", "clickid={clickid}"),
    ("affise", "sub1={clickid}"),
    ("realtimegaming", "subGid={clickid}"),
    ("quintessence", "anid={clickid}"),
    ("netrefer", "var1={clickid}"),
    ("goldenreels", "promo={clickid}"),
    ("poshfriends", "promo={clickid}"),
    ("superboss", "promo={clickid}"),
    ("profit", "promo={clickid}"),
    ("conquestador", "promo={clickid}"),
    ("bons", "promo={clickid}"),
];

/// Errors raised when registering a template.
#[derive(Debug, thiserror::Error)]
pub enum SoftwareMapError {
    #[error("template for '{key}' is missing the {CLICK_ID_PLACEHOLDER} placeholder: '{template}'")]
    MissingPlaceholder { key: String, template: String },

    #[error("software key must not be empty")]
    EmptyKey,
}

/// A validated query-parameter template containing the click-id placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTemplate(String);

impl ParamTemplate {
    fn new(key: &str, raw: &str) -> Result<Self, SoftwareMapError> {
        if !raw.contains(CLICK_ID_PLACEHOLDER) {
            return Err(SoftwareMapError::MissingPlaceholder {
                key: key.to_string(),
                template: raw.to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    /// Substitutes the click identifier into the placeholder, producing a
    /// ready-to-append query fragment such as `afp=k3x9...`.
    pub fn apply(&self, click_id: &str) -> String {
        self.0.replace(CLICK_ID_PLACEHOLDER, click_id)
    }

    /// The query parameter name, i.e. everything before the first `=`.
    pub fn param_name(&self) -> &str {
        self.0.split('=').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Immutable mapping from software key to parameter template.
#[derive(Debug, Clone)]
pub struct SoftwareMap {
    templates: BTreeMap<String, ParamTemplate>,
}

impl SoftwareMap {
    /// Builder seeded with the built-in table.
    pub fn builder() -> SoftwareMapBuilder {
        let mut templates = BTreeMap::new();
        for (key, raw) in DEFAULT_TEMPLATES {
            let template =
                ParamTemplate::new(key, raw).expect("built-in template carries the placeholder");
            templates.insert((*key).to_string(), template);
        }
        SoftwareMapBuilder { templates }
    }

    /// The built-in table with no overrides.
    pub fn with_defaults() -> Self {
        Self::builder().build()
    }

    pub fn template_for(&self, key: &str) -> Option<&ParamTemplate> {
        self.templates.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.templates.contains_key(key)
    }

    /// Entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ParamTemplate)> {
        self.templates.iter().map(|(k, t)| (k.as_str(), t))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Startup-time registration of additional or replacement templates.
#[derive(Debug)]
pub struct SoftwareMapBuilder {
    templates: BTreeMap<String, ParamTemplate>,
}

impl SoftwareMapBuilder {
    /// Registers a template for `key`, replacing any existing entry.
    ///
    /// # Errors
    ///
    /// Rejects empty keys and templates without the `{clickid}` placeholder.
    pub fn register(
        mut self,
        key: impl Into<String>,
        template: &str,
    ) -> Result<Self, SoftwareMapError> {
        let key = key.into();
        if key.is_empty() {
            return Err(SoftwareMapError::EmptyKey);
        }
        let template = ParamTemplate::new(&key, template)?;
        self.templates.insert(key, template);
        Ok(self)
    }

    pub fn build(self) -> SoftwareMap {
        SoftwareMap {
            templates: self.templates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_all_carry_placeholder() {
        for (key, raw) in DEFAULT_TEMPLATES {
            assert!(
                raw.contains(CLICK_ID_PLACEHOLDER),
                "template for '{}' lacks placeholder",
                key
            );
        }
    }

    #[test]
    fn test_defaults_loaded() {
        let map = SoftwareMap::with_defaults();
        assert_eq!(map.len(), DEFAULT_TEMPLATES.len());
        assert!(map.contains("smartico"));
        assert!(map.contains("cellxpert"));
        assert!(!map.contains("unknown"));
    }

    #[test]
    fn test_template_apply() {
        let map = SoftwareMap::with_defaults();
        let template = map.template_for("smartico").unwrap();
        assert_eq!(template.apply("abc123"), "afp=abc123");
    }

    #[test]
    fn test_param_name() {
        let map = SoftwareMap::with_defaults();
        assert_eq!(map.template_for("affise").unwrap().param_name(), "sub1");
        assert_eq!(map.template_for("alanbase").unwrap().param_name(), "sub_id1");
    }

    #[test]
    fn test_register_new_key() {
        let map = SoftwareMap::builder()
            .register("acme", "aff_click={clickid}")
            .unwrap()
            .build();

        assert!(map.contains("acme"));
        assert_eq!(
            map.template_for("acme").unwrap().apply("x"),
            "aff_click=x"
        );
    }

    #[test]
    fn test_register_overrides_default() {
        let map = SoftwareMap::builder()
            .register("bons", "ref={clickid}")
            .unwrap()
            .build();

        assert_eq!(map.template_for("bons").unwrap().as_str(), "ref={clickid}");
        // Only the one entry changed.
        assert_eq!(map.len(), DEFAULT_TEMPLATES.len());
    }

    #[test]
    fn test_register_rejects_missing_placeholder() {
        let result = SoftwareMap::builder().register("broken", "clickid=fixed");
        assert!(matches!(
            result.unwrap_err(),
            SoftwareMapError::MissingPlaceholder { .. }
        ));
    }

    #[test]
    fn test_register_rejects_empty_key() {
        let result = SoftwareMap::builder().register("", "x={clickid}");
        assert!(matches!(result.unwrap_err(), SoftwareMapError::EmptyKey));
    }

    #[test]
    fn test_entries_sorted() {
        let map = SoftwareMap::with_defaults();
        let keys: Vec<&str> = map.entries().map(|(k, _)| k).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }
}
