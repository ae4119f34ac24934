//! The detection strategy seam

use crate::context::DetectionContext;
use crate::options::DetectorOptions;

/// One named source of a language preference.
///
/// `lookup` is a pure read; it returns a candidate without checking the
/// supported set (the detector does that). Strategies that can persist a
/// choice override `cache_user_language`; strategies that persist nothing
/// keep the default no-op. `clear` removes any persisted value.
pub trait DetectionStrategy: Send + Sync {
    /// Stable name used in the order and caches lists
    fn name(&self) -> &'static str;

    /// Read a candidate language from this source
    fn lookup(&self, ctx: &DetectionContext, options: &DetectorOptions) -> Option<String>;

    /// Persist the resolved language, if this source supports it
    fn cache_user_language(
        &self,
        _language: &str,
        _ctx: &DetectionContext,
        _options: &DetectorOptions,
    ) {
    }

    /// Remove any persisted value from this source
    fn clear(&self, _ctx: &DetectionContext, _options: &DetectorOptions) {}
}
