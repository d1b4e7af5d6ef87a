use crate::features::EventFeature;
use crate::i18n::{tr, Translatable};
use crate::model::event::Event;

pub const SURVEYS_FEATURE_NAME: &str = "surveys";

/// Catalog entry letting organizers switch surveys on or off per event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurveysFeature;

impl EventFeature for SurveysFeature {
    fn name(&self) -> &'static str {
        SURVEYS_FEATURE_NAME
    }

    fn friendly_name(&self) -> Translatable {
        tr("Surveys")
    }

    fn description(&self) -> Translatable {
        tr("Gives event managers the opportunity to create surveys.")
    }

    // Every event starts with surveys on; organizers turn them off explicitly.
    fn is_default_for_event(&self, _event: &Event) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::SurveysFeature;
    use crate::features::EventFeature;
    use crate::model::event::Event;

    #[test]
    fn enabled_by_default_for_any_event() {
        for id in [1, 7, 12_345] {
            assert!(SurveysFeature.is_default_for_event(&Event::new(id, "Any", 1)));
        }
    }

    #[test]
    fn exposes_catalog_strings() {
        assert_eq!(SurveysFeature.name(), "surveys");
        assert_eq!(SurveysFeature.friendly_name().msgid(), "Surveys");
        assert!(SurveysFeature.description().msgid().contains("surveys"));
    }
}
