//! One model's list view: resolution, layout and rendering in one place
//!
//! ```ignore
//! let view = ListView::build(&registry, &catalog, &catalog, "Team")?;
//! let html = view.render(records)?;
//! ```

use crate::errors::AdminResult;
use crate::layout::{LayoutPlan, LayoutPlanner};
use crate::model::{introspect, LabelProvider, ModelProvider};
use crate::observability::{log_event_with_fields, Event, ObservationScope};
use crate::registry::{ListSettings, Registry};
use crate::render::{HtmlTable, Record, RecordSorter};
use crate::resolver::{ResolvedField, Resolver};

/// Resolved and planned list of one model
#[derive(Debug, Clone)]
pub struct ListView {
    model: String,
    plan: LayoutPlan,
    hidden: Vec<ResolvedField>,
    settings: ListSettings,
}

impl ListView {
    /// Introspects `model`, applies global then model rules and plans the
    /// layout with the model's effective sidescroll policy.
    pub fn build(
        registry: &Registry,
        models: &dyn ModelProvider,
        labels: &dyn LabelProvider,
        model: &str,
    ) -> AdminResult<Self> {
        let scope = ObservationScope::with_fields("RESOLVE", &[("model", model)]);

        let resolved = introspect(model, models, labels).and_then(|descriptors| {
            let rules = registry.effective_rules(model);
            Resolver::for_model(model).resolve_all(&descriptors, &rules)
        });
        let resolution = match resolved {
            Ok(resolution) => resolution,
            Err(e) => {
                scope.fail(&format!("{} ({})", e, e.code()));
                return Err(e);
            }
        };
        scope.complete_with_fields(&[
            ("visible", &resolution.visible().len().to_string()),
            ("hidden", &resolution.hidden().len().to_string()),
        ]);

        let settings = registry.settings_for(model);
        let (visible, hidden) = resolution.into_parts();
        let plan = LayoutPlanner::plan(visible, settings.sidescroll, settings.checkboxes);

        log_event_with_fields(
            Event::LayoutPlanned,
            &[
                ("model", model),
                ("policy", &plan.policy().to_string()),
                ("frozen_leading", &plan.frozen_leading().to_string()),
                ("frozen_trailing", &plan.frozen_trailing().to_string()),
            ],
        );

        Ok(Self {
            model: model.to_string(),
            plan,
            hidden,
            settings,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn plan(&self) -> &LayoutPlan {
        &self.plan
    }

    /// Fields left out of the table
    pub fn hidden(&self) -> &[ResolvedField] {
        &self.hidden
    }

    pub fn settings(&self) -> &ListSettings {
        &self.settings
    }

    /// First page of `records` in the default order, as HTML
    pub fn render(&self, mut records: Vec<Record>) -> AdminResult<String> {
        RecordSorter::sort(&mut records, &self.settings.sort);
        records.truncate(self.settings.items_per_page);

        match HtmlTable::render(&self.plan, &records) {
            Ok(html) => {
                log_event_with_fields(
                    Event::RenderComplete,
                    &[("model", &self.model), ("rows", &records.len().to_string())],
                );
                Ok(html)
            }
            Err(e) => {
                log_event_with_fields(
                    Event::RenderFailed,
                    &[("model", &self.model), ("code", e.code()), ("reason", &e.to_string())],
                );
                Err(e)
            }
        }
    }
}
