use crate::core::estimator::{estimate, ScenarioInput};
use crate::core::presets::Preset;
use crate::interface::estimation_view::{slider_colour, CountUp, EstimationView};
use crate::interface::notifications::Notification;

/// What the results panel plays after an estimate: the final view (the bar fills to its width)
/// plus the count-up frames of the displayed number.
#[derive(Clone, Debug)]
pub struct Calculation {
    pub view: EstimationView,
    pub count_up: CountUp,
}

/// The "what-if" panel: the form values the user is editing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenarioSession {
    pub input: ScenarioInput,
}

impl ScenarioSession {
    pub fn new(input: ScenarioInput) -> Self {
        Self { input }
    }

    pub fn calculate(&self) -> Calculation {
        let result = estimate(&self.input);
        tracing::debug!(
            consumption_mw = result.consumption_mw,
            department = %result.department,
            "scenario estimated"
        );

        Calculation {
            view: EstimationView::new(&result),
            count_up: CountUp::new(result.consumption_mw),
        }
    }

    /// Loads a preset by name and recalculates. Unknown names leave the session untouched and
    /// return `None`.
    pub fn load_preset(&mut self, name: &str) -> Option<(Calculation, Notification)> {
        let preset: Preset = name.parse().ok()?;
        preset.apply_to(&mut self.input);

        Some((
            self.calculate(),
            Notification::success(format!("Scénario \"{preset}\" chargé")),
        ))
    }

    /// Restores the default weather values. Department, season and day type are kept.
    pub fn reset(&mut self) -> Notification {
        let defaults = ScenarioInput::default();
        self.input.temperature = defaults.temperature;
        self.input.wind = defaults.wind;
        self.input.humidity = defaults.humidity;
        self.input.precipitation = defaults.precipitation;

        Notification::info("Scénario réinitialisé")
    }

    pub fn slider_colour(&self) -> &'static str {
        slider_colour(self.input.temperature)
    }
}
