use crate::core::estimator::{EstimationResult, BASE_CONSUMPTION_MW};
use crate::numbers::{min_of_2, round_half_towards_positive};
use serde::Serialize;
use std::time::Duration;

/// Reference consumption the estimate is compared against, in MW.
pub const AVERAGE_CONSUMPTION_MW: f64 = BASE_CONSUMPTION_MW;

const ABOVE_AVERAGE_COLOUR: &str = "#ef4444";
const BELOW_AVERAGE_COLOUR: &str = "#10b981";

const COUNT_UP_DURATION: Duration = Duration::from_millis(1000);
const COUNT_UP_FRAMES: u32 = 60;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn icon(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
        }
    }

    pub fn colour(&self) -> &'static str {
        match self {
            Trend::Up => ABOVE_AVERAGE_COLOUR,
            Trend::Down => BELOW_AVERAGE_COLOUR,
        }
    }
}

/// Everything the results panel shows for one estimate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EstimationView {
    pub consumption_mw: i64,
    pub department_label: String,
    pub season_label: String,
    pub day_type_label: String,
    /// Width of the comparison bar, in percent of its track (at most 100).
    pub bar_width_percent: f64,
    /// Signed difference from the departmental average, in whole percent.
    pub delta_percent: i64,
    pub trend: Trend,
}

impl EstimationView {
    pub fn new(result: &EstimationResult) -> Self {
        let consumption = result.consumption_mw as f64;
        let percentage = consumption / AVERAGE_CONSUMPTION_MW * 100.;
        let delta_percent = round_half_towards_positive(
            (consumption - AVERAGE_CONSUMPTION_MW) / AVERAGE_CONSUMPTION_MW * 100.,
        ) as i64;
        let trend = if delta_percent > 0 {
            Trend::Up
        } else {
            Trend::Down
        };

        Self {
            consumption_mw: result.consumption_mw,
            department_label: result.department.label(),
            season_label: result.season.label(),
            day_type_label: result.day_type.label(),
            bar_width_percent: min_of_2(percentage, 100.),
            delta_percent,
            trend,
        }
    }

    /// e.g. "↑ 5% par rapport à la moyenne départementale"
    pub fn comparison_text(&self) -> String {
        format!(
            "{} {}% par rapport à la moyenne départementale",
            self.trend.icon(),
            self.delta_percent.abs()
        )
    }
}

/// Colour of the temperature slider track for a given temperature in °C.
pub fn slider_colour(temperature: f64) -> &'static str {
    if temperature < 0. {
        "#3b82f6"
    } else if temperature < 10. {
        "#06b6d4"
    } else if temperature < 20. {
        "#10b981"
    } else if temperature < 30. {
        "#fbbf24"
    } else {
        "#ef4444"
    }
}

/// Frames of the count-up animation of the displayed estimate: the value climbs from zero in
/// equal increments and the last frame always shows the exact target.
#[derive(Clone, Debug)]
pub struct CountUp {
    target: i64,
    increment: f64,
    current: f64,
    finished: bool,
}

impl CountUp {
    pub fn new(target: i64) -> Self {
        Self {
            target,
            increment: target as f64 / COUNT_UP_FRAMES as f64,
            current: 0.,
            finished: false,
        }
    }

    pub fn frame_interval() -> Duration {
        COUNT_UP_DURATION / COUNT_UP_FRAMES
    }
}

impl Iterator for CountUp {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.current += self.increment;
        // non-positive targets are shown immediately
        if self.current >= self.target as f64 || self.increment <= 0. {
            self.current = self.target as f64;
            self.finished = true;
        }

        Some(round_half_towards_positive(self.current) as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codes::Code;
    use crate::core::departments::Department;
    use crate::core::estimator::{estimate, DayType, ScenarioInput, Season};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn result_with(consumption_mw: i64) -> EstimationResult {
        EstimationResult {
            consumption_mw,
            department: Department::Moselle.into(),
            season: Season::Autumn.into(),
            day_type: DayType::Weekday.into(),
        }
    }

    #[rstest]
    fn test_view_of_default_estimate() {
        let view = EstimationView::new(&estimate(&ScenarioInput::default()));

        assert_eq!(
            view,
            EstimationView {
                consumption_mw: 1050,
                department_label: "57 - Moselle".into(),
                season_label: "Automne".into(),
                day_type_label: "Semaine".into(),
                bar_width_percent: 100.,
                delta_percent: 5,
                trend: Trend::Up,
            }
        );
        assert_eq!(
            view.comparison_text(),
            "↑ 5% par rapport à la moyenne départementale"
        );
        assert_eq!(view.trend.colour(), "#ef4444");
    }

    #[rstest]
    fn test_below_average_estimate() {
        let view = EstimationView::new(&result_with(670));

        assert_relative_eq!(view.bar_width_percent, 67.);
        assert_eq!(view.delta_percent, -33);
        assert_eq!(view.trend, Trend::Down);
        assert_eq!(
            view.comparison_text(),
            "↓ 33% par rapport à la moyenne départementale"
        );
    }

    #[rstest]
    fn test_exactly_average_counts_as_down() {
        let view = EstimationView::new(&result_with(1000));

        assert_eq!(view.delta_percent, 0);
        assert_eq!(view.trend, Trend::Down);
        assert_eq!(view.trend.colour(), "#10b981");
    }

    #[rstest]
    fn test_unknown_codes_are_labelled_raw() {
        let result = EstimationResult {
            consumption_mw: 1000,
            department: Code::parse("75"),
            season: Code::parse("monsoon"),
            day_type: Code::parse("holiday"),
        };
        let view = EstimationView::new(&result);

        assert_eq!(view.department_label, "75");
        assert_eq!(view.season_label, "monsoon");
        assert_eq!(view.day_type_label, "holiday");
    }

    #[rstest]
    #[case(-0.5, "#3b82f6")]
    #[case(0., "#06b6d4")]
    #[case(15., "#10b981")]
    #[case(29.9, "#fbbf24")]
    #[case(30., "#ef4444")]
    fn test_slider_colour(#[case] temperature: f64, #[case] colour: &str) {
        assert_eq!(slider_colour(temperature), colour);
    }

    #[rstest]
    fn test_count_up_reaches_target_in_sixty_frames() {
        let frames: Vec<i64> = CountUp::new(1050).collect();

        assert_eq!(frames.len(), 60);
        assert_eq!(frames[0], 18);
        assert_eq!(*frames.last().unwrap(), 1050);
        assert!(frames.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(CountUp::frame_interval(), Duration::from_nanos(16_666_666));
    }

    #[rstest]
    fn test_count_up_to_zero_is_a_single_frame() {
        assert_eq!(CountUp::new(0).collect::<Vec<_>>(), vec![0]);
    }
}
