use crate::localization::{self, localize, Language};
use crate::sources::caiyun::WeatherReport;
use crate::utils::formatting::{one_decimal, round_one_decimal};

/// Weather of the current run, localized and rounded for display.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub condition: String,
    pub temperature_now: f64,
    pub temperature_low: f64,
    pub temperature_high: f64,
    pub wind_direction: String,
    pub wind_speed: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    pub alert_text: String,
}
impl WeatherRecord {
    pub fn from_report(lang: Language, report: &WeatherReport) -> WeatherRecord {
        WeatherRecord {
            condition: localization::sky_condition(lang, &report.skycon),
            temperature_now: round_one_decimal(report.temperature),
            temperature_low: round_one_decimal(report.temperature_min),
            temperature_high: round_one_decimal(report.temperature_max),
            wind_direction: localization::wind_direction(lang, &report.wind_direction),
            wind_speed: round_one_decimal(report.wind_speed),
            humidity: round_one_decimal(report.humidity * 100.0),
            alert_text: match &report.alert {
                Some(title) if !title.trim().is_empty() => title.clone(),
                _ => localize!(lang, "alert-none"),
            },
        }
    }

    pub fn wind_summary(&self, lang: Language) -> String {
        localize!(lang, "wind-summary",
            direction: self.wind_direction,
            speed: one_decimal(self.wind_speed)
        )
    }
}
