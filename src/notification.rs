//! Turns a [`WeatherRecord`] into the field values of the weather template message.

use crate::localization::{localize, Language};
use crate::utils::formatting::one_decimal;
use crate::weather::WeatherRecord;
use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt::Display;

const COLOR_HEADER: &str = "#173177";
const COLOR_CONDITION: &str = "#FF4500";
const COLOR_TEMPERATURE_NOW: &str = "#FF0000";
const COLOR_WIND: &str = "#1E90FF";
const COLOR_HUMIDITY: &str = "#4169E1";
const COLOR_ALERT: &str = "#FF6347";
const COLOR_NOTE: &str = "#32CD32";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TemplateField {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
impl TemplateField {
    pub fn colored(value: impl Into<String>, color: &str) -> TemplateField {
        TemplateField { value: value.into(), color: Some(color.to_string()) }
    }
}

/// Values of the template fields, keyed by the field names the template declares.
/// Serializes as a JSON object in declaration order.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NotificationPayload {
    pub date: TemplateField,
    pub region: TemplateField,
    pub weather: TemplateField,
    pub temp: TemplateField,
    pub temp_now: TemplateField,
    pub wind_dir: TemplateField,
    pub humidity: TemplateField,
    pub alert: TemplateField,
    pub today_note: TemplateField,
}

/// Clothing advice, chosen by the current temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    Freezing,
    Cold,
    Cool,
    Comfortable,
}
impl Advice {
    pub fn for_temperature(celsius: f64) -> Advice {
        match celsius {
            t if t < 0.0 => Advice::Freezing,
            t if t < 10.0 => Advice::Cold,
            t if t < 20.0 => Advice::Cool,
            _ => Advice::Comfortable,
        }
    }

    fn text_id(&self) -> &'static str {
        match self {
            Advice::Freezing => "advice-freezing",
            Advice::Cold => "advice-cold",
            Advice::Cool => "advice-cool",
            Advice::Comfortable => "advice-comfortable",
        }
    }

    pub fn localized(&self, lang: Language) -> String {
        localize!(lang, self.text_id())
    }
}

pub fn format_date<Tz>(lang: Language, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let pattern = localize!(lang, "date-format");
    now.format_localized(&pattern, lang.chrono_locale()).to_string()
}

pub fn compose<Tz>(lang: Language, record: &WeatherRecord, now: &DateTime<Tz>) -> NotificationPayload
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let advice = Advice::for_temperature(record.temperature_now).localized(lang);

    NotificationPayload {
        date: TemplateField::colored(format_date(lang, now), COLOR_HEADER),
        region: TemplateField::colored(localize!(lang, "region-label"), COLOR_HEADER),
        weather: TemplateField::colored(record.condition.as_str(), COLOR_CONDITION),
        temp: TemplateField::colored(
            localize!(lang, "temp-range",
                low: one_decimal(record.temperature_low),
                high: one_decimal(record.temperature_high)),
            COLOR_CONDITION),
        temp_now: TemplateField::colored(
            localize!(lang, "temp-now", temp: one_decimal(record.temperature_now)),
            COLOR_TEMPERATURE_NOW),
        wind_dir: TemplateField::colored(record.wind_summary(lang), COLOR_WIND),
        humidity: TemplateField::colored(
            localize!(lang, "humidity-value", humidity: one_decimal(record.humidity)),
            COLOR_HUMIDITY),
        alert: TemplateField::colored(record.alert_text.as_str(), COLOR_ALERT),
        today_note: TemplateField::colored(localize!(lang, "today-note", advice: advice), COLOR_NOTE),
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Shanghai;
    use serde_json::json;

    fn record() -> WeatherRecord {
        WeatherRecord {
            condition: "clear".to_string(),
            temperature_now: 15.3,
            temperature_low: 10.1,
            temperature_high: 18.7,
            wind_direction: "north wind".to_string(),
            wind_speed: 3.2,
            humidity: 45.0,
            alert_text: "no warning".to_string(),
        }
    }

    fn friday_morning() -> DateTime<chrono_tz::Tz> {
        Shanghai.with_ymd_and_hms(2026, 10, 16, 7, 30, 0).unwrap()
    }

    #[test]
    fn composes_english_payload() {
        let payload = compose(Language::EnUs, &record(), &friday_morning());

        assert_eq!(payload.date.value, "Friday, October 16, 2026");
        assert_eq!(payload.region.value, "Zhifu District, Yantai, Shandong");
        assert_eq!(payload.weather.value, "clear");
        assert_eq!(payload.temp.value, "10.1℃ ~ 18.7℃");
        assert_eq!(payload.temp_now.value, "current 15.3℃");
        assert_eq!(payload.wind_dir.value, "north wind 3.2km/h");
        assert_eq!(payload.humidity.value, "45.0%");
        assert_eq!(payload.alert.value, "no warning");
        assert_eq!(payload.today_note.value, "🍃 Cool and fresh, good weather for going out | Data from Caiyun Weather");
    }

    #[test]
    fn composes_chinese_payload() {
        let mut record = record();
        record.condition = "晴".to_string();
        record.wind_direction = "北风".to_string();
        record.alert_text = "暂无预警".to_string();
        record.temperature_now = -2.0;

        let payload = compose(Language::ZhCn, &record, &friday_morning());

        assert_eq!(payload.date.value, "2026年10月16日 星期五");
        assert_eq!(payload.region.value, "山东省 烟台市 芝罘区");
        assert_eq!(payload.temp_now.value, "当前 -2.0℃");
        assert_eq!(payload.wind_dir.value, "北风 3.2km/h");
        assert_eq!(payload.today_note.value, "❄️ 气温极低，注意防寒保暖 | 数据来自彩云天气");
    }

    #[test]
    fn temperatures_always_show_one_decimal() {
        let mut record = record();
        record.temperature_low = 9.0;
        record.temperature_high = 21.0;
        record.temperature_now = 20.0;

        let payload = compose(Language::EnUs, &record, &friday_morning());
        assert_eq!(payload.temp.value, "9.0℃ ~ 21.0℃");
        assert_eq!(payload.temp_now.value, "current 20.0℃");
    }

    #[test]
    fn advice_bands() {
        assert_eq!(Advice::for_temperature(-0.1), Advice::Freezing);
        assert_eq!(Advice::for_temperature(0.0), Advice::Cold);
        assert_eq!(Advice::for_temperature(9.9), Advice::Cold);
        assert_eq!(Advice::for_temperature(10.0), Advice::Cool);
        assert_eq!(Advice::for_temperature(19.9), Advice::Cool);
        assert_eq!(Advice::for_temperature(20.0), Advice::Comfortable);
        assert_eq!(Advice::for_temperature(35.0), Advice::Comfortable);
    }

    #[test]
    fn serializes_fields_with_colors() {
        let payload = compose(Language::EnUs, &record(), &friday_morning());
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["weather"], json!({ "value": "clear", "color": "#FF4500" }));
        assert_eq!(value["humidity"], json!({ "value": "45.0%", "color": "#4169E1" }));
        assert_eq!(value.as_object().unwrap().len(), 9);

        let plain = serde_json::to_value(TemplateField { value: "x".to_string(), color: None }).unwrap();
        assert_eq!(plain, json!({ "value": "x" }));
    }
}
