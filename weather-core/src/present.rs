//! HTML rendering of a [`WeatherReport`].

use crate::{
    Config,
    model::{Locale, WeatherReport},
};

struct Captions {
    title_prefix: &'static str,
    title_suffix: &'static str,
    temperature: &'static str,
    humidity: &'static str,
    precipitation: &'static str,
    wind_speed: &'static str,
    wind_direction: &'static str,
    map: &'static str,
}

const HUNGARIAN: Captions = Captions {
    title_prefix: "",
    title_suffix: " időjárása",
    temperature: "hőmérséklet",
    humidity: "páratartalom",
    precipitation: "csapadék (1 óra)",
    wind_speed: "szélsebesség",
    wind_direction: "szélirány",
    map: "Időjárástérkép",
};

const ENGLISH: Captions = Captions {
    title_prefix: "Weather in ",
    title_suffix: "",
    temperature: "temperature",
    humidity: "humidity",
    precipitation: "precipitation (1h)",
    wind_speed: "wind speed",
    wind_direction: "wind direction",
    map: "Weather map",
};

#[derive(Debug, Clone)]
pub struct Presenter {
    locale: Locale,
    icon_path: String,
}

impl Presenter {
    pub fn new(locale: Locale, icon_path: impl Into<String>) -> Self {
        Self {
            locale,
            icon_path: icon_path.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.locale(), config.icon_path.clone())
    }

    fn captions(&self) -> &'static Captions {
        match self.locale {
            Locale::Hungarian => &HUNGARIAN,
            Locale::English => &ENGLISH,
        }
    }

    /// Render the report as an `<h2>` title followed by a list of the fields that are present.
    pub fn render(&self, report: &WeatherReport) -> String {
        let c = self.captions();
        let mut html = format!(
            "<h2>{}{}{}</h2><ul class=\"no-bullets\">",
            c.title_prefix,
            escape(&report.city_name),
            c.title_suffix
        );

        if let Some(time) = &report.observed_at_local_time {
            html.push_str(&format!("<li>{}</li>", escape(time)));
        }

        let description = report.description.as_deref().map(escape).unwrap_or_default();
        if !report.icon_key.is_empty() || !description.is_empty() {
            html.push_str("<li style=\"display: inline-block;\">");
            if !report.icon_key.is_empty() {
                html.push_str(&format!(
                    "<img class=\"icon\" src=\"{}/{}.png\" alt=\"{}\" />",
                    self.icon_path, report.icon_key, description
                ));
            }
            html.push_str(&description);
            html.push_str("</li>");
        }

        if let Some(temp) = report.temperature {
            html.push_str(&format!(
                "<li>{}: {} {}</li>",
                c.temperature,
                temp,
                report.units.temperature_symbol()
            ));
        }
        if let Some(humidity) = report.humidity_pct {
            html.push_str(&format!("<li>{}: {}%</li>", c.humidity, humidity));
        }
        html.push_str(&format!(
            "<li>{}: {} mm</li>",
            c.precipitation, report.precipitation_mm_1h
        ));
        if let Some(speed) = report.wind_speed_kmh {
            html.push_str(&format!("<li>{}: {} km/h</li>", c.wind_speed, speed.round()));
        }
        if let Some(label) = report.wind_direction_label {
            html.push_str(&format!("<li>{}: {}</li>", c.wind_direction, label));
        }
        if let Some(link) = &report.map_link {
            html.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>",
                escape(link),
                c.map
            ));
        }

        html.push_str("</ul>");
        html
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
