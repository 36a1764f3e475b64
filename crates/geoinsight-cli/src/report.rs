//! Plain-text rendering of a country profile.

use geoinsight_core::format::{
    format_area, format_currency, format_number, format_risk_index, NOT_AVAILABLE,
};
use geoinsight_core::{CountryInfo, RiskLevel};
use std::fmt::Write;

/// Headlines shown per country.
const MAX_HEADLINES: usize = 8;

pub fn render_country(info: &CountryInfo) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_country(&mut out, info);
    out
}

fn write_country(out: &mut String, info: &CountryInfo) -> std::fmt::Result {
    writeln!(out, "{}", info.country_name)?;
    writeln!(out, "{}", "=".repeat(info.country_name.chars().count()))?;

    writeln!(out, "\nOverview")?;
    writeln!(out, "  Capital:        {}", text(&info.capital))?;
    writeln!(out, "  Region:         {}", region(info))?;
    writeln!(out, "  Language:       {}", text(&info.language))?;
    writeln!(out, "  Currency:       {}", text(&info.currency))?;

    writeln!(out, "\nDemographics")?;
    writeln!(
        out,
        "  Population:     {}",
        format_number(info.population.map(|p| p as f64))
    )?;
    writeln!(out, "  Area:           {}", format_area(info.area))?;
    writeln!(
        out,
        "  GDP per capita: {}",
        format_currency(info.gdp_per_capita)
    )?;

    let risk = RiskLevel::from_index(info.geopolitical_risk_index);
    writeln!(out, "\nGeopolitical risk")?;
    writeln!(
        out,
        "  {} / 10 - {} ({})",
        format_risk_index(info.geopolitical_risk_index),
        risk,
        risk.description()
    )?;

    if let Some(w) = &info.weather {
        writeln!(out, "\nWeather in {}", text(&w.city))?;
        writeln!(
            out,
            "  {} ({})",
            text(&w.main_condition),
            text(&w.description)
        )?;
        writeln!(
            out,
            "  Temperature:    {} (feels like {})",
            celsius(w.temperature),
            celsius(w.feels_like)
        )?;
        writeln!(
            out,
            "  Humidity:       {}",
            w.humidity.map_or(NOT_AVAILABLE.to_string(), |h| format!("{h}%"))
        )?;
        writeln!(
            out,
            "  Wind:           {}",
            w.wind_speed
                .map_or(NOT_AVAILABLE.to_string(), |s| format!("{s:.1} m/s"))
        )?;
        writeln!(
            out,
            "  Pressure:       {}",
            w.pressure
                .map_or(NOT_AVAILABLE.to_string(), |p| format!("{p} hPa"))
        )?;
    }

    if !info.news.is_empty() {
        writeln!(out, "\nLatest news")?;
        for article in info.news.iter().take(MAX_HEADLINES) {
            let source = article.source.as_deref().unwrap_or("News Source");
            writeln!(out, "  - {} [{}]", article.title, source)?;
            if let Some(url) = &article.url {
                writeln!(out, "    {url}")?;
            }
        }
    }
    Ok(())
}

fn text(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_AVAILABLE)
}

fn region(info: &CountryInfo) -> String {
    match (&info.region, &info.subregion) {
        (Some(r), Some(s)) => format!("{r} / {s}"),
        (Some(r), None) => r.clone(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn celsius(value: Option<f64>) -> String {
    value.map_or(NOT_AVAILABLE.to_string(), |t| format!("{}°C", t.round()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoinsight_core::{NewsArticle, WeatherData};

    #[test]
    fn renders_key_figures() {
        let info = CountryInfo {
            country_name: "Norway".into(),
            capital: Some("Oslo".into()),
            population: Some(5_425_270),
            region: Some("Europe".into()),
            subregion: Some("Northern Europe".into()),
            gdp_per_capita: Some(89_154.28),
            geopolitical_risk_index: Some(1.4),
            weather: Some(WeatherData {
                city: Some("Oslo".into()),
                temperature: Some(-3.4),
                ..WeatherData::default()
            }),
            news: vec![NewsArticle {
                title: "Fjord tunnel opens".into(),
                ..NewsArticle::default()
            }],
            ..CountryInfo::default()
        };
        let text = render_country(&info);
        assert!(text.starts_with("Norway\n======\n"));
        assert!(text.contains("Population:     5,425,270"));
        assert!(text.contains("GDP per capita: $89,154"));
        assert!(text.contains("1.4 / 10 - Very Low Risk"));
        assert!(text.contains("Region:         Europe / Northern Europe"));
        assert!(text.contains("Temperature:    -3°C"));
        assert!(text.contains("Area:           N/A"));
        assert!(text.contains("- Fjord tunnel opens [News Source]"));
    }
}
