use skyboard_core::{DisplaySurface, UiState, View, dashboard::ContentCard, render};
use std::io::Write;

/// Prints dashboard transitions to the terminal.
///
/// Errors are not printed here; the command returns them so they surface
/// through the normal `anyhow` exit path.
pub struct TerminalSurface<W> {
    out: W,
    section_title: &'static str,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, section_title: &'static str) -> Self {
        Self { out, section_title }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_view(&mut self, view: &View, query: &str) -> std::io::Result<()> {
        match view {
            View::Idle | View::Error(_) => Ok(()),
            View::Loading => writeln!(self.out, "Fetching weather for {query}..."),
            View::Results { weather, content } => {
                writeln!(self.out)?;
                writeln!(self.out, "  {} [{}]", weather.place, weather.icon)?;
                writeln!(self.out, "  {}", weather.description)?;
                writeln!(self.out, "  Temperature: {}", weather.temperature)?;
                writeln!(self.out, "  Feels like:  {}", weather.feels_like)?;
                writeln!(self.out, "  Humidity:    {}", weather.humidity)?;
                writeln!(self.out, "  Wind:        {}", weather.wind)?;

                writeln!(self.out)?;
                writeln!(self.out, "  {}", self.section_title)?;
                if content.is_empty() {
                    writeln!(self.out, "    (nothing to show)")?;
                }
                for card in content {
                    self.write_card(card)?;
                }
                Ok(())
            }
        }
    }

    fn write_card(&mut self, card: &ContentCard) -> std::io::Result<()> {
        writeln!(self.out, "    - {}", card.title)?;
        writeln!(self.out, "      {}", card.description)?;
        if card.label.is_empty() {
            writeln!(self.out, "      {}", card.source)?;
        } else {
            writeln!(self.out, "      {} | {}", card.source, card.label)?;
        }
        if let Some(url) = &card.url {
            writeln!(self.out, "      {url}")?;
        }
        Ok(())
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn show(&mut self, ui: &UiState) {
        if let Err(err) = self.write_view(&render(ui), &ui.query) {
            tracing::warn!(error = %err, "failed to write to terminal");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyboard_core::{
        Condition, ContentItem, DisplayState, SearchOutcome, WeatherReading,
    };

    fn success() -> UiState {
        UiState {
            query: "Paris".into(),
            display: DisplayState::Success(Box::new(SearchOutcome {
                reading: WeatherReading {
                    place: "Paris".into(),
                    condition: Condition::Rain,
                    description: "light rain".into(),
                    temperature_c: 12.4,
                    feels_like_c: 11.8,
                    humidity_pct: 82,
                    wind_speed_kmh: 18.0,
                    icon_code: "10d".into(),
                },
                icon: "rain-day",
                items: vec![ContentItem {
                    title: "Rainy Day Jazz".into(),
                    description: "Smooth".into(),
                    source: "Jazz/Lo-fi".into(),
                    label: "Cozy & Contemplative".into(),
                    url: None,
                    published_at: None,
                }],
            })),
        }
    }

    #[test]
    fn prints_weather_card_and_items() {
        let mut surface = TerminalSurface::new(Vec::new(), "Music for this weather");
        surface.show(&success());

        let text = String::from_utf8(surface.into_inner()).unwrap();
        assert!(text.contains("Paris [rain-day]"));
        assert!(text.contains("Temperature: 12°C"));
        assert!(text.contains("Wind:        18 km/h"));
        assert!(text.contains("Music for this weather"));
        assert!(text.contains("Jazz/Lo-fi | Cozy & Contemplative"));
    }

    #[test]
    fn errors_are_left_to_the_caller() {
        let mut surface = TerminalSurface::new(Vec::new(), "News");
        surface.show(&UiState {
            query: "x".into(),
            display: DisplayState::Error("boom".into()),
        });

        assert!(surface.into_inner().is_empty());
    }
}
