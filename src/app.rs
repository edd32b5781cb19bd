use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, Utc};
use eframe::App;
use egui::{Color32, Context, Mesh, Pos2, Sense, Shape, Ui, Vec2};
use tracing::{error, info, warn};

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::day_period::DayPeriod;
use crate::instant::{Navigation, ObservationInstant, Selection};
use crate::limb::{Disc, LimbPolygon, Point, EDGE_POINTS};
use crate::location::{Location, LocationProvider};
use crate::report::MoonReport;
use crate::request::PendingRequest;
use crate::sun_times::{local_date, SunTimes, SunTimesClient};
use crate::weather::{CurrentConditions, WeatherClient};

const MOON_LIGHT: Color32 = Color32::from_rgb(245, 245, 240);
const MOON_SHADOW: Color32 = Color32::from_rgb(10, 10, 14);
const POLL_INTERVAL: Duration = Duration::from_millis(200);

fn background(period: DayPeriod) -> Color32 {
    match period {
        DayPeriod::Daytime => Color32::from_rgb(64, 120, 170),
        DayPeriod::Evening => Color32::from_rgb(70, 56, 104),
        DayPeriod::Night => Color32::from_rgb(12, 16, 38),
        DayPeriod::Morning => Color32::from_rgb(150, 96, 80),
        DayPeriod::Unknown => Color32::from_rgb(32, 32, 40),
    }
}

fn to_pos(origin: Pos2, point: Point) -> Pos2 {
    Pos2::new(origin.x + point.x as f32, origin.y + point.y as f32)
}

/// Triangulates the shadow as a strip of quads between matching scanline vertices.
fn shadow_mesh(polygon: &LimbPolygon, origin: Pos2, color: Color32) -> Mesh {
    let mut mesh = Mesh::default();
    for (lead, trail) in polygon.rows() {
        mesh.colored_vertex(to_pos(origin, lead), color);
        mesh.colored_vertex(to_pos(origin, trail), color);
    }
    for row in 0..(EDGE_POINTS as u32 - 1) {
        let top = row * 2;
        mesh.add_triangle(top, top + 1, top + 3);
        mesh.add_triangle(top, top + 3, top + 2);
    }
    mesh
}

/// Sun times stored for `date`, or `None` when they belong to another day.
fn sun_times_for(stored: Option<&(NaiveDate, SunTimes)>, date: NaiveDate) -> Option<&SunTimes> {
    stored
        .filter(|(day, _)| *day == date)
        .map(|(_, times)| times)
}

fn day_period(times: Option<&SunTimes>, instant: ObservationInstant) -> DayPeriod {
    times
        .map(|times| DayPeriod::classify(instant, &times.events()))
        .unwrap_or_default()
}

fn local_time(utc: DateTime<Utc>) -> String {
    utc.with_timezone(&Local).format("%H:%M").to_string()
}

pub struct MoonPhaseApp {
    config: Config,
    selection: Selection,
    location: Option<Location>,
    sun_client: SunTimesClient,
    weather_client: WeatherClient,
    sun_request: Option<PendingRequest<(NaiveDate, SunTimes)>>,
    weather_request: Option<PendingRequest<CurrentConditions>>,
    sun_times: Option<(NaiveDate, SunTimes)>,
    weather: Option<CurrentConditions>,
    requested_date: Option<NaiveDate>,
}

impl MoonPhaseApp {
    pub fn new(config: Config, provider: &dyn LocationProvider) -> Self {
        let cache = ResponseCache::shared();
        let location = match provider.locate() {
            Ok(location) => Some(location),
            Err(e) => {
                warn!("Sun times and weather unavailable: {}", e);
                None
            }
        };
        let sun_client = SunTimesClient::new(&config, cache.clone());
        let weather_client = WeatherClient::new(&config, cache);
        if !weather_client.is_enabled() {
            info!(target: "weather", "No API key configured, weather panel disabled");
        }

        let mut app = Self {
            config,
            selection: Selection::now(),
            location,
            sun_client,
            weather_client,
            sun_request: None,
            weather_request: None,
            sun_times: None,
            weather: None,
            requested_date: None,
        };
        app.request_weather();
        app.refresh_sun_times();
        app
    }

    fn navigate(&mut self, action: Navigation) {
        self.selection.apply(action);
        self.refresh_sun_times();
    }

    fn refresh_sun_times(&mut self) {
        let Some(location) = self.location else {
            return;
        };
        let instant = self.selection.instant();
        let date = Some(local_date(instant));
        if date == self.requested_date {
            return;
        }
        if let Some(mut previous) = self.sun_request.take() {
            previous.cancel();
        }
        self.requested_date = date;
        let client = self.sun_client.clone();
        self.sun_request = Some(PendingRequest::spawn("sun-times", move || {
            client.fetch_for(location, instant)
        }));
    }

    fn request_weather(&mut self) {
        let Some(location) = self.location else {
            return;
        };
        if !self.weather_client.is_enabled() {
            return;
        }
        let client = self.weather_client.clone();
        self.weather_request = Some(PendingRequest::spawn("weather", move || client.fetch(location)));
    }

    fn poll_requests(&mut self) {
        if let Some(result) = self.sun_request.as_mut().and_then(|r| r.poll()) {
            self.sun_request = None;
            match result {
                Ok(dated) => self.sun_times = Some(dated),
                Err(e) => {
                    error!(target: "sun_times", "Failed to fetch sun times: {}", e);
                    // allow a new attempt on the next navigation to this date
                    self.requested_date = None;
                }
            }
        }
        if let Some(result) = self.weather_request.as_mut().and_then(|r| r.poll()) {
            self.weather_request = None;
            match result {
                Ok(conditions) => self.weather = Some(conditions),
                Err(e) => error!(target: "weather", "Failed to fetch weather: {}", e),
            }
        }
    }

    fn selected_sun_times(&self) -> Option<&SunTimes> {
        sun_times_for(self.sun_times.as_ref(), local_date(self.selection.instant()))
    }

    fn is_waiting(&self) -> bool {
        self.sun_request.is_some() || self.weather_request.is_some()
    }

    fn render_navigation(&self, ui: &mut Ui) -> Option<Navigation> {
        let mut action = None;
        ui.horizontal(|ui| {
            if ui.button("◀ Prev").clicked() {
                action = Some(Navigation::Prev);
            }
            if ui.button("Today").clicked() {
                action = Some(Navigation::Today);
            }
            if ui.button("Next ▶").clicked() {
                action = Some(Navigation::Next);
            }
            ui.add_space(12.0);
            let selected = self
                .selection
                .instant()
                .to_utc()
                .map(|utc| utc.with_timezone(&Local).format("%x @ %X").to_string())
                .unwrap_or_default();
            ui.label(selected);
        });
        action
    }

    fn render_moon(&self, ui: &mut Ui, report: &MoonReport) {
        let size = self.config.canvas_size;
        let (response, painter) = ui.allocate_painter(Vec2::splat(size), Sense::hover());
        let origin = response.rect.min;
        let side = f64::from(size);

        let disc = Disc::for_canvas(side, side);
        painter.circle_filled(to_pos(origin, disc.center), disc.radius as f32, MOON_LIGHT);

        let polygon = LimbPolygon::for_ephemeris(&report.ephemeris, side, side);
        painter.add(Shape::mesh(shadow_mesh(&polygon, origin, MOON_SHADOW)));

        response.on_hover_text(format!("{} {}", report.phase.emoji(), report.phase));
    }

    fn render_moon_table(&self, ui: &mut Ui, report: &MoonReport) {
        ui.heading("Moon");
        egui::Grid::new("moon_data").striped(true).show(ui, |ui| {
            for (label, value) in report.rows() {
                ui.label(label);
                ui.label(value);
                ui.end_row();
            }
        });
    }

    fn render_sun_table(&self, ui: &mut Ui, period: DayPeriod) {
        ui.heading("Sun");
        if self.location.is_none() {
            ui.label("Set MOONPHASE_LATITUDE and MOONPHASE_LONGITUDE to show sun times.");
            return;
        }
        let Some(times) = self.selected_sun_times() else {
            if self.sun_request.is_some() {
                ui.spinner();
            } else {
                ui.label("Sun times unavailable for this date.");
            }
            return;
        };
        egui::Grid::new("sun_data").striped(true).show(ui, |ui| {
            for (label, at) in times.rows() {
                ui.label(label);
                ui.label(local_time(at));
                ui.end_row();
            }
            ui.label("Day length");
            ui.label(times.format_day_length());
            ui.end_row();
            ui.label("Now");
            ui.label(period.label());
            ui.end_row();
        });
    }

    fn render_weather(&self, ui: &mut Ui) {
        if !self.weather_client.is_enabled() || self.location.is_none() {
            return;
        }
        ui.heading("Weather");
        match &self.weather {
            Some(conditions) => {
                ui.label(conditions.summary());
                ui.label(format!(
                    "Feels like {:.0}°F · humidity {:.0}% · wind {:.0} mph",
                    conditions.main.feels_like, conditions.main.humidity, conditions.wind.speed
                ));
            }
            None if self.weather_request.is_some() => {
                ui.spinner();
            }
            None => {
                ui.label("No report yet");
            }
        }
    }
}

impl App for MoonPhaseApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_requests();

        let action = egui::TopBottomPanel::top("navigation")
            .show(ctx, |ui| self.render_navigation(ui))
            .inner;
        if let Some(action) = action {
            self.navigate(action);
        }

        let instant = self.selection.instant();
        let report = MoonReport::for_instant(instant);
        let period = day_period(self.selected_sun_times(), instant);

        let frame = egui::Frame::central_panel(&ctx.style()).fill(background(period));
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading(format!("{} {}", report.phase.emoji(), report.phase));
                    self.render_moon(ui, &report);
                });
                ui.separator();
                self.render_moon_table(ui, &report);
                ui.separator();
                self.render_sun_table(ui, period);
                ui.separator();
                self.render_weather(ui);
            });
        });

        if self.is_waiting() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sun_times::FIXTURE;
    use chrono::TimeZone;

    #[test]
    fn test_shadow_mesh_covers_every_row() {
        let polygon = LimbPolygon::compute(0.3, 80.0, 120.0, 120.0);
        let mesh = shadow_mesh(&polygon, Pos2::new(10.0, 20.0), MOON_SHADOW);
        assert_eq!(mesh.vertices.len(), EDGE_POINTS * 2);
        assert_eq!(mesh.indices.len(), (EDGE_POINTS - 1) * 6);
        assert!(mesh.is_valid());
        assert_eq!(mesh.vertices[0].pos, Pos2::new(10.0 + 59.0, 20.0));
    }

    #[test]
    fn test_sun_times_only_apply_to_their_own_date() {
        let times = SunTimes::from_json(FIXTURE).unwrap();
        let fetched_for = NaiveDate::from_ymd_opt(2015, 5, 21).unwrap();
        let stored = Some((fetched_for, times));
        let next_day = fetched_for.succ_opt().unwrap();

        assert!(sun_times_for(stored.as_ref(), fetched_for).is_some());
        assert!(sun_times_for(stored.as_ref(), next_day).is_none());
        assert!(sun_times_for(None, fetched_for).is_none());
    }

    #[test]
    fn test_next_day_midday_is_not_classified_against_stale_events() {
        let times = SunTimes::from_json(FIXTURE).unwrap();
        let stored = Some((NaiveDate::from_ymd_opt(2015, 5, 21).unwrap(), times));
        let next_noon = ObservationInstant::from(Utc.with_ymd_and_hms(2015, 5, 22, 12, 0, 0).unwrap());
        let next_day = NaiveDate::from_ymd_opt(2015, 5, 22).unwrap();

        // the previous day's events would call this Night
        let stale = stored.as_ref().map(|(_, times)| times);
        assert_eq!(day_period(stale, next_noon), DayPeriod::Night);

        let guarded = sun_times_for(stored.as_ref(), next_day);
        assert_eq!(day_period(guarded, next_noon), DayPeriod::Unknown);
    }

    #[test]
    fn test_each_period_has_its_own_background() {
        let colors = [
            DayPeriod::Daytime,
            DayPeriod::Evening,
            DayPeriod::Night,
            DayPeriod::Morning,
            DayPeriod::Unknown,
        ]
        .map(background);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
