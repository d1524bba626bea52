//! Status bar and body information panel
//!
//! Drawn with egui on top of the 3D pass.

use egui::{Color32, Context, RichText};
use solar_system::body::Celestial;
use solar_system::units::{HOURS_PER_DAY, ROTATION_UNIT_HOURS};
use solar_system::{BodyDescriptor, Scene};

/// A key binding and what it does
pub struct Control {
    pub keys: &'static str,
    pub action: &'static str,
}

pub const CONTROLS: &[Control] = &[
    Control { keys: "Up / Down", action: "Focus next / previous body" },
    Control { keys: "Space", action: "Free camera" },
    Control { keys: "P", action: "Profile view" },
    Control { keys: "Right / Left", action: "Faster / slower" },
    Control { keys: "T", action: "Time leap" },
    Control { keys: "D", action: "Toggle distance compression" },
    Control { keys: "Right drag", action: "Rotate camera" },
    Control { keys: "Scroll", action: "Zoom" },
    Control { keys: "Esc", action: "Quit" },
];

/// Simulated time units as Earth days
fn sim_days(units: f32) -> f32 {
    units * ROTATION_UNIT_HOURS / HOURS_PER_DAY
}

pub fn draw_status_bar(ctx: &Context, scene: &Scene) {
    egui::TopBottomPanel::top("status").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let selected = if scene.camera().is_focused() {
                scene.selected_name()
            } else {
                "-"
            };
            ui.label(RichText::new(format!("Focus: {}", selected)).strong());
            ui.separator();
            ui.label(format!("Camera: {}", scene.camera().mode().label()));
            ui.separator();
            ui.label(format!("Distances: {}", scene.distance_mode().label()));
            ui.separator();
            ui.label(format!("Speed: {:.0}x", scene.speed_multiplier()));
            ui.separator();
            ui.label(format!("Day {:.1}", sim_days(scene.sim_time())));
            if scene.satellites_visible() {
                ui.separator();
                ui.label(RichText::new("Moons shown").color(Color32::LIGHT_GREEN));
            }
        });
    });
}

fn descriptor_rows(ui: &mut egui::Ui, descriptor: &BodyDescriptor) {
    let rows = [
        ("Diameter", format!("{:.0} km", descriptor.diameter_km())),
        ("Orbit radius", format!("{:.1} Mkm", descriptor.orbital_distance_km() / 1.0e6)),
        ("Inclination", format!("{:.2}°", descriptor.orbit_inclination_deg())),
        ("Axial tilt", format!("{:.2}°", descriptor.axial_tilt_deg())),
        ("Day length", format!("{:.1} h", descriptor.rotation_period_hours())),
        ("Year length", format!("{:.1} d", descriptor.revolution_period_days())),
    ];
    egui::Grid::new("descriptor_grid")
        .num_columns(2)
        .spacing([10.0, 4.0])
        .show(ui, |ui| {
            for (name, value) in rows {
                ui.label(RichText::new(name).color(Color32::LIGHT_GREEN));
                ui.label(RichText::new(value).monospace());
                ui.end_row();
            }
            if let Some(ring) = descriptor.ring() {
                ui.label(RichText::new("Ring").color(Color32::LIGHT_GREEN));
                ui.label(
                    RichText::new(format!("{:.0} + {:.0} km", ring.inner_distance_km, ring.thickness_km)).monospace(),
                );
                ui.end_row();
            }
        });
}

pub fn draw_body_panel(ctx: &Context, scene: &Scene) {
    egui::SidePanel::right("body_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            let Some(planet) = scene.selected() else {
                return;
            };
            ui.heading(RichText::new(planet.name()).color(Color32::LIGHT_BLUE));
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                descriptor_rows(ui, planet.descriptor());
                ui.add_space(8.0);

                if !planet.satellites().is_empty() {
                    ui.collapsing(RichText::new("Moons").strong(), |ui| {
                        for satellite in planet.satellites() {
                            ui.label(RichText::new(satellite.name()).color(Color32::YELLOW));
                        }
                    });
                    ui.add_space(8.0);
                }

                ui.collapsing(RichText::new("Controls").strong(), |ui| {
                    egui::Grid::new("controls_grid")
                        .num_columns(2)
                        .spacing([10.0, 4.0])
                        .show(ui, |ui| {
                            for control in CONTROLS {
                                ui.label(RichText::new(control.keys).monospace().color(Color32::WHITE));
                                ui.label(control.action);
                                ui.end_row();
                            }
                        });
                });
            });
        });
}
