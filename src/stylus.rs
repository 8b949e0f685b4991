use evdev::{AbsoluteAxisType, Device, InputEvent, InputEventKind, Key};
use log::{error, info, warn};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

/// Raw pressure above which the pen counts as touching the tablet.
pub const PRESSURE_THRESHOLD: i32 = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylusEvent {
    Contact(bool),
}

/// Turns raw evdev events into contact changes. Only edges are reported.
#[derive(Debug, Default)]
pub struct ContactTracker {
    in_contact: bool,
}

impl ContactTracker {
    pub fn feed(&mut self, event: &InputEvent) -> Option<StylusEvent> {
        let touching = match event.kind() {
            InputEventKind::AbsAxis(AbsoluteAxisType::ABS_PRESSURE) => {
                event.value() > PRESSURE_THRESHOLD
            }
            InputEventKind::Key(Key::BTN_TOUCH) => event.value() != 0,
            _ => return None,
        };

        if touching == self.in_contact {
            return None;
        }
        self.in_contact = touching;
        Some(StylusEvent::Contact(touching))
    }
}

pub fn read_input(device_path: String, sender: Sender<StylusEvent>) {
    thread::spawn(move || {
        let mut device = match Device::open(&device_path) {
            Ok(device) => device,
            Err(e) => {
                error!("could not open stylus device {device_path}: {e}");
                return;
            }
        };
        info!("reading stylus from {device_path}");

        let mut tracker = ContactTracker::default();
        loop {
            match device.fetch_events() {
                Ok(events) => {
                    for event in events {
                        let Some(stylus_event) = tracker.feed(&event) else {
                            continue;
                        };
                        if sender.send(stylus_event).is_err() {
                            // receiver gone, window closed
                            return;
                        }
                    }
                }
                Err(e) => {
                    warn!("error when reading stylus events: {e}");
                    thread::sleep(Duration::from_secs(1));
                }
            }
        }
    });
}
