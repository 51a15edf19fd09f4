//! The interface through which outcomes act on the host.

use lb_core::Actor;

use crate::outcome::{SoundEmission, StatusEffect};

/// Side effects an outcome can request from the host.
///
/// Implementations own whatever world state the effects touch. Calls are made
/// on the tick thread and must not fail; a host that cannot honour a request
/// (for example an effect id it does not know) reports that itself.
pub trait Host {
    /// Whether tick processing is currently enabled. While this is `false`,
    /// [`crate::DelayScheduler::advance`] does nothing at all.
    fn should_tick(&self) -> bool {
        true
    }

    /// Apply a status effect to `target`.
    fn apply_status_effect(&mut self, target: &Actor, effect: &StatusEffect);

    /// Play a sound.
    fn play_sound(&mut self, sound: &SoundEmission);
}

/// A side effect captured by [`RecordingHost`].
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// A status effect was applied.
    StatusEffect {
        /// Who received it.
        target: Actor,
        /// The effect.
        effect: StatusEffect,
    },
    /// A sound was played.
    Sound(SoundEmission),
}

/// A host that records every request in order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingHost {
    /// Value returned from [`Host::should_tick`].
    pub ticking: bool,
    /// Requests received so far.
    pub events: Vec<HostEvent>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            ticking: true,
            events: Vec::new(),
        }
    }
}

impl RecordingHost {
    /// A ticking host with no events.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for RecordingHost {
    fn should_tick(&self) -> bool {
        self.ticking
    }

    fn apply_status_effect(&mut self, target: &Actor, effect: &StatusEffect) {
        self.events.push(HostEvent::StatusEffect {
            target: target.clone(),
            effect: effect.clone(),
        });
    }

    fn play_sound(&mut self, sound: &SoundEmission) {
        self.events.push(HostEvent::Sound(sound.clone()));
    }
}
