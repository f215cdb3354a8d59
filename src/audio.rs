//! Sound trigger dispatch
//!
//! The simulation only names sounds. Actual playback lives behind
//! [`AudioBackend`], so a host can plug in whatever output it has.
//! Playback failures never reach the game loop.

use thiserror::Error;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fired (hit or miss)
    Shoot,
    /// Shot connected with a hostile
    Hit,
    /// Pickup collected
    Pickup,
}

impl SoundEffect {
    /// Trigger name as understood by sound hosts
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Hit => "hit",
            SoundEffect::Pickup => "pickup",
        }
    }

    /// Map a simulation event to its sound, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shoot => Some(SoundEffect::Shoot),
            GameEvent::Hit { .. } => Some(SoundEffect::Hit),
            GameEvent::PickupCollected { .. } => Some(SoundEffect::Pickup),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable")]
    Unavailable,
}

/// Something that can make noise
pub trait AudioBackend {
    fn trigger(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Backend that only logs; used headless
#[derive(Debug, Default)]
pub struct NullBackend;

impl AudioBackend for NullBackend {
    fn trigger(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::debug!("sfx {} @ {:.2}", effect.name(), volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    warned: bool,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            warned: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect. Backend errors are logged and dropped.
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        if let Err(e) = self.backend.trigger(effect, vol) {
            if self.warned {
                log::debug!("Audio: {}", e);
            } else {
                log::warn!("Audio: {}", e);
                self.warned = true;
            }
        }
    }

    /// Play the sound for every event that has one, in order
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::from_event) {
            self.play(effect);
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl Default for AudioManager<NullBackend> {
    fn default() -> Self {
        Self::new(NullBackend)
    }
}
