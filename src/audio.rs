//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use crate::sim::{FoodKind, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Cherry,
    Banana,
    Coconut,
    Pineapple,
    Pizza,
    Mushroom,
    GameStart,
    GameOver,
    Pause,
    Resume,
    /// Shield cancelled a harmful food
    Heal,
    /// Shield absorbed a crash
    Block,
}

impl SoundEffect {
    pub fn for_food(kind: FoodKind) -> Self {
        match kind {
            FoodKind::Cherry => SoundEffect::Cherry,
            FoodKind::Banana => SoundEffect::Banana,
            FoodKind::Coconut => SoundEffect::Coconut,
            FoodKind::Pineapple => SoundEffect::Pineapple,
            FoodKind::Pizza => SoundEffect::Pizza,
            FoodKind::Mushroom => SoundEffect::Mushroom,
        }
    }

    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::GameStart => SoundEffect::GameStart,
            GameEvent::Pause => SoundEffect::Pause,
            GameEvent::Resume => SoundEffect::Resume,
            GameEvent::Block => SoundEffect::Block,
            GameEvent::Heal => SoundEffect::Heal,
            GameEvent::Dead => SoundEffect::GameOver,
            GameEvent::FoodEaten(kind) => Self::for_food(*kind),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use super::SoundEffect;
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: 0.7,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Set volume (0.0 - 1.0)
        pub fn set_volume(&mut self, vol: f32) {
            self.volume = vol.clamp(0.0, 1.0);
        }

        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        pub fn is_muted(&self) -> bool {
            self.muted
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.volume }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match effect {
                SoundEffect::Cherry => self.play_cherry(ctx, vol),
                SoundEffect::Banana => self.play_banana(ctx, vol),
                SoundEffect::Coconut => self.play_coconut(ctx, vol),
                SoundEffect::Pineapple => self.play_arpeggio(ctx, vol, &[523.0, 659.0, 784.0, 1047.0], 0.06),
                SoundEffect::Pizza => self.play_pizza(ctx, vol),
                SoundEffect::Mushroom => self.play_mushroom(ctx, vol),
                SoundEffect::GameStart => self.play_arpeggio(ctx, vol, &[400.0, 500.0, 600.0, 800.0], 0.1),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
                SoundEffect::Pause => self.play_arpeggio(ctx, vol, &[660.0, 440.0], 0.08),
                SoundEffect::Resume => self.play_arpeggio(ctx, vol, &[440.0, 660.0], 0.08),
                SoundEffect::Heal => self.play_heal(ctx, vol),
                SoundEffect::Block => self.play_block(ctx, vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Single decaying tone
        fn blip(&self, ctx: &AudioContext, vol: f32, freq: f32, osc_type: OscillatorType, len: f64) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
                return;
            };
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + len)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + len + 0.05).ok();
        }

        /// Evenly spaced notes, each decaying over `len`
        fn notes(
            &self,
            ctx: &AudioContext,
            vol: f32,
            freqs: &[f32],
            osc_type: OscillatorType,
            spacing: f64,
            len: f64,
        ) {
            let start = ctx.current_time();
            for (i, freq) in freqs.iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) else {
                    continue;
                };
                let t = start + i as f64 * spacing;
                gain.gain().set_value_at_time(vol, t).ok();
                gain.gain().exponential_ramp_to_value_at_time(0.01, t + len).ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + len + 0.05).ok();
            }
        }

        fn play_arpeggio(&self, ctx: &AudioContext, vol: f32, freqs: &[f32], spacing: f64) {
            self.notes(ctx, vol * 0.3, freqs, OscillatorType::Triangle, spacing, 0.25);
        }

        /// Pitch glide from `from` to `to` Hz over `len` seconds
        fn sweep(
            &self,
            ctx: &AudioContext,
            vol: f32,
            osc_type: OscillatorType,
            (from, to): (f32, f32),
            len: f64,
        ) {
            let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
                return;
            };
            let t = ctx.current_time();
            gain.gain().set_value_at_time(vol, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, t + len).ok();
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency().exponential_ramp_to_value_at_time(to, t + len * 0.85).ok();
            osc.start().ok();
            osc.stop_with_when(t + len + 0.05).ok();
        }

        /// Cherry - bright ding
        fn play_cherry(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, vol * 0.3, 880.0, OscillatorType::Sine, 0.15);
            self.blip(ctx, vol * 0.15, 1760.0, OscillatorType::Sine, 0.1);
        }

        fn play_banana(&self, ctx: &AudioContext, vol: f32) {
            self.sweep(ctx, vol * 0.3, OscillatorType::Triangle, (500.0, 180.0), 0.35);
        }

        /// Coconut - hollow knock plus a click
        fn play_coconut(&self, ctx: &AudioContext, vol: f32) {
            self.sweep(ctx, vol * 0.5, OscillatorType::Sine, (220.0, 110.0), 0.12);
            self.blip(ctx, vol * 0.2, 660.0, OscillatorType::Square, 0.04);
        }

        fn play_pizza(&self, ctx: &AudioContext, vol: f32) {
            self.sweep(ctx, vol * 0.25, OscillatorType::Sawtooth, (200.0, 1200.0), 0.2);
        }

        /// Mushroom - woozy wobble
        fn play_mushroom(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 400.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.frequency().set_value_at_time(400.0, t).ok();
            osc.frequency().set_value_at_time(300.0, t + 0.08).ok();
            osc.frequency().set_value_at_time(450.0, t + 0.16).ok();
            osc.frequency().set_value_at_time(250.0, t + 0.24).ok();
            osc.frequency().set_value_at_time(380.0, t + 0.32).ok();
            osc.frequency().set_value_at_time(200.0, t + 0.4).ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.55).ok();
        }

        fn play_heal(&self, ctx: &AudioContext, vol: f32) {
            self.notes(ctx, vol * 0.2, &[1200.0, 1800.0, 2400.0], OscillatorType::Sine, 0.03, 0.3);
        }

        /// Block - metallic clang against the shield
        fn play_block(&self, ctx: &AudioContext, vol: f32) {
            self.blip(ctx, vol * 0.5, 80.0, OscillatorType::Sine, 0.25);
            self.blip(ctx, vol * 0.25, 400.0, OscillatorType::Square, 0.2);
            self.blip(ctx, vol * 0.2, 250.0, OscillatorType::Triangle, 0.15);
        }

        /// Game over - sad descending
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            self.notes(ctx, vol * 0.3, &[400.0, 350.0, 300.0, 200.0], OscillatorType::Sine, 0.2, 0.3);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_food_has_its_own_sound() {
        let sounds: Vec<SoundEffect> = FoodKind::ALL
            .iter()
            .map(|k| SoundEffect::for_event(&GameEvent::FoodEaten(*k)))
            .collect();
        for (i, a) in sounds.iter().enumerate() {
            for b in &sounds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Dead), SoundEffect::GameOver);
        assert_eq!(SoundEffect::for_event(&GameEvent::Block), SoundEffect::Block);
        assert_eq!(SoundEffect::for_event(&GameEvent::Heal), SoundEffect::Heal);
        assert_eq!(SoundEffect::for_event(&GameEvent::Pause), SoundEffect::Pause);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::FoodEaten(FoodKind::Pizza)),
            SoundEffect::Pizza
        );
    }
}
