use crate::constants::*;
use crate::core::LifecycleState;
use web_sys as web;

/// Procedural tank atmosphere: a detuned hum through a low-pass filter, plus
/// one-shot blips for proximity triggers.
pub struct TankAudio {
    ctx: web::AudioContext,
    master: web::GainNode,
    hum_gain: web::GainNode,
    hum_filter: web::BiquadFilterNode,
    hum: [web::OscillatorNode; 2],
}

fn create_gain(audio_ctx: &web::AudioContext, value: f32, label: &str) -> anyhow::Result<web::GainNode> {
    let g = web::GainNode::new(audio_ctx)
        .map_err(|e| anyhow::anyhow!("{} GainNode error: {:?}", label, e))?;
    g.gain().set_value(value);
    Ok(g)
}

fn create_oscillator(
    audio_ctx: &web::AudioContext,
    kind: web::OscillatorType,
    frequency_hz: f32,
) -> anyhow::Result<web::OscillatorNode> {
    let osc = web::OscillatorNode::new(audio_ctx)
        .map_err(|e| anyhow::anyhow!("OscillatorNode error: {:?}", e))?;
    osc.set_type(kind);
    osc.frequency().set_value(frequency_hz);
    Ok(osc)
}

impl TankAudio {
    pub fn build() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext error: {:?}", e))?;

        let master = create_gain(&ctx, MASTER_GAIN, "Master")?;
        _ = master.connect_with_audio_node(&ctx.destination());

        let hum_filter = web::BiquadFilterNode::new(&ctx)
            .map_err(|e| anyhow::anyhow!("BiquadFilterNode error: {:?}", e))?;
        hum_filter.set_type(web::BiquadFilterType::Lowpass);
        hum_filter.frequency().set_value(HUM_FILTER_BASE_HZ);
        hum_filter.q().set_value(4.0);

        let hum_gain = create_gain(&ctx, HUM_GAIN_STEADY, "Hum")?;
        _ = hum_filter.connect_with_audio_node(&hum_gain);
        _ = hum_gain.connect_with_audio_node(&master);

        let hum = [
            create_oscillator(&ctx, web::OscillatorType::Sawtooth, HUM_FREQ_HZ)?,
            create_oscillator(&ctx, web::OscillatorType::Sine, HUM_FREQ_HZ + HUM_DETUNE_HZ)?,
        ];
        let t0 = ctx.current_time();
        for osc in &hum {
            _ = osc.connect_with_audio_node(&hum_filter);
            osc.start_with_when(t0)
                .map_err(|e| anyhow::anyhow!("hum start error: {:?}", e))?;
        }
        log::info!("[audio] hum running at {:.1} Hz", HUM_FREQ_HZ);

        Ok(Self {
            ctx,
            master,
            hum_gain,
            hum_filter,
            hum,
        })
    }

    /// Browsers keep a fresh context suspended until a user gesture.
    pub fn resume(&self) {
        if self.ctx.state() != web::AudioContextState::Running {
            _ = self.ctx.resume();
        }
    }

    /// Modulate hum level, tone and pitch from the lifecycle feed.
    pub fn apply_lifecycle(&self, state: LifecycleState) {
        let now = self.ctx.current_time();
        let p = state.progress.clamp(0.0, 1.0);
        let (gain, cutoff, wobble) = if state.is_transient() {
            let decay = 1.0 - p;
            (
                HUM_GAIN_STEADY + (HUM_GAIN_TRANSIENT - HUM_GAIN_STEADY) * decay,
                HUM_FILTER_BASE_HZ + (HUM_FILTER_TRANSIENT_HZ - HUM_FILTER_BASE_HZ) * decay,
                HUM_WOBBLE_HZ * (p * 40.0).sin() * decay,
            )
        } else {
            (
                HUM_GAIN_STEADY + HUM_GAIN_SWELL * p,
                HUM_FILTER_BASE_HZ + HUM_FILTER_SPAN_HZ * p,
                0.0,
            )
        };
        _ = self
            .hum_gain
            .gain()
            .set_target_at_time(gain, now, PARAM_SMOOTHING_SEC);
        _ = self
            .hum_filter
            .frequency()
            .set_target_at_time(cutoff, now, PARAM_SMOOTHING_SEC);
        _ = self.hum[0]
            .frequency()
            .set_target_at_time(HUM_FREQ_HZ + wobble, now, PARAM_SMOOTHING_SEC);
    }

    /// Contact blip; `height_norm` is 0 at the bottom of the viewport, 1 at the top.
    pub fn contact_blip(&self, height_norm: f32) {
        let h = height_norm.clamp(0.0, 1.0);
        let freq = BLIP_FREQ_LOW_HZ + (BLIP_FREQ_HIGH_HZ - BLIP_FREQ_LOW_HZ) * h;
        self.one_shot(web::OscillatorType::Triangle, freq, BLIP_GAIN, BLIP_DURATION_SEC);
    }

    pub fn approach_tick(&self) {
        self.one_shot(web::OscillatorType::Square, TICK_FREQ_HZ, TICK_GAIN, TICK_DURATION_SEC);
    }

    // Fire a short enveloped oscillator straight into the master bus
    fn one_shot(&self, kind: web::OscillatorType, frequency_hz: f32, velocity: f32, duration_sec: f64) {
        let Ok(src) = create_oscillator(&self.ctx, kind, frequency_hz) else {
            return;
        };
        if let Ok(g) = create_gain(&self.ctx, 0.0, "one-shot") {
            let t0 = self.ctx.current_time() + 0.005;
            _ = g.gain().linear_ramp_to_value_at_time(velocity, t0 + 0.01);
            _ = g.gain().linear_ramp_to_value_at_time(0.0, t0 + duration_sec);
            _ = src.connect_with_audio_node(&g);
            _ = g.connect_with_audio_node(&self.master);
            _ = src.start_with_when(t0);
            _ = src.stop_with_when(t0 + duration_sec + 0.05);
        }
    }
}
