//! Sound effects and background music.
//!
//! With the `audio` feature, clips are loaded from the assets directory once and
//! played through rodio, fire-and-forget. Without it (or with `--mute`) every cue
//! goes to [`NoAudio`], which only traces.

use std::path::Path;

use crate::engine::{AudioCue, NoAudio};

pub const MUSIC_FILE: &str = "music.wav";

/// Pick the audio backend. Never fails: problems are logged and sound is skipped.
pub fn open(assets_dir: &Path, mute: bool) -> Box<dyn AudioCue> {
    if mute {
        tracing::info!("sound muted");
        return Box::new(NoAudio);
    }
    open_backend(assets_dir)
}

#[cfg(feature = "audio")]
fn open_backend(assets_dir: &Path) -> Box<dyn AudioCue> {
    match rodio_backend::RodioAudio::new(assets_dir) {
        Ok(audio) => Box::new(audio),
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "no audio output, continuing silently");
            Box::new(NoAudio)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn open_backend(assets_dir: &Path) -> Box<dyn AudioCue> {
    tracing::info!(assets = %assets_dir.display(), "built without the audio feature");
    Box::new(NoAudio)
}

#[cfg(feature = "audio")]
mod rodio_backend {
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    use super::MUSIC_FILE;
    use crate::engine::AudioCue;
    use crate::types::Effect;

    const EFFECTS: [Effect; 4] = [
        Effect::Eat,
        Effect::PowerUp,
        Effect::PowerDown,
        Effect::GameOver,
    ];

    pub struct RodioAudio {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        _music: Option<Sink>,
        clips: HashMap<Effect, Arc<[u8]>>,
    }

    impl RodioAudio {
        pub fn new(assets_dir: &Path) -> Result<Self> {
            let (stream, handle) =
                OutputStream::try_default().context("Failed to open audio output")?;

            let clips = EFFECTS
                .into_iter()
                .filter_map(|e| load(assets_dir, e.asset_name()).map(|bytes| (e, bytes)))
                .collect();

            let music = load(assets_dir, MUSIC_FILE).and_then(|bytes| {
                let source = Decoder::new(Cursor::new(bytes))
                    .map_err(|err| tracing::warn!(error = %err, "music is not a valid wav"))
                    .ok()?;
                let sink = Sink::try_new(&handle)
                    .map_err(|err| tracing::warn!(error = %err, "no sink for music"))
                    .ok()?;
                sink.append(source.repeat_infinite());
                Some(sink)
            });

            Ok(Self {
                _stream: stream,
                handle,
                _music: music,
                clips,
            })
        }
    }

    impl AudioCue for RodioAudio {
        fn play_effect(&mut self, effect: Effect) {
            let Some(bytes) = self.clips.get(&effect) else {
                return;
            };
            let Ok(sink) = Sink::try_new(&self.handle) else {
                tracing::warn!(?effect, "no sink for effect");
                return;
            };
            let Ok(source) = Decoder::new(Cursor::new(Arc::clone(bytes))) else {
                tracing::warn!(?effect, "effect is not a valid wav");
                return;
            };
            sink.append(source);
            sink.detach();
        }
    }

    fn load(dir: &Path, name: &str) -> Option<Arc<[u8]>> {
        let path = dir.join(name);
        match std::fs::read(&path) {
            Ok(bytes) => Some(bytes.into()),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "sound asset unavailable");
                None
            }
        }
    }
}
