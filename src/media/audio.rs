use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::AudioError;

/// Playback volume of the background track
pub const VOLUME: f32 = 0.4;

/// Something that can be started and paused
pub trait Track {
    fn play(&mut self) -> Result<(), AudioError>;
    fn pause(&mut self);
}

/// A file decoded once and repeated forever on the default output
pub struct LoopedTrack {
    // Dropping the stream silences the sink
    _stream: OutputStream,
    sink: Sink,
}

impl LoopedTrack {
    /// Open the default output and queue the file, paused
    pub fn open(path: &Path) -> Result<Self, AudioError> {
        let (stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;

        let file = File::open(path)?;
        let source = Decoder::new(BufReader::new(file))?.repeat_infinite();

        sink.pause();
        sink.set_volume(VOLUME);
        sink.append(source);

        Ok(Self {
            _stream: stream,
            sink,
        })
    }
}

impl Track for LoopedTrack {
    fn play(&mut self) -> Result<(), AudioError> {
        if self.sink.empty() {
            return Err(AudioError::Empty);
        }
        self.sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        self.sink.pause();
    }
}

/// Play/pause state of the background music
pub struct MusicPlayer {
    track: Option<Box<dyn Track>>,
    playing: bool,
}

impl MusicPlayer {
    pub fn new(track: Option<Box<dyn Track>>) -> Self {
        Self {
            track,
            playing: false,
        }
    }

    /// Load the track at `path`; without one the toggle stays off
    pub fn open(path: &Path) -> Self {
        match LoopedTrack::open(path) {
            Ok(track) => {
                tracing::debug!("Loaded background music from {}", path.display());
                Self::new(Some(Box::new(track)))
            }
            Err(e) => {
                tracing::warn!("Background music unavailable ({}): {}", path.display(), e);
                Self::new(None)
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip between playing and paused
    pub fn toggle(&mut self) {
        let Some(track) = self.track.as_mut() else {
            tracing::warn!("No background music to play");
            self.playing = false;
            return;
        };

        if self.playing {
            track.pause();
            self.playing = false;
            return;
        }

        match track.play() {
            Ok(()) => self.playing = true,
            Err(e) => {
                tracing::error!("Playback failed: {}", e);
                self.playing = false;
            }
        }
    }
}
