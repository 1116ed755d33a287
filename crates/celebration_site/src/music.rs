//! Background music toggle.

use crate::error::SiteResult;

/// Something that can start and stop the page's music.
pub trait AudioSink {
    /// Starts or resumes playback.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SiteError::Playback`] when the platform refuses, for
    /// instance before the first user gesture.
    fn play(&mut self) -> SiteResult<()>;

    /// Pauses playback.
    fn pause(&mut self);
}

impl<A: AudioSink + ?Sized> AudioSink for Box<A> {
    fn play(&mut self) -> SiteResult<()> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause();
    }
}

/// Play/pause button state.
#[derive(Debug)]
pub struct MusicToggle<A: AudioSink> {
    sink: A,
    playing: bool,
}

impl<A: AudioSink> MusicToggle<A> {
    /// Creates a paused toggle.
    pub fn new(sink: A) -> Self {
        Self {
            sink,
            playing: false,
        }
    }

    /// Button pressed. Returns whether music is now playing.
    ///
    /// # Errors
    ///
    /// Propagates a refused `play`; the toggle stays paused.
    pub fn toggle(&mut self) -> SiteResult<bool> {
        if self.playing {
            self.sink.pause();
            self.playing = false;
        } else {
            self.sink.play()?;
            self.playing = true;
        }
        Ok(self.playing)
    }

    /// Returns true while music plays.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// The underlying sink.
    #[must_use]
    pub fn sink(&self) -> &A {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SiteError;

    #[derive(Debug, Default)]
    struct FakeSink {
        blocked: bool,
        plays: u32,
        pauses: u32,
    }

    impl AudioSink for FakeSink {
        fn play(&mut self) -> SiteResult<()> {
            if self.blocked {
                return Err(SiteError::Playback("autoplay blocked".into()));
            }
            self.plays += 1;
            Ok(())
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }
    }

    #[test]
    fn test_toggle_alternates() {
        let mut music = MusicToggle::new(FakeSink::default());
        assert!(music.toggle().unwrap());
        assert!(!music.toggle().unwrap());
        assert_eq!(music.sink().plays, 1);
        assert_eq!(music.sink().pauses, 1);
    }

    #[test]
    fn test_refused_play_stays_paused() {
        let mut music = MusicToggle::new(FakeSink {
            blocked: true,
            ..Default::default()
        });
        assert!(music.toggle().is_err());
        assert!(!music.is_playing());
    }
}
