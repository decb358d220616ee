//! Sound cues and the audio command queue
//!
//! Game code never talks to a mixer. It queues [`AudioCommand`]s on the
//! [`AudioManager`] and the host drains them into an [`AudioBackend`] once per
//! frame.

/// Number of interchangeable impact samples
pub const IMPACT_VARIANTS: u8 = 3;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Menu selection moved
    Menu0,
    /// Menu value changed
    Menu1,
    /// Game started from the menu
    Menu2,
    /// Skull bounced off the pillow
    Good,
    /// Skull fell off the screen
    Bad,
    /// Any new collision between different kinds (0..IMPACT_VARIANTS)
    Impact(u8),
}

impl SoundEffect {
    /// Sample name as the asset pack knows it
    pub fn sample_name(&self) -> String {
        match self {
            SoundEffect::Menu0 => "MENU0".to_string(),
            SoundEffect::Menu1 => "MENU1".to_string(),
            SoundEffect::Menu2 => "MENU2".to_string(),
            SoundEffect::Good => "GOOD".to_string(),
            SoundEffect::Bad => "BAD".to_string(),
            SoundEffect::Impact(n) => format!("IMPACT{}", n),
        }
    }
}

/// One request for the audio back-end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCommand {
    Play(SoundEffect),
    StartMusic,
    StopMusic,
    /// Master volume, 0-100
    SetVolume(u8),
}

/// Host audio output
pub trait AudioBackend {
    fn execute(&mut self, command: AudioCommand);
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    queue: Vec<AudioCommand>,
    master_volume: u8,
    music_playing: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(100)
    }
}

impl AudioManager {
    pub fn new(volume: u8) -> Self {
        let mut manager = Self {
            queue: Vec::new(),
            master_volume: 100,
            music_playing: false,
        };
        manager.set_master_volume(i32::from(volume));
        manager
    }

    /// Set master volume (clamped to 0 - 100)
    pub fn set_master_volume(&mut self, volume: i32) {
        self.master_volume = volume.clamp(0, 100) as u8;
        self.queue.push(AudioCommand::SetVolume(self.master_volume));
    }

    pub fn master_volume(&self) -> u8 {
        self.master_volume
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        self.queue.push(AudioCommand::Play(effect));
    }

    /// Start the music loop unless it is already playing
    pub fn play_music(&mut self) {
        if !self.music_playing {
            self.music_playing = true;
            self.queue.push(AudioCommand::StartMusic);
        }
    }

    /// Stop the music loop if it is playing
    pub fn stop_music(&mut self) {
        if self.music_playing {
            self.music_playing = false;
            self.queue.push(AudioCommand::StopMusic);
        }
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Commands queued since the last drain
    pub fn pending(&self) -> &[AudioCommand] {
        &self.queue
    }

    /// Hand every queued command to the back-end, oldest first
    pub fn drain_into(&mut self, backend: &mut dyn AudioBackend) {
        for command in self.queue.drain(..) {
            backend.execute(command);
        }
    }

    /// Drop queued commands without playing them
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<AudioCommand>);

    impl AudioBackend for Recorder {
        fn execute(&mut self, command: AudioCommand) {
            self.0.push(command);
        }
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut audio = AudioManager::new(50);
        audio.set_master_volume(150);
        assert_eq!(audio.master_volume(), 100);
        audio.set_master_volume(-3);
        assert_eq!(audio.master_volume(), 0);
        assert_eq!(audio.pending().last(), Some(&AudioCommand::SetVolume(0)));
    }

    #[test]
    fn test_music_start_stop_is_guarded() {
        let mut audio = AudioManager::default();
        audio.clear();
        audio.stop_music();
        audio.play_music();
        audio.play_music();
        audio.stop_music();
        audio.stop_music();
        assert_eq!(
            audio.pending(),
            &[AudioCommand::StartMusic, AudioCommand::StopMusic]
        );
    }

    #[test]
    fn test_drain_preserves_order() {
        let mut audio = AudioManager::default();
        audio.clear();
        audio.play(SoundEffect::Good);
        audio.play(SoundEffect::Impact(2));

        let mut backend = Recorder::default();
        audio.drain_into(&mut backend);

        assert_eq!(
            backend.0,
            vec![
                AudioCommand::Play(SoundEffect::Good),
                AudioCommand::Play(SoundEffect::Impact(2)),
            ]
        );
        assert!(audio.pending().is_empty());
    }

    #[test]
    fn test_sample_names() {
        assert_eq!(SoundEffect::Menu2.sample_name(), "MENU2");
        assert_eq!(SoundEffect::Impact(1).sample_name(), "IMPACT1");
    }
}
